//! Greedy chord selection for string-art.
//!
//! The optimizer walks a thread around a [`HookSet`](sa_hooks::HookSet). At
//! every step it scores each admissible chord from the current hook by the mean
//! of the [`ResidualBuffer`] along the chord's rasterized path, commits the
//! best one, and attenuates the residual along it so later chords are pulled
//! toward darkness that is still unexplained.
//!
//! Rules per step:
//! - Hooks within `hook_distance` of the current hook (cyclically) are skipped.
//! - A chord already used in either direction is skipped.
//! - Only strictly positive scores are accepted; ties keep the lowest hook index.
//! - Each newly accepted best draws a uniform number; below `random_accept`
//!   the step instead takes a uniformly random endpoint and stops scanning.
//! - No acceptable chord ends the run with [`Error::Exhausted`], which carries
//!   the chords committed so far.
//!
//! Steps are strictly sequential. Scoring inside a step is a pure function of
//! the residual snapshot ([`chord_score`]) and runs on rayon when
//! [`GreedyConfig::parallel`] is set, with identical results.

mod chord;
mod config;
mod error;
mod exclusion;
mod residual;
mod score;
mod selector;

pub use chord::{Chord, StringOrder};
pub use config::GreedyConfig;
pub use error::{ConfigError, Error};
pub use exclusion::{candidates, exclusion_window};
pub use residual::{ResidualBuffer, path_mean};
pub use score::{chord_path, chord_score, chord_score_into};
pub use selector::{GreedyOutcome, GreedyProgress, GreedySelector, fit_strings};
