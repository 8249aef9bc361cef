use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sa_core::{ImageView, Point2i};
use sa_hooks::HookSet;

use crate::chord::{Chord, StringOrder};
use crate::config::GreedyConfig;
use crate::error::{ConfigError, Error};
use crate::exclusion::candidates;
use crate::residual::{ResidualBuffer, path_mean};
use crate::score::{chord_path, chord_score_into};

/// Report for one committed chord.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyProgress {
    /// Zero-based index of the chord in the string order.
    pub iteration: usize,
    pub total: usize,
    pub chord: Chord,
    /// Mean residual along the chord before it was discounted.
    pub score: f32,
    /// The endpoint came from the random-accept fallback.
    pub random: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    pub order: StringOrder,
    /// Score of each chord in `order`, same indexing.
    pub scores: Vec<f32>,
    pub random_picks: usize,
    /// The run stopped at a cancellation request before `num_strings` chords.
    pub cancelled: bool,
}

/// Sequential greedy chord selection.
///
/// Each step scores every admissible chord from the current hook against the
/// residual buffer, commits the darkest one that has not been used yet,
/// discounts the residual along it and moves to its far end.
pub struct GreedySelector<'h> {
    cfg: GreedyConfig,
    hooks: &'h HookSet,
    residual: ResidualBuffer,
    current: usize,
    used: HashSet<(usize, usize)>,
    order: StringOrder,
    scores: Vec<f32>,
    random_picks: usize,
    path: Vec<Point2i>,
    cancelled: Arc<AtomicBool>,
}

impl<'h> GreedySelector<'h> {
    /// Validates the configuration against `hooks` and `image` and builds the
    /// residual buffer. `image` holds intensities in `[0, 1]`, `1.0` = white.
    pub fn new(
        image: &ImageView<'_, f32>,
        hooks: &'h HookSet,
        cfg: GreedyConfig,
    ) -> Result<Self, Error> {
        cfg.validate(hooks.len())?;
        if let Some(index) = hooks.first_out_of_bounds(image.width(), image.height()) {
            let point = hooks.as_slice()[index];
            return Err(ConfigError::HookOutOfBounds { index, point }.into());
        }
        let residual = ResidualBuffer::from_image(image)?;

        Ok(Self {
            current: cfg.start_hook,
            order: StringOrder::with_capacity(cfg.num_strings),
            scores: Vec::with_capacity(cfg.num_strings),
            used: HashSet::with_capacity(cfg.num_strings),
            cfg,
            hooks,
            residual,
            random_picks: 0,
            path: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shares an external cancellation flag instead of the selector's own.
    pub fn with_cancellation(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Returns a handle that stops [`run`](Self::run) before its next iteration.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn config(&self) -> &GreedyConfig {
        &self.cfg
    }

    pub fn current_hook(&self) -> usize {
        self.current
    }

    pub fn order(&self) -> &StringOrder {
        &self.order
    }

    /// Read-only snapshot of the residual buffer.
    pub fn residual(&self) -> ImageView<'_, f32> {
        self.residual.view()
    }

    pub fn is_complete(&self) -> bool {
        self.order.len() >= self.cfg.num_strings
    }

    /// Selects and commits one chord.
    ///
    /// On [`Error::Exhausted`] nothing is committed and the selector can still
    /// be inspected.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<GreedyProgress, Error> {
        let iteration = self.order.len();
        let start = self.current;
        let pool = candidates(self.hooks, start, self.cfg.hook_distance);
        let scores = self.score_candidates(&pool)?;

        let mut best: Option<(usize, f32)> = None;
        let mut best_score = 0.0f32;
        let mut random_end = None;
        for (&end, &score) in pool.iter().zip(&scores) {
            if score <= best_score || self.used.contains(&Chord::new(start, end).key()) {
                continue;
            }
            if rng.gen_range(0.0f32..1.0) < self.cfg.random_accept {
                if let Some(end) = self.random_endpoint(rng) {
                    random_end = Some(end);
                    break;
                }
            }
            best_score = score;
            best = Some((end, score));
        }

        let (end, score, random) = match (random_end, best) {
            (Some(end), _) => (end, None, true),
            (None, Some((end, score))) => (end, Some(score), false),
            (None, None) => {
                warn!("no valid chord from hook {start} at iteration {iteration}");
                return Err(Error::Exhausted {
                    iteration,
                    hook: start,
                    partial: self.order.clone(),
                });
            }
        };

        let chord = Chord::new(start, end);
        chord_path(self.hooks, chord, &mut self.path)?;
        let score = match score {
            Some(s) => s,
            None => path_mean(&self.residual.view(), &self.path)?,
        };
        self.residual.discount(&self.path, self.cfg.discount)?;

        self.order.push(chord);
        self.scores.push(score);
        self.used.insert(chord.key());
        self.current = end;
        if random {
            self.random_picks += 1;
        }

        debug!(
            "chord {}/{}: {} -> {} score {score:.4}{}",
            iteration + 1,
            self.cfg.num_strings,
            start,
            end,
            if random { " (random)" } else { "" }
        );

        Ok(GreedyProgress {
            iteration,
            total: self.cfg.num_strings,
            chord,
            score,
            random,
        })
    }

    /// Runs until `num_strings` chords are committed or the run is cancelled.
    pub fn run<R: Rng>(self, rng: &mut R) -> Result<GreedyOutcome, Error> {
        self.run_with_progress(rng, |_| {})
    }

    /// Like [`run`](Self::run), calling `progress` after every committed chord.
    pub fn run_with_progress<R, F>(
        mut self,
        rng: &mut R,
        mut progress: F,
    ) -> Result<GreedyOutcome, Error>
    where
        R: Rng,
        F: FnMut(&GreedyProgress),
    {
        info!(
            "selecting {} chords over {} hooks from hook {} (distance {}, discount {}, random {})",
            self.cfg.num_strings,
            self.hooks.len(),
            self.cfg.start_hook,
            self.cfg.hook_distance,
            self.cfg.discount,
            self.cfg.random_accept
        );

        let mut cancelled = false;
        while !self.is_complete() {
            if self.cancelled.load(Ordering::Relaxed) {
                warn!("cancelled after {} chords", self.order.len());
                cancelled = true;
                break;
            }
            let report = self.step(rng)?;
            progress(&report);
        }

        info!(
            "selected {} chords ({} random)",
            self.order.len(),
            self.random_picks
        );

        Ok(GreedyOutcome {
            order: self.order,
            scores: self.scores,
            random_picks: self.random_picks,
            cancelled,
        })
    }

    /// Scores every candidate from the current hook. A zero-length chord
    /// (hooks rounded onto the same pixel) scores 0 and is never accepted.
    fn score_candidates(&self, pool: &[usize]) -> Result<Vec<f32>, Error> {
        let view = self.residual.view();
        let hooks = self.hooks;
        let start = self.current;
        let score = |end: usize, path: &mut Vec<Point2i>| {
            match chord_score_into(&view, hooks, Chord::new(start, end), path) {
                Err(Error::DegenerateChord { .. }) => Ok(0.0),
                other => other,
            }
        };

        if self.cfg.parallel {
            pool.par_iter()
                .map_init(Vec::new, |path, &end| score(end, path))
                .collect()
        } else {
            let mut path = Vec::new();
            pool.iter().map(|&end| score(end, &mut path)).collect()
        }
    }

    /// Uniform pick among hooks not sharing the current hook's position.
    fn random_endpoint<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let here = self.hooks.get(self.current);
        let eligible: Vec<usize> = (0..self.hooks.len())
            .filter(|&i| self.hooks.get(i) != here)
            .collect();
        eligible.choose(rng).copied()
    }
}

/// Runs a full greedy selection over `image` with the given configuration.
pub fn fit_strings<R: Rng>(
    image: &ImageView<'_, f32>,
    hooks: &HookSet,
    cfg: GreedyConfig,
    rng: &mut R,
) -> Result<GreedyOutcome, Error> {
    GreedySelector::new(image, hooks, cfg)?.run(rng)
}
