use sa_core::{ImageView, Point2i, rasterize_into};
use sa_hooks::HookSet;

use crate::chord::Chord;
use crate::error::Error;
use crate::residual::path_mean;

/// Rasterizes `chord` between its hook positions into `path`.
pub fn chord_path(hooks: &HookSet, chord: Chord, path: &mut Vec<Point2i>) -> Result<(), Error> {
    let a = hooks.get(chord.start).ok_or(sa_core::Error::OutOfBounds)?;
    let b = hooks.get(chord.end).ok_or(sa_core::Error::OutOfBounds)?;
    rasterize_into(a, b, path).map_err(|e| match e {
        sa_core::Error::DegenerateSegment { .. } => Error::DegenerateChord { chord },
        other => Error::Image(other),
    })
}

/// Darkness score of `chord`: mean residual along its rasterized path.
///
/// Pure in its inputs, so candidates can be scored in any order or in parallel.
pub fn chord_score(
    residual: &ImageView<'_, f32>,
    hooks: &HookSet,
    chord: Chord,
) -> Result<f32, Error> {
    let mut path = Vec::new();
    chord_score_into(residual, hooks, chord, &mut path)
}

/// Like [`chord_score`], reusing `path` as scratch space.
pub fn chord_score_into(
    residual: &ImageView<'_, f32>,
    hooks: &HookSet,
    chord: Chord,
    path: &mut Vec<Point2i>,
) -> Result<f32, Error> {
    chord_path(hooks, chord, path)?;
    Ok(path_mean(residual, path)?)
}
