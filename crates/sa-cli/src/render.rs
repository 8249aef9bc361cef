//! Raster previews of a string order and the physical hook template.

use std::path::Path;

use anyhow::{Context, Result, bail};
use image::GrayImage;
use sa_core::{Image, Point2i, rasterize_into};
use sa_greedy::Chord;
use sa_hooks::HookSet;

fn endpoints(hooks: &HookSet, chord: Chord) -> Result<(Point2i, Point2i)> {
    let a = hooks.get(chord.start);
    let b = hooks.get(chord.end);
    match (a, b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => bail!(
            "chord {} -> {} references a hook outside 0..{}",
            chord.start,
            chord.end,
            hooks.len()
        ),
    }
}

fn scaled(p: Point2i, scale: f64) -> Point2i {
    Point2i::round_from(p.x as f64 * scale, p.y as f64 * scale)
}

fn to_gray(img: &Image<f32>) -> Result<GrayImage> {
    let data = img
        .data()
        .iter()
        .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(img.width() as u32, img.height() as u32, data)
        .context("building preview buffer")
}

/// Draws `chords` on a white canvas of `size * scale` pixels.
///
/// Every pixel a chord crosses is multiplied by `1 - opacity`, so overlapping
/// threads darken further. Chords whose scaled endpoints coincide are skipped.
pub fn render_preview(
    hooks: &HookSet,
    chords: &[Chord],
    size: usize,
    scale: f64,
    opacity: f32,
) -> Result<GrayImage> {
    if !(scale > 0.0) {
        bail!("preview scale must be positive, got {scale}");
    }
    if !(0.0..=1.0).contains(&opacity) {
        bail!("thread opacity must lie in [0, 1], got {opacity}");
    }

    let side = (size as f64 * scale).ceil() as usize;
    if side == 0 {
        bail!("preview of size {size} at scale {scale} is empty");
    }
    let keep = 1.0 - opacity;
    let mut canvas = Image::new_fill(side, side, 1.0f32);
    let mut path = Vec::new();
    let mut skipped = 0usize;

    for &chord in chords {
        let (a, b) = endpoints(hooks, chord)?;
        let (a, b) = (scaled(a, scale), scaled(b, scale));
        if a == b {
            skipped += 1;
            continue;
        }
        rasterize_into(a, b, &mut path).context("rasterizing preview chord")?;

        let mut view = canvas.as_view_mut();
        let mut prev = None;
        for &p in &path {
            if prev == Some(p) {
                continue;
            }
            prev = Some(p);
            if let Ok(v) = view.at_mut(p) {
                *v *= keep;
            }
        }
    }

    if skipped > 0 {
        log::debug!("preview skipped {skipped} zero-length chords");
    }
    to_gray(&canvas)
}

/// The preprocessed working image as 8-bit grayscale, for side-by-side
/// comparison with a preview.
pub fn render_reference(img: &Image<f32>) -> Result<GrayImage> {
    to_gray(img)
}

/// White canvas with a small black cross at every hook, for marking a board.
pub fn render_hook_template(hooks: &HookSet, size: usize) -> Result<GrayImage> {
    const ARM: i32 = 2;

    if size == 0 {
        bail!("hook template needs a positive size");
    }
    let mut canvas = Image::new_fill(size, size, 1.0f32);
    let mut view = canvas.as_view_mut();
    for hook in hooks.iter() {
        for d in -ARM..=ARM {
            for p in [Point2i::new(hook.x + d, hook.y), Point2i::new(hook.x, hook.y + d)] {
                if let Ok(v) = view.at_mut(p) {
                    *v = 0.0;
                }
            }
        }
    }
    to_gray(&canvas)
}

/// Total thread needed for `chords`, in millimetres, for a board whose
/// working image of `image_size` pixels spans `2 * radius_mm`.
pub fn thread_length_mm(
    hooks: &HookSet,
    chords: &[Chord],
    image_size: usize,
    radius_mm: f64,
) -> Result<f64> {
    if image_size == 0 {
        bail!("image size must be positive");
    }
    let mm_per_px = 2.0 * radius_mm / image_size as f64;
    let mut total = 0.0;
    for &chord in chords {
        let (a, b) = endpoints(hooks, chord)?;
        total += a.distance(b);
    }
    Ok(total * mm_per_px)
}

/// Saves a grayscale image, picking the format from the extension.
pub fn save_gray(img: &GrayImage, path: &Path) -> Result<()> {
    img.save(path).with_context(|| format!("writing image {}", path.display()))
}

#[cfg(test)]
mod tests {
    use sa_core::{Image, Point2i};
    use sa_greedy::Chord;
    use sa_hooks::HookSet;

    use super::{render_hook_template, render_preview, render_reference, thread_length_mm};

    fn square() -> HookSet {
        HookSet::from_points(vec![
            Point2i::new(0, 0),
            Point2i::new(9, 0),
            Point2i::new(9, 9),
            Point2i::new(0, 9),
        ])
        .expect("valid hooks")
    }

    #[test]
    fn preview_darkens_along_chords() {
        let hooks = square();
        let chords = [Chord::new(0, 1), Chord::new(1, 2), Chord::new(2, 0)];
        let img = render_preview(&hooks, &chords, 10, 1.0, 0.5).expect("rendered");
        assert_eq!(img.dimensions(), (10, 10));

        // top edge crossed once
        assert_eq!(img.get_pixel(4, 0)[0], 128);
        // corner (9, 0) is on two chords
        assert_eq!(img.get_pixel(9, 0)[0], 64);
        // diagonal
        assert_eq!(img.get_pixel(5, 5)[0], 128);
        // untouched
        assert_eq!(img.get_pixel(0, 5)[0], 255);
    }

    #[test]
    fn preview_scales_canvas() {
        let hooks = square();
        let img = render_preview(&hooks, &[Chord::new(0, 1)], 10, 2.0, 1.0).expect("rendered");
        assert_eq!(img.dimensions(), (20, 20));
        assert_eq!(img.get_pixel(18, 0)[0], 0);
        assert_eq!(img.get_pixel(19, 0)[0], 255);
    }

    #[test]
    fn preview_rejects_unknown_hooks_and_bad_opacity() {
        let hooks = square();
        assert!(render_preview(&hooks, &[Chord::new(0, 4)], 10, 1.0, 0.5).is_err());
        assert!(render_preview(&hooks, &[Chord::new(0, 1)], 10, 1.0, 1.5).is_err());
        assert!(render_preview(&hooks, &[Chord::new(0, 1)], 10, 0.0, 0.5).is_err());
    }

    #[test]
    fn template_marks_each_hook() {
        let img = render_hook_template(&square(), 10).expect("rendered");
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(2, 0)[0], 0);
        assert_eq!(img.get_pixel(9, 7)[0], 0);
        assert_eq!(img.get_pixel(5, 5)[0], 255);
        assert_eq!(img.get_pixel(1, 1)[0], 255);
    }

    #[test]
    fn thread_length_scales_pixels_to_board() {
        let hooks = square();
        let chords = [Chord::new(0, 1), Chord::new(1, 2)];
        // 18 px on a 10 px image spanning 2 * 250 mm
        let mm = thread_length_mm(&hooks, &chords, 10, 250.0).expect("computed");
        assert!((mm - 900.0).abs() < 1e-9);
        assert!(thread_length_mm(&hooks, &[Chord::new(3, 9)], 10, 250.0).is_err());
    }

    #[test]
    fn reference_maps_unit_range_to_bytes() {
        let img = Image::from_vec(3, 1, vec![0.0f32, 0.5, 1.0]).expect("valid image");
        let gray = render_reference(&img).expect("rendered");
        assert_eq!(gray.dimensions(), (3, 1));
        assert_eq!(gray.as_raw().as_slice(), &[0u8, 128, 255]);
    }
}
