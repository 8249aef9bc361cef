//! Turns an image file into the square `[0, 1]` intensity grid the optimizer
//! works on: channel mean, centered square crop, resize, optional circle mask.

use std::path::Path;

use anyhow::{Context, Result, bail};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use sa_core::Image;

use crate::Boundary;

/// Decodes `path` and averages its RGB channels into `[0, 1]`.
pub fn load_grayscale(path: &Path) -> Result<Image<f32>> {
    let rgb = image::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .to_rgb8();
    let (w, h) = rgb.dimensions();
    let data = rgb
        .pixels()
        .map(|px| px.0.iter().map(|&c| c as f32).sum::<f32>() / (3.0 * 255.0))
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

/// Keeps the centered square of side `2 * floor(min(w, h) / crop_factor / 2)`.
pub fn crop_center(img: &Image<f32>, crop_factor: f32) -> Result<Image<f32>> {
    if !(crop_factor >= 1.0) {
        bail!("crop factor must be at least 1, got {crop_factor}");
    }

    let half = (img.width().min(img.height()) as f32 / crop_factor / 2.0) as usize;
    let side = 2 * half;
    if side == 0 {
        bail!(
            "cropping a {}x{} image by {crop_factor} leaves nothing",
            img.width(),
            img.height()
        );
    }

    let x0 = img.width() / 2 - half;
    let y0 = img.height() / 2 - half;
    let view = img.as_view();
    let mut data = Vec::with_capacity(side * side);
    for y in y0..y0 + side {
        data.extend_from_slice(&view.row(y)[x0..x0 + side]);
    }

    Image::from_vec(side, side, data).context("assembling cropped image")
}

/// Resamples to `size x size` with a triangle filter, clamping to `[0, 1]`.
pub fn resize_square(img: &Image<f32>, size: usize) -> Result<Image<f32>> {
    if size == 0 || img.is_empty() {
        bail!(
            "cannot resize a {}x{} image to {size}x{size}",
            img.width(),
            img.height()
        );
    }

    let (w, h) = (img.width() as u32, img.height() as u32);
    let src: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_raw(w, h, img.data().to_vec())
        .context("wrapping image buffer for resize")?;
    let out = imageops::resize(&src, size as u32, size as u32, FilterType::Triangle);
    let data = out.into_raw().into_iter().map(|v| v.clamp(0.0, 1.0)).collect();

    Image::from_vec(size, size, data).context("assembling resized image")
}

/// Whitens every pixel outside the circle of radius `width / 2` around the center.
pub fn apply_circle_mask(img: &mut Image<f32>) {
    let cx = img.width() as f32 / 2.0;
    let cy = img.height() as f32 / 2.0;
    let r2 = cx * cx;

    let mut view = img.as_view_mut();
    for y in 0..view.height() {
        let dy = y as f32 - cy;
        for (x, v) in view.row_mut(y).iter_mut().enumerate() {
            let dx = x as f32 - cx;
            if dx * dx + dy * dy > r2 {
                *v = 1.0;
            }
        }
    }
}

/// Full preprocessing chain for one input file.
pub fn prepare(
    path: &Path,
    size: usize,
    crop_factor: f32,
    boundary: Boundary,
) -> Result<Image<f32>> {
    let img = load_grayscale(path)?;
    let cropped = crop_center(&img, crop_factor)?;
    let mut out = resize_square(&cropped, size)?;
    if boundary == Boundary::Circle {
        apply_circle_mask(&mut out);
    }
    log::info!(
        "preprocessed {}: {}x{} -> {size}x{size}",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(out)
}
