//! Example: string-art path for a single portrait.
//!
//! Loads an image as grayscale (mean of the RGB channels), crops it to the
//! centered square, resizes it, whitens everything outside the inscribed
//! circle, and runs the greedy optimizer on a circular hook layout. The
//! chord list and the hook coordinates are written to a JSON file next to the input.
//!
//! Run from the workspace root:
//!   cargo run -p string-art --example portrait -- --help
//!   cargo run -p string-art --example portrait -- --input data/portrait.jpg

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::{GrayImage, ImageReader, Luma};
use image::imageops::{self, FilterType};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use string_art::{GreedyConfig, Image, circle_hooks, fit_strings, to_unit_f32};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Compute a circular string-art path for one image")]
struct Args {
    /// Input image (any format the `image` crate decodes)
    #[arg(long, default_value = "data/portrait.jpg")]
    input: String,

    /// Working resolution in pixels (square)
    #[arg(long, default_value_t = 400)]
    size: u32,

    /// Number of hooks on the circle
    #[arg(long, default_value_t = 201)]
    hooks: usize,

    /// Number of chords to compute
    #[arg(long, default_value_t = 1500)]
    strings: usize,

    /// Minimum cyclic index distance between consecutive hooks
    #[arg(long, default_value_t = 15)]
    distance: usize,

    /// Residual multiplier along each selected chord
    #[arg(long, default_value_t = 0.3)]
    discount: f32,

    /// Seed for the random-accept fallback
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output JSON path (default: <input stem>_strings.json next to input)
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HookDto {
    index: usize,
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct ChordDto {
    position: usize,
    start: usize,
    end: usize,
    score: f32,
}

#[derive(Serialize)]
struct PortraitResult {
    size: u32,
    elapsed_ms: f64,
    hooks: Vec<HookDto>,
    chords: Vec<ChordDto>,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let img_path = &args.input;
    let out_path = args.out.unwrap_or_else(|| {
        let p = std::path::Path::new(img_path);
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        let dir = p.parent().unwrap_or(std::path::Path::new("."));
        dir.join(format!("{stem}_strings.json"))
            .to_string_lossy()
            .into_owned()
    });

    let rgb = ImageReader::open(img_path)
        .with_context(|| format!("opening {img_path}"))?
        .decode()
        .with_context(|| format!("decoding {img_path}"))?
        .to_rgb8();
    // plain channel mean, not weighted luminance
    let gray = GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([((r as u16 + g as u16 + b as u16) as f32 / 3.0).round() as u8])
    });

    let side = gray.width().min(gray.height());
    let x0 = (gray.width() - side) / 2;
    let y0 = (gray.height() - side) / 2;
    let square = imageops::crop_imm(&gray, x0, y0, side, side).to_image();
    let resized = imageops::resize(&square, args.size, args.size, FilterType::Triangle);

    let n = args.size as usize;
    let luma = Image::from_vec(n, n, resized.into_raw()).context("building luma Image")?;
    let mut unit = to_unit_f32(&luma.as_view());

    let c = n as f32 / 2.0;
    for (i, v) in unit.data_mut().iter_mut().enumerate() {
        let (x, y) = ((i % n) as f32, (i / n) as f32);
        if (x - c).powi(2) + (y - c).powi(2) > c * c {
            *v = 1.0;
        }
    }

    let hooks = circle_hooks(n, n, args.hooks).context("placing hooks")?;
    let cfg = GreedyConfig {
        num_strings: args.strings,
        hook_distance: args.distance,
        discount: args.discount,
        ..GreedyConfig::default()
    };

    println!(
        "loaded {img_path}: {}x{} -> {n}x{n}, {} hooks, {} strings",
        gray.width(),
        gray.height(),
        hooks.len(),
        args.strings
    );

    let t0 = Instant::now();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let outcome =
        fit_strings(&unit.as_view(), &hooks, cfg, &mut rng).context("selecting chords")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    println!("selected {} chords in {elapsed_ms:.1} ms", outcome.order.len());

    let result = PortraitResult {
        size: args.size,
        elapsed_ms,
        hooks: hooks
            .iter()
            .enumerate()
            .map(|(index, p)| HookDto {
                index,
                x: p.x,
                y: p.y,
            })
            .collect(),
        chords: outcome
            .order
            .iter()
            .zip(&outcome.scores)
            .enumerate()
            .map(|(position, (c, &score))| ChordDto {
                position,
                start: c.start,
                end: c.end,
                score,
            })
            .collect(),
    };

    let out_file =
        std::fs::File::create(&out_path).with_context(|| format!("creating {out_path}"))?;
    serde_json::to_writer_pretty(out_file, &result)
        .with_context(|| format!("writing JSON to {out_path}"))?;

    println!("results written to {out_path}");
    Ok(())
}
