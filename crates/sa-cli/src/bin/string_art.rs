use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sa_cli::persist::{
    ImageDto, RunManifest, SettingsDto, read_manifest, read_string_order, sibling, write_hooks,
    write_manifest, write_string_order,
};
use sa_cli::render::{
    render_hook_template, render_preview, render_reference, save_gray, thread_length_mm,
};
use sa_cli::{Boundary, layout, preprocess};
use sa_greedy::{GreedyConfig, GreedySelector};

#[derive(Parser, Debug)]
#[command(name = "string_art")]
#[command(about = "Compute and preview string-art thread paths")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Optimize a thread path for an image
    #[command(name = "compute")]
    Compute(ComputeArgs),
    /// Render a computed path and its hook template
    #[command(name = "render")]
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
struct ComputeArgs {
    /// Input image
    #[arg(long, short = 'i')]
    input: PathBuf,
    /// Output base path; `.csv`, `_hooks.csv` and `.json` are appended
    #[arg(long, short = 's')]
    save: PathBuf,
    #[arg(long, value_enum, default_value_t = Boundary::Circle)]
    shape: Boundary,
    /// Requested hook count
    #[arg(long, default_value_t = 201)]
    hooks: usize,
    /// Number of chords to select
    #[arg(long, default_value_t = 5000)]
    strings: usize,
    /// Residual multiplier along each selected chord
    #[arg(long, default_value_t = 0.3)]
    discount: f32,
    /// Minimum cyclic index distance between consecutive hooks
    #[arg(long, default_value_t = 15)]
    distance: usize,
    /// Probability of taking a random endpoint instead of the best one
    #[arg(long, default_value_t = 0.0)]
    random: f32,
    /// Working resolution in pixels (square)
    #[arg(long, default_value_t = 2500)]
    size: usize,
    /// Shrinks the centered crop by this factor (>= 1)
    #[arg(long, default_value_t = 1.0)]
    crop_factor: f32,
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Shifts rectangle hook numbering
    #[arg(long, default_value_t = 0)]
    offset: usize,
    /// Seed for the random fallback (default: entropy)
    #[arg(long)]
    seed: Option<u64>,
    /// Log progress every N chords
    #[arg(long, default_value_t = 100)]
    progress_every: usize,
    /// Score candidates on a single thread
    #[arg(long)]
    sequential: bool,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// Run manifest written by `compute`
    #[arg(long, short = 'm')]
    manifest: PathBuf,
    /// Only draw the first K chords
    #[arg(long)]
    strings: Option<usize>,
    /// Preview resolution relative to the working image
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Darkening per crossing thread, in [0, 1]
    #[arg(long, default_value_t = 0.2)]
    opacity: f32,
    /// Board radius used for the thread length estimate
    #[arg(long, default_value_t = 250.0)]
    radius_mm: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Compute(args) => run_compute(args),
        Command::Render(args) => run_render(args),
    }
}

fn run_compute(args: ComputeArgs) -> Result<()> {
    let img = preprocess::prepare(&args.input, args.size, args.crop_factor, args.shape)?;
    let hooks = layout(args.shape, args.size, args.hooks, args.offset)?;

    let cfg = GreedyConfig {
        start_hook: args.start,
        num_strings: args.strings,
        hook_distance: args.distance,
        discount: args.discount,
        random_accept: args.random,
        parallel: !args.sequential,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(parent) = args.save.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let csv_path = sibling(&args.save, ".csv");
    let every = args.progress_every.max(1);
    let t0 = Instant::now();
    let result = GreedySelector::new(&img.as_view(), &hooks, cfg)
        .context("setting up the optimizer")?
        .run_with_progress(&mut rng, |p| {
            if (p.iteration + 1) % every == 0 || p.iteration + 1 == p.total {
                info!(
                    "{}/{} chords, last {} -> {} (score {:.4})",
                    p.iteration + 1,
                    p.total,
                    p.chord.start,
                    p.chord.end,
                    p.score
                );
            }
        });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(sa_greedy::Error::Exhausted {
            iteration,
            hook,
            partial,
        }) => {
            write_string_order(&csv_path, &partial)?;
            warn!("wrote {} chords to {}", partial.len(), csv_path.display());
            bail!("no admissible chord from hook {hook} at iteration {iteration}");
        }
        Err(err) => return Err(err).context("running the optimizer"),
    };
    info!(
        "optimized {} chords in {:.2?} ({} random)",
        outcome.order.len(),
        t0.elapsed(),
        outcome.random_picks
    );

    write_string_order(&csv_path, &outcome.order)?;
    write_hooks(&sibling(&args.save, "_hooks.csv"), &hooks)?;
    write_manifest(
        &sibling(&args.save, ".json"),
        &RunManifest {
            image: ImageDto {
                file: args.input.clone(),
                size: args.size,
                crop_factor: args.crop_factor,
            },
            settings: SettingsDto {
                shape: args.shape,
                hooks: args.hooks,
                actual_hooks: hooks.len(),
                strings: args.strings,
                discount: args.discount,
                distance: args.distance,
                random_accept: args.random,
                start: args.start,
                seed: args.seed,
                offset: args.offset,
                save_file: args.save.clone(),
            },
        },
    )?;

    info!("wrote {}", csv_path.display());
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<()> {
    let manifest = read_manifest(&args.manifest)?;
    let settings = &manifest.settings;
    let size = manifest.image.size;

    let hooks = layout(settings.shape, size, settings.hooks, settings.offset)?;
    if hooks.len() != settings.actual_hooks {
        bail!(
            "regenerated {} hooks but the manifest records {}",
            hooks.len(),
            settings.actual_hooks
        );
    }

    let order = read_string_order(&sibling(&settings.save_file, ".csv"))?;
    let k = args.strings.unwrap_or(order.len()).min(order.len());
    let chords = &order.as_slice()[..k];

    let preview = render_preview(&hooks, chords, size, args.scale, args.opacity)?;
    let preview_path = sibling(&settings.save_file, &format!("_result_{k}.png"));
    save_gray(&preview, &preview_path)?;

    let template_path = sibling(&settings.save_file, "_template.png");
    save_gray(&render_hook_template(&hooks, size)?, &template_path)?;

    let reference_path = sibling(&settings.save_file, "_reference.png");
    match preprocess::prepare(
        &manifest.image.file,
        size,
        manifest.image.crop_factor,
        settings.shape,
    ) {
        Ok(img) => {
            save_gray(&render_reference(&img)?, &reference_path)?;
            info!("wrote {}", reference_path.display());
        }
        Err(err) => warn!("skipping reference image: {err:#}"),
    }

    let mm = thread_length_mm(&hooks, chords, size, args.radius_mm)?;
    info!(
        "wrote {} and {}",
        preview_path.display(),
        template_path.display()
    );
    println!("thread length for {k} chords: {:.1} m", mm / 1000.0);
    Ok(())
}
