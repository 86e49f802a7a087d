use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use objnav::config::FileConfig;
use objnav::mesh::{estimate_stl_size, validate_mesh, write_stl};
use objnav::{DeterministicRng, Mesh, load_file};

/// Import an OBJ file as a navmesh-ready triangle mesh and report on it
///
/// Examples:
///   # Print vertex/triangle counts, bounds and a quality report
///   objnav dungeon.obj
///
///   # Fail on directives the importer does not understand
///   objnav dungeon.obj --strict
///
///   # Export the triangulated mesh for a viewer and for other tools
///   objnav dungeon.obj --stl dungeon.stl --json dungeon.json
///
///   # Print 5 reproducible points on the surface
///   objnav dungeon.obj --samples 5 --seed 42
#[derive(Parser, Debug)]
#[command(name = "objnav")]
#[command(version, about, long_about = None)]
struct Args {
    /// OBJ file to import
    input: PathBuf,

    /// Path to config file (optional, auto-searches objnav.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject unknown directives instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Write the triangulated mesh as binary STL
    #[arg(long)]
    stl: Option<PathBuf>,

    /// Write vertices, triangles and normals as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of reproducible surface points to print
    #[arg(long)]
    samples: Option<usize>,

    /// Seed for surface sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            FileConfig::from_path(config_path)?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    let options = file_config.import_options(args.strict);
    let samples = args.samples.unwrap_or(file_config.samples);
    let seed = args.seed.unwrap_or(file_config.seed);

    if let (Some(stl), Some(json)) = (&args.stl, &args.json)
        && stl == json
    {
        bail!("--stl and --json must write to different files");
    }

    let filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", args.input.display());
        println!("  Strict: {}", options.strict);
        println!("  Samples: {} (seed {})", samples, seed);
        println!();
    }

    let spinner = create_spinner(&format!("Importing {}...", args.input.display()));
    let start = Instant::now();
    let mesh =
        load_file(&args.input, &options).inspect_err(|_| spinner.finish_and_clear())?;
    spinner.finish_with_message(format!(
        "Imported {} vertices, {} triangles [{:.1}s]",
        mesh.vertex_count(),
        mesh.triangle_count(),
        start.elapsed().as_secs_f32()
    ));

    print_report(&mesh);

    if let Some(ref path) = args.stl {
        write_stl(path, &mesh).context("Failed to write STL file")?;
        println!(
            "Wrote {} ({:.1} KB)",
            path.display(),
            estimate_stl_size(mesh.triangle_count()) as f64 / 1024.0
        );
    }

    if let Some(ref path) = args.json {
        write_json(path, &mesh)?;
        println!("Wrote {}", path.display());
    }

    if samples > 0 {
        print_samples(&mesh, samples, seed);
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn print_report(mesh: &Mesh) {
    println!();
    match mesh.bounds() {
        Some(bounds) => {
            let size = bounds.size();
            let center = bounds.center();
            println!(
                "Bounds: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
                bounds.min[0],
                bounds.min[1],
                bounds.min[2],
                bounds.max[0],
                bounds.max[1],
                bounds.max[2]
            );
            println!("Size:   {:.3} x {:.3} x {:.3}", size[0], size[1], size[2]);
            println!(
                "Center: ({:.3}, {:.3}, {:.3})",
                center[0], center[1], center[2]
            );
        }
        None => println!("Bounds: empty mesh"),
    }

    let report = validate_mesh(mesh);
    println!("{}", report.summary());
    for warning in &report.warnings {
        log::warn!("{}", warning);
    }
    println!();
}

fn print_samples(mesh: &Mesh, count: usize, seed: u64) {
    let mut rng = DeterministicRng::new(seed);

    println!("Surface samples (seed {}):", seed);
    for i in 0..count {
        match mesh.sample_point(&mut rng) {
            Some(p) => println!("  {}: ({:.4}, {:.4}, {:.4})", i, p[0], p[1], p[2]),
            None => {
                println!("  mesh has no triangles to sample");
                break;
            }
        }
    }
}

fn write_json(path: &Path, mesh: &Mesh) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, mesh)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
