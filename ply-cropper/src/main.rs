/// PLY cropper command line entry point
use clap::Parser;
use indicatif::MultiProgress;
use ply_cropper::CropBounds;
use ply_cropper::batch::{BatchConfig, run_batch};
use ply_cropper::constants::{DEFAULT_CROP, DEFAULT_DEST_DIR, DEFAULT_PATTERN, DEFAULT_SOURCE_DIR};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ply-cropper")]
#[command(about = "Crop PLY files to reduce size and improve loading performance")]
struct Cli {
    /// Source directory containing PLY files
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    source: PathBuf,

    /// Destination directory for cropped files
    #[arg(long, default_value = DEFAULT_DEST_DIR)]
    dest: PathBuf,

    /// Crop bounds as minX,maxX,minY,maxY,minZ,maxZ
    #[arg(long, default_value = DEFAULT_CROP, allow_hyphen_values = true)]
    crop: CropBounds,

    /// File pattern to match
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Number of files processed in parallel (defaults to one per core)
    #[arg(long)]
    jobs: Option<usize>,

    /// Keep the filtered point order instead of sorting by importance
    #[arg(long)]
    no_sort: bool,

    /// Write a JSON summary of the batch to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log progress instead of drawing progress bars
    #[arg(long)]
    no_progress: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ply_cropper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    info!("Crop bounds: {}", cli.crop);

    let config = BatchConfig {
        source_dir: cli.source,
        dest_dir: cli.dest,
        pattern: cli.pattern,
        bounds: cli.crop,
        sort_by_importance: !cli.no_sort,
        jobs: cli.jobs,
        report_path: cli.report,
    };
    let progress = (!cli.no_progress).then(MultiProgress::new);

    match run_batch(&config, progress) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
