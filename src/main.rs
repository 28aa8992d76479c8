use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::assets::AssetLoader;
use inkpress::models::{AppConfig, Strategy};
use inkpress::server;
use inkpress::services::{ConversionService, DisplaySink, FileSink, LogSink};
use lab_dither::{SearchStrategy, PRESETS};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(about = "Photo quantization and dashboard server for low-color e-paper displays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard server
    Serve,
    /// Convert a photo to an indexed PNG for the configured display
    Convert {
        /// Input image (JPEG or PNG)
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Built-in palette preset (see `inkpress palettes`)
        #[arg(short, long)]
        palette: Option<String>,

        /// Dithering strength; 0 gives plain Floyd-Steinberg
        #[arg(short, long)]
        strength: Option<f32>,

        /// Optimizer iteration budget
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Use the initial parameters as-is instead of searching
        #[arg(long)]
        no_optimize: bool,

        /// Search strategy
        #[arg(long, value_enum)]
        search: Option<Strategy>,
    },
    /// List built-in palette presets
    Palettes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            palette,
            strength,
            max_iterations,
            no_optimize,
            search,
        }) => run_convert_command(
            &input,
            &output,
            palette,
            strength,
            max_iterations,
            no_optimize,
            search,
        ),
        Some(Commands::Palettes) => {
            run_palettes_command();
            Ok(())
        }
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Convert a single photo (no server needed)
fn run_convert_command(
    input: &Path,
    output: &Path,
    palette: Option<String>,
    strength: Option<f32>,
    max_iterations: Option<usize>,
    no_optimize: bool,
    search: Option<Strategy>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpress=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let asset_loader = AssetLoader::new(config_file);
    let mut config = AppConfig::load_from_assets(&asset_loader);

    // Command line overrides
    if let Some(name) = palette {
        config.palette.preset = name;
        config.palette.colors.clear();
    }
    if let Some(strength) = strength {
        config.dither.strength = strength;
    }
    if let Some(n) = max_iterations {
        config.optimizer.max_iterations = n;
    }
    if no_optimize {
        config.optimizer.enabled = false;
    }
    if let Some(strategy) = search {
        config.optimizer.strategy = strategy;
    }

    let service = ConversionService::from_config(&config)?;
    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let conversion = service.convert(&bytes)?;
    std::fs::write(output, &conversion.png)?;

    let image = &conversion.image;
    println!(
        "Wrote {} ({}x{}, {} colors, {} bytes)",
        output.display(),
        image.width(),
        image.height(),
        image.palette().len(),
        conversion.png.len()
    );

    let params = image.params();
    println!("\nParameters:");
    println!("  saturation   = {:.4}", params.saturation);
    println!("  vibrance     = {:.4}", params.vibrance);
    println!("  black_point  = {:.4}", params.black_point);
    println!("  white_point  = {:.4}", params.white_point);
    println!("  gamma        = {:.4}", params.gamma);
    println!("  contrast     = {:.4}", params.contrast);
    println!("  hue_rotation = {:.4}", params.hue_rotation);

    if let Some(report) = image.report() {
        println!(
            "\nSearch ({}):",
            SearchStrategy::from(config.optimizer.strategy).name()
        );
        println!("  loss         = {:.4} (start {:.4})", report.loss, report.initial_loss);
        println!(
            "  iterations   = {} ({} evaluations, {:?})",
            report.iterations, report.evaluations, report.status
        );
    }

    Ok(())
}

fn run_palettes_command() {
    println!("Built-in palettes:\n");
    for preset in PRESETS {
        println!("  {:<20} {}", preset.name, preset.description);
    }
}

/// Show version, environment and configuration summary
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let gallery_dir = std::env::var("GALLERY_DIR").ok();
    let display_output = std::env::var("DISPLAY_OUTPUT").ok();

    // Header
    println!("Inkpress v{VERSION}");
    println!("Photo quantization for low-color e-paper displays\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR      = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:8000 (default)")
    );
    println!(
        "  CONFIG_FILE    = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  GALLERY_DIR    = {}",
        gallery_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  DISPLAY_OUTPUT = {}",
        display_output.as_deref().unwrap_or("(not set, logging only)")
    );

    // Config source
    let config_source = if let Some(ref path) = config_file {
        if Path::new(path).exists() {
            path.to_string()
        } else {
            "embedded (file not found)".to_string()
        }
    } else {
        "embedded".to_string()
    };

    let loader = AssetLoader::new(config_file.map(PathBuf::from));
    let config = AppConfig::load_from_assets(&loader);

    println!("\nConfiguration ({config_source}):");
    println!(
        "  Display:   {}x{}{}",
        config.display.width,
        config.display.height,
        if config.display.rotate_portrait {
            ", portrait sources rotated"
        } else {
            ""
        }
    );
    if config.palette.colors.is_empty() {
        println!("  Palette:   {} (preset)", config.palette.preset);
    } else {
        println!("  Palette:   {} custom colors", config.palette.colors.len());
    }
    println!("  Strength:  {}", config.dither.strength);
    if config.optimizer.enabled {
        println!(
            "  Optimizer: {:?}, {} iterations, sample stride {}",
            config.optimizer.strategy, config.optimizer.max_iterations, config.optimizer.sample_stride
        );
    } else {
        println!("  Optimizer: disabled");
    }
    println!(
        "  Gallery:   {}",
        gallery_dir
            .map(PathBuf::from)
            .unwrap_or(config.gallery.dir)
            .display()
    );

    println!("\nRun `inkpress serve` to start the dashboard or `inkpress --help` for commands.");
}

/// Run the dashboard server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpress=debug,lab_dither=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let gallery_dir = std::env::var("GALLERY_DIR").ok().map(PathBuf::from);
    let display_output = std::env::var("DISPLAY_OUTPUT").ok().map(PathBuf::from);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    tracing::info!(
        config = ?config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    let asset_loader = Arc::new(AssetLoader::new(config_file));
    let mut config = AppConfig::load_from_assets(&asset_loader);
    if let Some(dir) = gallery_dir {
        config.gallery.dir = dir;
    }

    let sink: Arc<dyn DisplaySink> = match display_output {
        Some(path) => Arc::new(FileSink::new(path)),
        None => Arc::new(LogSink),
    };

    let state = server::create_app_state(asset_loader, config, sink)?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Inkpress server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
