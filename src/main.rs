use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use value_study::color::{color_spaces, rgb_to_cmyk, rgb_to_percentages};
use value_study::study::MAX_STEPS;
use value_study::{sample_at, sample_grid, Recolor, ValueStudyConfig};

use hueloupe::api;
use hueloupe::models::AppConfig;
use hueloupe::server;
use hueloupe::services::decoder::decode_raster;
use hueloupe::services::study_service::render_study;

#[derive(Parser)]
#[command(name = "hueloupe")]
#[command(about = "Hueloupe - pixel sampling, loupe viewports and value studies")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a value study of an image file to PNG
    Study {
        /// Input image (PNG, JPEG, GIF, WebP or BMP)
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of gray levels, 2-10 (10 keeps continuous tones)
        #[arg(short, long, default_value_t = MAX_STEPS)]
        steps: u8,

        /// Darken detected edges
        #[arg(short, long)]
        edges: bool,

        /// Tint with a hex color (e.g. "#8b4513") or preset name (e.g. "Sepia")
        #[arg(short, long)]
        recolor: Option<String>,
    },
    /// Print the color of one pixel
    Sample {
        /// Input image
        input: PathBuf,

        /// Horizontal source coordinate
        #[arg(short, allow_negative_numbers = true)]
        x: f64,

        /// Vertical source coordinate
        #[arg(short, allow_negative_numbers = true)]
        y: f64,
    },
    /// Print the hex colors of a square neighborhood
    Grid {
        /// Input image
        input: PathBuf,

        #[arg(short, allow_negative_numbers = true)]
        x: f64,

        #[arg(short, allow_negative_numbers = true)]
        y: f64,

        /// Odd neighborhood size (default from config)
        #[arg(short, long)]
        size: Option<u32>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hueloupe API",
        description = "Pixel sampling, loupe viewports and value studies",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_value_study,
        api::handle_recolor_presets,
        api::handle_pixel_color,
        api::handle_pixel_grid,
        api::handle_create_viewport,
        api::handle_get_viewport,
        api::handle_viewport_event,
        api::handle_viewport_image,
        api::handle_delete_viewport,
    ),
    components(schemas(
        api::ValueStudyRequest,
        api::RecolorPresetsResponse,
        api::PixelColorResponse,
        api::PixelGridResponse,
        api::CreateViewportResponse,
        api::ViewportSnapshotResponse,
    )),
    tags(
        (name = "Value Study", description = "Grayscale value studies and recolor presets"),
        (name = "Sampling", description = "Pixel color sampling"),
        (name = "Viewport", description = "Overview / loupe viewport sessions")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Study {
            input,
            output,
            steps,
            edges,
            recolor,
        }) => run_study_command(&input, &output, steps, edges, recolor.as_deref()),
        Some(Commands::Sample { input, x, y }) => run_sample_command(&input, x, y),
        Some(Commands::Grid { input, x, y, size }) => run_grid_command(&input, x, y, size),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hueloupe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config() -> AppConfig {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AppConfig::load(config_file.as_deref())
}

/// Render a value study directly to a PNG file (no server needed)
fn run_study_command(
    input: &Path,
    output: &Path,
    steps: u8,
    edges: bool,
    recolor: Option<&str>,
) -> anyhow::Result<()> {
    init_cli_logging();
    let config = load_config();

    let recolor = recolor
        .map(|value| config.resolve_recolor(value).map(Recolor::new))
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid recolor value: {e}"))?;
    let study_config = ValueStudyConfig::new()
        .steps(steps)
        .edge_detection(edges)
        .recolor(recolor);

    let bytes = std::fs::read(input)?;
    let study = render_study(&bytes, &study_config, config.study.max_dimension)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    std::fs::write(output, study.png_bytes.as_slice())?;
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        output.display(),
        study.width,
        study.height,
        study.png_bytes.len()
    );

    Ok(())
}

/// Print one pixel's color and breakdowns
fn run_sample_command(input: &Path, x: f64, y: f64) -> anyhow::Result<()> {
    init_cli_logging();
    let config = load_config();

    let raster = decode_raster(&std::fs::read(input)?)?;
    let sample = sample_at(&raster, x, y, config.hex_case());
    let rgb = sample.rgb;
    let pct = rgb_to_percentages(rgb.r, rgb.g, rgb.b);
    let cmyk = rgb_to_cmyk(rgb.r, rgb.g, rgb.b);

    println!("Pixel ({}, {})", sample.coordinates.0, sample.coordinates.1);
    println!("  Hex:  {}", sample.hex);
    println!("  RGB:  {} {} {}", rgb.r, rgb.g, rgb.b);
    println!("  RGB%: {}% {}% {}%", pct.r, pct.g, pct.b);
    println!("  CMYK: {}% {}% {}% {}%", cmyk.c, cmyk.m, cmyk.y, cmyk.k);

    let spaces = color_spaces(rgb);
    for (label, space) in [
        ("HSL", &spaces.hsl),
        ("HSV", &spaces.hsv),
        ("HWB", &spaces.hwb),
        ("LAB", &spaces.lab),
        ("LCH", &spaces.lch),
        ("OKLAB", &spaces.oklab),
        ("OKLCH", &spaces.oklch),
        ("XYZ", &spaces.xyz),
    ] {
        println!("  {:<6}{}", format!("{label}:"), space.formatted);
    }

    Ok(())
}

/// Print a neighborhood as rows of hex colors
fn run_grid_command(input: &Path, x: f64, y: f64, size: Option<u32>) -> anyhow::Result<()> {
    init_cli_logging();
    let config = load_config();
    let size = config.grid_size(size)?;

    let raster = decode_raster(&std::fs::read(input)?)?;
    let grid = sample_grid(&raster, x, y, size, config.hex_case())?;

    for row in grid {
        println!("{}", row.join(" "));
    }

    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("Hueloupe v{VERSION}");
    println!("Pixel sampling, loupe viewports and value studies\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Configuration section
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_file.as_deref().map(Path::new));
    let presets: Vec<String> = config.presets().into_iter().map(|(name, _)| name).collect();

    println!("\nConfiguration: {config_source}");
    println!("  Max study dimension: {}", config.study.max_dimension);
    println!("  Study cache entries: {}", config.study.cache_entries);
    println!("  Grid size:           {}", config.sampler.grid_size);
    println!("  Max grid size:       {}", config.sampler.max_grid_size);
    println!("  Recolor presets:     {}", presets.join(", "));

    // Commands section
    println!("\nCommands:");
    println!("  hueloupe serve    Start the HTTP server");
    println!("  hueloupe study    Render a value study to a PNG file");
    println!("  hueloupe sample   Print the color of one pixel");
    println!("  hueloupe grid     Print a neighborhood of hex colors");
    println!("\nRun 'hueloupe --help' for more details.");
}

async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hueloupe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = load_config();

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Hueloupe server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
