use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tilescope", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a static capture of a synthetic map as a PNG.
    Capture(CaptureArgs),
    /// Print the effective renderer options as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Tiles per row.
    #[arg(long, default_value_t = 4)]
    columns: usize,

    /// Tiles per column.
    #[arg(long, default_value_t = 3)]
    rows: usize,

    /// Map dimension to render.
    #[arg(long, value_enum, default_value_t = DimensionChoice::Overworld)]
    dimension: DimensionChoice,

    /// Zoom factor (screen pixels per world unit); defaults to the configured initial zoom.
    #[arg(long)]
    zoom: Option<f64>,

    /// Renderer options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file used for widget and grid labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Draw tile outlines and coordinates.
    #[arg(long)]
    grid: bool,

    /// Seed for the synthetic tile colours.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Renderer options JSON to merge over the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DimensionChoice {
    Overworld,
    Nether,
    End,
}

impl From<DimensionChoice> for tilescope::Dimension {
    fn from(value: DimensionChoice) -> Self {
        match value {
            DimensionChoice::Overworld => Self::Overworld,
            DimensionChoice::Nether => Self::Nether,
            DimensionChoice::End => Self::End,
        }
    }
}

const SYNTHETIC_TILE_SAMPLES: u32 = 32;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Capture(args) => cmd_capture(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_opts(path: Option<&PathBuf>) -> anyhow::Result<tilescope::RendererOpts> {
    let opts = match path {
        Some(p) => tilescope::RendererOpts::from_path(p)
            .with_context(|| format!("load renderer options '{}'", p.display()))?,
        None => tilescope::RendererOpts::default(),
    };
    Ok(opts.with_env_overrides())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_ref())?;
    println!("{}", opts.to_json_string()?);
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    if args.columns == 0 || args.rows == 0 {
        anyhow::bail!("--columns and --rows must be > 0");
    }

    let mut opts = load_opts(args.config.as_ref())?;
    if let Some(zoom) = args.zoom {
        opts.zoom.initial = zoom;
    }

    let dimension = tilescope::Setting::new(tilescope::Dimension::from(args.dimension));
    let show_grid = tilescope::Setting::new(args.grid);
    let layout =
        tilescope::GridLayout::new(tilescope::TileCoord::new(0, 0), args.columns, args.rows);
    let grid = tilescope::synthetic_grid(
        layout,
        dimension.get(),
        SYNTHETIC_TILE_SAMPLES,
        args.seed,
    )?;

    let assets = tilescope::AssetTable::with_builtin_chrome()?;
    let layers: Vec<Box<dyn tilescope::Layer>> = vec![
        Box::new(tilescope::FadeInLayer::default()),
        Box::new(tilescope::TileImageLayer::new()),
        Box::new(tilescope::GridLayer::new(show_grid)),
    ];
    let widgets: Vec<Box<dyn tilescope::Widget>> = vec![
        Box::new(tilescope::FpsWidget::new()),
        Box::new(tilescope::ScaleWidget::new()),
    ];
    let mut renderer = tilescope::FrameRenderer::new(
        opts,
        &assets,
        layers,
        widgets,
        dimension,
        Box::new(tilescope::SystemClock::default()),
    )?;
    renderer.pan_mut().center_on(layout.world_rect().center());

    let mut surface = tilescope::CpuSurface::new(args.width, args.height)?;
    let mut metrics: Box<dyn tilescope::TextMetrics> = match &args.font {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
            surface = surface.with_font(bytes.clone())?;
            Box::new(tilescope::ParleyTextMetrics::new(
                tilescope::TextLayoutEngine::with_font(bytes)?,
            ))
        }
        None => Box::new(tilescope::FixedAdvanceMetrics::default()),
    };

    let stats = renderer.draw_capture(
        &mut surface,
        &grid,
        tilescope::FrameInput {
            viewport: tilescope::Viewport::new(args.width, args.height),
            pointer: None,
            text_metrics: metrics.as_mut(),
        },
    )?;
    let frame = surface.finish();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} tile draws, {} widgets)",
        args.out.display(),
        stats.tile_draws,
        stats.widgets_drawn
    );
    Ok(())
}
