use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use log::{info, warn};
use pageframe::draw::{self, WHITE};
use pageframe::input::{InputMode, ListenerRegistry};
use pageframe::overlay::{self, DisplayMode, ItemType};
use pageframe::{Config, DocumentView};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pageframe")]
#[command(version, about = "Render a document page's annotation overlay through a pan/zoom viewport")]
struct Cli {
    /// Annotation JSON (overlay items, legacy records, or a document payload)
    #[arg(long, short = 'a', value_name = "FILE")]
    annotations: Option<PathBuf>,

    /// Display mode (line_numbers, ocr_results, corrosion_loops, equipment, clean)
    #[arg(long, short = 'm', value_name = "MODE", default_value = "line_numbers")]
    mode: DisplayMode,

    /// 1-based page number
    #[arg(long, short = 'p', value_name = "N", default_value_t = 1)]
    page: u32,

    /// Rendered page size in pixels
    #[arg(long, value_name = "WxH", default_value = "1123x794", value_parser = parse_size)]
    page_size: (f64, f64),

    /// Scale the page was rendered at
    #[arg(long, value_name = "S", default_value_t = 1.0)]
    render_scale: f64,

    /// Viewport zoom factor (clamped to the configured range)
    #[arg(long, short = 'z', value_name = "Z")]
    zoom: Option<f64>,

    /// Viewport pan offset in pixels
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    pan: Option<(f64, f64)>,

    /// Input mode (mouse or trackpad); overrides the config file
    #[arg(long, value_name = "MODE")]
    input_mode: Option<InputMode>,

    /// Where to write the PNG
    #[arg(long, short = 'o', value_name = "PNG", required_unless_present = "list_modes")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/pageframe/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// List registered display modes and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_modes: bool,
}

fn parse_pair(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid number '{part}': {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn parse_size(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH but got '{value}'"))?;
    let parse = |part: &str| match part.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 1.0 => Ok(n),
        _ => Err(format!("invalid dimension '{part}'")),
    };
    Ok((parse(w)?, parse(h)?))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.list_modes {
        for (mode, entry) in config.display_modes().iter() {
            println!("{:<16} {} - {}", mode.as_str(), entry.title, entry.description);
        }
        return Ok(());
    }

    let output = cli
        .output
        .ok_or_else(|| anyhow!("--output is required"))?;

    let mut view = DocumentView::new(&config, ListenerRegistry::shared());
    if let Some(mode) = cli.input_mode {
        view.set_input_mode(mode);
    }

    view.set_mode(cli.mode)
        .with_context(|| format!("Cannot render in {} mode", cli.mode))?;
    view.set_page(cli.page)?;

    let (width, height) = cli.page_size;
    view.on_page_rendered(width, height, cli.render_scale)?;

    // A failed load leaves the overlay empty; the page still renders.
    let items = match &cli.annotations {
        Some(path) => overlay::load_annotations(path, ItemType::Line).unwrap_or_else(|err| {
            warn!("{err}; rendering without annotations");
            Vec::new()
        }),
        None => Vec::new(),
    };
    view.set_items(items)?;

    if cli.zoom.is_some() || cli.pan.is_some() {
        let zoom = cli.zoom.unwrap_or(1.0);
        let (pan_x, pan_y) = cli.pan.unwrap_or((0.0, 0.0));
        view.restore_view(zoom, pan_x, pan_y);
    }

    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        width.ceil() as i32,
        height.ceil() as i32,
    )
    .context("Failed to create image surface")?;
    let ctx = cairo::Context::new(&surface).context("Failed to create cairo context")?;

    draw::fill_background(&ctx, draw::Color::new(0.9, 0.9, 0.9, 1.0));
    let transform = view.engine().transform();
    ctx.save().context("Failed to save cairo state")?;
    draw::apply_transform(&ctx, &transform);
    draw::render_page(&ctx, width, height, WHITE);
    ctx.restore().context("Failed to restore cairo state")?;
    view.render(&ctx);
    drop(ctx);

    let mut file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write PNG to {}", output.display()))?;

    let shapes = view.overlay().shapes().len();
    info!("Wrote {} overlay shape(s) to {}", shapes, output.display());
    println!(
        "Rendered {} overlay shape(s) at zoom {}% to {}",
        shapes,
        view.engine().viewport().zoom_percent(),
        output.display()
    );

    Ok(())
}
