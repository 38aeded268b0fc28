use anyhow::Context;
use clap::Parser;
use orbit::config::{self, Config};
use orbit::gui::app::AppModel;
use orbit::sys::runtime;
use orbit_engine::{SurfaceRect, SvgRenderer};
use relm4::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the configured sliders to an SVG file and exit
    #[arg(long, value_name = "PATH")]
    export_svg: Option<PathBuf>,

    /// Side length of the exported SVG in pixels
    #[arg(long, default_value_t = 400.0, requires = "export_svg")]
    size: f64,

    /// Print `id = value` for every configured slider and exit
    #[arg(long)]
    print_values: bool,
}

fn export_svg(config: &Config, path: &Path, size: f64) -> anyhow::Result<()> {
    let mut engine = config.build_engine(SvgRenderer::new(SurfaceRect::square(size)))?;
    engine.flush_frame();
    fs_err::write(path, engine.renderer().document())?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn print_values(config: &Config) -> anyhow::Result<()> {
    let engine = config.build_engine(SvgRenderer::default())?;
    for ring in engine.values() {
        println!("{} = {}", ring.id, ring.value);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::get_config_path().context("No config path, pass --config")?,
    };
    let config = config::load_or_default(&config_path);

    if let Some(path) = &args.export_svg {
        return export_svg(&config, path, args.size);
    }
    if args.print_values {
        return print_values(&config);
    }

    if let Err(e) = config::write_default_config(&config_path) {
        log::warn!("Could not write default config: {}", e);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    // clap already consumed the arguments, keep GTK from parsing them again
    let app = RelmApp::new("org.orbit.sliders").with_args(Vec::new());
    app.run::<AppModel>((config, config_path, rx));
    Ok(())
}
