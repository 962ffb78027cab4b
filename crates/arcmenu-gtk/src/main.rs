use anyhow::Context;
use arcmenu_gtk::config;
use arcmenu_gtk::gui::app::{AppInit, AppModel};
use arcmenu_gtk::sys::runtime;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

/// Radial menu demo: a button that opens a ring of icons.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Menu settings file (defaults to the per-user config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open the menu as soon as the window appears
    #[arg(long)]
    open: bool,

    /// Write the default settings file and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let menu_config = config::load_or_default(args.config.as_deref());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    match config::resolve_path(args.config.as_deref()) {
        Ok(path) => runtime::start_background_services(tx, path)
            .context("Failed to start background services")?,
        Err(e) => log::warn!("Config file will not be watched: {}", e),
    }

    // GTK must not see our own flags
    let app = RelmApp::new("org.arcmenu.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config: menu_config,
        config_path: args.config,
        open: args.open,
        events: rx,
    });
    Ok(())
}
