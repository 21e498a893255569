use std::path::PathBuf;

use clap::Parser;
use rackview::{App, LaunchOptions, init_logging};

#[derive(Parser, Debug)]
#[command(name = "rackview")]
#[command(about = "A terminal console for machines, networks and the resources around them")]
struct Args {
    /// Path to the data directory (default: ~/.rackview/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Sign in as this user instead of the one recorded in config.yaml
    #[arg(short, long)]
    user: Option<String>,

    /// Location to open at, e.g. /tags or /intro
    #[arg(short, long, default_value = "/machines")]
    path: String,

    /// Artificial delay for session loading, in milliseconds
    #[arg(long, default_value_t = 0)]
    load_delay_ms: u64,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rackview")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let options = LaunchOptions {
        data_dir,
        user: args.user,
        initial_path: args.path.as_str().into(),
        load_delay_ms: args.load_delay_ms,
    };
    let mut app = App::launch(options);

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Console shutting down");

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    Ok(())
}
