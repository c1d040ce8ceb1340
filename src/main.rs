//! honkview - Entry Point

use clap::Parser;
use honkview::config::{self, CliOverrides};
use honkview::model::AppError;
use honkview::state::EngineState;
use honkview::transport::{Dispatcher, HttpTransport};
use honkview::view::{self, ColorConfig, FeedStyles, ShellOptions, TuiError};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use tracing::info;

/// honkview - terminal client for honk feeds
#[derive(Parser, Debug)]
#[command(name = "honkview")]
#[command(version)]
#[command(about = "Browse a honk server's feeds with cached views and incremental refresh")]
pub struct Args {
    /// Base URL of the honk server
    #[arg(long)]
    pub server: Option<String>,

    /// View to open at startup (home, atme, first, saved, longago, convoy, combo, honker, user)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Argument of the startup view (conversation id, combo name, xid or user name)
    #[arg(short, long)]
    pub arg: Option<String>,

    /// Anti-forgery token sent with actions
    #[arg(long)]
    pub csrf: Option<String>,

    /// Session cookie header value
    #[arg(long)]
    pub cookie: Option<String>,

    /// Seconds between automatic refreshes (0 disables)
    #[arg(long)]
    pub refresh_interval: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            server: self.server.clone(),
            csrf: self.csrf.clone(),
            cookie: self.cookie.clone(),
            page: self.page.clone(),
            arg: self.arg.clone(),
            refresh_interval_secs: self.refresh_interval,
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = config::resolve(args.config.clone(), args.overrides())?;

    honkview::logging::init(&config.log_file_path)?;

    info!(
        server = ?config.server,
        start_page = %config.start_page,
        refresh_interval = ?config.refresh_interval,
        "Configuration loaded and resolved"
    );

    let seed = config.seed()?;
    let transport = HttpTransport::new(config.server()?)?
        .with_cookie(config.cookie.clone())
        .with_timeouts(config.read_timeout, config.write_timeout);

    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(Arc::new(transport), tx);
    let options = ShellOptions {
        refresh_interval: config.refresh_interval,
        styles: FeedStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color)),
        ..ShellOptions::default()
    };

    view::run(EngineState::new(seed), dispatcher, rx, options)
        .map_err(|TuiError::Io(err)| AppError::Terminal(err))?;

    info!("Exited cleanly");
    Ok(())
}
