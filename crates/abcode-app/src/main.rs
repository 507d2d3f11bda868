mod app_state;
mod cli;

use abcode_common::ConfigError;
use abcode_config::AbcodeConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_DIRECTIVE: &str = "abcode=info";

fn read_config(args: &cli::Args) -> Result<AbcodeConfig, ConfigError> {
    match &args.config {
        Some(path) => abcode_config::load_config_from(path),
        None => abcode_config::load_config(),
    }
}

/// `--log-level`, then the config's `logging.level`, then `abcode=info`.
fn log_directive<'a>(args: &'a cli::Args, config: Option<&AbcodeConfig>) -> &'a str {
    args.log_level
        .as_deref()
        .or_else(|| config.map(|c| c.logging.level.directive()))
        .unwrap_or(DEFAULT_DIRECTIVE)
}

fn init_logging(directive: &str) {
    let directive = directive
        .parse()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() {
    let args = cli::parse();

    // Config first: it may choose the log level.
    let loaded = read_config(&args);
    init_logging(log_directive(&args, loaded.as_ref().ok()));

    tracing::info!("ABCode v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AbcodeConfig::default()
    });
    tracing::info!(
        workspace = %args.workspace_root().display(),
        dev_server = %config.dev_server.url,
        "Config loaded"
    );

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::AbcodeApp::new(config, &args);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
