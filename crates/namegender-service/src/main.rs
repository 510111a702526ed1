use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use namegender_db::{DatasetSource, DuplicatePolicy, LoadMode, LoadOptions, MalformedPolicy};
use namegender_resolver::Detector;
use namegender_service::{AppState, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATASET: &str = "data/nam_dict.txt.gz";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "using census table at {} (mode: {:?})",
        config.dataset_path.display(),
        config.load_options.mode
    );
    if config.load_options.malformed == MalformedPolicy::Skip {
        info!("malformed records will be skipped");
    }
    if config.load_options.duplicates == DuplicatePolicy::Accumulate {
        info!("duplicate records will be accumulated");
    }
    if config.disable_cache {
        info!("cache headers disabled");
    }

    let start = Instant::now();
    let detector = Arc::new(Detector::new(
        DatasetSource::file(&config.dataset_path),
        config.load_options,
    ));
    let index = detector
        .load()
        .with_context(|| format!("loading {}", config.dataset_path.display()))?;
    info!(
        "index of {} names built in {} ms",
        index.name_count(),
        start.elapsed().as_millis()
    );

    let state = AppState {
        detector,
        disable_cache: config.disable_cache,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid HOST or PORT")?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    dataset_path: PathBuf,
    load_options: LoadOptions,
    disable_cache: bool,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_dataset: Option<PathBuf> = None;
    let mut cli_mode: Option<LoadMode> = None;
    let mut malformed = MalformedPolicy::Abort;
    let mut duplicates = DuplicatePolicy::Overwrite;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--skip-malformed" => malformed = MalformedPolicy::Skip,
            "--accumulate-duplicates" => duplicates = DuplicatePolicy::Accumulate,
            "--dataset" => {
                if let Some(path) = args.next() {
                    cli_dataset = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--dataset=") {
                    cli_dataset = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--load-mode=") {
                    cli_mode = parse_load_mode(mode);
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let dataset_path = cli_dataset
        .or_else(|| env::var("NAM_DICT_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
    let mode = cli_mode
        .or_else(|| {
            env::var("NAM_DICT_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);

    Config {
        host,
        port,
        dataset_path,
        load_options: LoadOptions {
            mode,
            malformed,
            duplicates,
        },
        disable_cache,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
