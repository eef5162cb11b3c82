//! R2 Uploadr - upload one local file to Cloudflare R2
//!
//! Every outcome exits with status 0; the result is reported on stdout.

use clap::error::ErrorKind;
use clap::Parser;
use r2_uploadr::{config::Config, s3::build_client, upload::upload, VERSION};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "usage: r2-uploadr /path/to/local/file";

/// R2 Uploadr - upload a local file to a fixed R2 bucket and key
#[derive(Parser, Debug)]
#[command(name = "r2-uploadr")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Local file to upload
    #[arg(allow_hyphen_values = true)]
    path: Option<PathBuf>,

    /// Extra arguments after the path are ignored
    #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,

    /// Optional YAML configuration file (defaults to CF_ACCOUNT_ID)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Starting r2-uploadr v{}", VERSION);
    if !args.rest.is_empty() {
        debug!(ignored = ?args.rest, "Ignoring extra arguments");
    }

    let Some(path) = args.path else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = match &args.config {
        Some(file) => Config::load(file),
        None => Config::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            println!("failed to load config, {}", e);
            return Ok(());
        }
    };
    debug!(endpoint = %config.endpoint(), "Loaded configuration");

    let client = match build_client(&config).await {
        Ok(client) => client,
        Err(e) => {
            println!("failed to load config, {}", e);
            return Ok(());
        }
    };

    if let Err(e) = upload(&client, &path).await {
        println!("failed to upload, {}", e);
        return Ok(());
    }

    println!("success upload");
    Ok(())
}
