/*!
# mirai - A diary client that shows your future self

mirai talks to the diary service: it lists, writes and edits diaries, prints
the month calendar with days that have entries, and browses the generated
"future self" images from the oldest entry to the newest.

## Usage

```
mirai [--log-format text|json] [--verbose] <COMMAND>

Commands:
  list      List diaries, newest first
  show      Show one diary with its generated image
  write     Write a new diary
  edit      Replace the diary written on a date
  delete    Delete a diary
  calendar  Print the month calendar with days that have entries marked
  gallery   Browse generated images from oldest to newest
  upload    Upload a profile photo used to generate future-self images
```

## Configuration

- `MIRAI_API_BASE_URL`: base URL of the diary service (defaults to "http://localhost:8000")
- `MIRAI_USER_ID`: user whose latest image is fetched after writing (defaults to 1)
- `MIRAI_TIMEOUT_SECS`: per-request timeout in seconds (defaults to 30)
- `RUST_LOG`: overrides the log filter
*/

use clap::Parser;
use mirai::cli::{self, CliArgs, LogFormat};
use mirai::config::Config;
use mirai::constants::{APP_NAME, DEFAULT_LOG_LEVEL, TRACING_SERVICE_NAME};
use mirai::errors::AppResult;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, Instrument};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.log_format, args.verbose);

    let correlation_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "app_invocation",
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );

    match run(args).instrument(span).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(correlation_id = %correlation_id, "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the global subscriber; logs go to stderr so stdout stays clean.
fn init_tracing(format: LogFormat, verbose: bool) {
    let level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", APP_NAME, level)));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(args: CliArgs) -> AppResult<String> {
    info!("Starting mirai");

    let config = Config::load()?;
    debug!("Loaded configuration: {:?}", config);

    let token = CancellationToken::new();
    let guard = token.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            guard.cancel();
        }
    });

    let result = cli::execute(args.command, &config, &token).await;
    interrupt.abort();
    result
}
