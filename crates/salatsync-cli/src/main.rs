//! salatsync entry point.

use std::process::ExitCode;

use tracing::error;

use salatsync_cli::config::Config;
use salatsync_cli::sync;
use salatsync_core::{TracingConfig, init_tracing};
use salatsync_gcal::{
    CalendarError, GoogleCalendarClient, ServiceAccountAuthenticator, ServiceAccountKey,
};

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(TracingConfig::default().with_level(config.log_level)) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!("{} region(s) failed to sync", failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("sync aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Authenticates, then syncs every region; returns how many regions failed.
async fn run(config: &Config) -> Result<usize, CalendarError> {
    let key = ServiceAccountKey::from_file(&config.service_account_file)?;
    let authenticator = ServiceAccountAuthenticator::new(key, sync::HTTP_TIMEOUT);
    let token = authenticator.access_token().await?;
    let client = GoogleCalendarClient::new(token.access_token, sync::HTTP_TIMEOUT);

    Ok(sync::run_all(&client, config).await)
}
