/// SalaryDash Server
///
/// Loads the salary dataset once, then serves the dashboard pipeline over
/// HTTP and WebSocket to a browser front end.

use log::{error, info};
use salarydash::config::ServerConfig;
use salarydash::server::run_server;
use salarydash::RecordStore;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Blocking fetch, before the async runtime starts
    info!("loading salary data from {}", config.source);
    let store = match RecordStore::load(&config.source) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("cannot start without data: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = actix_web::rt::System::new().block_on(run_server(&config.host, config.port, store));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
