use crate::app::PortalApp;
use crate::catalog::SectionId;
use crate::config::PortalConfig;
use crate::fetcher::{Fetcher, HttpTransport};
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};

mod app;
mod catalog;
mod config;
mod errors;
mod fetcher;
mod logging;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    logging::init_logging();

    let config = match PortalConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let transport = match HttpTransport::new(config.http_timeout) {
        Ok(t) => t,
        Err(e) => {
            error!("HTTP client init failed: {e}");
            std::process::exit(1);
        }
    };

    let fetcher = Fetcher::new(Arc::new(transport), config.api_base.as_str());
    let app = Arc::new(PortalApp::new(fetcher, config.normalize()));

    // Home sections load in the background while the server comes up
    if let Err(e) = app.refresh(&SectionId::HOME) {
        error!("Initial fetch failed to start: {e}");
    }

    info!(addr = %config.bind_addr, api = %config.api_base, "starting server");
    let server = Server::bind(config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
