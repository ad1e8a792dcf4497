//! Run the HTTP server

use healthdesk::adapters;
use healthdesk::api::ApiContext;
use healthdesk::config::AppConfig;
use healthdesk::server;

/// Serve the JSON API and the health-data endpoint
pub fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let stores = adapters::open_stores(config)?;
    let ctx = ApiContext {
        stores,
        registration: config.registration_options(),
        metric_limit: config.summary.metric_limit,
    };

    let address = config.server.address();
    println!("Starting healthdesk on http://{address}");
    println!("Press Ctrl+C to stop");
    server::serve(&ctx, &address)
}
