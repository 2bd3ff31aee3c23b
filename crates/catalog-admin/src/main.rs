//! Lists one catalog resource and logs the resulting state.
//!
//! ```bash
//! RUST_LOG=info catalog-admin categories
//! RUST_LOG=info catalog-admin cours 0 20
//! ```
//!
//! Arguments: resource name (default `cours`), then optional page and size.

use catalog_admin::{AdminConfig, AdminError, AdminSystem};
use resource_framework::tracing::setup_tracing;
use resource_framework::QueryParams;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), AdminError> {
    setup_tracing();

    let mut args = std::env::args().skip(1);
    let resource = args.next().unwrap_or_else(|| "cours".to_string());
    let page = args.next().and_then(|p| p.parse::<u32>().ok());
    let size = args.next().and_then(|s| s.parse::<u32>().ok());

    let config = AdminConfig::load();
    let system = AdminSystem::new(&config)?;
    info!(resources = ?system.resources(), "Admin system ready");

    let query = match page {
        Some(page) => QueryParams::page(page, size.unwrap_or(20)),
        None => QueryParams::default(),
    };

    let span = tracing::info_span!("list", %resource);
    let listed = system
        .list_by_name(&resource, query)
        .instrument(span)
        .await;

    match &listed {
        Ok(records) => {
            let count = records.as_array().map_or(0, Vec::len);
            info!(%resource, count, "Listed resource");
            match serde_json::to_string_pretty(records) {
                Ok(text) => println!("{text}"),
                Err(e) => error!(error = %e, "Could not render records"),
            }
        }
        Err(e) => error!(%resource, error = %e, "Listing failed"),
    }

    system.shutdown().await?;
    listed.map(|_| ())
}
