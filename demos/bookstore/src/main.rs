//! Prints the path document of a small bookstore API.
//!
//! The books and authors services are passed explicitly; the orders service
//! is picked up from the `inventory` registry.

mod models;
mod services;

use anyhow::{Context, Result};
use restdoc::{build_document, registered_services, Config};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("info,restdoc=info,{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let config = Config::from_manifest(&manifest)
        .with_context(|| format!("failed to load configuration from {}", manifest.display()))?;
    tracing::debug!(?config, "loaded configuration");

    let mut services = vec![services::books()?, services::authors()?];
    services.extend(registered_services()?);

    let document = build_document(&services, &config)?;
    tracing::info!(paths = document.paths.len(), "built path document");
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
