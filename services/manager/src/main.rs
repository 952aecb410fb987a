//! provd manager service
//!
//! Thin binary around the manager library: serves the provider endpoint
//! and drains the outbound queue into the log. A real agent embeds
//! [`provd_manager::ResourceProviderManager`] instead.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use provd_manager::{api, Config, ResourceProviderManager, ResourceProviderMessage};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting resource provider manager");

    let config = Config::from_env()?;
    info!(listen_addr = %config.listen_addr, "Configuration loaded");

    let (manager, mut messages) = ResourceProviderManager::new();

    tokio::spawn(async move {
        while let Some(message) = messages.recv().await {
            match message {
                ResourceProviderMessage::UpdateOfferOperationStatus(update) => {
                    info!(
                        operation_uuid = ?update.operation_uuid,
                        "Offer operation status update"
                    );
                }
                ResourceProviderMessage::UpdateState(state) => {
                    info!(
                        provider_id = ?state.info.id,
                        resources = state.resources.len(),
                        "Resource provider state update"
                    );
                }
            }
        }
    });

    let app = api::create_router(manager);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for resource providers");

    axum::serve(listener, app).await?;

    Ok(())
}
