//! # Starred Entities Demo
//!
//! Starts a [`StarredSystem`] from the environment (see
//! [`starred_entities::config`]), stars and toggles a few entities, and logs
//! every snapshot a subscriber receives.
//!
//! ```bash
//! RUST_LOG=info STARRED_STORAGE_PATH=/tmp/starred.json cargo run
//! ```

use starred_entities::config::StarredConfig;
use starred_entities::lifecycle::{setup_tracing, StarredSystem};
use starred_entities::model::Entity;
use starred_entities::StarredEntitiesApi;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StarredConfig::from_env()?;
    info!(?config, "Starting starred entities demo");

    let system = StarredSystem::from_config(&config);

    // Log every snapshot from a separate subscriber
    let mut stream = system.client.starred_entities();
    let watcher = tokio::spawn(
        async move {
            while let Some(snapshot) = stream.next().await {
                info!(size = snapshot.len(), starred = ?snapshot.starred_entities(), "Snapshot");
            }
        }
        .instrument(tracing::info_span!("watcher")),
    );

    let entities = [
        Entity::new("Component", "checkout-service").with_title("Checkout"),
        Entity::new("API", "payments").with_namespace("billing"),
        Entity::new("Group", "platform-team"),
    ];

    let span = tracing::info_span!("starring");
    async {
        for entity in &entities {
            let entity_ref = entity.entity_ref()?;
            system.client.star(&entity_ref).await?;
        }

        // Toggle the first one off and back on again
        let first = entities[0].entity_ref()?;
        system.client.toggle_starred(&first).await?;
        system.client.toggle_starred(&first).await?;

        // Unstar the last one
        system.client.unstar(&entities[2].entity_ref()?).await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let snapshot = system.client.snapshot();
    for entity in &entities {
        info!(
            kind = %entity.kind,
            name = %entity.metadata.name,
            starred = snapshot.is_starred(entity),
            "Final state"
        );
    }

    system.shutdown().await?;
    if let Err(e) = watcher.await {
        error!(error = %e, "Watcher failed");
    }

    info!("Demo completed successfully");
    Ok(())
}
