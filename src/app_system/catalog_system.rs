use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::app_system::CatalogConfig;
use crate::clients::CatalogClient;
use crate::domain::Product;
use crate::ids::UuidGenerator;

/// Owns the catalog's store actor.
///
/// Responsible for starting the actor, handing out the client, and shutdown.
pub struct CatalogSystem {
    pub catalog_client: CatalogClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CatalogSystem {
    /// Must be called from within a tokio runtime.
    pub fn new(config: CatalogConfig) -> Self {
        info!(?config, "Starting catalog system");
        let (store_actor, store_client) = ResourceActor::<Product>::new(config.mailbox_size, UuidGenerator);
        let handle = tokio::spawn(store_actor.run());

        Self {
            catalog_client: CatalogClient::new(store_client, config),
            handle,
        }
    }

    /// Waits for the store actor to finish. It stops once every clone of the
    /// client has been dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system...");
        drop(self.catalog_client);

        if let Err(e) = self.handle.await {
            error!("Store actor task failed: {:?}", e);
            return Err(format!("Store actor task failed: {:?}", e));
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
