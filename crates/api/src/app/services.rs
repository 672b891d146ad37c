//! Engine wiring for the HTTP layer.

use std::sync::Arc;

use supplyline_infra::{InMemoryStore, ProcurementService};
use supplyline_procurement::{PlantId, ProcurementResult, VendorId};

use crate::config::ApiConfig;

pub const DEFAULT_PLANT_NAME: &str = "Plant A";
pub const DEFAULT_VENDOR_NAME: &str = "Vendor A";

/// The engine as served over HTTP: in-memory store, wall clock.
pub type Engine = ProcurementService<Arc<InMemoryStore>>;

/// Shared application services, handed to handlers as an extension.
#[derive(Debug)]
pub struct AppServices {
    pub procurement: Engine,
}

pub fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let procurement = ProcurementService::new(Arc::new(InMemoryStore::new()));
    if config.seed_defaults {
        seed_defaults(&procurement)?;
    }
    Ok(AppServices { procurement })
}

/// Make sure plant 1 and vendor 1 exist so a fresh process is usable.
pub fn seed_defaults(engine: &Engine) -> ProcurementResult<()> {
    match engine.get_plant(PlantId::from_i64(1)) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            engine.register_plant(DEFAULT_PLANT_NAME)?;
        }
        Err(err) => return Err(err),
    }

    match engine.get_vendor(VendorId::from_i64(1)) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            engine.register_vendor(DEFAULT_VENDOR_NAME)?;
        }
        Err(err) => return Err(err),
    }

    tracing::info!("default plant and vendor available");
    Ok(())
}
