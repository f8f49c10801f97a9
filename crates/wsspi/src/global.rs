//! Process-wide default service loader
//!
//! Built on first use from the default configuration sources and shared by
//! every facade function that is not handed a loader explicitly.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;
use wsspi_application::ServiceLoader;
use wsspi_domain::Result;
use wsspi_infrastructure::config::ConfigLoader;
use wsspi_infrastructure::build_service_loader;

static SERVICE_LOADER: ArcSwapOption<ServiceLoader> = ArcSwapOption::const_empty();

/// The process-wide loader, bootstrapping it on first use
///
/// Concurrent first calls may each bootstrap; exactly one result is kept.
pub fn service_loader() -> Result<Arc<ServiceLoader>> {
    if let Some(loader) = SERVICE_LOADER.load_full() {
        return Ok(loader);
    }

    let built = Arc::new(build_service_loader(&ConfigLoader::new().load()?)?);
    let previous =
        SERVICE_LOADER.compare_and_swap(&None::<Arc<ServiceLoader>>, Some(Arc::clone(&built)));
    match &*previous {
        Some(existing) => Ok(Arc::clone(existing)),
        None => {
            debug!("Default service loader bootstrapped");
            Ok(built)
        }
    }
}

/// Replace the process-wide loader, returning the previous one
pub fn install_service_loader(loader: ServiceLoader) -> Option<Arc<ServiceLoader>> {
    SERVICE_LOADER.swap(Some(Arc::new(loader)))
}

/// Forget the process-wide loader so the next use bootstraps a fresh one
pub fn reset_service_loader() -> Option<Arc<ServiceLoader>> {
    SERVICE_LOADER.swap(None)
}
