//! Configuration types module

pub mod app;
pub mod context;
pub mod loader;
pub mod logging;
pub mod security;

pub use app::AppConfig;
pub use context::ContextConfig;
pub use loader::LoaderConfig;
pub use logging::LoggingConfig;
pub use security::SecurityConfig;
