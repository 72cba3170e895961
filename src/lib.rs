pub mod charts;
pub mod components;
pub mod config;
pub mod configurator;
pub mod dom;
pub mod error;
pub mod format;
pub mod logging;
pub mod manager;
pub mod models;
pub mod routes;

pub use components::App;
pub use configurator::{Configurator, DialogTarget, Lifecycle, MountAction, SyncOutcome};
pub use error::{ConfiguratorError, ManagerError};
pub use manager::{MemoryTokenManager, TokenManager};
