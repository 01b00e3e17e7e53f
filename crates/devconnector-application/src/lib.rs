//! Application layer for the DevConnector profile backend.
//!
//! Use cases that coordinate the domain types in `devconnector-core` with
//! the stores in `devconnector-infrastructure`, plus process wiring.

pub mod bootstrap;
pub mod logging;
pub mod profile_usecase;

pub use bootstrap::AppBootstrap;
pub use logging::init_tracing;
pub use profile_usecase::{PING_MESSAGE, ProfileLifecycleManager};
