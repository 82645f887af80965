//! System orchestration, startup, and shutdown logic.

pub mod cart_system;
pub mod tracing;

pub use self::cart_system::*;
pub use self::tracing::*;
