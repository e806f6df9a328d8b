//! Session orchestration crate (§4.8): wires the lens registry, surface
//! registry, input proxy, and metrics collector into one publishable
//! session lifecycle.

mod error;
mod orchestrator;

pub use error::SessionError;
pub use orchestrator::SessionOrchestrator;
