//! Lens crate (§4.6, §4.7): transport subprocess lifecycle and argv
//! construction for the three transport kinds.

mod argv;
mod error;
mod session;

pub use error::LensError;
pub use session::{resolve, LensKind, LensMetrics, LensSession};
