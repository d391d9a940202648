//! Dental chart orchestration and its derived views.

mod active;
mod orchestrator;

pub use active::*;
pub use orchestrator::*;
