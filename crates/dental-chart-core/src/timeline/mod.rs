//! Treatment timeline: history, plan, and the merged roadmap.

mod history;
mod reconciler;

pub use history::*;
pub use reconciler::*;
