//! Domain models for the dental chart.

mod appointment;
mod chart;
mod condition;
mod patient;
mod payment;
mod status;
mod surface;
mod timeline;
mod tooth;

pub use appointment::*;
pub use chart::*;
pub use condition::*;
pub use patient::*;
pub use payment::*;
pub use status::*;
pub use surface::*;
pub use timeline::*;
pub use tooth::*;
