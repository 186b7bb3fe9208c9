mod error;
mod schedule;

pub use error::PlanError;
pub use schedule::{write_schedule, ObservationRequest, Plan};
