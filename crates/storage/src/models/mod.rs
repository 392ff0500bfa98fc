pub mod attempt;
pub mod flight;
pub mod group;
pub mod nomination;
pub mod result;

pub use attempt::{AttemptCard, AttemptSlot, AttemptStatus, LiftType};
pub use flight::{Flight, FlightStatus};
pub use group::Group;
pub use nomination::Nomination;
pub use result::AthleteResult;
