pub mod flight_status;
pub mod scoring;
