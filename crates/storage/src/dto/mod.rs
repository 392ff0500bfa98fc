pub mod common;
pub mod flight;
pub mod result;
