pub mod flight;
pub mod nomination;
pub mod result;
