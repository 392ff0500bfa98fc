pub mod flights;
pub mod nominations;
pub mod results;
