pub mod aggregate;
pub mod chart;

pub use aggregate::*;
pub use chart::*;
