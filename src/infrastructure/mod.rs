pub mod core;
pub mod ml;
pub mod observability;
