// Feature schema and prediction values
pub mod ml;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
