//! Thin client front-ends over the prediction contract.

pub mod form;
pub mod offline;
pub mod remote;

pub use form::{PatientForm, render_result};
pub use offline::OfflineClient;
pub use remote::{HealthResponse, RemoteClient};
