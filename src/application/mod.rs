// Application layer: validation, query orchestration and report building.
// Report builders are pure; the service owns every call to the ledger API.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
