pub mod application;
pub mod cli;
pub mod domain;
pub mod horizon;
pub mod io;

pub use domain::*;
pub use horizon::{HorizonClient, LedgerQuery};
