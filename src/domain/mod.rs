mod account;
mod amount;
mod asset;
mod keys;
mod operation;
mod transaction;
mod trustline;

pub use account::*;
pub use amount::*;
pub use asset::*;
pub use keys::*;
pub use operation::*;
pub use transaction::*;
pub use trustline::*;
