// Application layer: the ledgers a caller works with.
// ChildLedger owns one child's record; ParentAccount aggregates a household.

mod child;
mod config;
pub mod error;
mod lock;
mod parent;

pub use child::*;
pub use config::*;
pub use error::*;
pub use lock::*;
pub use parent::*;
