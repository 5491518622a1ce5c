pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

pub use application::{ChildLedger, LedgerConfig, LedgerError, ParentAccount};
pub use storage::{FileStore, MemoryStore, RecordStore};
