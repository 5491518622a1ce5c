mod file_store;
mod memory_store;
mod store;

pub use file_store::*;
pub use memory_store::*;
pub use store::*;
