mod chore;
mod money;
mod record;

pub use chore::*;
pub use money::*;
pub use record::*;
