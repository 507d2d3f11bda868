mod core;
mod snapshot;

pub use self::core::*;
pub use snapshot::*;
