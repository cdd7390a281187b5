// crates/core/src/lib.rs
pub mod checksum;
pub mod error;
pub mod paths;
pub mod types;

pub use checksum::checksum;
pub use error::ValidationError;
pub use types::*;
