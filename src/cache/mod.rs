//! Tree persistence
//!
//! - `codec` - the line-based cache format (encode with threshold
//!   pruning, decode with path-derived parent linkage)
//! - `store` - wholesale cache file reads and writes

mod codec;
mod store;

pub use codec::{ERROR_MARKER, FIELD_SEPARATOR, deserialize, serialize};
pub use store::{load, save};
