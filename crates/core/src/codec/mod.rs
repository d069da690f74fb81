//! Discriminated codec for moving vehicles across serialization boundaries.
//!
//! Three consumers share this module: the snapshot writer (flat text format
//! on disk), the tabular SQL mapper (every column present, unused columns
//! NULL), and the dispatcher (untyped request parameters). All of them
//! dispatch on the same `type` discriminator, matched case-insensitively;
//! unknown tags are rejected, never coerced to a variant.

mod error;
mod fields;
mod snapshot;

pub use error::CodecError;
pub use fields::{decode_params, decode_record, FlatRecord};
pub use snapshot::{parse_snapshot, render_snapshot};
