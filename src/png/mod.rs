//! PNG encoding and chunk-level reduction.

mod encode;
mod reduce;

pub use encode::encode_pixel;
pub use reduce::{reduce, reduce_bytes, ReduceSummary, KEPT_CHUNKS, MAX_CHUNK_LEN, PNG_SIGNATURE};
