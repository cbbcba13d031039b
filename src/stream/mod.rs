//! # stream
//!
//! Input stream adapter over Python file-like objects

// -- gil discipline

mod gil;
pub(crate) use gil::GilPolicy;

// -- error latch

mod status;
pub use status::StreamStatus;

// -- input stream

mod input;
pub use input::PyInputStream;
