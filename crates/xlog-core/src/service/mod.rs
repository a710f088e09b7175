//! Line encoding and the sink boundary

pub mod encoder;
pub mod writer;

pub use encoder::*;
pub use writer::*;
