//! Library side of the `termpkg` converter: logging setup and the
//! conversion pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
