//! Library side of the `inventario` command: configuration, logging, the
//! ingestion pipeline, manual edits and output rendering.

pub mod config;
pub mod edits;
pub mod logging;
pub mod pipeline;
pub mod summary;
