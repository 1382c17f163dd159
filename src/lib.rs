pub mod arenal;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod result;
pub mod types;
