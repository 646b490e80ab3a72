//! USB-slice decoding pipeline for the FLIR One Pro Gen-3 thermal camera.
//!
//! This crate implements the hard core of a thermal-camera driver: a
//! content-sensitive classifier that segregates an interleaved stream of
//! heterogeneous fixed-size buffers ("slices"), a suite of binary decoders
//! for each on-the-wire slice format, and a frame assembler that
//! correlates decoded slices around sync boundaries into a single
//! [`Frame`](types::Frame). USB transport, display/visualization, and
//! temperature post-processing are out of scope; build those against
//! [`Pipeline`](pipeline::Pipeline), which accepts any
//! `Iterator<Item = Vec<u8>>` as its slice source.

pub mod assembler;
pub mod classifier;
pub mod constants;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod replay;
pub mod test_support;
pub mod types;

pub use assembler::FrameAssembler;
pub use classifier::Classifier;
pub use error::SliceError;
pub use pipeline::Pipeline;
pub use types::{AgcImage, EdgeMask, Frame, Label, Slice, SyncRecord, Telemetry, ThermalImage, VisibleImage};

/// Initialize the crate's logging, reading the level from `RUST_LOG`
/// (defaulting to `info`) the same way a binary embedding this pipeline
/// would on any non-Android target.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
