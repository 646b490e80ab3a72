//! Error taxonomy for the slice decoding pipeline.
//!
//! Only strict shape failures become [`SliceError`] values; everything the
//! pipeline can recover from on its own (dropped frames, not-yet-ready
//! accumulation, unclassified slices) is modeled as plain data, never as an
//! `Err`, following the propagation policy the decoders are built against.

use thiserror::Error;

/// A slice failed a strict, well-identified shape check.
///
/// Each decoder that can fail this way names the check in `reason`; the
/// pipeline catches this, discards the offending slice, and continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SliceError {
    /// The slice's length or required prefix did not match the decoder's
    /// strict contract (sync ≠ 28 bytes, AGC ≠ 32,768 bytes, edge RLE too
    /// short to hold its own length header).
    #[error("malformed {kind} slice: {reason}")]
    Malformed {
        /// Name of the decoder that rejected the slice (`"sync"`, `"agc"`,
        /// `"edge_rle"`).
        kind: &'static str,
        /// Human-readable description of which check failed.
        reason: String,
    },
}

impl SliceError {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        SliceError::Malformed {
            kind,
            reason: reason.into(),
        }
    }
}
