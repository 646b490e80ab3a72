//! Content-sensitive slice classifier.
//!
//! Labels each slice with one of eight kinds, preserving correct
//! attribution of JPEG continuation slices and of the telemetry slice that
//! trails a JPEG. State lives entirely on the [`Classifier`] value — two
//! independent classifiers never interfere with each other, unlike the
//! module-level flags the behavior was ported from.

use crate::constants::*;
use crate::types::Label;

/// Stateful slice classifier.
///
/// `collecting_jpeg` and `waiting_telemetry` are mutually exclusive; both
/// start false.
#[derive(Debug, Default)]
pub struct Classifier {
    collecting_jpeg: bool,
    waiting_telemetry: bool,
}

impl Classifier {
    /// Construct a classifier with fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one slice, advancing internal state as needed.
    pub fn classify(&mut self, slice: &[u8]) -> Label {
        if self.collecting_jpeg {
            if contains(slice, &JPEG_EOI) {
                self.collecting_jpeg = false;
                self.waiting_telemetry = true;
            }
            return Label::Visible;
        }

        if self.waiting_telemetry {
            self.waiting_telemetry = false;
            if is_telemetry_shape(slice) {
                return Label::Telemetry;
            }
            // fall through to normal detection
        }

        if slice.starts_with(&JPEG_LATCH_PREFIX) {
            self.collecting_jpeg = true;
            if contains(slice, &JPEG_EOI) {
                self.collecting_jpeg = false;
                self.waiting_telemetry = true;
            }
            return Label::Visible;
        }

        if slice.is_empty() {
            return Label::KeepAlive;
        }

        if slice.len() == SYNC_SLICE_LEN && slice.starts_with(&SYNC_PREFIX) {
            return Label::Sync;
        }

        if (PACKETS_LEN_MIN..=PACKETS_LEN_MAX).contains(&slice.len()) {
            return Label::Packets;
        }

        if is_telemetry_shape(slice) {
            return Label::Telemetry;
        }

        if (EDGE_RLE_LEN_MIN..=EDGE_RLE_LEN_MAX).contains(&slice.len())
            && !slice.starts_with(&JPEG_SOI)
        {
            return Label::EdgeRle;
        }

        if slice.len() == AGC_SLICE_LEN {
            return Label::Agc;
        }

        Label::Unknown
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Telemetry heuristic: length in [120, 512] AND contains `{` AND the last
/// non-zero byte (after right-stripping `0x00`) is `}`.
fn is_telemetry_shape(slice: &[u8]) -> bool {
    if !(TELEMETRY_LEN_MIN..=TELEMETRY_LEN_MAX).contains(&slice.len()) {
        return false;
    }
    if !slice.contains(&b'{') {
        return false;
    }
    let trimmed = {
        let mut end = slice.len();
        while end > 0 && slice[end - 1] == 0 {
            end -= 1;
        }
        &slice[..end]
    };
    trimmed.last() == Some(&b'}')
}
