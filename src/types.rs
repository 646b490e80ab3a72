//! Shared data model: slices, labels, decoded values, and the assembled
//! [`Frame`] output type.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One USB bulk-read buffer (or one replayed chunk file), 0..=32,768 bytes.
///
/// Opaque to the slice source; only the classifier and decoders interpret
/// its contents.
pub type Slice = Vec<u8>;

/// Classification assigned to a slice by the [`crate::classifier::Classifier`].
///
/// `KeepAlive` and `Unknown` are discarded downstream without reaching a
/// decoder; the other six each select a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// 28-byte `EF BE 00 00` frame-boundary marker.
    Sync,
    /// VoSPI row-packet slice (thermal sensor rows).
    Packets,
    /// JPEG fragment, possibly followed by a trailing JSON telemetry blob.
    Visible,
    /// Dedicated JSON telemetry slice.
    Telemetry,
    /// Automatic Gain Control padded 8-bit frame.
    Agc,
    /// Run-length encoded edge bitmap.
    EdgeRle,
    /// Zero-length keep-alive slice.
    KeepAlive,
    /// Did not match any recognized shape.
    Unknown,
}

/// Eight little-endian 32-bit fields parsed from a sync slice.
///
/// Invariant: `magic == 0x0000_BEEF` (source bytes `EF BE 00 00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRecord {
    pub magic: u32,
    pub zero: u32,
    pub flag: u32,
    pub len_packet: u32,
    pub len_json: u32,
    pub ts_low: u32,
    pub ts_high: u32,
    pub reserved: u32,
}

/// 60×80 matrix of 14-bit unsigned radiometric counts stored in 16-bit
/// cells (upper two bits always zero). Row order is top-to-bottom as
/// delivered by the sensor.
pub type ThermalImage = Array2<u16>;

/// 120×160 8-bit image: the active region of a 128×256 padded AGC buffer.
pub type AgcImage = Array2<u8>;

/// 1080×1440 Boolean edge bitmap used for multi-spectral overlay.
pub type EdgeMask = Array2<bool>;

/// Decoded BGR 8-bit-per-channel visible-light image at the camera's
/// native resolution (dimensions are not fixed by the protocol).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleImage {
    pub width: u32,
    pub height: u32,
    /// Row-major BGR bytes, `3 * width * height` long.
    pub data: Vec<u8>,
}

/// Camera telemetry. Each field is independently absent; a value with
/// every field `None` must never be emitted by a decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub shutter_state: Option<String>,
    pub ffc_state: Option<String>,
    pub shutter_temp_k: Option<f64>,
    pub aux_temp_k: Option<f64>,
    pub t_notify: Option<f64>,
    pub t_enqueue: Option<f64>,
    pub battery_voltage: Option<f64>,
    pub battery_percent: Option<f64>,
}

impl Telemetry {
    /// True if every field is absent — such a value must never be emitted.
    pub fn is_empty(&self) -> bool {
        self.shutter_state.is_none()
            && self.ffc_state.is_none()
            && self.shutter_temp_k.is_none()
            && self.aux_temp_k.is_none()
            && self.t_notify.is_none()
            && self.t_enqueue.is_none()
            && self.battery_voltage.is_none()
            && self.battery_percent.is_none()
    }
}

/// Assembler output: a correlated bundle of thermal, visible, telemetry,
/// and edge-mask data for one sensor exposure.
///
/// `idx` is a monotonically increasing positive integer assigned by the
/// assembler; it strictly increases by 1 per emitted frame. All other
/// fields are optional, but at least one non-metadata field is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub idx: u32,
    pub ts: Option<u32>,
    pub thermal: Option<ThermalImage>,
    pub agc: Option<AgcImage>,
    pub telemetry: Option<Telemetry>,
    pub edge_mask: Option<EdgeMask>,
    pub visible: Option<VisibleImage>,
}
