//! Binary decoders, one per productive classifier label.
//!
//! Each decoder is a pure function (modulo the visible decoder's own
//! accumulator) consuming a raw slice and emitting a typed decoded value.
//! [`DecodedSlice`] is the tagged sum type the assembler switches on,
//! rather than each label returning a differently shaped object the
//! assembler would have to interrogate dynamically.

pub mod agc;
pub mod edge_rle;
pub mod packets;
pub mod sync;
pub mod telemetry;
pub mod visible;

use crate::types::{AgcImage, EdgeMask, SyncRecord, Telemetry, ThermalImage, VisibleImage};

/// One decoded slice, tagged by which decoder produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedSlice {
    Thermal(ThermalImage),
    Visible(VisibleImage, Option<Telemetry>),
    Telemetry(Telemetry),
    Sync(SyncRecord),
    Agc(AgcImage),
    EdgeMask(EdgeMask),
}
