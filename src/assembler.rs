//! Frame assembler: collates decoded slice results into whole frames and
//! emits them at frame boundaries.

use crate::decode::DecodedSlice;
use crate::types::{AgcImage, EdgeMask, Frame, SyncRecord, Telemetry, ThermalImage, VisibleImage};

#[derive(Default)]
struct Pending {
    sync: Option<SyncRecord>,
    thermal: Option<ThermalImage>,
    agc: Option<AgcImage>,
    edge_mask: Option<EdgeMask>,
    telemetry: Option<Telemetry>,
    visible: Option<(VisibleImage, Option<Telemetry>)>,
}

/// Correlates decoded slices around sync boundaries into [`Frame`] values.
///
/// Two independent pipeline instances must never share a `FrameAssembler`:
/// each consumer constructs its own, and this type enforces that by owning
/// all of its state directly rather than through any global/static table.
#[derive(Default)]
pub struct FrameAssembler {
    pending: Pending,
    idx: u32,
}

impl FrameAssembler {
    /// Construct an assembler with empty state and `idx` starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one decoded slice into the pending frame, returning a completed
    /// [`Frame`] if this push crossed a frame boundary.
    ///
    /// An incoming `sync` is the boundary marker: when `pending` already
    /// holds a sync, this push flushes the prior frame before storing the
    /// new sync into the now-empty `pending`. The camera emits exactly one
    /// sync per frame near the top of the slice burst, so collecting
    /// forward from an incoming sync yields a complete set before the next
    /// one arrives.
    pub fn push(&mut self, decoded: DecodedSlice) -> Option<Frame> {
        match decoded {
            DecodedSlice::Sync(record) => {
                if self.pending.sync.is_some() {
                    let frame = self.flush();
                    self.pending.sync = Some(record);
                    return Some(frame);
                }
                self.pending.sync = Some(record);
                None
            }
            DecodedSlice::Thermal(image) => {
                self.pending.thermal = Some(image);
                None
            }
            DecodedSlice::Agc(image) => {
                self.pending.agc = Some(image);
                None
            }
            DecodedSlice::EdgeMask(mask) => {
                self.pending.edge_mask = Some(mask);
                None
            }
            DecodedSlice::Telemetry(tel) => {
                self.pending.telemetry = Some(tel);
                None
            }
            DecodedSlice::Visible(image, tel) => {
                self.pending.visible = Some((image, tel));
                None
            }
        }
    }

    fn flush(&mut self) -> Frame {
        self.idx += 1;
        let pending = std::mem::take(&mut self.pending);

        let ts = pending.sync.map(|s| s.ts_low);
        let (visible, vis_tel) = match pending.visible {
            Some((image, tel)) => (Some(image), tel),
            None => (None, None),
        };
        let telemetry = pending.telemetry.or(vis_tel);

        Frame {
            idx: self.idx,
            ts,
            thermal: pending.thermal,
            agc: pending.agc,
            telemetry,
            edge_mask: pending.edge_mask,
            visible,
        }
    }
}
