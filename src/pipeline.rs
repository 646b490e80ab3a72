//! The four-stage pull pipeline: slice source → classifier → decoders →
//! assembler, composed into a single [`Frame`] iterator.
//!
//! There are no internal threads and no async suspension points; the
//! consumer drives iteration by calling `next()`, and each slice walks the
//! chain to completion before the next slice is fetched.

use crate::assembler::FrameAssembler;
use crate::classifier::Classifier;
use crate::decode::visible::{VisibleDecoder, VisibleOutcome};
use crate::decode::{agc, edge_rle, packets, sync, telemetry, DecodedSlice};
use crate::types::{Frame, Label, Slice};

/// Drives a slice source through the classifier, decoders, and assembler,
/// yielding complete [`Frame`]s.
///
/// Two independent `Pipeline`s never share state: each owns its own
/// classifier, visible-JPEG accumulator, and assembler pending map.
pub struct Pipeline<S> {
    source: S,
    classifier: Classifier,
    visible: VisibleDecoder,
    assembler: FrameAssembler,
}

impl<S> Pipeline<S>
where
    S: Iterator<Item = Slice>,
{
    /// Build a pipeline over any lazy sequence of slices.
    pub fn new(source: S) -> Self {
        Pipeline {
            source,
            classifier: Classifier::new(),
            visible: VisibleDecoder::new(),
            assembler: FrameAssembler::new(),
        }
    }

    /// Process one slice through classify → decode → assemble, returning a
    /// completed frame if this slice crossed a frame boundary.
    fn process(&mut self, slice: Slice) -> Option<Frame> {
        let label = self.classifier.classify(&slice);

        let decoded = match label {
            Label::KeepAlive | Label::Unknown => {
                log::trace!("discarding {:?} slice ({} bytes)", label, slice.len());
                None
            }
            Label::Sync => match sync::decode_sync(&slice) {
                Ok(record) => Some(DecodedSlice::Sync(record)),
                Err(e) => {
                    log::debug!("{e}");
                    None
                }
            },
            Label::Packets => packets::decode_packets(&slice).map(DecodedSlice::Thermal),
            Label::Agc => match agc::decode_agc(&slice) {
                Ok(image) => Some(DecodedSlice::Agc(image)),
                Err(e) => {
                    log::debug!("{e}");
                    None
                }
            },
            Label::EdgeRle => match edge_rle::decode_edge_rle(&slice) {
                Ok(mask) => Some(DecodedSlice::EdgeMask(mask)),
                Err(e) => {
                    log::debug!("{e}");
                    None
                }
            },
            Label::Telemetry => telemetry::decode_telemetry(&slice).map(DecodedSlice::Telemetry),
            Label::Visible => match self.visible.push(&slice) {
                VisibleOutcome::NotReady => None,
                VisibleOutcome::Dropped => {
                    log::debug!("dropped undecodable visible JPEG");
                    None
                }
                VisibleOutcome::Image(image, tel) => Some(DecodedSlice::Visible(image, tel)),
            },
        };

        decoded.and_then(|d| self.assembler.push(d))
    }
}

impl<S> Iterator for Pipeline<S>
where
    S: Iterator<Item = Slice>,
{
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        loop {
            let slice = self.source.next()?;
            if let Some(frame) = self.process(slice) {
                return Some(frame);
            }
        }
    }
}
