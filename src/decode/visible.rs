//! Visible-light JPEG streaming decoder (`visible` label).
//!
//! Concatenates JPEG fragments across successive `visible` slices, detects
//! end-of-image, decodes the JPEG, and extracts trailing JSON telemetry
//! carried in the bytes after the EOI marker.

use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Cursor;

use crate::constants::{JPEG_EOI, JPEG_SOI, VISIBLE_ACCUMULATOR_CAP};
use crate::types::{Telemetry, VisibleImage};

/// Outcome of feeding one slice to the [`VisibleDecoder`].
#[derive(Debug, PartialEq)]
pub enum VisibleOutcome {
    /// Still accumulating JPEG bytes; nothing to report yet.
    NotReady,
    /// A JPEG failed to decode once its EOI arrived. No further action.
    Dropped,
    /// A complete image, with telemetry extracted from the trailing bytes
    /// if any JSON object was found there.
    Image(VisibleImage, Option<Telemetry>),
}

/// Stateful JPEG-over-slices accumulator.
#[derive(Debug, Default)]
pub struct VisibleDecoder {
    buffer: Vec<u8>,
    collecting: bool,
}

impl VisibleDecoder {
    /// Construct a decoder with an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one `visible`-labeled slice.
    pub fn push(&mut self, slice: &[u8]) -> VisibleOutcome {
        if slice.starts_with(&JPEG_SOI) {
            self.buffer.clear();
            self.collecting = true;
        }

        if !self.collecting {
            return VisibleOutcome::NotReady;
        }

        self.buffer.extend_from_slice(slice);

        if self.buffer.len() > VISIBLE_ACCUMULATOR_CAP {
            log::warn!(
                "visible accumulator exceeded {} bytes without EOI, resetting",
                VISIBLE_ACCUMULATOR_CAP
            );
            self.buffer.clear();
            self.collecting = false;
            return VisibleOutcome::NotReady;
        }

        let Some(eoi) = find(&self.buffer, &JPEG_EOI) else {
            return VisibleOutcome::NotReady;
        };

        let jpeg = self.buffer[..eoi + 2].to_vec();
        let tail = self.buffer[eoi + 2..].to_vec();
        self.buffer.clear();
        self.collecting = false;

        let image = match decode_jpeg(&jpeg) {
            Some(img) => img,
            None => return VisibleOutcome::Dropped,
        };

        let telemetry = extract_trailing_json(&tail);
        VisibleOutcome::Image(image, telemetry)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn decode_jpeg(bytes: &[u8]) -> Option<VisibleImage> {
    let mut decoder = Decoder::new(Cursor::new(bytes));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    let width = info.width as u32;
    let height = info.height as u32;

    let data = match info.pixel_format {
        PixelFormat::RGB24 => {
            let mut bgr = pixels;
            for px in bgr.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            bgr
        }
        PixelFormat::L8 => pixels
            .iter()
            .flat_map(|&v| [v, v, v])
            .collect::<Vec<u8>>(),
        PixelFormat::CMYK32 | PixelFormat::L16 => return None,
    };

    Some(VisibleImage {
        width,
        height,
        data,
    })
}

/// Scan `tail` for the first `{` and the first subsequent `}`; attempt to
/// parse the enclosed substring as a single JSON object. Invalid bytes are
/// treated permissively via lossy UTF-8 conversion.
fn extract_trailing_json(tail: &[u8]) -> Option<Telemetry> {
    let text = String::from_utf8_lossy(tail);
    let start = text.find('{')?;
    let end = text[start..].find('}').map(|i| start + i + 1)?;
    let candidate = &text[start..end];
    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
    let telemetry = crate::decode::telemetry::telemetry_from_value(&value);
    if telemetry.is_empty() {
        return None;
    }
    Some(telemetry)
}
