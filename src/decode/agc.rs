//! Automatic Gain Control frame decoder (`agc` label).

use crate::constants::{
    AGC_ACTIVE_COLS, AGC_ACTIVE_ROWS, AGC_CROP_X0, AGC_CROP_Y0, AGC_PADDED_COLS, AGC_PADDED_ROWS,
    AGC_SLICE_LEN,
};
use crate::error::SliceError;
use crate::types::AgcImage;

/// Decode a 32,768-byte AGC slice into its centered 120×160 active region.
///
/// The returned image is always a copy, independent of the input buffer's
/// lifetime. `FAILS with MalformedSlice` if the length doesn't match.
pub fn decode_agc(slice: &[u8]) -> Result<AgcImage, SliceError> {
    if slice.len() != AGC_SLICE_LEN {
        return Err(SliceError::malformed(
            "agc",
            format!("length {} != {}", slice.len(), AGC_SLICE_LEN),
        ));
    }

    let mut image = AgcImage::zeros((AGC_ACTIVE_ROWS, AGC_ACTIVE_COLS));
    for r in 0..AGC_ACTIVE_ROWS {
        let src_row = AGC_CROP_Y0 + r;
        let src_start = src_row * AGC_PADDED_COLS + AGC_CROP_X0;
        let src = &slice[src_start..src_start + AGC_ACTIVE_COLS];
        for (c, &byte) in src.iter().enumerate() {
            image[[r, c]] = byte;
        }
    }
    debug_assert_eq!(AGC_PADDED_ROWS * AGC_PADDED_COLS, AGC_SLICE_LEN);
    Ok(image)
}
