//! Run-length encoded edge bitmap decoder (`edge_rle` label).

use crate::constants::{EDGE_MASK_CELLS, EDGE_MASK_COLS, EDGE_MASK_ROWS, EDGE_RLE_MIN_LEN};
use crate::error::SliceError;
use crate::types::EdgeMask;

/// Decode an `edge_rle` slice into a 1080×1440 boolean mask.
///
/// The payload is the `L` bytes (from the 4-byte little-endian header)
/// following the header, clamped to however much of the slice is actually
/// present. `FAILS with MalformedSlice` only when the slice is too short
/// to contain the header plus at least one run. Every other malformation
/// (`L` exceeding the usable payload, truncated runs) is recovered
/// silently by clamping or zero-padding, per the decoder's contract.
pub fn decode_edge_rle(slice: &[u8]) -> Result<EdgeMask, SliceError> {
    if slice.len() < EDGE_RLE_MIN_LEN {
        return Err(SliceError::malformed(
            "edge_rle",
            format!("length {} below minimum {}", slice.len(), EDGE_RLE_MIN_LEN),
        ));
    }

    let declared_len = u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]) as usize;
    let available = slice.len() - 4;
    let mut payload = slice[4..4 + declared_len.min(available)].to_vec();
    if payload.len() % 2 != 0 {
        payload.push(0);
    }

    let mut mask = EdgeMask::from_elem((EDGE_MASK_ROWS, EDGE_MASK_COLS), false);
    let mut value = false;
    let mut idx = 0usize;

    for run in payload.chunks_exact(2) {
        if idx >= EDGE_MASK_CELLS {
            break;
        }
        let count = u16::from_le_bytes([run[0], run[1]]) as usize;
        let end = (idx + count).min(EDGE_MASK_CELLS);
        if value {
            for i in idx..end {
                mask[[i / EDGE_MASK_COLS, i % EDGE_MASK_COLS]] = true;
            }
        }
        idx = end;
        value = !value;
    }

    Ok(mask)
}
