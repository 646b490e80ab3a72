//! EFBE sync marker decoder (`sync` label).

use crate::constants::{SYNC_PREFIX, SYNC_SLICE_LEN};
use crate::error::SliceError;
use crate::types::SyncRecord;

/// Decode a 28-byte sync slice into a [`SyncRecord`].
///
/// Right-pads to 32 bytes with zeros before parsing eight little-endian
/// `u32` fields. `FAILS with MalformedSlice` if the length isn't exactly
/// 28 or the `EF BE 00 00` prefix is absent.
pub fn decode_sync(slice: &[u8]) -> Result<SyncRecord, SliceError> {
    if slice.len() != SYNC_SLICE_LEN {
        return Err(SliceError::malformed(
            "sync",
            format!("length {} != {}", slice.len(), SYNC_SLICE_LEN),
        ));
    }
    if !slice.starts_with(&SYNC_PREFIX) {
        return Err(SliceError::malformed("sync", "missing EF BE 00 00 prefix"));
    }

    let mut padded = [0u8; 32];
    padded[..SYNC_SLICE_LEN].copy_from_slice(slice);

    let mut fields = [0u32; 8];
    for (i, word) in padded.chunks_exact(4).enumerate() {
        fields[i] = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
    }

    Ok(SyncRecord {
        magic: fields[0],
        zero: fields[1],
        flag: fields[2],
        len_packet: fields[3],
        len_json: fields[4],
        ts_low: fields[5],
        ts_high: fields[6],
        reserved: fields[7],
    })
}

/// Re-encode a [`SyncRecord`] as the 32-byte little-endian layout it was
/// parsed from (28 original bytes followed by four zero padding bytes).
pub fn encode_sync(record: &SyncRecord) -> [u8; 32] {
    let mut out = [0u8; 32];
    let fields = [
        record.magic,
        record.zero,
        record.flag,
        record.len_packet,
        record.len_json,
        record.ts_low,
        record.ts_high,
        record.reserved,
    ];
    for (i, field) in fields.iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&field.to_le_bytes());
    }
    out
}
