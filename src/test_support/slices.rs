//! Builders for synthetic slices of each of the eight wire shapes.

use crate::constants::*;

/// A 28-byte sync slice with the given `ts_low`, all other fields zeroed.
pub fn sync(ts_low: u32) -> Vec<u8> {
    let mut v = SYNC_PREFIX.to_vec();
    v.extend_from_slice(&0u32.to_le_bytes()); // zero
    v.extend_from_slice(&0u32.to_le_bytes()); // flag
    v.extend_from_slice(&(VOSPI_SLICE_LEN as u32).to_le_bytes()); // len_packet
    v.extend_from_slice(&0u32.to_le_bytes()); // len_json
    v.extend_from_slice(&ts_low.to_le_bytes());
    v.extend_from_slice(&0u32.to_le_bytes()); // ts_high
    v.extend_from_slice(&0u32.to_le_bytes()); // reserved
    debug_assert_eq!(v.len(), SYNC_SLICE_LEN);
    v
}

fn packet(row: usize, fill: u16) -> Vec<u8> {
    let mut p = vec![0u8; VOSPI_PACKET_LEN];
    p[0] = ((row >> 8) & VOSPI_ROW_MASK_HI as usize) as u8;
    p[1] = (row & 0xFF) as u8;
    for col in 0..THERMAL_COLS {
        let word = fill & VOSPI_WORD_MASK;
        p[4 + col * 2] = (word >> 8) as u8;
        p[4 + col * 2 + 1] = (word & 0xFF) as u8;
    }
    p
}

/// A complete 10,332-byte VoSPI `packets` slice where row `r` is filled
/// with value `r`, minus any rows listed in `skip_rows`.
pub fn packets_identity(skip_rows: &[usize]) -> Vec<u8> {
    let mut out = Vec::with_capacity(VOSPI_SLICE_LEN);
    let mut present = 0;
    for row in 0..THERMAL_ROWS {
        if skip_rows.contains(&row) {
            continue;
        }
        out.extend(packet(row, row as u16));
        present += 1;
    }
    for i in 0..(VOSPI_PACKET_COUNT - present) {
        out.extend(packet(THERMAL_ROWS + i, 0));
    }
    out
}

/// An `edge_rle` slice whose single run covers the entire mask with
/// `false`.
pub fn edge_rle_all_false() -> Vec<u8> {
    let mut v = 2u32.to_le_bytes().to_vec();
    v.extend_from_slice(&(EDGE_MASK_CELLS as u16).to_le_bytes());
    v
}

/// A 32,768-byte AGC slice filled with `fill`.
pub fn agc_filled(fill: u8) -> Vec<u8> {
    vec![fill; AGC_SLICE_LEN]
}

/// A dedicated telemetry slice carrying `{"shutterState": "<state>"}`,
/// zero-padded to `total_len` bytes.
pub fn telemetry_shutter(state: &str, total_len: usize) -> Vec<u8> {
    let json = format!(r#"{{"shutterState":"{state}"}}"#);
    let mut v = json.into_bytes();
    v.resize(total_len, 0);
    v
}

/// A dedicated telemetry slice carrying a `batteryVoltageUpdate` object,
/// zero-padded to `total_len` bytes.
pub fn telemetry_battery(voltage: f64, percentage: f64, total_len: usize) -> Vec<u8> {
    let json = format!(
        r#"{{"type":"batteryVoltageUpdate","data":{{"voltage":{voltage},"percentage":{percentage}}}}}"#
    );
    let mut v = json.into_bytes();
    v.resize(total_len, 0);
    v
}

/// A hand-assembled minimal baseline JPEG (SOI through EOI) with no real
/// image content — enough to exercise slice splitting/concatenation logic,
/// not a guarantee the bytes decode to a real image.
pub fn minimal_jpeg_bytes() -> Vec<u8> {
    let mut v = JPEG_LATCH_PREFIX.to_vec();
    v.extend_from_slice(&[0x00, 0x08]); // SOF0 length placeholder
    v.extend(std::iter::repeat(0u8).take(32));
    v.extend_from_slice(&JPEG_EOI);
    v
}

/// Split `bytes` into `n` contiguous slices of roughly equal size, the way
/// a real JPEG is fragmented across successive USB bulk reads.
pub fn split_into(bytes: &[u8], n: usize) -> Vec<Vec<u8>> {
    let chunk = bytes.len().div_ceil(n.max(1));
    bytes.chunks(chunk).map(|c| c.to_vec()).collect()
}

/// A small, syntactically complete baseline JPEG (SOI through EOI) with the
/// camera's own marker ordering: `SOF0` immediately follows `SOI`, ahead of
/// the quantization/Huffman tables it references, which is exactly the
/// shape the classifier's JPEG-latch prefix (`FF D8 FF C0 00 11`) expects.
pub fn camera_style_jpeg() -> Vec<u8> {
    let mut jpeg = Vec::new();
    jpeg.extend_from_slice(&JPEG_LATCH_PREFIX); // SOI, SOF0, len=0x0011
    jpeg.extend_from_slice(&[
        0x08, // precision
        0x00, 0x08, // height = 8
        0x00, 0x08, // width = 8
        0x03, // 3 components
        0x01, 0x11, 0x00, // Y:  id=1 sampling=1x1 qtable=0
        0x02, 0x11, 0x01, // Cb: id=2 sampling=1x1 qtable=1
        0x03, 0x11, 0x01, // Cr: id=3 sampling=1x1 qtable=1
    ]);
    // DQT table 0
    jpeg.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
    jpeg.extend(std::iter::repeat(16u8).take(64));
    // DQT table 1
    jpeg.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x01]);
    jpeg.extend(std::iter::repeat(17u8).take(64));
    // DHT DC class 0, id 0
    jpeg.extend_from_slice(&[
        0xFF, 0xC4, 0x00, 0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
        0x09, 0x0A, 0x0B,
    ]);
    // DHT AC class 1, id 0
    jpeg.extend_from_slice(&[0xFF, 0xC4, 0x00, 0xB5, 0x10]);
    jpeg.extend_from_slice(&[
        0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05, 0x04, 0x04, 0x00, 0x00, 0x01,
        0x7D,
    ]);
    jpeg.extend(std::iter::repeat(0x10u8).take(162));
    // SOS, 3 components all referencing table 0 for simplicity
    jpeg.extend_from_slice(&[
        0xFF, 0xDA, 0x00, 0x0C, 0x03, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x3F, 0x00,
    ]);
    jpeg.extend_from_slice(&[0xFB, 0xD3, 0x28, 0xA2, 0x80, 0x00]);
    jpeg.extend_from_slice(&JPEG_EOI);
    jpeg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_has_expected_length_and_prefix() {
        let s = sync(0xDEAD_BEEF);
        assert_eq!(s.len(), SYNC_SLICE_LEN);
        assert!(s.starts_with(&SYNC_PREFIX));
    }

    #[test]
    fn packets_identity_has_expected_length() {
        let p = packets_identity(&[]);
        assert_eq!(p.len(), VOSPI_SLICE_LEN);
    }

    #[test]
    fn split_into_covers_all_bytes() {
        let bytes: Vec<u8> = (0..100u32).map(|i| i as u8).collect();
        let parts = split_into(&bytes, 3);
        let total: usize = parts.iter().map(|p| p.len()).sum();
        assert_eq!(total, bytes.len());
    }
}
