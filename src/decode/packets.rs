//! VoSPI row-packet decoder (`packets` label).
//!
//! 10,332 bytes = 63 packets of 164 bytes = 60 image rows + 3 telemetry
//! rows (telemetry rows are discarded here; camera telemetry comes from a
//! different stream). The CRC is not validated: the camera's error rate on
//! this endpoint is negligible and CRC computation would double the decode
//! cost.

use crate::constants::*;
use crate::types::ThermalImage;

/// Decode one VoSPI `packets` slice into a thermal image.
///
/// Returns `None` if the slice length doesn't match exactly, or if more
/// than [`VOSPI_MAX_MISSING_ROWS`] rows never arrived — both are upstream
/// transmission glitches and are dropped silently, never as an error.
pub fn decode_packets(slice: &[u8]) -> Option<ThermalImage> {
    if slice.len() != VOSPI_SLICE_LEN {
        return None;
    }

    let mut rows: Vec<Option<[u16; THERMAL_COLS]>> = vec![None; THERMAL_ROWS];

    for packet in slice.chunks_exact(VOSPI_PACKET_LEN) {
        let id_hi = packet[0];
        let id_lo = packet[1];
        let row = (((id_hi & VOSPI_ROW_MASK_HI) as usize) << 8) | id_lo as usize;
        if row >= THERMAL_ROWS {
            continue;
        }
        let payload = &packet[4..4 + THERMAL_COLS * 2];
        let mut cells = [0u16; THERMAL_COLS];
        for (col, word) in payload.chunks_exact(2).enumerate() {
            let value = u16::from_be_bytes([word[0], word[1]]);
            cells[col] = value & VOSPI_WORD_MASK;
        }
        rows[row] = Some(cells);
    }

    let missing = rows.iter().filter(|r| r.is_none()).count();
    if missing > VOSPI_MAX_MISSING_ROWS {
        return None;
    }

    fill_gaps(&mut rows);

    let mut image = ThermalImage::zeros((THERMAL_ROWS, THERMAL_COLS));
    for (r, row) in rows.into_iter().enumerate() {
        let row = row.expect("gaps were filled above");
        for (c, value) in row.into_iter().enumerate() {
            image[[r, c]] = value;
        }
    }
    Some(image)
}

/// Fill missing rows by copying the nearest preceding valid row, or the
/// nearest following valid row if none precedes it.
fn fill_gaps(rows: &mut [Option<[u16; THERMAL_COLS]>]) {
    let mut last_valid: Option<[u16; THERMAL_COLS]> = None;
    for row in rows.iter_mut() {
        match row {
            Some(cells) => last_valid = Some(*cells),
            None => {
                if let Some(cells) = last_valid {
                    *row = Some(cells);
                }
            }
        }
    }
    let mut next_valid: Option<[u16; THERMAL_COLS]> = None;
    for row in rows.iter_mut().rev() {
        match row {
            Some(cells) => next_valid = Some(*cells),
            None => {
                if let Some(cells) = next_valid {
                    *row = Some(cells);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(row: usize, fill: u16) -> Vec<u8> {
        let mut p = vec![0u8; VOSPI_PACKET_LEN];
        p[0] = ((row >> 8) & 0x0F) as u8;
        p[1] = (row & 0xFF) as u8;
        for col in 0..THERMAL_COLS {
            let word = fill & VOSPI_WORD_MASK;
            p[4 + col * 2] = (word >> 8) as u8;
            p[4 + col * 2 + 1] = (word & 0xFF) as u8;
        }
        p
    }

    fn full_slice(skip_rows: &[usize]) -> Vec<u8> {
        let mut out = Vec::with_capacity(VOSPI_SLICE_LEN);
        for row in 0..THERMAL_ROWS {
            if skip_rows.contains(&row) {
                continue;
            }
            out.extend(packet(row, row as u16));
        }
        // pad with telemetry-row-like packets (row id >= 60) up to 63 total
        let present = THERMAL_ROWS - skip_rows.len();
        for i in 0..(VOSPI_PACKET_COUNT - present) {
            out.extend(packet(60 + i, 0));
        }
        out
    }

    #[test]
    fn wrong_length_drops_silently() {
        assert!(decode_packets(&[0u8; 100]).is_none());
    }

    #[test]
    fn complete_frame_decodes_each_row_to_its_index() {
        let slice = full_slice(&[]);
        assert_eq!(slice.len(), VOSPI_SLICE_LEN);
        let image = decode_packets(&slice).unwrap();
        for r in 0..THERMAL_ROWS {
            for c in 0..THERMAL_COLS {
                assert_eq!(image[[r, c]], r as u16);
            }
        }
    }

    #[test]
    fn two_missing_rows_filled_from_preceding_row() {
        let slice = full_slice(&[10, 40]);
        let image = decode_packets(&slice).unwrap();
        assert_eq!(image[[10, 0]], 9);
        assert_eq!(image[[40, 0]], 39);
        assert_eq!(image[[9, 0]], 9);
    }

    #[test]
    fn three_missing_rows_drops_the_frame() {
        let slice = full_slice(&[10, 40, 59]);
        assert!(decode_packets(&slice).is_none());
    }

    #[test]
    fn missing_row_zero_fills_from_next_valid_row() {
        let slice = full_slice(&[0]);
        let image = decode_packets(&slice).unwrap();
        assert_eq!(image[[0, 0]], 1);
    }

    #[test]
    fn fourteen_bit_mask_applied() {
        let mut slice = Vec::with_capacity(VOSPI_SLICE_LEN);
        for row in 0..THERMAL_ROWS {
            slice.extend(packet(row, 0xFFFF));
        }
        for i in 0..(VOSPI_PACKET_COUNT - THERMAL_ROWS) {
            slice.extend(packet(60 + i, 0));
        }
        let image = decode_packets(&slice).unwrap();
        for c in 0..THERMAL_COLS {
            assert_eq!(image[[0, c]] & 0x3FFF, image[[0, c]]);
            assert_eq!(image[[0, c]], 0x3FFF);
        }
    }
}
