//! Wire-level constants for the FLIR One Pro Gen-3 slice protocol.
//!
//! Collected here the way `frame_assembler.rs` in the reference UVC
//! implementation keeps its own magic numbers (`FRAME_SIZES`, header byte
//! offsets) at module scope rather than scattered through decode logic.

/// USB vendor ID for the FLIR One Pro Gen-3.
pub const VENDOR_ID: u16 = 0x09CB;
/// USB product ID for the FLIR One Pro Gen-3.
pub const PRODUCT_ID: u16 = 0x1996;
/// Bulk endpoint the thermal/visible slice stream is read from.
///
/// Not used by this crate directly — callers wiring up their own USB
/// transport read from this endpoint and feed the resulting buffers into
/// the pipeline as slices.
pub const THERMAL_ENDPOINT: u8 = 0x85;

/// Sync marker prefix: `EF BE 00 00`.
pub const SYNC_PREFIX: [u8; 4] = [0xEF, 0xBE, 0x00, 0x00];
/// Total length of a sync slice.
pub const SYNC_SLICE_LEN: usize = 28;
/// Expected value of `SyncRecord::magic` once parsed as little-endian `u32`.
pub const SYNC_MAGIC: u32 = 0x0000_BEEF;

/// Length of a VoSPI `packets` slice: 63 packets of 164 bytes.
pub const VOSPI_SLICE_LEN: usize = 10_332;
/// Packet size within a VoSPI slice: 4-byte header + 160-byte payload.
pub const VOSPI_PACKET_LEN: usize = 164;
/// Packets per VoSPI slice.
pub const VOSPI_PACKET_COUNT: usize = 63;
/// Row mask applied to the packet id's high byte.
pub const VOSPI_ROW_MASK_HI: u8 = 0x0F;
/// Data mask applied to each 16-bit payload word (low 14 bits are data).
pub const VOSPI_WORD_MASK: u16 = 0x3FFF;
/// Thermal image rows.
pub const THERMAL_ROWS: usize = 60;
/// Thermal image columns.
pub const THERMAL_COLS: usize = 80;
/// Maximum missing rows tolerated before the frame is dropped.
pub const VOSPI_MAX_MISSING_ROWS: usize = 2;

/// AGC slice length: one full padded buffer.
pub const AGC_SLICE_LEN: usize = 32_768;
/// AGC padded buffer rows.
pub const AGC_PADDED_ROWS: usize = 128;
/// AGC padded buffer columns.
pub const AGC_PADDED_COLS: usize = 256;
/// AGC active (cropped) rows.
pub const AGC_ACTIVE_ROWS: usize = 120;
/// AGC active (cropped) columns.
pub const AGC_ACTIVE_COLS: usize = 160;
/// Row offset of the active crop within the padded buffer.
pub const AGC_CROP_Y0: usize = (AGC_PADDED_ROWS - AGC_ACTIVE_ROWS) / 2;
/// Column offset of the active crop within the padded buffer.
pub const AGC_CROP_X0: usize = (AGC_PADDED_COLS - AGC_ACTIVE_COLS) / 2;

/// Edge mask output rows.
pub const EDGE_MASK_ROWS: usize = 1080;
/// Edge mask output columns.
pub const EDGE_MASK_COLS: usize = 1440;
/// Edge mask total cell count.
pub const EDGE_MASK_CELLS: usize = EDGE_MASK_ROWS * EDGE_MASK_COLS;
/// Minimum slice length accepted by the edge RLE decoder (header + one run).
pub const EDGE_RLE_MIN_LEN: usize = 6;

/// JPEG prefix the classifier latches onto for the first `visible` slice.
pub const JPEG_LATCH_PREFIX: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11];
/// JPEG start-of-image marker.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
/// JPEG end-of-image marker.
pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Lower bound (inclusive) of the `packets` slice length range.
pub const PACKETS_LEN_MIN: usize = 10_000;
/// Upper bound (inclusive) of the `packets` slice length range.
pub const PACKETS_LEN_MAX: usize = 11_000;

/// Lower bound (inclusive) of the telemetry slice length heuristic.
pub const TELEMETRY_LEN_MIN: usize = 120;
/// Upper bound (inclusive) of the telemetry slice length heuristic.
pub const TELEMETRY_LEN_MAX: usize = 512;

/// Lower bound (inclusive) of the `edge_rle` slice length range.
pub const EDGE_RLE_LEN_MIN: usize = 7_000;
/// Upper bound (inclusive) of the `edge_rle` slice length range.
pub const EDGE_RLE_LEN_MAX: usize = 25_000;

/// Default cap on the visible-JPEG accumulator before it is reset.
pub const VISIBLE_ACCUMULATOR_CAP: usize = 2 * 1024 * 1024;
