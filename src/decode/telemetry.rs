//! Dirty-JSON telemetry decoder (`telemetry` label).
//!
//! Telemetry slices are zero-padded and may contain partial or
//! concatenated JSON objects plus control-character noise; the scanning
//! strategy below (locate `{`, incrementally decode, advance past failures
//! by one byte) is preserved deliberately rather than tightened, since the
//! input is dirty by design.

use serde_json::Value;

use crate::types::Telemetry;

/// Decode a dedicated telemetry slice. Returns `None` ("no telemetry") if
/// scanning finds nothing usable; all failures are swallowed rather than
/// propagated, per the decoder's permissive contract.
pub fn decode_telemetry(slice: &[u8]) -> Option<Telemetry> {
    let cleaned = clean(slice);
    let mut fallback: Option<Telemetry> = None;

    let mut pos = 0usize;
    let bytes = cleaned.as_bytes();
    while let Some(rel) = bytes[pos..].iter().position(|&b| b == b'{') {
        let brace_at = pos + rel;
        match parse_one(&cleaned[brace_at..]) {
            Some((value, consumed)) => {
                if is_battery_update(&value) {
                    let telemetry = telemetry_from_value(&value);
                    if !telemetry.is_empty() {
                        return Some(telemetry);
                    }
                } else if fallback.is_none() && has_shutter_or_ffc(&value) {
                    let telemetry = telemetry_from_value(&value);
                    if !telemetry.is_empty() {
                        fallback = Some(telemetry);
                    }
                }
                pos = brace_at + consumed.max(1);
            }
            None => pos = brace_at + 1,
        }
        if pos >= bytes.len() {
            break;
        }
    }

    fallback
}

/// Strip leading/trailing NUL bytes, lossily decode as text, and drop all
/// characters outside the printable ASCII set (plus tab/LF/CR/VT/FF).
fn clean(slice: &[u8]) -> String {
    let mut start = 0;
    let mut end = slice.len();
    while start < end && slice[start] == 0 {
        start += 1;
    }
    while end > start && slice[end - 1] == 0 {
        end -= 1;
    }
    let text = String::from_utf8_lossy(&slice[start..end]);
    text.chars()
        .filter(|&c| {
            let b = c as u32;
            (0x20..=0x7E).contains(&b) || matches!(c, '\t' | '\n' | '\r' | '\x0B' | '\x0C')
        })
        .collect()
}

/// Attempt an incremental JSON object decode starting at `text`'s first
/// byte (which must be `{`). Returns the parsed value and how many bytes
/// of `text` were consumed, mirroring `json.JSONDecoder().raw_decode`.
fn parse_one(text: &str) -> Option<(Value, usize)> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    let value = stream.next()?.ok()?;
    let consumed = stream.byte_offset();
    Some((value, consumed))
}

fn is_battery_update(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("batteryVoltageUpdate")
}

fn has_shutter_or_ffc(value: &Value) -> bool {
    value.get("shutterState").is_some() || value.get("ffcState").is_some()
}

/// Map one already-parsed JSON object into a [`Telemetry`] record, using
/// the priority-1 (battery) shape if present, otherwise the priority-2
/// (shutter/ffc) field mapping. Shared with the visible decoder's
/// trailing-JSON extraction, which only ever sees a single object.
pub(crate) fn telemetry_from_value(value: &Value) -> Telemetry {
    if is_battery_update(value) {
        let data = value.get("data");
        return Telemetry {
            battery_voltage: data.and_then(|d| d.get("voltage")).and_then(Value::as_f64),
            battery_percent: data
                .and_then(|d| d.get("percentage"))
                .and_then(Value::as_f64),
            ..Telemetry::default()
        };
    }

    Telemetry {
        shutter_state: value
            .get("shutterState")
            .and_then(Value::as_str)
            .map(str::to_owned),
        ffc_state: value
            .get("ffcState")
            .and_then(Value::as_str)
            .map(str::to_owned),
        shutter_temp_k: value.get("shutterTemperature").and_then(Value::as_f64),
        aux_temp_k: value.get("auxTemperature").and_then(Value::as_f64),
        t_notify: value.get("usbNotifiedTimestamp").and_then(Value::as_f64),
        t_enqueue: value.get("usbEnqueuedTimestamp").and_then(Value::as_f64),
        ..Telemetry::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(json: &str, total: usize) -> Vec<u8> {
        let mut v = json.as_bytes().to_vec();
        v.resize(total, 0);
        v
    }

    #[test]
    fn battery_update_takes_priority() {
        let json = r#"{"shutterState":"open"}{"type":"batteryVoltageUpdate","data":{"voltage":3.9,"percentage":77}}"#;
        let slice = padded(json, 256);
        let tel = decode_telemetry(&slice).unwrap();
        assert_eq!(tel.battery_voltage, Some(3.9));
        assert_eq!(tel.battery_percent, Some(77.0));
        assert!(tel.shutter_state.is_none());
    }

    #[test]
    fn fallback_used_when_no_battery_object() {
        let json = r#"{"shutterState":"open","ffcState":"idle"}"#;
        let slice = padded(json, 256);
        let tel = decode_telemetry(&slice).unwrap();
        assert_eq!(tel.shutter_state.as_deref(), Some("open"));
        assert_eq!(tel.ffc_state.as_deref(), Some("idle"));
    }

    #[test]
    fn garbage_returns_none() {
        let slice = vec![0u8; 256];
        assert!(decode_telemetry(&slice).is_none());
    }

    #[test]
    fn malformed_object_is_skipped_one_byte_at_a_time() {
        let json = r#"{not json}{"shutterState":"closed"}"#;
        let slice = padded(json, 256);
        let tel = decode_telemetry(&slice).unwrap();
        assert_eq!(tel.shutter_state.as_deref(), Some("closed"));
    }

    #[test]
    fn empty_battery_object_is_never_emitted() {
        // A battery-typed object with no "data" field maps to an
        // all-`None` Telemetry, which must never be emitted.
        let json = r#"{"type":"batteryVoltageUpdate"}"#;
        let slice = padded(json, 256);
        assert!(decode_telemetry(&slice).is_none());
    }

    #[test]
    fn empty_battery_object_falls_through_to_later_fallback() {
        let json = r#"{"type":"batteryVoltageUpdate"}{"shutterState":"open"}"#;
        let slice = padded(json, 256);
        let tel = decode_telemetry(&slice).unwrap();
        assert_eq!(tel.shutter_state.as_deref(), Some("open"));
    }
}
