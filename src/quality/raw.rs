//! Raw format records as reported by yt-dlp's `--dump-json` output

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Codec value yt-dlp uses to mean "stream not present"
pub const CODEC_NONE: &str = "none";

/// One entry of the `formats` array, before any normalization.
///
/// Numeric fields are read as `f64` because extractors report e.g. `fps`
/// as `29.97`; they are truncated when converted into a
/// [`QualityOption`](super::QualityOption).
///
/// Every field is read leniently: a numeric `format_id` becomes its decimal
/// text, a numeric string such as `"720"` counts as a number, and a value of
/// any other type is treated as absent. Only a record that is not a JSON
/// object fails to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFormat {
    #[serde(default, deserialize_with = "lenient_string")]
    pub format_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fps: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vcodec: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub acodec: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ext: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub filesize: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub format_note: Option<String>,
}

/// Strings as-is, numbers and booleans as their text, anything else absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers and numeric strings, anything else absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Positive integer or nothing; zero and negatives mean "not reported"
pub(crate) fn positive_u32(value: Option<f64>) -> Option<u32> {
    let v = value.filter(|v| v.is_finite())?.trunc();
    if v < 1.0 {
        return None;
    }
    Some(v.min(u32::MAX as f64) as u32)
}

pub(crate) fn positive_u64(value: Option<f64>) -> Option<u64> {
    let v = value.filter(|v| v.is_finite())?.trunc();
    if v < 1.0 {
        return None;
    }
    Some(v.min(u64::MAX as f64) as u64)
}

/// Maps the `"none"` sentinel and empty strings to `None`
pub(crate) fn present_codec(codec: Option<&str>) -> Option<String> {
    match codec {
        Some(c) if !c.is_empty() && c != CODEC_NONE => Some(c.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positive_u32() {
        assert_eq!(positive_u32(Some(1080.0)), Some(1080));
        assert_eq!(positive_u32(Some(29.97)), Some(29));
        assert_eq!(positive_u32(Some(0.0)), None);
        assert_eq!(positive_u32(Some(0.5)), None);
        assert_eq!(positive_u32(Some(-720.0)), None);
        assert_eq!(positive_u32(Some(f64::NAN)), None);
        assert_eq!(positive_u32(None), None);
    }

    #[test]
    fn test_positive_u64() {
        assert_eq!(positive_u64(Some(1_048_576.0)), Some(1_048_576));
        assert_eq!(positive_u64(Some(0.0)), None);
        assert_eq!(positive_u64(Some(-1.0)), None);
    }

    #[test]
    fn test_present_codec() {
        assert_eq!(present_codec(Some("avc1.64001F")).as_deref(), Some("avc1.64001F"));
        assert_eq!(present_codec(Some("none")), None);
        assert_eq!(present_codec(Some("")), None);
        assert_eq!(present_codec(None), None);
    }

    #[test]
    fn test_deserialize_nulls_and_missing_fields() {
        let raw: RawFormat = serde_json::from_value(json!({
            "format_id": "137",
            "height": null,
            "fps": 30,
            "vcodec": "avc1"
        }))
        .unwrap();

        assert_eq!(raw.format_id.as_deref(), Some("137"));
        assert_eq!(raw.height, None);
        assert_eq!(raw.fps, Some(30.0));
        assert_eq!(raw.ext, None);
    }

    #[test]
    fn test_deserialize_coerces_numeric_id_and_numeric_strings() {
        let raw: RawFormat = serde_json::from_value(json!({
            "format_id": 137,
            "height": "720",
            "fps": " 29.97 ",
            "filesize": "1048576",
            "vcodec": "avc1"
        }))
        .unwrap();

        assert_eq!(raw.format_id.as_deref(), Some("137"));
        assert_eq!(raw.height, Some(720.0));
        assert_eq!(raw.fps, Some(29.97));
        assert_eq!(raw.filesize, Some(1_048_576.0));
    }

    #[test]
    fn test_deserialize_unexpected_types_become_absent() {
        let raw: RawFormat = serde_json::from_value(json!({
            "format_id": ["137"],
            "height": "tall",
            "width": {"px": 1920},
            "fps": true,
            "ext": null,
            "vcodec": "avc1"
        }))
        .unwrap();

        assert_eq!(raw.format_id, None);
        assert_eq!(raw.height, None);
        assert_eq!(raw.width, None);
        assert_eq!(raw.fps, None);
        assert_eq!(raw.ext, None);
        assert_eq!(raw.vcodec.as_deref(), Some("avc1"));
    }

    #[test]
    fn test_deserialize_non_object_fails() {
        assert!(serde_json::from_value::<RawFormat>(json!("not an object")).is_err());
        assert!(serde_json::from_value::<RawFormat>(json!(42)).is_err());
    }
}
