use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One previously generated QR code.
///
/// Field names on the wire match the persisted `qrHistorial` blob so existing
/// histories (and exported files) stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub link: String,
    #[serde(rename = "qrData")]
    pub image_data: String,
    #[serde(rename = "fecha", with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Never incremented; kept so the blob layout is preserved.
    #[serde(rename = "visitas", default)]
    pub visit_count: u32,
}

impl HistoryEntry {
    /// Builds an entry stamped with the current time and zero visits.
    pub fn new(link: &str, image_data: &str) -> Self {
        Self::with_timestamp(link, image_data, Utc::now())
    }

    pub fn with_timestamp(link: &str, image_data: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            link: link.to_string(),
            image_data: image_data.to_string(),
            created_at,
            visit_count: 0,
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2024-05-01T10:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
