use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Format used when a timestamp is shown to the user, and when
/// `store_raw_timestamp` is off, the format written into the entry itself.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%d.%m.%y %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTier {
    HighReliability,
    Satisfactory,
    LowReliability,
}

impl StatusTier {
    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::HighReliability => "High reliability",
            StatusTier::Satisfactory => "Satisfactory",
            StatusTier::LowReliability => "Low - failure analysis required",
        }
    }

    pub fn style_tag(&self) -> &'static str {
        match self {
            StatusTier::HighReliability => "high-reliability",
            StatusTier::Satisfactory => "satisfactory",
            StatusTier::LowReliability => "low-reliability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tn,
    Tv,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Tn => write!(f, "Tn"),
            Field::Tv => write!(f, "Tv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// One persisted calculation. Field names match the stored wire format
/// exactly, so logs written by earlier versions keep round-tripping.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    pub tn: f64,
    pub tv: f64,
    pub kg: f64,
    pub status: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
}

impl HistoryEntry {
    /// Builds the record for a successful calculation. The timestamp is
    /// captured once here and never touched again; `store_raw` decides
    /// between an RFC 3339 instant (formatted at render time) and a
    /// pre-formatted local-time string stored as-is.
    pub fn record(
        tn: f64,
        tv: f64,
        kg: f64,
        tier: StatusTier,
        now: DateTime<Utc>,
        store_raw: bool,
    ) -> Self {
        let time_stamp = if store_raw {
            now.to_rfc3339()
        } else {
            now.with_timezone(&Local)
                .format(TIMESTAMP_DISPLAY_FORMAT)
                .to_string()
        };
        Self {
            tn,
            tv,
            kg,
            status: tier.label().to_string(),
            time_stamp,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistorySummary {
    pub entries: usize,
    pub mean_kg: f64,
    pub median_kg: f64,
    pub min_kg: f64,
    pub max_kg: f64,
    pub high_reliability: usize,
    pub satisfactory: usize,
    pub low_reliability: usize,
}
