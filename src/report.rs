use statistical::{mean, median};

use crate::calc::classify;
use crate::models::{HistoryEntry, HistorySummary, StatusTier};

/// Summary statistics over the persisted log. Returns `None` for an empty
/// log so callers can render a "no data" line instead of a zeroed report.
pub fn summarize(log: &[HistoryEntry]) -> Option<HistorySummary> {
    if log.is_empty() {
        return None;
    }

    let kgs: Vec<f64> = log.iter().map(|entry| entry.kg).collect();
    let mut sorted = kgs.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut high_reliability = 0;
    let mut satisfactory = 0;
    let mut low_reliability = 0;
    for kg in &kgs {
        match classify(*kg) {
            StatusTier::HighReliability => high_reliability += 1,
            StatusTier::Satisfactory => satisfactory += 1,
            StatusTier::LowReliability => low_reliability += 1,
        }
    }

    Some(HistorySummary {
        entries: log.len(),
        mean_kg: mean(&kgs),
        median_kg: median(&kgs),
        min_kg: sorted[0],
        max_kg: sorted[sorted.len() - 1],
        high_reliability,
        satisfactory,
        low_reliability,
    })
}
