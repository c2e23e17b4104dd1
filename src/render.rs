use chrono::{DateTime, Local};
use colored::*;

use crate::calc::CalcError;
use crate::models::{
    FieldError, HistoryEntry, HistorySummary, StatusTier, TIMESTAMP_DISPLAY_FORMAT,
};

/// Render target for everything the user sees. The session and the
/// one-shot commands only talk to this trait; the console implementation
/// below is the production sink, tests substitute a recording one.
pub trait DisplaySink {
    fn show_result(&mut self, kg: f64, tier: StatusTier);
    fn show_field_error(&mut self, error: &FieldError);
    fn show_calc_error(&mut self, error: &CalcError);
    fn show_history(&mut self, log: &[HistoryEntry]);
    fn show_summary(&mut self, summary: &HistorySummary);
    fn info(&mut self, message: &str);
}

/// Stored timestamps are either RFC 3339 (raw convention) or already
/// display-formatted; anything that does not parse is shown verbatim.
pub fn display_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => instant
            .with_timezone(&Local)
            .format(TIMESTAMP_DISPLAY_FORMAT)
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn paint(tier: StatusTier, text: &str) -> ColoredString {
    match tier {
        StatusTier::HighReliability => text.green(),
        StatusTier::Satisfactory => text.yellow(),
        StatusTier::LowReliability => text.red(),
    }
}

pub struct ConsoleSink;

impl DisplaySink for ConsoleSink {
    fn show_result(&mut self, kg: f64, tier: StatusTier) {
        println!(
            "Kg = {} [{}] {}",
            paint(tier, &format!("{:.4}", kg)).bold(),
            tier.style_tag(),
            paint(tier, tier.label())
        );
    }

    fn show_field_error(&mut self, error: &FieldError) {
        println!("{} {}", format!("[{}]", error.field).red(), error.message.red());
    }

    fn show_calc_error(&mut self, error: &CalcError) {
        println!("{}", error.to_string().red());
    }

    fn show_history(&mut self, log: &[HistoryEntry]) {
        if log.is_empty() {
            println!("No calculations recorded.");
            return;
        }
        println!(
            "{:>10}  {:>10}  {:>8}  {:<32}  {}",
            "Tn".bold(),
            "Tv".bold(),
            "Kg".bold(),
            "Status".bold(),
            "When".bold()
        );
        for entry in log {
            let tier = crate::calc::classify(entry.kg);
            println!(
                "{:>10}  {:>10}  {:>8}  {:<32}  {}",
                entry.tn,
                entry.tv,
                paint(tier, &format!("{:.4}", entry.kg)),
                entry.status,
                display_timestamp(&entry.time_stamp)
            );
        }
    }

    fn show_summary(&mut self, summary: &HistorySummary) {
        println!("Availability report");
        println!("-----------------");
        println!("Entries: {}", summary.entries);
        println!(
            "Kg - Min: {:.4}, Max: {:.4}, Mean: {:.4}, Median: {:.4}",
            summary.min_kg, summary.max_kg, summary.mean_kg, summary.median_kg
        );
        println!(
            "Tiers - {}: {}, {}: {}, {}: {}",
            StatusTier::HighReliability.label().green(),
            summary.high_reliability,
            StatusTier::Satisfactory.label().yellow(),
            summary.satisfactory,
            StatusTier::LowReliability.label().red(),
            summary.low_reliability
        );
    }

    fn info(&mut self, message: &str) {
        println!("{}", message);
    }
}
