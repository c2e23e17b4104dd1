use std::io::BufRead;

use anyhow::Result;
use chrono::Utc;

use crate::calc::{availability, classify};
use crate::config::Settings;
use crate::history::{HistoryStore, KvStore};
use crate::models::HistoryEntry;
use crate::render::DisplaySink;
use crate::report::summarize;
use crate::validate::{parse_number, validate};

/// Interactive prompt loop. All collaborators are injected: lines come
/// from `input`, everything shown goes through `sink`, persistence through
/// `history`. The loop never exits on bad input; only `quit` or EOF end it.
pub fn run_session<R, S, D>(
    input: &mut R,
    sink: &mut D,
    history: &mut HistoryStore<S>,
    settings: &Settings,
) -> Result<()>
where
    R: BufRead,
    S: KvStore,
    D: DisplaySink,
{
    sink.info("Availability coefficient calculator.");
    sink.info("Enter Tn to start a calculation; 'history', 'report', 'clear' and 'quit' also work.");
    sink.show_history(&history.load());

    loop {
        sink.info("Tn (up time):");
        let Some(line) = read_line(input)? else { break };
        match line.trim() {
            "quit" | "exit" | "q" => break,
            "history" => {
                sink.show_history(&history.load());
                continue;
            }
            "report" => {
                show_report(sink, history);
                continue;
            }
            "clear" => {
                clear_with_confirmation(input, sink, history)?;
                continue;
            }
            _ => {}
        }

        sink.info("Tv (down time):");
        let Some(raw_tv) = read_line(input)? else { break };
        calculate_once(&line, &raw_tv, sink, history, settings)?;
    }

    Ok(())
}

/// A single pass: validate, calculate, append, render. Shared by the
/// interactive loop and the `calc` subcommand. Input and domain errors are
/// rendered and swallowed; only persistence failures propagate.
pub fn calculate_once<S, D>(
    raw_tn: &str,
    raw_tv: &str,
    sink: &mut D,
    history: &mut HistoryStore<S>,
    settings: &Settings,
) -> Result<()>
where
    S: KvStore,
    D: DisplaySink,
{
    let report = validate(raw_tn, raw_tv, settings.strict_positive_tn);
    if !report.valid {
        // the form showed the first offending field's message; keep that
        if let Some(error) = report.errors.first() {
            sink.show_field_error(error);
        }
        return Ok(());
    }

    let (Some(tn), Some(tv)) = (parse_number(raw_tn), parse_number(raw_tv)) else {
        return Ok(());
    };

    match availability(tn, tv) {
        Err(e) => sink.show_calc_error(&e),
        Ok(kg) => {
            let tier = classify(kg);
            sink.show_result(kg, tier);
            let entry =
                HistoryEntry::record(tn, tv, kg, tier, Utc::now(), settings.store_raw_timestamp);
            history.append(entry)?;
            sink.show_history(&history.load());
        }
    }
    Ok(())
}

/// Clearing is destructive, so it always asks first. Anything but an
/// explicit yes keeps the log.
pub fn clear_with_confirmation<R, S, D>(
    input: &mut R,
    sink: &mut D,
    history: &mut HistoryStore<S>,
) -> Result<()>
where
    R: BufRead,
    S: KvStore,
    D: DisplaySink,
{
    sink.info("Clear all history? [y/N]");
    let Some(answer) = read_line(input)? else {
        return Ok(());
    };
    if matches!(answer.trim(), "y" | "Y" | "yes" | "YES") {
        history.clear()?;
        sink.show_history(&history.load());
    } else {
        sink.info("Keeping history.");
    }
    Ok(())
}

pub fn show_report<S, D>(sink: &mut D, history: &HistoryStore<S>)
where
    S: KvStore,
    D: DisplaySink,
{
    match summarize(&history.load()) {
        Some(summary) => sink.show_summary(&summary),
        None => sink.info("No data to report."),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
