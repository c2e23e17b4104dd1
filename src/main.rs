use anyhow::Result;
use clap::Parser;

use kgcalc::cli::{Cli, Command};
use kgcalc::config::load_settings;
use kgcalc::history::{HistoryStore, JsonFileStore};
use kgcalc::render::{ConsoleSink, DisplaySink};
use kgcalc::session;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings()?;

    let store = JsonFileStore::new(&settings.state_dir);
    let mut history = HistoryStore::new(store);
    let mut sink = ConsoleSink;

    let stdin = std::io::stdin();

    match cli.command {
        None => {
            let mut input = stdin.lock();
            session::run_session(&mut input, &mut sink, &mut history, &settings)
        }
        Some(Command::Calc { tn, tv }) => {
            session::calculate_once(&tn, &tv, &mut sink, &mut history, &settings)
        }
        Some(Command::History) => {
            sink.show_history(&history.load());
            Ok(())
        }
        Some(Command::Clear { yes }) => {
            if yes {
                history.clear()?;
                sink.show_history(&history.load());
                Ok(())
            } else {
                let mut input = stdin.lock();
                session::clear_with_confirmation(&mut input, &mut sink, &mut history)
            }
        }
        Some(Command::Report) => {
            session::show_report(&mut sink, &history);
            Ok(())
        }
    }
}
