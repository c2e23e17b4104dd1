use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute Kg for one Tn/Tv pair and append it to the history.
    Calc {
        /// Up time
        tn: String,
        /// Down/repair time
        tv: String,
    },
    /// Print the persisted calculation history.
    History,
    /// Remove all persisted history (asks for confirmation).
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Summary statistics over the persisted history.
    Report,
}
