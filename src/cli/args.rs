use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Command line options for the slr tool
pub struct Options {
    /// Path to a grammar file
    pub grammar: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
/// Commands for the slr tool
pub enum Commands {
    /// Output FIRST sets for all non-terminals
    First,
    /// Output FOLLOW sets for all non-terminals
    Follow,
    /// Output the canonical collection of sets of LR(0) items
    Collection,
    /// Output the SLR parsing table and any conflicts
    Table,
    /// Parse an input string of whitespace-delimited terminals
    Parse {
        #[arg(long)]
        input: String,
    },
}
