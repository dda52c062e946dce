pub mod args;
mod collection;
mod common;
mod first;
mod follow;
mod info;
mod parse;
mod table;

use crate::grammar::Grammar;
use args::{Commands, Options};

/// Runs the command selected on the command line against the grammar in
/// the given file. With no command, a summary of the grammar is output.
pub fn run(options: &Options) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let g = Grammar::new_from_file(&options.grammar)?;

    match &options.command {
        None => info::output(&g)?,
        Some(Commands::First) => first::output(&g),
        Some(Commands::Follow) => follow::output(&g),
        Some(Commands::Collection) => collection::output(&g)?,
        Some(Commands::Table) => table::output(&g)?,
        Some(Commands::Parse { input }) => parse::output(&g, input)?,
    }

    Ok(())
}
