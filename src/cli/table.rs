use super::common;
use crate::errors::Result;
use crate::grammar::{Grammar, END_OF_INPUT};
use crate::parsers::lr::slr::ParseTable;
use crate::parsers::lr::PTable;

/// Outputs the SLR parsing table for the augmented grammar: the production
/// legend, the ACTION/GOTO grid, and a report of every conflicting cell
pub fn output(g: &Grammar) -> Result<()> {
    let table = ParseTable::new(g.augment()?);
    let g = table.grammar();

    for p in 0..g.num_productions() {
        println!("({}) {}", p, g.format_production(p));
    }
    println!();

    // ACTION columns are the terminals plus end-of-input; GOTO columns are
    // the non-terminals, excluding the augmented start symbol
    let mut columns: Vec<(usize, String)> = Vec::new();
    for t in g.terminal_ids() {
        columns.push((*t, g.symbol_name(*t).to_string()));
    }
    columns.push((table.eof_index(), END_OF_INPUT.to_string()));
    for nt in g.non_terminal_ids() {
        if *nt != g.start() {
            columns.push((*nt, g.symbol_name(*nt).to_string()));
        }
    }

    // Size each column to its widest cell
    let widths: Vec<usize> = columns
        .iter()
        .map(|(i, name)| {
            (0..table.num_states())
                .map(|state| common::format_entry(table.action(state, *i)).len())
                .max()
                .unwrap_or(0)
                .max(name.len())
        })
        .collect();

    let state_width = format!("I{}", table.num_states() - 1).len();

    print!("{:state_width$}", "");
    for ((_, name), &width) in columns.iter().zip(&widths) {
        print!("  {:>width$}", name);
    }
    println!();

    for state in 0..table.num_states() {
        print!("{:<state_width$}", format!("I{}", state));
        for ((i, _), &width) in columns.iter().zip(&widths) {
            print!("  {:>width$}", common::format_entry(table.action(state, *i)));
        }
        println!();
    }

    if table.is_slr1() {
        println!();
        println!("grammar is SLR(1)");
    } else {
        println!();
        for conflict in table.conflicts() {
            println!(
                "conflict in state {} on '{}': {} kept, {} discarded",
                conflict.state,
                common::input_symbol_name(g, conflict.lookahead),
                common::describe_entry(g, conflict.chosen),
                common::describe_entry(g, conflict.discarded),
            );
        }
        println!(
            "grammar is not SLR(1): {} conflict(s)",
            table.conflicts().len()
        );
    }

    Ok(())
}
