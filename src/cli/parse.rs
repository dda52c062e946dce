use super::common;
use crate::errors::Result;
use crate::grammar::{Grammar, END_OF_INPUT};
use crate::parsers::lr::{self, PTable, Trace, TraceAction, TraceStep};

/// Parses an input string and outputs the step-by-step trace
pub fn output(g: &Grammar, input: &str) -> Result<()> {
    let parser = lr::new_simple(g)?;
    let table = parser.table();

    if !table.is_slr1() {
        for conflict in table.conflicts() {
            println!(
                "conflict in state {} on '{}': {} kept, {} discarded",
                conflict.state,
                common::input_symbol_name(table.grammar(), conflict.lookahead),
                common::describe_entry(table.grammar(), conflict.chosen),
                common::describe_entry(table.grammar(), conflict.discarded),
            );
        }
        println!(
            "warning: grammar is not SLR(1), parsing with the tie-break table"
        );
        println!();
    }

    let trace = parser.parse(input)?;
    let g = table.grammar();

    for (step, entry) in trace.steps.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<24} {}",
            step + 1,
            format_stack(g, entry),
            format_remaining(g, &trace, entry),
            format_action(g, entry.action),
        );
    }

    println!();
    println!("input accepted");

    Ok(())
}

/// Formats the state and symbol stacks interleaved, bottom first, in the
/// form "0 E 1 + 6"
fn format_stack(g: &Grammar, step: &TraceStep) -> String {
    let mut parts: Vec<String> = vec![step.states[0].to_string()];

    for (symbol, state) in step.symbols.iter().zip(step.states.iter().skip(1)) {
        parts.push(g.symbol_name(symbol.id()).to_string());
        parts.push(state.to_string());
    }

    parts.join(" ")
}

/// Formats the unread portion of the input, with the end-of-input marker
fn format_remaining(g: &Grammar, trace: &Trace, step: &TraceStep) -> String {
    let mut parts: Vec<&str> = trace.tokens[step.cursor..]
        .iter()
        .map(|t| g.symbol_name(*t))
        .collect();
    parts.push(END_OF_INPUT);

    parts.join(" ")
}

/// Formats the action taken in a step
fn format_action(g: &Grammar, action: TraceAction) -> String {
    match action {
        TraceAction::Shift(state) => format!("shift {}", state),
        TraceAction::Reduce(p) => format!("reduce {}", g.format_production(p)),
        TraceAction::Accept => "accept".to_string(),
    }
}
