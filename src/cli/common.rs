use crate::grammar::{FirstItem, FollowItem, Grammar, EMPTY, END_OF_INPUT};
use crate::parsers::lr::TableEntry;
use crate::parsers::InputSymbol;

/// Returns the names of the elements of a FIRST set, sorted, with ϵ last
pub fn first_names(g: &Grammar, i: usize) -> Vec<String> {
    let mut names: Vec<String> = g
        .first(i)
        .iter()
        .filter_map(|item| match item {
            FirstItem::Terminal(t) => Some(g.symbol_name(*t).to_string()),
            FirstItem::Empty => None,
        })
        .collect();
    names.sort();

    if g.first(i).contains(&FirstItem::Empty) {
        names.push(EMPTY.to_string());
    }

    names
}

/// Returns the names of the elements of a FOLLOW set, sorted, with the
/// end-of-input marker last
pub fn follow_names(g: &Grammar, i: usize) -> Vec<String> {
    let mut names: Vec<String> = g
        .follow(i)
        .iter()
        .filter_map(|item| match item {
            FollowItem::Terminal(t) => Some(g.symbol_name(*t).to_string()),
            FollowItem::EndOfInput => None,
        })
        .collect();
    names.sort();

    if g.follow(i).contains(&FollowItem::EndOfInput) {
        names.push(END_OF_INPUT.to_string());
    }

    names
}

/// Returns the display name for an input symbol
pub fn input_symbol_name(g: &Grammar, symbol: InputSymbol) -> String {
    match symbol {
        InputSymbol::Terminal(t) => g.symbol_name(t).to_string(),
        InputSymbol::EndOfInput => END_OF_INPUT.to_string(),
    }
}

/// Formats a table entry the way it appears in a table cell: "s4" for a
/// shift, "r2" for a reduce, "acc" for accept, the bare state for a goto,
/// and blank for error
pub fn format_entry(entry: TableEntry) -> String {
    match entry {
        TableEntry::Shift(s) => format!("s{}", s),
        TableEntry::Reduce(p) => format!("r{}", p),
        TableEntry::Goto(s) => format!("{}", s),
        TableEntry::Accept => "acc".to_string(),
        TableEntry::Error => String::new(),
    }
}

/// Describes a table entry in full, for conflict reports
pub fn describe_entry(g: &Grammar, entry: TableEntry) -> String {
    match entry {
        TableEntry::Shift(s) => format!("shift {}", s),
        TableEntry::Reduce(p) => format!("reduce {}", g.format_production(p)),
        TableEntry::Goto(s) => format!("goto {}", s),
        TableEntry::Accept => "accept".to_string(),
        TableEntry::Error => "error".to_string(),
    }
}
