use super::common;
use crate::grammar::Grammar;

/// Outputs FIRST(A) for every non-terminal
pub fn output(g: &Grammar) {
    for i in g.non_terminal_ids() {
        println!(
            "FIRST({}) = {{ {} }}",
            g.symbol_name(*i),
            common::first_names(g, *i).join(", ")
        );
    }
}
