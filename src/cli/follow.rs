use super::common;
use crate::grammar::Grammar;

/// Outputs FOLLOW(A) for every non-terminal
pub fn output(g: &Grammar) {
    for i in g.non_terminal_ids() {
        println!(
            "FOLLOW({}) = {{ {} }}",
            g.symbol_name(*i),
            common::follow_names(g, *i).join(", ")
        );
    }
}
