use crate::errors::Result;
use crate::grammar::Grammar;
use crate::parsers::lr::slr::ParseTable;

/// Outputs summary information about a grammar
pub fn output(g: &Grammar) -> Result<()> {
    let width = 24;

    println!(
        "{:w$}: {}",
        "Number of productions",
        g.num_productions(),
        w = width
    );
    println!(
        "{:w$}: {}",
        "Number of non-terminals",
        g.non_terminal_ids().len(),
        w = width
    );
    println!(
        "{:w$}: {}",
        "Number of terminals",
        g.terminal_ids().len(),
        w = width
    );
    println!(
        "{:w$}: {}",
        "Start symbol",
        g.symbol_name(g.start()),
        w = width
    );

    let table = ParseTable::new(g.augment()?);
    println!("{:w$}: {}", "Number of states", table.num_states(), w = width);
    if table.is_slr1() {
        println!("{:w$}: true", "SLR(1)", w = width);
    } else {
        println!(
            "{:w$}: false ({} conflicts)",
            "SLR(1)",
            table.conflicts().len(),
            w = width
        );
    }

    Ok(())
}
