use crate::errors::Result;
use crate::grammar::Grammar;
use crate::parsers::lr::items::Automaton;

/// Outputs the canonical collection of sets of LR(0) items for the
/// augmented grammar
pub fn output(g: &Grammar) -> Result<()> {
    let g = g.augment()?;
    let automaton = Automaton::new(&g);
    let num_states = automaton.num_states();

    for (i, set) in automaton.states.into_iter().enumerate() {
        // Sort order for items:
        // - start symbol productions go first
        // - productions with the dot at the end go next
        // - productions with the dot not at the left go next
        // - productions with the dot at the left go next
        // - within each of the above categories, sort by production ID
        let mut items: Vec<_> = set.into_iter().collect();
        items.sort_by_key(|item| {
            (
                if g.production(item.production).head == g.start() {
                    0
                } else if item.dot >= g.production(item.production).body.len() {
                    1
                } else if item.dot != 0 {
                    2
                } else {
                    3
                },
                item.production,
            )
        });

        println!("I{}:", i);

        for item in items {
            println!("[{}]", item.format(&g));
        }

        if i != num_states - 1 {
            println!();
        }
    }

    Ok(())
}
