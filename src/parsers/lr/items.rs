use crate::grammar::{Grammar, Symbol, EMPTY};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

pub type ItemSet = std::collections::HashSet<Item>;

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
/// An LR(0) item
pub struct Item {
    pub dot: usize,
    pub production: usize,
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.production, &self.dot).cmp(&(other.production, &other.dot))
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Item {
    /// Returns a new item for a given production with the dot at the left
    pub fn new_production(p: usize) -> Item {
        Item {
            dot: 0,
            production: p,
        }
    }

    /// Returns a copy of the item with the dot advanced one position. The
    /// production is not checked to ensure the advanced position is valid.
    pub fn advance(&self) -> Item {
        Item {
            dot: self.dot + 1,
            production: self.production,
        }
    }

    /// Returns true if the dot is at the right. An item for an ϵ-production
    /// is complete as soon as it is created, since its body is empty.
    pub fn is_end(&self, g: &Grammar) -> bool {
        self.dot == g.production(self.production).body.len()
    }

    /// Formats an item in the form "E -> E . + T"
    pub fn format(&self, g: &Grammar) -> String {
        let production = g.production(self.production);

        let mut parts: Vec<&str> = Vec::with_capacity(production.body.len() + 1);
        for (i, symbol) in production.body.iter().enumerate() {
            if i == self.dot {
                parts.push(".");
            }
            parts.push(g.symbol_name(symbol.id()));
        }
        if self.dot == production.body.len() {
            if production.body.is_empty() {
                parts.push(EMPTY);
            }
            parts.push(".");
        }

        format!("{} -> {}", g.symbol_name(production.head), parts.join(" "))
    }
}

/// A hashable ItemSet, suitable for keying states by item-set content
pub struct ItemStateSet(pub ItemSet);

impl PartialEq for ItemStateSet {
    fn eq(&self, other: &ItemStateSet) -> bool {
        self.0.is_subset(&other.0) && other.0.is_subset(&self.0)
    }
}

impl Eq for ItemStateSet {}

impl Hash for ItemStateSet {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        let mut a: Vec<&Item> = self.0.iter().collect();
        a.sort();
        for s in a.iter() {
            s.hash(state);
        }
    }
}

/// The canonical collection of sets of LR(0) items for an augmented grammar,
/// along with the transition function between item sets. State 0 is the
/// closure of the start item, and states are numbered in discovery order
/// over symbols in symbol table order, so two constructions from the same
/// grammar always agree.
pub struct Automaton {
    pub states: Vec<ItemSet>,
    pub transitions: Vec<Vec<Option<usize>>>,
}

impl Automaton {
    /// Returns the canonical collection of sets of LR(0) items for the given
    /// augmented grammar
    pub fn new(g: &Grammar) -> Automaton {
        canonical_collection(g)
    }

    /// Returns the number of states in the automaton
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns GOTO(state, symbol), if the transition is defined
    pub fn goto(&self, state: usize, symbol: Symbol) -> Option<usize> {
        self.transitions[state][symbol.id()]
    }
}

/// Returns the canonical collection of sets of LR(0) items for the given
/// augmented grammar
fn canonical_collection(g: &Grammar) -> Automaton {
    // Algorithm adapted from Aho et al (2007) p.246

    let start_set = closure(
        g,
        &ItemSet::from([Item::new_production(
            g.productions_for_non_terminal(g.start())[0],
        )]),
    );

    // States are identified by their item-set content, not by construction
    // order, so item sets reached along different exploration paths merge
    // into one state
    let mut seen: IndexMap<ItemStateSet, usize> = IndexMap::new();
    seen.insert(ItemStateSet(start_set.clone()), 0);

    let mut states: Vec<ItemSet> = vec![start_set];
    let mut transitions: Vec<Vec<Option<usize>>> = vec![vec![None; g.symbols().len()]];

    // For each state and each grammar symbol X, if GOTO(state, X) is not
    // empty and not already in the collection, add it as a new state. Newly
    // added states are appended to the work list, so the loop terminates
    // once every state has been expanded over every symbol.
    let mut state = 0;
    while state < states.len() {
        for symbol in g.symbols() {
            let set = goto_set(g, &states[state], *symbol);
            if set.is_empty() {
                continue;
            }

            let state_set = ItemStateSet(set.clone());
            let set_index = if let Some(index) = seen.get(&state_set) {
                // Just return the next state index if we've seen it before
                *index
            } else {
                // Otherwise add the state and return the new index
                states.push(set);
                transitions.push(vec![None; g.symbols().len()]);
                seen.insert(state_set, states.len() - 1);

                states.len() - 1
            };

            transitions[state][symbol.id()] = Some(set_index);
        }

        state += 1;
    }

    Automaton {
        states,
        transitions,
    }
}

/// Returns CLOSURE(items)
pub fn closure(g: &Grammar, items: &ItemSet) -> ItemSet {
    // Algorithm adapted from Aho et al (2007) p.243

    let mut closure = ItemSet::new();
    let mut seen: HashSet<usize> = HashSet::new();

    // First, add every item in items to CLOSURE(items)
    for item in items {
        closure.insert(*item);
    }

    // If A → 𝛼·B𝛽 is in CLOSURE(items) and B → 𝛾 is a production, then add
    // the item B → ·𝛾 to CLOSURE(items) if it is not already there. Apply
    // this rule until no more new items can be added to CLOSURE(items).
    let mut count = closure.len();
    loop {
        // Iterate through all items currently in CLOSURE(items)
        for item in Vec::from_iter(closure.clone()) {
            if item.is_end(g) {
                continue;
            }

            // If there is a non-terminal B after the dot, add B → ·𝛾 to
            // CLOSURE(items) for all productions of B if we haven't
            // previously added the productions for B. Do nothing for
            // terminals.
            if let Symbol::NonTerminal(nt) = g.production(item.production).body[item.dot] {
                if !seen.contains(&nt) {
                    for production in g.productions_for_non_terminal(nt) {
                        closure.insert(Item::new_production(*production));
                    }
                    seen.insert(nt);
                }
            }
        }

        // Loop until no more new items can be added to CLOSURE(items)
        let new_count = closure.len();
        if new_count == count {
            break;
        }
        count = new_count;
    }

    closure
}

/// Returns GOTO(items, s). An empty result means the transition is undefined.
pub fn goto_set(g: &Grammar, items: &ItemSet, s: Symbol) -> ItemSet {
    // Algorithm adapted from Aho et al (2007) p.246

    // GOTO(items, s) is defined to be the closure of the set of all items
    // A → 𝛼X·𝛽 such that A → 𝛼·X𝛽 is in items, with X = s.
    let mut goto = ItemSet::new();
    for item in items {
        if !item.is_end(g) && g.production(item.production).body[item.dot] == s {
            goto.insert(item.advance());
        }
    }

    if goto.is_empty() {
        goto
    } else {
        closure(g, &goto)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_advance() {
        let item = Item::new_production(0);
        assert_eq!(item.dot, 0);

        let item = item.advance();
        assert_eq!(item.dot, 1);
    }

    #[test]
    fn test_is_end() -> crate::errors::Result<()> {
        let g = crate::test::expr_grammar().augment()?;

        // E -> E + T
        let mut item = Item::new_production(1);
        for _ in 0..g.production(1).body.len() {
            assert!(!item.is_end(&g));
            item = item.advance();
        }
        assert!(item.is_end(&g));

        Ok(())
    }

    #[test]
    fn test_is_end_empty_production() -> crate::errors::Result<()> {
        let g = Grammar::new("S -> A ; A -> a | ε")?;

        // A -> ε is complete with the dot at the left
        let item = Item::new_production(2);
        assert!(item.is_end(&g));

        Ok(())
    }

    #[test]
    fn test_format() -> crate::errors::Result<()> {
        let g = crate::test::expr_grammar().augment()?;

        let item = Item::new_production(1);
        assert_eq!(item.format(&g), "E -> . E + T");
        assert_eq!(item.advance().format(&g), "E -> E . + T");
        assert_eq!(item.advance().advance().format(&g), "E -> E + . T");
        assert_eq!(
            item.advance().advance().advance().format(&g),
            "E -> E + T ."
        );

        let g = Grammar::new("S -> A ; A -> a | ε")?;
        assert_eq!(Item::new_production(2).format(&g), "A -> ε .");

        Ok(())
    }

    #[test]
    fn test_state_set() {
        let first = ItemSet::from([Item::new_production(0), Item::new_production(1)]);
        let second = ItemSet::from([Item::new_production(2), Item::new_production(3)]);

        let mut state_set: HashSet<ItemStateSet> = HashSet::new();
        state_set.insert(ItemStateSet(first.clone()));

        assert!(state_set.contains(&ItemStateSet(first)));
        assert!(!state_set.contains(&ItemStateSet(second)));
    }

    #[test]
    fn test_closure() -> crate::errors::Result<()> {
        let g = crate::test::expr_grammar().augment()?;

        // CLOSURE({[E' -> . E]}) adds every production with the dot at the
        // left, since E, T and F are all reachable through non-terminals
        // immediately after the dot
        let set = closure(&g, &ItemSet::from([Item::new_production(0)]));
        assert_eq!(
            set,
            ItemSet::from_iter((0..7).map(Item::new_production)),
        );

        Ok(())
    }

    #[test]
    fn test_goto_set() -> crate::errors::Result<()> {
        let g = crate::test::expr_grammar().augment()?;
        let e = Symbol::NonTerminal(g.maybe_non_terminal_index("E").unwrap());
        let plus = Symbol::Terminal(g.maybe_terminal_index("+").unwrap());

        let start = closure(&g, &ItemSet::from([Item::new_production(0)]));

        // GOTO(I0, E) holds [E' -> E .] and [E -> E . + T]
        let set = goto_set(&g, &start, e);
        assert_eq!(
            set,
            ItemSet::from([
                Item {
                    dot: 1,
                    production: 0,
                },
                Item {
                    dot: 1,
                    production: 1,
                },
            ])
        );

        // GOTO on a symbol with no dotted occurrence is undefined
        assert!(goto_set(&g, &set, e).is_empty());

        // GOTO(GOTO(I0, E), +) re-opens the T and F productions
        let set = goto_set(&g, &set, plus);
        assert_eq!(
            set,
            ItemSet::from([
                Item {
                    dot: 2,
                    production: 1,
                },
                Item::new_production(3),
                Item::new_production(4),
                Item::new_production(5),
                Item::new_production(6),
            ])
        );

        Ok(())
    }

    #[test]
    fn test_canonical_collection() -> crate::errors::Result<()> {
        // Grammar and test cases taken from Aho et al (2007) p.244: the
        // augmented expression grammar has exactly twelve states
        let g = crate::test::expr_grammar().augment()?;
        let automaton = Automaton::new(&g);

        assert_eq!(automaton.num_states(), 12);

        let e = Symbol::NonTerminal(g.maybe_non_terminal_index("E").unwrap());
        let t = Symbol::NonTerminal(g.maybe_non_terminal_index("T").unwrap());
        let f = Symbol::NonTerminal(g.maybe_non_terminal_index("F").unwrap());
        let lparen = Symbol::Terminal(g.maybe_terminal_index("(").unwrap());
        let id = Symbol::Terminal(g.maybe_terminal_index("id").unwrap());

        // State 0 is CLOSURE({[E' -> . E]})
        assert_eq!(
            automaton.states[0],
            ItemSet::from_iter((0..7).map(Item::new_production)),
        );

        // Exploration from state 0 in symbol table order: E, T, F, then the
        // terminals ( and id
        assert_eq!(automaton.goto(0, e), Some(1));
        assert_eq!(automaton.goto(0, t), Some(2));
        assert_eq!(automaton.goto(0, f), Some(3));
        assert_eq!(automaton.goto(0, lparen), Some(4));
        assert_eq!(automaton.goto(0, id), Some(5));

        // ( re-opens the expression productions, and converges back on the
        // same states for T and F by item-set content
        assert_eq!(automaton.goto(4, t), Some(2));
        assert_eq!(automaton.goto(4, f), Some(3));
        assert_eq!(automaton.goto(4, lparen), Some(4));
        assert_eq!(automaton.goto(4, id), Some(5));

        Ok(())
    }

    #[test]
    fn test_canonical_collection_idempotent() -> crate::errors::Result<()> {
        let first = Automaton::new(&crate::test::expr_grammar().augment()?);
        let second = Automaton::new(&crate::test::expr_grammar().augment()?);

        assert_eq!(first.states, second.states);
        assert_eq!(first.transitions, second.transitions);

        Ok(())
    }
}
