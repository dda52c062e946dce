use super::items::{Automaton, Item};
use super::{PTable, TableEntry};
use crate::grammar::{FollowItem, Grammar, Symbol};
use crate::parsers::InputSymbol;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// A cell to which two distinct actions were assigned. The table keeps the
/// chosen entry purely so downstream consumers have a defined value; any
/// recorded conflict means the grammar is not SLR(1).
pub struct Conflict {
    pub state: usize,
    pub lookahead: InputSymbol,
    pub chosen: TableEntry,
    pub discarded: TableEntry,
}

/// A parse table for a simple LR parser. Conflicts are recorded as data
/// rather than raised as errors, so a non-SLR(1) grammar still yields an
/// inspectable table.
pub struct ParseTable {
    grammar: Grammar,
    actions: Vec<Vec<TableEntry>>,
    eof_index: usize,
    conflicts: Vec<Conflict>,
}

impl PTable for ParseTable {
    fn action(&self, state: usize, lookahead: usize) -> TableEntry {
        self.actions[state][lookahead]
    }

    fn eof_index(&self) -> usize {
        self.eof_index
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }
}

impl ParseTable {
    /// Builds the SLR parse table for the given augmented grammar
    pub fn new(grammar: Grammar) -> ParseTable {
        // Algorithm adapted from Aho et al (2007) p.265

        let automaton = Automaton::new(&grammar);

        // One column per grammar symbol, plus a trailing column for the
        // end-of-input marker
        let eof_index = grammar.symbols().len();
        let mut actions: Vec<Vec<TableEntry>> =
            vec![vec![TableEntry::Error; eof_index + 1]; automaton.num_states()];

        // Add SHIFT and GOTO entries straight from the automaton transitions
        for state in 0..automaton.num_states() {
            for symbol in grammar.symbols() {
                let Some(to) = automaton.goto(state, *symbol) else {
                    continue;
                };

                actions[state][symbol.id()] = match symbol {
                    Symbol::Terminal(_) => TableEntry::Shift(to),
                    Symbol::NonTerminal(_) => TableEntry::Goto(to),
                };
            }
        }

        let mut table = ParseTable {
            grammar,
            actions,
            eof_index,
            conflicts: Vec::new(),
        };

        // Add ACCEPT and REDUCE actions from the complete items of each
        // state. Items are visited in production order so that conflict
        // resolution is deterministic.
        for (state, items) in automaton.states.iter().enumerate() {
            let mut complete: Vec<&Item> = items.iter().filter(|i| i.is_end(&table.grammar)).collect();
            complete.sort();

            for item in complete {
                table.add_reductions(state, item);
            }
        }

        table
    }

    /// Adds a REDUCE entry for the given complete item to the table for
    /// every element of FOLLOW(head). If the item is for the augmented start
    /// symbol, add a single ACCEPT entry on end-of-input instead.
    fn add_reductions(&mut self, from: usize, item: &Item) {
        // If [A → 𝛼·] is in Ii, then set ACTION[i, a] to "reduce A → 𝛼" for
        // all a in FOLLOW(A). If [S' → S·] is in Ii where S' is the start
        // symbol, then set ACTION[i, a] to "accept", where a is the
        // end-of-input marker.
        let head = self.grammar.production(item.production).head;

        if head == self.grammar.start() {
            self.set_action(from, InputSymbol::EndOfInput, TableEntry::Accept);
            return;
        }

        let mut follows: Vec<FollowItem> = self.grammar.follow(head).iter().copied().collect();
        follows.sort();

        for follow in follows {
            self.set_action(
                from,
                InputSymbol::from_follow_item(follow),
                TableEntry::Reduce(item.production),
            );
        }
    }

    /// Sets a single ACTION entry, recording a conflict if the cell was
    /// already assigned a different action. The entry already in the cell
    /// wins: entries are added shifts first, then reductions in production
    /// order, so a shift beats a reduce and the first-found reduce beats a
    /// later one. This tie-break is an implementation default for the sake
    /// of downstream table consumers, not a semantic guarantee.
    fn set_action(&mut self, from: usize, lookahead: InputSymbol, entry: TableEntry) {
        let column = match lookahead {
            InputSymbol::Terminal(t) => t,
            InputSymbol::EndOfInput => self.eof_index,
        };

        match self.actions[from][column] {
            TableEntry::Error => {
                self.actions[from][column] = entry;
            }
            existing if existing == entry => (),
            existing => {
                self.conflicts.push(Conflict {
                    state: from,
                    lookahead,
                    chosen: existing,
                    discarded: entry,
                });
            }
        }
    }

    /// Returns every conflict found while building the table
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Returns true if no conflicts were found, i.e. the grammar is SLR(1)
    pub fn is_slr1(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Returns the number of states in the table
    pub fn num_states(&self) -> usize {
        self.actions.len()
    }
}
