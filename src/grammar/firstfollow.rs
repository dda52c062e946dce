use super::symboltable::SymbolTable;
use super::{Production, Symbol};
use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy, PartialOrd, Ord)]
/// An item in a FIRST set
pub enum FirstItem {
    Terminal(usize),
    Empty,
}

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy, PartialOrd, Ord)]
/// An item in a FOLLOW set
pub enum FollowItem {
    Terminal(usize),
    EndOfInput,
}

/// Builds FIRST and FOLLOW sets for a context-free grammar
pub struct Builder<'b> {
    pub firsts: Vec<HashSet<FirstItem>>,
    pub follows: IndexMap<usize, HashSet<FollowItem>>,
    productions: &'b [Production],
    start: usize,
}

impl<'b> Builder<'b> {
    /// Returns a new builder with FIRST and FOLLOW fully calculated
    pub fn new(
        symbol_table: &'b SymbolTable,
        productions: &'b [Production],
        start: usize,
    ) -> Builder<'b> {
        // Build empty FIRST and FOLLOW sets
        let firsts: Vec<_> = (0..symbol_table.len())
            .map(|_| HashSet::<FirstItem>::new())
            .collect();

        let mut follows: IndexMap<usize, HashSet<FollowItem>> = IndexMap::new();
        for i in symbol_table.non_terminal_ids() {
            follows.insert(*i, HashSet::new());
        }

        let mut b = Builder {
            firsts,
            follows,
            productions,
            start,
        };

        // Calculate FIRST and FOLLOW
        b.calculate_firsts(symbol_table);
        b.calculate_follows();

        b
    }

    /// Calculates FIRST(symbol) for all grammar symbols
    fn calculate_firsts(&mut self, symbol_table: &SymbolTable) {
        // This algorithm is adapted from Aho et al (2007) p.221

        // Calculate FIRST for terminals separately, as these sets never change
        // and only need to be calculated once
        for i in symbol_table.terminal_ids() {
            self.firsts[*i].insert(FirstItem::Terminal(*i));
        }

        // Then calculate FIRST for non-terminals. This is an iterative process
        // since non-terminal productions can refer to other non-terminals and
        // to themselves. We continue iterating through this loop until no more
        // elements are added to any FIRST set, at which point no additional
        // iterations will add any more elements, either.
        let mut count = 0;
        loop {
            // Update FIRST for each production.
            for id in 0..self.productions.len() {
                self.first_production(id);
            }

            // Terminate the loop if no elements were added to any FIRST set
            let this_count = self.firsts.iter().map(|set| set.len()).sum();
            if this_count == count {
                break;
            }

            count = this_count;
        }
    }

    /// Updates FIRST(non_terminal) with elements of FIRST(production)
    fn first_production(&mut self, id: usize) {
        for symbol in self.productions[id].body.iter() {
            // If FIRST(symbol) does not contain ϵ, subsequent symbols cannot
            // contribute to FIRST(production), so return
            if !self.first_symbol(self.productions[id].head, symbol) {
                return;
            }
        }

        // If FIRST(symbol) contains ϵ for all symbols in this production, or
        // if the body is the empty ϵ-production, then FIRST(production), and
        // therefore FIRST(non_terminal), also contains ϵ
        self.firsts[self.productions[id].head].insert(FirstItem::Empty);
    }

    /// Updates FIRST(non_terminal) with non-ϵ elements of FIRST(symbol).
    /// Returns true if FIRST(symbol) does contain ϵ.
    fn first_symbol(&mut self, non_terminal: usize, symbol: &Symbol) -> bool {
        let mut additions: HashSet<FirstItem> = HashSet::new();
        let mut has_empty = false;

        match symbol {
            Symbol::NonTerminal(n) | Symbol::Terminal(n) => {
                for item in self.firsts[*n].iter() {
                    match item {
                        FirstItem::Empty => {
                            has_empty = true;
                        }
                        FirstItem::Terminal(t) => {
                            additions.insert(FirstItem::Terminal(*t));
                        }
                    }
                }
            }
        }

        self.firsts[non_terminal].extend(additions);

        has_empty
    }

    /// Returns FIRST(symbols) excluding ϵ. If FIRST(symbols) does include ϵ
    /// (in particular, if symbols is empty), the second return value is true.
    pub fn first_sequence(&self, symbols: &[Symbol]) -> (HashSet<FirstItem>, bool) {
        let mut set: HashSet<FirstItem> = HashSet::new();

        for symbol in symbols {
            // If FIRST(symbol) does not include ϵ then no later symbol in the
            // sequence can influence FIRST(symbols), so return
            match symbol {
                Symbol::Terminal(n) | Symbol::NonTerminal(n) => {
                    if !self.first_excluding_e(*n, &mut set) {
                        return (set, false);
                    }
                }
            }
        }

        (set, true)
    }

    /// Adds all elements of FIRST(symbol) to set, excluding ϵ. Returns
    /// true if ϵ is in FIRST(symbol).
    fn first_excluding_e(&self, symbol: usize, set: &mut HashSet<FirstItem>) -> bool {
        let mut has_empty = false;

        for item in &self.firsts[symbol] {
            match item {
                FirstItem::Empty => {
                    has_empty = true;
                }
                _ => {
                    set.insert(*item);
                }
            }
        }

        has_empty
    }

    /// Calculates FOLLOW sets for all non-terminals
    fn calculate_follows(&mut self) {
        // This algorithm is adapted from Aho et al (2007) p.221-222

        // Insert end-of-input into the FOLLOW set for the start symbol
        self.follows
            .get_mut(&self.start)
            .unwrap()
            .insert(FollowItem::EndOfInput);

        let mut count = 1;
        loop {
            // Update FOLLOW sets for each production.
            for id in 0..self.productions.len() {
                self.follow_production(id);
            }

            // Terminate the loop if no elements were added to any FOLLOW set
            let this_count = self.follows.values().map(|s| s.len()).sum();
            if this_count == count {
                break;
            }

            count = this_count;
        }
    }

    /// Updates FOLLOW sets from a given production
    fn follow_production(&mut self, id: usize) {
        let production = &self.productions[id];

        // If there is a production A → 𝛼B𝛽, then everything in FIRST(𝛽)
        // except ϵ is in FOLLOW(B). Further, if 𝛽 is empty or FIRST(𝛽)
        // contains ϵ, then everything in FOLLOW(A) is in FOLLOW(B). The
        // empty suffix is reported as nullable by first_sequence, so both
        // rules are applied in a single pass over the body.
        for i in 0..production.body.len() {
            let Symbol::NonTerminal(b) = production.body[i] else {
                // We only calculate FOLLOW for non-terminals
                continue;
            };

            let (first_rest, nullable) = self.first_sequence(&production.body[(i + 1)..]);
            let follow_b = self.follows.get_mut(&b).unwrap();
            for item in first_rest {
                let FirstItem::Terminal(t) = item else {
                    // first_sequence never returns ϵ itself
                    continue;
                };
                follow_b.insert(FollowItem::Terminal(t));
            }

            // Adding FOLLOW(A) to FOLLOW(B) when A == B would be a no-op
            if nullable && b != production.head {
                let follow_head = self.follows.get(&production.head).unwrap().clone();
                self.follows.get_mut(&b).unwrap().extend(follow_head);
            }
        }
    }
}
