mod firstfollow;
mod parser;
mod symboltable;

use crate::errors::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use symboltable::SymbolTable;

pub use firstfollow::{FirstItem, FollowItem};
pub use parser::{EMPTY, END_OF_INPUT};

/// A context-free grammar symbol
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub enum Symbol {
    NonTerminal(usize),
    Terminal(usize),
}

impl Symbol {
    /// Returns the symbol table ID of the symbol
    pub fn id(&self) -> usize {
        match self {
            Symbol::NonTerminal(i) | Symbol::Terminal(i) => *i,
        }
    }
}

/// A context-free grammar production. An ϵ-production has an empty body.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Production {
    pub head: usize,
    pub body: Vec<Symbol>,
}

/// A context-free grammar, with FIRST and FOLLOW sets calculated once at
/// construction. A grammar is immutable after construction; augmentation
/// returns a new grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    symbol_table: SymbolTable,
    nt_productions: IndexMap<usize, Vec<usize>>,
    symbols: Vec<Symbol>,
    start: usize,
    augmented: bool,
    firsts: Vec<HashSet<FirstItem>>,
    follows: IndexMap<usize, HashSet<FollowItem>>,
}

impl Grammar {
    /// Creates a context-free grammar from a string representation
    pub fn new(input: &str) -> Result<Grammar> {
        let output = parser::parse(input)?;

        Grammar::from_parts(output.symbol_table, output.productions, output.start, false)
    }

    /// Creates a context-free grammar from a string representation in a file
    /// with the given path
    pub fn new_from_file(path: &str) -> std::result::Result<Grammar, Box<dyn std::error::Error>> {
        Ok(Grammar::new(&std::fs::read_to_string(path)?)?)
    }

    /// Builds a grammar from a symbol table and validated productions, and
    /// calculates its FIRST and FOLLOW sets
    fn from_parts(
        symbol_table: SymbolTable,
        productions: Vec<Production>,
        start: usize,
        augmented: bool,
    ) -> Result<Grammar> {
        // Index productions by their head non-terminal
        let mut nt_productions: IndexMap<usize, Vec<usize>> = IndexMap::new();
        for i in symbol_table.non_terminal_ids() {
            nt_productions.insert(*i, Vec::new());
        }
        for (i, production) in productions.iter().enumerate() {
            nt_productions.get_mut(&production.head).unwrap().push(i);
        }

        // Every non-terminal must derive something, or closure and FIRST
        // calculations would have nothing to expand it with
        for (nt, prods) in &nt_productions {
            if prods.is_empty() {
                return Err(Error::NonTerminalNoProductions(
                    symbol_table.name(*nt).to_string(),
                ));
            }
        }

        let symbols: Vec<Symbol> = (0..symbol_table.len())
            .map(|i| {
                if symbol_table.is_terminal(i) {
                    Symbol::Terminal(i)
                } else {
                    Symbol::NonTerminal(i)
                }
            })
            .collect();

        let builder = firstfollow::Builder::new(&symbol_table, &productions, start);
        let firsts = builder.firsts;
        let follows = builder.follows;

        Ok(Grammar {
            productions,
            symbol_table,
            nt_productions,
            symbols,
            start,
            augmented,
            firsts,
            follows,
        })
    }

    /// Returns a new grammar augmented with a fresh start symbol S' and
    /// production S' → S, prepended to the existing productions. Fails if the
    /// synthetic start symbol is already declared, or if the grammar has
    /// already been augmented.
    pub fn augment(&self) -> Result<Grammar> {
        if self.augmented {
            return Err(Error::AlreadyAugmented);
        }

        let name = format!("{}'", self.symbol_table.name(self.start));
        if self.symbol_table.contains_name(&name) {
            return Err(Error::AugmentedStartConflict(name));
        }

        let mut symbol_table = self.symbol_table.clone();
        let start = symbol_table.add_non_terminal(&name);

        let mut productions = vec![Production {
            head: start,
            body: vec![Symbol::NonTerminal(self.start)],
        }];
        productions.extend(self.productions.iter().cloned());

        Grammar::from_parts(symbol_table, productions, start, true)
    }

    /// Returns true if the grammar has been augmented
    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Returns the ID of the start symbol
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the production with the given ID
    pub fn production(&self, i: usize) -> &Production {
        &self.productions[i]
    }

    /// Returns the number of productions in the grammar
    pub fn num_productions(&self) -> usize {
        self.productions.len()
    }

    /// Returns a sorted slice of IDs for all productions for the given
    /// non-terminal
    pub fn productions_for_non_terminal(&self, i: usize) -> &[usize] {
        self.nt_productions.get(&i).unwrap()
    }

    /// Returns a slice of all grammar symbols, in symbol table order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns a sorted slice of the IDs of all terminals
    pub fn terminal_ids(&self) -> &[usize] {
        self.symbol_table.terminal_ids()
    }

    /// Returns a sorted slice of the IDs of all non-terminals
    pub fn non_terminal_ids(&self) -> &[usize] {
        self.symbol_table.non_terminal_ids()
    }

    /// Returns the name of the symbol with the given ID
    pub fn symbol_name(&self, i: usize) -> &str {
        self.symbol_table.name(i)
    }

    /// Returns the ID of the terminal with the given name, if it exists
    pub fn maybe_terminal_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.terminal_index(name)
    }

    /// Returns the ID of the non-terminal with the given name, if it exists
    pub fn maybe_non_terminal_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.non_terminal_index(name)
    }

    /// Returns FIRST(symbol) for the symbol with the given ID
    pub fn first(&self, i: usize) -> &HashSet<FirstItem> {
        &self.firsts[i]
    }

    /// Returns FOLLOW(non_terminal) for the non-terminal with the given ID
    pub fn follow(&self, i: usize) -> &HashSet<FollowItem> {
        self.follows.get(&i).unwrap()
    }

    /// Formats a production in the form "E -> E + T". An ϵ-production is
    /// formatted as "A -> ε".
    pub fn format_production(&self, i: usize) -> String {
        let production = &self.productions[i];

        let body = if production.body.is_empty() {
            EMPTY.to_string()
        } else {
            production
                .body
                .iter()
                .map(|s| self.symbol_name(s.id()))
                .collect::<Vec<_>>()
                .join(" ")
        };

        format!("{} -> {}", self.symbol_name(production.head), body)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper function to build a sorted list of terminal names from a
    /// FIRST set, with ϵ rendered last
    fn first_names(g: &Grammar, i: usize) -> Vec<String> {
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

    /// Helper function to build a sorted list of terminal names from a
    /// FOLLOW set, with $ rendered last
    fn follow_names(g: &Grammar, i: usize) -> Vec<String> {
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

    #[test]
    fn test_new() -> Result<()> {
        let g = crate::test::expr_grammar();

        assert_eq!(g.num_productions(), 6);
        assert_eq!(g.symbol_name(g.start()), "E");
        assert!(!g.is_augmented());
        assert_eq!(g.non_terminal_ids(), &[0, 2, 4]);
        assert_eq!(g.productions_for_non_terminal(0), &[0, 1]); // E
        assert_eq!(g.productions_for_non_terminal(2), &[2, 3]); // T
        assert_eq!(g.productions_for_non_terminal(4), &[4, 5]); // F

        Ok(())
    }

    #[test]
    fn test_undefined_non_terminal() {
        assert!(matches!(
            Grammar::new("E -> T plus"),
            Err(Error::NonTerminalNoProductions(s)) if s == "T"
        ));
    }

    #[test]
    fn test_augment() -> Result<()> {
        let g = crate::test::expr_grammar().augment()?;

        assert!(g.is_augmented());
        assert_eq!(g.num_productions(), 7);
        assert_eq!(g.symbol_name(g.start()), "E'");
        assert_eq!(g.format_production(0), "E' -> E");
        assert_eq!(g.format_production(1), "E -> E + T");
        assert_eq!(g.productions_for_non_terminal(g.start()), &[0]);

        Ok(())
    }

    #[test]
    fn test_augment_exactly_once() -> Result<()> {
        let g = crate::test::expr_grammar().augment()?;
        assert!(matches!(g.augment(), Err(Error::AlreadyAugmented)));

        Ok(())
    }

    #[test]
    fn test_augment_conflict() -> Result<()> {
        let g = Grammar::new("S -> S' a | b ; S' -> c")?;
        assert!(matches!(
            g.augment(),
            Err(Error::AugmentedStartConflict(s)) if s == "S'"
        ));

        Ok(())
    }

    #[test]
    fn test_format_production() -> Result<()> {
        let g = Grammar::new("S -> A ; A -> a | ε")?;

        assert_eq!(g.format_production(0), "S -> A");
        assert_eq!(g.format_production(1), "A -> a");
        assert_eq!(g.format_production(2), "A -> ε");

        Ok(())
    }

    #[test]
    fn test_first() -> Result<()> {
        // Grammar and test cases taken from Aho et al (2007) p.222
        let g = crate::test::expr_grammar();

        let e = g.maybe_non_terminal_index("E").unwrap();
        let t = g.maybe_non_terminal_index("T").unwrap();
        let f = g.maybe_non_terminal_index("F").unwrap();

        assert_eq!(first_names(&g, e), vec!["(", "id"]);
        assert_eq!(first_names(&g, t), vec!["(", "id"]);
        assert_eq!(first_names(&g, f), vec!["(", "id"]);

        // FIRST(terminal) is the terminal itself
        let plus = g.maybe_terminal_index("+").unwrap();
        assert_eq!(first_names(&g, plus), vec!["+"]);

        Ok(())
    }

    #[test]
    fn test_follow() -> Result<()> {
        // Grammar and test cases taken from Aho et al (2007) p.222
        let g = crate::test::expr_grammar();

        let e = g.maybe_non_terminal_index("E").unwrap();
        let t = g.maybe_non_terminal_index("T").unwrap();
        let f = g.maybe_non_terminal_index("F").unwrap();

        assert_eq!(follow_names(&g, e), vec![")", "+", "$"]);
        assert_eq!(follow_names(&g, t), vec![")", "*", "+", "$"]);
        assert_eq!(follow_names(&g, f), vec![")", "*", "+", "$"]);

        Ok(())
    }

    #[test]
    fn test_first_follow_empty_production() -> Result<()> {
        let g = Grammar::new("S -> A ; A -> a | ε")?;

        let s = g.maybe_non_terminal_index("S").unwrap();
        let a = g.maybe_non_terminal_index("A").unwrap();

        // ϵ is in FIRST(A), and propagates to FIRST(S)
        assert_eq!(first_names(&g, a), vec!["a", "ε"]);
        assert_eq!(first_names(&g, s), vec!["a", "ε"]);

        // FOLLOW(S) propagates into FOLLOW(A)
        assert_eq!(follow_names(&g, s), vec!["$"]);
        assert_eq!(follow_names(&g, a), vec!["$"]);

        Ok(())
    }

    #[test]
    fn test_first_follow_idempotent() -> Result<()> {
        // Two independent constructions of the same grammar must yield
        // identical sets
        let g1 = crate::test::expr_grammar().augment()?;
        let g2 = crate::test::expr_grammar().augment()?;

        for i in g1.non_terminal_ids() {
            assert_eq!(g1.first(*i), g2.first(*i));
            assert_eq!(g1.follow(*i), g2.follow(*i));
        }

        Ok(())
    }
}
