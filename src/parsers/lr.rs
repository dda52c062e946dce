pub mod items;
pub mod slr;

use crate::errors::{Error, Result};
use crate::grammar::{Grammar, Symbol, END_OF_INPUT};

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// An entry in an LR parse table
pub enum TableEntry {
    Goto(usize),
    Shift(usize),
    Reduce(usize),
    Accept,
    Error,
}

/// Trait which must be satisfied by a parse table used by the LR parser
pub trait PTable {
    fn action(&self, state: usize, lookahead: usize) -> TableEntry;
    fn eof_index(&self) -> usize;
    fn grammar(&self) -> &Grammar;
}

/// An LR parsing automaton
pub struct Parser<T: PTable> {
    table: T,
}

/// Creates a new parser with a simple LR parse table. The grammar is
/// augmented here, so the caller passes the grammar as written.
pub fn new_simple(grammar: &Grammar) -> Result<Parser<slr::ParseTable>> {
    Ok(Parser {
        table: slr::ParseTable::new(grammar.augment()?),
    })
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// The action taken in a single parse step
pub enum TraceAction {
    Shift(usize),
    Reduce(usize),
    Accept,
}

#[derive(Debug, Eq, PartialEq, Clone)]
/// A single step of a parse, recorded after the action was applied
pub struct TraceStep {
    /// The state stack, bottom first
    pub states: Vec<usize>,
    /// The symbol stack, bottom first
    pub symbols: Vec<Symbol>,
    /// Index into the token stream of the next unread terminal
    pub cursor: usize,
    pub action: TraceAction,
}

#[derive(Debug, Eq, PartialEq, Clone)]
/// A step-by-step trace of a successful parse
pub struct Trace {
    /// The terminal IDs of the tokenized input, excluding end-of-input
    pub tokens: Vec<usize>,
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Returns the reduce actions of the trace, in order
    pub fn reductions(&self) -> Vec<usize> {
        self.steps
            .iter()
            .filter_map(|step| match step.action {
                TraceAction::Reduce(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

impl<T: PTable> Parser<T> {
    /// Returns the parser's table
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Parses an input string of whitespace-delimited terminals, returning
    /// a step-by-step trace of the parse. A missing ACTION or GOTO entry
    /// halts the parse with an error naming the offending terminal and
    /// state; there is no error recovery.
    pub fn parse(&self, input: &str) -> Result<Trace> {
        // Algorithm adapted from Aho et al (2007) p.251

        let tokens = self.tokenize(input)?;

        let mut states: Vec<usize> = vec![0];
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut cursor = 0;
        let mut steps: Vec<TraceStep> = Vec::new();

        loop {
            let lookahead = if cursor < tokens.len() {
                tokens[cursor]
            } else {
                self.table.eof_index()
            };

            let action = match self.table.action(*states.last().unwrap(), lookahead) {
                TableEntry::Shift(state) => {
                    symbols.push(Symbol::Terminal(lookahead));
                    states.push(state);
                    cursor += 1;

                    TraceAction::Shift(state)
                }
                TableEntry::Reduce(p) => {
                    self.reduce(p, &mut states, &mut symbols)?;

                    TraceAction::Reduce(p)
                }
                TableEntry::Accept => TraceAction::Accept,
                TableEntry::Error => {
                    return Err(Error::Parse(format!(
                        "no action for '{}' in state {}",
                        self.lookahead_name(lookahead),
                        states.last().unwrap(),
                    )));
                }
                TableEntry::Goto(_) => {
                    // Shouldn't happen, since GOTO is for non-terminals, and
                    // actions are determined by terminals/end-of-input
                    panic!("GOTO found in actions");
                }
            };

            steps.push(TraceStep {
                states: states.clone(),
                symbols: symbols.clone(),
                cursor,
                action,
            });

            if action == TraceAction::Accept {
                break;
            }
        }

        Ok(Trace { tokens, steps })
    }

    /// Reduces by the production with the given ID: pops one state/symbol
    /// pair per body symbol, pushes the head, and follows GOTO from the
    /// uncovered state
    fn reduce(&self, id: usize, states: &mut Vec<usize>, symbols: &mut Vec<Symbol>) -> Result<()> {
        let production = self.table.grammar().production(id);

        // An ϵ-production pops nothing
        for _ in 0..production.body.len() {
            states.pop();
            symbols.pop();
        }

        let top = *states.last().unwrap();
        symbols.push(Symbol::NonTerminal(production.head));

        match self.table.action(top, production.head) {
            TableEntry::Goto(next) => {
                states.push(next);
                Ok(())
            }
            _ => Err(Error::Parse(format!(
                "no goto for '{}' from state {}",
                self.table.grammar().symbol_name(production.head),
                top,
            ))),
        }
    }

    /// Splits an input string on whitespace and resolves each token to a
    /// terminal ID. The empty string is a valid (empty) token stream.
    fn tokenize(&self, input: &str) -> Result<Vec<usize>> {
        input
            .split_whitespace()
            .map(|token| {
                self.table
                    .grammar()
                    .maybe_terminal_index(token)
                    .ok_or_else(|| Error::UnknownToken(token.to_string()))
            })
            .collect()
    }

    /// Returns the display name for a lookahead column
    fn lookahead_name(&self, lookahead: usize) -> &str {
        if lookahead == self.table.eof_index() {
            END_OF_INPUT
        } else {
            self.table.grammar().symbol_name(lookahead)
        }
    }
}
