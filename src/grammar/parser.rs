use super::symboltable::SymbolTable;
use super::{Production, Symbol};
use crate::errors::{Error, Result};

/// The empty-body marker in grammar text
pub const EMPTY: &str = "ε";

/// The end-of-input marker, reserved for the parsing table
pub const END_OF_INPUT: &str = "$";

/// The parser's output
pub struct ParserOutput {
    pub symbol_table: SymbolTable,
    pub productions: Vec<Production>,
    pub start: usize,
}

/// Parses the given representation of a context-free grammar. Productions
/// are separated by ';', heads and bodies by '->', and alternative bodies
/// by '|'. Body symbols are whitespace-delimited; an identifier beginning
/// with an upper-case letter is a non-terminal, anything else a terminal.
/// The start symbol is the head of the first production.
pub fn parse(input: &str) -> Result<ParserOutput> {
    let mut symbol_table = SymbolTable::new();
    let mut productions: Vec<Production> = Vec::new();

    for clause in input.split(';') {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }

        let Some((head, alternatives)) = clause.split_once("->") else {
            return Err(Error::MissingProductionArrow(clause.to_string()));
        };

        // The head must be a single non-terminal
        let mut head_tokens = head.split_whitespace();
        let head = match (head_tokens.next(), head_tokens.next()) {
            (Some(name), None) if is_non_terminal_name(name) => {
                symbol_table.add_non_terminal(name)
            }
            _ => {
                return Err(Error::ExpectedNonTerminalHead(clause.to_string()));
            }
        };

        for alternative in alternatives.split('|') {
            let body = parse_body(&mut symbol_table, clause, alternative)?;
            productions.push(Production { head, body });
        }
    }

    if productions.is_empty() {
        return Err(Error::EmptyGrammar);
    }

    let start = productions[0].head;

    Ok(ParserOutput {
        symbol_table,
        productions,
        start,
    })
}

/// Parses a single production body. An ε-production is represented by an
/// empty body.
fn parse_body(
    symbol_table: &mut SymbolTable,
    clause: &str,
    alternative: &str,
) -> Result<Vec<Symbol>> {
    let tokens: Vec<&str> = alternative.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(Error::EmptyAlternative(clause.to_string()));
    }

    if tokens.contains(&EMPTY) {
        if tokens.len() > 1 {
            return Err(Error::EmptyNotAlone(clause.to_string()));
        }
        return Ok(Vec::new());
    }

    let mut body: Vec<Symbol> = Vec::new();
    for token in tokens {
        if token == END_OF_INPUT {
            return Err(Error::ReservedSymbol(token.to_string()));
        }

        if is_non_terminal_name(token) {
            body.push(Symbol::NonTerminal(symbol_table.add_non_terminal(token)));
        } else {
            body.push(Symbol::Terminal(symbol_table.add_terminal(token)));
        }
    }

    Ok(body)
}

/// Returns true if the token is classified as a non-terminal, i.e. it begins
/// with an upper-case letter
fn is_non_terminal_name(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_uppercase())
}
