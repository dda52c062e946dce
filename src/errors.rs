use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("empty grammar")]
    EmptyGrammar,
    #[error("invalid production (missing '->') in '{0}'")]
    MissingProductionArrow(String),
    #[error("expected a single non-terminal production head in '{0}'")]
    ExpectedNonTerminalHead(String),
    #[error("empty alternative in '{0}'")]
    EmptyAlternative(String),
    #[error("ε may not appear alongside other symbols in '{0}'")]
    EmptyNotAlone(String),
    #[error("'{0}' is reserved and may not appear in a grammar")]
    ReservedSymbol(String),
    #[error("no productions found for non-terminal '{0}'")]
    NonTerminalNoProductions(String),
    #[error("augmented start symbol '{0}' is already declared in the grammar")]
    AugmentedStartConflict(String),
    #[error("grammar is already augmented")]
    AlreadyAugmented,
    #[error("unrecognized input token '{0}'")]
    UnknownToken(String),
    #[error("parse error: {0}")]
    Parse(String),
}
