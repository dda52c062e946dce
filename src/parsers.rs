pub mod lr;

use crate::grammar::FollowItem;

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
/// An input symbol, including the end-of-input marker
pub enum InputSymbol {
    Terminal(usize),
    EndOfInput,
}

impl InputSymbol {
    /// Builds an InputSymbol from a FollowItem.
    pub fn from_follow_item(item: FollowItem) -> InputSymbol {
        match item {
            FollowItem::Terminal(t) => InputSymbol::Terminal(t),
            FollowItem::EndOfInput => InputSymbol::EndOfInput,
        }
    }
}
