use std::collections::HashMap;

/// The kind of a symbol table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Terminal,
    NonTerminal,
}

/// A symbol table to contain terminal and non-terminal grammar symbols
#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: Vec<(String, Kind)>,
    terminals: HashMap<String, usize>,
    non_terminals: HashMap<String, usize>,
    terminal_ids: Vec<usize>,
    non_terminal_ids: Vec<usize>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Returns a new symbol table
    pub fn new() -> SymbolTable {
        SymbolTable {
            names: Vec::new(),
            terminals: HashMap::new(),
            non_terminals: HashMap::new(),
            terminal_ids: Vec::new(),
            non_terminal_ids: Vec::new(),
        }
    }

    /// Adds a terminal to the symbol table and returns its ID. If the terminal
    /// is already in the symbol table, its existing ID is returned.
    pub fn add_terminal(&mut self, value: &str) -> usize {
        if let Some(id) = self.terminals.get(value) {
            *id
        } else {
            let index = self.len();
            self.terminals.insert(value.to_string(), index);
            self.terminal_ids.push(index);
            self.names.push((value.to_string(), Kind::Terminal));
            index
        }
    }

    /// Adds a non-terminal to the symbol table and returns its ID. If the
    /// non-terminal is already in the symbol table, its existing ID is
    /// returned.
    pub fn add_non_terminal(&mut self, value: &str) -> usize {
        if let Some(id) = self.non_terminals.get(value) {
            *id
        } else {
            let index = self.len();
            self.non_terminals.insert(value.to_string(), index);
            self.non_terminal_ids.push(index);
            self.names.push((value.to_string(), Kind::NonTerminal));
            index
        }
    }

    /// Returns true if the symbol table contains a terminal or a non-terminal
    /// with the given name
    pub fn contains_name(&self, name: &str) -> bool {
        self.terminals.contains_key(name) || self.non_terminals.contains_key(name)
    }

    #[allow(dead_code)]
    /// Returns true if the symbol table contains no symbols
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of symbols in the symbol table
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns the ID of the terminal with the given name, if it exists
    pub fn terminal_index(&self, name: &str) -> Option<usize> {
        self.terminals.get(name).copied()
    }

    /// Returns the ID of the non-terminal with the given name, if it exists
    pub fn non_terminal_index(&self, name: &str) -> Option<usize> {
        self.non_terminals.get(name).copied()
    }

    /// Returns a sorted slice of the IDs of all terminals
    pub fn terminal_ids(&self) -> &[usize] {
        &self.terminal_ids
    }

    /// Returns a sorted slice of the IDs of all non-terminals
    pub fn non_terminal_ids(&self) -> &[usize] {
        &self.non_terminal_ids
    }

    /// Returns true if the symbol with the given ID is a terminal
    pub fn is_terminal(&self, i: usize) -> bool {
        self.names[i].1 == Kind::Terminal
    }

    /// Returns the name of the symbol with the given ID
    pub fn name(&self, i: usize) -> &str {
        &self.names[i].0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add() {
        let mut table: SymbolTable = Default::default();
        assert_eq!(table.add_terminal("id"), 0);
        assert_eq!(table.add_terminal("id"), 0);
        assert_eq!(table.add_non_terminal("E"), 1);
        assert_eq!(table.add_terminal("id"), 0);
        assert_eq!(table.add_non_terminal("E"), 1);
        assert_eq!(table.add_terminal("+"), 2);
        assert_eq!(table.add_non_terminal("T"), 3);
        assert_eq!(table.add_terminal("+"), 2);
    }

    #[test]
    fn test_len() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);

        assert_eq!(table.add_terminal("a"), 0);
        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);

        // A terminal and a non-terminal may share a name
        assert_eq!(table.add_non_terminal("a"), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ids() {
        let mut table = SymbolTable::new();
        assert_eq!(table.add_non_terminal("E"), 0);
        assert_eq!(table.add_non_terminal("T"), 1);
        assert_eq!(table.add_terminal("+"), 2);
        assert_eq!(table.add_non_terminal("F"), 3);
        assert_eq!(table.add_terminal("id"), 4);

        assert_eq!(table.non_terminal_ids(), &[0, 1, 3]);
        assert_eq!(table.terminal_ids(), &[2, 4]);
        assert!(table.is_terminal(2));
        assert!(!table.is_terminal(3));
    }

    #[test]
    fn test_names() {
        let mut table = SymbolTable::new();
        assert_eq!(table.add_non_terminal("E"), 0);
        assert_eq!(table.add_terminal("+"), 1);

        assert_eq!(table.name(0), "E");
        assert_eq!(table.name(1), "+");
        assert_eq!(table.non_terminal_index("E"), Some(0));
        assert_eq!(table.terminal_index("+"), Some(1));
        assert_eq!(table.terminal_index("E"), None);
        assert!(table.contains_name("E"));
        assert!(!table.contains_name("id"));
    }
}
