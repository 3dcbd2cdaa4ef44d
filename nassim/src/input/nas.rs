//! Reference data: name <-> index tables for everything flights refer to.

use std::collections::HashMap;

pub type NameMap = HashMap<String, usize>;

/// Names in declaration order. The index of a name is its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    names: Vec<String>,
    index: NameMap,
}

impl NameTable {
    pub fn new() -> NameTable {
        Default::default()
    }

    /// Adds `name` if new. Returns its index either way.
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).cloned()
    }

    /// The name at `idx`, or `"?"` for an index outside the table.
    pub fn name(&self, idx: usize) -> &str {
        self.names.get(idx).map(|s| s.as_str()).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (i, n.as_str()))
    }
}

/// Lookup tables for the national airspace being simulated. Built once
/// while loading a scenario and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nas {
    pub airports: NameTable,
    pub carriers: NameTable,
    pub equipment: NameTable,
    pub departure_fixes: NameTable,
    pub arrival_fixes: NameTable,
    pub weather: NameTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut t = NameTable::new();
        assert_eq!(t.intern("KATL"), 0);
        assert_eq!(t.intern("KJFK"), 1);
        assert_eq!(t.intern("KATL"), 0);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("KJFK"), Some(1));
        assert_eq!(t.get("KORD"), None);
        assert_eq!(t.name(1), "KJFK");
        assert_eq!(t.name(9), "?");
        assert_eq!(t.iter().map(|(_, n)| n).collect::<Vec<_>>(), vec!["KATL", "KJFK"]);
    }
}
