use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::value::Value;

/// An insertion-ordered map from symbol name to [`Value`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SymbolTable {
    symbols: IndexMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) `name`, returning the previous value if there was one.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> Option<Value> {
        self.symbols.insert(name.into(), value.into())
    }

    /// `+=` onto `name`, creating it if needed. Follows [`Value::append`]: a value of a different
    /// type than the existing one is dropped.
    pub fn append<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) {
        *self.symbols.entry(name.into()).or_default() += value.into();
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.symbols.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for SymbolTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
