use std::sync::Arc;

use ahash::{HashSet, HashSetExt};

/// Pool of shared immutable strings.
///
/// Attribute values such as basin names or unit codes repeat across many rows. Interning keeps one allocation per
/// distinct value, every cell holding a cheap [`Arc`] handle to it.
#[derive(Debug, Clone, Default)]
pub struct StringInterner {
    pool: HashSet<Arc<str>>,
}

impl StringInterner {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            pool: HashSet::new(),
        }
    }

    /// Returns the pooled handle for the string, adding the string to the pool if it is not there yet.
    pub fn intern(&mut self, value: &str) -> Arc<str> {
        if let Some(existing) = self.pool.get(value) {
            return existing.clone();
        }

        let handle: Arc<str> = Arc::from(value);
        self.pool.insert(handle.clone());
        handle
    }

    /// Returns true if the string is in the pool.
    pub fn contains(&self, value: &str) -> bool {
        self.pool.contains(value)
    }

    /// Number of distinct strings in the pool.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Returns true if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_same_allocation() {
        let mut interner = StringInterner::new();
        let a = interner.intern("Danube");
        let b = interner.intern(&String::from("Danube"));
        let c = interner.intern("Rhine");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(interner.len(), 2);
        assert!(interner.contains("Rhine"));
        assert!(!interner.contains("Elbe"));
    }
}
