//! Load-once cache slots for data fetched from the service

/// A value fetched at most once per session.
///
/// `loaded` is tracked separately from the value so that a successful fetch of
/// an empty collection is not mistaken for "never fetched".
#[derive(Clone, Debug)]
pub struct Cached<T> {
    value: T,
    loaded: bool,
}

impl<T: Default> Cached<T> {
    pub fn new() -> Self {
        Self {
            value: T::default(),
            loaded: false,
        }
    }
}

impl<T> Cached<T> {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The cached value, if it was ever populated
    pub fn get(&self) -> Option<&T> {
        self.loaded.then_some(&self.value)
    }

    /// Stores a fetched value and marks the slot loaded.
    pub fn fill(&mut self, value: T) -> &T {
        self.value = value;
        self.loaded = true;
        &self.value
    }

    /// The value as it currently stands, loaded or not
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Default> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_filled() {
        let cache: Cached<Vec<u32>> = Cached::new();
        assert!(!cache.is_loaded());
        assert!(cache.get().is_none());
        assert!(cache.value().is_empty());
    }

    #[test]
    fn test_filling_with_empty_value_still_counts_as_loaded() {
        let mut cache: Cached<Vec<u32>> = Cached::new();
        cache.fill(Vec::new());
        assert!(cache.is_loaded());
        assert_eq!(cache.get(), Some(&Vec::new()));
    }

    #[test]
    fn test_fill_returns_stored_value() {
        let mut cache: Cached<Vec<u32>> = Cached::default();
        assert_eq!(cache.fill(vec![1, 2]), &vec![1, 2]);
        assert_eq!(cache.get(), Some(&vec![1, 2]));
    }
}
