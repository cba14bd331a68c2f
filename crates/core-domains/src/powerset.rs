//! Finite subsets of a totally ordered element type, ordered by inclusion.

use core_geo::Domain;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowersetDomain<T: Ord> {
    elements: BTreeSet<T>,
}

impl<T: Ord + Clone> PowersetDomain<T> {
    pub fn empty() -> Self {
        Self {
            elements: BTreeSet::new(),
        }
    }

    pub fn singleton(element: T) -> Self {
        let mut elements = BTreeSet::new();
        elements.insert(element);
        Self { elements }
    }

    pub fn insert(&mut self, element: T) {
        self.elements.insert(element);
    }

    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }
}

impl<T: Ord + Clone + fmt::Debug + fmt::Display> Domain for PowersetDomain<T> {
    fn bottom() -> Self {
        Self::empty()
    }

    fn le(&self, other: &Self) -> bool {
        self.elements.is_subset(&other.elements)
    }

    fn join(&self, other: &Self) -> Self {
        let mut elements = self.elements.clone();
        elements.extend(other.elements.iter().cloned());
        Self { elements }
    }

    fn display(&self) -> String {
        let inner = self
            .elements
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{inner}}}")
    }

    // `covers` keeps the default empty projection: a set of operation
    // kinds has no natural geometric reading.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_is_the_empty_set() {
        let bottom: PowersetDomain<String> = PowersetDomain::bottom();
        assert_eq!(bottom.display(), "{}");
    }

    #[test]
    fn join_is_set_union() {
        let mut a = PowersetDomain::singleton("Init".to_string());
        a.insert("Translation".to_string());
        let b = PowersetDomain::singleton("Rotation".to_string());
        let joined = a.join(&b);
        assert!(joined.contains(&"Init".to_string()));
        assert!(joined.contains(&"Translation".to_string()));
        assert!(joined.contains(&"Rotation".to_string()));
    }

    #[test]
    fn le_is_subset_inclusion() {
        let small = PowersetDomain::singleton("Init".to_string());
        let mut large = small.clone();
        large.insert("Translation".to_string());
        assert!(small.le(&large));
        assert!(!large.le(&small));
    }

    #[test]
    fn display_lists_elements_in_order() {
        let mut s = PowersetDomain::singleton("Translation".to_string());
        s.insert("Init".to_string());
        assert_eq!(s.display(), "{Init, Translation}");
    }
}
