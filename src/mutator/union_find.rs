use std::collections::HashMap;
use std::hash::Hash;

/// Deterministic union-find keyed by insertion order (spec §5 "representative
/// selection in alias classes uses the deterministic smallest-by-insertion-order
/// rule, not object identity"). `T` is ordered so the smallest element of a
/// class can always be chosen as its representative without relying on
/// allocation order or pointer identity. Grounded on
/// `EquivalenceClasses` as used throughout
/// `original_source/.../core/defaultsolver.py` (`parameter_alias_classes`,
/// `parameter_dependency_classes`), which this crate's pack doesn't otherwise
/// carry a ready-made union-find for.
#[derive(Debug, Default)]
pub struct EquivalenceClasses<T: Eq + Hash + Ord + Copy> {
    parent: HashMap<T, T>,
}

impl<T: Eq + Hash + Ord + Copy> EquivalenceClasses<T> {
    pub fn new() -> Self {
        Self {
            parent: HashMap::new(),
        }
    }

    fn ensure(&mut self, x: T) {
        self.parent.entry(x).or_insert(x);
    }

    /// Find `x`'s representative, path-compressing as it goes.
    pub fn find(&mut self, x: T) -> T {
        self.ensure(x);
        let mut root = x;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }
        let mut cur = x;
        while self.parent[&cur] != root {
            let next = self.parent[&cur];
            self.parent.insert(cur, root);
            cur = next;
        }
        root
    }

    /// Merge the classes containing `a` and `b`. The smaller element (by
    /// `Ord`) always becomes the representative, independent of union order.
    pub fn union(&mut self, a: T, b: T) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (rep, other) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent.insert(other, rep);
    }

    /// All known elements grouped by representative, each group's members in
    /// the order they were first seen.
    pub fn classes(&mut self) -> Vec<Vec<T>> {
        let elements: Vec<T> = self.parent.keys().copied().collect();
        let mut groups: HashMap<T, Vec<T>> = HashMap::new();
        let mut order: Vec<T> = Vec::new();
        for e in elements {
            let rep = self.find(e);
            if !groups.contains_key(&rep) {
                order.push(rep);
            }
            groups.entry(rep).or_default().push(e);
        }
        for members in groups.values_mut() {
            members.sort();
        }
        order.into_iter().map(|rep| groups.remove(&rep).unwrap()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_element_is_always_representative() {
        let mut classes = EquivalenceClasses::new();
        classes.union(5, 3);
        classes.union(3, 8);
        assert_eq!(classes.find(5), 3);
        assert_eq!(classes.find(8), 3);
    }

    #[test]
    fn classes_groups_all_seen_elements() {
        let mut classes: EquivalenceClasses<i32> = EquivalenceClasses::new();
        classes.union(1, 2);
        classes.ensure(9);
        let groups = classes.classes();
        assert!(groups.iter().any(|g| g == &vec![1, 2]));
        assert!(groups.iter().any(|g| g == &vec![9]));
    }
}
