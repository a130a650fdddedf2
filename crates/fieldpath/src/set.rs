//! A set of field paths, stored as a trie.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Path, PathElement};

/// A set of field paths.
///
/// `members` are the paths that end at this level; `children` hold the
/// paths that continue below an element. An element can be both a member
/// and have children (the object is owned and so are some of its fields).
/// A child set is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    members: BTreeSet<PathElement>,
    children: BTreeMap<PathElement, Set>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = Path>,
    {
        let mut set = Set::new();
        for path in paths {
            set.insert(path);
        }
        set
    }

    /// Adds `path` to the set. The root (empty) path is ignored.
    pub fn insert(&mut self, path: Path) {
        let mut elements = path.into_elements();
        let Some(last) = elements.pop() else {
            return;
        };
        let mut node = self;
        for element in elements {
            node = node.children.entry(element).or_default();
        }
        node.members.insert(last);
    }

    pub fn has(&self, path: &[PathElement]) -> bool {
        let Some((last, parents)) = path.split_last() else {
            return false;
        };
        let mut node = self;
        for element in parents {
            match node.children.get(element) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.members.contains(last)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.children.values().all(Set::is_empty)
    }

    /// Number of member paths, at every depth.
    pub fn len(&self) -> usize {
        self.members.len() + self.children.values().map(Set::len).sum::<usize>()
    }

    /// Returns the union of `self` and `other`.
    pub fn union(&self, other: &Set) -> Set {
        let mut out = self.clone();
        out.union_in_place(other);
        out
    }

    fn union_in_place(&mut self, other: &Set) {
        self.members.extend(other.members.iter().cloned());
        for (element, theirs) in &other.children {
            match self.children.get_mut(element) {
                Some(ours) => ours.union_in_place(theirs),
                None => {
                    self.children.insert(element.clone(), theirs.clone());
                }
            }
        }
    }

    /// Every member path, in element order (a parent before its children).
    pub fn paths(&self) -> Vec<Path> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_paths(&mut Vec::new(), &mut out);
        out
    }

    fn collect_paths(&self, prefix: &mut Vec<PathElement>, out: &mut Vec<Path>) {
        for (element, is_member, child) in self.entries() {
            prefix.push(element.clone());
            if is_member {
                out.push(Path::from(prefix.clone()));
            }
            if let Some(child) = child {
                child.collect_paths(prefix, out);
            }
            prefix.pop();
        }
    }

    /// Merged view of members and children in element order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&PathElement, bool, Option<&Set>)> {
        let keys: BTreeSet<&PathElement> =
            self.members.iter().chain(self.children.keys()).collect();
        keys.into_iter().map(move |element| {
            (
                element,
                self.members.contains(element),
                self.children.get(element),
            )
        })
    }

    pub(crate) fn insert_member(&mut self, element: PathElement) {
        self.members.insert(element);
    }

    pub(crate) fn insert_child(&mut self, element: PathElement, child: Set) {
        if !child.is_empty() {
            self.children.insert(element, child);
        }
    }
}
