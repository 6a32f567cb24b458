//! Ordered, duplicate-free member name list.

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

/// Names declared for one API category, in first-seen order.
///
/// Re-inserting a name is a no-op, so merging a literal declaration with a
/// spread-resolved import never produces duplicates.
#[derive(Debug, Clone, Default)]
pub struct MemberList {
    names: Vec<CompactString>,
    seen: FxHashSet<CompactString>,
}

impl MemberList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless it is already present. Returns true if inserted.
    pub fn push(&mut self, name: impl Into<CompactString>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    /// Append every name of `other`, keeping this list's order first.
    pub fn extend_from(&mut self, other: &MemberList) {
        for name in &other.names {
            self.push(name.clone());
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|n| n.as_str())
    }

    #[inline]
    pub fn as_slice(&self) -> &[CompactString] {
        &self.names
    }
}

impl PartialEq for MemberList {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for MemberList {}

impl<S: Into<CompactString>> FromIterator<S> for MemberList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = MemberList::new();
        for name in iter {
            list.push(name);
        }
        list
    }
}

impl<S: Into<CompactString>> Extend<S> for MemberList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.push(name);
        }
    }
}

impl Serialize for MemberList {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.names.iter().map(|n| n.as_str()))
    }
}
