use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::ptr;

use crate::node::{Arena, Link, TAIL};

/// Forward cursor over level 0.
///
/// A cursor either sits on an entry or on the end of the list. Advancing it
/// through [`Iterator::next`] yields the current entry and steps to its level 0
/// successor. Two cursors are equal when they sit on the same node of the
/// same list.
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    current: Link,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(arena: &'a Arena<K, V>, current: Link) -> Self {
        Self { arena, current }
    }

    pub fn is_end(&self) -> bool {
        self.current == TAIL
    }

    pub fn key(&self) -> Option<&'a K> {
        self.arena.key(self.current)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.arena.entry(self.current).map(|entry| &entry.value)
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.arena
            .entry(self.current)
            .map(|entry| (entry.key(), &entry.value))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            current: self.current,
        }
    }
}

impl<K, V> PartialEq for Iter<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.arena, other.arena) && self.current == other.current
    }
}

impl<K, V> Eq for Iter<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry() {
            Some((key, value)) => f.debug_tuple("Iter").field(key).field(value).finish(),
            None => f.write_str("Iter(end)"),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let entry = arena.entry(self.current)?;
        self.current = arena[self.current].forward[0];
        Some((entry.key(), &entry.value))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }
}
