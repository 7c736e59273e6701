use std::ops::{Index, IndexMut};

use crate::level::MAX_LEVEL;

/// Index of a node in the arena.
pub(crate) type Link = usize;

/// The head sentinel always lives in the first arena slot.
pub(crate) const HEAD: Link = 0;

/// Terminator link. Never stored in the arena, so it never resolves to a node.
pub(crate) const TAIL: Link = Link::MAX;

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}

/// A list cell. `forward[i]` is the successor on level `i`.
///
/// The head sentinel and released slots carry no entry.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    entry: Option<Entry<K, V>>,
    pub(crate) forward: Vec<Link>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, height: usize) -> Self {
        Self {
            entry: Some(Entry { key, value }),
            forward: vec![TAIL; height + 1],
        }
    }

    fn head() -> Self {
        Self {
            entry: None,
            forward: vec![TAIL; MAX_LEVEL + 1],
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.forward.len().saturating_sub(1)
    }

    pub(crate) fn entry(&self) -> Option<&Entry<K, V>> {
        self.entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self) -> Option<&mut Entry<K, V>> {
        self.entry.as_mut()
    }
}

/// Owns every node of a list, head included.
///
/// Released slots are recycled through a free list so links stay small
/// indices and a long lived list does not grow without bound.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<Link>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::head()],
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Link {
        match self.free.pop() {
            Some(link) => {
                self.nodes[link] = node;
                link
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Takes the entry out of `link` and puts the slot on the free list.
    pub(crate) fn release(&mut self, link: Link) -> Option<Entry<K, V>> {
        if link == HEAD {
            return None;
        }
        let node = self.nodes.get_mut(link)?;
        let entry = node.entry.take()?;
        node.forward = Vec::new();
        self.free.push(link);
        Some(entry)
    }

    /// Entry stored at `link`, `None` for the sentinels.
    pub(crate) fn entry(&self, link: Link) -> Option<&Entry<K, V>> {
        self.nodes.get(link).and_then(Node::entry)
    }

    pub(crate) fn entry_mut(&mut self, link: Link) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(link).and_then(Node::entry_mut)
    }

    pub(crate) fn key(&self, link: Link) -> Option<&K> {
        self.entry(link).map(Entry::key)
    }

    /// Drops every node but the head and points the head at the tail.
    pub(crate) fn reset(&mut self) {
        self.nodes.truncate(1);
        self.nodes[HEAD] = Node::head();
        self.free.clear();
    }

    /// Number of slots holding an entry.
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.len() - 1
    }
}

impl<K, V> Index<Link> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, link: Link) -> &Node<K, V> {
        &self.nodes[link]
    }
}

impl<K, V> IndexMut<Link> for Arena<K, V> {
    fn index_mut(&mut self, link: Link) -> &mut Node<K, V> {
        &mut self.nodes[link]
    }
}
