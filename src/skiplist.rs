use std::collections::HashSet;
use std::fmt::{self, Debug, Display};
use std::mem;

use crate::compare::{Comparator, Natural};
use crate::iter::{Iter, Keys, Values};
use crate::level::{Geometric, LevelGenerator, MAX_LEVEL};
use crate::node::{Arena, Link, Node, HEAD, TAIL};
use crate::options::Options;

/// Per level splice points collected by [`SkipList::locate`].
type Predecessors = [Link; MAX_LEVEL + 1];

/// An ordered map backed by a probabilistic skip list.
///
/// Keys are ordered by the comparator `C` (the key's `Ord` by default) and
/// node heights are drawn from `G`. Every node is linked on level 0; higher
/// levels only accelerate the search.
///
/// ```
/// use skipmap::SkipList;
///
/// let mut list = SkipList::new();
/// list.insert(2, "b");
/// list.insert(1, "a");
/// assert_eq!(list.iter().collect::<Vec<_>>(), vec![(&1, &"a"), (&2, &"b")]);
/// ```
#[derive(Clone)]
pub struct SkipList<K, V, C = Natural, G = Geometric> {
    arena: Arena<K, V>,
    top_level: usize,
    len: usize,
    cmp: C,
    levels: G,
}

impl<K: Ord, V> SkipList<K, V> {
    pub fn new() -> Self {
        Self::with_parts(Natural, Geometric::new())
    }

    pub fn from_options(options: &Options) -> Self {
        let levels = match options.seed {
            Some(seed) => Geometric::seeded(seed),
            None => Geometric::new(),
        };
        Self::with_parts(Natural, levels)
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_parts(cmp, Geometric::new())
    }
}

impl<K: Ord, V, G: LevelGenerator> SkipList<K, V, Natural, G> {
    pub fn with_generator(levels: G) -> Self {
        Self::with_parts(Natural, levels)
    }
}

impl<K, V, C, G> SkipList<K, V, C, G> {
    pub fn with_parts(cmp: C, levels: G) -> Self {
        Self {
            arena: Arena::new(),
            top_level: 0,
            len: 0,
            cmp,
            levels,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level currently linking a node, 0 when empty.
    pub fn top_level(&self) -> usize {
        self.top_level
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Releases every node. The head is pointed back at the tail on all levels.
    pub fn clear(&mut self) {
        self.arena.reset();
        self.top_level = 0;
        self.len = 0;
    }

    /// Cursor on the smallest entry, or the end when empty.
    pub fn begin(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.arena[HEAD].forward[0])
    }

    pub fn end(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, TAIL)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.begin()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.begin())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.begin())
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.begin().entry()
    }

    /// Keys visible on every level from the top level down, for debugging.
    pub fn levels(&self) -> Levels<'_, K, V, C, G> {
        Levels { list: self }
    }

    pub fn display(&self)
    where
        K: Display,
    {
        print!("{}", self.levels());
    }
}

impl<K, V, C, G> SkipList<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    /// Finds the first node whose key is not less than `key`.
    ///
    /// When `update` is given, `update[i]` receives the last node on level `i`
    /// whose key is less than `key`. Levels above the top level only link the
    /// head to the tail, so the descent starts at the top level and the
    /// buffer keeps the head there.
    fn locate(&self, key: &K, mut update: Option<&mut Predecessors>) -> Link {
        let mut current = HEAD;
        for level in (0..=self.top_level).rev() {
            loop {
                let next = self.arena[current].forward[level];
                match self.arena.key(next) {
                    Some(next_key) if self.cmp.less(next_key, key) => current = next,
                    _ => break,
                }
            }
            if let Some(update) = update.as_mut() {
                update[level] = current;
            }
        }
        self.arena[current].forward[0]
    }

    fn matches(&self, link: Link, key: &K) -> bool {
        match self.arena.key(link) {
            Some(found) => self.cmp.equivalent(found, key),
            None => false,
        }
    }

    fn find_link(&self, key: &K) -> Option<Link> {
        let candidate = self.locate(key, None);
        self.matches(candidate, key).then_some(candidate)
    }

    /// Links a new node after `update`. The key must not be present.
    fn splice(&mut self, key: K, value: V, update: &mut Predecessors) -> Link {
        let mut height = self.levels.random_level().min(MAX_LEVEL);
        if height > self.top_level {
            // grow one level at a time
            self.top_level += 1;
            update[self.top_level] = HEAD;
            height = self.top_level;
            log::trace!("top level raised to {}", self.top_level);
        }

        let link = self.arena.alloc(Node::new(key, value, height));
        for level in 0..=height {
            let prev = update[level];
            let next = self.arena[prev].forward[level];
            self.arena[link].forward[level] = next;
            self.arena[prev].forward[level] = link;
        }
        self.len += 1;

        link
    }

    /// Inserts or overwrites. Returns the previous value when the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut update = [HEAD; MAX_LEVEL + 1];
        let candidate = self.locate(&key, Some(&mut update));
        if self.matches(candidate, &key) {
            return self
                .arena
                .entry_mut(candidate)
                .map(|entry| mem::replace(&mut entry.value, value));
        }

        self.splice(key, value, &mut update);
        None
    }

    /// Unlinks `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut update = [HEAD; MAX_LEVEL + 1];
        let candidate = self.locate(key, Some(&mut update));
        if !self.matches(candidate, key) {
            return None;
        }

        for level in 0..=self.top_level {
            let prev = update[level];
            if self.arena[prev].forward[level] != candidate {
                break;
            }
            let next = self.arena[candidate].forward[level];
            self.arena[prev].forward[level] = next;
        }

        while self.top_level > 0 && self.arena[HEAD].forward[self.top_level] == TAIL {
            self.top_level -= 1;
            log::trace!("top level lowered to {}", self.top_level);
        }

        self.len -= 1;
        self.arena.release(candidate).map(|entry| entry.into_value())
    }

    /// Removes `key`, returning whether a node was unlinked.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Cursor at `key`, or the end when absent.
    pub fn find(&self, key: &K) -> Iter<'_, K, V> {
        match self.find_link(key) {
            Some(link) => Iter::new(&self.arena, link),
            None => self.end(),
        }
    }

    /// 1 when `key` is present, 0 otherwise.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_link(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let link = self.find_link(key)?;
        self.arena.entry(link).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let link = self.find_link(key)?;
        self.arena.entry_mut(link).map(|entry| &mut entry.value)
    }

    /// Value for `key`, inserting `V::default()` first when absent.
    ///
    /// The reference keeps the list mutably borrowed, so nothing can remove
    /// the node while it is alive.
    pub fn at(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let mut update = [HEAD; MAX_LEVEL + 1];
        let candidate = self.locate(&key, Some(&mut update));
        let link = if self.matches(candidate, &key) {
            candidate
        } else {
            self.splice(key, V::default(), &mut update)
        };

        match self.arena.entry_mut(link) {
            Some(entry) => &mut entry.value,
            None => unreachable!("linked node {} holds no entry", link),
        }
    }

    /// Walks every level and reports the first broken structural invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut on_base = HashSet::with_capacity(self.len);
        let mut max_height = 0;
        let mut prev: Option<&K> = None;
        let mut current = self.arena[HEAD].forward[0];

        while current != TAIL {
            let entry = self
                .arena
                .entry(current)
                .ok_or_else(|| format!("level 0 links released slot {}", current))?;
            if let Some(prev) = prev {
                if !self.cmp.less(prev, entry.key()) {
                    return Err(format!("level 0 out of order at slot {}", current));
                }
            }
            if !on_base.insert(current) {
                return Err(format!("level 0 cycles through slot {}", current));
            }
            max_height = max_height.max(self.arena[current].height());
            prev = Some(entry.key());
            current = self.arena[current].forward[0];
        }

        if on_base.len() != self.len {
            return Err(format!(
                "len is {} but level 0 holds {} nodes",
                self.len,
                on_base.len()
            ));
        }
        if self.arena.live() != self.len {
            return Err(format!(
                "len is {} but the arena holds {} entries",
                self.len,
                self.arena.live()
            ));
        }
        if max_height != self.top_level {
            return Err(format!(
                "top level is {} but the tallest node has height {}",
                self.top_level, max_height
            ));
        }

        for level in 1..=MAX_LEVEL {
            let mut prev: Option<&K> = None;
            let mut current = self.arena[HEAD].forward[level];
            if level > self.top_level && current != TAIL {
                return Err(format!("level {} above top level is not empty", level));
            }
            while current != TAIL {
                if !on_base.contains(&current) {
                    return Err(format!("level {} links slot {} missing from level 0", level, current));
                }
                if self.arena[current].height() < level {
                    return Err(format!("slot {} linked above its height on level {}", current, level));
                }
                let key = self.arena.key(current);
                if let (Some(prev), Some(key)) = (prev, key) {
                    if !self.cmp.less(prev, key) {
                        return Err(format!("level {} out of order at slot {}", level, current));
                    }
                }
                prev = key;
                current = self.arena[current].forward[level];
            }
        }

        Ok(())
    }
}

impl<K, V, C, G> Extend<(K, V)> for SkipList<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<'a, K, V, C, G> IntoIterator for &'a SkipList<K, V, C, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.begin()
    }
}

impl<K: Debug, V: Debug, C, G> Debug for SkipList<K, V, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Level by level view of a list, see [`SkipList::levels`].
pub struct Levels<'a, K, V, C, G> {
    list: &'a SkipList<K, V, C, G>,
}

impl<K: Display, V, C, G> Display for Levels<'_, K, V, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = &self.list.arena;
        for level in (0..=self.list.top_level).rev() {
            write!(f, "Level {}:", level)?;
            let mut current = arena[HEAD].forward[level];
            while let Some(key) = arena.key(current) {
                write!(f, " {}", key)?;
                current = arena[current].forward[level];
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
