use std::cmp::Ordering;

/// Strict weak order over keys.
///
/// Two keys are equivalent when neither is less than the other. The order
/// must be stable for the lifetime of the list; an inconsistent comparator
/// scrambles the ordering but never breaks memory safety.
pub trait Comparator<K: ?Sized> {
    fn less(&self, a: &K, b: &K) -> bool;

    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    fn less(&self, a: &K, b: &K) -> bool {
        a.cmp(b) == Ordering::Less
    }
}

/// Reverses the order of `Ord` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    fn less(&self, a: &K, b: &K) -> bool {
        b.cmp(a) == Ordering::Less
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
