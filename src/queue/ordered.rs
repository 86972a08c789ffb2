//! Owned-node implementation of the ordered queue.

use std::cmp::Ordering;
use std::fmt;

use crate::models::{Job, Policy};

/// Ordering used to position elements in an [`OrderedQueue`].
///
/// `Less` means `a` belongs ahead of `b`.
pub trait QueueOrder<T> {
    /// Compares two elements.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> QueueOrder<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

impl QueueOrder<Job> for Policy {
    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        Policy::compare(self, a, b)
    }
}

struct Node<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// A queue kept in non-decreasing order by `O`.
///
/// Elements that compare equal keep their insertion order: a newcomer is
/// placed after every element it does not strictly precede.
pub struct OrderedQueue<T, O> {
    head: Link<T>,
    len: usize,
    order: O,
}

impl<T, O: QueueOrder<T>> OrderedQueue<T, O> {
    /// Creates an empty queue with the given ordering.
    pub fn new(order: O) -> Self {
        Self {
            head: None,
            len: 0,
            order,
        }
    }

    /// Inserts `value` in order and returns its zero-based position.
    ///
    /// Scans from the head past every element that does not rank after
    /// `value`. An empty queue takes the value at index 0 without
    /// consulting the ordering.
    pub fn offer(&mut self, value: T) -> usize {
        let mut index = 0;
        let mut cursor = &mut self.head;

        loop {
            let advance = match cursor.as_deref() {
                Some(node) => self.order.compare(&node.value, &value) != Ordering::Greater,
                None => false,
            };
            if !advance {
                break;
            }
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => break,
            }
            index += 1;
        }

        let rest = cursor.take();
        *cursor = Some(Box::new(Node { value, next: rest }));
        self.len += 1;
        index
    }

    /// Head element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Removes and returns the head element.
    pub fn poll(&mut self) -> Option<T> {
        let node = self.head.take()?;
        let Node { value, next } = *node;
        self.head = next;
        self.len -= 1;
        Some(value)
    }

    /// Element at `index`, or `None` when `index >= len()`.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Removes every element equal to `value` and returns how many were removed.
    ///
    /// Equality is `PartialEq` on the element, not the queue ordering: two
    /// distinct elements with the same ordering key are never conflated.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let mut removed = 0;
        let mut cursor = &mut self.head;

        loop {
            let matches = match cursor.as_deref() {
                Some(node) => node.value == *value,
                None => break,
            };
            if matches {
                if let Some(mut node) = cursor.take() {
                    *cursor = node.next.take();
                    removed += 1;
                }
            } else {
                match cursor {
                    Some(node) => cursor = &mut node.next,
                    None => break,
                }
            }
        }

        self.len -= removed;
        removed
    }

    /// Removes and returns the element at `index`. Later elements move up
    /// one position. Out of range leaves the queue untouched.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }

        let mut cursor = &mut self.head;
        for _ in 0..index {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }

        let mut node = cursor.take()?;
        *cursor = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every element, head first. Safe to call on an empty queue.
    pub fn clear(&mut self) {
        while self.poll().is_some() {}
    }

    /// Ordering in use.
    pub fn order(&self) -> &O {
        &self.order
    }
}

impl<T, O> OrderedQueue<T, O> {
    /// Iterates from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<T, O> Drop for OrderedQueue<T, O> {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop can overflow on long chains.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for OrderedQueue<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Head-to-tail iterator over an [`OrderedQueue`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<'a, T, O> IntoIterator for &'a OrderedQueue<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        key: i32,
        tag: u32,
    }

    fn by_key(a: &Item, b: &Item) -> Ordering {
        a.key.cmp(&b.key)
    }

    fn item(key: i32, tag: u32) -> Item {
        Item { key, tag }
    }

    fn ints() -> OrderedQueue<i32, fn(&i32, &i32) -> Ordering> {
        OrderedQueue::new(i32::cmp as fn(&i32, &i32) -> Ordering)
    }

    #[test]
    fn test_offer_into_empty_skips_ordering() {
        let mut q = OrderedQueue::new(|_: &i32, _: &i32| -> Ordering {
            panic!("ordering must not be consulted for the first element")
        });
        assert_eq!(q.offer(42), 0);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_offer_returns_position() {
        let mut q = ints();
        assert_eq!(q.offer(10), 0);
        assert_eq!(q.offer(30), 1);
        assert_eq!(q.offer(20), 1);
        assert_eq!(q.offer(5), 0);
        assert_eq!(q.offer(40), 4);
        let values: Vec<i32> = q.iter().copied().collect();
        assert_eq!(values, vec![5, 10, 20, 30, 40]);
    }

    #[test]
    fn test_equal_keys_keep_insertion_order() {
        let mut q = OrderedQueue::new(by_key);
        q.offer(item(1, 0));
        q.offer(item(2, 1));
        q.offer(item(1, 2));
        q.offer(item(1, 3));
        let tags: Vec<u32> = q.iter().map(|i| i.tag).collect();
        assert_eq!(tags, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_random_offers_stay_sorted_and_stable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut q = OrderedQueue::new(by_key);
        for tag in 0..200 {
            q.offer(item(rng.random_range(0..10), tag));
            let items: Vec<&Item> = q.iter().collect();
            for pair in items.windows(2) {
                assert!(pair[0].key <= pair[1].key);
                if pair[0].key == pair[1].key {
                    assert!(pair[0].tag < pair[1].tag);
                }
            }
        }
        assert_eq!(q.len(), 200);
    }

    #[test]
    fn test_peek_then_poll() {
        let mut q = ints();
        q.offer(3);
        q.offer(1);
        assert_eq!(q.peek(), Some(&1));
        assert_eq!(q.poll(), Some(1));
        assert_eq!(q.len(), 1);
        assert_eq!(q.poll(), Some(3));
        assert_eq!(q.poll(), None);
        assert_eq!(q.peek(), None);
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_at_bounds() {
        let mut q = ints();
        q.offer(1);
        q.offer(2);
        assert_eq!(q.at(0), Some(&1));
        assert_eq!(q.at(1), Some(&2));
        assert_eq!(q.at(2), None);
        assert_eq!(ints().at(0), None);
    }

    #[test]
    fn test_remove_at_shifts() {
        let mut q = ints();
        for v in [1, 2, 3, 4] {
            q.offer(v);
        }
        assert_eq!(q.remove_at(1), Some(2));
        assert_eq!(q.len(), 3);
        assert_eq!(q.at(1), Some(&3));
        assert_eq!(q.remove_at(0), Some(1));
        assert_eq!(q.remove_at(1), Some(4));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut q = ints();
        q.offer(1);
        q.offer(2);
        assert_eq!(q.remove_at(2), None);
        assert_eq!(q.remove_at(100), None);
        assert_eq!(q.len(), 2);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_remove_uses_equality_not_ordering() {
        let mut q = OrderedQueue::new(by_key);
        q.offer(item(1, 0));
        q.offer(item(1, 1));
        q.offer(item(2, 2));
        q.offer(item(1, 1));

        // Same key as tag 0, different identity: only exact matches go.
        assert_eq!(q.remove(&item(1, 1)), 2);
        assert_eq!(q.len(), 2);
        let tags: Vec<u32> = q.iter().map(|i| i.tag).collect();
        assert_eq!(tags, vec![0, 2]);
    }

    #[test]
    fn test_remove_head_run_and_missing() {
        let mut q = ints();
        for v in [1, 1, 1, 2] {
            q.offer(v);
        }
        assert_eq!(q.remove(&1), 3);
        assert_eq!(q.peek(), Some(&2));
        assert_eq!(q.remove(&9), 0);
        assert_eq!(q.len(), 1);
        assert_eq!(ints().remove(&1), 0);
    }

    #[test]
    fn test_size_tracks_offers_minus_removals() {
        let mut q = ints();
        for v in 0..10 {
            q.offer(v % 4);
        }
        q.poll();
        q.remove(&3);
        q.remove_at(0);
        // 10 offers - 1 poll - 2 threes - 1 remove_at
        assert_eq!(q.len(), 6);
        assert_eq!(q.iter().count(), 6);
    }

    #[test]
    fn test_clear_empties_and_is_repeatable() {
        let mut q = ints();
        for v in 0..5 {
            q.offer(v);
        }
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.peek(), None);
        q.clear();
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_long_chain_drop() {
        let mut q = OrderedQueue::new(|_: &u32, _: &u32| Ordering::Greater);
        for v in 0..200_000 {
            q.offer(v); // always inserted at head
        }
        assert_eq!(q.peek(), Some(&199_999));
        drop(q);
    }

    #[test]
    fn test_policy_order_on_jobs() {
        let mut q = OrderedQueue::new(Policy::Sjf);
        q.offer(Job::new(1, 0, 9, 0));
        q.offer(Job::new(2, 1, 3, 0));
        q.offer(Job::new(3, 2, 5, 0));
        let pids: Vec<u32> = q.iter().map(|j| j.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn test_debug_lists_elements() {
        let mut q = ints();
        q.offer(2);
        q.offer(1);
        assert_eq!(format!("{q:?}"), "[1, 2]");
    }
}
