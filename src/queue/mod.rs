//! Comparator-ordered queue.
//!
//! A singly linked sequence kept sorted by a pluggable ordering. It knows
//! nothing about jobs or scheduling; the scheduler instantiates it with the
//! active [`Policy`](crate::models::Policy) as the ordering.
//!
//! # Complexity
//! Every operation except `peek`/`poll`/`len` is O(n) in the queue length.
//!
//! # Example
//!
//! ```
//! use u_cpusched::queue::OrderedQueue;
//!
//! let mut q = OrderedQueue::new(|a: &i32, b: &i32| a.cmp(b));
//! assert_eq!(q.offer(5), 0);
//! assert_eq!(q.offer(1), 0);
//! assert_eq!(q.offer(3), 1);
//! assert_eq!(q.poll(), Some(1));
//! assert_eq!(q.at(1), Some(&5));
//! ```

mod ordered;

pub use ordered::{Iter, OrderedQueue, QueueOrder};
