//! This crate provides a queue of owned strings with a family of
//! structural algorithms, implemented as a cyclic doubly-linked list.
//!
//! The [`Queue`] allows inserting and removing elements at both ends in
//! constant time, and rearranging the elements — [`reverse`],
//! [`swap_pairs`], [`delete_middle`], [`delete_duplicates`], [`sort`] —
//! by relinking nodes rather than copying values.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["pear", "fig", "fig", "apple"]);
//!
//! queue.push_head("quince"); // insert at the head
//! queue.push_tail("fig"); // insert at the tail
//!
//! queue.sort(false); // ascending, byte-wise
//! assert_eq!(
//!     Vec::from_iter(queue.iter()),
//!     ["apple", "fig", "fig", "fig", "pear", "quince"],
//! );
//!
//! queue.delete_duplicates(); // requires the queue to be sorted
//! assert_eq!(Vec::from_iter(queue.iter()), ["apple", "pear", "quince"]);
//!
//! // Removing unlinks the element but releases nothing: the caller now
//! // owns it.
//! let element = queue.remove_head(None).unwrap();
//! assert_eq!(element.value(), "apple");
//! drop(element); // value and node are released here, exactly once
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────┐
//!          ↓                                             Ghost node      │
//!    ╔═══════════╗           ╔═══════════╗              ┌───────────┐    │
//!    ║   next    ║ ────────→ ║   next    ║ ──→ ┄┄ ────→ │   next    │ ───┘
//!    ╟───────────╢           ╟───────────╢              ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←── ┄┄ ←──── │   prev    │
//! │  ╟───────────╢           ╟───────────╢              ├───────────┤
//! │  ║  String   ║           ║  String   ║              ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝              └╌╌╌╌╌╌╌╌╌╌╌┘
//! │    Element 0               Element 1                     ↑   ↑
//! └──────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                  │
//! ║   ghost   ║ ─────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Queue
//! ```
//!
//! The `Queue` owns a single pointer to the ghost node, a node with *no*
//! payload that anchors the circle. In an empty queue the ghost's `next`
//! and `prev` point to itself; otherwise `ghost.next` is the head element
//! and `ghost.prev` is the tail element. Each element node is allocated
//! on the heap and carries its owned string value next to the two links.
//!
//! Dropping the queue releases every remaining element and then the ghost
//! node. An [`Element`] returned by [`remove_head`] or [`remove_tail`] is
//! owned by the caller instead, and is released by its own destructor.
//!
//! The queue is single-threaded by design: it provides no internal
//! locking, and an embedder that shares one across threads must serialize
//! access externally. `Queue` is `Send` and `Sync` because all mutation
//! goes through `&mut self`.
//!
//! [`Queue`]: crate::Queue
//! [`Element`]: crate::Element
//! [`reverse`]: crate::Queue::reverse
//! [`swap_pairs`]: crate::Queue::swap_pairs
//! [`delete_middle`]: crate::Queue::delete_middle
//! [`delete_duplicates`]: crate::Queue::delete_duplicates
//! [`sort`]: crate::Queue::sort
//! [`remove_head`]: crate::Queue::remove_head
//! [`remove_tail`]: crate::Queue::remove_tail

#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::{Element, Queue};

pub mod queue;

mod experiments;
mod link;
