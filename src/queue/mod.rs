use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::link::{self, Erased, Node};
use crate::Iter;

pub mod iterator;

mod algorithms;

/// A queue of owned strings, implemented as a cyclic doubly-linked list.
///
/// The `Queue` owns a payload-free ghost node that anchors the circle;
/// the queue is empty iff the ghost's neighbors are the ghost itself.
/// Inserting or removing at either end is *O*(1); [`len`] and the
/// structural algorithms ([`reverse`], [`swap_pairs`], [`delete_middle`],
/// [`delete_duplicates`], [`sort`]) are linear scans over the circle.
///
/// Every inserted value is copied into a freshly allocated owned buffer,
/// so the queue never borrows from its callers. Dropping the queue
/// releases every remaining element and the ghost node.
///
/// [`len`]: Queue::len
/// [`reverse`]: Queue::reverse
/// [`swap_pairs`]: Queue::swap_pairs
/// [`delete_middle`]: Queue::delete_middle
/// [`delete_duplicates`]: Queue::delete_duplicates
/// [`sort`]: Queue::sort
pub struct Queue {
    ghost: Box<Node<Erased>>,
    _marker: PhantomData<Box<Node<String>>>,
}

/// An element removed from a [`Queue`].
///
/// Removing is different from deleting: [`Queue::remove_head`] and
/// [`Queue::remove_tail`] only unlink the element, and hand its ownership
/// over to the caller as an `Element`. The value buffer and the node are
/// released when the `Element` is dropped (or consumed by
/// [`into_value`](Element::into_value)), never by the queue.
pub struct Element {
    pub(crate) node: Box<Node<String>>,
}

impl Element {
    /// The string value carried by this element.
    pub fn value(&self) -> &str {
        &self.node.element
    }

    /// Consume the element, releasing the node and returning the owned
    /// value.
    pub fn into_value(self) -> String {
        Node::into_element(self.node)
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Element").field(&self.value()).finish()
    }
}

// private methods
impl Queue {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<String>> {
        NonNull::from(self.ghost.as_ref()).cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<String>> {
        // SAFETY: `ghost.next` is always valid (either the ghost itself, or
        // the first element of the circle).
        NonNull::from(unsafe { self.ghost_node().as_ref().next.as_ref() })
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<String>> {
        // SAFETY: `ghost.prev` is always valid (either the ghost itself, or
        // the last element of the circle).
        NonNull::from(unsafe { self.ghost_node().as_ref().prev.as_ref() })
    }

    /// Unlink a single element node from the circle and reclaim it as a box.
    ///
    /// It is unsafe because it does not check whether `node` is an element
    /// of this queue; passing the ghost node or a node of another queue
    /// makes the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<String>>) -> Box<Node<String>> {
        link::unlink(node);
        Box::from_raw(node.as_ptr())
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::Queue;
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: link::new_ghost(),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert!(queue.is_empty());
    ///
    /// queue.push_head("foo");
    /// assert!(!queue.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements in the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time: the length is
    /// counted by walking the circle, not cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.len(), 0);
    ///
    /// queue.push_tail("a");
    /// queue.push_tail("b");
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Insert a copy of `s` at the head of the queue.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_head("world");
    /// queue.push_head("hello");
    /// assert_eq!(Vec::from_iter(queue.iter()), ["hello", "world"]);
    /// ```
    pub fn push_head(&mut self, s: &str) {
        let node = Node::new_detached(s.to_owned());
        // SAFETY: the ghost node is always part of a valid circle, and
        // `node` is freshly detached.
        unsafe { link::insert_after(node, self.ghost_node()) };
    }

    /// Insert a copy of `s` at the tail of the queue.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_tail("hello");
    /// queue.push_tail("world");
    /// assert_eq!(Vec::from_iter(queue.iter()), ["hello", "world"]);
    /// ```
    pub fn push_tail(&mut self, s: &str) {
        self.push_tail_value(s.to_owned());
    }

    /// Insert an already-owned value at the tail, without re-copying it.
    pub(crate) fn push_tail_value(&mut self, s: String) {
        let node = Node::new_detached(s);
        // SAFETY: same as `push_head`.
        unsafe { link::insert_before(node, self.ghost_node()) };
    }

    /// Unlink the head element and return it, or `None` if the queue is
    /// empty.
    ///
    /// If `out` is supplied, up to `out.len() - 1` bytes of the value are
    /// copied into it, followed by a NUL terminator.
    ///
    /// The returned [`Element`] still owns its value buffer and node;
    /// nothing is released by this call.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, plus the cost of the
    /// optional copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_tail("hello");
    ///
    /// let mut buf = [0u8; 4];
    /// let element = queue.remove_head(Some(&mut buf)).unwrap();
    /// assert_eq!(&buf, b"hel\0"); // truncated at `buf.len() - 1` bytes
    /// assert_eq!(element.into_value(), "hello"); // the value is intact
    ///
    /// assert!(queue.remove_head(None).is_none());
    /// ```
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is not empty, so the front node is an element
        // of this queue.
        let node = unsafe { self.detach_node(self.front_node()) };
        if let Some(out) = out {
            copy_out(&node.element, out);
        }
        Some(Element { node })
    }

    /// Unlink the tail element and return it, or `None` if the queue is
    /// empty. Otherwise the same as [`remove_head`](Queue::remove_head).
    pub fn remove_tail(&mut self, out: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is not empty, so the back node is an element
        // of this queue.
        let node = unsafe { self.detach_node(self.back_node()) };
        if let Some(out) = out {
            copy_out(&node.element, out);
        }
        Some(Element { node })
    }

    /// Remove the head element and return its value, or `None` if the
    /// queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.pop_head(), None);
    ///
    /// queue.push_head("a");
    /// queue.push_head("b");
    /// assert_eq!(queue.pop_head(), Some("b".to_string()));
    /// assert_eq!(queue.pop_head(), Some("a".to_string()));
    /// assert_eq!(queue.pop_head(), None);
    /// ```
    pub fn pop_head(&mut self) -> Option<String> {
        self.remove_head(None).map(Element::into_value)
    }

    /// Remove the tail element and return its value, or `None` if the
    /// queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_tail("a");
    /// queue.push_tail("b");
    /// assert_eq!(queue.pop_tail(), Some("b".to_string()));
    /// ```
    pub fn pop_tail(&mut self) -> Option<String> {
        self.remove_tail(None).map(Element::into_value)
    }

    /// Remove and release all elements of the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_head().is_some() {}
    }

    /// Provides a forward iterator over the element values.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_tail("a");
    /// queue.push_tail("b");
    ///
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next(), Some("a"));
    /// assert_eq!(iter.next(), Some("b"));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

/// Copy `value` into `out`, truncated to `out.len() - 1` bytes, followed
/// by a NUL terminator. An empty `out` is left untouched.
fn copy_out(value: &str, out: &mut [u8]) {
    if out.is_empty() {
        return;
    }
    let n = value.len().min(out.len() - 1);
    out[..n].copy_from_slice(&value.as_bytes()[..n]);
    out[n] = 0;
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl Send for Queue {}

unsafe impl Sync for Queue {}

#[cfg(test)]
mod tests {
    use crate::Queue;
    use std::iter::FromIterator;

    #[test]
    fn queue_create() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        queue.push_tail("1");
        assert!(!queue.is_empty());
        assert_eq!(queue.pop_tail(), Some("1".to_string()));
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_push_and_pop() {
        let mut queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.pop_head(), None);
        assert_eq!(queue.pop_tail(), None);

        queue.push_tail("1");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_head(), Some("1".to_string()));
        assert_eq!(queue.pop_tail(), None);
        assert!(queue.is_empty());

        queue.push_head("1");
        queue.push_head("2");
        queue.push_tail("3");
        assert_eq!(queue.len(), 3);
        // [2, 1, 3]
        assert_eq!(queue.pop_head(), Some("2".to_string()));
        assert_eq!(queue.pop_tail(), Some("3".to_string()));
        assert_eq!(queue.pop_head(), Some("1".to_string()));
        assert_eq!(queue.len(), 0);
    }

    // `len` after any sequence of end operations equals net insertions
    // minus removals, and values come out in the order the used ends
    // predict.
    #[test]
    fn queue_net_size_and_order() {
        let mut queue = Queue::new();
        for i in 0..10 {
            queue.push_tail(&i.to_string());
        }
        for i in 10..15 {
            queue.push_head(&i.to_string());
        }
        assert_eq!(queue.len(), 15);

        // head removals see the head insertions in LIFO order.
        for i in (10..15).rev() {
            assert_eq!(queue.pop_head(), Some(i.to_string()));
        }
        assert_eq!(queue.len(), 10);

        // the tail insertions come out FIFO from the head.
        for i in 0..5 {
            assert_eq!(queue.pop_head(), Some(i.to_string()));
        }
        // and LIFO from the tail.
        for i in (5..10).rev() {
            assert_eq!(queue.pop_tail(), Some(i.to_string()));
        }
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn queue_remove_is_not_delete() {
        let mut queue = Queue::from_iter(["front", "middle", "back"]);

        let head = queue.remove_head(None).unwrap();
        let tail = queue.remove_tail(None).unwrap();
        assert_eq!(Vec::from_iter(queue.iter()), ["middle"]);

        // The removed elements are still alive and owned by the caller.
        assert_eq!(head.value(), "front");
        assert_eq!(tail.value(), "back");
        assert_eq!(head.into_value(), "front");
        drop(tail);
    }

    #[test]
    fn queue_remove_copies_truncated() {
        let mut queue = Queue::from_iter(["hello", ""]);

        let mut buf = [0xffu8; 4];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(&buf, b"hel\0");
        assert_eq!(element.value(), "hello");

        // A genuine empty-string element is distinguishable from "no
        // element": the former is `Some` with an empty value.
        let mut buf = [0xffu8; 4];
        let element = queue.remove_tail(Some(&mut buf)).unwrap();
        assert_eq!(buf, [0, 0xff, 0xff, 0xff]);
        assert_eq!(element.value(), "");

        assert!(queue.remove_head(Some(&mut buf)).is_none());

        // A zero-capacity buffer receives nothing, not even a terminator.
        let mut queue = Queue::from_iter(["x"]);
        let mut empty: [u8; 0] = [];
        assert!(queue.remove_head(Some(&mut empty)).is_some());
    }

    #[test]
    fn queue_clear() {
        let mut queue = Queue::from_iter(["a", "b", "c"]);
        assert_eq!(queue.len(), 3);
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        // Reusable after clearing.
        queue.push_tail("d");
        assert_eq!(queue.pop_head(), Some("d".to_string()));
    }

    #[test]
    fn queue_debug() {
        let queue = Queue::from_iter(["a", "b"]);
        assert_eq!(format!("{:?}", queue), r#"["a", "b"]"#);
    }
}
