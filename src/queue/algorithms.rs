use crate::link::{self, Node};
use crate::Queue;
use std::ptr::NonNull;

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl Clone for Queue {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl Queue {
    /// Delete (unlink **and** release) the element at zero-based index
    /// ⌊*n*/2⌋ from the head, or return `false` if the queue is empty.
    ///
    /// The middle is found by a slow/fast two-pointer walk: both pointers
    /// start at the first element, the fast one advances two links per
    /// step, and the walk stops when the fast pointer or its successor is
    /// the ghost node. A one-element queue deletes its sole element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and does not
    /// allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// assert!(queue.delete_middle()); // deletes "c" (index 5 / 2 = 2)
    /// assert_eq!(Vec::from_iter(queue.iter()), ["a", "b", "d", "e"]);
    ///
    /// let mut queue = Queue::new();
    /// assert!(!queue.delete_middle());
    /// ```
    pub fn delete_middle(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let ghost = self.ghost_node();
        let (mut slow, mut fast) = (self.front_node(), self.front_node());
        unsafe {
            while fast != ghost && fast.as_ref().next != ghost {
                fast = fast.as_ref().next.as_ref().next;
                slow = slow.as_ref().next;
            }
            // SAFETY: `slow` walked at most half of the circle from the
            // first element, so it is a real element of this queue.
            drop(self.detach_node(slow));
        }
        true
    }

    /// Delete every element whose value is shared with an adjacent run,
    /// leaving only the values that occur exactly once, in their original
    /// relative order.
    ///
    /// The caller guarantees the queue is already sorted ascending (see
    /// [`sort`](Queue::sort)); on an unsorted queue only *adjacent* equal
    /// runs are collapsed.
    ///
    /// A single forward scan accumulates each run of equal values; runs of
    /// length two or more are fully unlinked and released, runs of length
    /// one survive. The ghost node bounds the scan, so a run can never be
    /// split by where the scan starts.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and does not
    /// allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c"]);
    /// queue.delete_duplicates();
    /// assert_eq!(Vec::from_iter(queue.iter()), ["b"]);
    /// ```
    pub fn delete_duplicates(&mut self) {
        let ghost = self.ghost_node();
        let mut cur = self.front_node();
        unsafe {
            while cur != ghost {
                // Find the end of the run of elements equal to `*cur`.
                let mut run_end = cur.as_ref().next;
                while run_end != ghost && run_end.as_ref().element == cur.as_ref().element {
                    run_end = run_end.as_ref().next;
                }
                if run_end != cur.as_ref().next {
                    // The run is longer than one element: delete all of it.
                    let mut node = cur;
                    while node != run_end {
                        let next = node.as_ref().next;
                        drop(self.detach_node(node));
                        node = next;
                    }
                }
                cur = run_end;
            }
        }
    }

    /// Swap each adjacent pair of elements (1st/2nd, 3rd/4th, ...) by
    /// relinking. An unpaired final element is left in place; a queue
    /// with fewer than two elements is untouched.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and does not
    /// allocate: the values are never copied or moved, only the links are
    /// rewritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
    /// queue.swap_pairs();
    /// assert_eq!(Vec::from_iter(queue.iter()), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        let mut cur = self.front_node();
        unsafe {
            while cur != ghost && cur.as_ref().next != ghost {
                // Relink the second node of the pair right before the
                // first one.
                link::move_node(cur.as_ref().next, cur);
                cur = cur.as_ref().next;
            }
        }
    }

    /// Reverse the element order in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and does not
    /// allocate, release or move any element: each node of the circle
    /// (the ghost included) has its `next` and `prev` links swapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// queue.reverse();
    /// assert_eq!(Vec::from_iter(queue.iter()), ["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut cur = ghost;
        unsafe {
            loop {
                let next = cur.as_ref().next;
                let node = cur.as_mut();
                std::mem::swap(&mut node.next, &mut node.prev);
                cur = next;
                if cur == ghost {
                    break;
                }
            }
        }
    }

    /// Sort the elements by byte-wise lexicographic comparison of their
    /// values, ascending, or descending if requested.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* \* log(*n*)) comparisons
    /// and *O*(1) memory beyond pointer bookkeeping.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a top-down merge sort over node ranges of
    /// the circle: each range is split at its middle node (found by a
    /// slow/fast walk), the halves are sorted recursively, and the two
    /// sorted runs are merged by restitching the links in order. The
    /// elements are never materialized into an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["pear", "fig", "apple"]);
    ///
    /// queue.sort(false);
    /// assert_eq!(Vec::from_iter(queue.iter()), ["apple", "fig", "pear"]);
    ///
    /// queue.sort(true);
    /// assert_eq!(Vec::from_iter(queue.iter()), ["pear", "fig", "apple"]);
    /// ```
    pub fn sort(&mut self, descending: bool) {
        let less: Less = if descending { |a, b| b < a } else { |a, b| a < b };
        let (start, end) = (self.front_node(), self.ghost_node());
        if start == end || unsafe { start.as_ref().next } == end {
            return;
        }
        unsafe { sort_range(start, end, less) };
    }
}

type Less = fn(&str, &str) -> bool;

/// Sort the non-empty range `start..end` and return its new front node.
unsafe fn sort_range(
    start: NonNull<Node<String>>,
    end: NonNull<Node<String>>,
    less: Less,
) -> NonNull<Node<String>> {
    if start == end || start.as_ref().next == end {
        return start;
    }
    let mid = mid_of(start, end);
    let first = sort_range(start, mid, less);
    let second = sort_range(mid, end, less);
    merge_runs(first, second, end, less)
}

/// The middle node of the range `start..end`, splitting it into two
/// non-empty halves when the range has at least two nodes.
unsafe fn mid_of(start: NonNull<Node<String>>, end: NonNull<Node<String>>) -> NonNull<Node<String>> {
    let (mut slow, mut fast) = (start, start);
    while fast != end && fast.as_ref().next != end {
        fast = fast.as_ref().next.as_ref().next;
        slow = slow.as_ref().next;
    }
    slow
}

/// Merge the adjacent sorted runs `first..second` and `second..end` by
/// restitching their links in order, and return the front node of the
/// merged run.
///
/// Ties go to the left run, which keeps the merge stable.
unsafe fn merge_runs(
    first: NonNull<Node<String>>,
    second: NonNull<Node<String>>,
    end: NonNull<Node<String>>,
    less: Less,
) -> NonNull<Node<String>> {
    let prev = first.as_ref().prev;
    let (mut a, mut b) = (first, second);
    let mut tail = prev;
    while a != second || b != end {
        // The next pointer of a run node is only rewritten after the node
        // has been taken, so advancing `a`/`b` before stitching is sound.
        let node = if b == end || (a != second && !less(&b.as_ref().element, &a.as_ref().element)) {
            let node = a;
            a = a.as_ref().next;
            node
        } else {
            let node = b;
            b = b.as_ref().next;
            node
        };
        link::connect(tail, node);
        tail = node;
    }
    link::connect(tail, end);
    prev.as_ref().next
}
