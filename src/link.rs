//! Payload-independent linkage layer of the cyclic list.
//!
//! Every node carries a `next` and a `prev` pointer forming a circular
//! topology anchored at a payload-free ghost node. All splice operations
//! here are *O*(1) pointer rewrites; none of them allocates or releases
//! memory. Preconditions (the arguments belong to a consistent circle,
//! detached nodes are really detached) are guaranteed by the `queue`
//! module, which is the only caller.

use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// A node of the cyclic list.
///
/// `#[repr(C)]` keeps the two links at the front of the layout, so the
/// ghost node (`Node<Erased>`) can be cast to `Node<T>` for traversal
/// without ever reading a payload it does not have.
#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// The non-payload of a ghost node.
#[derive(Default)]
pub(crate) struct Erased;

impl<T> Node<T> {
    /// Create a detached node with the given element.
    ///
    /// `next` and `prev` are left uninitialized; the node must be spliced
    /// into a list (which writes both links) before they are read.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        // SAFETY:
        // - `node.element` is written manually, so it is safe;
        // - `node.prev` and `node.next` are dangling, but need unsafe blocks
        //   for dereference, so it is also safe.
        NonNull::from(unsafe {
            #[allow(invalid_value, clippy::uninit_assumed_init)]
            let node = Box::<Node<T>>::leak(Box::new(MaybeUninit::uninit().assume_init()));
            std::ptr::write(&mut node.element, element);
            node
        })
    }

    /// Take the element out of a node removed from a list, releasing the
    /// node itself.
    pub(crate) fn into_element(node: Box<Node<T>>) -> T {
        let Node { element, .. } = *node;
        element
    }
}

/// Make the ghost node of a new list: a one-element circle pointing to
/// itself. Used only for list anchors, never for elements.
pub(crate) fn new_ghost() -> Box<Node<Erased>> {
    let ghost_ptr = Node::new_detached(Erased::default());
    // SAFETY:
    // - `ghost.next` and `ghost.prev` are initialized immediately below;
    // - `ghost.element` is zero-sized and never read.
    let mut ghost = unsafe { Box::from_raw(ghost_ptr.as_ptr()) };
    ghost.next = ghost_ptr;
    ghost.prev = ghost_ptr;
    ghost
}

/// Make `prev` and `next` adjacent, rewriting one link on each side.
pub(crate) unsafe fn connect<T>(mut prev: NonNull<Node<T>>, mut next: NonNull<Node<T>>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Splice a detached `node` into the circle right after `anchor`.
///
/// `anchor` must already be part of a valid circle, and `node` must not be.
pub(crate) unsafe fn insert_after<T>(node: NonNull<Node<T>>, anchor: NonNull<Node<T>>) {
    let next = anchor.as_ref().next;
    connect(anchor, node);
    connect(node, next);
    #[cfg(debug_assertions)]
    {
        assert_adjacent(anchor, node);
        assert_adjacent(node, next);
    }
}

/// Splice a detached `node` into the circle right before `anchor`.
pub(crate) unsafe fn insert_before<T>(node: NonNull<Node<T>>, anchor: NonNull<Node<T>>) {
    insert_after(node, anchor.as_ref().prev);
}

/// Remove `node` from its circle, restoring the invariant for its former
/// neighbors.
///
/// The node's own links are left stale: they must not be used for list
/// purposes afterwards. No memory is released.
pub(crate) unsafe fn unlink<T>(node: NonNull<Node<T>>) {
    connect(node.as_ref().prev, node.as_ref().next);
}

/// Relink the single node `from` to the position right before `to`.
pub(crate) unsafe fn move_node<T>(from: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    move_nodes(from, from, to);
}

/// Relink the closed range `from_front..=from_back` to the position right
/// before `to`. `to` must not be inside the range.
pub(crate) unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(from_front.as_ref().prev, from_back.as_ref().next);
    connect(to.as_ref().prev, from_front);
    connect(from_back, to);
}

#[cfg(debug_assertions)]
pub(crate) fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Walk the circle from `start` and collect the elements until `start`
    // is reached again, checking the `next`/`prev` invariant at each step.
    unsafe fn collect_circle(start: NonNull<Node<i32>>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cur = start.as_ref().next;
        while cur != start {
            assert_eq!(cur.as_ref().prev.as_ref().next, cur);
            assert_eq!(cur.as_ref().next.as_ref().prev, cur);
            out.push(cur.as_ref().element);
            cur = cur.as_ref().next;
        }
        out
    }

    unsafe fn free_circle(start: NonNull<Node<i32>>) {
        let mut cur = start.as_ref().next;
        while cur != start {
            let next = cur.as_ref().next;
            drop(Box::from_raw(cur.as_ptr()));
            cur = next;
        }
    }

    #[test]
    fn ghost_self_cycle() {
        let ghost = new_ghost();
        let ptr = NonNull::from(ghost.as_ref());
        assert_eq!(ghost.next, ptr);
        assert_eq!(ghost.prev, ptr);
    }

    #[test]
    fn splice_and_unlink() {
        unsafe {
            let ghost = new_ghost();
            let anchor = NonNull::from(ghost.as_ref()).cast::<Node<i32>>();

            let a = Node::new_detached(1);
            let b = Node::new_detached(2);
            let c = Node::new_detached(3);
            insert_after(a, anchor); // [1]
            insert_before(c, anchor); // [1, 3]
            insert_after(b, a); // [1, 2, 3]
            assert_eq!(collect_circle(anchor), vec![1, 2, 3]);

            unlink(b); // [1, 3]
            assert_eq!(collect_circle(anchor), vec![1, 3]);
            assert_eq!(Node::into_element(Box::from_raw(b.as_ptr())), 2);

            move_node(c, a); // [3, 1]
            assert_eq!(collect_circle(anchor), vec![3, 1]);

            free_circle(anchor);
        }
    }
}
