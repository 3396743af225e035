//! An experimental fully-safe rendition of the string queue, where each
//! `next`/`prev` edge owns one half of its target node (`StaticRc`) and
//! interior mutability is checked at compile time (`GhostCell`). It keeps
//! the *O*(1) end operations without any raw aliasing pointers, at the
//! price of threading a token through every call.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct Queue<'id> {
    ends: [Option<NodePtr<'id>>; 2],
}

struct Node<'id> {
    ends: [Option<NodePtr<'id>>; 2],
    value: String,
}

type NodePtr<'id> = Half<GhostCell<'id, Node<'id>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id> Node<'id> {
    fn new(value: String) -> Self {
        Self {
            value,
            ends: [None, None],
        }
    }
}

impl<'id> Default for Queue<'id> {
    fn default() -> Self {
        Self { ends: [None, None] }
    }
}

impl<'id> Queue<'id> {
    const HEAD: usize = 0;
    const TAIL: usize = 1;

    fn push_at(&mut self, side: usize, s: &str, token: &mut GhostToken<'id>) {
        let other = 1 - side;
        let (left, right) = Full::split(Full::new(GhostCell::new(Node::new(s.to_owned()))));
        match self.ends[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(token).ends[other] = Some(left);
                right.deref().borrow_mut(token).ends[side] = Some(this_side);
            }
            None => self.ends[other] = Some(left),
        }
        self.ends[side] = Some(right);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<String> {
        debug_assert!(side < 2);
        let other = 1 - side;
        let right = self.ends[side].take()?;
        let left = match right.deref().borrow_mut(token).ends[side].take() {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(token).ends[other]
                    .take()
                    .unwrap();
                self.ends[side] = Some(this_side);
                left
            }
            None => self.ends[other].take().unwrap(),
        };
        Some(Full::into_box(Full::join(left, right)).into_inner().value)
    }
}

impl<'id> Queue<'id> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.ends[Self::HEAD].is_none()
    }
    pub fn push_head(&mut self, s: &str, token: &mut GhostToken<'id>) {
        self.push_at(Self::HEAD, s, token);
    }
    pub fn pop_head(&mut self, token: &mut GhostToken<'id>) -> Option<String> {
        self.pop_at(Self::HEAD, token)
    }
    pub fn push_tail(&mut self, s: &str, token: &mut GhostToken<'id>) {
        self.push_at(Self::TAIL, s, token);
    }
    pub fn pop_tail(&mut self, token: &mut GhostToken<'id>) -> Option<String> {
        self.pop_at(Self::TAIL, token)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::Queue;
    use ghost_cell::GhostToken;

    #[test]
    fn queue_push_pop() {
        GhostToken::new(|mut token| {
            let mut queue = Queue::new();
            assert!(queue.is_empty());
            queue.push_tail("first", &mut token);
            queue.push_head("second", &mut token);
            assert!(!queue.is_empty());
            assert_eq!(queue.pop_tail(&mut token), Some("first".to_string()));
            assert_eq!(queue.pop_head(&mut token), Some("second".to_string()));
            assert_eq!(queue.pop_head(&mut token), None);
            assert!(queue.is_empty());
        })
    }
}
