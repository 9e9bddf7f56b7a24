//! A fully safe two-ended ring built on `ghost_cell` and `static_rc`,
//! kept beside the raw-pointer chain as a comparison point.
//!
//! Every slot is co-owned by exactly two `StaticRc` halves, one per
//! neighbor direction, so the cyclic ownership that `chain` handles with
//! raw pointers is expressed here entirely in the type system. Mutation
//! goes through a `GhostToken`, which is also what keeps this variant out
//! of the public API: threading the token through every call is too
//! intrusive for the chain's cursor-centric surface.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

const FRONT: usize = 0;
const BACK: usize = 1;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;
type SlotPtr<'id, T> = Half<GhostCell<'id, Slot<'id, T>>>;

struct Slot<'id, T> {
    // `away[end]` holds the half for the neighbor on the side opposite
    // of `end`; the halves for the outermost slots live in
    // `TokenRing::ends`.
    away: [Option<SlotPtr<'id, T>>; 2],
    payload: T,
}

impl<'id, T> Slot<'id, T> {
    fn new(payload: T) -> Self {
        let away = [None, None];
        Self { away, payload }
    }
}

pub struct TokenRing<'id, T> {
    ends: [Option<SlotPtr<'id, T>>; 2],
    len: usize,
}

impl<'id, T> Default for TokenRing<'id, T> {
    fn default() -> Self {
        Self {
            ends: [None, None],
            len: 0,
        }
    }
}

impl<'id, T> TokenRing<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn grow(&mut self, end: usize, payload: T, token: &mut GhostToken<'id>) {
        let oppo = 1 - end;
        let (inner, outer) = Full::split(Full::new(GhostCell::new(Slot::new(payload))));
        match self.ends[end].take() {
            Some(old) => {
                old.deref().borrow_mut(token).away[oppo] = Some(inner);
                outer.deref().borrow_mut(token).away[end] = Some(old);
            }
            None => self.ends[oppo] = Some(inner),
        }
        self.ends[end] = Some(outer);
        self.len += 1;
    }

    fn shrink(&mut self, end: usize, token: &mut GhostToken<'id>) -> Option<T> {
        let oppo = 1 - end;
        let outer = self.ends[end].take()?;
        let inner = match outer.deref().borrow_mut(token).away[end].take() {
            Some(old) => {
                let inner = old.deref().borrow_mut(token).away[oppo].take().unwrap();
                self.ends[end] = Some(old);
                inner
            }
            None => self.ends[oppo].take().unwrap(),
        };
        self.len -= 1;
        Some(Full::into_box(Full::join(inner, outer)).into_inner().payload)
    }

    pub fn push_front(&mut self, payload: T, token: &mut GhostToken<'id>) {
        self.grow(FRONT, payload, token);
    }

    pub fn push_back(&mut self, payload: T, token: &mut GhostToken<'id>) {
        self.grow(BACK, payload, token);
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.shrink(FRONT, token)
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.shrink(BACK, token)
    }

    pub fn front<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a T> {
        self.ends[FRONT]
            .as_ref()
            .map(|slot| &slot.deref().borrow(token).payload)
    }

    pub fn back<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a T> {
        self.ends[BACK]
            .as_ref()
            .map(|slot| &slot.deref().borrow(token).payload)
    }

    pub fn clear(&mut self, token: &mut GhostToken<'id>) {
        while self.shrink(FRONT, token).is_some() {}
    }
}
