use crate::chain::{Chain, Dispose};
use crate::error::EmptyChainError;

impl<T, D: Dispose<T>> Chain<T, D> {
    /// Moves the cursor `n` steps along the ring: forward for `n > 0`,
    /// backward for `n < 0`, wrapping modulo the chain length. Moving
    /// `len` steps in either direction is the identity.
    ///
    /// After reduction, the walk takes whichever direction is shorter.
    pub fn move_by(&mut self, n: isize) -> Result<(), EmptyChainError> {
        let at = self.link.ok_or(EmptyChainError)?;
        let len = self.len();
        let steps = n.rem_euclid(len as isize) as usize;
        let mut cur = at;
        // SAFETY: neighbor pointers of ring members are live members.
        if steps <= len / 2 {
            for _ in 0..steps {
                cur = unsafe { cur.as_ref().next };
            }
        } else {
            for _ in 0..len - steps {
                cur = unsafe { cur.as_ref().prev };
            }
        }
        self.link = Some(cur);
        Ok(())
    }

    /// Moves the cursor `n` steps forward.
    pub fn forward(&mut self, n: usize) -> Result<(), EmptyChainError> {
        if self.link.is_none() {
            return Err(EmptyChainError);
        }
        self.move_by((n % self.len()) as isize)
    }

    /// Moves the cursor `n` steps backward.
    pub fn rewind(&mut self, n: usize) -> Result<(), EmptyChainError> {
        if self.link.is_none() {
            return Err(EmptyChainError);
        }
        self.move_by(-((n % self.len()) as isize))
    }

    /// Returns the cursor to the origin link. No-op if already there, or
    /// if the chain is empty.
    pub fn reset(&mut self) {
        self.link = self.orig;
    }

    /// Whether the cursor currently sits on the origin link. Trivially
    /// true for an empty chain.
    pub fn at_origin(&self) -> bool {
        self.link == self.orig
    }

    /// The payload under the cursor, if the chain is non-empty and the
    /// cursor link carries one.
    pub fn current(&self) -> Option<&T> {
        let node = self.link?;
        // SAFETY: the cursor always points at a live ring member.
        unsafe { node.as_ref().slot.as_ref() }
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        let mut node = self.link?;
        // SAFETY: the cursor always points at a live ring member.
        unsafe { node.as_mut().slot.as_mut() }
    }

    pub fn peek_next(&self) -> Option<&T> {
        let node = self.link?;
        // SAFETY: neighbor pointers of ring members are live members.
        unsafe { node.as_ref().next.as_ref().slot.as_ref() }
    }

    pub fn peek_prev(&self) -> Option<&T> {
        let node = self.link?;
        // SAFETY: neighbor pointers of ring members are live members.
        unsafe { node.as_ref().prev.as_ref().slot.as_ref() }
    }

    /// Replaces the payload of the cursor link, returning the previous
    /// one. The replaced payload goes back to the caller, not the
    /// disposal policy. On an empty chain this behaves as
    /// [`insert`](Chain::insert).
    pub fn attach(&mut self, payload: T) -> Option<T> {
        match self.link {
            Some(mut node) => {
                // SAFETY: the cursor always points at a live ring member.
                unsafe { node.as_mut().slot.replace(payload) }
            }
            None => {
                self.insert(payload);
                None
            }
        }
    }

    /// Takes the payload out of the cursor link, leaving an empty slot
    /// behind (a candidate for [`trim`](Chain::trim)).
    pub fn detach(&mut self) -> Option<T> {
        let mut node = self.link?;
        // SAFETY: the cursor always points at a live ring member.
        unsafe { node.as_mut().slot.take() }
    }

    /// Forward distance from the origin to the cursor, in steps.
    pub(crate) fn cursor_offset(&self) -> usize {
        let (start, target) = match (self.orig, self.link) {
            (Some(start), Some(target)) => (start, target),
            _ => return 0,
        };
        let mut offset = 0;
        let mut cur = start;
        while cur != target {
            // SAFETY: neighbor pointers of ring members are live members.
            cur = unsafe { cur.as_ref().next };
            offset += 1;
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::Chain;
    use std::iter::FromIterator;

    #[test]
    fn move_wraps_modulo_length() {
        let mut chain = Chain::from_iter(0..7);
        chain.reset();
        chain.move_by(7).unwrap();
        assert!(chain.at_origin());
        chain.move_by(-7).unwrap();
        assert!(chain.at_origin());
        chain.move_by(10).unwrap();
        assert_eq!(chain.current(), Some(&3));
        chain.move_by(-10).unwrap();
        assert!(chain.at_origin());
    }

    #[test]
    fn move_then_unmove_is_identity() {
        let mut chain = Chain::from_iter(0..5);
        chain.reset();
        chain.forward(2).unwrap();
        let before = chain.current().copied();
        for n in [-13isize, -5, -1, 0, 1, 4, 5, 9, 23].iter() {
            chain.move_by(*n).unwrap();
            chain.move_by(-*n).unwrap();
            assert_eq!(chain.current().copied(), before);
        }
    }

    #[test]
    fn full_walk_visits_every_link_once() {
        let mut chain = Chain::from_iter(0..6);
        assert_eq!(chain.len(), 6);
        chain.reset();
        let mut visited = Vec::new();
        for _ in 0..chain.len() {
            visited.push(chain.current().copied().unwrap());
            chain.forward(1).unwrap();
        }
        assert!(chain.at_origin());
        visited.sort();
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn reset_after_inserts_returns_to_first() {
        let mut chain = Chain::new();
        for i in 0..4 {
            chain.insert(i);
        }
        chain.reset();
        assert_eq!(chain.current(), Some(&0));
        // moving the full length is the identity
        chain.move_by(4).unwrap();
        assert_eq!(chain.current(), Some(&0));
    }

    #[test]
    fn traversal_on_empty_chain() {
        let mut chain = Chain::<i32>::new();
        assert!(chain.move_by(1).is_err());
        assert!(chain.forward(1).is_err());
        assert!(chain.rewind(1).is_err());
        chain.reset();
        assert!(chain.is_empty());
    }

    #[test]
    fn peeks_see_ring_neighbors() {
        let mut chain = Chain::from_iter([10, 20, 30]);
        chain.reset();
        assert_eq!(chain.current(), Some(&10));
        assert_eq!(chain.peek_next(), Some(&20));
        assert_eq!(chain.peek_prev(), Some(&30));
    }

    #[test]
    fn attach_and_detach() {
        let mut chain = Chain::<&str>::new();
        // attach on an empty chain inserts
        assert_eq!(chain.attach("a"), None);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.current(), Some(&"a"));

        // attach on a populated slot swaps the payload out
        assert_eq!(chain.attach("b"), Some("a"));
        assert_eq!(chain.current(), Some(&"b"));

        // detach empties the slot but keeps the link
        assert_eq!(chain.detach(), Some("b"));
        assert_eq!(chain.current(), None);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.detach(), None);
    }
}
