use crate::chain::iterator::{Iter, IterMut};
use crate::chain::{Chain, Dispose, Node};
use crate::error::PartitionError;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ptr::NonNull;

impl<T, D: Dispose<T>> Chain<T, D> {
    /// Removes every link carrying no payload, in one forward pass from
    /// the origin. O(n) time, O(1) extra space.
    ///
    /// The disposal policy is never consulted: removed links have nothing
    /// to dispose. Surviving links keep their relative order. If the
    /// origin or cursor link is removed, it re-anchors to the nearest
    /// surviving link in the forward direction; if nothing survives, the
    /// chain becomes empty. Idempotent.
    pub fn trim(&mut self) {
        let total = self.len();
        let mut cur = match self.orig {
            Some(node) => node,
            None => return,
        };
        for _ in 0..total {
            // SAFETY: nodes ahead of the walk have not been unlinked yet,
            // and `next` of a live ring member is a live member.
            let next = unsafe { cur.as_ref().next };
            let vacant = unsafe { cur.as_ref().slot.is_none() };
            if vacant {
                self.unlink_vacant(cur);
            }
            cur = next;
        }
    }

    fn unlink_vacant(&mut self, at: NonNull<Node<T>>) {
        // SAFETY: `at` is a live ring member, so are its neighbors.
        let next = unsafe { at.as_ref().next };
        if next == at {
            self.link = None;
            self.orig = None;
        } else {
            let mut next = next;
            let mut prev = unsafe { at.as_ref().prev };
            unsafe {
                prev.as_mut().next = next;
                next.as_mut().prev = prev;
            }
            if self.orig == Some(at) {
                self.orig = Some(next);
            }
            if self.link == Some(at) {
                self.link = Some(next);
            }
        }
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        // SAFETY: `at` is unlinked now and was allocated via `Box`.
        drop(unsafe { Box::from_raw(at.as_ptr()) });
    }

    /// Reorders the ring ascending by `T`'s ordering.
    ///
    /// See [`sort_by`](Chain::sort_by).
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp);
    }

    /// Reorders the whole ring by the given comparator, ascending.
    ///
    /// The sort is stable: equal-ranked links keep their relative ring
    /// order. Links with no payload order after every populated link.
    /// Afterwards both the origin and the cursor sit on the first-ranked
    /// link. Uses O(n) scratch space for the node sequence.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let n = self.len();
        if n < 2 {
            return;
        }
        let start = match self.orig {
            Some(node) => node,
            None => return,
        };
        let mut nodes = Vec::with_capacity(n);
        let mut cur = start;
        for _ in 0..n {
            nodes.push(cur);
            // SAFETY: `next` of a live ring member is a live member.
            cur = unsafe { cur.as_ref().next };
        }
        nodes.sort_by(|a, b| {
            // SAFETY: the collected nodes are distinct live ring members;
            // only shared reads happen while sorting.
            let (a, b) = unsafe { (&a.as_ref().slot, &b.as_ref().slot) };
            slot_rank(&mut compare, a, b)
        });
        for i in 0..n {
            let mut node = nodes[i];
            // SAFETY: rewiring distinct live nodes collected above.
            unsafe {
                node.as_mut().next = nodes[(i + 1) % n];
                node.as_mut().prev = nodes[(i + n - 1) % n];
            }
        }
        self.orig = Some(nodes[0]);
        self.link = Some(nodes[0]);
    }

    /// Reorders the ring ascending by a key function.
    ///
    /// See [`sort_by`](Chain::sort_by).
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.sort_by(|a, b| key(a).cmp(&key(b)));
    }

    /// Detaches ring positions `[from, to)`, counted forward from the
    /// origin, into a new chain sharing this chain's disposal policy.
    ///
    /// The segment keeps its order; the new chain's cursor and origin sit
    /// on its first link. If this chain's origin or cursor was inside the
    /// segment, it re-anchors to the first link after the segment.
    pub fn partition(&mut self, from: usize, to: usize) -> Result<Chain<T, D>, PartitionError>
    where
        D: Clone,
    {
        let len = self.len();
        if from > to || to > len {
            return Err(PartitionError { from, to, len });
        }
        let mut part = Chain::with_dispose(self.dispose.clone());
        let count = to - from;
        if count == 0 {
            return Ok(part);
        }
        // `count > 0` ruled out the empty chain above
        let mut start = match self.orig {
            Some(node) => node,
            None => return Ok(part),
        };
        // SAFETY: walking and rewiring live ring members throughout.
        for _ in 0..from {
            start = unsafe { start.as_ref().next };
        }
        let mut last = start;
        for _ in 0..count - 1 {
            last = unsafe { last.as_ref().next };
        }
        if count == len {
            part.orig = self.orig.take();
            part.link = part.orig;
            self.link = None;
        } else {
            let mut before = unsafe { start.as_ref().prev };
            let mut after = unsafe { last.as_ref().next };
            unsafe {
                before.as_mut().next = after;
                after.as_mut().prev = before;
                start.as_mut().prev = last;
                last.as_mut().next = start;
            }
            let mut seg = start;
            for _ in 0..count {
                if self.orig == Some(seg) {
                    self.orig = Some(after);
                }
                if self.link == Some(seg) {
                    self.link = Some(after);
                }
                seg = unsafe { seg.as_ref().next };
            }
            part.orig = Some(start);
            part.link = Some(start);
        }
        #[cfg(feature = "length")]
        {
            self.len -= count;
            part.len = count;
        }
        Ok(part)
    }

    /// Consumes `other` and grafts its whole ring immediately after the
    /// cursor, starting at `other`'s origin. The receiving cursor does
    /// not move; splicing into an empty chain adopts `other`'s cursor and
    /// origin.
    pub fn splice(&mut self, mut other: Chain<T, D>) {
        let donor_link = other.link.take();
        let head = match other.orig.take() {
            Some(node) => node,
            None => return,
        };
        #[cfg(feature = "length")]
        {
            self.len += other.len;
            other.len = 0;
        }
        match self.link {
            None => {
                self.orig = Some(head);
                self.link = donor_link;
            }
            Some(mut at) => {
                let mut head = head;
                // SAFETY: both rings are intact and disjoint; `head.prev`
                // is the donor ring's last link.
                let mut tail = unsafe { head.as_ref().prev };
                let mut after = unsafe { at.as_ref().next };
                unsafe {
                    at.as_mut().next = head;
                    head.as_mut().prev = at;
                    tail.as_mut().next = after;
                    after.as_mut().prev = tail;
                }
            }
        }
    }

    /// Deep-copies the chain through a caller-supplied element copy
    /// function, the mirror image of the disposal capability. Ring order,
    /// origin, empty slots, and the cursor's offset from the origin are
    /// all preserved.
    pub fn copy_with<U, F>(&self, mut copy: F) -> Chain<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut twin = Chain::new();
        for slot in self.iter() {
            match slot {
                Some(payload) => twin.insert(copy(payload)),
                None => twin.insert_empty(),
            }
        }
        if !twin.is_empty() {
            twin.reset();
            // the twin mirrors a non-empty ring, so forward cannot fail
            let _ = twin.forward(self.cursor_offset());
        }
        twin
    }
}

fn slot_rank<T, F>(compare: &mut F, a: &Option<T>, b: &Option<T>) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl<T: Clone, D: Dispose<T> + Clone> Clone for Chain<T, D> {
    fn clone(&self) -> Self {
        let mut twin = Chain::with_dispose(self.dispose.clone());
        for slot in self.iter() {
            match slot {
                Some(payload) => twin.insert(payload.clone()),
                None => twin.insert_empty(),
            }
        }
        if !twin.is_empty() {
            twin.reset();
            let _ = twin.forward(self.cursor_offset());
        }
        twin
    }
}

impl<T: PartialEq, D: Dispose<T>> PartialEq for Chain<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq, D: Dispose<T>> Eq for Chain<T, D> {}

impl<T: Hash, D: Dispose<T>> Hash for Chain<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for slot in self.iter() {
            slot.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T, D: Dispose<T> + Default> Default for Chain<T, D> {
    fn default() -> Self {
        Self::with_dispose(D::default())
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        chain.extend(iter);
        chain
    }
}

impl<T, D: Dispose<T>> Extend<T> for Chain<T, D> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for payload in iter {
            self.insert(payload);
        }
    }
}

unsafe impl<T: Send, D: Dispose<T> + Send> Send for Chain<T, D> {}

unsafe impl<T: Sync, D: Dispose<T> + Sync> Sync for Chain<T, D> {}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::chain::{Chain, DisposeFn};
    use std::cell::RefCell;
    use std::iter::FromIterator;
    use std::rc::Rc;

    fn collect<T: Copy, D: crate::chain::Dispose<T>>(chain: &Chain<T, D>) -> Vec<T> {
        chain.iter().flatten().copied().collect()
    }

    #[test]
    fn trim_keeps_only_populated_links() {
        let mut chain = Chain::new();
        for i in 0..102 {
            if i % 3 == 0 {
                chain.insert(i);
            } else {
                chain.insert_empty();
            }
        }
        assert_eq!(chain.len(), 102);

        chain.trim();
        assert_eq!(chain.len(), 34);

        // indexing is sane after the trim
        chain.reset();
        chain.forward(33).unwrap();
        assert_eq!(chain.current(), Some(&99));

        let expected: Vec<i32> = (0..102).filter(|i| i % 3 == 0).collect();
        assert_eq!(collect(&chain), expected);
    }

    #[test]
    fn trim_is_idempotent() {
        let mut chain = Chain::new();
        chain.insert_empty();
        chain.insert(1);
        chain.insert_empty();
        chain.insert(2);

        chain.trim();
        let once = collect(&chain);
        assert_eq!(chain.len(), 2);

        chain.trim();
        assert_eq!(chain.len(), 2);
        assert_eq!(collect(&chain), once);
    }

    #[test]
    fn trim_empties_an_all_vacant_ring() {
        let mut chain = Chain::<u8>::new();
        for _ in 0..5 {
            chain.insert_empty();
        }
        chain.trim();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);

        // the emptied chain starts a fresh ring
        chain.insert(7);
        assert_eq!(chain.len(), 1);
        assert!(chain.at_origin());
    }

    #[test]
    fn trim_reanchors_origin_and_cursor_forward() {
        let mut chain = Chain::new();
        chain.insert_empty(); // origin
        chain.insert(1);
        chain.insert(2);
        chain.insert_empty(); // cursor
        chain.trim();
        assert_eq!(chain.len(), 2);
        // origin chased forward onto 1, the cursor wrapped onto it too
        assert_eq!(chain.current(), Some(&1));
        assert!(chain.at_origin());
    }

    #[test]
    fn trim_never_disposes() {
        let disposed = Rc::new(RefCell::new(0));
        let count = Rc::clone(&disposed);
        let mut chain = Chain::with_dispose(DisposeFn(move |_: i32| *count.borrow_mut() += 1));
        chain.insert(1);
        chain.insert_empty();
        chain.insert(2);
        chain.trim();
        assert_eq!(*disposed.borrow(), 0);
        drop(chain);
        assert_eq!(*disposed.borrow(), 2);
    }

    #[test]
    fn sort_round_trip() {
        let ids = [11, 77, 97, 22, 88, 99, 33, 55, 44, 66];
        let mut chain = Chain::from_iter(ids.iter().copied());
        chain.sort();

        // the cursor and origin sit on the first-ranked link; walking
        // forward reads the ring in ascending order
        assert!(chain.at_origin());
        let mut walked = Vec::new();
        for _ in 0..chain.len() {
            walked.push(*chain.current().unwrap());
            chain.forward(1).unwrap();
        }
        assert_eq!(walked, vec![11, 22, 33, 44, 55, 66, 77, 88, 97, 99]);
        assert!(chain.at_origin());
    }

    #[test]
    fn sort_is_idempotent() {
        let mut chain = Chain::from_iter([3, 1, 2]);
        chain.sort();
        let once = collect(&chain);
        chain.sort();
        assert_eq!(collect(&chain), once);
    }

    #[test]
    fn sort_is_stable() {
        let mut chain = Chain::from_iter([(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
        chain.sort_by_key(|payload| payload.0);
        assert_eq!(
            collect(&chain),
            vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]
        );
    }

    #[test]
    fn sort_orders_vacant_slots_last() {
        let mut chain = Chain::new();
        chain.insert(2);
        chain.insert_empty();
        chain.insert(1);
        chain.sort();
        let slots: Vec<Option<i32>> = chain.iter().cloned().collect();
        assert_eq!(slots, vec![Some(1), Some(2), None]);
        assert_eq!(chain.current(), Some(&1));
    }

    #[test]
    fn partition_detaches_a_middle_segment() {
        let mut chain = Chain::from_iter(0..6);
        chain.reset();
        let part = chain.partition(1, 3).unwrap();

        assert_eq!(collect(&part), vec![1, 2]);
        assert_eq!(part.len(), 2);
        assert!(part.at_origin());
        assert_eq!(part.current(), Some(&1));

        assert_eq!(collect(&chain), vec![0, 3, 4, 5]);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.current(), Some(&0));
    }

    #[test]
    fn partition_reanchors_a_swallowed_cursor() {
        let mut chain = Chain::from_iter(0..5);
        chain.reset();
        chain.forward(2).unwrap(); // cursor on 2
        let part = chain.partition(1, 4).unwrap();
        assert_eq!(collect(&part), vec![1, 2, 3]);
        // the cursor sat inside the segment; it re-anchors to the first
        // link after it
        assert_eq!(chain.current(), Some(&4));
        chain.reset();
        assert_eq!(chain.current(), Some(&0));
    }

    #[test]
    fn partition_whole_ring_empties_the_source() {
        let mut chain = Chain::from_iter(0..3);
        let part = chain.partition(0, 3).unwrap();
        assert!(chain.is_empty());
        assert_eq!(collect(&part), vec![0, 1, 2]);
    }

    #[test]
    fn partition_rejects_bad_bounds() {
        let mut chain = Chain::from_iter(0..3);
        assert!(chain.partition(2, 1).is_err());
        assert!(chain.partition(0, 4).is_err());
        assert_eq!(chain.len(), 3);

        let empty_part = chain.partition(1, 1).unwrap();
        assert!(empty_part.is_empty());
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn splice_grafts_after_the_cursor() {
        let mut chain = Chain::from_iter([1, 2, 3]);
        chain.reset(); // cursor on 1
        let donor = Chain::from_iter([4, 5]);
        chain.splice(donor);

        assert_eq!(chain.len(), 5);
        assert_eq!(collect(&chain), vec![1, 4, 5, 2, 3]);
        // the receiving cursor does not move
        assert_eq!(chain.current(), Some(&1));
        assert!(chain.at_origin());
    }

    #[test]
    fn splice_into_empty_adopts_the_donor() {
        let mut chain = Chain::new();
        let donor = Chain::from_iter([1, 2, 3]); // donor cursor on 3
        chain.splice(donor);
        assert_eq!(chain.len(), 3);
        assert_eq!(collect(&chain), vec![1, 2, 3]);
        assert_eq!(chain.current(), Some(&3));
        chain.reset();
        assert_eq!(chain.current(), Some(&1));
    }

    #[test]
    fn splice_of_empty_is_a_no_op() {
        let mut chain = Chain::from_iter([1, 2]);
        chain.splice(Chain::new());
        assert_eq!(chain.len(), 2);
        assert_eq!(collect(&chain), vec![1, 2]);
    }

    #[test]
    fn copy_with_mirrors_ring_and_cursor() {
        let mut chain = Chain::new();
        chain.insert(1);
        chain.insert_empty();
        chain.insert(3);
        chain.reset();
        chain.forward(2).unwrap(); // cursor on 3

        let twin = chain.copy_with(|n| n.to_string());
        let slots: Vec<Option<String>> = twin.iter().cloned().collect();
        assert_eq!(slots, vec![Some("1".to_string()), None, Some("3".to_string())]);
        assert_eq!(twin.current(), Some(&"3".to_string()));
        assert!(!twin.at_origin());
    }

    #[test]
    fn clone_and_eq() {
        let mut chain = Chain::from_iter([1, 2, 3]);
        chain.reset();
        chain.forward(1).unwrap();

        let twin = chain.clone();
        assert_eq!(twin, chain);
        assert_eq!(twin.current(), Some(&2));

        let mut other = twin.clone();
        if let Some(n) = other.current_mut() {
            *n = 9;
        }
        assert_ne!(other, chain);
    }

    #[test]
    fn debug_shows_slots() {
        let mut chain = Chain::new();
        chain.insert(1);
        chain.insert_empty();
        assert_eq!(format!("{:?}", chain), "[Some(1), None]");
    }
}
