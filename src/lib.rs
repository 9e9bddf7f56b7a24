//! This crate provides a circular doubly-linked list with a movable
//! cursor, implemented as a cyclic chain.
//!
//! A [`Chain`] keeps its links in a single ring. All structural edits are
//! relative to the cursor: [`insert`] splices a new link right after it
//! and steps onto it, [`delete`] removes it and steps back. The origin
//! link is a stable anchor that [`reset`] returns to and that the bulk
//! operations re-establish.
//!
//! Here is a quick example showing how the chain works.
//!
//! ```
//! use cyclic_chain::Chain;
//! use std::iter::FromIterator;
//!
//! let mut chain = Chain::from_iter([1, 2, 3]);
//!
//! chain.reset(); // back to the origin: the first link
//! assert_eq!(chain.current(), Some(&1));
//!
//! chain.forward(2).unwrap();
//! assert_eq!(chain.current(), Some(&3));
//!
//! chain.rewind(1).unwrap();
//! assert_eq!(chain.current(), Some(&2));
//!
//! chain.delete().unwrap(); // removes 2, the cursor backs onto 1
//! assert_eq!(chain.current(), Some(&1));
//! assert_eq!(chain.len(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a populated chain is like the following graph:
//!
//! ```text
//!      ┌──────────────────────────────────────────────────┐
//!      ↓                                                  │
//! ╔═══════════╗        ╔═══════════╗        ╔═══════════╗ │
//! ║   next    ║ ─────→ ║   next    ║ ─ ┄┄ → ║   next    ║─┘
//! ╟───────────╢        ╟───────────╢        ╟───────────╢
//! ║   prev    ║ ←───── ║   prev    ║ ← ┄┄ ─ ║   prev    ║←┐
//! ╟───────────╢ ─┐     ╟───────────╢        ╟───────────╢ │
//! ║  slot: T? ║  │     ║  slot: T? ║        ║  slot: T? ║ │
//! ╚═══════════╝  └─────────────────────────────────────────┘
//!      ↑   ↑               ↑
//!      │   └─ orig         └─ link (cursor)
//!      │
//! ╔═══════════╗
//! ║   chain   ║  (+ len, + disposal policy)
//! ╚═══════════╝
//! ```
//!
//! Each link is allocated on the heap and owns an optional payload slot.
//! A ring of one link points at itself in both directions; an empty chain
//! has no links at all, and both the cursor and the origin are absent.
//! There is no sentinel link: walking `len` steps in either direction
//! always returns to the starting link.
//!
//! # Cursor and Origin
//!
//! Traversal never changes ring membership. [`move_by`] walks the cursor
//! `n` steps, wrapping modulo the length (negative `n` walks backward);
//! [`forward`] and [`rewind`] fix the sign. The origin moves only when
//! the ring is restructured: the first link inserted into an empty chain
//! becomes the origin, and [`trim`], [`sort_by`] and friends re-anchor it
//! deterministically.
//!
//! # Payload Disposal
//!
//! A chain is created with a disposal policy, the [`Dispose`] capability,
//! fixed for its lifetime. Every payload removed structurally (by
//! [`delete`], [`clear`] or dropping the chain) is handed to the policy
//! exactly once. The default [`DropDispose`] simply drops payloads;
//! [`DisposeFn`] wraps a closure for bookkeeping:
//!
//! ```
//! use cyclic_chain::{Chain, DisposeFn};
//! use std::cell::RefCell;
//!
//! let disposed = RefCell::new(Vec::new());
//! let mut chain = Chain::with_dispose(DisposeFn(|id: u32| {
//!     disposed.borrow_mut().push(id)
//! }));
//!
//! chain.insert(7);
//! chain.insert(8);
//! chain.delete().unwrap();
//! assert_eq!(disposed.borrow().as_slice(), &[8]);
//!
//! drop(chain);
//! assert_eq!(disposed.borrow().as_slice(), &[8, 7]);
//! ```
//!
//! Payloads that leave the ring non-structurally go back to the caller
//! instead: [`detach`], the value replaced by [`attach`], and everything
//! yielded by the consuming iterator.
//!
//! # Maintenance
//!
//! Links may carry no payload ([`insert_empty`], [`detach`]); [`trim`]
//! removes all such links in one pass without consulting the disposal
//! policy. [`sort_by`] reorders the whole ring by a comparator (stable,
//! empty slots last) and parks both the origin and the cursor on the
//! first-ranked link:
//!
//! ```
//! use cyclic_chain::Chain;
//!
//! let mut chain = Chain::new();
//! for i in 0..6 {
//!     if i % 3 == 0 {
//!         chain.insert(i);
//!     } else {
//!         chain.insert_empty();
//!     }
//! }
//!
//! chain.trim();
//! assert_eq!(chain.len(), 2);
//!
//! chain.sort_by(|a, b| b.cmp(a)); // descending
//! assert_eq!(chain.current(), Some(&3));
//! ```
//!
//! Larger restructurings compose from the same ring primitives:
//! [`partition`] detaches a positional segment into its own chain,
//! [`splice`] grafts a whole chain in after the cursor, and
//! [`copy_with`] deep-copies through a caller-supplied copy function,
//! the mirror image of the disposal capability.
//!
//! ```
//! use cyclic_chain::Chain;
//! use std::iter::FromIterator;
//!
//! let mut chain = Chain::from_iter(0..6);
//! chain.reset();
//!
//! let segment = chain.partition(1, 3).unwrap();
//! assert_eq!(segment.len(), 2);
//! let rest: Vec<i32> = chain.iter().flatten().copied().collect();
//! assert_eq!(rest, vec![0, 3, 4, 5]);
//!
//! chain.splice(segment);
//! let all: Vec<i32> = chain.iter().flatten().copied().collect();
//! assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
//! ```
//!
//! # Iteration
//!
//! [`Iter`] and [`IterMut`] walk the ring once from the origin, yielding
//! each link's payload slot; they are fused and non-cyclic. Use
//! `flatten()` to skip empty slots:
//!
//! ```
//! use cyclic_chain::Chain;
//! use std::iter::FromIterator;
//!
//! let chain = Chain::from_iter([1, 2, 3]);
//! let doubled: Vec<i32> = chain.iter().flatten().map(|n| n * 2).collect();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```
//!
//! # Features
//!
//! The chain keeps an O(1) length counter behind the `length` feature
//! (enabled by default). Without it, [`len`] counts by walking the ring:
//!
//! ```text
//! [dependencies]
//! cyclic_chain = { default-features = false }
//! ```
//!
//! [`Chain`]: crate::Chain
//! [`insert`]: crate::Chain::insert
//! [`insert_empty`]: crate::Chain::insert_empty
//! [`delete`]: crate::Chain::delete
//! [`clear`]: crate::Chain::clear
//! [`reset`]: crate::Chain::reset
//! [`move_by`]: crate::Chain::move_by
//! [`forward`]: crate::Chain::forward
//! [`rewind`]: crate::Chain::rewind
//! [`attach`]: crate::Chain::attach
//! [`detach`]: crate::Chain::detach
//! [`trim`]: crate::Chain::trim
//! [`sort_by`]: crate::Chain::sort_by
//! [`partition`]: crate::Chain::partition
//! [`splice`]: crate::Chain::splice
//! [`copy_with`]: crate::Chain::copy_with
//! [`len`]: crate::Chain::len
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut

#[doc(inline)]
pub use chain::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use chain::{Chain, Dispose, DisposeFn, DropDispose};
#[doc(inline)]
pub use error::{EmptyChainError, PartitionError};

pub mod chain;
pub mod error;

mod experiments;
