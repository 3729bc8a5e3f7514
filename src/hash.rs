//! An order-preserving hasher for integer payloads.
//!
//! A [`Tree`][crate::Tree] orders its values by hash. With the default, randomly keyed hasher that
//! order looks arbitrary. Hashing an integer with [`IdentityHasher`] keeps its numeric order
//! instead, so a tree of integers built with [`BuildIdentityHasher`] is laid out, and traversed,
//! exactly like a value-ordered BST.
//!
//! # Examples
//!
//! ```
//! use hashbst::{hash::BuildIdentityHasher, Tree};
//!
//! let mut tree = Tree::with_hasher(BuildIdentityHasher::default());
//! for x in [3, -1, 2] {
//!     tree.add(x);
//! }
//!
//! let values: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(values, [-1, 2, 3]);
//! ```

use std::hash::{BuildHasherDefault, Hasher};

/// Builds [`IdentityHasher`]s.
pub type BuildIdentityHasher = BuildHasherDefault<IdentityHasher>;

/// Multiplier folding in every write after the first. Any odd constant keeps the fold a bijection
/// of the previous state.
const FOLD: u64 = 0x100_0000_01b3;

/// A hasher under which a lone integer hashes to itself, up to an order-preserving shift of signed
/// values.
///
/// Signed integers have their sign bit flipped after widening to 64 bits so that negative values
/// sort before positive ones. 128-bit integers are truncated to their low 64 bits and so only keep
/// their order within that range.
///
/// Anything written after the first integer (or any byte string, such as a `str`) is folded into
/// the state. That is deterministic but no longer ordered.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdentityHasher {
    state: u64,
}

impl IdentityHasher {
    fn fold(&mut self, word: u64) {
        self.state = self.state.wrapping_mul(FOLD) ^ word;
    }
}

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.fold(u64::from(byte));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(u64::from(i));
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    fn write_u128(&mut self, i: u128) {
        self.fold(i as u64);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.write_i64(i64::from(i));
    }

    fn write_i16(&mut self, i: i16) {
        self.write_i64(i64::from(i));
    }

    fn write_i32(&mut self, i: i32) {
        self.write_i64(i64::from(i));
    }

    fn write_i64(&mut self, i: i64) {
        self.fold((i as u64) ^ (1 << 63));
    }

    fn write_i128(&mut self, i: i128) {
        self.write_i64(i as i64);
    }

    fn write_isize(&mut self, i: isize) {
        self.write_i64(i as i64);
    }
}
