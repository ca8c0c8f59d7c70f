//! Strongly typed identifiers for the three kinds of map entity.
//!
//! Ids are handed out sequentially during seeding and never reused, so two
//! map entries refer to the same entity exactly when their ids compare equal.
//! Copies of a map (belief maps) therefore never alias each other.

use std::fmt;

/// Generate a typed id wrapper around a `u32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id following `self` in allocation order.
            #[inline]
            pub fn next(self) -> Self {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in registration order.  Registration order is also
    /// the order agents act within a tick.
    pub struct AgentId, "A";
}

typed_id! {
    /// A loose object waiting to be sorted.
    pub struct ObjectId, "O";
}

typed_id! {
    /// A storage slot.  Ids follow attachment order, which the allocator
    /// relies on when partitioning slots between categories.
    pub struct StorageId, "S";
}
