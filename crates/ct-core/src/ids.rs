//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; pools
//! that are dense `Vec`s index with `.index()`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a transporter (truck, train, inland ship, sea ship).
    /// Allocated sequentially by the registry and never reused.
    pub struct TransporterId(u32);
}

typed_id! {
    /// Index of a crane within the pool of its [`CraneKind`](crate::CraneKind).
    pub struct CraneId(u16);
}

typed_id! {
    /// Index of an AGV in the registry's AGV pool.
    pub struct AgvId(u16);
}

typed_id! {
    /// Container number as given by the arrival schedule.
    pub struct ContainerNumber(u32);
}

typed_id! {
    /// Correlation id of an outbound message.  Minted in strictly increasing
    /// order by the message pool; an entity holding one is busy until the
    /// matching acknowledgement arrives.
    pub struct MessageId(u64);
}

impl MessageId {
    /// The id following `self`.
    #[inline]
    pub fn next(self) -> MessageId {
        MessageId(self.0 + 1)
    }
}
