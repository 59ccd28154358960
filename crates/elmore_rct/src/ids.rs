//! Opaque ID newtypes for RC-tree entities.
//!
//! [`RctNodeId`] and [`RctEdgeId`] are thin `u32` wrappers used as arena
//! indices into an [`RcTree`](crate::RcTree). Node storage only ever grows, so
//! an ID handed out once stays valid for the lifetime of the tree.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a node in an RC tree.
    RctNodeId
);

define_id!(
    /// Opaque, copyable ID for an edge in an RC tree.
    RctEdgeId
);
