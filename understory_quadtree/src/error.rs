// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Rejected [`QuadtreeConfig`][crate::QuadtreeConfig] or root boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Nodes must be allowed to hold at least one object before splitting.
    #[error("split threshold must be at least 1")]
    ZeroThreshold,
    /// The tree must be allowed at least one level below the root.
    #[error("maximum depth must be at least 1")]
    ZeroMaxDepth,
    /// The root boundary has a NaN or infinite coordinate.
    #[error("root boundary must have finite position and size")]
    NonFiniteBoundary,
}

/// Failure to file an object in a [`Quadtree`][crate::Quadtree].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InsertError<K> {
    /// The identifier is already stored in the tree.
    #[error("object {0:?} is already stored in the tree")]
    Duplicate(K),
    /// The resolver has no bounding box for the identifier.
    #[error("no bounding box could be resolved for object {0:?}")]
    Unresolved(K),
}

impl<K: Copy> InsertError<K> {
    /// The identifier the error refers to.
    pub fn id(&self) -> K {
        match *self {
            Self::Duplicate(id) | Self::Unresolved(id) => id,
        }
    }
}
