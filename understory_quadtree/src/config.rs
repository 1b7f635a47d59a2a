// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning parameters for a [`Quadtree`][crate::Quadtree].

use crate::error::ConfigError;

/// Split and depth limits.
///
/// A small `threshold` splits eagerly, trading more nodes for cheaper queries.
/// `max_depth` bounds recursion and memory when many objects cluster in a
/// region too small for splitting to separate them; nodes at `max_depth`
/// hold any number of objects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadtreeConfig {
    /// Number of objects a leaf may hold before it splits.
    pub threshold: usize,
    /// Depth of the deepest allowed node; the root is at depth 0.
    pub max_depth: usize,
}

impl QuadtreeConfig {
    /// Create a configuration with the given limits.
    pub const fn new(threshold: usize, max_depth: usize) -> Self {
        Self {
            threshold,
            max_depth,
        }
    }

    /// Check that both limits are at least 1.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(())
    }
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(QuadtreeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert_eq!(
            QuadtreeConfig::new(0, 4).validate(),
            Err(ConfigError::ZeroThreshold)
        );
        assert_eq!(
            QuadtreeConfig::new(4, 0).validate(),
            Err(ConfigError::ZeroMaxDepth)
        );
    }
}
