// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a loose 2D quadtree for broad-phase collision detection.
//!
//! Understory Quadtree indexes objects by opaque identifiers over a fixed world boundary.
//!
//! - Insert, update, and remove identifiers; the tree splits crowded leaves and merges
//!   sparse subtrees as objects come and go.
//! - Query every object intersecting a rectangle.
//! - Find every intersecting pair of objects without comparing objects whose
//!   quadrants cannot overlap.
//!
//! The tree never owns object geometry. A [`BoundsResolver`] supplied at
//! construction maps an identifier to its current [`BoundingBox2D`]; a closure
//! `Fn(K) -> Option<BoundingBox2D>` or a `hashbrown::HashMap<K, BoundingBox2D>`
//! both work.
//!
//! ## Loose placement
//!
//! Each object lives at exactly one node: the deepest node that has a quadrant wholly
//! containing its box. Objects that touch or cross a quadrant's split line stay at
//! the node where they straddle, and objects that reach outside the world boundary
//! stay at the root. A leaf splits once it holds more than `threshold` objects,
//! unless it is already at `max_depth`. See [`QuadtreeConfig`].
//!
//! # Example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use understory_quadtree::{BoundingBox2D, Quadtree};
//!
//! let mut boxes: HashMap<u32, BoundingBox2D> = HashMap::new();
//! boxes.insert(1, BoundingBox2D::from_xywh(-95.0, -95.0, 10.0, 10.0));
//! boxes.insert(2, BoundingBox2D::from_xywh(85.0, 85.0, 10.0, 10.0));
//! boxes.insert(3, BoundingBox2D::from_xywh(88.0, 88.0, 4.0, 4.0));
//!
//! let world = BoundingBox2D::from_xywh(-100.0, -100.0, 200.0, 200.0);
//! let mut tree: Quadtree<u32, _> = Quadtree::with_threshold(world, 4, 5, boxes).unwrap();
//! for id in [1, 2, 3] {
//!     tree.insert(id).unwrap();
//! }
//!
//! // Broad phase: only 2 and 3 overlap.
//! let pairs = tree.find_all_intersections();
//! assert_eq!(pairs.len(), 1);
//! assert!(pairs.contains(&(2, 3)));
//!
//! // Move 3 next to 1 and refile it.
//! tree.resolver_mut().insert(3, BoundingBox2D::from_xywh(-90.0, -90.0, 4.0, 4.0));
//! tree.update(3).unwrap();
//! assert!(tree.find_all_intersections().contains(&(1, 3)));
//!
//! // Range query.
//! let hits = tree.query(&BoundingBox2D::from_xywh(80.0, 80.0, 20.0, 20.0));
//! assert_eq!(hits.len(), 1);
//! assert!(hits.contains(&2));
//! ```
//!
//! ## Rebuild per tick
//!
//! Simulations that move most objects every tick usually clear and refill the tree
//! instead of updating objects one by one. [`Quadtree::rebuild`] does exactly that:
//!
//! ```rust
//! use understory_quadtree::{BoundingBox2D, Quadtree, QuadtreeConfig};
//!
//! let positions = [(10.0, 10.0), (12.0, 11.0), (70.0, 40.0)];
//! let resolve = |id: usize| {
//!     positions
//!         .get(id)
//!         .map(|&(x, y)| BoundingBox2D::from_xywh(x, y, 4.0, 4.0))
//! };
//!
//! let world = BoundingBox2D::from_xywh(0.0, 0.0, 100.0, 100.0);
//! let mut tree = Quadtree::new(world, QuadtreeConfig::default(), resolve).unwrap();
//! tree.rebuild(0..positions.len()).unwrap();
//!
//! let mut pairs: Vec<_> = tree.find_all_intersections().into_iter().collect();
//! pairs.sort();
//! assert_eq!(pairs, [(0, 1)]);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `kurbo/std`, `tracing/std` and `thiserror/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//!
//! Structural changes (splits and merges) are reported as `tracing` events at the
//! `TRACE` level; the crate never installs a subscriber.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates. Debug builds may assert.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bbox;
mod config;
mod error;
mod node;
mod quadtree;
mod resolver;

pub use bbox::BoundingBox2D;
pub use config::QuadtreeConfig;
pub use error::{ConfigError, InsertError};
pub use quadtree::{ObjectId, Quadtree, QuadtreeStats};
pub use resolver::BoundsResolver;
