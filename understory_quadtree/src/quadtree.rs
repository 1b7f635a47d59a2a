// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Quadtree` API.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::bbox::BoundingBox2D;
use crate::config::QuadtreeConfig;
use crate::error::{ConfigError, InsertError};
use crate::node::{Filing, Node};
use crate::resolver::BoundsResolver;

/// Opaque object identifier stored by a [`Quadtree`].
///
/// Blanket-implemented for every `Copy + Ord + Hash + Debug` type, so plain
/// integers work out of the box. The ordering is used to report intersecting
/// pairs as `(smaller, larger)`.
pub trait ObjectId: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> ObjectId for T {}

/// Summary of the current tree shape, for tuning `threshold` and `max_depth`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadtreeStats {
    /// Number of nodes, internal and leaf.
    pub node_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Number of stored objects.
    pub object_count: usize,
    /// Depth of the deepest node; 0 when the root is a leaf.
    pub depth: usize,
}

/// A loose quadtree over a fixed world boundary.
///
/// Each object is stored once, at the deepest node whose quadrant wholly
/// contains its box. Objects that straddle a split line stay at the node
/// where they straddle, and objects outside the boundary stay at the root.
///
/// Geometry comes from a [`BoundsResolver`] supplied at construction:
/// - [`insert`](Self::insert) and [`update`](Self::update) resolve the object's
///   box and file the object by it. The tree remembers that filed box so that
///   [`remove`](Self::remove) always finds the object, even after it moved.
/// - [`query`](Self::query) and
///   [`find_all_intersections`](Self::find_all_intersections) test the
///   currently resolved boxes. For exact answers, call `update` for moved
///   objects (or [`rebuild`](Self::rebuild)) before querying.
pub struct Quadtree<K, R> {
    boundary: BoundingBox2D,
    config: QuadtreeConfig,
    root: Node<K>,
    filed: HashMap<K, BoundingBox2D>,
    resolver: R,
}

impl<K: ObjectId, R> Debug for Quadtree<K, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Quadtree")
            .field("boundary", &self.boundary)
            .field("config", &self.config)
            .field("objects", &self.filed.len())
            .field("root_is_leaf", &self.root.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<K: ObjectId, R: BoundsResolver<K>> Quadtree<K, R> {
    /// Create an empty tree over `boundary`.
    pub fn new(
        boundary: BoundingBox2D,
        config: QuadtreeConfig,
        resolver: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if !boundary.is_finite() {
            return Err(ConfigError::NonFiniteBoundary);
        }
        Ok(Self {
            boundary,
            config,
            root: Node::default(),
            filed: HashMap::new(),
            resolver,
        })
    }

    /// Shorthand for [`Quadtree::new`] with explicit limits.
    pub fn with_threshold(
        boundary: BoundingBox2D,
        threshold: usize,
        max_depth: usize,
        resolver: R,
    ) -> Result<Self, ConfigError> {
        Self::new(boundary, QuadtreeConfig::new(threshold, max_depth), resolver)
    }

    /// The root boundary.
    pub fn boundary(&self) -> BoundingBox2D {
        self.boundary
    }

    /// The split and depth limits.
    pub fn config(&self) -> QuadtreeConfig {
        self.config
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.filed.len()
    }

    /// Whether no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.filed.is_empty()
    }

    /// Whether `id` is stored in the tree.
    pub fn contains(&self, id: K) -> bool {
        self.filed.contains_key(&id)
    }

    /// The resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Mutable access to the resolver, e.g. to move objects it describes.
    ///
    /// Moving an object does not refile it; call [`update`](Self::update) afterwards.
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Swap in a new resolver, returning the previous one.
    pub fn replace_resolver(&mut self, resolver: R) -> R {
        core::mem::replace(&mut self.resolver, resolver)
    }

    /// Insert `id`, filing it by its currently resolved box.
    ///
    /// Fails without touching the tree if `id` is already stored or the
    /// resolver has no box for it.
    pub fn insert(&mut self, id: K) -> Result<(), InsertError<K>> {
        if self.filed.contains_key(&id) {
            return Err(InsertError::Duplicate(id));
        }
        let bbox = self
            .resolver
            .resolve(id)
            .ok_or(InsertError::Unresolved(id))?;
        self.file(id, bbox);
        Ok(())
    }

    /// Remove `id`. Returns `false` if it was not stored.
    ///
    /// Internal nodes along the removal path whose children are all leaves
    /// collapse back into leaves once they hold no more than `threshold` objects.
    pub fn remove(&mut self, id: K) -> bool {
        let Some(bbox) = self.filed.remove(&id) else {
            return false;
        };
        let found = self.root.remove(id, &bbox, self.boundary, 0, &self.config);
        debug_assert!(found, "object {id:?} was not found along its filed route");
        found
    }

    /// Refile `id` under its currently resolved box.
    ///
    /// Returns `Ok(false)` without doing anything if `id` is not stored. If the
    /// resolver no longer knows `id`, the object is removed and
    /// [`InsertError::Unresolved`] is returned.
    pub fn update(&mut self, id: K) -> Result<bool, InsertError<K>> {
        let Some(&old) = self.filed.get(&id) else {
            return Ok(false);
        };
        let Some(new) = self.resolver.resolve(id) else {
            self.remove(id);
            return Err(InsertError::Unresolved(id));
        };
        if self.root.route(self.boundary, &old) == self.root.route(self.boundary, &new) {
            // Same node either way: only the filed box changes.
            self.filed.insert(id, new);
            return Ok(true);
        }
        self.remove(id);
        self.file(id, new);
        Ok(true)
    }

    /// Drop every object, leaving an empty root leaf. Boundary and limits are kept.
    pub fn clear(&mut self) {
        tracing::debug!(objects = self.filed.len(), "clearing quadtree");
        self.root = Node::default();
        self.filed.clear();
    }

    /// Clear the tree and insert every id from `ids`.
    ///
    /// This is the usual once-per-tick pattern. Stops at the first failing id;
    /// ids inserted before it stay in the tree.
    pub fn rebuild<I>(&mut self, ids: I) -> Result<(), InsertError<K>>
    where
        I: IntoIterator<Item = K>,
    {
        self.clear();
        for id in ids {
            self.insert(id)?;
        }
        tracing::debug!(objects = self.filed.len(), "rebuilt quadtree");
        Ok(())
    }

    /// Objects whose resolved box intersects `area`.
    pub fn query(&self, area: &BoundingBox2D) -> HashSet<K> {
        let mut out = HashSet::new();
        self.visit_query(area, |id| {
            out.insert(id);
        });
        out
    }

    /// Visit objects whose resolved box intersects `area` (does not allocate result storage).
    ///
    /// Each object is visited at most once; the order is unspecified.
    pub fn visit_query<F: FnMut(K)>(&self, area: &BoundingBox2D, mut f: F) {
        self.root
            .visit_query(self.boundary, area, &self.resolver, &mut f);
    }

    /// Every unordered pair of stored objects whose resolved boxes intersect,
    /// as `(smaller, larger)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_quadtree::{BoundingBox2D, Quadtree};
    ///
    /// let boxes = [
    ///     BoundingBox2D::from_xywh(0.0, 0.0, 10.0, 10.0),
    ///     BoundingBox2D::from_xywh(5.0, 5.0, 10.0, 10.0),
    ///     BoundingBox2D::from_xywh(50.0, 50.0, 10.0, 10.0),
    /// ];
    /// let resolve = |id: usize| boxes.get(id).copied();
    /// let world = BoundingBox2D::from_xywh(0.0, 0.0, 100.0, 100.0);
    /// let mut tree = Quadtree::with_threshold(world, 1, 4, resolve).unwrap();
    /// tree.rebuild(0..boxes.len()).unwrap();
    ///
    /// let pairs = tree.find_all_intersections();
    /// assert_eq!(pairs.len(), 1);
    /// assert!(pairs.contains(&(0, 1)));
    /// ```
    pub fn find_all_intersections(&self) -> HashSet<(K, K)> {
        let mut out = HashSet::new();
        self.visit_intersections(|a, b| {
            out.insert((a, b));
        });
        out
    }

    /// Visit every intersecting pair once, as `(smaller, larger)` (does not allocate result storage).
    pub fn visit_intersections<F: FnMut(K, K)>(&self, mut f: F) {
        let mut stack = Vec::new();
        self.root.visit_intersections(
            self.boundary,
            &mut stack,
            0,
            &self.resolver,
            &mut |a: K, b: K| {
                if a < b {
                    f(a, b);
                } else {
                    f(b, a);
                }
            },
        );
    }

    /// The rectangle of every node currently in the tree, in pre-order.
    pub fn tree_boxes(&self) -> Vec<BoundingBox2D> {
        let mut out = Vec::new();
        self.root
            .walk(self.boundary, 0, &mut |rect, _, _| out.push(rect));
        out
    }

    /// Node, leaf and object counts plus the current depth.
    pub fn stats(&self) -> QuadtreeStats {
        let mut stats = QuadtreeStats::default();
        self.root.walk(self.boundary, 0, &mut |_, depth, node| {
            stats.node_count += 1;
            stats.object_count += node.items().len();
            stats.depth = stats.depth.max(depth);
            if node.is_leaf() {
                stats.leaf_count += 1;
            }
        });
        stats
    }

    fn file(&mut self, id: K, bbox: BoundingBox2D) {
        self.filed.insert(id, bbox);
        let cx = Filing {
            config: self.config,
            filed: &self.filed,
        };
        self.root.insert(id, &bbox, self.boundary, 0, &cx);
    }
}
