// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned quadtree nodes: quadrant fitting, split, merge, and traversals.
//!
//! Nodes do not store their rectangle; every recursive call carries it along
//! with the node depth, starting from the root boundary at depth 0.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::bbox::BoundingBox2D;
use crate::config::QuadtreeConfig;
use crate::resolver::BoundsResolver;

/// Quadrant indices in the order produced by [`BoundingBox2D::quadrants`].
pub(crate) type Route = SmallVec<[usize; 16]>;

/// Index of the single quadrant of `rect` that holds `bbox`, if any.
///
/// A box touching or crossing either bisecting line fits no quadrant. Keeping
/// the split lines exclusive makes the contents of sibling subtrees disjoint,
/// even though boxes that merely touch count as intersecting.
pub(crate) fn quadrant_of(rect: &BoundingBox2D, bbox: &BoundingBox2D) -> Option<usize> {
    if !rect.contains(bbox) {
        return None;
    }
    let mid = rect.center();
    let col = if bbox.right() < mid.x {
        0
    } else if bbox.left() > mid.x {
        1
    } else {
        return None;
    };
    let row = if bbox.bottom() < mid.y {
        0
    } else if bbox.top() > mid.y {
        2
    } else {
        return None;
    };
    Some(row + col)
}

#[derive(Debug)]
pub(crate) struct Node<K> {
    /// Objects filed at this node: everything in a leaf, straddlers in an internal node.
    items: SmallVec<[K; 4]>,
    /// NW, NE, SW, SE. `None` for leaves.
    children: Option<Box<[Self; 4]>>,
}

impl<K> Default for Node<K> {
    fn default() -> Self {
        Self {
            items: SmallVec::new(),
            children: None,
        }
    }
}

/// Per-call context shared by the mutating recursions.
pub(crate) struct Filing<'a, K> {
    pub(crate) config: QuadtreeConfig,
    /// Box each live object was filed under.
    pub(crate) filed: &'a HashMap<K, BoundingBox2D>,
}

impl<K: Copy + Eq + Hash> Node<K> {
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// File `id` (whose box is `bbox`) in the subtree rooted at this node.
    pub(crate) fn insert(
        &mut self,
        id: K,
        bbox: &BoundingBox2D,
        rect: BoundingBox2D,
        depth: usize,
        cx: &Filing<'_, K>,
    ) {
        if let Some(children) = self.children.as_mut() {
            match quadrant_of(&rect, bbox) {
                Some(q) => children[q].insert(id, bbox, rect.quadrants()[q], depth + 1, cx),
                None => self.items.push(id),
            }
            return;
        }
        self.items.push(id);
        if self.items.len() > cx.config.threshold && depth < cx.config.max_depth {
            self.split(rect, depth, cx);
        }
    }

    /// Turn this leaf into an internal node and push down every item that fits a quadrant.
    fn split(&mut self, rect: BoundingBox2D, depth: usize, cx: &Filing<'_, K>) {
        debug_assert!(self.is_leaf(), "only leaves can be split");
        tracing::trace!(depth, items = self.items.len(), "splitting quadtree node");

        let mut children: Box<[Self; 4]> = Box::new(core::array::from_fn(|_| Self::default()));
        for id in core::mem::take(&mut self.items) {
            let quadrant = cx.filed.get(&id).and_then(|b| quadrant_of(&rect, b));
            match quadrant {
                Some(q) => children[q].items.push(id),
                None => self.items.push(id),
            }
        }

        if depth + 1 < cx.config.max_depth {
            for (child, quad) in children.iter_mut().zip(rect.quadrants()) {
                if child.items.len() > cx.config.threshold {
                    child.split(quad, depth + 1, cx);
                }
            }
        }
        self.children = Some(children);
    }

    /// Remove `id`, descending along `bbox`. Returns whether it was found.
    ///
    /// Every internal node on the way back up gets a chance to merge.
    pub(crate) fn remove(
        &mut self,
        id: K,
        bbox: &BoundingBox2D,
        rect: BoundingBox2D,
        depth: usize,
        config: &QuadtreeConfig,
    ) -> bool {
        if let Some(children) = self.children.as_mut()
            && let Some(q) = quadrant_of(&rect, bbox)
        {
            let found = children[q].remove(id, bbox, rect.quadrants()[q], depth + 1, config);
            if found {
                self.try_merge(depth, config);
            }
            return found;
        }

        let Some(pos) = self.items.iter().position(|&item| item == id) else {
            return false;
        };
        self.items.swap_remove(pos);
        self.try_merge(depth, config);
        true
    }

    /// Collapse four leaf children into this node when everything fits under the threshold.
    fn try_merge(&mut self, depth: usize, config: &QuadtreeConfig) {
        let Some(children) = self.children.as_ref() else {
            return;
        };
        if !children.iter().all(Self::is_leaf) {
            return;
        }
        let total = self.items.len() + children.iter().map(|c| c.items.len()).sum::<usize>();
        if total > config.threshold {
            return;
        }

        tracing::trace!(depth, items = total, "merging quadtree node");
        if let Some(children) = self.children.take() {
            let children: [Self; 4] = *children;
            for child in children {
                self.items.extend(child.items);
            }
        }
    }

    /// Quadrant indices leading from this node to the node `bbox` would be filed at.
    pub(crate) fn route(&self, mut rect: BoundingBox2D, bbox: &BoundingBox2D) -> Route {
        let mut route = Route::new();
        let mut node = self;
        while let Some(children) = node.children.as_ref() {
            let Some(q) = quadrant_of(&rect, bbox) else {
                break;
            };
            route.push(q);
            rect = rect.quadrants()[q];
            node = &children[q];
        }
        route
    }

    /// Call `f` for every stored object whose resolved box intersects `query`.
    pub(crate) fn visit_query<R, F>(
        &self,
        rect: BoundingBox2D,
        query: &BoundingBox2D,
        resolver: &R,
        f: &mut F,
    ) where
        R: BoundsResolver<K>,
        F: FnMut(K),
    {
        for &id in &self.items {
            if let Some(b) = resolver.resolve(id)
                && b.intersects(query)
            {
                f(id);
            }
        }
        if let Some(children) = self.children.as_ref() {
            for (child, quad) in children.iter().zip(rect.quadrants()) {
                if quad.intersects(query) {
                    child.visit_query(quad, query, resolver, f);
                }
            }
        }
    }

    /// Call `f` once for every intersecting pair in this subtree, and for every
    /// pair formed by an object in this subtree and an entry of `stack[start..]`.
    ///
    /// `stack[start..]` holds the resolved boxes of ancestor straddlers that
    /// reach into this node's rectangle. Objects in different children are
    /// never compared: sibling quadrants are disjoint.
    pub(crate) fn visit_intersections<R, F>(
        &self,
        rect: BoundingBox2D,
        stack: &mut Vec<(K, BoundingBox2D)>,
        start: usize,
        resolver: &R,
        f: &mut F,
    ) where
        R: BoundsResolver<K>,
        F: FnMut(K, K),
    {
        let base = stack.len();
        for &id in &self.items {
            let Some(bbox) = resolver.resolve(id) else {
                continue;
            };
            for &(other, other_box) in &stack[start..] {
                if bbox.intersects(&other_box) {
                    f(other, id);
                }
            }
            stack.push((id, bbox));
        }

        if let Some(children) = self.children.as_ref() {
            for (child, quad) in children.iter().zip(rect.quadrants()) {
                let mark = stack.len();
                for i in start..mark {
                    let entry = stack[i];
                    if entry.1.intersects(&quad) {
                        stack.push(entry);
                    }
                }
                child.visit_intersections(quad, stack, mark, resolver, f);
                stack.truncate(mark);
            }
        }
        stack.truncate(base);
    }

    /// Pre-order walk calling `f(rect, depth, node)` for every node.
    pub(crate) fn walk<F>(&self, rect: BoundingBox2D, depth: usize, f: &mut F)
    where
        F: FnMut(BoundingBox2D, usize, &Self),
    {
        f(rect, depth, self);
        if let Some(children) = self.children.as_ref() {
            for (child, quad) in children.iter().zip(rect.quadrants()) {
                child.walk(quad, depth + 1, f);
            }
        }
    }

    pub(crate) fn items(&self) -> &[K] {
        &self.items
    }
}
