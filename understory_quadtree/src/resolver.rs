// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver trait mapping object identifiers to their current bounding boxes.

use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

use crate::bbox::BoundingBox2D;

/// Source of truth for object geometry used by [`Quadtree`][crate::Quadtree].
///
/// The index never owns object geometry. It asks the resolver for an object's
/// current box when the object is inserted or updated, and when a query or the
/// broad phase needs an exact overlap test.
///
/// Implementations must be side-effect free. Returning `None` means the
/// identifier no longer refers to a live object.
pub trait BoundsResolver<K> {
    /// Current bounding box of `id`, if it still exists.
    fn resolve(&self, id: K) -> Option<BoundingBox2D>;
}

impl<K, F> BoundsResolver<K> for F
where
    F: Fn(K) -> Option<BoundingBox2D>,
{
    #[inline]
    fn resolve(&self, id: K) -> Option<BoundingBox2D> {
        self(id)
    }
}

impl<K, V, S> BoundsResolver<K> for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Copy + Into<BoundingBox2D>,
    S: BuildHasher,
{
    #[inline]
    fn resolve(&self, id: K) -> Option<BoundingBox2D> {
        self.get(&id).copied().map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn resolve_via<R: BoundsResolver<u32>>(r: &R, id: u32) -> Option<BoundingBox2D> {
        r.resolve(id)
    }

    #[test]
    fn closure_resolver() {
        let r = |id: u32| (id < 3).then(|| BoundingBox2D::from_xywh(f64::from(id), 0.0, 1.0, 1.0));
        assert_eq!(
            resolve_via(&r, 2),
            Some(BoundingBox2D::from_xywh(2.0, 0.0, 1.0, 1.0))
        );
        assert_eq!(resolve_via(&r, 3), None);
    }

    #[test]
    fn map_resolver_accepts_rects_and_boxes() {
        let mut boxes: HashMap<u32, BoundingBox2D> = HashMap::new();
        boxes.insert(7, BoundingBox2D::from_xywh(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            resolve_via(&boxes, 7),
            Some(BoundingBox2D::from_xywh(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(resolve_via(&boxes, 8), None);

        let mut rects: HashMap<u32, Rect> = HashMap::new();
        rects.insert(1, Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(
            resolve_via(&rects, 1),
            Some(BoundingBox2D::from_xywh(0.0, 0.0, 2.0, 2.0))
        );
    }
}
