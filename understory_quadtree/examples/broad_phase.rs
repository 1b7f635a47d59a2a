// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rebuild a quadtree every tick and run the broad phase over moving bodies.

use std::cell::RefCell;

use kurbo::{Point, Size, Vec2};
use understory_quadtree::{BoundingBox2D, Quadtree, QuadtreeConfig};

struct Body {
    position: Point,
    velocity: Vec2,
    size: Size,
}

fn main() {
    let bodies: RefCell<Vec<Body>> = RefCell::new(
        (0..24_u32)
            .map(|i| {
                let t = f64::from(i);
                Body {
                    position: Point::new(-90.0 + 7.5 * t, -60.0 + 5.0 * (t * 0.7).sin()),
                    velocity: Vec2::new((t * 1.3).cos() * 3.0, (t * 0.9).sin() * 3.0),
                    size: Size::new(6.0, 6.0),
                }
            })
            .collect(),
    );

    let resolve = |id: usize| {
        bodies
            .borrow()
            .get(id)
            .map(|b| BoundingBox2D::new(b.position, b.size))
    };

    let world = BoundingBox2D::from_xywh(-100.0, -100.0, 200.0, 200.0);
    let mut tree = Quadtree::new(world, QuadtreeConfig::new(4, 5), resolve).unwrap();

    for tick in 0..5 {
        let count = bodies.borrow().len();
        tree.rebuild(0..count).unwrap();

        let mut pairs: Vec<_> = tree.find_all_intersections().into_iter().collect();
        pairs.sort_unstable();
        let stats = tree.stats();
        println!(
            "tick {tick}: {} nodes (depth {}), {} colliding pairs: {pairs:?}",
            stats.node_count,
            stats.depth,
            pairs.len()
        );

        for body in bodies.borrow_mut().iter_mut() {
            body.position += body.velocity;
        }
    }

    let area = BoundingBox2D::from_xywh(-100.0, -100.0, 50.0, 50.0);
    let mut hits: Vec<_> = tree.query(&area).into_iter().collect();
    hits.sort_unstable();
    println!("bodies in the north-west corner: {hits:?}");
}
