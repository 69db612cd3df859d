//! Hand-laid bin layouts.
//!
//! Coordinates live on the [0,100]×[0,100] service plane unless a layout
//! says otherwise.

use std::collections::HashSet;

use waste_router::geometry::Point;
use waste_router::model::{Bin, BinCategory, Depot, RoutePlan, Stop};

/// Shorthand for a bin with the default fill rate.
pub fn bin(id: u32, x: f64, y: f64, fill: f64) -> Bin {
    Bin::new(id, Point::new(x, y), fill)
}

/// Two tight pairs far apart: {1,2} near the origin, {3,4} near (10,10).
pub fn two_pairs() -> Vec<Bin> {
    vec![
        bin(1, 0.0, 0.0, 80.0),
        bin(2, 1.0, 0.0, 80.0),
        bin(3, 10.0, 10.0, 80.0),
        bin(4, 11.0, 10.0, 80.0),
    ]
}

pub fn two_pairs_depot() -> Depot {
    Depot::new(5.0, 5.0)
}

/// Three neighbourhoods of four bins each, interleaved in id order, plus
/// quiet bins that sit between them below any sensible threshold.
pub fn three_neighbourhoods() -> Vec<Bin> {
    let centres = [(20.0, 20.0), (80.0, 25.0), (50.0, 85.0)];
    let offsets = [(0.0, 0.0), (2.0, 1.0), (-1.5, 2.5), (1.0, -2.0)];

    let mut bins = Vec::new();
    let mut id = 1;
    for (dx, dy) in offsets {
        for (cx, cy) in centres {
            bins.push(
                bin(id, cx + dx, cy + dy, 75.0 + f64::from(id))
                    .with_category(BinCategory::ALL[id as usize % 3]),
            );
            id += 1;
        }
    }
    bins.push(bin(100, 50.0, 50.0, 10.0));
    bins.push(bin(101, 35.0, 60.0, 45.0).with_cluster(Some(2)));
    bins
}

/// Four bins on a circle of radius 10 around the origin depot.
pub fn ring() -> Vec<Bin> {
    vec![
        bin(1, 10.0, 0.0, 90.0),
        bin(2, 0.0, 10.0, 90.0),
        bin(3, -10.0, 0.0, 90.0),
        bin(4, 0.0, -10.0, 90.0),
    ]
}

/// Bin ids in the order the flattened route visits them.
pub fn visit_order(plan: &RoutePlan) -> Vec<u32> {
    plan.points()
        .filter_map(|point| match point.stop {
            Stop::Bin(id) => Some(id),
            Stop::Depot => None,
        })
        .collect()
}

/// Ids of bins assigned to `cluster`.
pub fn members(bins: &[Bin], cluster: usize) -> HashSet<u32> {
    bins.iter()
        .filter(|bin| bin.cluster == Some(cluster))
        .map(|bin| bin.id)
        .collect()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
