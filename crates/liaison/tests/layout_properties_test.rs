//! Property tests for the arc layout.

use std::f32::consts::{PI, TAU};

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use liaison::{
    config::LayoutConfig,
    document::Entity,
    layout::{ArcLayout, BandAssignment, Viewport},
};

fn entities(primary: usize, secondary: usize) -> Vec<Entity> {
    let officials = (0..primary).map(|i| Entity::new(format!("p{i}"), "", "官员"));
    let companies = (0..secondary).map(|i| Entity::new(format!("s{i}"), "", "企业"));
    officials.chain(companies).collect()
}

#[test]
fn test_single_member_sits_at_right_angle() {
    let entities = entities(1, 0);
    let bands = BandAssignment::assign(&entities, &LayoutConfig::default());
    let layout = ArcLayout::default();
    let viewport = Viewport::new(800.0, 600.0);

    let positions = layout.compute_layout(&entities, &bands, viewport);
    let center = layout.arc_center(viewport);
    let radius = layout.arc_radius(viewport);

    // Angle pi/2 puts the lone member level with the arc center
    let only = positions["p0"];
    assert_approx_eq!(f32, only.x(), center.x() + radius, epsilon = 0.001);
    assert_approx_eq!(f32, only.y(), center.y(), epsilon = 0.001);
}

proptest! {
    #[test]
    fn layout_is_deterministic(
        primary in 0usize..8,
        secondary in 0usize..8,
        width in 100.0f32..2000.0,
        height in 100.0f32..2000.0,
    ) {
        let entities = entities(primary, secondary);
        let bands = BandAssignment::assign(&entities, &LayoutConfig::default());
        let viewport = Viewport::new(width, height);

        let first = ArcLayout::default().compute_layout(&entities, &bands, viewport);
        let second = ArcLayout::default().compute_layout(&entities, &bands, viewport);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_node_lies_on_the_arc(
        primary in 1usize..8,
        secondary in 0usize..8,
        width in 100.0f32..2000.0,
        height in 100.0f32..2000.0,
    ) {
        let entities = entities(primary, secondary);
        let bands = BandAssignment::assign(&entities, &LayoutConfig::default());
        let layout = ArcLayout::default();
        let viewport = Viewport::new(width, height);

        let positions = layout.compute_layout(&entities, &bands, viewport);
        let center = layout.arc_center(viewport);
        let radius = layout.arc_radius(viewport);

        prop_assert_eq!(positions.len(), primary + secondary);
        for point in positions.values() {
            prop_assert!((point.distance(center) - radius).abs() <= radius * 1e-3);
        }
    }

    #[test]
    fn bands_occupy_opposite_halves(
        primary in 1usize..8,
        secondary in 1usize..8,
    ) {
        let entities = entities(primary, secondary);
        let bands = BandAssignment::assign(&entities, &LayoutConfig::default());
        let layout = ArcLayout::default();
        let viewport = Viewport::default();

        let positions = layout.compute_layout(&entities, &bands, viewport);
        let center = layout.arc_center(viewport);

        // Angles stay strictly inside (0, pi) for the primary band and
        // (pi, 2pi) for the secondary one
        for (id, point) in &positions {
            if id.starts_with('p') {
                prop_assert!(point.x() > center.x());
            } else {
                prop_assert!(point.x() < center.x());
            }
        }
    }

    #[test]
    fn members_are_evenly_spaced_on_their_band(
        primary in 0usize..10,
        secondary in 0usize..10,
        width in 100.0f32..2000.0,
        height in 100.0f32..2000.0,
    ) {
        let entities = entities(primary, secondary);
        let bands = BandAssignment::assign(&entities, &LayoutConfig::default());
        let layout = ArcLayout::default();
        let viewport = Viewport::new(width, height);

        let positions = layout.compute_layout(&entities, &bands, viewport);
        let center = layout.arc_center(viewport);

        let arcs = [("p", primary, 0.0), ("s", secondary, PI)];
        for (prefix, members, phase) in arcs {
            for i in 0..members {
                let point = positions[format!("{prefix}{i}").as_str()];
                // x = cx + r sin(angle), y = cy - r cos(angle)
                let angle = (point.x() - center.x())
                    .atan2(center.y() - point.y())
                    .rem_euclid(TAU);
                let expected = PI / (members + 1) as f32 * (i + 1) as f32 + phase;
                prop_assert!(
                    (angle - expected).abs() <= 1e-3,
                    "{prefix}{i}: angle {angle}, expected {expected}"
                );
            }
        }
    }
}
