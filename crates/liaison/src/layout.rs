//! Two-band arc layout.
//!
//! Entities are split into a primary and a secondary band by their group.
//! Both bands share one arc center; the primary band fans over the right
//! hemisphere and the secondary band over the left one. Member `i` of a band
//! with `n` members sits at angle `π / (n + 1) * i`, so the layout is fully
//! determined by input order and the viewport.

use std::f32::consts::PI;

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use liaison_core::geometry::Point;

use crate::{config::LayoutConfig, document::Entity};

/// Measured pixel size of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Current position of every entity, keyed by id in document order.
pub type PositionTable = IndexMap<String, Point>;

/// The arc an entity is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Primary,
    Secondary,
}

impl Band {
    /// Angular offset of the band's arc.
    fn phase(self) -> f32 {
        match self {
            Self::Primary => 0.0,
            Self::Secondary => PI,
        }
    }
}

/// Which group lands in which band.
///
/// Every group other than the primary one folds into the secondary band, so
/// each entity gets exactly one band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandAssignment {
    primary_group: Option<String>,
    secondary_group: Option<String>,
}

impl BandAssignment {
    /// Derives the assignment from the configured primary group, falling back
    /// to the group of the first entity.
    pub fn assign(entities: &[Entity], config: &LayoutConfig) -> Self {
        let primary_group = config
            .primary_group()
            .map(str::to_string)
            .or_else(|| entities.first().map(|entity| entity.group().to_string()));

        let secondary_group = entities
            .iter()
            .map(Entity::group)
            .find(|group| Some(*group) != primary_group.as_deref())
            .map(str::to_string);

        Self {
            primary_group,
            secondary_group,
        }
    }

    pub fn band_of(&self, entity: &Entity) -> Band {
        if self.primary_group.as_deref() == Some(entity.group()) {
            Band::Primary
        } else {
            Band::Secondary
        }
    }

    pub fn primary_group(&self) -> Option<&str> {
        self.primary_group.as_deref()
    }

    /// First group seen in the secondary band, used as its legend caption.
    pub fn secondary_group(&self) -> Option<&str> {
        self.secondary_group.as_deref()
    }
}

/// Arc layout engine.
///
/// Built from a [`LayoutConfig`] and tweaked with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ArcLayout {
    radius_fraction: f32,
    height_factor: f32,
    center_lift: f32,
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl ArcLayout {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            radius_fraction: config.radius_fraction(),
            height_factor: config.height_factor(),
            center_lift: config.center_lift(),
        }
    }

    pub fn with_radius_fraction(mut self, fraction: f32) -> Self {
        self.radius_fraction = fraction;
        self
    }

    pub fn with_height_factor(mut self, factor: f32) -> Self {
        self.height_factor = factor;
        self
    }

    pub fn with_center_lift(mut self, lift: f32) -> Self {
        self.center_lift = lift;
        self
    }

    /// Shared center of both arcs.
    pub fn arc_center(&self, viewport: Viewport) -> Point {
        Point::new(
            viewport.width() / 2.0,
            viewport.height() / 2.0 - self.center_lift,
        )
    }

    /// Radius of both arcs.
    pub fn arc_radius(&self, viewport: Viewport) -> f32 {
        viewport
            .width()
            .min(viewport.height() * self.height_factor)
            * self.radius_fraction
    }

    /// Computes a fresh position for every entity.
    ///
    /// The result is deterministic for identical inputs and keeps document
    /// order.
    pub fn compute_layout(
        &self,
        entities: &[Entity],
        bands: &BandAssignment,
        viewport: Viewport,
    ) -> PositionTable {
        let center = self.arc_center(viewport);
        let radius = self.arc_radius(viewport);

        let primary = entities
            .iter()
            .filter(|entity| bands.band_of(entity) == Band::Primary)
            .count();
        let secondary = entities.len() - primary;

        info!(primary, secondary, radius; "Computing arc layout");

        let mut seen = [0usize; 2];
        let mut positions = PositionTable::with_capacity(entities.len());
        for entity in entities {
            let band = bands.band_of(entity);
            let (slot, members) = match band {
                Band::Primary => (&mut seen[0], primary),
                Band::Secondary => (&mut seen[1], secondary),
            };
            *slot += 1;

            let angle = PI / (members + 1) as f32 * *slot as f32 + band.phase();
            let position = Point::new(
                center.x() + radius * angle.sin(),
                center.y() - radius * angle.cos(),
            );
            debug!(id = entity.id(), band:?, x = position.x(), y = position.y(); "Placed entity");
            positions.insert(entity.id().to_string(), position);
        }
        positions
    }
}
