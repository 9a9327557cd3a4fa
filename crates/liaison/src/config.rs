//! Configuration types for Liaison relationship-graph rendering.
//!
//! This module provides configuration structures that control how graphs
//! are laid out, styled and manipulated. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources, and
//! every missing field falls back to the stock rendering constants.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, style and interaction settings.
//! - [`LayoutConfig`] - Controls band assignment and the arc geometry.
//! - [`StyleConfig`] - Controls colors, node metrics and overlays.
//! - [`InteractionConfig`] - Controls zoom bounds, hit testing and redraw debouncing.
//!
//! # Example
//!
//! ```
//! # use liaison::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.interaction().max_scale(), 2.0);
//! ```

use std::time::Duration;

use serde::Deserialize;

use liaison_core::color::Color;

/// Top-level application configuration.
///
/// Groups [`LayoutConfig`], [`StyleConfig`] and [`InteractionConfig`] into a
/// single configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Interaction configuration section.
    #[serde(default)]
    interaction: InteractionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, interaction: InteractionConfig) -> Self {
        Self {
            layout,
            style,
            interaction,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the interaction configuration.
    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }
}

/// Arc layout configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Group placed on the primary (upper) arc. When unset, the group of the
    /// first entity in the document is used.
    primary_group: Option<String>,

    /// Arc radius as a fraction of `min(width, height * height_factor)`.
    radius_fraction: f32,

    /// Multiplier applied to the viewport height when sizing the arcs.
    height_factor: f32,

    /// Distance the shared arc center is lifted above the viewport center.
    center_lift: f32,

    /// Perpendicular bend of edge curves relative to the center distance.
    curvature: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            primary_group: None,
            radius_fraction: 0.35,
            height_factor: 1.5,
            center_lift: 50.0,
            curvature: 0.15,
        }
    }
}

impl LayoutConfig {
    /// Returns a copy of this configuration with the primary group set.
    pub fn with_primary_group(mut self, group: impl Into<String>) -> Self {
        self.primary_group = Some(group.into());
        self
    }

    pub fn primary_group(&self) -> Option<&str> {
        self.primary_group.as_deref()
    }

    pub fn radius_fraction(&self) -> f32 {
        self.radius_fraction
    }

    pub fn height_factor(&self) -> f32 {
        self.height_factor
    }

    pub fn center_lift(&self) -> f32 {
        self.center_lift
    }

    pub fn curvature(&self) -> f32 {
        self.curvature
    }
}

/// Visual styling configuration for rendered graphs.
///
/// Colors are kept as strings and parsed through the accessor methods so a
/// malformed value is reported when the theme is built rather than when the
/// configuration file is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    primary_color: String,
    secondary_color: String,
    node_outline_color: String,
    node_radius: f32,
    node_highlight_radius: f32,
    edge_color: String,
    edge_opacity: f32,
    edge_width: f32,
    highlight_color: String,
    highlight_width: f32,
    arrowhead_color: String,
    chip_fill: String,
    chip_stroke: String,
    chip_text_color: String,
    overlay_fill: String,
    overlay_stroke: String,
    overlay_text_color: String,
    font_family: String,
    primary_label: Option<String>,
    secondary_label: Option<String>,
    instruction_text: String,
    show_legend: bool,
    show_instructions: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            primary_color: "#ff5757".to_string(),
            secondary_color: "#4b80ff".to_string(),
            node_outline_color: "white".to_string(),
            node_radius: 22.0,
            node_highlight_radius: 24.0,
            edge_color: "#606060".to_string(),
            edge_opacity: 0.85,
            edge_width: 1.8,
            highlight_color: "#08875d".to_string(),
            highlight_width: 3.0,
            arrowhead_color: "#64748b".to_string(),
            chip_fill: "#f0f9ff".to_string(),
            chip_stroke: "#90cdf4".to_string(),
            chip_text_color: "#1e40af".to_string(),
            overlay_fill: "rgba(255, 255, 255, 0.85)".to_string(),
            overlay_stroke: "#d1d5db".to_string(),
            overlay_text_color: "#111827".to_string(),
            font_family: "sans-serif".to_string(),
            primary_label: None,
            secondary_label: None,
            instruction_text: "拖拽节点可调整位置".to_string(),
            show_legend: true,
            show_instructions: true,
        }
    }
}

/// Parses a configured color, naming the offending key on failure.
fn parse_color(key: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {key} in config: {err}"))
}

impl StyleConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Color, String> {
        parse_color("background_color", &self.background_color)
    }

    /// Fill of nodes in the primary band.
    pub fn primary_color(&self) -> Result<Color, String> {
        parse_color("primary_color", &self.primary_color)
    }

    /// Fill of nodes in the secondary band.
    pub fn secondary_color(&self) -> Result<Color, String> {
        parse_color("secondary_color", &self.secondary_color)
    }

    pub fn node_outline_color(&self) -> Result<Color, String> {
        parse_color("node_outline_color", &self.node_outline_color)
    }

    /// Edge stroke in its resting state, with the configured opacity applied.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge_color", &self.edge_color).map(|color| color.with_alpha(self.edge_opacity))
    }

    pub fn highlight_color(&self) -> Result<Color, String> {
        parse_color("highlight_color", &self.highlight_color)
    }

    pub fn arrowhead_color(&self) -> Result<Color, String> {
        parse_color("arrowhead_color", &self.arrowhead_color)
    }

    pub fn chip_fill(&self) -> Result<Color, String> {
        parse_color("chip_fill", &self.chip_fill)
    }

    pub fn chip_stroke(&self) -> Result<Color, String> {
        parse_color("chip_stroke", &self.chip_stroke)
    }

    pub fn chip_text_color(&self) -> Result<Color, String> {
        parse_color("chip_text_color", &self.chip_text_color)
    }

    pub fn overlay_fill(&self) -> Result<Color, String> {
        parse_color("overlay_fill", &self.overlay_fill)
    }

    pub fn overlay_stroke(&self) -> Result<Color, String> {
        parse_color("overlay_stroke", &self.overlay_stroke)
    }

    pub fn overlay_text_color(&self) -> Result<Color, String> {
        parse_color("overlay_text_color", &self.overlay_text_color)
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn node_highlight_radius(&self) -> f32 {
        self.node_highlight_radius
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn highlight_width(&self) -> f32 {
        self.highlight_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Legend caption of the primary band, if overridden.
    pub fn primary_label(&self) -> Option<&str> {
        self.primary_label.as_deref()
    }

    /// Legend caption of the secondary band, if overridden.
    pub fn secondary_label(&self) -> Option<&str> {
        self.secondary_label.as_deref()
    }

    pub fn instruction_text(&self) -> &str {
        &self.instruction_text
    }

    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    pub fn show_instructions(&self) -> bool {
        self.show_instructions
    }
}

/// Direct-manipulation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    min_scale: f32,
    max_scale: f32,
    zoom_step: f32,
    edge_hit_tolerance: f32,
    redraw_delay_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.0,
            zoom_step: 0.1,
            edge_hit_tolerance: 6.0,
            redraw_delay_ms: 300,
        }
    }
}

impl InteractionConfig {
    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Scale change applied by one wheel notch or zoom control.
    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }

    /// Maximum distance, in scene units, at which a pointer still hits an edge.
    pub fn edge_hit_tolerance(&self) -> f32 {
        self.edge_hit_tolerance
    }

    /// Debounce delay for resize and visibility redraws.
    pub fn redraw_delay(&self) -> Duration {
        Duration::from_millis(self.redraw_delay_ms)
    }

    /// Checks that the zoom bounds form a usable range.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first inconsistent setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_scale <= 0.0 {
            return Err(format!("min_scale must be positive, got {}", self.min_scale));
        }
        if self.max_scale < self.min_scale {
            return Err(format!(
                "max_scale ({}) must not be below min_scale ({})",
                self.max_scale, self.min_scale
            ));
        }
        if self.zoom_step < 0.0001 {
            return Err(format!("zoom_step must be at least 0.0001, got {}", self.zoom_step));
        }
        Ok(())
    }
}
