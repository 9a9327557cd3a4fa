//! Rounded label chips: a text line on a pill-shaped background.
//!
//! Chips are used for relation labels on edge midpoints, entity labels under
//! node glyphs, and the static legend and instruction overlays.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Insets, Point, Size},
};

/// How the width (and height) of a chip is derived from its content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChipWidth {
    /// Measured text size plus padding.
    Measured,
    /// `chars * per_char + base`, with a fixed height.
    PerChar {
        per_char: f32,
        base: f32,
        height: f32,
    },
    /// Fixed size independent of the content.
    Fixed(Size),
}

/// Visual style of a label chip.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipDefinition {
    text: TextDefinition,
    fill: Color,
    stroke: StrokeDefinition,
    corner_radius: f32,
    padding: Insets,
    width: ChipWidth,
    background_opacity: f32,
}

impl ChipDefinition {
    pub fn new(text: TextDefinition, fill: Color, stroke: StrokeDefinition) -> Self {
        Self {
            text,
            fill,
            stroke,
            corner_radius: 8.0,
            padding: Insets::symmetric(2.0, 6.0),
            width: ChipWidth::Measured,
            background_opacity: 1.0,
        }
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius;
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn set_width(&mut self, width: ChipWidth) {
        self.width = width;
    }

    /// Opacity of the background rectangle while the chip is shown.
    pub fn set_background_opacity(&mut self, opacity: f32) {
        self.background_opacity = opacity;
    }

    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn width(&self) -> ChipWidth {
        self.width
    }
}

/// A drawable chip pairing content with a [`ChipDefinition`].
///
/// A hidden chip still renders, at opacity zero, so the host can reveal it
/// without rebuilding geometry.
#[derive(Debug, Clone)]
pub struct LabelChip<'a> {
    definition: &'a ChipDefinition,
    content: &'a str,
    layer: RenderLayer,
    visible: bool,
}

impl<'a> LabelChip<'a> {
    pub fn new(definition: &'a ChipDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            layer: RenderLayer::Overlay,
            visible: true,
        }
    }

    /// Sets the layer the chip is emitted on (builder style).
    pub fn on_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Sets whether the chip is shown (builder style).
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Size of the chip's background rectangle.
    pub fn calculate_size(&self) -> Size {
        match self.definition.width {
            ChipWidth::Measured => Text::new(&self.definition.text, self.content)
                .calculate_size()
                .add_padding(self.definition.padding),
            ChipWidth::PerChar {
                per_char,
                base,
                height,
            } => Size::new(self.content.chars().count() as f32 * per_char + base, height),
            ChipWidth::Fixed(size) => size,
        }
    }

    /// Builds the chip as a standalone `<g>` centered on `center`.
    pub fn to_svg_group(&self, center: Point) -> svg_element::Group {
        let bounds = center.to_bounds(self.calculate_size());
        let (background_opacity, text_opacity) = if self.visible {
            (self.definition.background_opacity, 1.0)
        } else {
            (0.0, 0.0)
        };

        let background = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", self.definition.corner_radius)
            .set("ry", self.definition.corner_radius)
            .set("fill", self.definition.fill.to_opaque_string())
            .set("fill-opacity", self.definition.fill.alpha())
            .set("opacity", background_opacity);
        let background = crate::apply_stroke!(background, &self.definition.stroke);

        let text = Text::new(&self.definition.text, self.content)
            .to_svg_element(center)
            .set("opacity", text_opacity);

        svg_element::Group::new()
            .set("class", "label-chip")
            .add(background)
            .add(text)
    }
}

impl Drawable for LabelChip<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(self.layer, Box::new(self.to_svg_group(position)));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}
