//! Circular node glyphs.
//!
//! A glyph is a single `<g>` translated to the node position, holding a shadow
//! circle, the filled circle, the entity id, and an external label chip that
//! is shown only while the node is highlighted.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{
        ChipDefinition, Drawable, LabelChip, LayeredOutput, NODE_SHADOW_FILTER_ID, RenderLayer,
        StrokeDefinition, Text, TextDefinition,
    },
    geometry::{Point, Size},
};

/// Visual style shared by every glyph of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefinition {
    fill: Color,
    outline: StrokeDefinition,
    radius: f32,
    highlight_radius: f32,
    shadow_radius: f32,
    shadow_color: Color,
    id_text: TextDefinition,
    highlight_font_size: u16,
    label_chip: ChipDefinition,
    label_offset: f32,
}

impl NodeDefinition {
    /// Creates a definition with the stock glyph metrics: radius 22
    /// (24 highlighted), a 24 px shadow and the id set in 14 px text
    /// (16 highlighted) with the label chip 36 px below the center.
    pub fn new(fill: Color, outline: StrokeDefinition, label_chip: ChipDefinition) -> Self {
        let mut id_text = TextDefinition::new();
        id_text.set_font_size(14);
        id_text.set_color(Some(Color::default()));

        Self {
            fill,
            outline,
            radius: 22.0,
            highlight_radius: 24.0,
            shadow_radius: 24.0,
            shadow_color: Color::default().with_alpha(0.3),
            id_text,
            highlight_font_size: 16,
            label_chip,
            label_offset: 36.0,
        }
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_highlight_radius(&mut self, radius: f32) {
        self.highlight_radius = radius;
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn outline(&self) -> &StrokeDefinition {
        &self.outline
    }

    /// Radius of the glyph in its resting state.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn highlight_radius(&self) -> f32 {
        self.highlight_radius
    }

    /// Radius of the glyph in the given highlight state.
    pub fn radius_for(&self, highlighted: bool) -> f32 {
        if highlighted {
            self.highlight_radius
        } else {
            self.radius
        }
    }
}

/// A drawable glyph for one entity.
#[derive(Debug, Clone)]
pub struct NodeGlyph<'a> {
    definition: &'a NodeDefinition,
    id: &'a str,
    label: &'a str,
    gradient_id: Option<&'a str>,
    highlighted: bool,
}

impl<'a> NodeGlyph<'a> {
    pub fn new(definition: &'a NodeDefinition, id: &'a str, label: &'a str) -> Self {
        Self {
            definition,
            id,
            label,
            gradient_id: None,
            highlighted: false,
        }
    }

    /// Fills the circle with the referenced radial gradient instead of the flat color.
    pub fn with_gradient(mut self, gradient_id: &'a str) -> Self {
        self.gradient_id = Some(gradient_id);
        self
    }

    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Builds the translated `<g>` holding every part of the glyph.
    pub fn to_svg_group(&self, position: Point) -> svg_element::Group {
        let definition = self.definition;
        let shadow_opacity = if self.highlighted { 0.8 } else { 0.6 };

        let shadow = svg_element::Circle::new()
            .set("r", definition.shadow_radius)
            .set("fill", definition.shadow_color.to_opaque_string())
            .set("fill-opacity", definition.shadow_color.alpha())
            .set("filter", format!("url(#{NODE_SHADOW_FILTER_ID})"))
            .set("opacity", shadow_opacity);

        let fill = match self.gradient_id {
            Some(gradient_id) => format!("url(#{gradient_id})"),
            None => definition.fill.to_string(),
        };
        let circle = svg_element::Circle::new()
            .set("r", definition.radius_for(self.highlighted))
            .set("fill", fill);
        let circle = crate::apply_stroke!(circle, &definition.outline);

        let id_text = if self.highlighted {
            definition.id_text.with_font_size(definition.highlight_font_size)
        } else {
            definition.id_text.clone()
        };
        let id_text = Text::new(&id_text, self.id).to_svg_element(Point::default());

        let label = LabelChip::new(&definition.label_chip, self.label)
            .with_visible(self.highlighted)
            .to_svg_group(Point::new(0.0, definition.label_offset));

        svg_element::Group::new()
            .set("data-node-id", self.id)
            .set(
                "transform",
                format!("translate({}, {})", position.x(), position.y()),
            )
            .set("style", "cursor: move")
            .add(shadow)
            .add(circle)
            .add(id_text)
            .add(label)
    }
}

impl Drawable for NodeGlyph<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(self.to_svg_group(position)));
        output
    }

    fn size(&self) -> Size {
        let diameter = self.definition.radius_for(self.highlighted) * 2.0;
        Size::new(diameter, diameter)
    }
}
