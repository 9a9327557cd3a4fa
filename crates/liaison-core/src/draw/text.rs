//! Text rendering and measurement for node ids, labels, and relation chips.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Text is measured with cosmic-text so label chips can be sized to their
//! content before any SVG is emitted.
//!
//! ```
//! # use liaison_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(12);
//! style.set_font_weight(Some(600));
//!
//! let text = Text::new(&style, "合作伙伴");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Width of one glyph relative to the font size when no shaping data exists.
const FALLBACK_GLYPH_WIDTH: f32 = 0.55;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Horizontal anchoring of rendered text relative to its position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Defines the visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` px |
/// | Font weight | `None` (normal) |
/// | Color | `None` (SVG default, black) |
/// | Anchor | middle |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    font_weight: Option<u16>,
    color: Option<Color>,
    anchor: TextAnchor,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the numeric font weight (e.g. `600`); `None` renders at normal weight.
    pub fn set_font_weight(&mut self, weight: Option<u16>) {
        self.font_weight = weight;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Returns a copy of this definition with a different font size.
    pub fn with_font_size(&self, size: u16) -> Self {
        let mut definition = self.clone();
        definition.font_size = size;
        definition
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_weight(&self) -> Option<u16> {
        self.font_weight
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            font_weight: None,
            color: None,
            anchor: TextAnchor::default(),
        }
    }
}

/// A renderable single-line text element.
///
/// The position passed to [`Drawable::render_to_layers`] is the vertical center
/// of the line; horizontally it is the center or the start depending on the
/// definition's anchor.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    layer: RenderLayer,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            layer: RenderLayer::Overlay,
        }
    }

    /// Sets the layer the text element is emitted on (builder style).
    pub fn on_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Measures the rendered size of the content.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Builds the SVG `<text>` element without wrapping it in a layer.
    pub fn to_svg_element(&self, position: Point) -> svg_element::Text {
        let mut rendered = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor().to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(weight) = self.definition.font_weight() {
            rendered = rendered.set("font-weight", weight);
        }

        if let Some(color) = self.definition.color() {
            rendered = rendered
                .set("fill", color.to_opaque_string())
                .set("fill-opacity", color.alpha());
        }

        rendered
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(self.layer, Box::new(self.to_svg_element(position)));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Measures text with a shared cosmic-text [`FontSystem`].
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculates the size of a single line of text in pixels.
    ///
    /// Falls back to an estimate of `chars * font_size * 0.55` when shaping
    /// produced no glyphs (for example when no system fonts are installed).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let font_size_px = text_def.font_size() as f32;
        let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let mut attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        if let Some(weight) = text_def.font_weight() {
            attrs = attrs.weight(Weight(weight));
        }

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 {
            max_width = text.chars().count() as f32 * font_size_px * FALLBACK_GLYPH_WIDTH;
        }
        if total_height <= 0.0 {
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::default();
        assert_eq!(def.font_size(), 12);
        assert_eq!(def.font_family(), "sans-serif");
        assert!(def.font_weight().is_none());
        assert!(def.color().is_none());
        assert_eq!(def.anchor(), TextAnchor::Middle);
    }

    #[test]
    fn test_text_definition_with_font_size() {
        let mut def = TextDefinition::new();
        def.set_font_weight(Some(600));
        let larger = def.with_font_size(16);

        assert_eq!(larger.font_size(), 16);
        assert_eq!(larger.font_weight(), Some(600));
        assert_eq!(def.font_size(), 12);
    }

    #[test]
    fn test_text_calculate_size_empty() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "").calculate_size();
        assert!(size.is_zero());
    }

    #[test]
    fn test_text_calculate_size_non_empty() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "投资").calculate_size();
        assert!(size.width() > 0.0);
        assert!(size.height() > 0.0);
    }

    #[test]
    fn test_text_larger_font_is_taller() {
        let small = TextDefinition::new();
        let large = small.with_font_size(24);

        let small_size = Text::new(&small, "Test").calculate_size();
        let large_size = Text::new(&large, "Test").calculate_size();
        assert!(large_size.height() > small_size.height());
    }

    #[test]
    fn test_text_svg_element_attributes() {
        let mut def = TextDefinition::new();
        def.set_font_weight(Some(600));
        def.set_color(Some(Color::new("black").unwrap()));
        let rendered = Text::new(&def, "甲")
            .to_svg_element(Point::new(10.0, 20.0))
            .to_string();

        assert!(rendered.contains("text-anchor=\"middle\""));
        assert!(rendered.contains("font-weight=\"600\""));
        assert!(rendered.contains("fill=\"black\""));
        let content = rendered
            .split_once('>')
            .and_then(|(_, rest)| rest.split_once("</text>"))
            .map(|(content, _)| content.trim());
        assert_eq!(content, Some("甲"));
    }

    #[test]
    fn test_text_render_to_layers_uses_layer() {
        let def = TextDefinition::new();
        let output = Text::new(&def, "乙")
            .on_layer(RenderLayer::Node)
            .render_to_layers(Point::default());
        assert_eq!(output.count_in_layer(RenderLayer::Node), 1);
    }
}
