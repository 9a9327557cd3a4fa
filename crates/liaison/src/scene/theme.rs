//! Resolved drawing definitions for one [`StyleConfig`].

use liaison_core::{
    color::Color,
    draw::{ChipDefinition, ChipWidth, EdgeDefinition, NodeDefinition, StrokeDefinition, TextAnchor, TextDefinition},
    geometry::{Insets, Size},
};

use crate::{config::StyleConfig, error::LiaisonError, layout::Band};

/// Every definition the scene renderer needs, parsed once from the style
/// configuration.
#[derive(Debug, Clone)]
pub struct Theme {
    background: Color,
    primary_node: NodeDefinition,
    secondary_node: NodeDefinition,
    edge: EdgeDefinition,
    legend_chip: ChipDefinition,
    legend_text: TextDefinition,
    instruction_chip: ChipDefinition,
    message_text: TextDefinition,
    primary_label: Option<String>,
    secondary_label: Option<String>,
    instruction_text: String,
    show_legend: bool,
    show_instructions: bool,
}

impl Theme {
    /// Builds the theme from a style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LiaisonError::Config`] naming the first color that fails to
    /// parse.
    pub fn from_config(style: &StyleConfig) -> Result<Self, LiaisonError> {
        let color = |parsed: Result<Color, String>| parsed.map_err(LiaisonError::Config);

        let chip_fill = color(style.chip_fill())?;
        let chip_stroke = StrokeDefinition::new(color(style.chip_stroke())?, 1.0);

        let mut chip_text = TextDefinition::new();
        chip_text.set_font_family(style.font_family());
        chip_text.set_font_size(12);
        chip_text.set_font_weight(Some(600));
        chip_text.set_color(Some(color(style.chip_text_color())?));

        let mut node_label = ChipDefinition::new(chip_text.clone(), chip_fill, chip_stroke.clone());
        node_label.set_corner_radius(10.0);
        node_label.set_background_opacity(0.95);
        node_label.set_width(ChipWidth::PerChar {
            per_char: 6.0,
            base: 20.0,
            height: 20.0,
        });

        let mut relation_label = ChipDefinition::new(chip_text, chip_fill, chip_stroke);
        relation_label.set_corner_radius(8.0);
        relation_label.set_background_opacity(0.9);
        relation_label.set_padding(Insets::symmetric(2.0, 6.0));

        let outline = StrokeDefinition::new(color(style.node_outline_color())?, 2.0);
        let node = |fill: Color| {
            let mut definition = NodeDefinition::new(fill, outline.clone(), node_label.clone());
            definition.set_radius(style.node_radius());
            definition.set_highlight_radius(style.node_highlight_radius());
            definition
        };
        let primary_node = node(color(style.primary_color())?);
        let secondary_node = node(color(style.secondary_color())?);

        let edge = EdgeDefinition::new(
            StrokeDefinition::new(color(style.edge_color())?, style.edge_width()),
            StrokeDefinition::new(color(style.highlight_color())?, style.highlight_width()),
            color(style.arrowhead_color())?,
            relation_label,
        );

        let overlay_text_color = color(style.overlay_text_color())?;
        let mut overlay_text = TextDefinition::new();
        overlay_text.set_font_family(style.font_family());
        overlay_text.set_font_size(12);
        overlay_text.set_font_weight(Some(600));
        overlay_text.set_color(Some(overlay_text_color));

        let overlay_stroke = StrokeDefinition::new(color(style.overlay_stroke())?, 1.0);
        let overlay_fill = color(style.overlay_fill())?;

        let mut legend_chip =
            ChipDefinition::new(overlay_text.clone(), overlay_fill, overlay_stroke.clone());
        legend_chip.set_corner_radius(12.0);
        legend_chip.set_width(ChipWidth::Fixed(Size::new(150.0, 24.0)));

        let mut legend_text = overlay_text.clone();
        legend_text.set_anchor(TextAnchor::Start);

        let mut instruction_chip = ChipDefinition::new(overlay_text, overlay_fill, overlay_stroke);
        instruction_chip.set_corner_radius(12.0);
        instruction_chip.set_width(ChipWidth::Fixed(Size::new(165.0, 24.0)));

        let mut message_text = TextDefinition::new();
        message_text.set_font_family(style.font_family());
        message_text.set_font_size(16);
        message_text.set_color(Some(overlay_text_color));

        Ok(Self {
            background: color(style.background_color())?,
            primary_node,
            secondary_node,
            edge,
            legend_chip,
            legend_text,
            instruction_chip,
            message_text,
            primary_label: style.primary_label().map(str::to_string),
            secondary_label: style.secondary_label().map(str::to_string),
            instruction_text: style.instruction_text().to_string(),
            show_legend: style.show_legend(),
            show_instructions: style.show_instructions(),
        })
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Node definition for the given band.
    pub fn node(&self, band: Band) -> &NodeDefinition {
        match band {
            Band::Primary => &self.primary_node,
            Band::Secondary => &self.secondary_node,
        }
    }

    /// Radius used for rim adjustment and hit testing.
    pub fn node_radius(&self) -> f32 {
        self.primary_node.radius()
    }

    pub fn node_highlight_radius(&self) -> f32 {
        self.primary_node.highlight_radius()
    }

    pub fn edge(&self) -> &EdgeDefinition {
        &self.edge
    }

    pub fn legend_chip(&self) -> &ChipDefinition {
        &self.legend_chip
    }

    pub fn legend_text(&self) -> &TextDefinition {
        &self.legend_text
    }

    pub fn instruction_chip(&self) -> &ChipDefinition {
        &self.instruction_chip
    }

    pub fn message_text(&self) -> &TextDefinition {
        &self.message_text
    }

    pub fn primary_label(&self) -> Option<&str> {
        self.primary_label.as_deref()
    }

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

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default()).expect("Default style colors are valid")
    }
}
