//! Configuration types for Kinship.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI. Missing sections and fields fall back to defaults.
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`ParserSection`] - How the notation parser treats questionable input.
//! - [`LayoutConfig`] - Force simulation parameters.
//! - [`StyleConfig`] - Colors and sizes of the rendered SVG.
//!
//! # Example
//!
//! ```
//! # use kinship::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().link_distance(), 100.0);
//! assert!(config.style().child_color().is_ok());
//! ```

use serde::Deserialize;

use kinship_core::color::Color;
use kinship_parser::{BlankLinePolicy, ParserConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    parser: ParserSection,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserSection, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            parser,
            layout,
            style,
        }
    }

    pub fn parser(&self) -> &ParserSection {
        &self.parser
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// The `[parser]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ParserSection {
    #[serde(default)]
    blank_lines: BlankLinePolicy,
}

impl ParserSection {
    pub fn new(blank_lines: BlankLinePolicy) -> Self {
        Self { blank_lines }
    }

    /// Returns the configuration handed to [`kinship_parser::parse`].
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new(self.blank_lines)
    }
}

/// The `[layout]` section: parameters of the force simulation.
///
/// The defaults give a simulation that cools from `alpha = 1` to
/// `alpha_min` in about 300 ticks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Many-body strength; negative values repel.
    charge_strength: f32,
    /// Rest length of link springs.
    link_distance: f32,
    /// Canvas width; the centering force pulls toward `width / 2`.
    width: f32,
    /// Canvas height; the centering force pulls toward `height / 2`.
    height: f32,
    /// Fraction of velocity lost on every tick.
    velocity_decay: f32,
    /// The simulation is settled once alpha falls below this value.
    alpha_min: f32,
    /// Upper bound on ticks for a single [`run`](crate::layout::Simulation::run).
    max_ticks: usize,
    /// Seed for the jiggle applied to coincident nodes.
    seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            charge_strength: -200.0,
            link_distance: 100.0,
            width: 960.0,
            height: 600.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            max_ticks: 1000,
            seed: 0x6b69_6e73,
        }
    }
}

impl LayoutConfig {
    pub fn with_charge_strength(mut self, strength: f32) -> Self {
        self.charge_strength = strength;
        self
    }

    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance;
        self
    }

    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_velocity_decay(mut self, decay: f32) -> Self {
        self.velocity_decay = decay;
        self
    }

    pub fn with_alpha_min(mut self, alpha_min: f32) -> Self {
        self.alpha_min = alpha_min;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn charge_strength(&self) -> f32 {
        self.charge_strength
    }

    pub fn link_distance(&self) -> f32 {
        self.link_distance
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn velocity_decay(&self) -> f32 {
        self.velocity_decay
    }

    pub fn alpha_min(&self) -> f32 {
        self.alpha_min
    }

    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Per-tick alpha decay that reaches `alpha_min` after 300 ticks.
    pub fn alpha_decay(&self) -> f32 {
        1.0 - self.alpha_min.powf(1.0 / 300.0)
    }

    /// Checks that the parameters describe a simulation that can cool down.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("charge_strength", self.charge_strength),
            ("link_distance", self.link_distance),
            ("width", self.width),
            ("height", self.height),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("layout.{name} must be a finite number"));
        }
        if self.link_distance < 0.0 {
            return Err("layout.link_distance must not be negative".to_string());
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err("layout canvas must have a positive width and height".to_string());
        }
        if !(self.velocity_decay > 0.0 && self.velocity_decay <= 1.0) {
            return Err("layout.velocity_decay must be in (0, 1]".to_string());
        }
        if !(self.alpha_min > 0.0 && self.alpha_min < 1.0) {
            return Err("layout.alpha_min must be in (0, 1)".to_string());
        }
        Ok(())
    }
}

/// The `[style]` section: appearance of the rendered SVG.
///
/// Colors are kept as strings and parsed when requested, so a bad color is
/// reported when rendering rather than when loading the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    child_color: String,
    spouse_color: String,
    link_color: String,
    label_color: String,
    node_radius: f32,
    link_width: f32,
    margin: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            child_color: "#4c68af".to_string(),
            spouse_color: "#FF69B4".to_string(),
            link_color: "black".to_string(),
            label_color: "white".to_string(),
            node_radius: 20.0,
            link_width: 2.0,
            margin: 20.0,
        }
    }
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_child_color(mut self, color: impl Into<String>) -> Self {
        self.child_color = color.into();
        self
    }

    pub fn with_spouse_color(mut self, color: impl Into<String>) -> Self {
        self.spouse_color = color.into();
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color("background_color", color))
            .transpose()
    }

    /// Fill of child nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn child_color(&self) -> Result<Color, String> {
        parse_color("child_color", &self.child_color)
    }

    /// Fill of spouse nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn spouse_color(&self) -> Result<Color, String> {
        parse_color("spouse_color", &self.spouse_color)
    }

    /// Stroke of link lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn link_color(&self) -> Result<Color, String> {
        parse_color("link_color", &self.link_color)
    }

    /// Fill of node labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn label_color(&self) -> Result<Color, String> {
        parse_color("label_color", &self.label_color)
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn link_width(&self) -> f32 {
        self.link_width
    }

    /// Space between the outermost nodes and the edge of the drawing.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid style.{field} in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = LayoutConfig::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.charge_strength(), -200.0);
        assert_eq!(layout.width(), 960.0);
        assert_eq!(layout.height(), 600.0);
    }

    #[test]
    fn test_alpha_decay_reaches_alpha_min_in_300_ticks() {
        let layout = LayoutConfig::default();
        let alpha = (1.0 - layout.alpha_decay()).powi(300);
        assert!((alpha - layout.alpha_min()).abs() < 1e-5);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = LayoutConfig::default();

        assert!(base.clone().with_canvas(0.0, 600.0).validate().is_err());
        assert!(base.clone().with_velocity_decay(0.0).validate().is_err());
        assert!(base.clone().with_alpha_min(1.5).validate().is_err());
        assert!(base.clone().with_link_distance(-1.0).validate().is_err());
        assert!(base.with_charge_strength(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_default_style_colors_parse() {
        let style = StyleConfig::default();

        assert!(style.child_color().is_ok());
        assert!(style.spouse_color().is_ok());
        assert!(style.link_color().is_ok());
        assert!(style.label_color().is_ok());
        assert_eq!(style.background_color(), Ok(None));
    }

    #[test]
    fn test_invalid_color_names_the_field() {
        let style = StyleConfig::default().with_spouse_color("not-a-color");

        let err = style.spouse_color().unwrap_err();
        assert!(err.contains("style.spouse_color"), "got: {err}");
    }

    #[test]
    fn test_background_color() {
        let style = StyleConfig::default().with_background_color("#fafafa");
        assert!(style.background_color().unwrap().is_some());
    }
}
