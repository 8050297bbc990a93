//! Configuration types for Rampart diagram derivation and layout.
//!
//! All types implement [`serde::Deserialize`] so configuration can be loaded
//! from external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style.
//! - [`LayoutConfig`] - Spacing constants, default vertex sizes, direction,
//!   the optional root entity, and the readiness-poll budget.
//! - [`StyleConfig`] - Category fill colors applied by the rendering widget.
//!
//! # Example
//!
//! ```
//! # use rampart::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().category_colors().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use rampart_core::{color::Color, geometry::Size, model::Category};

use crate::layout::{Direction, LayoutEngine, PollPolicy};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout constants for the layered engine and the readiness poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Direction of the primary (rank) axis.
    direction: Direction,

    /// Spacing between nodes within a layer.
    node_spacing: f32,

    /// Spacing between adjacent layers.
    layer_spacing: f32,

    /// Clearance reserved for edges.
    edge_spacing: f32,

    /// Default vertex width for unmeasured nodes.
    default_node_width: f32,

    /// Default vertex height for unmeasured nodes.
    default_node_height: f32,

    /// Entity name to treat as the tree root; the root gets the narrower
    /// [`LayoutConfig::root_node_width`] as an explicit layout hint.
    root: Option<String>,

    /// Vertex width hinted for the root entity.
    root_node_width: f32,

    /// First readiness-poll delay, in milliseconds.
    poll_initial_ms: u64,

    /// Backoff ceiling for poll delays, in milliseconds.
    poll_max_interval_ms: u64,

    /// Total poll budget before a readiness timeout, in milliseconds.
    poll_max_wait_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            node_spacing: 80.0,
            layer_spacing: 40.0,
            edge_spacing: 30.0,
            default_node_width: 330.0,
            default_node_height: 75.0,
            root: None,
            root_node_width: 170.0,
            poll_initial_ms: 1,
            poll_max_interval_ms: 250,
            poll_max_wait_ms: 5_000,
        }
    }
}

impl LayoutConfig {
    /// Returns the configured rank-axis direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the root entity name, if one is designated.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Default vertex size for unmeasured nodes.
    pub fn default_node_size(&self) -> Size {
        Size::new(self.default_node_width, self.default_node_height)
    }

    /// Vertex size hinted for the designated root entity.
    pub fn root_node_size(&self) -> Size {
        Size::new(self.root_node_width, self.default_node_height)
    }

    /// Builds a [`LayoutEngine`] from these constants.
    pub fn engine(&self) -> LayoutEngine {
        LayoutEngine::new()
            .with_direction(self.direction)
            .with_node_spacing(self.node_spacing)
            .with_layer_spacing(self.layer_spacing)
            .with_edge_spacing(self.edge_spacing)
            .with_default_size(self.default_node_size())
    }

    /// Builds a [`PollPolicy`] from the configured budget.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new()
            .with_initial_interval(Duration::from_millis(self.poll_initial_ms))
            .with_max_interval(Duration::from_millis(self.poll_max_interval_ms))
            .with_max_wait(Duration::from_millis(self.poll_max_wait_ms))
    }
}

/// Built-in category palette, used when a category has no configured color.
const DEFAULT_COLORS: [(Category, &str); 5] = [
    (Category::Fact, "#90caf9"),
    (Category::Attack, "#ef9a9a"),
    (Category::Mitigation, "#a5d6a7"),
    (Category::Goal, "#ffe082"),
    (Category::Boundary, "#b0bec5"),
];

/// Visual styling configuration: one fill color per entity category.
///
/// Values are CSS color strings; unset categories fall back to the built-in
/// palette.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    fact: Option<String>,
    attack: Option<String>,
    mitigation: Option<String>,
    goal: Option<String>,
    boundary: Option<String>,
}

impl StyleConfig {
    /// Returns the configured or default color string for a category.
    pub fn color_string(&self, category: Category) -> &str {
        let configured = match category {
            Category::Fact => &self.fact,
            Category::Attack => &self.attack,
            Category::Mitigation => &self.mitigation,
            Category::Goal => &self.goal,
            Category::Boundary => &self.boundary,
        };
        configured.as_deref().unwrap_or_else(|| {
            DEFAULT_COLORS
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, color)| *color)
                .expect("every category has a default color")
        })
    }

    /// Parses every category color, validating configured values.
    ///
    /// # Errors
    ///
    /// Returns the parse failure message for the first invalid color string.
    pub fn category_colors(&self) -> Result<Vec<(Category, Color)>, String> {
        Category::all()
            .into_iter()
            .map(|category| Ok((category, Color::new(self.color_string(category))?)))
            .collect()
    }
}
