use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::chart::{ChartGeometry, ChartStyle, GraphStyle, Padding, ScaleModel};
use crate::color::{Rgb, Theme};
use crate::error::ChartError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub chart: ChartConfig,
    /// Axis name to value; table order is the angular order.
    pub axes: IndexMap<String, f32>,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// When set, overrides the four colors below.
    pub theme: Option<Theme>,
    pub start_color: Rgb,
    pub end_color: Rgb,
    pub axis_color: Rgb,
    pub graph_color: Rgb,
    pub axis_max: f32,
    /// Defaults to `axis_max / 5`.
    pub axis_tick: Option<f32>,
    pub axis_width: f32,
    pub graph_width: f32,
    pub graph_style: GraphStyle,
    pub circles_only: bool,
    pub auto_size: bool,
    pub smooth_gradient: bool,
    pub text_size: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let style = ChartStyle::default();
        Self {
            theme: None,
            start_color: style.start_color,
            end_color: style.end_color,
            axis_color: style.axis_color,
            graph_color: style.graph_color,
            axis_max: 20.0,
            axis_tick: None,
            axis_width: style.axis_width,
            graph_width: style.graph_width,
            graph_style: style.graph_style,
            circles_only: style.circles_only,
            auto_size: true,
            smooth_gradient: style.smooth_gradient,
            text_size: style.text_size,
        }
    }
}

impl ChartConfig {
    pub fn style(&self) -> ChartStyle {
        let style = ChartStyle {
            start_color: self.start_color,
            end_color: self.end_color,
            axis_color: self.axis_color,
            graph_color: self.graph_color,
            axis_width: self.axis_width,
            graph_width: self.graph_width,
            graph_style: self.graph_style,
            circles_only: self.circles_only,
            smooth_gradient: self.smooth_gradient,
            text_size: self.text_size,
        };
        match self.theme {
            Some(theme) => style.with_theme(theme),
            None => style,
        }
    }
}

/// Drawing area for file output, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    /// Uniform padding (shorthand)
    pub padding: f32,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
    pub background: Option<Rgb>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            padding: 40.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            background: Some(Rgb::WHITE),
        }
    }
}

impl LayoutConfig {
    /// Get the effective padding, applying the uniform padding as a base
    pub fn effective_padding(&self) -> Padding {
        let pick = |edge: f32| if edge != 0.0 { edge } else { self.padding };
        Padding {
            top: pick(self.padding_top),
            right: pick(self.padding_right),
            bottom: pick(self.padding_bottom),
            left: pick(self.padding_left),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let axes = [
            ("speed", 12.0),
            ("power", 18.0),
            ("range", 9.0),
            ("armor", 15.0),
            ("agility", 7.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            chart: ChartConfig::default(),
            axes,
            layout: LayoutConfig::default(),
        }
    }
}

/// Parse `NAME=VALUE` from the command line.
fn parse_axis(s: &str) -> Result<(String, f32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("axis name is empty".to_string());
    }
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("not a valid number: {}", value.trim()))?;
    Ok((name.to_string(), value))
}

/// Chart options that can be given on the command line.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ChartArgs {
    /// Axis as NAME=VALUE; repeat for more axes. Replaces the configured axes.
    #[arg(short, long = "axis", global = true, value_name = "NAME=VALUE", value_parser = parse_axis)]
    pub axes: Vec<(String, f32)>,

    /// Scale ceiling in data units (turns auto-size off)
    #[arg(long, global = true)]
    pub axis_max: Option<f32>,

    /// Spacing between rings in data units
    #[arg(long, global = true)]
    pub axis_tick: Option<f32>,

    /// Color preset
    #[arg(long, global = true)]
    pub theme: Option<Theme>,

    /// Data polygon style
    #[arg(long, global = true)]
    pub graph_style: Option<GraphStyle>,

    /// Draw circular rings even with three or more axes
    #[arg(long, global = true)]
    pub circles_only: bool,

    /// Use banded instead of per-ring gradient colors
    #[arg(long, global = true)]
    pub stepped_gradient: bool,

    /// Label font size
    #[arg(long, global = true)]
    pub text_size: Option<f32>,

    /// Output size as WIDTHxHEIGHT pixels
    #[arg(long, global = true, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,
}

/// Parse "400x300" into (width, height).
pub fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once('x')?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/radarchart/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radarchart").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, logs a warning on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("{:#}; using defaults", e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_template(&path)?;
        Ok(path)
    }

    fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# Radar chart configuration
# This file is auto-generated. Edit as needed.

[chart]
# Color preset, overrides the four colors below:
# teal, fire, ocean, forest, purple, mono
# theme = "teal"
# Ring gradient, innermost to outermost ring
start_color = "#5f9ca1"
end_color = "#c3e3e5"
# Axis lines and data polygon
axis_color = "#000000"
graph_color = "#22737b"
# Scale ceiling in data units (ignored while auto_size is on)
axis_max = 20.0
# Spacing between rings in data units (default: axis_max / 5)
# axis_tick = 4.0
# Track the largest axis value
auto_size = true
# Stroke widths in pixels
axis_width = 1.0
graph_width = 3.0
# Data polygon style: stroke, fill, stroke-and-fill
graph_style = "stroke"
# Draw circular rings even with three or more axes
circles_only = false
# One gradient color per ring (false = a few color bands)
smooth_gradient = true
# Label font size
text_size = 15.0

# Axes in clockwise order, starting at the top
[axes]
speed = 12.0
power = 18.0
range = 9.0
armor = 15.0
agility = 7.0

[layout]
# Output size in pixels (render command)
width = 400
height = 400
# Padding around the chart - uniform padding for all edges
padding = 40.0
# Individual padding (overrides uniform padding if non-zero)
# padding_top = 0.0
# padding_right = 0.0
# padding_bottom = 0.0
# padding_left = 0.0
background = "#ffffff"
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &ChartArgs) {
        if !args.axes.is_empty() {
            self.axes = args.axes.iter().cloned().collect();
        }
        if let Some(max) = args.axis_max {
            self.chart.axis_max = max;
            self.chart.auto_size = false;
        }
        if let Some(tick) = args.axis_tick {
            self.chart.axis_tick = Some(tick);
        }
        if let Some(theme) = args.theme {
            self.chart.theme = Some(theme);
        }
        if let Some(style) = args.graph_style {
            self.chart.graph_style = style;
        }
        if args.circles_only {
            self.chart.circles_only = true;
        }
        if args.stepped_gradient {
            self.chart.smooth_gradient = false;
        }
        if let Some(size) = args.text_size {
            self.chart.text_size = size;
        }
        if let Some(ref size) = args.size {
            match parse_size(size) {
                Some((w, h)) => {
                    self.layout.width = w;
                    self.layout.height = h;
                }
                None => warn!("Ignoring invalid size '{}', expected WIDTHxHEIGHT", size),
            }
        }
    }

    /// Build a chart laid out for `layout.width` x `layout.height`.
    pub fn build_chart(&self) -> Result<ChartGeometry, ChartError> {
        let scale = ScaleModel::new(
            self.chart.axis_max,
            self.chart.axis_tick,
            self.chart.auto_size,
        )?;
        let mut chart = ChartGeometry::new(self.chart.style(), scale);
        chart.set_axis(self.axes.iter().map(|(k, v)| (k.clone(), *v)))?;
        chart.layout(
            self.layout.width as f32,
            self.layout.height as f32,
            self.layout.effective_padding(),
        );
        Ok(chart)
    }

    /// Persist the viewer's toggles into the config file at `path`, keeping
    /// comments and unrelated keys. Creates the file from the template first
    /// if it doesn't exist.
    pub fn save_view_state(path: &Path, chart: &ChartGeometry, theme: Option<Theme>) -> Result<()> {
        if !path.exists() {
            Self::write_template(path)?;
            info!("Created config file at {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        if !doc.contains_key("chart") {
            doc["chart"] = toml_edit::table();
        }
        let chart_table = &mut doc["chart"];
        match theme {
            Some(theme) => chart_table["theme"] = toml_edit::value(theme.name()),
            None => {
                if let Some(table) = chart_table.as_table_like_mut() {
                    table.remove("theme");
                }
                chart_table["start_color"] = toml_edit::value(chart.start_color().to_hex());
                chart_table["end_color"] = toml_edit::value(chart.end_color().to_hex());
                chart_table["axis_color"] = toml_edit::value(chart.axis_color().to_hex());
                chart_table["graph_color"] = toml_edit::value(chart.graph_color().to_hex());
            }
        }
        chart_table["graph_style"] = toml_edit::value(chart.graph_style().name());
        chart_table["circles_only"] = toml_edit::value(chart.is_circles_only());
        chart_table["auto_size"] = toml_edit::value(chart.is_auto_size());
        chart_table["smooth_gradient"] = toml_edit::value(chart.is_smooth_gradient());
        chart_table["axis_tick"] = toml_edit::value(chart.axis_tick() as f64);
        if !chart.is_auto_size() {
            chart_table["axis_max"] = toml_edit::value(chart.axis_max() as f64);
        }

        std::fs::write(path, doc.to_string())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        info!("Saved view state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("radarchart-test-{}-{}", std::process::id(), name))
            .join("config.toml")
    }

    #[test]
    fn template_matches_defaults() {
        let parsed: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn axes_table_keeps_file_order() {
        let config: Config = toml::from_str("[axes]\nzeta = 1.0\nalpha = 2.0\nmid = 3.0\n").unwrap();
        let names: Vec<_> = config.axes.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        // missing sections fall back to defaults
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str("[chart]\nstart_color = \"#zzz\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = Config::default();
        let args = ChartArgs {
            axes: vec![("a".into(), 1.0), ("b".into(), 2.0)],
            axis_max: Some(50.0),
            graph_style: Some(GraphStyle::Fill),
            stepped_gradient: true,
            size: Some("640x480".into()),
            ..Default::default()
        };
        config.merge_args(&args);
        assert_eq!(config.axes.len(), 2);
        assert_eq!(config.chart.axis_max, 50.0);
        assert!(!config.chart.auto_size);
        assert_eq!(config.chart.graph_style, GraphStyle::Fill);
        assert!(!config.chart.smooth_gradient);
        assert_eq!((config.layout.width, config.layout.height), (640, 480));
    }

    #[test]
    fn axis_argument_parsing() {
        assert_eq!(parse_axis("speed=12.5"), Ok(("speed".to_string(), 12.5)));
        assert_eq!(parse_axis(" top speed = 3 "), Ok(("top speed".to_string(), 3.0)));
        assert!(parse_axis("speed").is_err());
        assert!(parse_axis("=3").is_err());
        assert!(parse_axis("speed=fast").is_err());
        assert_eq!(parse_size("800x600"), Some((800, 600)));
        assert_eq!(parse_size("0x600"), None);
    }

    #[test]
    fn per_edge_padding_overrides_uniform() {
        let layout = LayoutConfig {
            padding: 10.0,
            padding_left: 25.0,
            ..Default::default()
        };
        let p = layout.effective_padding();
        assert_eq!((p.top, p.right, p.bottom, p.left), (10.0, 10.0, 10.0, 25.0));
    }

    #[test]
    fn build_chart_applies_theme_and_rejects_bad_tick() {
        let mut config = Config::default();
        config.chart.theme = Some(Theme::Fire);
        let chart = config.build_chart().unwrap();
        assert_eq!(chart.start_color(), Theme::Fire.colors().start);
        assert_eq!(chart.axis_max(), 18.0);
        assert_eq!(chart.viewport().pixel_radius, 160.0);

        config.chart.axis_tick = Some(-1.0);
        assert_eq!(config.build_chart().unwrap_err(), ChartError::InvalidAxisTick(-1.0));
    }

    #[test]
    fn view_state_round_trips_through_file() {
        let path = temp_path("save");
        let _ = std::fs::remove_file(&path);

        let mut chart = Config::default().build_chart().unwrap();
        chart.set_circles_only(true);
        chart.set_graph_style(GraphStyle::StrokeAndFill);
        chart.set_axis_tick(2.5).unwrap();
        Config::save_view_state(&path, &chart, Some(Theme::Ocean)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("# Radar chart configuration"), "comments kept");
        let reloaded = Config::load(&path).unwrap();
        assert!(reloaded.chart.circles_only);
        assert_eq!(reloaded.chart.graph_style, GraphStyle::StrokeAndFill);
        assert_eq!(reloaded.chart.axis_tick, Some(2.5));
        assert_eq!(reloaded.chart.theme, Some(Theme::Ocean));
        assert_eq!(reloaded.axes, Config::default().axes);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
