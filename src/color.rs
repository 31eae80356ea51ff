use clap::ValueEnum;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// Number of color bands used when the ring gradient is not smooth.
pub const STEPPED_LEVELS: usize = 4;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string like "#FF0000", "FF0000" or "#f00"
    pub fn from_hex(hex: &str) -> Option<Self> {
        Srgb::<u8>::from_str(hex.trim()).ok().map(Self::from)
    }

    /// Lowercase `#rrggbb` form, as written to SVG and config files.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(c: Rgb) -> Self {
        Srgb::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s).ok_or_else(|| ChartError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgb::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Linear per-channel interpolation between `start` and `end`.
///
/// `step` is the sample index in `0..total_steps`; step 0 yields `start` and
/// step `total_steps - 1` yields `end`. With a single step the result is `start`.
pub fn interpolate(start: Rgb, end: Rgb, step: usize, total_steps: usize) -> Rgb {
    if total_steps <= 1 {
        return start;
    }
    let t = step.min(total_steps - 1) as f32 / (total_steps - 1) as f32;
    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f32 + (b as f32 - a as f32) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        channel(start.r, end.r),
        channel(start.g, end.g),
        channel(start.b, end.b),
    )
}

/// How ring colors are sampled from the start/end gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientSampling {
    /// One gradient sample per ring.
    Smooth,
    /// Rings are bucketed into [`STEPPED_LEVELS`] bands sharing a color.
    Stepped,
}

impl GradientSampling {
    pub fn from_smooth(smooth: bool) -> Self {
        if smooth {
            Self::Smooth
        } else {
            Self::Stepped
        }
    }

    /// Color for ring `index` of `count` rings.
    pub fn sample(&self, start: Rgb, end: Rgb, index: usize, count: usize) -> Rgb {
        match self {
            GradientSampling::Smooth => interpolate(start, end, index, count),
            GradientSampling::Stepped => {
                if count <= 1 {
                    return start;
                }
                let levels = STEPPED_LEVELS.min(count);
                let level = index * (levels - 1) / (count - 1);
                interpolate(start, end, level, levels)
            }
        }
    }
}

/// The four colors a chart is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub start: Rgb,
    pub end: Rgb,
    pub axis: Rgb,
    pub graph: Rgb,
}

/// Built-in color presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Teal,
    Fire,
    Ocean,
    Forest,
    Purple,
    #[serde(alias = "monochrome")]
    #[value(alias = "monochrome")]
    Mono,
}

impl FromStr for Theme {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teal" => Ok(Self::Teal),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "purple" => Ok(Self::Purple),
            "mono" | "monochrome" => Ok(Self::Mono),
            _ => Err(ChartError::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn hsl(h: f32, s: f32, l: f32) -> Rgb {
    let rgb: Srgb = Hsl::new(h, s, l).into_color();
    Rgb::from(rgb.into_format::<u8>())
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Teal => "teal",
            Theme::Fire => "fire",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Purple => "purple",
            Theme::Mono => "mono",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Teal => ThemeColors {
                start: Rgb::new(0x5f, 0x9c, 0xa1),
                end: Rgb::new(0xc3, 0xe3, 0xe5),
                axis: Rgb::BLACK,
                graph: Rgb::new(0x22, 0x73, 0x7b),
            },
            Theme::Fire => Self::from_hue(10.0, 40.0),
            Theme::Ocean => Self::from_hue(220.0, 190.0),
            Theme::Forest => Self::from_hue(120.0, 85.0),
            Theme::Purple => Self::from_hue(275.0, 315.0),
            Theme::Mono => ThemeColors {
                start: hsl(0.0, 0.0, 0.35),
                end: hsl(0.0, 0.0, 0.85),
                axis: Rgb::BLACK,
                graph: hsl(0.0, 0.0, 0.1),
            },
        }
    }

    /// Dark saturated inner rings fading to a pale outer ring, with an accent graph.
    fn from_hue(inner_hue: f32, outer_hue: f32) -> ThemeColors {
        ThemeColors {
            start: hsl(inner_hue, 0.55, 0.4),
            end: hsl(outer_hue, 0.6, 0.85),
            axis: hsl(inner_hue, 0.2, 0.15),
            graph: hsl(inner_hue, 0.85, 0.3),
        }
    }

    pub fn all() -> &'static [Theme] {
        &[
            Theme::Teal,
            Theme::Fire,
            Theme::Ocean,
            Theme::Forest,
            Theme::Purple,
            Theme::Mono,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|t| t == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}
