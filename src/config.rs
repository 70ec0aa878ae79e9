//! Map settings with validated setters

use crate::errors::ConfigError;
use crate::formats::ParseOptions;
use crate::render::defaults;
use crate::style::Scale;
use crate::viewport::ViewportOptions;

/// Everything a track map run can be tuned with.
///
/// Start from [`MapConfig::default`] and chain the `with_*` setters; numeric
/// setters reject values that would make the map degenerate.
#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    resolution: u32,
    dot_size: f64,
    line_width: f64,
    alpha: f64,
    scale: Scale,
    skip_asynoptic: bool,
    keep_extratropical: bool,
    use_old_color_key: bool,
    padding: f64,
    aspect: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            resolution: defaults::RESOLUTION,
            dot_size: defaults::DOT_SIZE,
            line_width: defaults::LINE_WIDTH,
            alpha: defaults::ALPHA,
            scale: Scale::default(),
            skip_asynoptic: defaults::SKIP_ASYNOPTIC,
            keep_extratropical: defaults::KEEP_EXTRATROPICAL,
            use_old_color_key: false,
            padding: defaults::PADDING_DEGREES,
            aspect: defaults::ASPECT_RATIO,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

impl MapConfig {
    /// Output width in pixels
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Fix marker radius in degrees
    pub fn dot_size(&self) -> f64 {
        self.dot_size
    }

    /// Segment width in degrees
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn skip_asynoptic(&self) -> bool {
        self.skip_asynoptic
    }

    pub fn keep_extratropical(&self) -> bool {
        self.keep_extratropical
    }

    pub fn use_old_color_key(&self) -> bool {
        self.use_old_color_key
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn with_resolution(mut self, pixels: u32) -> Result<Self, ConfigError> {
        if pixels == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        self.resolution = pixels;
        Ok(self)
    }

    pub fn with_dot_size(mut self, degrees: f64) -> Result<Self, ConfigError> {
        self.dot_size = positive("dot size", degrees)?;
        Ok(self)
    }

    pub fn with_line_width(mut self, degrees: f64) -> Result<Self, ConfigError> {
        self.line_width = positive("line width", degrees)?;
        Ok(self)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Result<Self, ConfigError> {
        let alpha = finite("alpha", alpha)?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ConfigError::AlphaOutOfRange { value: alpha });
        }
        self.alpha = alpha;
        Ok(self)
    }

    pub fn with_padding(mut self, degrees: f64) -> Result<Self, ConfigError> {
        let degrees = finite("padding", degrees)?;
        if degrees < 0.0 {
            return Err(ConfigError::Negative {
                field: "padding",
                value: degrees,
            });
        }
        self.padding = degrees;
        Ok(self)
    }

    pub fn with_aspect(mut self, ratio: f64) -> Result<Self, ConfigError> {
        self.aspect = positive("aspect ratio", ratio)?;
        Ok(self)
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_skip_asynoptic(mut self, skip: bool) -> Self {
        self.skip_asynoptic = skip;
        self
    }

    pub fn with_keep_extratropical(mut self, keep: bool) -> Self {
        self.keep_extratropical = keep;
        self
    }

    pub fn with_old_color_key(mut self, old: bool) -> Self {
        self.use_old_color_key = old;
        self
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            skip_asynoptic: self.skip_asynoptic,
        }
    }

    pub fn viewport_options(&self) -> ViewportOptions {
        ViewportOptions {
            padding: self.padding,
            aspect: self.aspect,
        }
    }
}
