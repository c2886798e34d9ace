use crate::error::{GlyphcastError, GlyphcastResult};

/// Glyph selection strategy applied per sampled pixel.
///
/// `Edge` and `Dither` are brightness-threshold approximations of the
/// techniques they are named after, not the real algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Luminosity,
    Block,
    Edge,
    Dither,
}

/// How the source raster is fitted to the target grid before resampling.
///
/// The output grid is always exactly `width x height` cells; the policy only
/// decides what happens to the source beforehand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioPolicy {
    /// Stretch to the target grid, ignoring the source aspect ratio.
    Fill,
    /// Scale to fit inside the target grid, letterboxed with transparent cells.
    Fit,
    /// Center-crop the source to the target aspect ratio, then scale.
    Original,
}

/// Foreground color treatment for opaque cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Luminosity quantized to 16 gray levels. Reduces incidental per-pixel
    /// color noise across frames.
    Monochrome,
    /// Exact `#RRGGBB` of the sampled pixel.
    Rgb,
}

/// Conversion options consumed by [`convert`](crate::convert).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ConvertOpts {
    /// Target grid width in cells.
    pub width: u32,
    /// Target grid height in cells.
    pub height: u32,
    /// Fallback frames-per-second used when a source frame carries no delay.
    pub fps: u32,
    pub method: Method,
    pub ratio: RatioPolicy,
    /// Custom glyph ramp, ordered sparsest to densest. Only honored by
    /// [`Method::Luminosity`].
    pub charset: Option<String>,
    pub color_mode: ColorMode,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            fps: 12,
            method: Method::Luminosity,
            ratio: RatioPolicy::Fill,
            charset: None,
            color_mode: ColorMode::Monochrome,
        }
    }
}

impl ConvertOpts {
    pub fn validate(&self) -> GlyphcastResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlyphcastError::invalid_options(
                "target width/height must be > 0",
            ));
        }
        if self.fps == 0 {
            return Err(GlyphcastError::invalid_options("fallback fps must be > 0"));
        }
        if self.charset.as_deref().is_some_and(str::is_empty) {
            return Err(GlyphcastError::invalid_options(
                "custom glyph ramp must not be empty",
            ));
        }
        Ok(())
    }
}

/// One cell of an output frame: a glyph plus foreground/background colors.
///
/// Colors are `#RRGGBB` strings. `bg` is [`NO_BACKGROUND`](crate::glyph::NO_BACKGROUND)
/// for cells without their own background.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    #[serde(rename = "char")]
    pub ch: char,
    pub fg: String,
    pub bg: String,
}

/// One converted frame: a row-major cell grid plus its display duration.
///
/// `cells` is always exactly `height` rows of `width` cells, matching the
/// dimensions requested in [`ConvertOpts`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Vec<Cell>>,
    /// Display duration in milliseconds, always > 0.
    #[serde(rename = "duration")]
    pub duration_ms: u32,
}
