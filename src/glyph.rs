use image::RgbaImage;

use crate::model::{Cell, ColorMode, Method};

/// Background marker for cells that carry no background of their own.
pub const NO_BACKGROUND: &str = "#000000";

/// Foreground assigned to fully transparent cells.
const TRANSPARENT_FG: &str = "#FFFFFF";

/// Built-in density ramp for [`Method::Luminosity`], sparsest to densest.
pub const LUMINOSITY_RAMP: [char; 21] = [
    ' ', '·', '`', '.', ',', ':', ';', '-', '~', '=', '+', '*', 'o', 'x', 'O', 'X', '#', '%', '&',
    '@', '█',
];

/// Shade-block ramp for [`Method::Block`].
pub const BLOCK_RAMP: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Brightness-band glyphs for [`Method::Edge`]. This is a threshold
/// approximation, not edge detection.
pub const EDGE_RAMP: [char; 4] = [' ', '·', '─', '━'];

/// Density ramp for [`Method::Dither`]. Brightness thresholding, not
/// error diffusion.
pub const DITHER_RAMP: [char; 7] = [' ', '·', ':', '░', '▒', '▓', '█'];

/// Integer luminosity `floor(0.299 R + 0.587 G + 0.114 B)` in `[0, 255]`.
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) as u8
}

/// Shared ramp indexing rule: `floor(lum * len / 256)` clamped to the last
/// index.
fn ramp_index(lum: u8, len: usize) -> usize {
    (lum as usize * len / 256).min(len - 1)
}

/// Pick the glyph for a luminosity value under the given method.
///
/// A custom ramp is only honored by [`Method::Luminosity`]; the other methods
/// always use their built-in ramps.
pub fn select_glyph(method: Method, lum: u8, custom: Option<&[char]>) -> char {
    match method {
        Method::Luminosity => match custom {
            Some(ramp) if !ramp.is_empty() => ramp[ramp_index(lum, ramp.len())],
            _ => LUMINOSITY_RAMP[ramp_index(lum, LUMINOSITY_RAMP.len())],
        },
        Method::Block => BLOCK_RAMP[ramp_index(lum, BLOCK_RAMP.len())],
        Method::Edge => EDGE_RAMP[ramp_index(lum, EDGE_RAMP.len())],
        Method::Dither => DITHER_RAMP[ramp_index(lum, DITHER_RAMP.len())],
    }
}

/// Convert one sampled pixel into a cell.
pub fn map_pixel(
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    method: Method,
    custom: Option<&[char]>,
    mode: ColorMode,
) -> Cell {
    if a < 128 {
        return Cell {
            ch: ' ',
            fg: TRANSPARENT_FG.to_string(),
            bg: NO_BACKGROUND.to_string(),
        };
    }

    let lum = luminosity(r, g, b);
    let ch = select_glyph(method, lum, custom);

    let fg = match mode {
        ColorMode::Rgb => format!("#{r:02X}{g:02X}{b:02X}"),
        ColorMode::Monochrome => {
            // 16 gray levels; keeps successive frames from flickering on
            // near-identical pixels.
            let q = (lum / 16) * 17;
            format!("#{q:02X}{q:02X}{q:02X}")
        }
    };

    Cell {
        ch,
        fg,
        bg: NO_BACKGROUND.to_string(),
    }
}

/// Map a resampled image to a row-major cell grid.
pub fn map_image(
    img: &RgbaImage,
    method: Method,
    custom: Option<&[char]>,
    mode: ColorMode,
) -> Vec<Vec<Cell>> {
    let (width, height) = img.dimensions();
    let mut rows = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut row = Vec::with_capacity(width as usize);
        for x in 0..width {
            let [r, g, b, a] = img.get_pixel(x, y).0;
            row.push(map_pixel(r, g, b, a, method, custom, mode));
        }
        rows.push(row);
    }
    rows
}
