use crate::source::RasterFrame;

/// The fully resolved pixel buffer for one frame, canvas-sized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositedFrame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes of straight-alpha RGBA.
    pub rgba: Vec<u8>,
}

impl CompositedFrame {
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }
}

/// Canvas geometry established by the very first raw frame of an animation.
///
/// Later frames with different bounding boxes composite only into this fixed
/// rectangle; anything outside it is clipped.
#[derive(Clone, Copy, Debug)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    origin_x: u32,
    origin_y: u32,
}

impl CanvasSpec {
    pub fn from_first_frame(first: &RasterFrame) -> Self {
        Self {
            width: first.width,
            height: first.height,
            origin_x: first.left,
            origin_y: first.top,
        }
    }
}

/// Resolve the next raw frame against the carried accumulator.
///
/// `prev = None` starts from a fresh transparent canvas and copies the raster
/// as-is (first frame, or the previous frame asked for its region to be
/// cleared). Otherwise the raster is drawn over a copy of `prev`: pixels with
/// non-zero alpha overwrite, fully transparent pixels leave the canvas
/// unchanged.
pub fn composite_next(
    canvas: &CanvasSpec,
    prev: Option<&CompositedFrame>,
    raster: &RasterFrame,
) -> CompositedFrame {
    let (mut out, skip_transparent) = match prev {
        Some(p) => (p.clone(), true),
        None => (
            CompositedFrame::transparent(canvas.width, canvas.height),
            false,
        ),
    };
    blit(&mut out, canvas, raster, skip_transparent);
    out
}

fn blit(dst: &mut CompositedFrame, canvas: &CanvasSpec, raster: &RasterFrame, skip_transparent: bool) {
    let dx0 = i64::from(raster.left) - i64::from(canvas.origin_x);
    let dy0 = i64::from(raster.top) - i64::from(canvas.origin_y);

    for sy in 0..i64::from(raster.height) {
        let dy = dy0 + sy;
        if dy < 0 || dy >= i64::from(dst.height) {
            continue;
        }
        for sx in 0..i64::from(raster.width) {
            let dx = dx0 + sx;
            if dx < 0 || dx >= i64::from(dst.width) {
                continue;
            }
            let si = (sy * i64::from(raster.width) + sx) as usize * 4;
            let src = &raster.rgba[si..si + 4];
            if skip_transparent && src[3] == 0 {
                continue;
            }
            let di = (dy * i64::from(dst.width) + dx) as usize * 4;
            dst.rgba[di..di + 4].copy_from_slice(src);
        }
    }
}
