use std::io::Cursor;

use crate::error::{GlyphcastError, GlyphcastResult};

/// What the canvas should do with a frame's pixels before the next frame is
/// drawn. Mapped from raw GIF disposal codes at the decode boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposal {
    /// No disposal specified.
    None,
    /// Leave the frame's pixels in place.
    Keep,
    /// Clear the frame's region before the next frame.
    RestoreBackground,
    /// Restore the canvas as it was before this frame.
    ///
    /// The compositor treats this the same as `Keep`: the canvas is left
    /// untouched between frames.
    RestorePrevious,
}

impl From<gif::DisposalMethod> for Disposal {
    fn from(dispose: gif::DisposalMethod) -> Self {
        match dispose {
            gif::DisposalMethod::Any => Disposal::None,
            gif::DisposalMethod::Keep => Disposal::Keep,
            gif::DisposalMethod::Background => Disposal::RestoreBackground,
            gif::DisposalMethod::Previous => Disposal::RestorePrevious,
        }
    }
}

/// How many times the animation should repeat after the first playthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Finite(u16),
}

impl From<gif::Repeat> for LoopCount {
    fn from(repeat: gif::Repeat) -> Self {
        match repeat {
            gif::Repeat::Infinite => LoopCount::Infinite,
            gif::Repeat::Finite(n) => LoopCount::Finite(n),
        }
    }
}

/// One raw frame as stored in the source animation: a straight-alpha RGBA
/// buffer covering a sub-rectangle of the logical screen, plus timing and
/// disposal metadata.
#[derive(Clone, Debug)]
pub struct RasterFrame {
    /// Left edge of the frame rectangle in logical-screen coordinates.
    pub left: u32,
    /// Top edge of the frame rectangle in logical-screen coordinates.
    pub top: u32,
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes of straight-alpha RGBA.
    pub rgba: Vec<u8>,
    pub disposal: Disposal,
    /// Source delay in hundredths of a second. Zero means unspecified.
    pub delay_cs: u16,
}

/// A decoded animation: raw frames in source order plus loop metadata.
#[derive(Clone, Debug)]
pub struct Animation {
    pub frames: Vec<RasterFrame>,
    pub loop_count: LoopCount,
}

/// Load and decode an animated GIF from a local path or an `http(s)://` URL.
///
/// The byte acquisition happens once, synchronously, before any decoding.
pub fn load_animation(source: &str) -> GlyphcastResult<Animation> {
    let bytes = fetch_bytes(source)?;
    tracing::debug!(bytes = bytes.len(), source, "fetched source bytes");
    decode_animation(&bytes)
}

fn fetch_bytes(source: &str) -> GlyphcastResult<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::blocking::get(source)
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| {
                GlyphcastError::source_unavailable(format!("fetching '{source}': {e}"))
            })?;
        let bytes = response.bytes().map_err(|e| {
            GlyphcastError::source_unavailable(format!("reading body of '{source}': {e}"))
        })?;
        Ok(bytes.to_vec())
    } else {
        std::fs::read(source)
            .map_err(|e| GlyphcastError::source_unavailable(format!("opening '{source}': {e}")))
    }
}

/// Decode GIF bytes into raw frames without compositing them.
pub fn decode_animation(bytes: &[u8]) -> GlyphcastResult<Animation> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options
        .read_info(Cursor::new(bytes))
        .map_err(|e| GlyphcastError::decode_failure(format!("reading GIF header: {e}")))?;

    let loop_count = LoopCount::from(decoder.repeat());

    let mut frames = Vec::new();
    loop {
        let next = decoder.read_next_frame().map_err(|e| {
            GlyphcastError::decode_failure(format!("decoding frame {}: {e}", frames.len()))
        })?;
        let Some(frame) = next else {
            break;
        };
        frames.push(RasterFrame {
            left: u32::from(frame.left),
            top: u32::from(frame.top),
            width: u32::from(frame.width),
            height: u32::from(frame.height),
            rgba: frame.buffer.to_vec(),
            disposal: Disposal::from(frame.dispose),
            delay_cs: frame.delay,
        });
    }

    if frames.is_empty() {
        return Err(GlyphcastError::decode_failure("GIF contains no frames"));
    }
    tracing::debug!(frames = frames.len(), ?loop_count, "decoded GIF");

    Ok(Animation { frames, loop_count })
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    // black, white, red, green
    const PALETTE: &[u8] = &[0, 0, 0, 255, 255, 255, 255, 0, 0, 0, 255, 0];

    fn encode_gif(screen: (u16, u16), frames: &[gif::Frame<'static>]) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut bytes, screen.0, screen.1, PALETTE).unwrap();
            encoder.set_repeat(gif::Repeat::Infinite).unwrap();
            for frame in frames {
                encoder.write_frame(frame).unwrap();
            }
        }
        bytes
    }

    fn indexed_frame(width: u16, height: u16, pixels: Vec<u8>) -> gif::Frame<'static> {
        gif::Frame {
            width,
            height,
            buffer: Cow::Owned(pixels),
            ..gif::Frame::default()
        }
    }

    #[test]
    fn decode_roundtrips_dimensions_delay_and_disposal() {
        let mut first = indexed_frame(2, 2, vec![1, 1, 1, 1]);
        first.delay = 5;
        first.dispose = gif::DisposalMethod::Background;
        let mut second = indexed_frame(1, 1, vec![2]);
        second.delay = 0;
        second.dispose = gif::DisposalMethod::Keep;
        second.left = 1;
        second.top = 1;

        let bytes = encode_gif((2, 2), &[first, second]);
        let anim = decode_animation(&bytes).unwrap();

        assert_eq!(anim.frames.len(), 2);
        assert_eq!(anim.loop_count, LoopCount::Infinite);

        let f0 = &anim.frames[0];
        assert_eq!((f0.width, f0.height), (2, 2));
        assert_eq!(f0.delay_cs, 5);
        assert_eq!(f0.disposal, Disposal::RestoreBackground);
        assert_eq!(f0.rgba.len(), 2 * 2 * 4);
        // all-white frame, fully opaque
        assert_eq!(&f0.rgba[0..4], &[255, 255, 255, 255]);

        let f1 = &anim.frames[1];
        assert_eq!((f1.left, f1.top, f1.width, f1.height), (1, 1, 1, 1));
        assert_eq!(f1.delay_cs, 0);
        assert_eq!(f1.disposal, Disposal::Keep);
        assert_eq!(&f1.rgba[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn transparent_index_decodes_to_zero_alpha() {
        let mut frame = indexed_frame(2, 1, vec![0, 1]);
        frame.transparent = Some(0);
        let bytes = encode_gif((2, 1), &[frame]);

        let anim = decode_animation(&bytes).unwrap();
        let rgba = &anim.frames[0].rgba;
        assert_eq!(rgba[3], 0);
        assert_eq!(rgba[7], 255);
    }

    #[test]
    fn garbage_bytes_are_a_decode_failure() {
        let err = decode_animation(b"not a gif").unwrap_err();
        assert!(matches!(err, GlyphcastError::DecodeFailure(_)));

        let err = decode_animation(&[]).unwrap_err();
        assert!(matches!(err, GlyphcastError::DecodeFailure(_)));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = load_animation("/definitely/not/here.gif").unwrap_err();
        assert!(matches!(err, GlyphcastError::SourceUnavailable(_)));
    }

    #[test]
    fn disposal_mapping_is_total() {
        use gif::DisposalMethod as D;
        assert_eq!(Disposal::from(D::Any), Disposal::None);
        assert_eq!(Disposal::from(D::Keep), Disposal::Keep);
        assert_eq!(Disposal::from(D::Background), Disposal::RestoreBackground);
        assert_eq!(Disposal::from(D::Previous), Disposal::RestorePrevious);
    }
}
