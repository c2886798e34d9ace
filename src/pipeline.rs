use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::composite::{CanvasSpec, CompositedFrame, composite_next};
use crate::error::{GlyphcastError, GlyphcastResult};
use crate::glyph::map_image;
use crate::model::{ConvertOpts, Frame};
use crate::progress::{NullProgress, ProgressEvent, ProgressSink};
use crate::resample::resample;
use crate::source::{Disposal, load_animation};

/// Cooperative cancellation flag, checked between frames.
///
/// Clone the token, hand one copy to `convert_with`, and call
/// [`cancel`](CancelToken::cancel) from anywhere else.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Convert an animated GIF into timed glyph-grid frames.
///
/// `source` is a local path or an `http(s)://` URL. See [`convert_with`] for
/// the progress-reporting and cancellable variant.
pub fn convert(source: &str, opts: &ConvertOpts) -> GlyphcastResult<Vec<Frame>> {
    convert_with(source, opts, &mut NullProgress, &CancelToken::new())
}

/// Convert, reporting progress and honoring cooperative cancellation.
///
/// Conversion is all-or-nothing: any failure (or cancellation) aborts the
/// whole call and no partial frame list is returned. Frames are produced
/// strictly in source order; the compositing accumulator for frame `i`
/// depends on frame `i - 1`.
#[tracing::instrument(skip(opts, progress, cancel))]
pub fn convert_with(
    source: &str,
    opts: &ConvertOpts,
    progress: &mut dyn ProgressSink,
    cancel: &CancelToken,
) -> GlyphcastResult<Vec<Frame>> {
    opts.validate()?;

    progress.report(ProgressEvent::new(0, 100, "Loading GIF..."));
    let anim = load_animation(source)?;
    let total = anim.frames.len();
    progress.report(ProgressEvent::new(
        10,
        100,
        format!("Processing {total} frames..."),
    ));

    let custom: Option<Vec<char>> = opts.charset.as_ref().map(|s| s.chars().collect());
    let canvas = CanvasSpec::from_first_frame(&anim.frames[0]);

    let mut frames = Vec::with_capacity(total);
    let mut acc: Option<CompositedFrame> = None;
    let mut prev_disposal = Disposal::None;

    for (i, raster) in anim.frames.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(GlyphcastError::Cancelled);
        }
        if i % 10 == 0 || total < 50 {
            let percent = (10 + i * 80 / total) as u32;
            progress.report(ProgressEvent::new(
                percent,
                100,
                format!("Converting frame {}/{total}...", i + 1),
            ));
        }

        let reset = i == 0 || prev_disposal == Disposal::RestoreBackground;
        let composited = composite_next(&canvas, if reset { None } else { acc.as_ref() }, raster);

        let sampled = resample(&composited, opts.width, opts.height, opts.ratio)?;
        let cells = map_image(&sampled, opts.method, custom.as_deref(), opts.color_mode);

        frames.push(Frame {
            width: opts.width,
            height: opts.height,
            cells,
            duration_ms: frame_duration_ms(raster.delay_cs, opts.fps),
        });

        prev_disposal = raster.disposal;
        acc = Some(composited);
    }

    tracing::debug!(frames = frames.len(), "conversion complete");
    progress.report(ProgressEvent::new(100, 100, "Complete!"));
    Ok(frames)
}

/// Source delays are in hundredths of a second; zero means "unspecified", in
/// which case the fallback FPS decides. Durations are floored at 1 ms so the
/// output invariant `duration > 0` holds even for extreme FPS values.
fn frame_duration_ms(delay_cs: u16, fallback_fps: u32) -> u32 {
    let ms = u32::from(delay_cs) * 10;
    if ms > 0 { ms } else { (1000 / fallback_fps).max(1) }
}
