//! Glyphcast converts animated GIFs into timed character-grid frames.
//!
//! The pipeline is a deterministic, single-pass transform per frame:
//!
//! - Load source bytes (local path or `http(s)://` URL) and decode raw frames
//! - Resolve each raw frame against the previous canvas under GIF disposal
//!   semantics
//! - Resample to the requested grid with a Lanczos3 filter
//! - Map each sample to a (glyph, foreground, background) cell
//! - Attach per-frame display durations
//!
//! Callers own everything downstream: playback, persistence, display.
//!
//! ```no_run
//! use glyphcast::{ConvertOpts, Method, convert};
//!
//! let opts = ConvertOpts {
//!     method: Method::Block,
//!     ..ConvertOpts::default()
//! };
//! let frames = convert("demo.gif", &opts)?;
//! assert!(frames.iter().all(|f| f.cells.len() == opts.height as usize));
//! # Ok::<(), glyphcast::GlyphcastError>(())
//! ```
#![forbid(unsafe_code)]

pub mod composite;
pub mod error;
pub mod glyph;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod resample;
pub mod source;

pub use error::{GlyphcastError, GlyphcastResult};
pub use model::{Cell, ColorMode, ConvertOpts, Frame, Method, RatioPolicy};
pub use pipeline::{CancelToken, convert, convert_with};
pub use progress::{ChannelProgress, FnProgress, NullProgress, ProgressEvent, ProgressSink};
pub use source::{Animation, Disposal, LoopCount, RasterFrame, load_animation};
