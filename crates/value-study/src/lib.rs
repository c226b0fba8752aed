#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! value-study: image sampling and value-study transforms for color analysis
//!
//! This library holds the image-side logic of a color-analysis tool: keeping
//! an overview, a zoomed loupe and a crosshair in agreement about which
//! source pixel is under inspection, reading colors at that pixel, and
//! turning a photograph into a simplified tonal "value study".
//!
//! The only dependency is `palette`, used for the color-space readout of a
//! sampled pixel. Decoding and encoding image files is left to the caller;
//! everything here works on an in-memory [`Raster`].
//!
//! # Quick Start
//!
//! ```
//! use value_study::{run_value_study, Raster, RecolorPreset, ValueStudyConfig};
//!
//! let source = Raster::from_fn(64, 48, |x, y| [x as u8 * 4, y as u8 * 5, 128, 255]).unwrap();
//!
//! let config = ValueStudyConfig::new()
//!     .steps(5)
//!     .edge_detection(true)
//!     .recolor(Some(RecolorPreset::MAGENTA.recolor()));
//!
//! let study = run_value_study(&source, &config).unwrap();
//! assert_eq!((study.width(), study.height()), (64, 48));
//! ```
//!
//! # Viewports
//!
//! Three coordinate spaces are involved (see [`geometry`]):
//!
//! | Space | Units | Used by |
//! |-------|-------|---------|
//! | source | image pixels | selection rectangle, sampler |
//! | overview | display pixels, aspect-fit to a fixed height | overview clicks |
//! | crop | fractions `[0, 1]` of the selection | loupe clicks, crosshair |
//!
//! [`ViewportSynchronizer`] owns the selection and the crosshair and moves
//! both in response to [`ViewportEvent`]s:
//!
//! ```
//! use value_study::{ViewportEvent, ViewportSynchronizer};
//!
//! let mut sync = ViewportSynchronizer::new();
//! sync.initialize(1000, 800, 1.0).unwrap();
//!
//! let snap = sync.handle(ViewportEvent::ClickOverview { x: 250.0, y: 200.0 }).unwrap();
//! assert_eq!(snap.selection.center(), (500.0, 400.0));
//! ```
//!
//! The crosshair's source position, [`ViewportState::crosshair_source`], is
//! what gets passed to [`sampler::sample_at`] and [`sampler::sample_grid`].
//!
//! # Value Study
//!
//! The transform runs in three passes over single-channel intermediate
//! buffers (see [`study`]). Luminance is relative luminance in the WCAG
//! sense: gamma-decoded channels weighted by the BT.709 primaries, with
//! the sRGB decode taken from a table generated at build time.

pub mod color;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod sampler;
pub mod study;
pub mod viewport;


pub use color::{HexCase, Rgb};
pub use error::{ConfigError, DecodeError};
pub use geometry::{NormalizedPoint, Rectangle};
pub use raster::Raster;
pub use sampler::{sample_at, sample_grid, ColorSample};
pub use study::{run_value_study, Recolor, RecolorPreset, ValueStudyConfig};
pub use viewport::{
    ImageOrigin, ViewportEvent, ViewportSnapshot, ViewportState, ViewportSynchronizer,
};
