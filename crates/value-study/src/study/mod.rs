//! Value-study transform: luminance, optional edges, composite.
//!
//! ```text
//! RGBA source
//!     |
//!     v
//! luminance buffer   (pass 1: gamma decode, BT.709, posterize if steps < 10)
//!     |
//!     +---> edge buffer   (pass 2: Laplacian on interior pixels, optional)
//!     |        |
//!     v        v
//! composite          (pass 3: gray or recolor ramp, edge darkening, alpha copied)
//! ```

mod composite;
mod config;
mod edges;
mod pipeline;

pub use composite::{composite_pixel, recolor_luminance};
pub use config::{Recolor, RecolorPreset, ValueStudyConfig, MAX_STEPS, MIN_STEPS};
pub use edges::{edge_strengths, LAPLACIAN};
pub use pipeline::{luminance_buffer, run_value_study};
