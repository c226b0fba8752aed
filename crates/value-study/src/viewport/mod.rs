//! Overview / loupe / crosshair synchronization.
//!
//! [`ViewportState`] is a pure state machine: every transition returns a
//! new state. [`ViewportSynchronizer`] wraps it for callers that want a
//! single mutable object per displayed image.

mod state;
mod synchronizer;

pub use state::{ViewportEvent, ViewportSnapshot, ViewportState, DEFAULT_SELECTION_FRACTION};
pub use synchronizer::{ImageOrigin, ViewportSynchronizer, DEFAULT_OVERVIEW_HEIGHT};
