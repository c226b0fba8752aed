//! Mutable driver around [`ViewportState`].

use super::state::{ViewportEvent, ViewportSnapshot, ViewportState};
use crate::error::ConfigError;

/// Default overview height in display pixels.
pub const DEFAULT_OVERVIEW_HEIGHT: f64 = 400.0;

/// How a newly displayed image relates to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// A different picture: selection and crosshair start over.
    NewBase,
    /// A reprocessed rendering of the current picture (for example a value
    /// study). State is kept as long as the dimensions match.
    Reprocessed,
}

/// Keeps the overview, the loupe and the crosshair in agreement.
///
/// Holds no state until [`initialize`](Self::initialize) has been called;
/// events received before that are ignored and return `None`.
///
/// # Example
///
/// ```
/// use value_study::viewport::ViewportSynchronizer;
///
/// let mut sync = ViewportSynchronizer::new();
/// sync.initialize(500, 500, 1.0).unwrap();
///
/// let snap = sync.click_or_hover_crop(1.0, 1.0).unwrap();
/// assert!(snap.selection.x + snap.selection.width <= 500.0);
/// ```
#[derive(Debug, Clone)]
pub struct ViewportSynchronizer {
    state: Option<ViewportState>,
    loupe_aspect: f64,
    overview_height: f64,
}

impl Default for ViewportSynchronizer {
    fn default() -> Self {
        Self {
            state: None,
            loupe_aspect: 1.0,
            overview_height: DEFAULT_OVERVIEW_HEIGHT,
        }
    }
}

impl ViewportSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overview height used for click mapping.
    ///
    /// Takes effect immediately when already initialized.
    pub fn overview_height(mut self, height: f64) -> Self {
        self.overview_height = height;
        if let Some(state) = self.state {
            self.state = Some(state.with_overview_height(height));
        }
        self
    }

    /// Seed selection and crosshair for a freshly decoded base image.
    pub fn initialize(
        &mut self,
        image_width: u32,
        image_height: u32,
        loupe_aspect: f64,
    ) -> Result<ViewportSnapshot, ConfigError> {
        let state = ViewportState::initialize(
            image_width,
            image_height,
            loupe_aspect,
            self.overview_height,
        )?;
        self.state = Some(state);
        self.loupe_aspect = loupe_aspect;
        Ok(state.snapshot())
    }

    /// Handle a newly displayed image.
    ///
    /// Reprocessed variants of the current image keep the selection; a new
    /// base image (or a variant whose size no longer matches) starts over
    /// with the last loupe aspect.
    pub fn load_image(
        &mut self,
        image_width: u32,
        image_height: u32,
        origin: ImageOrigin,
    ) -> Result<ViewportSnapshot, ConfigError> {
        if origin == ImageOrigin::Reprocessed {
            if let Some(state) = self.state {
                if state.image_size() == (image_width as f64, image_height as f64) {
                    return Ok(state.snapshot());
                }
            }
        }
        self.initialize(image_width, image_height, self.loupe_aspect)
    }

    /// Apply an event, returning the new snapshot.
    pub fn handle(&mut self, event: ViewportEvent) -> Option<ViewportSnapshot> {
        let next = self.state.as_ref()?.apply(event);
        self.state = Some(next);
        Some(next.snapshot())
    }

    pub fn click_overview(&mut self, x: f64, y: f64) -> Option<ViewportSnapshot> {
        self.handle(ViewportEvent::ClickOverview { x, y })
    }

    pub fn click_or_hover_crop(&mut self, rel_x: f64, rel_y: f64) -> Option<ViewportSnapshot> {
        self.handle(ViewportEvent::ClickOrHoverCrop { rel_x, rel_y })
    }

    pub fn hover_enter_overview(&mut self) -> Option<ViewportSnapshot> {
        self.handle(ViewportEvent::HoverEnterOverview)
    }

    pub fn hover_leave_overview(&mut self) -> Option<ViewportSnapshot> {
        self.handle(ViewportEvent::HoverLeaveOverview)
    }

    /// Current snapshot, if initialized.
    pub fn snapshot(&self) -> Option<ViewportSnapshot> {
        self.state.map(|s| s.snapshot())
    }

    /// Underlying state, if initialized.
    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    /// Drop all state, e.g. when the image failed to decode.
    pub fn reset(&mut self) {
        self.state = None;
    }
}
