//! Pure viewport state and its transitions.

use crate::error::ConfigError;
use crate::geometry::{
    clamp, crop_to_source, fit_within_height, overview_to_source, source_to_crop_fraction,
    NormalizedPoint, Rectangle,
};

/// Fraction of the image height covered by the initial selection.
pub const DEFAULT_SELECTION_FRACTION: f64 = 0.15;

/// Pointer interaction coming from either viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// Click in the overview, in overview display pixels
    ClickOverview { x: f64, y: f64 },
    /// Click or hover in the loupe, as fractions of the loupe viewport
    ClickOrHoverCrop { rel_x: f64, rel_y: f64 },
    /// Pointer entered the overview
    HoverEnterOverview,
    /// Pointer left the overview
    HoverLeaveOverview,
}

/// What the rendering layer needs to paint both viewports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    pub selection: Rectangle,
    pub crosshair: NormalizedPoint,
    /// While set, the overview shows the plain image without the dimming
    /// overlay and selection outline.
    pub hovering_overview: bool,
}

/// Complete state for one base image.
///
/// Every transition returns a new value; `selection` always stays inside
/// the image and `crosshair` inside `[0, 1]²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    image_width: f64,
    image_height: f64,
    overview_size: (f64, f64),
    selection: Rectangle,
    crosshair: NormalizedPoint,
    hovering_overview: bool,
}

impl ViewportState {
    /// Seed the selection for a freshly decoded image.
    ///
    /// The selection covers 15% of the image height at the loupe's aspect
    /// ratio. When that would be wider than the image it is re-derived from
    /// 15% of the width instead, and it is finally shrunk (aspect kept) if
    /// it still exceeds either image dimension.
    pub fn initialize(
        image_width: u32,
        image_height: u32,
        loupe_aspect: f64,
        overview_height: f64,
    ) -> Result<Self, ConfigError> {
        if image_width == 0 || image_height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: image_width,
                height: image_height,
            });
        }
        if !loupe_aspect.is_finite() || loupe_aspect <= 0.0 {
            return Err(ConfigError::InvalidAspect(loupe_aspect));
        }

        let (w, h) = (image_width as f64, image_height as f64);

        let mut sel_height = h * DEFAULT_SELECTION_FRACTION;
        let mut sel_width = sel_height * loupe_aspect;
        if sel_width > w {
            sel_width = w * DEFAULT_SELECTION_FRACTION;
            sel_height = sel_width / loupe_aspect;
        }
        if sel_height > h {
            sel_height = h;
            sel_width = h * loupe_aspect;
        }
        if sel_width > w {
            sel_width = w;
            sel_height = w / loupe_aspect;
        }
        // Aspects near the f64 limits can underflow one side to zero
        if !(sel_width > 0.0 && sel_height > 0.0) {
            return Err(ConfigError::InvalidAspect(loupe_aspect));
        }

        let selection = Rectangle::new(
            (w - sel_width) / 2.0,
            (h - sel_height) / 2.0,
            sel_width,
            sel_height,
        );

        Ok(Self {
            image_width: w,
            image_height: h,
            overview_size: overview_size_for(w, h, overview_height),
            selection,
            crosshair: NormalizedPoint::CENTER,
            hovering_overview: false,
        })
    }

    /// Apply one interaction event.
    pub fn apply(&self, event: ViewportEvent) -> Self {
        match event {
            ViewportEvent::ClickOverview { x, y } => self.click_overview(x, y),
            ViewportEvent::ClickOrHoverCrop { rel_x, rel_y } => {
                self.click_or_hover_crop(rel_x, rel_y)
            }
            ViewportEvent::HoverEnterOverview => Self {
                hovering_overview: true,
                ..*self
            },
            ViewportEvent::HoverLeaveOverview => Self {
                hovering_overview: false,
                ..*self
            },
        }
    }

    fn click_overview(&self, x: f64, y: f64) -> Self {
        let (draw_w, draw_h) = self.overview_size;
        let x = clamp(x, 0.0, draw_w);
        let y = clamp(y, 0.0, draw_h);
        let (src_x, src_y) =
            overview_to_source(x, y, draw_w, draw_h, self.image_width, self.image_height);

        Self {
            selection: self.recenter(src_x, src_y),
            crosshair: NormalizedPoint::CENTER,
            ..*self
        }
    }

    fn click_or_hover_crop(&self, rel_x: f64, rel_y: f64) -> Self {
        let rel_x = clamp(rel_x, 0.0, 1.0);
        let rel_y = clamp(rel_y, 0.0, 1.0);
        let (abs_x, abs_y) = crop_to_source(rel_x, rel_y, &self.selection);

        // Clamping may stop the selection short of centering on the point;
        // the crosshair then moves off-center to stay on the clicked pixel.
        let selection = self.recenter(abs_x, abs_y);
        let (cx, cy) = source_to_crop_fraction(abs_x, abs_y, &selection);

        Self {
            selection,
            crosshair: NormalizedPoint::clamped(cx, cy),
            ..*self
        }
    }

    fn recenter(&self, cx: f64, cy: f64) -> Rectangle {
        self.selection
            .recentered(cx, cy, self.image_width, self.image_height)
    }

    /// Resize the overview viewport; selection and crosshair are untouched.
    pub fn with_overview_height(&self, overview_height: f64) -> Self {
        Self {
            overview_size: overview_size_for(self.image_width, self.image_height, overview_height),
            ..*self
        }
    }

    /// The data the rendering layer consumes.
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            selection: self.selection,
            crosshair: self.crosshair,
            hovering_overview: self.hovering_overview,
        }
    }

    /// Current selection in source pixels.
    pub fn selection(&self) -> Rectangle {
        self.selection
    }

    /// Current crosshair, relative to the selection.
    pub fn crosshair(&self) -> NormalizedPoint {
        self.crosshair
    }

    /// Overview draw size `(width, height)` in display pixels.
    pub fn overview_size(&self) -> (f64, f64) {
        self.overview_size
    }

    /// Image dimensions this state was initialized for.
    pub fn image_size(&self) -> (f64, f64) {
        (self.image_width, self.image_height)
    }

    /// Source-space point under the crosshair.
    ///
    /// This is the coordinate to hand to the pixel sampler.
    pub fn crosshair_source(&self) -> (f64, f64) {
        crop_to_source(self.crosshair.x, self.crosshair.y, &self.selection)
    }
}

fn overview_size_for(image_width: f64, image_height: f64, overview_height: f64) -> (f64, f64) {
    let max_height = if overview_height.is_finite() && overview_height > 0.0 {
        overview_height
    } else {
        image_height
    };
    fit_within_height(image_width, image_height, max_height)
}
