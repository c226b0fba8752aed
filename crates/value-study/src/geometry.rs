//! Coordinate mapping between the three viewport spaces.
//!
//! - **source**: pixels of the decoded image
//! - **overview**: the whole image, aspect-fit into a fixed display height
//! - **crop**: the loupe, where the selection is stretched to fill its own
//!   viewport; positions are expressed as fractions in `[0, 1]`
//!
//! All functions are pure and never fail; out-of-range input is clamped by
//! the callers that need clamping.

/// Region of interest in source-image pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point in source coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the rectangle lies fully inside `[0, w] x [0, h]` and is
    /// non-degenerate.
    ///
    /// The far edges get one part in 10^9 of slack: `(w - width) + width`
    /// is not always exactly `w` in floating point.
    pub fn is_within(&self, image_width: f64, image_height: f64) -> bool {
        let slack_x = image_width * 1e-9;
        let slack_y = image_height * 1e-9;
        self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= image_width + slack_x
            && self.y + self.height <= image_height + slack_y
    }

    /// Same size, centered on `(cx, cy)` as far as the image bounds allow.
    ///
    /// The origin is clamped to `[0, image - size]` on each axis, so the
    /// result never leaves the image when it fits inside it.
    pub fn recentered(&self, cx: f64, cy: f64, image_width: f64, image_height: f64) -> Self {
        Self {
            x: clamp(cx - self.width / 2.0, 0.0, image_width - self.width),
            y: clamp(cy - self.height / 2.0, 0.0, image_height - self.height),
            ..*self
        }
    }
}

/// Position inside the current selection, each axis in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    /// The middle of the loupe.
    pub const CENTER: NormalizedPoint = NormalizedPoint { x: 0.5, y: 0.5 };

    /// Build a point, clamping both axes into `[0, 1]`.
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp(x, 0.0, 1.0),
            y: clamp(y, 0.0, 1.0),
        }
    }
}

/// `min(max(value, lo), hi)` with `lo` winning when the range is inverted,
/// and NaN mapped to `lo`. Unlike `f64::clamp` this never panics.
#[inline]
pub(crate) fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    let v = if value.is_nan() { lo } else { value };
    v.min(hi).max(lo)
}

/// Scale an image so its height never exceeds `max_height`.
///
/// Images that already fit are returned at native size; nothing is upscaled.
///
/// ```
/// use value_study::geometry::fit_within_height;
///
/// assert_eq!(fit_within_height(1000.0, 800.0, 400.0), (500.0, 400.0));
/// assert_eq!(fit_within_height(300.0, 200.0, 400.0), (300.0, 200.0));
/// ```
pub fn fit_within_height(image_width: f64, image_height: f64, max_height: f64) -> (f64, f64) {
    if image_height > max_height {
        let aspect = image_width / image_height;
        (max_height * aspect, max_height)
    } else {
        (image_width, image_height)
    }
}

/// Map a click in the overview's drawn area back to source pixels.
pub fn overview_to_source(
    click_x: f64,
    click_y: f64,
    draw_width: f64,
    draw_height: f64,
    image_width: f64,
    image_height: f64,
) -> (f64, f64) {
    (
        click_x * image_width / draw_width,
        click_y * image_height / draw_height,
    )
}

/// Map a fractional loupe position to source pixels.
pub fn crop_to_source(rel_x: f64, rel_y: f64, selection: &Rectangle) -> (f64, f64) {
    (
        selection.x + rel_x * selection.width,
        selection.y + rel_y * selection.height,
    )
}

/// Inverse of [`crop_to_source`]: where a source pixel appears in the loupe.
///
/// The result is not clamped; it falls outside `[0, 1]` when the point is
/// outside the selection.
pub fn source_to_crop_fraction(src_x: f64, src_y: f64, selection: &Rectangle) -> (f64, f64) {
    (
        (src_x - selection.x) / selection.width,
        (src_y - selection.y) / selection.height,
    )
}
