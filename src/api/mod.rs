pub mod pixel;
pub mod presets;
pub mod study;
pub mod viewport;

pub use pixel::{__path_handle_pixel_color, __path_handle_pixel_grid};
pub use pixel::{handle_pixel_color, handle_pixel_grid, PixelColorResponse, PixelGridResponse};
pub use presets::{handle_recolor_presets, RecolorPresetsResponse, __path_handle_recolor_presets};
pub use study::{handle_value_study, ValueStudyRequest, __path_handle_value_study};
pub use viewport::{
    __path_handle_create_viewport, __path_handle_delete_viewport, __path_handle_get_viewport,
    __path_handle_viewport_event, __path_handle_viewport_image,
};
pub use viewport::{
    handle_create_viewport, handle_delete_viewport, handle_get_viewport, handle_viewport_event,
    handle_viewport_image, CreateViewportResponse, ViewportSnapshotResponse,
};
