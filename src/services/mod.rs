pub mod decoder;
pub mod study_cache;
pub mod study_service;
pub mod viewport_registry;

pub use study_cache::{CachedStudy, StudyCache};
pub use study_service::{RenderedStudy, StudyService};
pub use viewport_registry::{InMemoryViewportRegistry, SessionId, ViewportRegistry};
