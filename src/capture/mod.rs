pub mod normalize;
pub mod raw;
pub mod types;

pub use normalize::{display_role, normalize_capture};
pub use types::{Capture, CaptureProject, Element, InteractionEvent, Page, Step, StepEvent};
