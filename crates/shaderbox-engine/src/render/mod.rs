//! GPU rendering subsystem.
//!
//! Two renderers: the plane pass drawing the user's fragment shader through
//! the camera, and the overlay pass drawing the frame-rate counter text.
//! Each renderer owns its GPU resources (pipeline, buffers).

mod ctx;
mod overlay;
mod plane_pass;

pub use ctx::{RenderCtx, RenderTarget};
pub use overlay::OverlayRenderer;
pub use plane_pass::SandboxRenderer;
