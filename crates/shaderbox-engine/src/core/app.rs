use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
///
/// Returning `Exit` is the one way to leave the animation loop; there is no
/// pause operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the shell layer.
pub trait App {
    /// Called for window events the runtime does not consume itself.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called when the window is resized, before the runtime reconfigures the
    /// surface. The app decides whether its own state follows the new size.
    fn on_resize(&mut self, new_size: PhysicalSize<u32>) {
        let _ = new_size;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
