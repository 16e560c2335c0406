//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer.
//! The animation loop is explicit: every `RedrawRequested` ticks the frame
//! clock, drives one app frame, then schedules the next redraw. Leaving the
//! loop is explicit too, via [`AppControl::Exit`](crate::core::AppControl)
//! or closing the window.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
