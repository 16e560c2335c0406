//! Shaderbox engine crate.
//!
//! This crate owns the sandbox controller and the platform + GPU runtime
//! pieces it stands on: window loop, device/surface management, frame
//! timing, lifecycle hooks, shader loading, and the fullscreen plane pass.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod hooks;
pub mod logging;
pub mod render;
pub mod sandbox;
pub mod scene;
pub mod shader;
pub mod stats;
pub mod text;
