//! The sandbox controller.
//!
//! Owns the viewport dimensions, the lifecycle hooks, the shader sources,
//! and — once initialized — the scene graph (camera, plane, material). The
//! window runtime drives it one frame at a time.

mod controller;

pub use controller::{Sandbox, SandboxConfig, SandboxScene};
