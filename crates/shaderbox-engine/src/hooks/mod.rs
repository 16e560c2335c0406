//! Lifecycle hooks.
//!
//! The sandbox notifies collaborators at three fixed points of its life:
//! scene initialization, just before each draw, and just after it. Events are
//! a closed, typed set with fixed payload shapes — there are no string keys
//! and no way to fire an event the sandbox does not define.

mod registry;

pub use registry::{Hooks, SceneInitEvent};
