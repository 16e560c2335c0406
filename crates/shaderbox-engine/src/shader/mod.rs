//! Shader source loading.
//!
//! The sandbox consumes plain WGSL text; compilation is wgpu's job. This
//! module only gets the text off disk and reports what went wrong if it
//! could not.

mod source;

pub use source::{ShaderLoadError, ShaderSources};
