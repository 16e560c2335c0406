use bytemuck::{Pod, Zeroable};

use crate::shader::ShaderSources;

/// Value of the frame uniform when the material is created; the first
/// animation-loop iteration advances it to `INITIAL_FRAME + 1`.
pub const INITIAL_FRAME: f32 = 1.0;

/// Uniform block handed to the fragment stage.
///
/// Field names follow the conventional sandbox spelling (`iResolution`,
/// `iTime`, `iFrame`) on the WGSL side; see `render/shaders/default.frag.wgsl`
/// for the matching declaration. 16 bytes, std140-compatible.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SandboxUniforms {
    /// Viewport resolution in pixels (`iResolution`).
    pub resolution: [f32; 2],
    /// Elapsed seconds since the loop started (`iTime`).
    pub time: f32,
    /// Frame index (`iFrame`).
    pub frame: f32,
}

/// The shader-driven material: source text plus the uniform state the
/// animation loop mutates.
///
/// Exactly one material exists per sandbox; it is never replaced after
/// initialization.
#[derive(Debug, Clone)]
pub struct Material {
    /// User-supplied vertex stage, when present. The renderer falls back to
    /// the built-in plane vertex stage otherwise.
    pub vertex_source: Option<String>,
    /// User-supplied fragment stage, when present. The renderer falls back to
    /// a built-in debug pattern otherwise.
    pub fragment_source: Option<String>,
    pub uniforms: SandboxUniforms,
}

impl Material {
    pub fn new(sources: ShaderSources, width: u32, height: u32) -> Self {
        Self {
            vertex_source: sources.vertex,
            fragment_source: sources.fragment,
            uniforms: SandboxUniforms {
                resolution: [width as f32, height as f32],
                time: 0.0,
                frame: INITIAL_FRAME,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_16_bytes() {
        // One vec2 + two scalars, no hidden padding.
        assert_eq!(std::mem::size_of::<SandboxUniforms>(), 16);
    }

    #[test]
    fn fresh_material_reflects_viewport_and_initial_frame() {
        let mat = Material::new(
            ShaderSources {
                vertex: None,
                fragment: Some(String::new()),
            },
            640,
            480,
        );
        assert_eq!(mat.uniforms.resolution, [640.0, 480.0]);
        assert_eq!(mat.uniforms.time, 0.0);
        assert_eq!(mat.uniforms.frame, INITIAL_FRAME);
    }
}
