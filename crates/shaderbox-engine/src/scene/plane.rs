use bytemuck::{Pod, Zeroable};

/// Vertex format of the shader plane.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Viewport-sized quad centered at the origin, facing the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub width: f32,
    pub height: f32,
    vertices: [PlaneVertex; 4],
}

impl Plane {
    pub const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    pub fn new(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;

        // Counter-clockwise from bottom-left; UV origin bottom-left.
        let vertices = [
            PlaneVertex { position: [-hw, -hh, 0.0], uv: [0.0, 0.0] },
            PlaneVertex { position: [hw, -hh, 0.0], uv: [1.0, 0.0] },
            PlaneVertex { position: [hw, hh, 0.0], uv: [1.0, 1.0] },
            PlaneVertex { position: [-hw, hh, 0.0], uv: [0.0, 1.0] },
        ];

        Self {
            width,
            height,
            vertices,
        }
    }

    pub fn vertices(&self) -> &[PlaneVertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_spans_the_requested_size() {
        let plane = Plane::new(640.0, 480.0);
        let xs: Vec<f32> = plane.vertices().iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = plane.vertices().iter().map(|v| v.position[1]).collect();

        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -320.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 320.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -240.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 240.0);
    }

    #[test]
    fn plane_is_flat() {
        let plane = Plane::new(100.0, 50.0);
        assert!(plane.vertices().iter().all(|v| v.position[2] == 0.0));
    }
}
