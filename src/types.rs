use crate::environment::{Environment, Lighting};

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

/// Lights, background and tone-mapping parameters for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// rgb * intensity
    pub ambient: [f32; 4],
    /// rgb, w = intensity
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    /// Normalized direction toward the light, w = intensity
    pub light_direction: [f32; 4],
    pub light_color: [f32; 4],
    pub background: [f32; 4],
    /// x = exposure, y = environment intensity, z = 1.0 when an HDRI is bound,
    /// w = 1.0 for tone mapping
    pub params: [f32; 4],
}

impl SceneUniform {
    pub fn new(lighting: &Lighting, environment: &Environment, has_hdri: bool) -> Self {
        let [ar, ag, ab] = lighting.ambient_color;
        let [sr, sg, sb] = lighting.sky_color;
        let [gr, gg, gb] = lighting.ground_color;
        let [lr, lg, lb] = lighting.directional_color;
        let [br, bg, bb] = environment.background;
        let dir = lighting.directional_position.normalize_or_zero();

        Self {
            ambient: [
                ar * lighting.ambient_intensity,
                ag * lighting.ambient_intensity,
                ab * lighting.ambient_intensity,
                1.0,
            ],
            hemisphere_sky: [sr, sg, sb, lighting.hemisphere_intensity],
            hemisphere_ground: [gr, gg, gb, 0.0],
            light_direction: [dir.x, dir.y, dir.z, lighting.directional_intensity],
            light_color: [lr, lg, lb, 1.0],
            background: [br, bg, bb, 1.0],
            params: [
                environment.exposure,
                environment.intensity,
                if has_hdri { 1.0 } else { 0.0 },
                if environment.tone_mapping_active(has_hdri) { 1.0 } else { 0.0 },
            ],
        }
    }
}

/// Per-material uniform data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
}

/// Mesh vertex layout shared by the loader and the mesh pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<MaterialUniform>() % 16, 0);
    }

    #[test]
    fn test_tone_mapping_flag_waits_for_hdri() {
        let environment = Environment {
            tone_mapping: true,
            exposure: 1.5,
            ..Environment::default()
        };

        let pending = SceneUniform::new(&Lighting::default(), &environment, false);
        assert_eq!(pending.params, [1.5, 1.0, 0.0, 0.0]);

        let bound = SceneUniform::new(&Lighting::default(), &environment, true);
        assert_eq!(bound.params, [1.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_vertex_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
