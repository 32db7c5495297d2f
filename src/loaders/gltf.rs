use anyhow::{Context, Result};
use glam::{Mat3, Mat4, Vec3};
use image::imageops::FilterType;
use std::path::Path;

use crate::math::{fit_within, AABB};
use crate::types::Vertex;

/// Everything the renderer needs from a glTF scene, flattened into world space
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    pub materials: Vec<MaterialData>,
    pub textures: Vec<TextureData>,
    pub bounds: Option<AABB>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}

/// One glTF primitive with node transforms applied
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Index into `ModelData::materials`
    pub material: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    /// Linear RGBA
    pub base_color: [f32; 4],
    /// Index into `ModelData::textures`
    pub texture: Option<usize>,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            base_color: [0.7, 0.7, 0.7, 1.0],
            texture: None,
        }
    }
}

/// Texture data loaded from glTF
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA8, sRGB encoded
}

impl TextureData {
    /// Copy shrunk to at most `max_dimension` texels per side, `None` when it already fits.
    /// A pixel buffer that doesn't match the size is replaced by a white texel.
    pub fn downscaled_to_fit(&self, max_dimension: u32) -> Option<TextureData> {
        let (width, height) = fit_within(self.width, self.height, max_dimension);
        let consistent = self.data.len() == self.width as usize * self.height as usize * 4;
        if consistent && (width, height) == (self.width, self.height) {
            return None;
        }

        let Some(image) = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
        else {
            log::warn!(
                "Texture data does not match its {}x{} size, using white",
                self.width,
                self.height
            );
            return Some(TextureData {
                width: 1,
                height: 1,
                data: vec![255; 4],
            });
        };

        log::warn!(
            "Texture {}x{} exceeds the {} texel limit, downscaling to {}x{}",
            self.width,
            self.height,
            max_dimension,
            width,
            height
        );
        let resized = image::imageops::resize(&image, width, height, FilterType::Triangle);
        Some(TextureData {
            width,
            height,
            data: resized.into_raw(),
        })
    }
}

/// Loads a glTF file: meshes, materials, base colour textures and bounds
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelData> {
    let path = path.as_ref();
    log::info!("Loading model: {:?}", path);

    let (document, buffers, images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    log::info!(
        "glTF loaded: {} scenes, {} nodes, {} meshes, {} materials, {} images",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count(),
        document.materials().count(),
        images.len()
    );

    let mut materials: Vec<MaterialData> = document
        .materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            MaterialData {
                base_color: pbr.base_color_factor(),
                texture: pbr
                    .base_color_texture()
                    .map(|info| info.texture().source().index()),
            }
        })
        .collect();

    // Primitives without a material use the trailing default
    let default_material = materials.len();
    materials.push(MaterialData::default());

    let textures = images.iter().map(convert_image).collect();

    // Only the default scene is shown; files without one fall back to the first
    let mut meshes = Vec::new();
    if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
        log::debug!("Processing scene {}: {:?}", scene.index(), scene.name());
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, default_material, &mut meshes)?;
        }
    }

    let bounds = AABB::from_points(
        meshes
            .iter()
            .flat_map(|m| m.vertices.iter().map(|v| Vec3::from_array(v.position))),
    );

    let model = ModelData {
        meshes,
        materials,
        textures,
        bounds,
    };

    if model.meshes.is_empty() {
        log::warn!("No geometry found in {:?}", path);
    }
    log::info!(
        "Extracted {} meshes, {} triangles",
        model.meshes.len(),
        model.triangle_count()
    );

    Ok(model)
}

/// Convert a decoded glTF image to RGBA8
fn convert_image(image: &gltf::image::Data) -> TextureData {
    let data = match image.format {
        gltf::image::Format::R8G8B8A8 => image.pixels.clone(),
        gltf::image::Format::R8G8B8 => image
            .pixels
            .chunks(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        gltf::image::Format::R8G8 => image
            .pixels
            .chunks(2)
            .flat_map(|rg| [rg[0], rg[1], 0, 255])
            .collect(),
        gltf::image::Format::R8 => image.pixels.iter().flat_map(|&r| [r, r, r, 255]).collect(),
        other => {
            log::warn!("Unsupported texture format {:?}, using white", other);
            vec![255; (image.width * image.height * 4) as usize]
        }
    };

    TextureData {
        width: image.width,
        height: image.height,
        data,
    }
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    default_material: usize,
    meshes: &mut Vec<MeshData>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, default_material, meshes)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, default_material, meshes)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    default_material: usize,
    meshes: &mut Vec<MeshData>,
) -> Result<()> {
    log::debug!("Processing mesh: {:?}", mesh.name());
    let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|p| transform.transform_point3(Vec3::from_array(p)))
            .collect();

        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        let indices = sanitize_indices(indices, positions.len());

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => compute_vertex_normals(&positions, &indices),
        };

        let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
            Some(uvs) => uvs.into_f32().collect(),
            None => vec![[0.0, 0.0]; positions.len()],
        };

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Vertex::new(
                    p.to_array(),
                    normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                    uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                )
            })
            .collect();

        meshes.push(MeshData {
            vertices,
            indices,
            material: primitive.material().index().unwrap_or(default_material),
        });
    }

    Ok(())
}

/// Drop incomplete trailing triangles and triangles referencing missing vertices
pub fn sanitize_indices(indices: Vec<u32>, vertex_count: usize) -> Vec<u32> {
    indices
        .chunks_exact(3)
        .filter(|tri| tri.iter().all(|&i| (i as usize) < vertex_count))
        .flatten()
        .copied()
        .collect()
}

/// Area-weighted smooth normals for meshes that ship without them
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_partial_triangle() {
        let indices = sanitize_indices(vec![0, 1, 2, 0, 1], 3);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sanitize_drops_out_of_range() {
        let indices = sanitize_indices(vec![0, 1, 2, 1, 2, 7], 3);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_vertex_normals_of_floor_quad_point_up() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2, 0, 2, 3]);

        for n in normals {
            assert!((n - Vec3::Y).length() < 1e-6, "normal {:?}", n);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_up_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::ONE];
        let normals = compute_vertex_normals(&positions, &[0, 2, 1]);
        assert_eq!(normals[3], Vec3::Y);
    }

    /// One triangle instanced by two scenes; scene 0 shifts it 10 units along X
    fn two_scene_gltf(default_scene: Option<usize>) -> String {
        let scene = default_scene
            .map(|index| format!(r#""scene": {},"#, index))
            .unwrap_or_default();
        format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                {scene}
                "scenes": [ {{ "nodes": [0] }}, {{ "nodes": [1] }} ],
                "nodes": [
                    {{ "mesh": 0, "translation": [10.0, 0.0, 0.0] }},
                    {{ "mesh": 0 }}
                ],
                "meshes": [ {{ "primitives": [ {{ "attributes": {{ "POSITION": 0 }} }} ] }} ],
                "accessors": [ {{
                    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                    "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
                }} ],
                "bufferViews": [ {{ "buffer": 0, "byteLength": 36 }} ],
                "buffers": [ {{
                    "byteLength": 36,
                    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
                }} ]
            }}"#
        )
    }

    fn load_from_str(name: &str, json: &str) -> ModelData {
        let path = std::env::temp_dir().join(format!("room_viewer_{}_{}.gltf", name, std::process::id()));
        std::fs::write(&path, json).unwrap();
        let model = load_model(&path);
        std::fs::remove_file(&path).ok();
        model.unwrap()
    }

    #[test]
    fn test_loads_only_default_scene() {
        let model = load_from_str("default_scene", &two_scene_gltf(Some(1)));

        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.triangle_count(), 1);
        let bounds = model.bounds.unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_without_default_scene_uses_first() {
        let model = load_from_str("first_scene", &two_scene_gltf(None));

        assert_eq!(model.meshes.len(), 1);
        let bounds = model.bounds.unwrap();
        assert_eq!(bounds.min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 0.0));
    }

    #[test]
    fn test_primitive_without_material_uses_default() {
        let model = load_from_str("default_material", &two_scene_gltf(Some(0)));

        assert_eq!(model.materials, vec![MaterialData::default()]);
        assert_eq!(model.meshes[0].material, 0);
        // No normals in the file: the flat triangle faces +Z
        for vertex in &model.meshes[0].vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_texture_within_limit_is_kept() {
        let texture = TextureData {
            width: 4,
            height: 2,
            data: vec![128; 4 * 2 * 4],
        };
        assert!(texture.downscaled_to_fit(8192).is_none());
    }

    #[test]
    fn test_oversized_texture_is_downscaled() {
        let texture = TextureData {
            width: 4096,
            height: 16,
            data: vec![200; 4096 * 16 * 4],
        };

        let resized = texture.downscaled_to_fit(1024).unwrap();
        assert_eq!((resized.width, resized.height), (1024, 4));
        assert_eq!(resized.data.len(), 1024 * 4 * 4);
        assert!(resized.data.iter().all(|&c| c == 200));
    }

    #[test]
    fn test_truncated_texture_becomes_white() {
        let texture = TextureData {
            width: 8,
            height: 8,
            data: vec![0; 10],
        };

        let replaced = texture.downscaled_to_fit(8192).unwrap();
        assert_eq!((replaced.width, replaced.height), (1, 1));
        assert_eq!(replaced.data, vec![255; 4]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_model("/nonexistent/scene.gltf");
        assert!(result.is_err());
    }
}
