pub mod background;
pub mod gltf;

pub use background::{BackgroundLoad, HdriLoader, ModelLoader};
pub use self::gltf::{load_model, MaterialData, MeshData, ModelData, TextureData};
