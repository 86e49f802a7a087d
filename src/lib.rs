//! objnav - Load Wavefront OBJ geometry into triangle meshes for navmesh construction

pub mod config;
pub mod mesh;
pub mod obj;
pub mod rng;

pub use mesh::Mesh;
pub use obj::{ImportError, ImportOptions, import, import_with, load_file};
pub use rng::DeterministicRng;
