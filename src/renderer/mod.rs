//! Rendering front end
//!
//! Everything up to the GPU boundary: atlas quad tables, scene building,
//! sprite tessellation into `Pod` vertices, and letterbox presentation math.
//! Windowing and the draw calls themselves belong to the host.

pub mod atlas;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use atlas::Atlas;
pub use scene::{Align, FontSize, Label, Scene, Sprite, TextureId};
pub use vertex::Vertex;
pub use viewport::Viewport;
