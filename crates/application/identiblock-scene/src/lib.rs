//! # Identiblock Scene
//!
//! Presentation for a derived [`Identicon`](identiblock_core::Identicon):
//!
//! - `scene` - host-neutral 3D description: one cube per on cell, a tinted
//!   material, a three-point light rig and a camera
//! - `svg` - flat square image
//! - `ascii` - terminal preview
//!
//! Nothing here feeds back into derivation; it only reads the result.

pub mod ascii;
pub mod scene;
pub mod svg;

pub use ascii::render_ascii;
pub use scene::{Block, Camera, Light, LightKind, Material, Scene, SceneConfig};
pub use svg::render_svg;
