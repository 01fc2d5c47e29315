//! Block scene layout
//!
//! The grid is centered on the origin in the X/Z plane (Z up), one unit cube
//! per on cell. Row 0 is the top row. The host draws it; this module only
//! describes it.

use identiblock_core::{Identicon, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Scene layout knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Distance between neighbouring cell centers
    pub spacing: f64,
    /// Square render resolution in pixels
    pub resolution: u32,
    /// Camera distance from the origin
    pub camera_distance: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            resolution: 500,
            camera_distance: 10.0,
        }
    }
}

/// One raised unit for an on cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub row: usize,
    pub col: usize,
    pub location: [f64; 3],
    pub scale: [f64; 3],
}

/// Surface shared by all blocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// RGBA
    pub base_color: [f64; 4],
    pub roughness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightKind {
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub location: [f64; 3],
    /// Watts
    pub energy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub location: [f64; 3],
    /// XYZ euler angles, radians
    pub rotation_euler: [f64; 3],
}

impl Camera {
    /// Place on a sphere of radius `distance`, aimed at the origin.
    /// `theta` is the polar angle from +Z, `phi` the azimuth from +X.
    pub fn orbit(distance: f64, theta: f64, phi: f64) -> Self {
        Self {
            location: [
                distance * theta.sin() * phi.cos(),
                distance * theta.sin() * phi.sin(),
                distance * theta.cos(),
            ],
            rotation_euler: [theta, 0.0, FRAC_PI_2 + phi],
        }
    }
}

/// Everything a host needs to draw one identicon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub resolution: [u32; 2],
    pub blocks: Vec<Block>,
    pub material: Material,
    pub lights: Vec<Light>,
    pub camera: Camera,
}

impl Scene {
    pub fn build(identicon: &Identicon, config: &SceneConfig) -> Self {
        let span = (GRID_SIZE - 1) as f64 / 2.0 * config.spacing;
        let x_offset = -span;
        let z_offset = span;
        let half = 0.5 * config.spacing;

        let blocks: Vec<Block> = identicon
            .pattern
            .filled_cells()
            .map(|(row, col)| Block {
                name: format!("block_{:02}{:02}", row, col),
                row,
                col,
                location: [
                    x_offset + col as f64 * config.spacing,
                    0.0,
                    z_offset - row as f64 * config.spacing,
                ],
                scale: [half, half, half],
            })
            .collect();

        tracing::debug!(
            digest = %identicon.digest,
            blocks = blocks.len(),
            "built scene"
        );

        Self {
            resolution: [config.resolution, config.resolution],
            blocks,
            material: Material {
                base_color: identicon.color.with_alpha(),
                roughness: 1.0,
            },
            lights: light_rig(),
            camera: Camera::orbit(
                config.camera_distance,
                75f64.to_radians(),
                (-75f64).to_radians(),
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Key, fill and rim point lights
fn light_rig() -> Vec<Light> {
    [
        ("key", [-5.0, -10.0, 10.0], 8000.0),
        ("fill", [10.0, -10.0, 0.0], 1000.0),
        ("rim", [3.0, 10.0, 10.0], 1000.0),
    ]
    .into_iter()
    .map(|(name, location, energy)| Light {
        name: name.to_string(),
        kind: LightKind::Point,
        location,
        energy,
    })
    .collect()
}
