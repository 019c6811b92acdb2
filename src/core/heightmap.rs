//! Heightmap-Loader und Höhen-Sampling für die Nodes eines Strassennetzes.
//!
//! Erkennt automatisch die Bit-Tiefe (8-Bit oder 16-Bit) und normalisiert
//! die Pixelwerte entsprechend. Bildzeile 0 liegt am nördlichen Rand (max_y).

use anyhow::{bail, Context, Result};
use glam::DVec2;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

use super::StreetGraph;

/// Graustufen-Heightmap mit Weltkoordinaten-Abdeckung
pub struct Heightmap {
    /// Normalisierte Grauwerte [0.0, 1.0], zeilenweise von Nord nach Süd
    samples: Vec<f32>,
    width: u32,
    height: u32,
    world_bounds: WorldBounds,
}

/// Weltkoordinaten-Begrenzungen der Heightmap (x = Ost, y = Nord)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Westlicher Rand
    pub min_x: f64,
    /// Südlicher Rand
    pub min_y: f64,
    /// Östlicher Rand
    pub max_x: f64,
    /// Nördlicher Rand
    pub max_y: f64,
}

impl WorldBounds {
    /// Erstellt Bounds aus einer Kantenlänge (zentriert bei 0,0)
    pub fn centered(size: f64) -> Self {
        let half = size / 2.0;
        Self {
            min_x: -half,
            min_y: -half,
            max_x: half,
            max_y: half,
        }
    }

    /// Normalisiert eine Weltposition auf [0, 1]² (u nach Ost, v nach Süd)
    fn normalize(&self, position: DVec2) -> (f64, f64) {
        let u = (position.x - self.min_x) / (self.max_x - self.min_x);
        let v = (self.max_y - position.y) / (self.max_y - self.min_y);
        (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
    }
}

impl Heightmap {
    /// Lädt eine Heightmap, die Abdeckung folgt aus den Pixel-Dimensionen
    /// (1 Pixel = 1 m, `size = max(width, height) - 1`, zentriert).
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Fehler beim Laden der Heightmap: {}", path.display()))?;

        let (width, height) = image.dimensions();
        let size = (width.max(height).saturating_sub(1)) as f64;
        Self::from_image(image, WorldBounds::centered(size))
    }

    /// Erstellt eine Heightmap aus einem geladenen Bild.
    pub fn from_image(image: DynamicImage, world_bounds: WorldBounds) -> Result<Self> {
        let (width, height) = image.dimensions();

        let bit_depth = match image.color() {
            image::ColorType::L16
            | image::ColorType::La16
            | image::ColorType::Rgb16
            | image::ColorType::Rgba16 => 16u8,
            _ => 8u8,
        };

        let samples: Vec<f32> = if bit_depth == 16 {
            image
                .into_luma16()
                .pixels()
                .map(|p| p[0] as f32 / 65535.0)
                .collect()
        } else {
            image
                .into_luma8()
                .pixels()
                .map(|p| p[0] as f32 / 255.0)
                .collect()
        };

        let heightmap = Self::from_samples(samples, width, height, world_bounds)?;
        log::info!(
            "Heightmap geladen: {}x{} Pixel, {}-Bit, Bereich ({:.1}, {:.1}) bis ({:.1}, {:.1})",
            width,
            height,
            bit_depth,
            world_bounds.min_x,
            world_bounds.min_y,
            world_bounds.max_x,
            world_bounds.max_y
        );
        Ok(heightmap)
    }

    /// Erstellt eine Heightmap aus bereits normalisierten Grauwerten (zeilenweise, Nord zuerst).
    pub fn from_samples(
        samples: Vec<f32>,
        width: u32,
        height: u32,
        world_bounds: WorldBounds,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Heightmap ohne Pixel");
        }
        if samples.len() != (width as usize) * (height as usize) {
            bail!(
                "Heightmap-Daten passen nicht zu {}x{} Pixeln ({} Werte)",
                width,
                height,
                samples.len()
            );
        }
        if world_bounds.max_x <= world_bounds.min_x || world_bounds.max_y <= world_bounds.min_y {
            bail!("Ungueltige World-Bounds: {:?}", world_bounds);
        }

        Ok(Self {
            samples,
            width,
            height,
            world_bounds,
        })
    }

    /// Berechnet die Höhe in Metern an einer Weltposition.
    ///
    /// Bikubische Interpolation über die 4×4 Nachbarpixel, skaliert mit `height_scale`
    /// (`Höhe = Grauwert × height_scale`).
    pub fn sample_height(&self, position: DVec2, height_scale: f64) -> f64 {
        let (u, v) = self.world_bounds.normalize(position);
        let px = u * (self.width - 1) as f64;
        let py = v * (self.height - 1) as f64;

        let value = self.sample_bicubic(px, py);
        log::trace!(
            "Höhe bei ({:.2}, {:.2}) → Pixel ({:.2}, {:.2}) → {:.4}",
            position.x,
            position.y,
            px,
            py,
            value
        );
        value * height_scale
    }

    /// Setzt die Höhe aller Nodes des Graphen aus der Heightmap und gibt deren Anzahl zurück
    pub fn apply_to_graph(&self, graph: &mut StreetGraph, height_scale: f64) -> usize {
        let mut updated = 0;
        for node in graph.nodes_iter_mut() {
            node.elevation = self.sample_height(node.position, height_scale);
            updated += 1;
        }
        log::info!("Höhen für {} Nodes aus Heightmap übernommen", updated);
        updated
    }

    fn sample_bicubic(&self, px: f64, py: f64) -> f64 {
        let x = px.floor() as i64;
        let y = py.floor() as i64;
        let fx = px - px.floor();
        let fy = py - py.floor();

        let mut rows = [0.0f64; 4];
        for (j, row) in rows.iter_mut().enumerate() {
            let sy = (y + j as i64 - 1).clamp(0, self.height as i64 - 1) as u32;
            let mut values = [0.0f64; 4];
            for (i, cell) in values.iter_mut().enumerate() {
                let sx = (x + i as i64 - 1).clamp(0, self.width as i64 - 1) as u32;
                *cell = self.sample_at(sx, sy);
            }
            *row = catmull_rom(values, fx);
        }

        catmull_rom(rows, fy)
    }

    fn sample_at(&self, x: u32, y: u32) -> f64 {
        self.samples[(y * self.width + x) as usize] as f64
    }
}

/// Catmull-Rom-Interpolation zwischen `p[1]` (t = 0) und `p[2]` (t = 1)
fn catmull_rom(p: [f64; 4], t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p[0] + 1.5 * p[1] - 1.5 * p[2] + 0.5 * p[3];
    let b = p[0] - 2.5 * p[1] + 2.0 * p[2] - 0.5 * p[3];
    let c = -0.5 * p[0] + 0.5 * p[2];

    a * t3 + b * t2 + c * t + p[1]
}
