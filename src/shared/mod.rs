//! Geteilte Konfiguration für Bibliothek und Binary.

pub mod options;

pub use options::PlannerOptions;
pub use options::{SNAP_RADIUS, TERRAIN_HEIGHT_SCALE};
