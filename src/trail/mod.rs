//! Auswertung eines gefundenen Trails: Höhenmeter, Farbverlauf, Export.

pub mod elevation;
pub mod export;
pub mod shade;

pub use elevation::{summarize_elevation, total_elevation_gain, ElevationSummary};
pub use export::{SegmentExport, TrailExport};
pub use shade::shade_given_time;
