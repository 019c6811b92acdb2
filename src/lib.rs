//! Trail-Planer für Strassen- und Wegenetze.
//! Sucht ab einem Startpunkt einen Trail ohne Kanten-Wiederholung, dessen Länge
//! im Fenster `[Ziel, Ziel × 1.1]` liegt, und wertet ihn aus (Höhenmeter, Farbverlauf).

pub mod core;
pub mod search;
pub mod shared;
pub mod trail;
pub mod xml;

pub use crate::core::{EdgeAttrs, GraphProvider, Heightmap, StreetEdge, StreetGraph, StreetNode};
pub use crate::core::{SpatialIndex, SpatialMatch, WorldBounds};
pub use search::{
    bearing_diff, find_route, is_legal_candidate, search_route, AcceptedTrail, BranchState,
    InitialBearing, SearchConfig, SearchOutcome, ToleranceBand,
};
pub use shared::PlannerOptions;
pub use trail::{shade_given_time, summarize_elevation, total_elevation_gain, TrailExport};
pub use xml::{load_street_network, parse_street_network};
