//! Routensuche: Tiefensuche mit Backtracking nach einem Trail im Längenfenster.
//!
//! - `bearing`: Winkeldifferenz zweier Peilungen
//! - `tolerance`: Akzeptanzfenster der Trail-Länge
//! - `branch`: isolierter Zustand eines Suchzweigs
//! - `candidate`: Zulässigkeit der nächsten Kante
//! - `engine`: der eigentliche Suchlauf

pub mod bearing;
pub mod branch;
pub mod candidate;
pub mod engine;
pub mod tolerance;

pub use bearing::bearing_diff;
pub use branch::{BranchState, CommittedEdge};
pub use candidate::is_legal_candidate;
pub use engine::{
    find_route, search_route, AcceptedTrail, InitialBearing, SearchConfig, SearchOutcome,
    SearchStats,
};
pub use tolerance::{ToleranceBand, DEFAULT_TOLERANCE_FACTOR};
