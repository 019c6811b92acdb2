//! Core-Domänentypen: Nodes, Kanten, StreetGraph, Spatial-Index, Heightmap.

pub mod edge;
pub mod heightmap;
pub mod node;
pub mod provider;
pub mod spatial;
pub mod street_graph;

pub use edge::{normalize_bearing, EdgeAttrs, StreetEdge};
pub use heightmap::{Heightmap, WorldBounds};
pub use node::StreetNode;
pub use provider::GraphProvider;
pub use spatial::{SpatialIndex, SpatialMatch};
pub use street_graph::StreetGraph;
