//! Auf- und Abstieg entlang einer Node-Folge.

use crate::core::GraphProvider;

/// Summierte Höhenmeter entlang eines Trails
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElevationSummary {
    /// Summe aller Anstiege in Metern
    pub gain: f64,
    /// Summe aller Abstiege in Metern (positiv)
    pub loss: f64,
}

/// Summe der positiven Höhendifferenzen aufeinanderfolgender Nodes.
///
/// Leere und einelementige Folgen ergeben 0.
pub fn total_elevation_gain<G: GraphProvider + ?Sized>(graph: &G, trail: &[u64]) -> f64 {
    summarize_elevation(graph, trail).gain
}

/// Anstieg und Abstieg entlang der Node-Folge.
///
/// Paare mit einem Node ohne Höhe tragen nichts bei.
pub fn summarize_elevation<G: GraphProvider + ?Sized>(
    graph: &G,
    trail: &[u64],
) -> ElevationSummary {
    let mut summary = ElevationSummary::default();

    for pair in trail.windows(2) {
        let (Some(from), Some(to)) = (graph.elevation(pair[0]), graph.elevation(pair[1])) else {
            log::warn!("Höhe für Abschnitt {} → {} unbekannt", pair[0], pair[1]);
            continue;
        };

        let diff = to - from;
        if diff > 0.0 {
            summary.gain += diff;
        } else {
            summary.loss -= diff;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StreetGraph, StreetNode};
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn hills() -> StreetGraph {
        let mut graph = StreetGraph::new();
        graph.extend_nodes([
            StreetNode::new(1, DVec2::new(0.0, 0.0), 100.0),
            StreetNode::new(2, DVec2::new(10.0, 0.0), 90.0),
            StreetNode::new(3, DVec2::new(20.0, 0.0), 120.0),
        ]);
        graph
    }

    #[test]
    fn test_gain_counts_only_rises() {
        let graph = hills();

        assert_relative_eq!(total_elevation_gain(&graph, &[1, 2, 3]), 30.0);
        assert_relative_eq!(total_elevation_gain(&graph, &[3, 2, 1]), 10.0);
    }

    #[test]
    fn test_short_sequences_yield_zero() {
        let graph = hills();

        assert_relative_eq!(total_elevation_gain(&graph, &[]), 0.0);
        assert_relative_eq!(total_elevation_gain(&graph, &[2]), 0.0);
    }

    #[test]
    fn test_summary_gain_and_loss() {
        let graph = hills();

        let summary = summarize_elevation(&graph, &[1, 2, 3, 1]);
        assert_relative_eq!(summary.gain, 30.0);
        assert_relative_eq!(summary.loss, 30.0);
    }

    #[test]
    fn test_unknown_nodes_are_skipped() {
        let graph = hills();

        assert_relative_eq!(total_elevation_gain(&graph, &[2, 99, 3]), 0.0);
        assert_relative_eq!(total_elevation_gain(&graph, &[2, 3, 99]), 30.0);
    }
}
