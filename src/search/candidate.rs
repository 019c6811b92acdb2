//! Prüft, ob eine Kante als nächster Schritt eines Zweigs zulässig ist.

use super::{BranchState, ToleranceBand};
use crate::core::GraphProvider;

/// Darf der Zweig mit bisheriger Länge `length_so_far` über `from → to` verlängert werden?
///
/// Zulässig nur wenn alle Bedingungen gelten:
/// - `from → to` ist noch nicht im Zweig
/// - `to → from` ist noch nicht im Zweig (kein Zurücklaufen auf derselben Strasse)
/// - die Kante existiert und hat eine Länge > 0
/// - die neue Gesamtlänge überschreitet die obere Grenze des Fensters nicht
pub fn is_legal_candidate<G: GraphProvider + ?Sized>(
    branch: &BranchState,
    length_so_far: f64,
    from: u64,
    to: u64,
    graph: &G,
    band: &ToleranceBand,
) -> bool {
    if branch.has_undirected(from, to) {
        return false;
    }

    let Some(attrs) = graph.edge_attrs(from, to) else {
        return false;
    };

    attrs.length > 0.0 && band.admits(length_so_far + attrs.length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StreetEdge, StreetGraph, StreetNode};
    use glam::DVec2;

    fn line_graph() -> StreetGraph {
        let mut graph = StreetGraph::new();
        graph.extend_nodes([
            StreetNode::flat(1, DVec2::new(0.0, 0.0)),
            StreetNode::flat(2, DVec2::new(4.0, 0.0)),
            StreetNode::flat(3, DVec2::new(8.0, 0.0)),
        ]);
        graph.add_street(1, 2).expect("Strasse 1-2");
        graph.add_street(2, 3).expect("Strasse 2-3");
        graph
            .add_edge_with_attrs(StreetEdge::new(3, 3, 0.0, 0.0))
            .expect("Schleife an 3");
        graph
            .add_edge_with_attrs(StreetEdge::new(1, 3, -2.0, 90.0))
            .expect("negative Kante");
        graph
    }

    fn band() -> ToleranceBand {
        ToleranceBand::new(10.0, 1.1).expect("gültiges Fenster")
    }

    #[test]
    fn test_accepts_fresh_edge() {
        let graph = line_graph();
        let branch = BranchState::new();

        assert!(is_legal_candidate(&branch, 0.0, 1, 2, &graph, &band()));
    }

    #[test]
    fn test_rejects_committed_edge_in_either_direction() {
        let graph = line_graph();
        let mut branch = BranchState::new();
        branch.commit(1, 2, 1);

        assert!(!is_legal_candidate(&branch, 4.0, 1, 2, &graph, &band()));
        assert!(!is_legal_candidate(&branch, 4.0, 2, 1, &graph, &band()));
        assert!(is_legal_candidate(&branch, 4.0, 2, 3, &graph, &band()));
    }

    #[test]
    fn test_rejects_non_positive_length() {
        let graph = line_graph();
        let branch = BranchState::new();

        assert!(!is_legal_candidate(&branch, 0.0, 3, 3, &graph, &band()));
        assert!(!is_legal_candidate(&branch, 0.0, 1, 3, &graph, &band()));
    }

    #[test]
    fn test_rejects_missing_edge() {
        let graph = line_graph();
        let branch = BranchState::new();

        assert!(!is_legal_candidate(&branch, 0.0, 3, 1, &graph, &band()));
    }

    #[test]
    fn test_rejects_edge_beyond_upper_bound() {
        let graph = line_graph();
        let branch = BranchState::new();

        // 7 + 4 = 11 liegt noch im Fenster, 7.5 + 4 nicht mehr
        assert!(is_legal_candidate(&branch, 7.0, 1, 2, &graph, &band()));
        assert!(!is_legal_candidate(&branch, 7.5, 1, 2, &graph, &band()));
    }
}
