//! Spatial-Index (KD-Tree) zum Auflösen einer Startposition auf den nächsten Node.

use glam::DVec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::StreetNode;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Nodes
    pub node_id: u64,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Spatial-Index über allen Nodes eines StreetGraph.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    node_ids: Vec<u64>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            node_ids: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den übergebenen Nodes.
    pub fn from_nodes(nodes: &IndexMap<u64, StreetNode>) -> Self {
        let node_ids: Vec<u64> = nodes.keys().copied().collect();
        let entries: Vec<[f64; 2]> = nodes
            .values()
            .map(|node| [node.position.x, node.position.y])
            .collect();

        Self {
            tree: (&entries).into(),
            node_ids,
        }
    }

    /// Gibt die Anzahl indexierter Nodes zurück.
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Nodes im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Findet den nächsten Node zur gegebenen Position.
    pub fn nearest(&self, query: DVec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let node_id = *self.node_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            node_id,
            distance: result.distance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> IndexMap<u64, StreetNode> {
        let mut nodes = IndexMap::new();
        nodes.insert(1, StreetNode::flat(1, DVec2::new(0.0, 0.0)));
        nodes.insert(2, StreetNode::flat(2, DVec2::new(10.0, 0.0)));
        nodes.insert(3, StreetNode::flat(3, DVec2::new(4.0, 3.0)));
        nodes
    }

    #[test]
    fn nearest_returns_expected_node() {
        let index = SpatialIndex::from_nodes(&sample_nodes());
        let nearest = index
            .nearest(DVec2::new(3.9, 2.9))
            .expect("Treffer erwartet");

        assert_eq!(nearest.node_id, 3);
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(DVec2::new(0.0, 0.0)).is_none());
    }
}
