//! Die zentrale StreetGraph-Datenstruktur mit Nodes, gerichteten Kanten und Spatial-Index.

use super::{EdgeAttrs, GraphProvider, SpatialIndex, SpatialMatch, StreetEdge, StreetNode};
use anyhow::{bail, Result};
use glam::DVec2;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Strassen- bzw. Wegenetz als gerichteter Graph.
///
/// Nodes und Nachbarlisten behalten ihre Einfüge-Reihenfolge, damit die native
/// Nachbar-Reihenfolge (und damit jede Suche) deterministisch ist.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    /// Alle Nodes, indexiert nach ihrer ID (Einfüge-Reihenfolge)
    nodes: IndexMap<u64, StreetNode>,
    /// Alle Kanten, indexiert nach (start_id, end_id) für O(1)-Zugriff
    edges: HashMap<(u64, u64), StreetEdge>,
    /// Ausgehende Nachbarn pro Node in Einfüge-Reihenfolge
    adjacency: IndexMap<u64, Vec<u64>>,
    /// Name des Netzes (optional)
    pub name: Option<String>,
    /// Persistenter Spatial-Index für Startpositions-Abfragen
    spatial_index: SpatialIndex,
}

impl StreetGraph {
    /// Erstellt einen neuen leeren Graphen
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: HashMap::new(),
            adjacency: IndexMap::new(),
            name: None,
            spatial_index: SpatialIndex::empty(),
        }
    }

    /// Fügt einen Node hinzu (ersetzt einen bestehenden Node gleicher ID)
    pub fn add_node(&mut self, node: StreetNode) {
        self.insert_node(node);
        self.rebuild_spatial_index();
    }

    /// Fügt viele Nodes hinzu und baut den Spatial-Index nur einmal neu auf
    pub fn extend_nodes(&mut self, nodes: impl IntoIterator<Item = StreetNode>) {
        for node in nodes {
            self.insert_node(node);
        }
        self.rebuild_spatial_index();
    }

    fn insert_node(&mut self, node: StreetNode) {
        self.adjacency.entry(node.id).or_default();
        self.nodes.insert(node.id, node);
    }

    /// Fügt eine gerichtete Kante mit expliziten Attributen hinzu.
    ///
    /// Existiert `start → end` bereits, bleibt die erste Kante erhalten und es wird
    /// `false` zurückgegeben.
    pub fn add_edge_with_attrs(&mut self, edge: StreetEdge) -> Result<bool> {
        let key = (edge.start_id, edge.end_id);
        if !self.nodes.contains_key(&key.0) || !self.nodes.contains_key(&key.1) {
            bail!(
                "Kante {} → {} verweist auf unbekannten Node",
                edge.start_id,
                edge.end_id
            );
        }
        if self.edges.contains_key(&key) {
            log::debug!(
                "Kante {} → {} existiert bereits, erste Kante bleibt erhalten",
                key.0,
                key.1
            );
            return Ok(false);
        }

        self.adjacency.entry(key.0).or_default().push(key.1);
        self.edges.insert(key, edge);
        Ok(true)
    }

    /// Fügt eine gerichtete Kante hinzu, Länge und Peilung folgen aus den Node-Positionen
    pub fn add_edge(&mut self, start_id: u64, end_id: u64) -> Result<bool> {
        let (Some(start), Some(end)) = (self.nodes.get(&start_id), self.nodes.get(&end_id)) else {
            bail!(
                "Kante {} → {} verweist auf unbekannten Node",
                start_id,
                end_id
            );
        };
        let edge = StreetEdge::from_positions(start_id, end_id, start.position, end.position);
        self.add_edge_with_attrs(edge)
    }

    /// Fügt eine in beiden Richtungen befahrbare Strasse hinzu
    pub fn add_street(&mut self, node_a: u64, node_b: u64) -> Result<()> {
        self.add_edge(node_a, node_b)?;
        self.add_edge(node_b, node_a)?;
        Ok(())
    }

    /// Prüft ob eine Kante existiert (exaktes Match auf start_id + end_id), O(1)
    pub fn has_edge(&self, start_id: u64, end_id: u64) -> bool {
        self.edges.contains_key(&(start_id, end_id))
    }

    /// Findet eine Kante (exaktes Match), O(1)
    pub fn find_edge(&self, start_id: u64, end_id: u64) -> Option<&StreetEdge> {
        self.edges.get(&(start_id, end_id))
    }

    /// Gibt einen Node zurück
    pub fn node(&self, id: u64) -> Option<&StreetNode> {
        self.nodes.get(&id)
    }

    /// Setzt die Höhe eines Nodes
    pub fn set_elevation(&mut self, id: u64, elevation: f64) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.elevation = elevation;
        true
    }

    /// Iterator über alle Nodes (read-only, Einfüge-Reihenfolge)
    pub fn nodes_iter(&self) -> impl Iterator<Item = &StreetNode> {
        self.nodes.values()
    }

    /// Mutabler Iterator über alle Nodes (Positionen bitte nicht ändern)
    pub(crate) fn nodes_iter_mut(&mut self) -> impl Iterator<Item = &mut StreetNode> {
        self.nodes.values_mut()
    }

    /// Iterator über alle Kanten (read-only)
    pub fn edges_iter(&self) -> impl Iterator<Item = &StreetEdge> {
        self.edges.values()
    }

    /// Gibt die Anzahl der Nodes zurück
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt die Anzahl der gerichteten Kanten zurück
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Baut den persistenten Spatial-Index aus den aktuellen Nodes neu auf.
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial_index = SpatialIndex::from_nodes(&self.nodes);
    }

    /// Findet den nächstgelegenen Node zur Position.
    pub fn nearest_node(&self, query: DVec2) -> Option<SpatialMatch> {
        self.spatial_index.nearest(query)
    }

    /// Löst eine Startposition auf einen Node auf, sofern dieser innerhalb `snap_radius` liegt.
    pub fn snap_to_node(&self, query: DVec2, snap_radius: f64) -> Result<u64> {
        match self.nearest_node(query) {
            Some(hit) if hit.distance <= snap_radius => Ok(hit.node_id),
            Some(hit) => bail!(
                "Kein Node innerhalb von {:.1} m um ({:.1}, {:.1}), nächster Node {} liegt {:.1} m entfernt",
                snap_radius,
                query.x,
                query.y,
                hit.node_id,
                hit.distance
            ),
            None => bail!("Graph enthält keine Nodes"),
        }
    }
}

impl Default for StreetGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphProvider for StreetGraph {
    fn contains_node(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    fn neighbors(&self, id: u64) -> &[u64] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn edge_attrs(&self, from: u64, to: u64) -> Option<EdgeAttrs> {
        self.edges.get(&(from, to)).map(|edge| edge.attrs)
    }

    fn elevation(&self, id: u64) -> Option<f64> {
        self.nodes.get(&id).map(|node| node.elevation)
    }
}
