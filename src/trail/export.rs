//! Übergabeformat eines gefundenen Trails an externe Renderer (JSON).

use anyhow::{Context, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{shade_given_time, summarize_elevation};
use crate::core::StreetGraph;
use crate::search::AcceptedTrail;

/// Ein Abschnitt des Trails in Besuchsreihenfolge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentExport {
    /// Besuchsreihenfolge (1-basiert)
    pub order: u32,
    /// Start-Node-ID
    pub from: u64,
    /// End-Node-ID
    pub to: u64,
    /// Position des Start-Nodes
    pub from_position: DVec2,
    /// Position des End-Nodes
    pub to_position: DVec2,
    /// Länge in Metern
    pub length: f64,
    /// Farbe `#rrggbb` nach Besuchsreihenfolge
    pub color: String,
}

/// Gefundener Trail samt Kennzahlen, bereit zum Zeichnen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailExport {
    /// Start-Node-ID
    pub start: u64,
    /// Anzahl der Abschnitte
    pub steps: u32,
    /// Gesamtlänge in Metern
    pub length: f64,
    /// Summierter Anstieg in Metern
    pub elevation_gain: f64,
    /// Summierter Abstieg in Metern
    pub elevation_loss: f64,
    /// Verwendete Start-Peilung in Grad
    pub initial_bearing: f64,
    /// Abschnitte in Besuchsreihenfolge
    pub segments: Vec<SegmentExport>,
}

impl TrailExport {
    /// Stellt den Export aus Trail und Graph zusammen
    pub fn build(graph: &StreetGraph, trail: &AcceptedTrail) -> Result<Self> {
        let segments = trail
            .edges
            .iter()
            .map(|edge| {
                let from = graph
                    .node(edge.from)
                    .with_context(|| format!("Node {} fehlt im Graphen", edge.from))?;
                let to = graph
                    .node(edge.to)
                    .with_context(|| format!("Node {} fehlt im Graphen", edge.to))?;
                let length = graph
                    .find_edge(edge.from, edge.to)
                    .map(|e| e.attrs.length)
                    .with_context(|| format!("Kante {} → {} fehlt", edge.from, edge.to))?;

                Ok(SegmentExport {
                    order: edge.order,
                    from: edge.from,
                    to: edge.to,
                    from_position: from.position,
                    to_position: to.position,
                    length,
                    color: shade_given_time(edge.order, trail.steps),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let elevation = summarize_elevation(graph, &trail.node_sequence());

        Ok(Self {
            start: trail.start,
            steps: trail.steps,
            length: trail.length,
            elevation_gain: elevation.gain,
            elevation_loss: elevation.loss,
            initial_bearing: trail.initial_bearing,
            segments,
        })
    }

    /// Serialisiert den Export als formatiertes JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Trail-Export konnte nicht serialisiert werden")
    }

    /// Schreibt den Export als JSON-Datei
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Fehler beim Schreiben von {}", path.display()))?;
        log::info!("Trail exportiert nach: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StreetNode;
    use crate::search::{search_route, InitialBearing, SearchConfig};
    use approx::assert_relative_eq;

    fn triangle() -> StreetGraph {
        let mut graph = StreetGraph::new();
        graph.extend_nodes([
            StreetNode::new(1, DVec2::new(0.0, 0.0), 10.0),
            StreetNode::new(2, DVec2::new(0.0, 3.0), 14.0),
            StreetNode::new(3, DVec2::new(4.0, 0.0), 12.0),
        ]);
        graph.add_street(1, 2).expect("Strasse 1-2");
        graph.add_street(2, 3).expect("Strasse 2-3");
        graph.add_street(3, 1).expect("Strasse 3-1");
        graph
    }

    #[test]
    fn test_export_full_loop() {
        let graph = triangle();
        let config = SearchConfig::new(12.0).with_initial_bearing(InitialBearing::Fixed(0.0));
        let trail = search_route(&graph, 1, &config)
            .expect("gültige Eingabe")
            .into_trail()
            .expect("Trail erwartet");

        let export = TrailExport::build(&graph, &trail).expect("Export");

        assert_eq!(export.steps, 3);
        assert_relative_eq!(export.length, 12.0);
        assert_relative_eq!(export.elevation_gain, 4.0);
        assert_relative_eq!(export.elevation_loss, 4.0);
        let ids: Vec<(u64, u64)> = export.segments.iter().map(|s| (s.from, s.to)).collect();
        assert_eq!(ids, vec![(1, 2), (2, 3), (3, 1)]);
        assert_eq!(export.segments[2].color, "#ff0000");
        assert_relative_eq!(export.segments[1].length, 5.0);
    }

    #[test]
    fn test_json_contains_segments() {
        let graph = triangle();
        let config = SearchConfig::new(3.0).with_initial_bearing(InitialBearing::Fixed(0.0));
        let trail = search_route(&graph, 1, &config)
            .expect("gültige Eingabe")
            .into_trail()
            .expect("Trail erwartet");

        let json = TrailExport::build(&graph, &trail)
            .expect("Export")
            .to_json()
            .expect("JSON");
        let parsed: TrailExport = serde_json::from_str(&json).expect("JSON lesbar");

        assert_eq!(parsed.segments.len(), 1);
        assert_eq!(parsed.segments[0].color, "#ff0000");
        assert_eq!(parsed.segments[0].to, 2);
    }
}
