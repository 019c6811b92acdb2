//! Parser für Wegenetze im AutoDrive-XML-Format.

mod waypoints;

use crate::core::StreetGraph;
use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;
use waypoints::RawWaypoints;

/// Parsed ein Wegenetz aus einem XML-String.
///
/// Ausgewertet werden `<MapName>` und der `<waypoints>`-Block (`id`, `x`, `y`, `z`, `out`);
/// alle übrigen Tags werden übersprungen.
pub fn parse_street_network(xml_content: &str) -> Result<StreetGraph> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut raw = RawWaypoints::default();
    let mut map_name: Option<String> = None;
    let mut in_waypoints = false;
    let mut current_tag: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "waypoints" {
                    in_waypoints = true;
                } else {
                    current_tag = Some(tag.to_string());
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();

                if in_waypoints {
                    match current_tag.as_deref() {
                        Some("id") => raw.ids.push_str(&text),
                        Some("x") => raw.x.push_str(&text),
                        Some("y") => raw.y.push_str(&text),
                        Some("z") => raw.z.push_str(&text),
                        Some("out") => raw.out.push_str(&text),
                        _ => {}
                    }
                } else if current_tag.as_deref() == Some("MapName") {
                    map_name = Some(text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "waypoints" {
                    in_waypoints = false;
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    let mut graph = waypoints::build_graph(&raw)?;
    graph.name = map_name;

    log::info!(
        "Wegenetz geladen: {} Nodes, {} Kanten{}",
        graph.node_count(),
        graph.edge_count(),
        graph
            .name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default()
    );

    Ok(graph)
}

/// Lädt ein Wegenetz aus einer XML-Datei
pub fn load_street_network(path: &Path) -> Result<StreetGraph> {
    let xml_content = std::fs::read_to_string(path)
        .with_context(|| format!("Fehler beim Lesen von {}", path.display()))?;
    parse_street_network(&xml_content)
        .with_context(|| format!("Ungueltiges Wegenetz in {}", path.display()))
}
