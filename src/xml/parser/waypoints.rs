//! Wegpunkt-Parsing: Konvertiert rohe String-Puffer in Nodes und gerichtete Kanten.

use crate::core::{StreetGraph, StreetNode};
use anyhow::{bail, Context, Result};
use glam::DVec2;

/// Rohdaten des `<waypoints>`-Blocks (komma- bzw. semikolon-getrennte Listen)
#[derive(Debug, Default)]
pub(super) struct RawWaypoints {
    pub ids: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub out: String,
}

/// Baut den StreetGraph aus den geparsten Waypoint-Rohdaten auf.
///
/// Position = (x, −z), damit +y nach Norden zeigt; `y` ist die Höhe.
/// Jeder Eintrag in `out` wird zu einer gerichteten Kante.
pub(super) fn build_graph(raw: &RawWaypoints) -> Result<StreetGraph> {
    if raw.ids.is_empty() || raw.x.is_empty() || raw.z.is_empty() {
        bail!("Pflichtfelder in <waypoints> fehlen");
    }

    let ids = parse_list::<u64>(&raw.ids, ',').context("Fehler beim Parsen der ID-Liste")?;
    let xs = parse_list::<f64>(&raw.x, ',').context("Fehler beim Parsen der X-Koordinaten")?;
    let zs = parse_list::<f64>(&raw.z, ',').context("Fehler beim Parsen der Z-Koordinaten")?;
    let outgoing = if raw.out.is_empty() {
        vec![Vec::new(); ids.len()]
    } else {
        parse_nested_list(&raw.out).context("Fehler beim Parsen der Outgoing-Liste")?
    };
    let ys = if raw.y.is_empty() {
        None
    } else {
        Some(parse_list::<f64>(&raw.y, ',').context("Fehler beim Parsen der Hoehen")?)
    };

    let expected_len = ids.len();
    if xs.len() != expected_len || zs.len() != expected_len || outgoing.len() != expected_len {
        bail!("Laengen der Waypoint-Listen stimmen nicht ueberein");
    }
    if ys.as_ref().is_some_and(|ys| ys.len() != expected_len) {
        bail!("Laenge der y-Liste stimmt nicht ueberein");
    }

    // Phase 1: Nodes
    let mut graph = StreetGraph::new();
    graph.extend_nodes(ids.iter().enumerate().map(|(index, &id)| {
        let elevation = ys.as_ref().map_or(0.0, |ys| ys[index]);
        StreetNode::new(id, DVec2::new(xs[index], -zs[index]), elevation)
    }));
    if graph.node_count() != expected_len {
        bail!("Doppelte Node-IDs in <waypoints>");
    }

    // Phase 2: gerichtete Kanten in Listen-Reihenfolge
    for (source_id, targets) in ids.iter().zip(&outgoing) {
        for target_id in targets {
            if target_id == source_id {
                continue;
            }
            if graph.node(*target_id).is_none() {
                log::warn!("Ziel-Node {} fehlt, Kante ab {} uebersprungen", target_id, source_id);
                continue;
            }
            graph.add_edge(*source_id, *target_id)?;
        }
    }

    Ok(graph)
}

/// Hilfsfunktion zum Parsen einer getrennten Liste
pub(crate) fn parse_list<T: std::str::FromStr>(text: &str, delimiter: char) -> Result<Vec<T>>
where
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>().with_context(|| {
                format!("Wert '{}' konnte nicht geparst werden", truncate_for_error(s))
            })
        })
        .collect()
}

/// Hilfsfunktion zum Parsen verschachtelter Listen (`out`).
/// Negative Werte (z.B. -1) markieren Endpunkte und werden ignoriert.
pub(crate) fn parse_nested_list(text: &str) -> Result<Vec<Vec<u64>>> {
    text.split(';')
        .map(|part| {
            part.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.starts_with('-'))
                .map(|s| {
                    s.parse::<u64>().with_context(|| {
                        format!("Wert '{}' konnte nicht geparst werden", truncate_for_error(s))
                    })
                })
                .collect::<Result<Vec<u64>>>()
        })
        .collect()
}

/// Kürzt einen String für Fehlermeldungen auf max. 40 Zeichen
fn truncate_for_error(s: &str) -> &str {
    match s.char_indices().nth(40) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_list() {
        let result = parse_list::<u64>("1,2,3,4", ',').expect("Liste");
        assert_eq!(result, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_nested_list() {
        let result = parse_nested_list("2,3;4,5;;1;-1").expect("Liste");
        assert_eq!(result, vec![vec![2, 3], vec![4, 5], vec![], vec![1], vec![]]);
    }

    #[test]
    fn test_parse_list_reports_bad_value() {
        let err = parse_list::<f64>("1.0,abc", ',').expect_err("Fehler erwartet");
        assert!(format!("{err:#}").contains("'abc'"));
    }

    #[test]
    fn test_truncate_for_error() {
        let long = "x".repeat(60);
        assert_eq!(truncate_for_error(&long).len(), 40);
        assert_eq!(truncate_for_error("kurz"), "kurz");
    }
}
