//! Gerichtete Kante zwischen zwei Knoten mit Länge und Kompass-Peilung.

use glam::DVec2;

/// Attribute einer gerichteten Kante, wie sie die Suche konsumiert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAttrs {
    /// Länge in Metern (nicht negativ)
    pub length: f64,
    /// Kompass-Peilung in Grad, [0, 360), 0 = Nord, im Uhrzeigersinn
    pub bearing: f64,
}

/// Eine gerichtete Kante des Strassennetzes
#[derive(Debug, Clone, PartialEq)]
pub struct StreetEdge {
    /// Start-Node-ID
    pub start_id: u64,
    /// End-Node-ID
    pub end_id: u64,
    /// Länge und Peilung
    pub attrs: EdgeAttrs,
}

impl StreetEdge {
    /// Erstellt eine Kante mit expliziten Attributen
    pub fn new(start_id: u64, end_id: u64, length: f64, bearing: f64) -> Self {
        Self {
            start_id,
            end_id,
            attrs: EdgeAttrs {
                length,
                bearing: normalize_bearing(bearing),
            },
        }
    }

    /// Erstellt eine Kante, deren Länge und Peilung aus den Node-Positionen folgen
    pub fn from_positions(start_id: u64, end_id: u64, start_pos: DVec2, end_pos: DVec2) -> Self {
        let (length, bearing) = Self::calculate_geometry(start_pos, end_pos);
        Self {
            start_id,
            end_id,
            attrs: EdgeAttrs { length, bearing },
        }
    }

    fn calculate_geometry(start_pos: DVec2, end_pos: DVec2) -> (f64, f64) {
        let delta = end_pos - start_pos;
        // atan2(Ost, Nord): 0° = Nord, 90° = Ost
        let bearing = normalize_bearing(delta.x.atan2(delta.y).to_degrees());
        (delta.length(), bearing)
    }
}

/// Normalisiert eine Peilung in den Bereich [0, 360)
pub fn normalize_bearing(bearing: f64) -> f64 {
    let normalized = bearing.rem_euclid(360.0);
    // rem_euclid kann bei sehr kleinen negativen Werten genau 360.0 liefern
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}
