//! Repräsentiert einen Knoten (Kreuzung oder Wegpunkt) im Strassennetz.

use glam::DVec2;

/// Ein Knoten des Strassennetzes mit Position und Höhe
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    /// Eindeutige Node-ID
    pub id: u64,
    /// Planare Position in Metern (x = Ost, y = Nord)
    pub position: DVec2,
    /// Höhe über Null in Metern
    pub elevation: f64,
}

impl StreetNode {
    /// Erstellt einen neuen Node
    pub fn new(id: u64, position: DVec2, elevation: f64) -> Self {
        Self {
            id,
            position,
            elevation,
        }
    }

    /// Erstellt einen Node ohne bekannte Höhe (0 m)
    pub fn flat(id: u64, position: DVec2) -> Self {
        Self::new(id, position, 0.0)
    }
}
