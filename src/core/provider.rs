//! Lese-Schnittstelle auf den Graphen, die die Routensuche konsumiert.

use super::EdgeAttrs;

/// Abstraktion über ein Strassennetz mit Knoten-Höhen und gerichteten Kanten.
///
/// Die Suche arbeitet ausschliesslich über dieses Trait und verändert den Graphen nie.
/// `neighbors` muss eine stabile Reihenfolge liefern, da sie die Tie-Break-Reihenfolge
/// der Begradigungs-Heuristik bestimmt.
pub trait GraphProvider {
    /// Prüft ob der Node existiert
    fn contains_node(&self, id: u64) -> bool;

    /// Ausgehende Nachbarn eines Nodes in nativer Reihenfolge (leer für unbekannte Nodes)
    fn neighbors(&self, id: u64) -> &[u64];

    /// Attribute der gerichteten Kante `from → to` (erste passende Kante)
    fn edge_attrs(&self, from: u64, to: u64) -> Option<EdgeAttrs>;

    /// Höhe eines Nodes in Metern
    fn elevation(&self, id: u64) -> Option<f64>;
}
