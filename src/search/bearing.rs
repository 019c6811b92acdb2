//! Vergleich zweier Kompass-Peilungen.

/// Minimale absolute Winkeldifferenz zweier Peilungen in Grad, Ergebnis in [0, 180].
///
/// Die Eingaben müssen nicht normalisiert sein.
pub fn bearing_diff(b1: f64, b2: f64) -> f64 {
    let diff = (b1 - b2).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
