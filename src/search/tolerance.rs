//! Akzeptanzfenster für die Trail-Länge.

use anyhow::{bail, Result};

/// Standard-Faktor für die obere Grenze (110 % der Ziel-Distanz).
pub const DEFAULT_TOLERANCE_FACTOR: f64 = 1.1;

/// Längenfenster `[goal, goal × factor]`, in dem ein Trail akzeptiert wird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceBand {
    /// Untere Grenze (Ziel-Distanz)
    pub min: f64,
    /// Obere Grenze, die auch kein Kandidat überschreiten darf
    pub max: f64,
}

impl ToleranceBand {
    /// Erstellt das Fenster, prüft Ziel-Distanz und Faktor
    pub fn new(goal_distance: f64, factor: f64) -> Result<Self> {
        if !goal_distance.is_finite() || goal_distance <= 0.0 {
            bail!(
                "Ziel-Distanz muss endlich und positiv sein, erhalten: {}",
                goal_distance
            );
        }
        if !factor.is_finite() || factor < 1.0 {
            bail!("Toleranz-Faktor muss >= 1.0 sein, erhalten: {}", factor);
        }

        Ok(Self {
            min: goal_distance,
            max: goal_distance * factor,
        })
    }

    /// Liegt die Länge im Akzeptanzfenster?
    pub fn contains(&self, length: f64) -> bool {
        self.min <= length && length <= self.max
    }

    /// Überschreitet die Länge die obere Grenze nicht?
    pub fn admits(&self, length: f64) -> bool {
        length <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_bounds() {
        let band = ToleranceBand::new(10.0, DEFAULT_TOLERANCE_FACTOR).expect("gültig");

        assert!(!band.contains(9.99));
        assert!(band.contains(10.0));
        assert!(band.contains(11.0));
        assert!(!band.contains(11.01));
        assert!(band.admits(3.0));
        assert!(!band.admits(11.5));
    }

    #[test]
    fn test_invalid_goal_rejected() {
        assert!(ToleranceBand::new(0.0, 1.1).is_err());
        assert!(ToleranceBand::new(-5.0, 1.1).is_err());
        assert!(ToleranceBand::new(f64::NAN, 1.1).is_err());
        assert!(ToleranceBand::new(f64::INFINITY, 1.1).is_err());
    }

    #[test]
    fn test_invalid_factor_rejected() {
        assert!(ToleranceBand::new(10.0, 0.9).is_err());
        assert!(ToleranceBand::new(10.0, f64::NAN).is_err());
        assert!(ToleranceBand::new(10.0, 1.0).is_ok());
    }
}
