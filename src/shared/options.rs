//! Zentrale Konfiguration für den Trail-Planer.
//!
//! `PlannerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::search::{InitialBearing, SearchConfig, DEFAULT_TOLERANCE_FACTOR};

// ── Suche ───────────────────────────────────────────────────────────

/// Standard: an Kreuzungen möglichst geradeaus weiterlaufen.
pub const STRAIGHTEN_DEFAULT: bool = true;

// ── Start ───────────────────────────────────────────────────────────

/// Snap-Radius (Meter): Startposition rastet auf den nächsten Node innerhalb dieses Radius ein.
pub const SNAP_RADIUS: f64 = 25.0;

// ── Terrain ─────────────────────────────────────────────────────────

/// Standard-Höhenskala der Heightmap (normalized_pixel × Faktor = Meter).
pub const TERRAIN_HEIGHT_SCALE: f64 = 255.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Planer-Optionen.
/// Wird als `trail_planner.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerOptions {
    // ── Suche ───────────────────────────────────────────────────
    /// Obere Grenze des Längenfensters als Vielfaches der Ziel-Distanz
    #[serde(default = "default_tolerance_factor")]
    pub tolerance_factor: f64,
    /// Begradigungs-Heuristik an Kreuzungen
    #[serde(default = "default_straighten")]
    pub straighten: bool,
    /// Maximale Anzahl expandierter Frames (ohne Angabe: unbegrenzt)
    #[serde(default)]
    pub max_expansions: Option<usize>,
    /// Maximale Suchdauer in Millisekunden (ohne Angabe: unbegrenzt)
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    /// Seed für die Start-Peilung (ohne Angabe: zufällig)
    #[serde(default)]
    pub seed: Option<u64>,

    // ── Start ───────────────────────────────────────────────────
    /// Snap-Radius für Startpositionen in Metern
    #[serde(default = "default_snap_radius")]
    pub snap_radius: f64,

    // ── Terrain ─────────────────────────────────────────────────
    /// Höhenskala für Heightmap-Sampling
    #[serde(default = "default_height_scale")]
    pub height_scale: f64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            tolerance_factor: DEFAULT_TOLERANCE_FACTOR,
            straighten: STRAIGHTEN_DEFAULT,
            max_expansions: None,
            time_limit_ms: None,
            seed: None,
            snap_radius: SNAP_RADIUS,
            height_scale: TERRAIN_HEIGHT_SCALE,
        }
    }
}

fn default_tolerance_factor() -> f64 {
    DEFAULT_TOLERANCE_FACTOR
}

fn default_straighten() -> bool {
    STRAIGHTEN_DEFAULT
}

fn default_snap_radius() -> f64 {
    SNAP_RADIUS
}

fn default_height_scale() -> f64 {
    TERRAIN_HEIGHT_SCALE
}

impl PlannerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Optionen konnten nicht serialisiert werden")?;
        std::fs::write(path, content)
            .with_context(|| format!("Fehler beim Schreiben von {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("trail_planner"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("trail_planner.toml")
    }

    /// Baut die Suchkonfiguration für eine Ziel-Distanz.
    pub fn search_config(&self, goal_distance: f64) -> SearchConfig {
        let initial_bearing = match self.seed {
            Some(seed) => InitialBearing::Seeded(seed),
            None => InitialBearing::Random,
        };

        SearchConfig {
            goal_distance,
            tolerance_factor: self.tolerance_factor,
            straighten: self.straighten,
            initial_bearing,
            max_expansions: self.max_expansions,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let opts: PlannerOptions = toml::from_str("straighten = false\nseed = 42\n").expect("TOML");

        assert!(!opts.straighten);
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.tolerance_factor, DEFAULT_TOLERANCE_FACTOR);
        assert_eq!(opts.snap_radius, SNAP_RADIUS);
        assert_eq!(opts.max_expansions, None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let opts = PlannerOptions {
            max_expansions: Some(10_000),
            time_limit_ms: Some(1500),
            ..PlannerOptions::default()
        };

        let text = toml::to_string_pretty(&opts).expect("Serialisierung");
        let back: PlannerOptions = toml::from_str(&text).expect("Deserialisierung");
        assert_eq!(back, opts);
    }

    #[test]
    fn test_search_config_from_options() {
        let opts = PlannerOptions {
            seed: Some(3),
            time_limit_ms: Some(250),
            ..PlannerOptions::default()
        };

        let config = opts.search_config(5000.0);
        assert_eq!(config.goal_distance, 5000.0);
        assert_eq!(config.initial_bearing, InitialBearing::Seeded(3));
        assert_eq!(config.time_limit, Some(Duration::from_millis(250)));
        assert!(config.straighten);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let opts = PlannerOptions::load_from_file(std::path::Path::new(
            "/nonexistent/trail_planner.toml",
        ));
        assert_eq!(opts, PlannerOptions::default());
    }

    #[test]
    fn test_save_error_names_path() {
        let path = std::path::Path::new("/nonexistent/dir/trail_planner.toml");
        let err = PlannerOptions::default()
            .save_to_file(path)
            .expect_err("Verzeichnis existiert nicht");

        assert!(format!("{:#}", err).contains("/nonexistent/dir/trail_planner.toml"));
    }
}
