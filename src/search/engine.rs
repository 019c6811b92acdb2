//! Tiefensuche mit Backtracking nach einem Trail im Längenfenster.
//!
//! Ablauf: ein Start-Frame mit leerem Zweig wird auf einen expliziten Stack gelegt.
//! Jeder Pop legt die Kante `previous → current` im eigenen Zweig fest, prüft das
//! Akzeptanzfenster und legt für jeden zulässigen Nachbarn einen Kind-Frame mit einem
//! eigenen Zweig-Klon ab. Der erste Trail im Fenster wird zurückgegeben.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    bearing_diff, is_legal_candidate, BranchState, CommittedEdge, ToleranceBand,
    DEFAULT_TOLERANCE_FACTOR,
};
use crate::core::{normalize_bearing, EdgeAttrs, GraphProvider};

/// Herkunft der "vorherigen Peilung" für den allerersten Schritt
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InitialBearing {
    /// Feste Peilung in Grad
    Fixed(f64),
    /// Reproduzierbar zufällige Peilung aus einem Seed
    Seeded(u64),
    /// Zufällige Peilung aus System-Entropie
    #[default]
    Random,
}

impl InitialBearing {
    /// Bestimmt die konkrete Peilung in [0, 360)
    pub fn resolve(&self) -> Result<f64> {
        match *self {
            Self::Fixed(bearing) => {
                if !bearing.is_finite() {
                    bail!("Start-Peilung muss endlich sein, erhalten: {}", bearing);
                }
                Ok(normalize_bearing(bearing))
            }
            Self::Seeded(seed) => Ok(ChaCha8Rng::seed_from_u64(seed).gen_range(0.0..360.0)),
            Self::Random => Ok(rand::thread_rng().gen_range(0.0..360.0)),
        }
    }
}

/// Parameter einer Routensuche
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Ziel-Distanz in Metern
    pub goal_distance: f64,
    /// Obere Grenze als Vielfaches der Ziel-Distanz
    pub tolerance_factor: f64,
    /// An Kreuzungen möglichst geradeaus weiterlaufen. Der geradeste Nachbar wird zuerst
    /// untersucht, bei gleicher Abweichung entscheidet die native Nachbar-Reihenfolge.
    pub straighten: bool,
    /// Vorherige Peilung für den ersten Schritt
    pub initial_bearing: InitialBearing,
    /// Maximale Anzahl expandierter Frames
    pub max_expansions: Option<usize>,
    /// Maximale Laufzeit
    pub time_limit: Option<Duration>,
}

impl SearchConfig {
    /// Standard-Konfiguration: 110 %, Begradigung an, zufällige Start-Peilung, ohne Budget
    pub fn new(goal_distance: f64) -> Self {
        Self {
            goal_distance,
            tolerance_factor: DEFAULT_TOLERANCE_FACTOR,
            straighten: true,
            initial_bearing: InitialBearing::Random,
            max_expansions: None,
            time_limit: None,
        }
    }

    /// Setzt die Begradigungs-Heuristik
    pub fn with_straighten(mut self, straighten: bool) -> Self {
        self.straighten = straighten;
        self
    }

    /// Setzt die Start-Peilung
    pub fn with_initial_bearing(mut self, initial_bearing: InitialBearing) -> Self {
        self.initial_bearing = initial_bearing;
        self
    }

    /// Setzt den Toleranz-Faktor
    pub fn with_tolerance_factor(mut self, tolerance_factor: f64) -> Self {
        self.tolerance_factor = tolerance_factor;
        self
    }

    /// Begrenzt die Anzahl expandierter Frames
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Begrenzt die Laufzeit
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Zähler einer Suche
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vom Stack genommene Frames
    pub expanded: usize,
    /// Auf den Stack gelegte Frames (inkl. Start-Frame)
    pub pushed: usize,
    /// Maximale Stack-Tiefe
    pub max_stack: usize,
}

/// Ein gefundener Trail
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedTrail {
    /// Start-Node
    pub start: u64,
    /// Kanten in Besuchsreihenfolge
    pub edges: Vec<CommittedEdge>,
    /// Wert des Besuchszählers bei Akzeptanz (= Anzahl Kanten)
    pub steps: u32,
    /// Gesamtlänge in Metern
    pub length: f64,
    /// Verwendete Start-Peilung
    pub initial_bearing: f64,
    /// Zähler der Suche
    pub stats: SearchStats,
}

impl AcceptedTrail {
    /// Node-Folge des Trails: Start, danach der End-Node jeder Kante
    pub fn node_sequence(&self) -> Vec<u64> {
        std::iter::once(self.start)
            .chain(self.edges.iter().map(|edge| edge.to))
            .collect()
    }

    /// Enthält der Trail die gerichtete Kante `from → to`?
    pub fn contains_edge(&self, from: u64, to: u64) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }
}

/// Ergebnis einer Routensuche
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Erster Trail im Längenfenster
    Found(AcceptedTrail),
    /// Suchraum erschöpft, kein Trail im Fenster
    NotFound(SearchStats),
    /// Budget (Expansionen oder Zeit) vor dem Ende aufgebraucht
    BudgetExhausted(SearchStats),
}

impl SearchOutcome {
    /// Gibt den Trail zurück, falls einer gefunden wurde
    pub fn into_trail(self) -> Option<AcceptedTrail> {
        match self {
            Self::Found(trail) => Some(trail),
            _ => None,
        }
    }

    /// Wurde ein Trail gefunden?
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Zähler der Suche
    pub fn stats(&self) -> SearchStats {
        match self {
            Self::Found(trail) => trail.stats,
            Self::NotFound(stats) | Self::BudgetExhausted(stats) => *stats,
        }
    }
}

/// Sucht ab `start` einen Trail mit Länge in `[goal_dist, goal_dist × 1.1]`.
///
/// Kurzform von [`search_route`] mit Standard-Konfiguration und zufälliger Start-Peilung.
pub fn find_route<G: GraphProvider + ?Sized>(
    start: u64,
    goal_dist: f64,
    graph: &G,
    straighten: bool,
) -> Result<SearchOutcome> {
    let config = SearchConfig::new(goal_dist).with_straighten(straighten);
    search_route(graph, start, &config)
}

/// Sucht ab `start` den ersten Trail im Längenfenster der Konfiguration.
///
/// Fehler nur bei ungültigen Eingaben (Ziel-Distanz, Toleranz, Start-Node, Peilung).
/// Kein Treffer ist ein reguläres Ergebnis ([`SearchOutcome::NotFound`]).
pub fn search_route<G: GraphProvider + ?Sized>(
    graph: &G,
    start: u64,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    let band = ToleranceBand::new(config.goal_distance, config.tolerance_factor)?;
    if !graph.contains_node(start) {
        bail!("Start-Node {} existiert nicht im Graphen", start);
    }
    let initial_bearing = config.initial_bearing.resolve()?;

    log::info!(
        "Routensuche ab Node {}: Fenster [{:.1}, {:.1}] m, Begradigung {}, Start-Peilung {:.1}°",
        start,
        band.min,
        band.max,
        if config.straighten { "an" } else { "aus" },
        initial_bearing
    );

    let search = RouteSearch {
        graph,
        start,
        band,
        straighten: config.straighten,
        initial_bearing,
        max_expansions: config.max_expansions,
        time_limit: config.time_limit,
    };
    let outcome = search.run();

    let stats = outcome.stats();
    match &outcome {
        SearchOutcome::Found(trail) => log::info!(
            "Trail gefunden: {} Kanten, {:.1} m ({} Frames expandiert)",
            trail.steps,
            trail.length,
            stats.expanded
        ),
        SearchOutcome::NotFound(_) => log::info!(
            "Kein Trail im Fenster gefunden ({} Frames expandiert)",
            stats.expanded
        ),
        SearchOutcome::BudgetExhausted(_) => {
            log::warn!("Suchbudget aufgebraucht nach {} Frames", stats.expanded)
        }
    }
    log::debug!(
        "Suchstatistik: {} gepusht, max. Stack-Tiefe {}",
        stats.pushed,
        stats.max_stack
    );

    Ok(outcome)
}

/// Ein Stack-Eintrag: Zweig plus Position im Netz
struct SearchFrame {
    branch: BranchState,
    /// `None` nur für den Start-Frame
    previous: Option<u64>,
    current: u64,
    length: f64,
    clock: u32,
    /// Peilung der Kante `previous → current` bzw. Start-Peilung
    incoming_bearing: f64,
}

struct RouteSearch<'g, G: GraphProvider + ?Sized> {
    graph: &'g G,
    start: u64,
    band: ToleranceBand,
    straighten: bool,
    initial_bearing: f64,
    max_expansions: Option<usize>,
    time_limit: Option<Duration>,
}

impl<G: GraphProvider + ?Sized> RouteSearch<'_, G> {
    fn run(&self) -> SearchOutcome {
        let started = Instant::now();
        let mut stats = SearchStats::default();
        let mut stack = vec![SearchFrame {
            branch: BranchState::new(),
            previous: None,
            current: self.start,
            length: 0.0,
            clock: 0,
            incoming_bearing: self.initial_bearing,
        }];
        stats.pushed = 1;
        stats.max_stack = 1;

        while let Some(frame) = stack.pop() {
            if self.budget_exhausted(&stats, started) {
                return SearchOutcome::BudgetExhausted(stats);
            }
            stats.expanded += 1;

            let SearchFrame {
                mut branch,
                previous,
                current,
                length,
                clock,
                incoming_bearing,
            } = frame;

            if let Some(previous) = previous {
                if branch.has_undirected(previous, current) {
                    continue;
                }
                branch.commit(previous, current, clock);
            }

            log::trace!(
                "Expandiere Node {} (Länge {:.1}, Schritt {}, Stack {})",
                current,
                length,
                clock,
                stack.len()
            );

            if self.band.contains(length) {
                return SearchOutcome::Found(AcceptedTrail {
                    start: self.start,
                    edges: branch.edges_in_order(),
                    steps: clock,
                    length,
                    initial_bearing: self.initial_bearing,
                    stats,
                });
            }

            // Umgekehrt pushen, damit der erste Kandidat als nächstes vom Stack kommt
            let ordered = self.ordered_neighbors(current, incoming_bearing);
            for (next, attrs) in ordered.into_iter().rev() {
                if !is_legal_candidate(&branch, length, current, next, self.graph, &self.band) {
                    continue;
                }
                stack.push(SearchFrame {
                    branch: branch.clone(),
                    previous: Some(current),
                    current: next,
                    length: length + attrs.length,
                    clock: clock + 1,
                    incoming_bearing: attrs.bearing,
                });
                stats.pushed += 1;
            }
            stats.max_stack = stats.max_stack.max(stack.len());
        }

        SearchOutcome::NotFound(stats)
    }

    /// Nachbarn in Explorationsreihenfolge: nativ, oder stabil nach Abweichung zur
    /// eingehenden Peilung sortiert
    fn ordered_neighbors(&self, current: u64, incoming_bearing: f64) -> Vec<(u64, EdgeAttrs)> {
        let mut candidates: Vec<(u64, EdgeAttrs)> = self
            .graph
            .neighbors(current)
            .iter()
            .filter_map(|&next| match self.graph.edge_attrs(current, next) {
                Some(attrs) => Some((next, attrs)),
                None => {
                    log::warn!("Nachbar {} von {} ohne Kanten-Attribute", next, current);
                    None
                }
            })
            .collect();

        if self.straighten {
            candidates.sort_by(|(_, a), (_, b)| {
                bearing_diff(incoming_bearing, a.bearing)
                    .total_cmp(&bearing_diff(incoming_bearing, b.bearing))
            });
        }

        candidates
    }

    fn budget_exhausted(&self, stats: &SearchStats, started: Instant) -> bool {
        if self
            .max_expansions
            .is_some_and(|limit| stats.expanded >= limit)
        {
            return true;
        }
        self.time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
    }
}
