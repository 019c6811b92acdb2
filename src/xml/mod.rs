//! XML-Import für Wegenetze.
//!
//! Das Format nutzt "Structure of Arrays" (parallele Listen in XML-Tags),
//! wie es AutoDrive-Konfigurationen tun.

pub mod parser;

pub use parser::{load_street_network, parse_street_network};
