//! Zustand eines Suchzweigs: die bisher festgelegten Kanten eines Teil-Trails.
//!
//! Die Kanten liegen als persistente Kette (`Rc`-Elternzeiger) vor. Ein Klon teilt die
//! gemeinsame Vorgeschichte, `commit` hängt nur an den eigenen Kopf an. Geschwister-Zweige
//! sehen die Kanten des jeweils anderen daher nie.

use std::rc::Rc;

/// Eine festgelegte gerichtete Kante mit ihrer Besuchsreihenfolge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedEdge {
    /// Start-Node-ID
    pub from: u64,
    /// End-Node-ID
    pub to: u64,
    /// Besuchsreihenfolge (1 = erste Kante ab Start)
    pub order: u32,
}

#[derive(Debug)]
struct CommittedLink {
    edge: CommittedEdge,
    parent: Option<Rc<CommittedLink>>,
}

/// Isolierter Teil-Trail eines Suchzweigs
#[derive(Debug, Clone, Default)]
pub struct BranchState {
    head: Option<Rc<CommittedLink>>,
    len: usize,
}

impl BranchState {
    /// Erstellt einen leeren Zweig
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl festgelegter Kanten
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gibt `true` zurück, wenn noch keine Kante festgelegt ist
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Legt die Kante `from → to` mit der Besuchsreihenfolge `order` fest.
    ///
    /// Wirkt nur auf diesen Zweig, Klone behalten ihren Stand.
    pub fn commit(&mut self, from: u64, to: u64, order: u32) {
        let link = CommittedLink {
            edge: CommittedEdge { from, to, order },
            parent: self.head.take(),
        };
        self.head = Some(Rc::new(link));
        self.len += 1;
    }

    /// Enthält der Zweig die gerichtete Kante `from → to`?
    pub fn has_edge(&self, from: u64, to: u64) -> bool {
        self.iter().any(|e| e.from == from && e.to == to)
    }

    /// Enthält der Zweig die Kante zwischen `a` und `b` in irgendeiner Richtung?
    pub fn has_undirected(&self, a: u64, b: u64) -> bool {
        self.iter()
            .any(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
    }

    /// Iterator über alle Kanten, neueste zuerst
    pub fn iter(&self) -> BranchIter<'_> {
        BranchIter {
            next: self.head.as_deref(),
        }
    }

    /// Alle Kanten in Besuchsreihenfolge (älteste zuerst)
    pub fn edges_in_order(&self) -> Vec<CommittedEdge> {
        let mut edges: Vec<CommittedEdge> = self.iter().copied().collect();
        edges.reverse();
        edges
    }
}

impl Drop for BranchState {
    fn drop(&mut self) {
        // Iterativ abbauen, lange Ketten würden sonst rekursiv den Stack sprengen
        let mut next = self.head.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut link) => next = link.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator über die Kanten eines Zweigs (neueste zuerst)
pub struct BranchIter<'a> {
    next: Option<&'a CommittedLink>,
}

impl<'a> Iterator for BranchIter<'a> {
    type Item = &'a CommittedEdge;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|link| {
            self.next = link.parent.as_deref();
            &link.edge
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_and_lookup() {
        let mut branch = BranchState::new();
        assert!(branch.is_empty());

        branch.commit(1, 2, 1);
        branch.commit(2, 3, 2);

        assert_eq!(branch.len(), 2);
        assert!(branch.has_edge(1, 2));
        assert!(!branch.has_edge(2, 1));
        assert!(branch.has_undirected(2, 1));
        assert!(branch.has_undirected(3, 2));
        assert!(!branch.has_undirected(1, 3));
    }

    #[test]
    fn test_edges_in_visit_order() {
        let mut branch = BranchState::new();
        branch.commit(1, 2, 1);
        branch.commit(2, 3, 2);
        branch.commit(3, 1, 3);

        let orders: Vec<u32> = branch.edges_in_order().iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(
            branch.edges_in_order()[0],
            CommittedEdge {
                from: 1,
                to: 2,
                order: 1
            }
        );
    }

    #[test]
    fn test_sibling_branches_are_isolated() {
        let mut parent = BranchState::new();
        parent.commit(1, 2, 1);

        let mut left = parent.clone();
        let mut right = parent.clone();
        left.commit(2, 3, 2);
        right.commit(2, 4, 2);

        assert!(left.has_edge(2, 3));
        assert!(!left.has_edge(2, 4));
        assert!(right.has_edge(2, 4));
        assert!(!right.has_edge(2, 3));
        assert_eq!(parent.len(), 1);
        assert!(!parent.has_edge(2, 3));
        assert!(!parent.has_edge(2, 4));

        drop(parent);
        assert!(left.has_edge(1, 2));
        assert!(right.has_edge(1, 2));
    }

    #[test]
    fn test_long_chain_drops_without_overflow() {
        let mut branch = BranchState::new();
        for i in 0..200_000u64 {
            branch.commit(i, i + 1, i as u32 + 1);
        }
        assert_eq!(branch.len(), 200_000);
        drop(branch);
    }
}
