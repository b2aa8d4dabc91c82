//! Perception of topological symmetry classes.
//!
//! Two atoms share a symmetry class iff they are interchangeable in the
//! molecular graph. Class values carry no meaning beyond equality.

use crate::core::models::molecule::Molecule;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymmetryError {
    #[error("Symmetry oracle returned {actual} classes for a molecule with {expected} atoms")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Source of per-atom symmetry classes for a molecule.
///
/// Implementations must return one class value per atom, in atom-index order,
/// with equal values exactly for symmetry-equivalent atoms. External
/// perception backends plug in through this trait.
pub trait SymmetryOracle {
    fn classes(&self, molecule: &Molecule) -> Result<Vec<u32>, SymmetryError>;
}

/// Symmetry perception by iterative partition refinement of the bond graph.
///
/// Atoms start in classes given by their (element, degree) invariant. Each
/// round re-labels every atom by its own class together with the sorted
/// multiset of its neighbors' classes; the process stops when a round no
/// longer splits any class. Labels are assigned in first-appearance order
/// over atom indices, so the result is identical across runs and platforms.
///
/// This distinguishes atoms by their topological environment only; it does
/// not account for stereochemistry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopologicalSymmetry;

impl TopologicalSymmetry {
    pub fn new() -> Self {
        Self
    }
}

impl SymmetryOracle for TopologicalSymmetry {
    fn classes(&self, molecule: &Molecule) -> Result<Vec<u32>, SymmetryError> {
        let n = molecule.atom_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let initial: Vec<(u8, usize)> = (0..n)
            .map(|i| {
                let element = molecule
                    .element(i)
                    .map(|e| e.atomic_number())
                    .unwrap_or_default();
                (element, molecule.neighbors(i).len())
            })
            .collect();
        let (mut classes, mut n_classes) = relabel(&initial);

        loop {
            let signatures: Vec<(u32, Vec<u32>)> = (0..n)
                .map(|i| {
                    let mut neighbor_classes: Vec<u32> = molecule
                        .neighbors(i)
                        .iter()
                        .map(|&j| classes[j])
                        .collect();
                    neighbor_classes.sort_unstable();
                    (classes[i], neighbor_classes)
                })
                .collect();
            let (next, next_count) = relabel(&signatures);

            // Refinement only ever splits classes; a stable count means a
            // stable partition.
            if next_count == n_classes {
                return Ok(classes);
            }
            classes = next;
            n_classes = next_count;
        }
    }
}

/// Maps arbitrary per-atom invariants to dense class labels in
/// first-appearance order.
fn relabel<K: Eq + std::hash::Hash>(keys: &[K]) -> (Vec<u32>, usize) {
    let mut ids: HashMap<&K, u32> = HashMap::new();
    let mut classes = Vec::with_capacity(keys.len());
    for key in keys {
        let next = ids.len() as u32;
        let id = *ids.entry(key).or_insert(next);
        classes.push(id);
    }
    (classes, ids.len())
}

/// An explicit memo of symmetry-class vectors, keyed by molecule name.
///
/// Entries are never invalidated; recomputation through any deterministic
/// oracle is idempotent, so a stale-entry hazard does not exist as long as a
/// name refers to one molecule.
#[derive(Debug, Default, Clone)]
pub struct SymmetryCache {
    data: HashMap<String, Vec<u32>>,
}

impl SymmetryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u32]> {
        self.data.get(name).map(Vec::as_slice)
    }

    pub fn insert(&mut self, name: String, classes: Vec<u32>) {
        self.data.insert(name, classes);
    }

    /// Returns the cached class vector for the molecule, invoking the oracle
    /// on a miss.
    pub fn get_or_compute(
        &mut self,
        molecule: &Molecule,
        oracle: &impl SymmetryOracle,
    ) -> Result<&[u32], SymmetryError> {
        if !self.data.contains_key(molecule.name()) {
            let classes = oracle.classes(molecule)?;
            self.data.insert(molecule.name().to_string(), classes);
        }
        Ok(&self.data[molecule.name()])
    }
}
