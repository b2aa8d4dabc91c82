//! Canonical equivalence-class assignment for bonded interactions.
//!
//! Interaction tuples are mapped into symmetry-class space, canonicalized
//! against their reversal, and assigned dense class ids. Two interactions get
//! the same id exactly when their canonical symmetry-class keys are equal.

use crate::core::models::molecule::Molecule;
use crate::core::topology;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypingError {
    #[error("Symmetry vector has {actual} entries but the molecule has {expected} atoms")]
    SymmetryLengthMismatch { expected: usize, actual: usize },
    #[error("Interaction tuple references atom {index}, out of range for {atom_count} atoms")]
    AtomIndexOutOfRange { index: usize, atom_count: usize },
}

/// Returns the canonical representative of a tuple under reversal.
///
/// Whichever of the tuple and its full reversal compares smaller under
/// lexicographic ordering is returned, so `canonicalize(t)` always equals
/// `canonicalize(reverse(t))` and palindromic tuples map to themselves.
///
/// Reversal symmetry is unconditionally correct for bonds and angles. For
/// torsions it merges a quadruple with its reverse, which matches the common
/// periodic-torsion conventions but is not universally valid; callers must
/// confirm it against their parameterization before relying on it for
/// torsion typing.
pub fn canonicalize<T: Ord + Copy, const N: usize>(tuple: [T; N]) -> [T; N] {
    let mut reversed = tuple;
    reversed.reverse();
    if reversed < tuple { reversed } else { tuple }
}

/// The symmetry-equivalence partition of one interaction type of a molecule.
///
/// Holds the enumerated atom-index tuples (in enumeration order), the
/// parallel dense class ids, and the number of distinct classes. Class ids
/// are assigned in first-seen order over the enumeration, which makes the
/// labeling deterministic across runs and platforms. Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAssignment<const N: usize> {
    index_tuples: Vec<[usize; N]>,
    class_ids: Vec<usize>,
    n_unique: usize,
}

impl<const N: usize> ClassAssignment<N> {
    /// Builds the assignment from enumerated tuples and a symmetry vector.
    ///
    /// Every atom index in every tuple must be a valid index into the
    /// symmetry vector. An empty tuple list yields an empty assignment with
    /// zero classes.
    pub fn build(
        index_tuples: Vec<[usize; N]>,
        symmetry: &[u32],
    ) -> Result<Self, TypingError> {
        let mut key_ids: HashMap<[u32; N], usize> = HashMap::new();
        let mut class_ids = Vec::with_capacity(index_tuples.len());

        for tuple in &index_tuples {
            let mut key = [0u32; N];
            for (slot, &atom) in key.iter_mut().zip(tuple.iter()) {
                *slot = *symmetry
                    .get(atom)
                    .ok_or(TypingError::AtomIndexOutOfRange {
                        index: atom,
                        atom_count: symmetry.len(),
                    })?;
            }
            let key = canonicalize(key);
            let next_id = key_ids.len();
            class_ids.push(*key_ids.entry(key).or_insert(next_id));
        }

        Ok(Self {
            n_unique: key_ids.len(),
            index_tuples,
            class_ids,
        })
    }

    /// The enumerated atom-index tuples, in enumeration order.
    pub fn index_tuples(&self) -> &[[usize; N]] {
        &self.index_tuples
    }

    /// Dense class ids, parallel to [`Self::index_tuples`], surjective onto
    /// `[0, n_unique)`.
    pub fn class_ids(&self) -> &[usize] {
        &self.class_ids
    }

    /// The number of distinct equivalence classes.
    pub fn n_unique(&self) -> usize {
        self.n_unique
    }

    /// The number of interaction instances.
    pub fn len(&self) -> usize {
        self.index_tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_tuples.is_empty()
    }
}

fn check_symmetry_length(molecule: &Molecule, symmetry: &[u32]) -> Result<(), TypingError> {
    if symmetry.len() != molecule.atom_count() {
        return Err(TypingError::SymmetryLengthMismatch {
            expected: molecule.atom_count(),
            actual: symmetry.len(),
        });
    }
    Ok(())
}

impl ClassAssignment<2> {
    /// Enumerates the molecule's bonds and assigns bond classes.
    pub fn for_bonds(molecule: &Molecule, symmetry: &[u32]) -> Result<Self, TypingError> {
        check_symmetry_length(molecule, symmetry)?;
        Self::build(topology::bonds(molecule), symmetry)
    }
}

impl ClassAssignment<3> {
    /// Enumerates the molecule's valence angles and assigns angle classes.
    pub fn for_angles(molecule: &Molecule, symmetry: &[u32]) -> Result<Self, TypingError> {
        check_symmetry_length(molecule, symmetry)?;
        Self::build(topology::angles(molecule), symmetry)
    }
}

impl ClassAssignment<4> {
    /// Enumerates the molecule's proper torsions and assigns torsion classes.
    pub fn for_propers(molecule: &Molecule, symmetry: &[u32]) -> Result<Self, TypingError> {
        check_symmetry_length(molecule, symmetry)?;
        Self::build(topology::propers(molecule), symmetry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::symmetry::{SymmetryOracle, TopologicalSymmetry};

    fn water() -> Molecule {
        let mut mol = Molecule::new("water");
        let o = mol.add_atom(Element::O);
        let h1 = mol.add_atom(Element::H);
        let h2 = mol.add_atom(Element::H);
        mol.add_bond(o, h1).unwrap();
        mol.add_bond(o, h2).unwrap();
        mol
    }

    fn ethanol() -> Molecule {
        let mut mol = Molecule::new("ethanol");
        let c0 = mol.add_atom(Element::C);
        let c1 = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        mol.add_bond(c0, c1).unwrap();
        mol.add_bond(c1, o).unwrap();
        for _ in 0..3 {
            let h = mol.add_atom(Element::H);
            mol.add_bond(c0, h).unwrap();
        }
        for _ in 0..2 {
            let h = mol.add_atom(Element::H);
            mol.add_bond(c1, h).unwrap();
        }
        let ho = mol.add_atom(Element::H);
        mol.add_bond(o, ho).unwrap();
        mol
    }

    #[test]
    fn canonicalize_agrees_with_reversal() {
        let tuple = [3u32, 1, 4, 1];
        let mut reversed = tuple;
        reversed.reverse();
        assert_eq!(canonicalize(tuple), canonicalize(reversed));
    }

    #[test]
    fn canonicalize_preserves_length_and_palindromes() {
        assert_eq!(canonicalize([2u32, 7, 2]), [2, 7, 2]);
        assert_eq!(canonicalize([5u32]), [5]);
    }

    #[test]
    fn canonicalize_picks_lexicographically_smaller_orientation() {
        assert_eq!(canonicalize([2u32, 0, 1]), [1, 0, 2]);
        assert_eq!(canonicalize([0u32, 1, 2]), [0, 1, 2]);
    }

    #[test]
    fn equal_symmetry_classes_swap_to_the_same_key() {
        // Atoms with equal class are interchangeable under reversal.
        assert_eq!(canonicalize([7u32, 3, 9]), canonicalize([9u32, 3, 7]));
    }

    #[test]
    fn linear_a_b_a_molecule_has_one_bond_class() {
        let mol = water();
        let sym = TopologicalSymmetry::new().classes(&mol).unwrap();
        let assignment = ClassAssignment::for_bonds(&mol, &sym).unwrap();
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.n_unique(), 1);
        assert_eq!(assignment.class_ids(), &[0, 0]);
    }

    #[test]
    fn class_ids_are_surjective_and_bounded() {
        let mol = ethanol();
        let sym = TopologicalSymmetry::new().classes(&mol).unwrap();
        let assignment = ClassAssignment::for_angles(&mol, &sym).unwrap();
        assert!(assignment.n_unique() <= assignment.len());
        let mut seen = vec![false; assignment.n_unique()];
        for &id in assignment.class_ids() {
            assert!(id < assignment.n_unique());
            seen[id] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn rebuilding_yields_identical_assignment() {
        let mol = ethanol();
        let sym = TopologicalSymmetry::new().classes(&mol).unwrap();
        let first = ClassAssignment::for_propers(&mol, &sym).unwrap();
        let second = ClassAssignment::for_propers(&mol, &sym).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_interaction_list_yields_zero_classes() {
        let mol = water();
        let sym = TopologicalSymmetry::new().classes(&mol).unwrap();
        let assignment = ClassAssignment::for_propers(&mol, &sym).unwrap();
        assert!(assignment.is_empty());
        assert_eq!(assignment.n_unique(), 0);
    }

    #[test]
    fn symmetry_length_mismatch_is_a_loud_error() {
        let mol = water();
        let result = ClassAssignment::for_bonds(&mol, &[0, 1]);
        assert_eq!(
            result,
            Err(TypingError::SymmetryLengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn out_of_range_tuple_index_is_rejected() {
        let result = ClassAssignment::build(vec![[0usize, 5]], &[0, 1, 2]);
        assert_eq!(
            result,
            Err(TypingError::AtomIndexOutOfRange {
                index: 5,
                atom_count: 3
            })
        );
    }

    #[test]
    fn first_seen_order_assigns_id_zero_to_first_tuple() {
        let sym = [0u32, 1, 2, 3];
        let assignment =
            ClassAssignment::build(vec![[2usize, 3], [0, 1], [3, 2]], &sym).unwrap();
        assert_eq!(assignment.class_ids(), &[0, 1, 0]);
        assert_eq!(assignment.n_unique(), 2);
    }
}
