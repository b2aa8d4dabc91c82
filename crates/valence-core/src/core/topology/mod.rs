//! Enumeration of bonded interactions from the molecular graph.
//!
//! All three enumerators are deterministic by construction: tuples are
//! generated in atom- and bond-index order without any hash-based
//! deduplication, so the enumeration order is identical across runs and
//! platforms.

use crate::core::models::molecule::Molecule;

/// Returns all bonded pairs as atom-index tuples, in bond-insertion order.
pub fn bonds(molecule: &Molecule) -> Vec<[usize; 2]> {
    molecule
        .bonds()
        .iter()
        .map(|bond| [bond.atom1, bond.atom2])
        .collect()
}

/// Returns all valence angles as `(end, center, end)` atom-index tuples.
///
/// For every atom with two or more neighbors, one angle is emitted per
/// unordered pair of distinct neighbors, with the two end atoms ordered
/// ascending. Each angle appears exactly once.
pub fn angles(molecule: &Molecule) -> Vec<[usize; 3]> {
    let mut angles = Vec::new();
    for center in 0..molecule.atom_count() {
        let neighbors = molecule.neighbors(center);
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                let (a, c) = if neighbors[i] < neighbors[j] {
                    (neighbors[i], neighbors[j])
                } else {
                    (neighbors[j], neighbors[i])
                };
                angles.push([a, center, c]);
            }
        }
    }
    angles
}

/// Returns all proper torsions `i-j-k-l` over four consecutively bonded atoms.
///
/// For every bond `(j, k)`, every neighbor `i` of `j` (other than `k`) is
/// combined with every neighbor `l` of `k` (other than `j` and `i`). Each
/// quadruple is oriented as the lexicographically smaller of itself and its
/// reversal. Since every central bond is stored once, each torsion appears
/// exactly once.
pub fn propers(molecule: &Molecule) -> Vec<[usize; 4]> {
    let mut propers = Vec::new();
    for bond in molecule.bonds() {
        let (j, k) = (bond.atom1, bond.atom2);
        for &i in molecule.neighbors(j) {
            if i == k {
                continue;
            }
            for &l in molecule.neighbors(k) {
                if l == j || l == i {
                    continue;
                }
                let tuple = [i, j, k, l];
                let mut reversed = tuple;
                reversed.reverse();
                propers.push(if reversed < tuple { reversed } else { tuple });
            }
        }
    }
    propers
}
