use super::element::Element;

/// Represents a covalent bond between two atoms, identified by atom index.
///
/// Atom indices are 0-based and stable for the lifetime of the owning
/// [`Molecule`]; every interaction tuple produced by topology enumeration is
/// expressed in this index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    /// Index of the first bonded atom.
    pub atom1: usize,
    /// Index of the second bonded atom.
    pub atom2: usize,
}

impl Bond {
    /// Creates a new bond between two atom indices.
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self { atom1, atom2 }
    }
}

/// A topology-only molecular graph: atoms with elements, plus bonds.
///
/// The molecule carries no coordinates; conformations are supplied separately
/// as batches at evaluation time. A cached adjacency list is maintained
/// alongside the bond list so that angle and torsion enumeration and symmetry
/// perception can walk the graph without rebuilding neighbor tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    name: String,
    elements: Vec<Element>,
    bonds: Vec<Bond>,
    adjacency: Vec<Vec<usize>>,
}

impl Molecule {
    /// Creates an empty molecule with the given name.
    ///
    /// The name identifies the molecule in caches and diagnostics; it carries
    /// no chemical meaning.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            elements: Vec::new(),
            bonds: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    /// Returns the name of the molecule.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an atom of the given element and returns its index.
    pub fn add_atom(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.adjacency.push(Vec::new());
        self.elements.len() - 1
    }

    /// Adds a bond between two atoms and updates the adjacency cache.
    ///
    /// The method is idempotent; adding an existing bond (in either
    /// orientation) is a no-op. Returns `None` if either index is out of
    /// range or the two indices are equal.
    pub fn add_bond(&mut self, atom1: usize, atom2: usize) -> Option<()> {
        if atom1 == atom2 || atom1 >= self.elements.len() || atom2 >= self.elements.len() {
            return None;
        }
        if self.adjacency[atom1].contains(&atom2) {
            return Some(());
        }

        self.bonds.push(Bond::new(atom1, atom2));
        self.adjacency[atom1].push(atom2);
        self.adjacency[atom2].push(atom1);
        Some(())
    }

    /// Returns the number of atoms in the molecule.
    pub fn atom_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the element of the atom at the given index.
    pub fn element(&self, index: usize) -> Option<Element> {
        self.elements.get(index).copied()
    }

    /// Returns the elements of all atoms, in index order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns a slice of all bonds, in insertion order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns the indices of the atoms bonded to the given atom.
    ///
    /// The slice is in bond-insertion order and is empty for an out-of-range
    /// index.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
