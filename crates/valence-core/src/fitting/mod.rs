//! Assembly of per-term equivalence classes into a fittable valence model.

use crate::core::forcefield::energy::{
    self, ConformationBatch, EnergyError,
};
use crate::core::forcefield::params::N_PERIODICITIES;
use crate::core::models::molecule::Molecule;
use crate::core::symmetry::{SymmetryError, SymmetryOracle};
use crate::core::typing::{ClassAssignment, TypingError};
use nalgebra::Point3;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FittingError {
    #[error(transparent)]
    Symmetry(#[from] SymmetryError),
    #[error(transparent)]
    Typing(#[from] TypingError),
    #[error(transparent)]
    Energy(#[from] EnergyError),
    #[error("Parameter vector has length {actual}, expected {expected} for this model")]
    ParamPartitionMismatch { expected: usize, actual: usize },
    #[error("Reference energies have {actual} entries but the batch has {expected} frames")]
    ReferenceLengthMismatch { expected: usize, actual: usize },
}

/// The complete valence parameterization structure of one molecule.
///
/// Bundles the bond, angle, and torsion equivalence classes built from a
/// single symmetry perception, and defines the flat parameter-vector
/// partition `[bonds | angles | torsions]` used by the evaluators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValenceModel {
    molecule: String,
    bonds: ClassAssignment<2>,
    angles: ClassAssignment<3>,
    torsions: ClassAssignment<4>,
}

impl ValenceModel {
    /// Builds the model for a molecule, invoking the oracle exactly once.
    pub fn from_molecule(
        molecule: &Molecule,
        oracle: &impl SymmetryOracle,
    ) -> Result<Self, FittingError> {
        let symmetry = oracle.classes(molecule)?;
        let bonds = ClassAssignment::for_bonds(molecule, &symmetry)?;
        let angles = ClassAssignment::for_angles(molecule, &symmetry)?;
        let torsions = ClassAssignment::for_propers(molecule, &symmetry)?;

        debug!(
            molecule = molecule.name(),
            bond_classes = bonds.n_unique(),
            angle_classes = angles.n_unique(),
            torsion_classes = torsions.n_unique(),
            "Built valence model"
        );

        Ok(Self {
            molecule: molecule.name().to_string(),
            bonds,
            angles,
            torsions,
        })
    }

    pub fn molecule(&self) -> &str {
        &self.molecule
    }

    pub fn bonds(&self) -> &ClassAssignment<2> {
        &self.bonds
    }

    pub fn angles(&self) -> &ClassAssignment<3> {
        &self.angles
    }

    pub fn torsions(&self) -> &ClassAssignment<4> {
        &self.torsions
    }

    /// Length of the bond slice of the flat parameter vector.
    pub fn n_bond_params(&self) -> usize {
        2 * self.bonds.n_unique()
    }

    /// Length of the angle slice of the flat parameter vector.
    pub fn n_angle_params(&self) -> usize {
        2 * self.angles.n_unique()
    }

    /// Length of the torsion slice of the flat parameter vector.
    pub fn n_torsion_params(&self) -> usize {
        2 * N_PERIODICITIES * self.torsions.n_unique()
    }

    /// Total length of the flat parameter vector.
    pub fn n_params(&self) -> usize {
        self.n_bond_params() + self.n_angle_params() + self.n_torsion_params()
    }

    fn partition<'a>(
        &self,
        params: &'a [f64],
    ) -> Result<(&'a [f64], &'a [f64], &'a [f64]), FittingError> {
        if params.len() != self.n_params() {
            return Err(FittingError::ParamPartitionMismatch {
                expected: self.n_params(),
                actual: params.len(),
            });
        }
        let (bond_params, rest) = params.split_at(self.n_bond_params());
        let (angle_params, torsion_params) = rest.split_at(self.n_angle_params());
        Ok((bond_params, angle_params, torsion_params))
    }

    /// Total valence energy per conformation: bond + angle + torsion terms.
    pub fn energies(
        &self,
        batch: &ConformationBatch,
        params: &[f64],
    ) -> Result<Vec<f64>, FittingError> {
        let (bond_params, angle_params, torsion_params) = self.partition(params)?;

        let mut total = energy::harmonic_bond_energies(batch, bond_params, &self.bonds)?;
        let angle = energy::harmonic_angle_energies(batch, angle_params, &self.angles)?;
        let torsion = energy::periodic_torsion_energies(batch, torsion_params, &self.torsions)?;

        for (t, (a, d)) in total.iter_mut().zip(angle.iter().zip(torsion.iter())) {
            *t += a + d;
        }
        Ok(total)
    }

    /// Sum of squared residuals between the model's valence energies and a
    /// per-conformation reference.
    pub fn sum_squared_residuals(
        &self,
        batch: &ConformationBatch,
        params: &[f64],
        reference: &[f64],
    ) -> Result<f64, FittingError> {
        if reference.len() != batch.n_frames() {
            return Err(FittingError::ReferenceLengthMismatch {
                expected: batch.n_frames(),
                actual: reference.len(),
            });
        }
        let energies = self.energies(batch, params)?;
        Ok(energies
            .iter()
            .zip(reference)
            .map(|(e, r)| (r - e) * (r - e))
            .sum())
    }
}

/// Provider of reference energies from a full simulation of the molecule.
pub trait ReferenceSource {
    /// Total potential energy of one conformation.
    fn total_energy(&self, frame: &[Point3<f64>]) -> f64;
    /// Non-bonded (electrostatic + van der Waals) energy of one conformation.
    fn nonbonded_energy(&self, frame: &[Point3<f64>]) -> f64;
}

/// Per-conformation valence reference: total minus non-bonded energy.
pub fn valence_reference(
    source: &impl ReferenceSource,
    batch: &ConformationBatch,
) -> Vec<f64> {
    batch
        .frames()
        .iter()
        .map(|frame| source.total_energy(frame) - source.nonbonded_energy(frame))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::energy::{
        harmonic_angle_energies, harmonic_bond_energies, periodic_torsion_energies,
    };
    use crate::core::models::element::Element;
    use crate::core::symmetry::TopologicalSymmetry;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
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

    fn ethanol_frame(offset: f64) -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.52, 0.0, 0.0),
            Point3::new(2.02, 1.33, 0.0),
            Point3::new(-0.39, 0.52 + offset, 0.89),
            Point3::new(-0.39, 0.52, -0.89),
            Point3::new(-0.39, -1.03, 0.0),
            Point3::new(1.91, -0.52, 0.89),
            Point3::new(1.91, -0.52, -0.89),
            Point3::new(2.98, 1.30, 0.0),
        ]
    }

    fn linear_params(n: usize) -> Vec<f64> {
        (0..n).map(|i| 0.1 * (i as f64 + 1.0)).collect()
    }

    #[test]
    fn model_partition_lengths_are_consistent() {
        let mol = ethanol();
        let model = ValenceModel::from_molecule(&mol, &TopologicalSymmetry::new()).unwrap();
        assert_eq!(model.n_bond_params(), 2 * model.bonds().n_unique());
        assert_eq!(
            model.n_params(),
            model.n_bond_params() + model.n_angle_params() + model.n_torsion_params()
        );
        assert!(model.bonds().n_unique() <= model.bonds().len());
    }

    #[test]
    fn energies_equal_sum_of_term_evaluators() {
        let mol = ethanol();
        let model = ValenceModel::from_molecule(&mol, &TopologicalSymmetry::new()).unwrap();
        let batch =
            ConformationBatch::new(vec![ethanol_frame(0.0), ethanol_frame(0.1)]).unwrap();
        let params = linear_params(model.n_params());

        let total = model.energies(&batch, &params).unwrap();

        let (bond_params, rest) = params.split_at(model.n_bond_params());
        let (angle_params, torsion_params) = rest.split_at(model.n_angle_params());
        let bond = harmonic_bond_energies(&batch, bond_params, model.bonds()).unwrap();
        let angle = harmonic_angle_energies(&batch, angle_params, model.angles()).unwrap();
        let torsion =
            periodic_torsion_energies(&batch, torsion_params, model.torsions()).unwrap();

        for m in 0..batch.n_frames() {
            assert!(f64_approx_equal(total[m], bond[m] + angle[m] + torsion[m]));
        }
    }

    #[test]
    fn energies_reject_wrong_partition_length() {
        let mol = ethanol();
        let model = ValenceModel::from_molecule(&mol, &TopologicalSymmetry::new()).unwrap();
        let batch = ConformationBatch::new(vec![ethanol_frame(0.0)]).unwrap();
        let params = linear_params(model.n_params() + 1);
        assert!(matches!(
            model.energies(&batch, &params),
            Err(FittingError::ParamPartitionMismatch { .. })
        ));
    }

    #[test]
    fn residual_is_zero_when_reference_matches() {
        let mol = ethanol();
        let model = ValenceModel::from_molecule(&mol, &TopologicalSymmetry::new()).unwrap();
        let batch = ConformationBatch::new(vec![ethanol_frame(0.0)]).unwrap();
        let params = linear_params(model.n_params());
        let reference = model.energies(&batch, &params).unwrap();
        let rss = model
            .sum_squared_residuals(&batch, &params, &reference)
            .unwrap();
        assert!(f64_approx_equal(rss, 0.0));
    }

    #[test]
    fn residual_rejects_reference_length_mismatch() {
        let mol = ethanol();
        let model = ValenceModel::from_molecule(&mol, &TopologicalSymmetry::new()).unwrap();
        let batch = ConformationBatch::new(vec![ethanol_frame(0.0)]).unwrap();
        let params = linear_params(model.n_params());
        let result = model.sum_squared_residuals(&batch, &params, &[0.0, 1.0]);
        assert!(matches!(
            result,
            Err(FittingError::ReferenceLengthMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn valence_reference_is_total_minus_nonbonded() {
        struct FixedSource;
        impl ReferenceSource for FixedSource {
            fn total_energy(&self, frame: &[Point3<f64>]) -> f64 {
                frame.len() as f64 * 10.0
            }
            fn nonbonded_energy(&self, frame: &[Point3<f64>]) -> f64 {
                frame.len() as f64
            }
        }

        let batch =
            ConformationBatch::new(vec![ethanol_frame(0.0), ethanol_frame(0.2)]).unwrap();
        let reference = valence_reference(&FixedSource, &batch);
        assert_eq!(reference, vec![81.0, 81.0]);
    }

    #[test]
    fn model_for_molecule_without_torsions_has_empty_torsion_slice() {
        let mut mol = Molecule::new("water");
        let o = mol.add_atom(Element::O);
        let h1 = mol.add_atom(Element::H);
        let h2 = mol.add_atom(Element::H);
        mol.add_bond(o, h1).unwrap();
        mol.add_bond(o, h2).unwrap();

        let model = ValenceModel::from_molecule(&mol, &TopologicalSymmetry::new()).unwrap();
        assert_eq!(model.n_torsion_params(), 0);

        let batch = ConformationBatch::new(vec![vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.96, 0.0, 0.0),
            Point3::new(0.0, 0.96, 0.0),
        ]])
        .unwrap();
        let params = linear_params(model.n_params());
        let energies = model.energies(&batch, &params).unwrap();
        assert_eq!(energies.len(), 1);
    }
}
