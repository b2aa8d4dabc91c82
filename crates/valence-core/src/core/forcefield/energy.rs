//! Batch evaluation of valence potential terms.
//!
//! Each evaluator walks every conformation and every interaction instance,
//! O(M x interactions), and returns one additive scalar energy per
//! conformation. The evaluators are stateless; all shared-parameter
//! structure lives in the [`ClassAssignment`] passed in.

use super::params::{HarmonicParams, N_PERIODICITIES, ParamError, TorsionParams};
use super::potentials;
use crate::core::typing::ClassAssignment;
use crate::core::utils::geometry;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyError {
    #[error(transparent)]
    Params(#[from] ParamError),
    #[error("Flat coordinate array of length {len} does not factor into frames of {n_atoms} atoms")]
    MalformedBatch { len: usize, n_atoms: usize },
    #[error("Frame {frame} has {len} atoms but the batch is declared with {n_atoms}")]
    InconsistentFrame {
        frame: usize,
        len: usize,
        n_atoms: usize,
    },
    #[error("Interaction references atom {index}, out of range for a batch with {n_atoms} atoms")]
    AtomIndexOutOfRange { index: usize, n_atoms: usize },
}

/// A batch of M conformations of one molecule.
///
/// Each frame holds one `Point3` per atom, in atom-index order. The batch is
/// immutable after construction and validated to be rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformationBatch {
    frames: Vec<Vec<Point3<f64>>>,
    n_atoms: usize,
}

impl ConformationBatch {
    /// Builds a batch from per-frame coordinate vectors.
    ///
    /// All frames must have the same atom count. An empty frame list is a
    /// valid batch of zero conformations.
    pub fn new(frames: Vec<Vec<Point3<f64>>>) -> Result<Self, EnergyError> {
        let n_atoms = frames.first().map(Vec::len).unwrap_or(0);
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != n_atoms {
                return Err(EnergyError::InconsistentFrame {
                    frame: i,
                    len: frame.len(),
                    n_atoms,
                });
            }
        }
        Ok(Self { frames, n_atoms })
    }

    /// Builds a batch from a flat `(M * n_atoms * 3)` coordinate array in
    /// frame-major, atom-major, xyz order.
    pub fn from_flat(data: &[f64], n_atoms: usize) -> Result<Self, EnergyError> {
        let frame_len = 3 * n_atoms;
        if frame_len == 0 || data.len() % frame_len != 0 {
            return Err(EnergyError::MalformedBatch {
                len: data.len(),
                n_atoms,
            });
        }
        let frames = data
            .chunks_exact(frame_len)
            .map(|frame| {
                frame
                    .chunks_exact(3)
                    .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
                    .collect()
            })
            .collect();
        Ok(Self { frames, n_atoms })
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    pub fn frames(&self) -> &[Vec<Point3<f64>>] {
        &self.frames
    }
}

fn check_atom_indices<const N: usize>(
    batch: &ConformationBatch,
    assignment: &ClassAssignment<N>,
) -> Result<(), EnergyError> {
    for tuple in assignment.index_tuples() {
        for &index in tuple {
            if index >= batch.n_atoms() {
                return Err(EnergyError::AtomIndexOutOfRange {
                    index,
                    n_atoms: batch.n_atoms(),
                });
            }
        }
    }
    Ok(())
}

/// Sums `0.5 * k * (r - r0)^2` over all bonds, per conformation.
pub fn harmonic_bond_energies(
    batch: &ConformationBatch,
    params: &[f64],
    assignment: &ClassAssignment<2>,
) -> Result<Vec<f64>, EnergyError> {
    let view = HarmonicParams::split(params, assignment.n_unique(), "bond")?;
    check_atom_indices(batch, assignment)?;

    let energies = batch
        .frames()
        .iter()
        .map(|frame| {
            assignment
                .index_tuples()
                .iter()
                .zip(assignment.class_ids())
                .map(|(&[i, j], &class)| {
                    let r = geometry::distance(&frame[i], &frame[j]);
                    potentials::harmonic(r, view.k(class), view.x0(class))
                })
                .sum()
        })
        .collect();
    Ok(energies)
}

/// Sums `0.5 * k * (theta - theta0)^2` over all angles, per conformation.
pub fn harmonic_angle_energies(
    batch: &ConformationBatch,
    params: &[f64],
    assignment: &ClassAssignment<3>,
) -> Result<Vec<f64>, EnergyError> {
    let view = HarmonicParams::split(params, assignment.n_unique(), "angle")?;
    check_atom_indices(batch, assignment)?;

    let energies = batch
        .frames()
        .iter()
        .map(|frame| {
            assignment
                .index_tuples()
                .iter()
                .zip(assignment.class_ids())
                .map(|(&[a, b, c], &class)| {
                    let theta = geometry::angle(&frame[a], &frame[b], &frame[c]);
                    potentials::harmonic(theta, view.k(class), view.x0(class))
                })
                .sum()
        })
        .collect();
    Ok(energies)
}

/// Sums `k_n * (1 + cos(n * theta - phase_n))` over all torsions and all
/// periodicities `1..=6`, per conformation.
pub fn periodic_torsion_energies(
    batch: &ConformationBatch,
    params: &[f64],
    assignment: &ClassAssignment<4>,
) -> Result<Vec<f64>, EnergyError> {
    let view = TorsionParams::split(params, assignment.n_unique())?;
    check_atom_indices(batch, assignment)?;

    let energies = batch
        .frames()
        .iter()
        .map(|frame| {
            assignment
                .index_tuples()
                .iter()
                .zip(assignment.class_ids())
                .map(|(&[a, b, c, d], &class)| {
                    let theta = geometry::dihedral(&frame[a], &frame[b], &frame[c], &frame[d]);
                    let ks = view.ks(class);
                    let phases = view.phases(class);
                    (0..N_PERIODICITIES)
                        .map(|p| {
                            potentials::periodic_torsion(theta, ks[p], phases[p], p as u32 + 1)
                        })
                        .sum::<f64>()
                })
                .sum()
        })
        .collect();
    Ok(energies)
}
