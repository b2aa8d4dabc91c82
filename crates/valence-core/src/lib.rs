//! # Valencefit Core Library
//!
//! A library for building "valence baselines" for molecular force fields:
//! independent harmonic/periodic parameters for every bond, angle, and proper
//! torsion of a molecule, shared only between interactions that are related by
//! topological symmetry.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction.
//!
//! - **[`core`]: The Foundation.** Contains the stateless data model
//!   ([`core::models::molecule::Molecule`]), topology enumeration, symmetry
//!   perception, the canonical equivalence-class assignment
//!   ([`core::typing::ClassAssignment`]), and the pure potential-energy
//!   evaluators over conformation batches.
//!
//! - **[`fitting`]: The Assembly Layer.** Ties the per-term equivalence
//!   classes and evaluators together into a [`fitting::ValenceModel`] whose
//!   total valence energy is composable by simple addition and suitable as a
//!   least-squares residual against reference energies.

pub mod core;
pub mod fitting;
