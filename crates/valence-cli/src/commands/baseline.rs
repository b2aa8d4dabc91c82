use crate::cli::BaselineArgs;
use crate::demo::{self, DemoMolecule};
use crate::error::{CliError, Result};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::info;
use valencefit::core::forcefield::energy::{self, ConformationBatch};
use valencefit::core::forcefield::params::ValenceParamSet;
use valencefit::core::models::molecule::Molecule;
use valencefit::core::symmetry::TopologicalSymmetry;
use valencefit::fitting::{ReferenceSource, ValenceModel, valence_reference};

pub fn run(args: BaselineArgs) -> Result<()> {
    let entry = demo::by_name(&args.molecule).ok_or_else(|| {
        CliError::Argument(format!(
            "unknown demo molecule '{}'; available: {}",
            args.molecule,
            demo::names().join(", ")
        ))
    })?;
    if args.frames == 0 {
        return Err(CliError::Argument(
            "at least one conformation frame is required".to_string(),
        ));
    }
    if args.jitter < 0.0 {
        return Err(CliError::Argument(
            "jitter must be non-negative".to_string(),
        ));
    }

    let model = ValenceModel::from_molecule(&entry.molecule, &TopologicalSymmetry::new())?;
    info!(
        "Model for '{}': {} bond, {} angle, {} torsion classes ({} parameters).",
        model.molecule(),
        model.bonds().n_unique(),
        model.angles().n_unique(),
        model.torsions().n_unique(),
        model.n_params()
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let batch = jittered_batch(&entry, args.frames, args.jitter, &mut rng)?;
    let params = candidate_params(&args, &model, &mut rng)?;

    let (bond_params, rest) = params.split_at(model.n_bond_params());
    let (angle_params, torsion_params) = rest.split_at(model.n_angle_params());

    let bond_energies = energy::harmonic_bond_energies(&batch, bond_params, model.bonds())?;
    let angle_energies = energy::harmonic_angle_energies(&batch, angle_params, model.angles())?;
    let torsion_energies =
        energy::periodic_torsion_energies(&batch, torsion_params, model.torsions())?;

    println!("bond energies mean {:.6}", mean(&bond_energies));
    println!("angle energies mean {:.6}", mean(&angle_energies));
    println!("torsion energies mean {:.6}", mean(&torsion_energies));

    // Synthetic simulation reference: valence terms at a hidden target
    // parameter set, plus a Lennard-Jones non-bonded contribution that the
    // valence reference subtracts back out.
    let target: Vec<f64> = (0..model.n_params())
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect();
    let source = SyntheticReference::new(&entry.molecule, &model, &target);
    let reference = valence_reference(&source, &batch);
    let rss = model.sum_squared_residuals(&batch, &params, &reference)?;
    println!("sum of squared residuals vs reference: {:.6}", rss);

    if let Some(path) = &args.save_params {
        let set = ValenceParamSet {
            molecule: model.molecule().to_string(),
            n_bond_classes: model.bonds().n_unique(),
            n_angle_classes: model.angles().n_unique(),
            n_torsion_classes: model.torsions().n_unique(),
            bonds: bond_params.to_vec(),
            angles: angle_params.to_vec(),
            torsions: torsion_params.to_vec(),
        };
        set.save(path).map_err(|e| CliError::ParamFile {
            path: path.clone(),
            source: e,
        })?;
        info!("Wrote candidate parameter set to '{}'.", path.display());
    }

    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn jittered_batch(
    entry: &DemoMolecule,
    frames: usize,
    jitter: f64,
    rng: &mut StdRng,
) -> Result<ConformationBatch> {
    let frames: Vec<Vec<Point3<f64>>> = (0..frames)
        .map(|_| {
            entry
                .coordinates
                .iter()
                .map(|p| {
                    Point3::new(
                        p.x + rng.gen_range(-jitter..=jitter),
                        p.y + rng.gen_range(-jitter..=jitter),
                        p.z + rng.gen_range(-jitter..=jitter),
                    )
                })
                .collect()
        })
        .collect();
    Ok(ConformationBatch::new(frames)?)
}

fn candidate_params(
    args: &BaselineArgs,
    model: &ValenceModel,
    rng: &mut StdRng,
) -> Result<Vec<f64>> {
    let Some(path) = &args.params else {
        return Ok((0..model.n_params())
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect());
    };

    let set = ValenceParamSet::load(path).map_err(|e| CliError::ParamFile {
        path: path.clone(),
        source: e,
    })?;
    set.validate()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let counts_match = set.n_bond_classes == model.bonds().n_unique()
        && set.n_angle_classes == model.angles().n_unique()
        && set.n_torsion_classes == model.torsions().n_unique();
    if !counts_match || set.molecule != model.molecule() {
        return Err(CliError::Argument(format!(
            "parameter set '{}' does not match the class structure of '{}'",
            set.molecule,
            model.molecule()
        )));
    }

    let mut params = set.bonds;
    params.extend(set.angles);
    params.extend(set.torsions);
    Ok(params)
}

/// Stand-in for an external simulation backend.
///
/// Total energy is the valence energy at a hidden target parameter set plus
/// a Lennard-Jones term over non-bonded atom pairs.
struct SyntheticReference<'a> {
    model: &'a ValenceModel,
    target_params: &'a [f64],
    bonded_pairs: HashSet<(usize, usize)>,
}

impl<'a> SyntheticReference<'a> {
    fn new(molecule: &Molecule, model: &'a ValenceModel, target_params: &'a [f64]) -> Self {
        let bonded_pairs = molecule
            .bonds()
            .iter()
            .map(|b| {
                if b.atom1 < b.atom2 {
                    (b.atom1, b.atom2)
                } else {
                    (b.atom2, b.atom1)
                }
            })
            .collect();
        Self {
            model,
            target_params,
            bonded_pairs,
        }
    }

    fn valence_energy(&self, frame: &[Point3<f64>]) -> f64 {
        let batch = ConformationBatch::new(vec![frame.to_vec()])
            .expect("a single frame is always rectangular");
        self.model
            .energies(&batch, self.target_params)
            .map(|energies| energies[0])
            .unwrap_or(f64::NAN)
    }
}

impl ReferenceSource for SyntheticReference<'_> {
    fn total_energy(&self, frame: &[Point3<f64>]) -> f64 {
        self.valence_energy(frame) + self.nonbonded_energy(frame)
    }

    fn nonbonded_energy(&self, frame: &[Point3<f64>]) -> f64 {
        const SIGMA: f64 = 3.0;
        const EPSILON: f64 = 0.1;

        let mut energy = 0.0;
        for i in 0..frame.len() {
            for j in (i + 1)..frame.len() {
                if self.bonded_pairs.contains(&(i, j)) {
                    continue;
                }
                let r = (frame[i] - frame[j]).norm();
                let rho6 = (SIGMA / r).powi(6);
                energy += 4.0 * EPSILON * (rho6 * rho6 - rho6);
            }
        }
        energy
    }
}
