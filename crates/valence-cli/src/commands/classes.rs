use crate::cli::ClassesArgs;
use crate::demo;
use crate::error::{CliError, Result};
use tracing::info;
use valencefit::core::symmetry::{SymmetryCache, TopologicalSymmetry};
use valencefit::core::typing::ClassAssignment;

fn distinct_count(classes: &[u32]) -> usize {
    let mut sorted = classes.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

fn print_fraction(label: &str, n_unique: usize, n_total: usize) {
    let fraction = if n_total == 0 {
        0.0
    } else {
        n_unique as f64 / n_total as f64
    };
    println!("  {}: {} / {} = {:.3}", label, n_unique, n_total, fraction);
}

pub fn run(args: ClassesArgs) -> Result<()> {
    let molecules = match &args.molecule {
        Some(name) => vec![demo::by_name(name).ok_or_else(|| {
            CliError::Argument(format!(
                "unknown demo molecule '{}'; available: {}",
                name,
                demo::names().join(", ")
            ))
        })?],
        None => demo::all(),
    };

    let oracle = TopologicalSymmetry::new();
    let mut cache = SymmetryCache::new();

    // (unique, total) tallies for atoms, bonds, angles, torsions.
    let mut totals = [(0usize, 0usize); 4];

    for entry in &molecules {
        let mol = &entry.molecule;
        info!("Assigning equivalence classes for '{}'.", mol.name());

        let symmetry = cache.get_or_compute(mol, &oracle)?.to_vec();
        let bonds = ClassAssignment::for_bonds(mol, &symmetry)?;
        let angles = ClassAssignment::for_angles(mol, &symmetry)?;
        let torsions = ClassAssignment::for_propers(mol, &symmetry)?;

        println!("{}:", mol.name());
        let rows = [
            ("atoms", distinct_count(&symmetry), symmetry.len()),
            ("bonds", bonds.n_unique(), bonds.len()),
            ("angles", angles.n_unique(), angles.len()),
            ("torsions", torsions.n_unique(), torsions.len()),
        ];
        for (slot, (label, n_unique, n_total)) in rows.into_iter().enumerate() {
            print_fraction(label, n_unique, n_total);
            totals[slot].0 += n_unique;
            totals[slot].1 += n_total;
        }
    }

    if molecules.len() > 1 {
        println!("all molecules:");
        for (slot, label) in ["atoms", "bonds", "angles", "torsions"].into_iter().enumerate() {
            print_fraction(label, totals[slot].0, totals[slot].1);
        }
    }

    Ok(())
}
