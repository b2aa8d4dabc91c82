use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Number of periodicities carried per torsion class (values 1 through
/// [`N_PERIODICITIES`]).
pub const N_PERIODICITIES: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error(
        "Parameter vector for {term} terms has length {actual}, expected {expected} for {n_unique} classes"
    )]
    LengthMismatch {
        term: &'static str,
        expected: usize,
        actual: usize,
        n_unique: usize,
    },
}

/// View over a flat harmonic parameter vector.
///
/// Layout: the first half holds one force constant per class, the second
/// half one equilibrium value per class, both indexed by class id.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicParams<'a> {
    ks: &'a [f64],
    x0s: &'a [f64],
}

impl<'a> HarmonicParams<'a> {
    /// Splits a flat vector into its `k` and `x0` halves.
    ///
    /// Fails fast when the length is not exactly `2 * n_unique`; a silent
    /// reshape would produce garbage energies.
    pub fn split(
        params: &'a [f64],
        n_unique: usize,
        term: &'static str,
    ) -> Result<Self, ParamError> {
        let expected = 2 * n_unique;
        if params.len() != expected {
            return Err(ParamError::LengthMismatch {
                term,
                expected,
                actual: params.len(),
                n_unique,
            });
        }
        let (ks, x0s) = params.split_at(n_unique);
        Ok(Self { ks, x0s })
    }

    #[inline]
    pub fn k(&self, class_id: usize) -> f64 {
        self.ks[class_id]
    }

    #[inline]
    pub fn x0(&self, class_id: usize) -> f64 {
        self.x0s[class_id]
    }
}

/// View over a flat periodic-torsion parameter vector.
///
/// Layout: `N_PERIODICITIES` force constants per class (class-major),
/// followed by `N_PERIODICITIES` phases per class.
#[derive(Debug, Clone, Copy)]
pub struct TorsionParams<'a> {
    ks: &'a [f64],
    phases: &'a [f64],
}

impl<'a> TorsionParams<'a> {
    /// Splits a flat vector into per-class force-constant and phase blocks.
    ///
    /// Fails fast when the length is not exactly
    /// `2 * N_PERIODICITIES * n_unique`.
    pub fn split(params: &'a [f64], n_unique: usize) -> Result<Self, ParamError> {
        let expected = 2 * N_PERIODICITIES * n_unique;
        if params.len() != expected {
            return Err(ParamError::LengthMismatch {
                term: "torsion",
                expected,
                actual: params.len(),
                n_unique,
            });
        }
        let (ks, phases) = params.split_at(N_PERIODICITIES * n_unique);
        Ok(Self { ks, phases })
    }

    /// Force constants for periodicities `1..=N_PERIODICITIES` of one class.
    #[inline]
    pub fn ks(&self, class_id: usize) -> &[f64] {
        &self.ks[class_id * N_PERIODICITIES..(class_id + 1) * N_PERIODICITIES]
    }

    /// Phases for periodicities `1..=N_PERIODICITIES` of one class.
    #[inline]
    pub fn phases(&self, class_id: usize) -> &[f64] {
        &self.phases[class_id * N_PERIODICITIES..(class_id + 1) * N_PERIODICITIES]
    }
}

/// A named, persistable set of valence parameters for one molecule.
///
/// Holds the three flat parameter vectors together with the class counts
/// they were fitted against, so a loaded set can be validated before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValenceParamSet {
    pub molecule: String,
    pub n_bond_classes: usize,
    pub n_angle_classes: usize,
    pub n_torsion_classes: usize,
    pub bonds: Vec<f64>,
    pub angles: Vec<f64>,
    pub torsions: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum ParamFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("TOML serialization error for '{path}': {source}")]
    TomlSer {
        path: String,
        source: toml::ser::Error,
    },
}

impl ValenceParamSet {
    pub fn load(path: &Path) -> Result<Self, ParamFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamFileError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ParamFileError> {
        let content = toml::to_string(self).map_err(|e| ParamFileError::TomlSer {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        std::fs::write(path, content).map_err(|e| ParamFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Checks each vector against its declared class count.
    pub fn validate(&self) -> Result<(), ParamError> {
        HarmonicParams::split(&self.bonds, self.n_bond_classes, "bond")?;
        HarmonicParams::split(&self.angles, self.n_angle_classes, "angle")?;
        TorsionParams::split(&self.torsions, self.n_torsion_classes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn harmonic_split_indexes_k_and_x0_by_class() {
        let params = [10.0, 20.0, 1.0, 2.0];
        let view = HarmonicParams::split(&params, 2, "bond").unwrap();
        assert_eq!(view.k(0), 10.0);
        assert_eq!(view.k(1), 20.0);
        assert_eq!(view.x0(0), 1.0);
        assert_eq!(view.x0(1), 2.0);
    }

    #[test]
    fn harmonic_split_rejects_wrong_length() {
        let params = [1.0, 2.0, 3.0];
        let result = HarmonicParams::split(&params, 2, "angle");
        assert_eq!(
            result.err(),
            Some(ParamError::LengthMismatch {
                term: "angle",
                expected: 4,
                actual: 3,
                n_unique: 2
            })
        );
    }

    #[test]
    fn harmonic_split_accepts_empty_vector_for_zero_classes() {
        assert!(HarmonicParams::split(&[], 0, "bond").is_ok());
    }

    #[test]
    fn torsion_split_slices_per_class_blocks() {
        let mut params = Vec::new();
        params.extend((0..12).map(|i| i as f64)); // ks: class 0 then class 1
        params.extend((100..112).map(|i| i as f64)); // phases
        let view = TorsionParams::split(&params, 2).unwrap();
        assert_eq!(view.ks(0), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(view.ks(1), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
        assert_eq!(view.phases(1), &[106.0, 107.0, 108.0, 109.0, 110.0, 111.0]);
    }

    #[test]
    fn torsion_split_rejects_length_not_divisible_by_blocks() {
        let params = vec![0.0; 13];
        let result = TorsionParams::split(&params, 1);
        assert!(matches!(
            result,
            Err(ParamError::LengthMismatch {
                term: "torsion",
                expected: 12,
                actual: 13,
                ..
            })
        ));
    }

    #[test]
    fn param_set_round_trips_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");

        let set = ValenceParamSet {
            molecule: "ethanol".to_string(),
            n_bond_classes: 1,
            n_angle_classes: 1,
            n_torsion_classes: 0,
            bonds: vec![300.0, 1.52],
            angles: vec![80.0, 1.91],
            torsions: vec![],
        };
        set.save(&path).unwrap();

        let loaded = ValenceParamSet::load(&path).unwrap();
        assert_eq!(loaded, set);
        loaded.validate().unwrap();
    }

    #[test]
    fn param_set_load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ValenceParamSet::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ParamFileError::Io { .. })));
    }

    #[test]
    fn param_set_load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = ValenceParamSet::load(&path);
        assert!(matches!(result, Err(ParamFileError::Toml { .. })));
    }

    #[test]
    fn validate_rejects_inconsistent_declared_counts() {
        let set = ValenceParamSet {
            molecule: "broken".to_string(),
            n_bond_classes: 2,
            n_angle_classes: 0,
            n_torsion_classes: 0,
            bonds: vec![1.0, 2.0, 3.0],
            angles: vec![],
            torsions: vec![],
        };
        assert!(set.validate().is_err());
    }
}
