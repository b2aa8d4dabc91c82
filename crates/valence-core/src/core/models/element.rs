use phf::phf_map;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements covered by the valence baseline.
///
/// The set is restricted to the organic subset that small-molecule valence
/// fitting targets in practice. The element enters symmetry perception as
/// part of the initial atom invariant, so two atoms of different elements are
/// never symmetry-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    /// Hydrogen.
    H,
    /// Carbon.
    C,
    /// Nitrogen.
    N,
    /// Oxygen.
    O,
    /// Fluorine.
    F,
    /// Phosphorus.
    P,
    /// Sulfur.
    S,
    /// Chlorine.
    Cl,
    /// Bromine.
    Br,
    /// Iodine.
    I,
}

static ELEMENTS_BY_SYMBOL: phf::Map<&'static str, Element> = phf_map! {
    "H" => Element::H,
    "C" => Element::C,
    "N" => Element::N,
    "O" => Element::O,
    "F" => Element::F,
    "P" => Element::P,
    "S" => Element::S,
    "Cl" => Element::Cl,
    "Br" => Element::Br,
    "I" => Element::I,
};

impl Element {
    /// Looks up an element by its case-sensitive chemical symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        ELEMENTS_BY_SYMBOL.get(symbol).copied()
    }

    /// Returns the chemical symbol of the element.
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    /// Returns the atomic number of the element.
    pub fn atomic_number(&self) -> u8 {
        match self {
            Element::H => 1,
            Element::C => 6,
            Element::N => 7,
            Element::O => 8,
            Element::F => 9,
            Element::P => 15,
            Element::S => 16,
            Element::Cl => 17,
            Element::Br => 35,
            Element::I => 53,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol: '{0}'")]
pub struct UnknownElementError(pub String);

impl FromStr for Element {
    type Err = UnknownElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::from_symbol(s).ok_or_else(|| UnknownElementError(s.to_string()))
    }
}
