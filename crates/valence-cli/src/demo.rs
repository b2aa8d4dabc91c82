//! Built-in demo molecules with reference geometries.
//!
//! A small alkane/alcohol/ether trio, enough to exercise every interaction
//! arity. Geometries are idealized; the baseline commands jitter them to
//! produce synthetic conformation batches.

use nalgebra::Point3;
use valencefit::core::models::element::Element;
use valencefit::core::models::molecule::Molecule;

pub struct DemoMolecule {
    pub molecule: Molecule,
    pub coordinates: Vec<Point3<f64>>,
}

pub fn names() -> &'static [&'static str] {
    &["ethane", "ethanol", "dimethyl-ether"]
}

pub fn by_name(name: &str) -> Option<DemoMolecule> {
    match name {
        "ethane" => Some(ethane()),
        "ethanol" => Some(ethanol()),
        "dimethyl-ether" => Some(dimethyl_ether()),
        _ => None,
    }
}

pub fn all() -> Vec<DemoMolecule> {
    names()
        .iter()
        .filter_map(|name| by_name(name))
        .collect()
}

fn ethane() -> DemoMolecule {
    let mut mol = Molecule::new("ethane");
    let c0 = mol.add_atom(Element::C);
    let c1 = mol.add_atom(Element::C);
    mol.add_bond(c0, c1).unwrap();
    for _ in 0..3 {
        let h = mol.add_atom(Element::H);
        mol.add_bond(c0, h).unwrap();
    }
    for _ in 0..3 {
        let h = mol.add_atom(Element::H);
        mol.add_bond(c1, h).unwrap();
    }

    let coordinates = vec![
        Point3::new(0.00, 0.00, 0.00),
        Point3::new(1.54, 0.00, 0.00),
        Point3::new(-0.36, 1.03, 0.00),
        Point3::new(-0.36, -0.51, 0.89),
        Point3::new(-0.36, -0.51, -0.89),
        Point3::new(1.90, -1.03, 0.00),
        Point3::new(1.90, 0.51, 0.89),
        Point3::new(1.90, 0.51, -0.89),
    ];
    DemoMolecule {
        molecule: mol,
        coordinates,
    }
}

fn ethanol() -> DemoMolecule {
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

    let coordinates = vec![
        Point3::new(0.00, 0.00, 0.00),
        Point3::new(1.52, 0.00, 0.00),
        Point3::new(2.02, 1.33, 0.00),
        Point3::new(-0.39, 0.52, 0.89),
        Point3::new(-0.39, 0.52, -0.89),
        Point3::new(-0.39, -1.03, 0.00),
        Point3::new(1.91, -0.52, 0.89),
        Point3::new(1.91, -0.52, -0.89),
        Point3::new(2.98, 1.30, 0.00),
    ];
    DemoMolecule {
        molecule: mol,
        coordinates,
    }
}

fn dimethyl_ether() -> DemoMolecule {
    let mut mol = Molecule::new("dimethyl-ether");
    let c0 = mol.add_atom(Element::C);
    let o = mol.add_atom(Element::O);
    let c1 = mol.add_atom(Element::C);
    mol.add_bond(c0, o).unwrap();
    mol.add_bond(o, c1).unwrap();
    for _ in 0..3 {
        let h = mol.add_atom(Element::H);
        mol.add_bond(c0, h).unwrap();
    }
    for _ in 0..3 {
        let h = mol.add_atom(Element::H);
        mol.add_bond(c1, h).unwrap();
    }

    let coordinates = vec![
        Point3::new(-1.18, 0.69, 0.00),
        Point3::new(0.00, 0.00, 0.00),
        Point3::new(1.18, 0.69, 0.00),
        Point3::new(-1.12, 1.35, 0.80),
        Point3::new(-1.12, 1.35, -0.80),
        Point3::new(-2.18, 0.33, 0.00),
        Point3::new(1.12, 1.35, 0.80),
        Point3::new(1.12, 1.35, -0.80),
        Point3::new(2.18, 0.33, 0.00),
    ];
    DemoMolecule {
        molecule: mol,
        coordinates,
    }
}
