use nalgebra::Point3;

/// Euclidean distance between two points.
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Angle at `b` spanned by `a` and `c`, in radians within `[0, pi]`.
pub fn angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let u = a - b;
    let v = c - b;
    let cos = u.dot(&v) / (u.norm() * v.norm());
    cos.clamp(-1.0, 1.0).acos()
}

/// Signed dihedral angle of the chain `a-b-c-d`, in radians within
/// `(-pi, pi]`.
///
/// Computed from the normals of the `a-b-c` and `b-c-d` planes via `atan2`,
/// which is numerically stable near 0 and pi. Zero corresponds to the cis
/// (eclipsed) arrangement.
pub fn dihedral(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let x = n1.dot(&n2);
    let y = n1.cross(&n2).dot(&b2.normalize());

    y.atan2(x)
}
