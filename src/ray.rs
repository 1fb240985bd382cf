use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Vector3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Vector3<f64> {
        self.origin + t * self.direction
    }
}

pub fn reflect(v: &Vector3<f64>, n: &Vector3<f64>) -> Vector3<f64> {
    v - 2.0 * v.dot(n) * n
}

/// Total internal reflection is not detected; the result is always finite.
pub fn refract(uv: &Vector3<f64>, n: &Vector3<f64>, ratio: f64) -> Vector3<f64> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let perpendicular = ratio * (uv + cos_theta * n);
    let parallel = -(1.0 - perpendicular.norm_squared()).abs().sqrt() * n;
    perpendicular + parallel
}
