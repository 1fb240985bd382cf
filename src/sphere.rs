use core::ops::RangeInclusive;
use std::sync::Arc;

use crate::{
    hit::{Hit, Intersect},
    Material, Ray,
};
use nalgebra::Vector3;

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vector3<f64>,
    /// Must be positive; not checked at intersection time.
    pub radius: f64,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Vector3<f64>, radius: f64, material: Arc<Material>) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: Ray, interval: RangeInclusive<f64>) -> Option<Hit<'_>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let half_b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let d = (half_b * half_b) - (a * c);

        if d < 0.0 {
            return None;
        }

        let sqrt_d = d.sqrt();
        let mut root = (-half_b - sqrt_d) / a;

        if !interval.contains(&root) {
            root = (-half_b + sqrt_d) / a;
            if !interval.contains(&root) {
                return None;
            }
        }

        let position = ray.at(root);
        let outward_normal = (position - self.center) / self.radius;
        Some(Hit::new(
            ray,
            position,
            outward_normal,
            root,
            &self.material,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vector3::zeros(),
            0.5,
            Arc::new(Material::diffuse(Vector3::new(0.5, 0.5, 0.5))),
        )
    }

    #[test]
    fn hits_nearer_root_from_outside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let hit = sphere.intersect(ray, 0.001..=f64::INFINITY).unwrap();
        assert_eq!(hit.distance, 1.5);
        assert_eq!(hit.position, Vector3::new(-0.5, 0.0, 0.0));
        assert_eq!(hit.normal, Vector3::new(-1.0, 0.0, 0.0));
        assert!(hit.front_face);
    }

    #[test]
    fn falls_back_to_farther_root_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 2.0, 0.0));
        let hit = sphere.intersect(ray, 0.001..=f64::INFINITY).unwrap();
        assert_eq!(hit.distance, 0.25);
        assert_eq!(hit.normal, Vector3::new(0.0, -1.0, 0.0));
        assert!(!hit.front_face);
    }

    #[test]
    fn misses_when_discriminant_negative() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-2.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(sphere.intersect(ray, 0.001..=f64::INFINITY).is_none());
    }

    #[test]
    fn misses_when_both_roots_out_of_range() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vector3::new(-2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(sphere.intersect(ray, 0.001..=1.0).is_none());
        let behind = Ray::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(sphere.intersect(behind, 0.001..=f64::INFINITY).is_none());
    }

    #[test]
    fn repeated_queries_are_bit_identical() {
        let sphere = unit_sphere();
        let ray = Ray::new(
            Vector3::new(-1.3, 0.17, 0.05),
            Vector3::new(0.9, -0.1, 0.02),
        );
        let first = sphere.intersect(ray, 0.001..=10.0).unwrap();
        let second = sphere.intersect(ray, 0.001..=10.0).unwrap();
        assert_eq!(first.distance.to_bits(), second.distance.to_bits());
        assert_eq!(first.position, second.position);
        assert_eq!(first.normal, second.normal);
    }

    #[test]
    fn normal_always_opposes_ray() {
        let sphere = unit_sphere();
        let origins = [
            Vector3::new(-2.0, 0.1, 0.0),
            Vector3::new(0.1, 0.0, 0.0),
            Vector3::new(0.0, 3.0, -0.2),
        ];
        for origin in origins {
            let ray = Ray::new(origin, -origin);
            if let Some(hit) = sphere.intersect(ray, 0.001..=f64::INFINITY) {
                assert!(ray.direction.dot(&hit.normal) <= 0.0);
            }
        }
    }
}
