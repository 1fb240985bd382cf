use core::ops::RangeInclusive;

use crate::{Material, Ray};
use nalgebra::Vector3;

pub trait Intersect {
    fn intersect(&self, ray: Ray, interval: RangeInclusive<f64>) -> Option<Hit<'_>>;
}

#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub position: Vector3<f64>,
    /// Always faces against the incoming ray.
    pub normal: Vector3<f64>,
    pub distance: f64,
    pub front_face: bool,
    pub material: &'a Material,
}

impl<'a> Hit<'a> {
    pub fn new(
        ray: Ray,
        position: Vector3<f64>,
        outward_normal: Vector3<f64>,
        distance: f64,
        material: &'a Material,
    ) -> Self {
        let front_face = ray.direction.dot(&outward_normal) <= 0.0;
        Self {
            position,
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            distance,
            front_face,
            material,
        }
    }
}
