use core::ops::RangeInclusive;

use crate::{
    hit::{Hit, Intersect},
    Ray, Sphere,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Intersect for Primitive {
    fn intersect(&self, ray: Ray, interval: RangeInclusive<f64>) -> Option<Hit<'_>> {
        match self {
            Self::Sphere(sphere) => sphere.intersect(ray, interval),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}
