use nalgebra::Vector3;
use rand::Rng;

use crate::{
    hit::Hit,
    ray::{reflect, refract},
    Ray,
};

/// Below this length a diffuse bounce direction is treated as degenerate.
const NEAR_ZERO: f64 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    Diffuse { albedo: Vector3<f64> },
    Metallic { albedo: Vector3<f64>, fuzz: f64 },
    Refractive { index_of_refraction: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scatter {
    pub ray: Ray,
    pub attenuation: Vector3<f64>,
}

impl Material {
    pub fn diffuse(albedo: Vector3<f64>) -> Self {
        Self::Diffuse { albedo }
    }

    pub fn metallic(albedo: Vector3<f64>) -> Self {
        Self::Metallic { albedo, fuzz: 0.0 }
    }

    pub fn fuzzy_metallic(albedo: Vector3<f64>, fuzz: f64) -> Self {
        Self::Metallic { albedo, fuzz }
    }

    pub fn refractive(index_of_refraction: f64) -> Self {
        Self::Refractive {
            index_of_refraction,
        }
    }

    /// `None` means the ray was absorbed.
    pub fn scatter<R: Rng>(
        &self,
        incoming: &Ray,
        hit: &Hit<'_>,
        rng: &mut R,
    ) -> Option<Scatter> {
        match *self {
            Self::Diffuse { albedo } => {
                let mut direction = hit.normal + random_in_unit_sphere(rng);
                if direction.norm_squared() < NEAR_ZERO * NEAR_ZERO {
                    direction = hit.normal;
                }
                Some(Scatter {
                    ray: Ray::new(hit.position, direction),
                    attenuation: albedo,
                })
            }
            Self::Metallic { albedo, fuzz } => {
                let direction = if fuzz > 0.0 {
                    reflect(&incoming.direction.normalize(), &hit.normal)
                        + fuzz * random_in_unit_sphere(rng)
                } else {
                    reflect(&incoming.direction, &hit.normal)
                };
                Some(Scatter {
                    ray: Ray::new(hit.position, direction),
                    attenuation: albedo,
                })
            }
            Self::Refractive {
                index_of_refraction,
            } => {
                let ratio = if hit.front_face {
                    1.0 / index_of_refraction
                } else {
                    index_of_refraction
                };
                let direction = refract(&incoming.direction.normalize(), &hit.normal, ratio);
                Some(Scatter {
                    ray: Ray::new(hit.position, direction),
                    attenuation: Vector3::repeat(1.0),
                })
            }
        }
    }
}

pub fn random_in_unit_sphere<R: Rng>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.norm_squared() <= 1.0 {
            return p;
        }
    }
}
