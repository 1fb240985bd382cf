use nalgebra::{Matrix4, Point3, Vector2, Vector3, Vector4};

use crate::{Error, Ray};

/// Clip planes only shape the inverse mapping; nothing is culled by depth.
const Z_NEAR: f64 = 0.2;
const Z_FAR: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    inverse: Matrix4<f64>,
    position: Vector3<f64>,
}

impl Camera {
    /// World up is +y; `vertical_fov` is in degrees.
    pub fn new(
        position: Vector3<f64>,
        direction: Vector3<f64>,
        aspect_ratio: f64,
        vertical_fov: f64,
    ) -> Result<Self, Error> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(Error::AspectRatio(aspect_ratio));
        }
        if !(vertical_fov > 0.0 && vertical_fov < 180.0) {
            return Err(Error::FieldOfView(vertical_fov));
        }
        let up = Vector3::y();
        let forward = direction
            .try_normalize(f64::EPSILON)
            .filter(|forward| forward.cross(&up).norm_squared() > f64::EPSILON)
            .ok_or(Error::LookDirection {
                x: direction.x,
                y: direction.y,
                z: direction.z,
            })?;

        let projection =
            Matrix4::new_perspective(aspect_ratio, vertical_fov.to_radians(), Z_NEAR, Z_FAR);
        let view = Matrix4::look_at_rh(&Point3::origin(), &Point3::from(forward), &up);
        let inverse = (projection * view)
            .try_inverse()
            .ok_or(Error::SingularTransform)?;

        Ok(Self { inverse, position })
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn gen_ray(&self, uv: &Vector2<f64>) -> Ray {
        let clip = Vector4::new(uv.x, uv.y, 1.0, 1.0);
        let world = self.inverse * clip;
        Ray {
            origin: self.position,
            direction: world.xyz().normalize(),
        }
    }

    pub fn gen_rays(&self, uvs: &[Vector2<f64>]) -> Vec<Ray> {
        uvs.iter().map(|uv| self.gen_ray(uv)).collect()
    }
}
