//! Progressive CPU path tracer for scenes of spheres.

mod camera;
mod engine;
mod error;
mod frame;
mod hit;
mod material;
mod primitive;
mod ray;
mod scene;
mod sphere;

pub use camera::Camera;
pub use engine::{shade, sky, trace, Engine, PassReport, RenderSettings, RenderStats};
pub use error::Error;
pub use frame::{FrameBuffer, Rgba32};
pub use hit::{Hit, Intersect};
pub use material::{random_in_unit_sphere, Material, Scatter};
pub use primitive::Primitive;
pub use ray::{reflect, refract, Ray};
pub use scene::Scene;
pub use sphere::Sphere;
