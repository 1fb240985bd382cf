use std::sync::Arc;

use nalgebra::Vector3;
use pathtracer::{Material, Scene, Sphere};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const GRID_SIZE: usize = 16;
const GRID_RADIUS: f64 = 0.3;

pub fn spheres() -> Scene {
    let red = Arc::new(Material::diffuse(Vector3::new(0.7, 0.3, 0.3)));
    let ground = Arc::new(Material::diffuse(Vector3::new(0.21, 0.37, 0.69)));
    let mirror = Arc::new(Material::metallic(Vector3::new(0.8, 0.8, 0.8)));
    let glass = Arc::new(Material::refractive(1.5));

    Scene::from_iter([
        Sphere::new(Vector3::zeros(), 0.5, red),
        Sphere::new(Vector3::new(0.0, -100.5, 0.0), 100.0, ground),
        Sphere::new(Vector3::new(0.0, 0.2, -1.0), 0.3, mirror),
        Sphere::new(Vector3::new(0.0, 0.0, 1.0), 0.4, glass),
    ])
}

pub fn grid(seed: u64) -> Scene {
    let mut rng = SmallRng::seed_from_u64(seed);
    let half = (GRID_SIZE / 2) as f64;
    let mut scene = Scene::new();

    for x in 0..GRID_SIZE {
        for y in 0..GRID_SIZE {
            for z in 0..GRID_SIZE {
                let center = Vector3::new(
                    2.0 * x as f64,
                    2.0 * y as f64 - half,
                    2.0 * z as f64 - half,
                ) + Vector3::from_fn(|_, _| rng.gen_range(-0.5..0.5));
                let material = random_material(&mut rng);
                scene.push(Sphere::new(center, GRID_RADIUS, Arc::new(material)));
            }
        }
    }

    scene
}

fn random_material(rng: &mut SmallRng) -> Material {
    match rng.gen_range(0..3) {
        0 => Material::diffuse(random_albedo(rng)),
        1 => {
            let albedo = random_albedo(rng);
            Material::fuzzy_metallic(albedo, rng.gen_range(0.0..0.5))
        }
        _ => Material::refractive(1.0 + rng.gen::<f64>()),
    }
}

fn random_albedo(rng: &mut SmallRng) -> Vector3<f64> {
    Vector3::from_fn(|_, _| rng.gen::<f64>())
}
