use std::sync::Arc;

use nalgebra::Vector3;
use pathtracer::{sky, trace, Camera, Engine, Material, RenderSettings, Scene, Sphere};

const WIDTH: usize = 9;
const HEIGHT: usize = 9;

fn settings(samples: usize, max_bounces: usize) -> RenderSettings {
    RenderSettings {
        width: WIDTH,
        height: HEIGHT,
        samples,
        max_bounces,
        seed: 1234,
        threads: 0,
    }
}

fn single_sphere() -> (Camera, Scene) {
    let camera = Camera::new(Vector3::new(-1.5, 0.0, 0.0), Vector3::x(), 1.0, 90.0).unwrap();
    let scene = Scene::from_iter([Sphere::new(
        Vector3::zeros(),
        0.5,
        Arc::new(Material::diffuse(Vector3::new(0.7, 0.3, 0.3))),
    )]);
    (camera, scene)
}

#[test]
fn center_hits_sphere_and_corner_sees_sky() {
    let (camera, scene) = single_sphere();
    let engine = Engine::new(&camera, &scene, settings(1, 1)).unwrap();
    let mut buffer = engine.frame_buffer();
    engine.trace(&mut buffer).unwrap();

    let center = buffer.pixel(WIDTH / 2, HEIGHT / 2);
    assert!(center.iter().all(|c| *c > 0.0), "center is {center:?}");

    let corner_uv = engine.pixel_uvs(0)[0];
    let corner_ray = camera.gen_ray(&corner_uv);
    assert_eq!(buffer.pixel(0, 0), sky(&corner_ray));
}

#[test]
fn zero_bounce_budget_still_sees_sky_but_not_sphere() {
    let (camera, scene) = single_sphere();
    let engine = Engine::new(&camera, &scene, settings(1, 0)).unwrap();
    let mut buffer = engine.frame_buffer();
    engine.trace(&mut buffer).unwrap();

    assert_eq!(buffer.pixel(WIDTH / 2, HEIGHT / 2), Vector3::zeros());
    let corner_ray = camera.gen_ray(&engine.pixel_uvs(0)[0]);
    assert_eq!(buffer.pixel(0, 0), sky(&corner_ray));
}

#[test]
fn accumulation_equals_sum_of_single_passes() {
    let (camera, scene) = single_sphere();
    let engine = Engine::new(&camera, &scene, settings(3, 4)).unwrap();
    let mut buffer = engine.frame_buffer();
    engine.trace(&mut buffer).unwrap();
    assert_eq!(buffer.passes(), 3);

    let passes: Vec<_> = (0..3).map(|pass| engine.render_pass(pass).unwrap()).collect();

    let mut in_order = engine.frame_buffer();
    for pass in &passes {
        in_order.accumulate(pass).unwrap();
    }
    assert_eq!(in_order.pixel_data(), buffer.pixel_data());

    let mut reversed = engine.frame_buffer();
    for pass in passes.iter().rev() {
        reversed.accumulate(pass).unwrap();
    }
    for (a, b) in reversed.pixel_data().iter().zip(buffer.pixel_data()) {
        assert!((a - b).norm() < 1e-12);
    }
}

#[test]
fn fixed_seed_is_deterministic() {
    let (camera, scene) = single_sphere();

    let mut first = pathtracer::FrameBuffer::new(WIDTH, HEIGHT);
    trace(&mut first, &camera, &scene, settings(2, 6)).unwrap();
    let mut second = pathtracer::FrameBuffer::new(WIDTH, HEIGHT);
    trace(&mut second, &camera, &scene, settings(2, 6)).unwrap();
    assert_eq!(first, second);

    let mut other = pathtracer::FrameBuffer::new(WIDTH, HEIGHT);
    let reseeded = RenderSettings {
        seed: 99,
        ..settings(2, 6)
    };
    trace(&mut other, &camera, &scene, reseeded).unwrap();
    assert_ne!(first, other);
}

#[test]
fn averaged_colors_stay_in_unit_range() {
    let camera = Camera::new(Vector3::new(-2.0, 0.0, 0.0), Vector3::x(), 1.0, 90.0).unwrap();
    let scene = Scene::from_iter([
        Sphere::new(
            Vector3::zeros(),
            0.5,
            Arc::new(Material::diffuse(Vector3::new(0.7, 0.3, 0.3))),
        ),
        Sphere::new(
            Vector3::new(0.0, -100.5, 0.0),
            100.0,
            Arc::new(Material::diffuse(Vector3::new(0.21, 0.37, 0.69))),
        ),
        Sphere::new(
            Vector3::new(0.0, 0.2, -1.0),
            0.3,
            Arc::new(Material::fuzzy_metallic(Vector3::new(0.8, 0.8, 0.8), 0.1)),
        ),
        Sphere::new(Vector3::new(0.0, 0.0, 1.0), 0.4, Arc::new(Material::refractive(1.5))),
    ]);
    let mut buffer = pathtracer::FrameBuffer::new(WIDTH, HEIGHT);
    trace(&mut buffer, &camera, &scene, settings(4, 8)).unwrap();

    for color in buffer.average() {
        assert!(color.iter().all(|c| (0.0..=1.0).contains(c)), "{color:?}");
    }
}
