use std::time::{Duration, Instant};

use log::{debug, info};
use nalgebra::{Vector2, Vector3};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

use crate::{hit::Intersect, Camera, Error, FrameBuffer, Ray, Scene};

/// Lower bound on hit distance, keeps bounced rays off their own surface.
const T_MIN: f64 = 0.001;

const JITTER_LANE: u64 = 1;
const BOUNCE_LANE: u64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples: usize,
    /// Scatter events a path may take after the primary hit.
    pub max_bounces: usize,
    pub seed: u64,
    /// Worker count, 0 lets rayon decide.
    pub threads: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            samples: 32,
            max_bounces: 8,
            seed: 0,
            threads: 0,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples == 0 {
            return Err(Error::NoSamples);
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassReport {
    /// Passes completed in this call, starting at 1.
    pub pass: usize,
    pub total: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub passes: usize,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn time_per_sample(&self) -> Duration {
        match u32::try_from(self.passes) {
            Ok(0) => Duration::ZERO,
            Ok(passes) => self.elapsed / passes,
            Err(_) => self.elapsed.div_f64(self.passes as f64),
        }
    }
}

pub struct Engine<'a> {
    camera: &'a Camera,
    scene: &'a Scene,
    settings: RenderSettings,
    pool: ThreadPool,
}

impl<'a> Engine<'a> {
    pub fn new(
        camera: &'a Camera,
        scene: &'a Scene,
        settings: RenderSettings,
    ) -> Result<Self, Error> {
        settings.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .thread_name(|index| format!("shade-{index}"))
            .build()?;
        Ok(Self {
            camera,
            scene,
            settings,
            pool,
        })
    }

    pub fn frame_buffer(&self) -> FrameBuffer {
        FrameBuffer::new(self.settings.width, self.settings.height)
    }

    /// Row major, each axis in [-1, 1].
    pub fn pixel_uvs(&self, pass: usize) -> Vec<Vector2<f64>> {
        let RenderSettings {
            width,
            height,
            seed,
            ..
        } = self.settings;
        let size = Vector2::new(width as f64, height as f64);
        self.pool.install(|| {
            (0..width * height)
                .into_par_iter()
                .map(|index| {
                    let mut rng = pixel_rng(seed, pass, index, JITTER_LANE);
                    let coord = Vector2::new((index % width) as f64, (index / width) as f64);
                    let jitter = Vector2::new(rng.gen::<f64>(), rng.gen::<f64>());
                    ((coord + jitter).component_div(&size) - Vector2::repeat(0.5)) * 2.0
                })
                .collect()
        })
    }

    pub fn render_pass(&self, pass: usize) -> Result<Vec<Vector3<f64>>, Error> {
        let rays = self.camera.gen_rays(&self.pixel_uvs(pass));
        let RenderSettings {
            width,
            seed,
            max_bounces,
            ..
        } = self.settings;
        self.pool.install(|| {
            rays.par_iter()
                .enumerate()
                .map(|(index, ray)| {
                    let mut rng = pixel_rng(seed, pass, index, BOUNCE_LANE);
                    let color = shade(*ray, self.scene, max_bounces + 1, &mut rng);
                    if color.iter().all(|c| c.is_finite()) {
                        Ok(color)
                    } else {
                        Err(Error::NonFiniteSample {
                            x: index % width,
                            y: index / width,
                            pass,
                        })
                    }
                })
                .collect()
        })
    }

    pub fn trace(&self, buffer: &mut FrameBuffer) -> Result<RenderStats, Error> {
        self.trace_with(buffer, |_, _| {})
    }

    /// Passes continue the buffer's pass count, so tracing twice into the
    /// same buffer never repeats a random stream.
    pub fn trace_with<F>(
        &self,
        buffer: &mut FrameBuffer,
        mut observer: F,
    ) -> Result<RenderStats, Error>
    where
        F: FnMut(&PassReport, &FrameBuffer),
    {
        let expected = self.settings.pixel_count();
        let actual = buffer.width() * buffer.height();
        if buffer.width() != self.settings.width || actual != expected {
            return Err(Error::BufferSize { expected, actual });
        }

        info!(
            "rendering {}x{}, {} samples, {} bounces, {} primitives on {} threads",
            self.settings.width,
            self.settings.height,
            self.settings.samples,
            self.settings.max_bounces,
            self.scene.len(),
            self.pool.current_num_threads()
        );

        let start = Instant::now();
        for pass in 1..=self.settings.samples {
            let pass_start = Instant::now();
            let colors = self.render_pass(buffer.passes())?;
            buffer.accumulate(&colors)?;
            let report = PassReport {
                pass,
                total: self.settings.samples,
                elapsed: pass_start.elapsed(),
            };
            debug!("pass {}/{} took {:?}", report.pass, report.total, report.elapsed);
            observer(&report, buffer);
        }

        let stats = RenderStats {
            passes: self.settings.samples,
            elapsed: start.elapsed(),
        };
        info!(
            "render finished in {:?} ({:?} per sample)",
            stats.elapsed,
            stats.time_per_sample()
        );
        Ok(stats)
    }
}

pub fn trace(
    buffer: &mut FrameBuffer,
    camera: &Camera,
    scene: &Scene,
    settings: RenderSettings,
) -> Result<RenderStats, Error> {
    Engine::new(camera, scene, settings)?.trace(buffer)
}

/// Follows at most `depth` ray segments.
pub fn shade<R: Rng>(ray: Ray, scene: &Scene, depth: usize, rng: &mut R) -> Vector3<f64> {
    let mut ray = ray;
    let mut throughput = Vector3::repeat(1.0);

    for _ in 0..depth {
        let Some(hit) = scene.intersect(ray, T_MIN..=f64::INFINITY) else {
            return throughput.component_mul(&sky(&ray));
        };
        match hit.material.scatter(&ray, &hit, rng) {
            Some(scatter) => {
                throughput.component_mul_assign(&scatter.attenuation);
                ray = scatter.ray;
            }
            None => return Vector3::zeros(),
        }
    }

    Vector3::zeros()
}

pub fn sky(ray: &Ray) -> Vector3<f64> {
    let t = (ray.direction.normalize().y + 1.0) * 0.5;
    Vector3::repeat(1.0).lerp(&Vector3::new(0.5, 0.7, 1.0), t)
}

fn pixel_rng(seed: u64, pass: usize, index: usize, lane: u64) -> SmallRng {
    let key = seed
        ^ (pass as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (index as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
        ^ lane.wrapping_mul(0x94D0_49BB_1331_11EB);
    SmallRng::seed_from_u64(key)
}
