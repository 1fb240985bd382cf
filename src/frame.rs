use nalgebra::Vector3;

use crate::Error;

pub trait Rgba32 {
    fn to_rgba32(&self) -> (u8, u8, u8, u8);
}

impl Rgba32 for Vector3<f64> {
    /// Channels are clamped to [0, 1]; alpha is opaque.
    fn to_rgba32(&self) -> (u8, u8, u8, u8) {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        (channel(self.x), channel(self.y), channel(self.z), u8::MAX)
    }
}

/// Row 0 is v = -1 on the image plane.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    passes: usize,
    pixel_data: Box<[Vector3<f64>]>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            passes: 0,
            pixel_data: vec![Vector3::zeros(); width * height].into_boxed_slice(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn pixel_data(&self) -> &[Vector3<f64>] {
        &self.pixel_data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Vector3<f64> {
        self.pixel_data[x + y * self.width]
    }

    pub fn accumulate(&mut self, pass: &[Vector3<f64>]) -> Result<(), Error> {
        if pass.len() != self.pixel_data.len() {
            return Err(Error::BufferSize {
                expected: self.pixel_data.len(),
                actual: pass.len(),
            });
        }
        for (sum, sample) in self.pixel_data.iter_mut().zip(pass) {
            *sum += sample;
        }
        self.passes += 1;
        Ok(())
    }

    pub fn average(&self) -> Vec<Vector3<f64>> {
        let scale = 1.0 / self.passes.max(1) as f64;
        self.pixel_data.iter().map(|sum| sum * scale).collect()
    }

    /// Rows flipped so the top of the view comes first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let average = self.average();
        let mut bytes = Vec::with_capacity(average.len() * 4);
        for row in average.chunks(self.width.max(1)).rev() {
            for color in row {
                let (r, g, b, a) = color.to_rgba32();
                bytes.extend_from_slice(&[r, g, b, a]);
            }
        }
        bytes
    }

    pub fn clear(&mut self) {
        self.pixel_data.fill(Vector3::zeros());
        self.passes = 0;
    }
}
