#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("image must have a non-zero size, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },
    #[error("at least one sample per pixel is required")]
    NoSamples,
    #[error("aspect ratio must be positive and finite, got {0}")]
    AspectRatio(f64),
    #[error("vertical field of view must be between 0 and 180 degrees, got {0}")]
    FieldOfView(f64),
    #[error("look direction ({x}, {y}, {z}) is zero or parallel to world up")]
    LookDirection { x: f64, y: f64, z: f64 },
    #[error("projection-view transform is not invertible")]
    SingularTransform,
    #[error("frame buffer holds {expected} pixels but the pass has {actual}")]
    BufferSize { expected: usize, actual: usize },
    #[error("pixel ({x}, {y}) produced a non-finite sample in pass {pass}")]
    NonFiniteSample { x: usize, y: usize, pass: usize },
    #[error("failed to start render workers")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
