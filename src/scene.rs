use core::ops::RangeInclusive;

use crate::{
    hit::{Hit, Intersect},
    Primitive, Ray,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl<P: Into<Primitive>> FromIterator<P> for Scene {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Intersect for Scene {
    /// On an exact tie the primitive pushed first wins.
    fn intersect(&self, ray: Ray, interval: RangeInclusive<f64>) -> Option<Hit<'_>> {
        let t_min = *interval.start();
        let mut closest = *interval.end();
        let mut nearest = None;

        for primitive in &self.primitives {
            if let Some(hit) = primitive.intersect(ray, t_min..=closest) {
                if nearest.is_none() || hit.distance < closest {
                    closest = hit.distance;
                    nearest = Some(hit);
                }
            }
        }

        nearest
    }
}
