//! Random generation of geometry: a single trait with one required,
//! infallible method, implemented here for the plain geometry primitives
//! and by `ricochet_surfaces` for the concrete surface types.

pub use rand;

use ricochet_core::{Segment, Vector};

pub trait Random {
    /// Generate a randomized instance of `Self` using the provided `rng`.
    ///
    /// This method must not fail. If construction is fallible (e.g. a
    /// degenerate segment), keep retrying until it succeeds.
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self
    where
        Self: Sized;
}

/// A random point with each coordinate drawn uniformly from
/// `-max_coord_mag..max_coord_mag`.
pub fn rand_vector(rng: &mut (impl rand::Rng + ?Sized), max_coord_mag: f64) -> Vector {
    let x = (rng.gen::<f64>() - 0.5) * (max_coord_mag.abs() * 2.0);
    let y = (rng.gen::<f64>() - 0.5) * (max_coord_mag.abs() * 2.0);
    Vector::new(x, y)
}

impl Random for Vector {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        rand_vector(rng, 500.0)
    }
}

/// A random segment, within `-500.0..500.0` on each axis, retried until
/// non-degenerate.
impl Random for Segment {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let seg = Segment::new(rand_vector(rng, 500.0), rand_vector(rng, 500.0));
            if !seg.is_degenerate() {
                break seg;
            }
        }
    }
}

/// A random count of independently-random `T`, sized uniformly within
/// `[min, max)`.
pub fn random_collection<T: Random>(rng: &mut (impl rand::Rng + ?Sized), min: usize, max: usize) -> Vec<T> {
    let count = rng.gen_range(min..max);
    (0..count).map(|_| T::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn random_segment_is_never_degenerate() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let seg = Segment::random(&mut rng);
            assert!(!seg.is_degenerate());
        }
    }

    #[test]
    fn random_collection_respects_its_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let items: Vec<Vector> = random_collection(&mut rng, 3, 10);
        assert!(items.len() >= 3 && items.len() < 10);
    }
}
