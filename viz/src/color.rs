use image::Rgb;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Yields a box color when the caller does not supply one.
pub trait ColorSource {
    fn next_color(&mut self) -> Rgb<u8>;
}

/// Uniform random colors from any [`rand`] generator.
#[derive(Debug, Clone)]
pub struct RandomColors<R> {
    rng: R,
}

impl<R> RandomColors<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColors<StdRng> {
    /// Seeded source; the same seed reproduces the same color sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R> ColorSource for RandomColors<R>
where
    R: Rng,
{
    fn next_color(&mut self) -> Rgb<u8> {
        Rgb([self.rng.gen(), self.rng.gen(), self.rng.gen()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_colors_are_reproducible() {
        let mut first = RandomColors::from_seed(42);
        let mut second = RandomColors::from_seed(42);
        for _ in 0..8 {
            assert_eq!(first.next_color(), second.next_color());
        }
    }
}
