use ::noise::{NoiseFn, Perlin};

/// Deterministic 2-D coherent noise in `[-1, 1]`.
pub trait NoiseSource {
    fn noise(&self, x: f64, y: f64) -> f64;

    /// Sample with degenerate responses tolerated: NaN/inf become 0, the rest is clamped.
    fn sample(&self, x: f64, y: f64) -> f64 {
        let value = self.noise(x, y);
        if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            tracing::warn!(x, y, "noise source returned a non-finite sample, using 0");
            0.0
        }
    }
}

/// Adapter for any 2-D function from the `noise` crate.
#[derive(Clone, Debug)]
pub struct CoherentNoise<N>(pub N);

impl CoherentNoise<Perlin> {
    pub fn perlin(seed: u32) -> Self {
        CoherentNoise(Perlin::new(seed))
    }
}

impl<N: NoiseFn<f64, 2>> NoiseSource for CoherentNoise<N> {
    fn noise(&self, x: f64, y: f64) -> f64 {
        self.0.get([x, y])
    }
}

/// Same value everywhere; gives flat worlds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn noise(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}
