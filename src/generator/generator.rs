use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::bounds::Bounds;
use crate::model::{self, MetricSample, SampleValue, Timestamp};

const CPU_MEAN: SampleValue = 70.0;
const CPU_STDDEV: SampleValue = 20.0;
const MEMORY_RANGE: (SampleValue, SampleValue) = (70.0, 90.0);
const DISK_RANGE: (SampleValue, SampleValue) = (50.0, 70.0);
const NETWORK_MEAN: SampleValue = 1000.0;
const NETWORK_STDDEV: SampleValue = 50.0;

/// Draws synthetic samples:
///
///   cpu     ~ Normal(70, 20)
///   memory  ~ Uniform[70, 90)
///   disk    ~ Uniform[50, 70)
///   network ~ Normal(1000, 50)
pub struct Generator<R> {
    rng: R,
    bounds: Bounds,
}

impl Generator<StdRng> {
    /// Seeds from the current wall-clock time. Runs are not reproducible.
    pub fn new(bounds: Bounds) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        log::debug!("seeding sample generator with {}", seed);
        Self::seeded(seed, bounds)
    }

    pub fn seeded(seed: u64, bounds: Bounds) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), bounds)
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(rng: R, bounds: Bounds) -> Self {
        Self { rng, bounds }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn generate(&mut self) -> MetricSample {
        self.generate_at(model::now())
    }

    pub fn generate_at(&mut self, time: Timestamp) -> MetricSample {
        let cpu = self.normal(CPU_MEAN, CPU_STDDEV);
        let memory = self.uniform(MEMORY_RANGE);
        let disk = self.uniform(DISK_RANGE);
        let network = self.normal(NETWORK_MEAN, NETWORK_STDDEV);

        MetricSample::new(
            self.bounds.percent(cpu),
            self.bounds.percent(memory),
            self.bounds.percent(disk),
            self.bounds.throughput(network),
            time,
        )
    }

    #[inline]
    fn normal(&mut self, mean: SampleValue, stddev: SampleValue) -> SampleValue {
        let z: SampleValue = self.rng.sample(StandardNormal);
        z * stddev + mean
    }

    #[inline]
    fn uniform(&mut self, (low, high): (SampleValue, SampleValue)) -> SampleValue {
        self.rng.gen_range(low..high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWS: usize = 10_000;

    fn fixed_time() -> Timestamp {
        model::now()
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let time = fixed_time();
        let mut a = Generator::seeded(42, Bounds::Unbounded);
        let mut b = Generator::seeded(42, Bounds::Unbounded);

        for _ in 0..100 {
            assert_eq!(a.generate_at(time), b.generate_at(time));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let time = fixed_time();
        let mut a = Generator::seeded(1, Bounds::Unbounded);
        let mut b = Generator::seeded(2, Bounds::Unbounded);

        assert_ne!(a.generate_at(time), b.generate_at(time));
    }

    #[test]
    fn test_uniform_fields_stay_in_support() {
        let time = fixed_time();
        let mut gen = Generator::seeded(7, Bounds::Unbounded);

        for _ in 0..DRAWS {
            let s = gen.generate_at(time);
            assert!(s.memory() >= 70.0 && s.memory() < 90.0, "memory {}", s.memory());
            assert!(s.disk() >= 50.0 && s.disk() < 70.0, "disk {}", s.disk());
        }
    }

    #[test]
    fn test_distribution_centers() {
        let time = fixed_time();
        let mut gen = Generator::seeded(1337, Bounds::Unbounded);

        let mut sums = [0.0; 4];
        for _ in 0..DRAWS {
            let s = gen.generate_at(time);
            for (i, (_, v)) in s.values().iter().enumerate() {
                sums[i] += v;
            }
        }
        let means: Vec<f64> = sums.iter().map(|s| s / DRAWS as f64).collect();

        assert!((means[0] - 70.0).abs() < 1.5, "cpu mean {}", means[0]);
        assert!((means[1] - 80.0).abs() < 0.5, "memory mean {}", means[1]);
        assert!((means[2] - 60.0).abs() < 0.5, "disk mean {}", means[2]);
        assert!((means[3] - 1000.0).abs() < 3.0, "network mean {}", means[3]);
    }

    #[test]
    fn test_unbounded_keeps_out_of_range_draws() {
        let time = fixed_time();
        let mut gen = Generator::seeded(99, Bounds::Unbounded);

        // P(cpu > 100) is ~6.7% per draw.
        let over = (0..DRAWS)
            .map(|_| gen.generate_at(time))
            .filter(|s| s.cpu() > 100.0)
            .count();
        assert!(over > 0);
    }

    #[test]
    fn test_clamped_stays_in_range() {
        let time = fixed_time();
        let mut gen = Generator::seeded(99, Bounds::Clamped);

        for _ in 0..DRAWS {
            let s = gen.generate_at(time);
            assert!(s.cpu() >= 0.0 && s.cpu() <= 100.0, "cpu {}", s.cpu());
            assert!(s.network() >= 0.0);
        }
    }

    #[test]
    fn test_generate_stamps_current_time() {
        let before = model::now();
        let s = Generator::new(Bounds::default()).generate();
        let after = model::now();

        assert!(before <= s.time() && s.time() <= after);
    }
}
