use rand::Rng;

use crate::engine::RandomSource;

/// RNG на `thread_rng` для CLI и симуляций.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// RNG с фиксированным seed: стресс-тест и тесты симуляции
/// воспроизводят одни и те же исходы схваток.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    // StdRng стабилен в пределах одной версии rand.
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }
}
