use crate::Generator;
use jiff::Timestamp;
use kurz_core::ShortCode;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use typed_builder::TypedBuilder;

/// The characters a random short code is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated short code.
pub const DEFAULT_LENGTH: usize = 8;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomSettings {
    /// Number of characters in each generated code.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    /// Seed for the RNG. Defaults to the current time in nanoseconds.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
}

/// Generates codes of uniformly random characters from [`ALPHABET`],
/// drawn with replacement.
///
/// The RNG is seeded once, so codes generated in quick succession by the
/// same instance differ even when the clock has not advanced.
#[derive(Debug)]
pub struct RandomGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    pub fn new(settings: RandomSettings) -> Self {
        let seed = settings
            .seed
            .unwrap_or_else(|| Timestamp::now().as_nanosecond() as u64);

        Self {
            length: settings.length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(RandomSettings::builder().build())
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let mut rng = self.rng.lock();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::generated(code)
    }
}
