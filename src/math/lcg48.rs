use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5DEE_CE66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;
/// 2^-53, the spacing of doubles in [0, 1) built from 53 random bits.
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// 48-bit linear congruential generator (multiplier `0x5DEECE66D`, addend
/// `0xB`), scrambling its seed with the multiplier on every reseed.
///
/// The deterministic weight initializer re-seeds one of these for every
/// weight entry, so reference weight files can be reproduced exactly.
#[derive(Debug, Clone)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    pub fn new(seed: i64) -> Lcg48 {
        let mut rng = Lcg48 { state: 0 };
        rng.set_seed(seed);
        rng
    }

    /// Resets the generator as if freshly constructed with `seed`.
    pub fn set_seed(&mut self, seed: i64) {
        self.state = (seed as u64 ^ MULTIPLIER) & MASK;
    }

    /// Advances the state and returns its top `bits` bits (1..=32).
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as u32
    }

    /// Uniform double in `[0, 1)` assembled from 26 + 27 random bits.
    pub fn next_double(&mut self) -> f64 {
        let high = u64::from(self.next_bits(26)) << 27;
        let low = u64::from(self.next_bits(27));
        (high + low) as f64 * DOUBLE_UNIT
    }
}

impl RngCore for Lcg48 {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    fn next_u64(&mut self) -> u64 {
        // The high and low words are sign-extended ints before being combined.
        let high = i64::from(self.next_bits(32) as i32) << 32;
        let low = i64::from(self.next_bits(32) as i32);
        high.wrapping_add(low) as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg48 {
    /// Big-endian bytes of the signed 64-bit seed.
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Lcg48 {
        Lcg48::new(i64::from_be_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_sequence_for_seed_zero() {
        let mut rng = Lcg48::new(0);
        assert_eq!(rng.next_double(), 0.730967787376657);
    }

    #[test]
    fn reseeding_restarts_the_sequence() {
        let mut rng = Lcg48::new(1000);
        let first = rng.next_double();
        rng.next_double();
        rng.set_seed(1000);
        assert_eq!(rng.next_double(), first);
        assert_eq!(first, 0.7101849056320707);
    }

    #[test]
    fn negative_seeds_are_accepted() {
        assert_eq!(Lcg48::new(-1000).next_double(), 0.2892776037640664);
    }

    #[test]
    fn seed_bytes_are_big_endian() {
        let mut a = Lcg48::from_seed(1000i64.to_be_bytes());
        let mut b = Lcg48::new(1000);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn fill_bytes_handles_partial_words() {
        let mut rng = Lcg48::new(42);
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);

        let mut check = Lcg48::new(42);
        let first = check.next_u32().to_le_bytes();
        let second = check.next_u32().to_le_bytes();
        assert_eq!(&buf[..4], &first);
        assert_eq!(&buf[4..], &second[..3]);
    }
}
