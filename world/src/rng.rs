//! Seed-phrase random source backing maze generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic stream of fractions in `[0, 1)` derived from a seed phrase.
///
/// Identical phrases yield identical streams byte-for-byte on every platform
/// and run: the phrase is folded into a 64-bit FNV-1a hash that seeds a
/// portable ChaCha8 stream. Each generation decision consumes exactly one
/// fraction, in this order: start row, start column, one per neighbor
/// choice as carving proceeds, then one for the exit cell.
#[derive(Clone, Debug)]
pub(crate) struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Creates a source from the seed phrase, typically the concatenated
    /// participant names.
    pub(crate) fn from_seed_phrase(phrase: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in phrase.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self {
            rng: ChaCha8Rng::seed_from_u64(hash),
        }
    }

    /// Next fraction in `[0, 1)`.
    pub(crate) fn next_fraction(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Integer drawn uniformly from `lo..=hi`, consuming one fraction.
    pub(crate) fn int_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi, "int_in_range requires an ordered range");
        let span = u64::from(hi - lo) + 1;
        lo + (self.next_fraction() * span as f64) as u32
    }

    /// Index drawn uniformly from a non-empty collection of `len` items,
    /// consuming one fraction.
    pub(crate) fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index requires a non-empty collection");
        let index = (self.next_fraction() * len as f64) as usize;
        index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomSource;

    #[test]
    fn identical_phrases_yield_identical_streams() {
        let mut first = RandomSource::from_seed_phrase("romeo-juliet");
        let mut second = RandomSource::from_seed_phrase("romeo-juliet");
        for _ in 0..64 {
            assert_eq!(first.next_fraction().to_bits(), second.next_fraction().to_bits());
        }
    }

    #[test]
    fn different_phrases_diverge() {
        let mut first = RandomSource::from_seed_phrase("romeo-juliet");
        let mut second = RandomSource::from_seed_phrase("juliet-romeo");
        let diverged = (0..16).any(|_| first.next_fraction() != second.next_fraction());
        assert!(diverged);
    }

    #[test]
    fn fractions_stay_in_the_half_open_unit_interval() {
        let mut source = RandomSource::from_seed_phrase("A-B");
        for _ in 0..256 {
            let fraction = source.next_fraction();
            assert!((0.0..1.0).contains(&fraction));
        }
    }

    #[test]
    fn range_draws_respect_inclusive_bounds() {
        let mut source = RandomSource::from_seed_phrase("bounds");
        for _ in 0..256 {
            let value = source.int_in_range(2, 7);
            assert!((2..=7).contains(&value));
        }
        assert_eq!(source.int_in_range(5, 5), 5);
    }

    #[test]
    fn picked_indices_stay_in_range() {
        let mut source = RandomSource::from_seed_phrase("indices");
        for _ in 0..256 {
            assert!(source.pick_index(4) < 4);
        }
        assert_eq!(source.pick_index(1), 0);
    }
}
