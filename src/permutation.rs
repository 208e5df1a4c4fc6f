use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::NoiseError;

/// Ken Perlin's reference permutation of 0..=255.
#[rustfmt::skip]
pub const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91,  90,  15,  131, 13,  201, 95,  96,  53,  194, 233, 7,   225,
    140, 36,  103, 30,  69,  142, 8,   99,  37,  240, 21,  10,  23,  190, 6,   148,
    247, 120, 234, 75,  0,   26,  197, 62,  94,  252, 219, 203, 117, 35,  11,  32,
    57,  177, 33,  88,  237, 149, 56,  87,  174, 20,  125, 136, 171, 168, 68,  175,
    74,  165, 71,  134, 139, 48,  27,  166, 77,  146, 158, 231, 83,  111, 229, 122,
    60,  211, 133, 230, 220, 105, 92,  41,  55,  46,  245, 40,  244, 102, 143, 54,
    65,  25,  63,  161, 1,   216, 80,  73,  209, 76,  132, 187, 208, 89,  18,  169,
    200, 196, 135, 130, 116, 188, 159, 86,  164, 100, 109, 198, 173, 186, 3,   64,
    52,  217, 226, 250, 124, 123, 5,   202, 38,  147, 118, 126, 255, 82,  85,  212,
    207, 206, 59,  227, 47,  16,  58,  17,  182, 189, 28,  42,  223, 183, 170, 213,
    119, 248, 152, 2,   44,  154, 163, 70,  221, 153, 101, 155, 167, 43,  172, 9,
    129, 22,  39,  253, 19,  98,  108, 110, 79,  113, 224, 232, 178, 185, 112, 104,
    218, 246, 97,  228, 251, 34,  242, 193, 238, 210, 144, 12,  191, 179, 162, 241,
    81,  51,  145, 235, 249, 14,  239, 107, 49,  192, 214, 31,  181, 199, 106, 157,
    184, 84,  204, 176, 115, 121, 50,  45,  127, 4,   150, 254, 138, 236, 205, 93,
    222, 114, 67,  29,  24,  72,  243, 141, 128, 195, 78,  66,  215, 61,  156, 180,
];

static REFERENCE_TABLE: PermutationTable = PermutationTable::doubled_from(REFERENCE_PERMUTATION);

/// Hash table for lattice coordinates.
///
/// Holds a base permutation of 0..=255 repeated twice, so that chained lookups of the
/// form `p[p[p[x] + y] + z]` with `x, y, z` in \[0, 256\] never leave the table.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    doubled: [u8; 512],
}

impl PermutationTable {
    const fn doubled_from(base: [u8; 256]) -> Self {
        let mut doubled = [0; 512];
        let mut i = 0;
        while i < 512 {
            doubled[i] = base[i % 256];
            i += 1;
        }
        Self { doubled }
    }

    /// The table built from [`REFERENCE_PERMUTATION`].
    pub fn reference() -> &'static Self {
        &REFERENCE_TABLE
    }

    /// Build a table from a custom base permutation.
    pub fn from_base(base: [u8; 256]) -> Result<Self, NoiseError> {
        let mut seen = [false; 256];
        for &value in base.iter() {
            if seen[value as usize] {
                return Err(NoiseError::InvalidPermutation(value));
            }
            seen[value as usize] = true;
        }
        Ok(Self::doubled_from(base))
    }

    /// Build a reproducible shuffled table. The same seed always yields the same table.
    pub fn from_seed(seed: u64) -> Self {
        let mut base = [0u8; 256];
        for (i, value) in base.iter_mut().enumerate() {
            *value = i as u8;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        base.shuffle(&mut rng);
        debug!("built shuffled permutation table from seed {}", seed);
        Self::doubled_from(base)
    }

    /// Look up `doubled[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside \[0, 511\]. Lattice hashing never produces such an
    /// index, so reaching it means the caller's arithmetic is broken.
    #[inline]
    pub fn hash_index(&self, i: usize) -> usize {
        match self.try_hash_index(i) {
            Ok(hash) => hash,
            Err(e) => panic!("{}", e),
        }
    }

    #[inline]
    pub fn try_hash_index(&self, i: usize) -> Result<usize, NoiseError> {
        self.doubled
            .get(i)
            .map(|&hash| hash as usize)
            .ok_or(NoiseError::InvalidIndex(i))
    }

    pub fn base(&self) -> &[u8] {
        &self.doubled[..256]
    }

    pub fn doubled(&self) -> &[u8; 512] {
        &self.doubled
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        REFERENCE_TABLE.clone()
    }
}
