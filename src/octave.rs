use crate::NoiseError;

/// Octave settings for fractal noise.
///
/// `octaves` layers are summed; layer `k` is sampled at frequency `2^k` and weighted by
/// `persistence^k`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "RawOctaveParameters"))]
pub struct OctaveParameters {
    octaves: u32,
    persistence: f64,
}

#[cfg(feature = "serialize")]
#[derive(serde::Deserialize)]
struct RawOctaveParameters {
    octaves: u32,
    persistence: f64,
}

#[cfg(feature = "serialize")]
impl TryFrom<RawOctaveParameters> for OctaveParameters {
    type Error = NoiseError;

    fn try_from(raw: RawOctaveParameters) -> Result<Self, Self::Error> {
        Self::new(raw.octaves, raw.persistence)
    }
}

impl Default for OctaveParameters {
    fn default() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
        }
    }
}

impl OctaveParameters {
    /// Highest accepted octave count. The top layer is sampled at `2^63` times the
    /// input coordinates.
    pub const MAX_OCTAVES: u32 = 64;

    pub fn new(octaves: u32, persistence: f64) -> Result<Self, NoiseError> {
        if !(1..=Self::MAX_OCTAVES).contains(&octaves) {
            return Err(NoiseError::InvalidOctaveCount(octaves));
        }
        if !persistence.is_finite() || persistence <= 0.0 {
            return Err(NoiseError::InvalidPersistence(persistence));
        }
        let params = Self {
            octaves,
            persistence,
        };
        // the amplitude sum is the normalizing divisor and must not overflow
        if !params.max_value().is_finite() {
            return Err(NoiseError::InvalidPersistence(persistence));
        }
        Ok(params)
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    /// `(frequency, amplitude)` of every layer, starting from `(1.0, 1.0)`.
    pub fn layers(&self) -> impl Iterator<Item = (f64, f64)> {
        let persistence = self.persistence;
        std::iter::successors(Some((1.0, 1.0)), move |&(frequency, amplitude)| {
            Some((frequency * 2.0, amplitude * persistence))
        })
        .take(self.octaves as usize)
    }

    /// Sum of all layer amplitudes, the divisor that brings the octave sum back to \[0, 1\].
    pub fn max_value(&self) -> f64 {
        self.layers().map(|(_, amplitude)| amplitude).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(OctaveParameters::new(1, 0.5).is_ok());
        assert!(OctaveParameters::new(12, 3.0).is_ok());
        assert_eq!(
            OctaveParameters::new(0, 0.5),
            Err(NoiseError::InvalidOctaveCount(0))
        );
        assert_eq!(
            OctaveParameters::new(2, 0.0),
            Err(NoiseError::InvalidPersistence(0.0))
        );
        assert!(OctaveParameters::new(2, f64::INFINITY).is_err());
    }

    #[test]
    fn test_new_rejects_overflowing_layers() {
        assert!(OctaveParameters::new(OctaveParameters::MAX_OCTAVES, 0.5).is_ok());
        assert_eq!(
            OctaveParameters::new(OctaveParameters::MAX_OCTAVES + 1, 0.5),
            Err(NoiseError::InvalidOctaveCount(65))
        );
        assert_eq!(
            OctaveParameters::new(1100, 0.5),
            Err(NoiseError::InvalidOctaveCount(1100))
        );
        assert_eq!(
            OctaveParameters::new(3, 1e300),
            Err(NoiseError::InvalidPersistence(1e300))
        );
        // a single layer never multiplies by the persistence
        assert!(OctaveParameters::new(1, 1e300).is_ok());
    }

    #[test]
    fn test_layers() {
        let params = OctaveParameters::new(4, 0.5).unwrap();
        let layers = params.layers().collect::<Vec<_>>();
        assert_eq!(
            layers,
            vec![(1.0, 1.0), (2.0, 0.5), (4.0, 0.25), (8.0, 0.125)]
        );
        assert_eq!(params.max_value(), 1.875);
    }

    #[test]
    fn test_single_octave_max_value() {
        for &persistence in &[0.1, 1.0, 7.5] {
            let params = OctaveParameters::new(1, persistence).unwrap();
            assert_eq!(params.max_value(), 1.0);
        }
    }

    #[test]
    fn test_default() {
        let params = OctaveParameters::default();
        assert_eq!(params.octaves(), 1);
        assert_eq!(params.persistence(), 0.5);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_cbor_config() {
        let params = OctaveParameters::new(6, 0.65).unwrap();
        let bytes = serde_cbor::to_vec(&params).unwrap();
        let decoded: OctaveParameters = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(params, decoded);

        #[derive(serde::Serialize)]
        struct Wire {
            octaves: u32,
            persistence: f64,
        }
        for (octaves, persistence) in [(0, 0.5), (3, -0.5), (200, 0.5), (3, 1e300)] {
            let bytes = serde_cbor::to_vec(&Wire {
                octaves,
                persistence,
            })
            .unwrap();
            let decoded = serde_cbor::from_slice::<OctaveParameters>(&bytes);
            assert!(decoded.is_err(), "{} octaves, {} persistence", octaves, persistence);
        }
    }
}
