use log::debug;

use crate::{NoiseError, NoiseField, OctaveParameters};

/// Sampling grid for rendering a noise image.
///
/// Pixel `(ix, iy)` is sampled at `(ix / scale, iy / scale, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "RawRenderParameters"))]
pub struct RenderParameters {
    width: usize,
    height: usize,
    scale: f64,
    z: f64,
}

#[cfg(feature = "serialize")]
#[derive(serde::Deserialize)]
struct RawRenderParameters {
    width: usize,
    height: usize,
    scale: f64,
    z: f64,
}

#[cfg(feature = "serialize")]
impl TryFrom<RawRenderParameters> for RenderParameters {
    type Error = NoiseError;

    fn try_from(raw: RawRenderParameters) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.scale, raw.z)
    }
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            scale: 255.0,
            z: 0.5,
        }
    }
}

impl RenderParameters {
    pub fn new(width: usize, height: usize, scale: f64, z: f64) -> Result<Self, NoiseError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(NoiseError::InvalidScale(scale));
        }
        if !z.is_finite() {
            return Err(NoiseError::InvalidDepth(z));
        }
        Ok(Self {
            width,
            height,
            scale,
            z,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    fn coordinate(&self, i: usize) -> f64 {
        i as f64 / self.scale
    }
}

/// Row-major grid of noise values in \[0, 1\].
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl NoiseGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.width || iy >= self.height {
            return None;
        }
        self.values.get(iy * self.width + ix).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics
        self.values.chunks(self.width.max(1))
    }

    /// Map every value to an 8-bit intensity, `round(v * 255)`.
    pub fn to_intensities(&self) -> Vec<u8> {
        self.values
            .iter()
            .map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    }
}

impl<'t> NoiseField<'t> {
    fn render_row(
        &self,
        iy: usize,
        row: &mut [f64],
        grid: &RenderParameters,
        octaves: &OctaveParameters,
    ) {
        let y = grid.coordinate(iy);
        for (ix, value) in row.iter_mut().enumerate() {
            *value = self.sample_fractal(grid.coordinate(ix), y, grid.z, octaves);
        }
    }

    /// Evaluate every pixel of `grid` on the current thread.
    pub fn render(&self, grid: &RenderParameters, octaves: &OctaveParameters) -> NoiseGrid {
        debug!(
            "rendering {}x{} grid ({} octaves, persistence {})",
            grid.width,
            grid.height,
            octaves.octaves(),
            octaves.persistence()
        );
        let mut values = vec![0.0; grid.width * grid.height];
        if grid.width > 0 {
            for (iy, row) in values.chunks_mut(grid.width).enumerate() {
                self.render_row(iy, row, grid, octaves);
            }
        }
        debug!("rendered {} samples", values.len());
        NoiseGrid {
            width: grid.width,
            height: grid.height,
            values,
        }
    }

    /// Evaluate every pixel of `grid`, one row per rayon task.
    /// The output is identical to [`NoiseField::render`].
    #[cfg(feature = "rayon")]
    pub fn render_par(&self, grid: &RenderParameters, octaves: &OctaveParameters) -> NoiseGrid {
        use rayon::prelude::*;

        debug!(
            "rendering {}x{} grid in parallel ({} octaves, persistence {})",
            grid.width,
            grid.height,
            octaves.octaves(),
            octaves.persistence()
        );
        let mut values = vec![0.0; grid.width * grid.height];
        if grid.width > 0 {
            values
                .par_chunks_mut(grid.width)
                .enumerate()
                .for_each(|(iy, row)| self.render_row(iy, row, grid, octaves));
        }
        debug!("rendered {} samples", values.len());
        NoiseGrid {
            width: grid.width,
            height: grid.height,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_parameters_validate() {
        assert!(RenderParameters::new(10, 10, 255.0, 0.5).is_ok());
        assert_eq!(
            RenderParameters::new(10, 10, 0.0, 0.5),
            Err(NoiseError::InvalidScale(0.0))
        );
        assert!(RenderParameters::new(10, 10, f64::NAN, 0.5).is_err());
        assert!(RenderParameters::new(10, 10, 255.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_render_matches_samples() {
        let field = NoiseField::default();
        let grid = RenderParameters::new(32, 16, 255.0, 0.5).unwrap();
        let octaves = OctaveParameters::default();
        let rendered = field.render(&grid, &octaves);

        assert_eq!(rendered.width(), 32);
        assert_eq!(rendered.height(), 16);
        assert_eq!(rendered.values().len(), 32 * 16);
        assert_eq!(rendered.get(10, 20), None);
        assert_eq!(rendered.get(32, 0), None);
        assert_eq!(
            rendered.get(10, 15),
            Some(field.sample(10.0 / 255.0, 15.0 / 255.0, 0.5))
        );
        assert_eq!(
            rendered.get(10, 0),
            Some(field.sample(10.0 / 255.0, 0.0, 0.5))
        );
        assert_eq!(rendered.get(0, 0), Some(field.sample(0.0, 0.0, 0.5)));
        assert_eq!(rendered.get(0, 0), Some(0.75));
        assert_eq!(rendered.rows().count(), 16);
    }

    #[test]
    fn test_render_parameters_accessors() {
        let params = RenderParameters::new(64, 32, 16.0, -2.5).unwrap();
        assert_eq!(params.width(), 64);
        assert_eq!(params.height(), 32);
        assert_eq!(params.scale(), 16.0);
        assert_eq!(params.z(), -2.5);
        assert_eq!(RenderParameters::default().scale(), 255.0);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_cbor_render_parameters() {
        #[derive(serde::Serialize)]
        struct Wire {
            width: usize,
            height: usize,
            scale: f64,
            z: f64,
        }

        let params = RenderParameters::new(40, 30, 64.0, 0.5).unwrap();
        let bytes = serde_cbor::to_vec(&params).unwrap();
        let decoded: RenderParameters = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(params, decoded);

        for (scale, z) in [(0.0, 0.5), (-4.0, 0.5), (f64::NAN, 0.5), (64.0, f64::INFINITY)] {
            let bytes = serde_cbor::to_vec(&Wire {
                width: 40,
                height: 30,
                scale,
                z,
            })
            .unwrap();
            let decoded = serde_cbor::from_slice::<RenderParameters>(&bytes);
            assert!(decoded.is_err(), "scale {}, z {}", scale, z);
        }
    }

    #[test]
    fn test_render_golden_pixel() {
        let field = NoiseField::default();
        let grid = RenderParameters::new(21, 21, 255.0, 0.5).unwrap();
        let rendered = field.render(&grid, &OctaveParameters::default());
        assert_eq!(rendered.get(10, 20), Some(0.7464079511180711));
    }

    #[test]
    fn test_to_intensities() {
        let grid = NoiseGrid {
            width: 4,
            height: 1,
            values: vec![0.0, 0.5, 0.998, 1.0],
        };
        assert_eq!(grid.to_intensities(), vec![0, 128, 254, 255]);
    }

    #[test]
    fn test_empty_grid() {
        let field = NoiseField::default();
        let grid = RenderParameters::new(0, 8, 255.0, 0.5).unwrap();
        let rendered = field.render(&grid, &OctaveParameters::default());
        assert!(rendered.values().is_empty());
        assert_eq!(rendered.get(0, 0), None);
    }

    #[test]
    fn test_tiled_grid_wraps() {
        let field = NoiseField::new(2);
        // one period spans 64 pixels
        let grid = RenderParameters::new(128, 4, 32.0, 0.5).unwrap();
        let rendered = field.render(&grid, &OctaveParameters::new(3, 0.5).unwrap());
        for iy in 0..4 {
            for ix in 0..64 {
                assert_eq!(rendered.get(ix, iy), rendered.get(ix + 64, iy));
            }
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_render_is_identical() {
        let field = NoiseField::default();
        let grid = RenderParameters::new(97, 61, 40.0, 0.25).unwrap();
        for octaves in [
            OctaveParameters::default(),
            OctaveParameters::new(5, 0.6).unwrap(),
        ] {
            let sequential = field.render(&grid, &octaves);
            let parallel = field.render_par(&grid, &octaves);
            assert_eq!(sequential, parallel);
        }

        let table = crate::PermutationTable::from_seed(3);
        let field = NoiseField::with_table(&table, 8);
        let octaves = OctaveParameters::new(4, 0.5).unwrap();
        assert_eq!(field.render(&grid, &octaves), field.render_par(&grid, &octaves));
    }
}
