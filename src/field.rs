use crate::{NoiseError, OctaveParameters, PermutationTable};

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the distance vector with the direction selected by the low 4 bits
/// of `hash`.
///
/// Cases 0xC..=0xF are kept exactly as in the historical table this noise is
/// compatible with: 0xD repeats 0x9 and 0xC is 0x0 with swapped operands.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    match hash & 0xF {
        0x0 => x + y,
        0x1 => -x + y,
        0x2 => x - y,
        0x3 => -x - y,
        0x4 => x + z,
        0x5 => -x + z,
        0x6 => x - z,
        0x7 => -x - z,
        0x8 => y + z,
        0x9 => -y + z,
        0xA => y - z,
        0xB => -y - z,
        0xC => y + x,
        0xD => -y + z,
        0xE => y - x,
        _ => -y - z,
    }
}

/// A 3D Perlin noise field.
///
/// The field borrows a [`PermutationTable`] read-only and is `Copy`, so it can be handed
/// to any number of worker threads without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct NoiseField<'t> {
    table: &'t PermutationTable,
    repeat: i32,
}

impl Default for NoiseField<'static> {
    fn default() -> Self {
        Self::new(-1)
    }
}

impl NoiseField<'static> {
    /// Create a field over the reference permutation.
    /// `repeat > 0` makes the field tile with that period on every axis.
    pub fn new(repeat: i32) -> Self {
        Self::with_table(PermutationTable::reference(), repeat)
    }
}

impl<'t> NoiseField<'t> {
    pub fn with_table(table: &'t PermutationTable, repeat: i32) -> Self {
        Self { table, repeat }
    }

    pub fn repeat(&self) -> i32 {
        self.repeat
    }

    pub fn table(&self) -> &'t PermutationTable {
        self.table
    }

    fn is_tiled(&self) -> bool {
        self.repeat > 0
    }

    fn wrap(&self, coord: f64) -> f64 {
        if self.is_tiled() {
            let period = self.repeat as f64;
            let wrapped = coord.rem_euclid(period);
            // rem_euclid rounds tiny negative inputs up to `period` itself
            if wrapped < period {
                wrapped
            } else {
                0.0
            }
        } else {
            coord
        }
    }

    #[inline]
    fn inc(&self, n: usize) -> usize {
        if self.is_tiled() {
            (n + 1) % self.repeat as usize
        } else {
            n + 1
        }
    }

    #[inline]
    fn hash(&self, x: usize, y: usize, z: usize) -> usize {
        let p = self.table;
        p.hash_index(p.hash_index(p.hash_index(x) + y) + z)
    }

    /// Evaluate single-octave noise at `(x, y, z)`. The result lies in \[0.0, 1.0\].
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x, y, z) = (self.wrap(x), self.wrap(y), self.wrap(z));

        let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let zi = (z0 as i64 & 255) as usize;
        let (xf, yf, zf) = (x - x0, y - y0, z - z0);

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let (xn, yn, zn) = (self.inc(xi), self.inc(yi), self.inc(zi));
        let aaa = self.hash(xi, yi, zi);
        let aba = self.hash(xi, yn, zi);
        let aab = self.hash(xi, yi, zn);
        let abb = self.hash(xi, yn, zn);
        let baa = self.hash(xn, yi, zi);
        let bba = self.hash(xn, yn, zi);
        let bab = self.hash(xn, yi, zn);
        let bbb = self.hash(xn, yn, zn);

        let x1 = lerp(grad(aaa, xf, yf, zf), grad(baa, xf - 1.0, yf, zf), u);
        let x2 = lerp(grad(aba, xf, yf - 1.0, zf), grad(bba, xf - 1.0, yf - 1.0, zf), u);
        let y1 = lerp(x1, x2, v);

        let x1 = lerp(grad(aab, xf, yf, zf - 1.0), grad(bab, xf - 1.0, yf, zf - 1.0), u);
        let x2 = lerp(
            grad(abb, xf, yf - 1.0, zf - 1.0),
            grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = lerp(x1, x2, v);

        (lerp(y1, y2, w) + 1.0) / 2.0
    }

    /// Sum `octaves` layers of noise, doubling the frequency and scaling the amplitude
    /// by `persistence` per layer, normalized back to \[0.0, 1.0\].
    pub fn sample_octaves(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: u32,
        persistence: f64,
    ) -> Result<f64, NoiseError> {
        let params = OctaveParameters::new(octaves, persistence)?;
        Ok(self.sample_fractal(x, y, z, &params))
    }

    pub fn sample_fractal(&self, x: f64, y: f64, z: f64, params: &OctaveParameters) -> f64 {
        let total = params
            .layers()
            .map(|(frequency, amplitude)| {
                self.sample(x * frequency, y * frequency, z * frequency) * amplitude
            })
            .fold(0.0, |acc, layer| acc + layer);
        total / params.max_value()
    }
}
