//! Smoothed fractal value noise.
//!
//! [`smooth`] is one octave: sample the source on a coarse lattice every
//! `wavelength` cells, then bilinearly interpolate back to full resolution.
//! [`fractal_field`] sums octaves with geometrically decaying amplitude.

use rand::Rng;

/// A dense row-major 2D field of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl NoiseField {
    /// A field of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Build a field from `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                values.push(f(r, c));
            }
        }
        Self { rows, cols, values }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest value, or 0.0 for an empty field.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// `self += amplitude * other`, element-wise.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn add_scaled(&mut self, other: &NoiseField, amplitude: f64) {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "noise field shape mismatch"
        );
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += amplitude * b;
        }
    }

    /// Apply `f` to every value.
    pub fn map_in_place(&mut self, f: impl Fn(f64) -> f64) {
        for v in &mut self.values {
            *v = f(*v);
        }
    }
}

/// Uniform `[0, 1)` noise, squared to bias toward low values.
pub fn base_noise<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> NoiseField {
    NoiseField::from_fn(rows, cols, |_, _| {
        let u: f64 = rng.random();
        u * u
    })
}

/// One octave of smoothed noise with the same shape as `source`.
///
/// The coarse lattice has `ceil(rows / wavelength) × ceil(cols / wavelength)`
/// samples. Interpolation toward the far lattice point wraps around, so the
/// last partial cell of each row blends back toward the first sample.
///
/// # Panics
///
/// Panics if `wavelength` is zero.
pub fn smooth(source: &NoiseField, wavelength: usize) -> NoiseField {
    assert!(wavelength > 0, "wavelength must be positive");
    let coarse_rows = source.rows.div_ceil(wavelength);
    let coarse_cols = source.cols.div_ceil(wavelength);
    let coarse = NoiseField::from_fn(coarse_rows, coarse_cols, |y, x| {
        source.get(wavelength * y, wavelength * x)
    });

    let wl = wavelength as f64;
    NoiseField::from_fn(source.rows, source.cols, |y, x| {
        let y0 = y / wavelength;
        let y1 = (y0 + 1) % coarse_rows;
        let vertical = y as f64 / wl - y0 as f64;

        let x0 = x / wavelength;
        let x1 = (x0 + 1) % coarse_cols;
        let horizontal = x as f64 / wl - x0 as f64;

        let top = (1.0 - horizontal) * coarse.get(y0, x0) + horizontal * coarse.get(y0, x1);
        let bottom = (1.0 - horizontal) * coarse.get(y1, x0) + horizontal * coarse.get(y1, x1);
        (1.0 - vertical) * top + vertical * bottom
    })
}

/// `floor(log2(min(rows, cols))) + 1`.
pub fn max_octave(rows: usize, cols: usize) -> u32 {
    rows.min(cols).max(1).ilog2() + 1
}

/// Sum octaves `2..=max_octave` of `base`.
///
/// Octave `o` uses wavelength `2^(max_octave - o)` and amplitude
/// `persistence^(o - 2)`, so the coarsest octave dominates.
pub fn fractal_field(base: &NoiseField, persistence: f64) -> NoiseField {
    let top = max_octave(base.rows, base.cols);
    let mut acc = NoiseField::zeros(base.rows, base.cols);
    let mut amplitude = 1.0;
    for octave in 2..=top {
        let wavelength = 1usize << (top - octave);
        acc.add_scaled(&smooth(base, wavelength), amplitude);
        amplitude *= persistence;
    }
    acc
}
