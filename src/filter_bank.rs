/*
 * // Copyright (c) Radzivon Bartoshyk 10/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

use crate::ScatteringSample;
use crate::backend::ScatteringBackend;
use crate::err::{ScatletError, try_vec};
use crate::morlet::{GaborParams, gabor_2d, morlet_2d};
use crate::rustfft_backend::RustFftBackend;
use crate::util::checked_scale;
use num_complex::Complex;
use num_traits::{AsPrimitive, Zero};

/// Frequency-domain filter materialized at one resolution level.
///
/// Level `r` lives on a `(M_padded / 2^r) × (N_padded / 2^r)` grid.
#[derive(Debug, Clone)]
pub struct Filter<T> {
    rows: usize,
    cols: usize,
    resolution: usize,
    data: Vec<Complex<T>>,
}

impl<T> Filter<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// How many times the grid was halved relative to the padded size.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Row-major frequency response.
    pub fn data(&self) -> &[Complex<T>] {
        &self.data
    }
}

/// One oriented Morlet wavelet with all the resolutions it is convolved at.
#[derive(Debug, Clone)]
pub struct BandPassFilter<T> {
    j: usize,
    theta: usize,
    levels: Vec<Filter<T>>,
}

impl<T> BandPassFilter<T> {
    /// Scale index, the wavelet is dilated by `2^j`.
    pub fn j(&self) -> usize {
        self.j
    }

    /// Orientation index in `0..L`.
    pub fn theta(&self) -> usize {
        self.theta
    }

    pub fn levels(&self) -> &[Filter<T>] {
        &self.levels
    }

    pub fn level(&self, resolution: usize) -> Option<&Filter<T>> {
        self.levels.get(resolution)
    }
}

/// Gaussian window of scale `2^J` with all the resolutions it is convolved at.
#[derive(Debug, Clone)]
pub struct LowPassFilter<T> {
    j: usize,
    levels: Vec<Filter<T>>,
}

impl<T> LowPassFilter<T> {
    pub fn j(&self) -> usize {
        self.j
    }

    pub fn levels(&self) -> &[Filter<T>] {
        &self.levels
    }

    pub fn level(&self, resolution: usize) -> Option<&Filter<T>> {
        self.levels.get(resolution)
    }
}

/// Morlet filter bank: `J·L` band-pass filters ordered by scale then orientation,
/// and one low-pass window.
///
/// Immutable once built and safe to share between threads.
#[derive(Debug, Clone)]
pub struct FilterBank<T> {
    rows: usize,
    cols: usize,
    j: usize,
    l: usize,
    phi: LowPassFilter<T>,
    psi: Vec<BandPassFilter<T>>,
}

impl<T: ScatteringSample> FilterBank<T>
where
    f64: AsPrimitive<T>,
{
    /// Builds the filter bank for a padded support.
    ///
    /// # Parameters
    /// - `rows`, `cols`: Padded spatial size, both divisible by `2^j`.
    /// - `j`: Number of octaves `J`.
    /// - `l`: Number of orientations `L`.
    ///
    /// # Returns
    /// The filter bank, or a configuration error for `J = 0`, `L = 0` or a
    /// size the `2^J` grid does not divide.
    pub fn build(rows: usize, cols: usize, j: usize, l: usize) -> Result<Self, ScatletError> {
        if j == 0 {
            return Err(ScatletError::ZeroScale);
        }
        if l == 0 {
            return Err(ScatletError::ZeroOrientations);
        }
        if rows == 0 || cols == 0 {
            return Err(ScatletError::ZeroSizedShape(rows, cols));
        }
        let scale = checked_scale(j).ok_or(ScatletError::ScaleExceedsSupport {
            scale: j,
            rows,
            cols,
        })?;
        if !rows.is_multiple_of(scale) {
            return Err(ScatletError::NonDivisibleSize(rows, scale));
        }
        if !cols.is_multiple_of(scale) {
            return Err(ScatletError::NonDivisibleSize(cols, scale));
        }

        let fft = RustFftBackend::<f64>::new();

        let mut psi = Vec::with_capacity(j * l);
        for scale_index in 0..j {
            // order 2 reads the wavelet at the resolution of every finer j1 < j
            let level_count = (scale_index + 1).min((j - 1).max(1));
            for theta in 0..l {
                let spatial = morlet_2d(rows, cols, GaborParams::band_pass(scale_index, theta, l))?;
                let response = real_response(&fft, &spatial, rows, cols)?;
                psi.push(BandPassFilter {
                    j: scale_index,
                    theta,
                    levels: materialize_levels(&response, rows, cols, level_count)?,
                });
            }
        }

        let spatial = gabor_2d(rows, cols, GaborParams::low_pass(j))?;
        let response = real_response(&fft, &spatial, rows, cols)?;
        let phi = LowPassFilter {
            j,
            levels: materialize_levels(&response, rows, cols, j)?,
        };

        log::debug!(
            "built Morlet filter bank {}x{}, J={}, L={}, {} band-pass filters",
            rows,
            cols,
            j,
            l,
            psi.len()
        );

        Ok(FilterBank {
            rows,
            cols,
            j,
            l,
            phi,
            psi,
        })
    }
}

impl<T> FilterBank<T> {
    /// Padded size the full-resolution filters are defined on.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn scale(&self) -> usize {
        self.j
    }

    pub fn orientations(&self) -> usize {
        self.l
    }

    pub fn phi(&self) -> &LowPassFilter<T> {
        &self.phi
    }

    /// Band-pass filters ordered by increasing `j`, then `theta`.
    pub fn psi(&self) -> &[BandPassFilter<T>] {
        &self.psi
    }
}

/// Real part of the 2-D Fourier transform of a spatial filter.
///
/// The imaginary part vanishes for the symmetric filters built here.
fn real_response(
    fft: &RustFftBackend<f64>,
    spatial: &[Complex<f64>],
    rows: usize,
    cols: usize,
) -> Result<Vec<f64>, ScatletError> {
    Ok(fft
        .fft2(spatial, rows, cols)?
        .into_iter()
        .map(|v| v.re)
        .collect())
}

fn materialize_levels<T: ScatteringSample>(
    response: &[f64],
    rows: usize,
    cols: usize,
    count: usize,
) -> Result<Vec<Filter<T>>, ScatletError>
where
    f64: AsPrimitive<T>,
{
    let mut levels = Vec::with_capacity(count);
    for resolution in 0..count {
        let periodized = periodize_filter_fft(response, rows, cols, resolution)?;
        let mut data = try_vec![Complex::<T>::zero(); periodized.len()];
        for (dst, &src) in data.iter_mut().zip(periodized.iter()) {
            *dst = Complex::new(src.as_(), T::zero());
        }
        levels.push(Filter {
            rows: rows >> resolution,
            cols: cols >> resolution,
            resolution,
            data,
        });
    }
    Ok(levels)
}

/// Folds a frequency response defined on `rows × cols` into the
/// `(rows / 2^res) × (cols / 2^res)` grid, so the filter can be applied to a signal
/// already decimated by `2^res`.
///
/// The band of frequencies above the new Nyquist limit is zeroed first, then the
/// `2^res × 2^res` aliased copies are summed.
pub fn periodize_filter_fft(
    response: &[f64],
    rows: usize,
    cols: usize,
    res: usize,
) -> Result<Vec<f64>, ScatletError> {
    if response.len() != rows * cols {
        return Err(ScatletError::InOutSizesMismatch(response.len(), rows * cols));
    }
    if res == 0 {
        return Ok(response.to_vec());
    }
    let factor = checked_scale(res + 1).ok_or(ScatletError::ScaleExceedsSupport {
        scale: res,
        rows,
        cols,
    })?;
    if !rows.is_multiple_of(factor) {
        return Err(ScatletError::NonDivisibleSize(rows, factor));
    }
    if !cols.is_multiple_of(factor) {
        return Err(ScatletError::NonDivisibleSize(cols, factor));
    }
    let (out_rows, out_cols) = (rows >> res, cols >> res);
    // frequencies in [size / 2^(res + 1), size - size / 2^(res + 1)) are masked out
    let masked_rows = (rows / factor)..(rows - rows / factor);
    let masked_cols = (cols / factor)..(cols - cols / factor);

    let mut crop = try_vec![0f64; out_rows * out_cols];
    for (y, row) in response.chunks_exact(cols).enumerate() {
        if masked_rows.contains(&y) {
            continue;
        }
        let dst_row = &mut crop[(y % out_rows) * out_cols..(y % out_rows + 1) * out_cols];
        for (x, &v) in row.iter().enumerate() {
            if masked_cols.contains(&x) {
                continue;
            }
            dst_row[x % out_cols] += v;
        }
    }
    Ok(crop)
}
