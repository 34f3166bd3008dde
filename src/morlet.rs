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

use crate::err::{ScatletError, try_vec};
use num_complex::Complex;

/// Gaussian normalization keeps the tuned value of π the coefficients were
/// calibrated with.
#[allow(clippy::approx_constant)]
const GABOR_PI: f64 = 3.1415;

/// Number of neighbouring periods summed on each side of the grid.
const PERIODS: isize = 2;

/// Shape parameters of a 2-D Gabor filter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GaborParams {
    /// Bandwidth of the Gaussian envelope.
    pub sigma: f64,
    /// Orientation of the filter in radians.
    pub theta: f64,
    /// Central frequency of the modulation.
    pub xi: f64,
    /// Ellipticity of the envelope across the orientation axis.
    pub slant: f64,
}

impl GaborParams {
    /// Band-pass parameters for scale `2^j` and orientation index `t` out of `l`.
    ///
    /// Tuned for `l = 8`.
    pub fn band_pass(j: usize, t: usize, l: usize) -> Self {
        let scale = 2f64.powi(j as i32);
        let l_f = l as f64;
        let first = (l_f - l_f / 2. - 1.) as i64;
        GaborParams {
            sigma: 0.8 * scale,
            theta: (first - t as i64) as f64 * std::f64::consts::PI / l_f,
            xi: 3.0 / 4.0 * std::f64::consts::PI / scale,
            slant: 4.0 / l_f,
        }
    }

    /// Low-pass parameters for the window of scale `2^j`.
    pub fn low_pass(j: usize) -> Self {
        GaborParams {
            sigma: 0.8 * 2f64.powi(j as i32 - 1),
            theta: 0.,
            xi: 0.,
            slant: 1.,
        }
    }
}

/// Computes a 2-D Gabor filter on a periodic `rows × cols` grid in the spatial domain.
///
/// The filter is a Gaussian envelope with covariance rotated by `theta`, modulated by
/// a plane wave of frequency `xi` along `theta`, and periodized by summing the
/// neighbouring 5 × 5 periods.
pub fn gabor_2d(
    rows: usize,
    cols: usize,
    params: GaborParams,
) -> Result<Vec<Complex<f64>>, ScatletError> {
    let GaborParams {
        sigma,
        theta,
        xi,
        slant,
    } = params;
    let (sin_t, cos_t) = theta.sin_cos();
    let slant2 = slant * slant;
    let denominator = 2. * sigma * sigma;
    // R · diag(1, slant²) · R⁻¹ / (2σ²)
    let c00 = (cos_t * cos_t + sin_t * sin_t * slant2) / denominator;
    let c01 = (cos_t * sin_t - sin_t * cos_t * slant2) / denominator;
    let c10 = (sin_t * cos_t - cos_t * sin_t * slant2) / denominator;
    let c11 = (sin_t * sin_t + cos_t * cos_t * slant2) / denominator;

    let mut gab = try_vec![Complex::new(0f64, 0f64); rows * cols];
    let (m, n) = (rows as isize, cols as isize);

    for ex in -PERIODS..=PERIODS {
        for ey in -PERIODS..=PERIODS {
            for (y, row) in gab.chunks_exact_mut(cols).enumerate() {
                let xx = (y as isize + ex * m) as f64;
                for (x, dst) in row.iter_mut().enumerate() {
                    let yy = (x as isize + ey * n) as f64;
                    let envelope = -(c00 * xx * xx + (c01 + c10) * xx * yy + c11 * yy * yy);
                    let phase = xi * (xx * cos_t + yy * sin_t);
                    *dst += Complex::new(envelope, phase).exp();
                }
            }
        }
    }

    let norm_factor = 2. * GABOR_PI * sigma * sigma / slant;
    for v in gab.iter_mut() {
        *v /= norm_factor;
    }
    Ok(gab)
}

/// Computes a 2-D Morlet filter: a Gabor filter minus a scaled Gaussian envelope
/// so the filter has zero mean.
pub fn morlet_2d(
    rows: usize,
    cols: usize,
    params: GaborParams,
) -> Result<Vec<Complex<f64>>, ScatletError> {
    let mut wave = gabor_2d(rows, cols, params)?;
    let envelope = gabor_2d(rows, cols, GaborParams { xi: 0., ..params })?;
    let wave_sum: Complex<f64> = wave.iter().sum();
    let envelope_sum: Complex<f64> = envelope.iter().sum();
    let k = wave_sum / envelope_sum;
    for (dst, &src) in wave.iter_mut().zip(envelope.iter()) {
        *dst -= k * src;
    }
    Ok(wave)
}
