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
use crate::filter_bank::{Filter, FilterBank};
use crate::padding::PaddingPlan;
use num_complex::Complex;
use num_traits::{AsPrimitive, Zero};

/// Convolution-modulus-subsample cascade over one padded sample.
///
/// Borrows the shared filter bank and padding plan, owns nothing between calls.
pub(crate) struct ScatteringCascade<'a, T> {
    pub(crate) backend: &'a dyn ScatteringBackend<T>,
    pub(crate) filter_bank: &'a FilterBank<T>,
    pub(crate) padding: &'a PaddingPlan,
    pub(crate) max_order: usize,
}

fn to_complex<T: ScatteringSample>(plane: &[T]) -> Result<Vec<Complex<T>>, ScatletError> {
    let mut complex = try_vec![Complex::<T>::zero(); plane.len()];
    for (dst, &src) in complex.iter_mut().zip(plane.iter()) {
        *dst = Complex::new(src, T::zero());
    }
    Ok(complex)
}

fn level_of<T>(levels: &[Filter<T>], resolution: usize) -> Result<&Filter<T>, ScatletError> {
    levels
        .get(resolution)
        .ok_or(ScatletError::MissingResolution(resolution))
}

impl<T: ScatteringSample> ScatteringCascade<'_, T>
where
    f64: AsPrimitive<T>,
{
    /// `|ifft2(spectrum ⊙ filter)|` decimated by `stride`.
    fn wavelet_modulus(
        &self,
        spectrum: &[Complex<T>],
        (rows, cols): (usize, usize),
        filter: &Filter<T>,
        stride: usize,
    ) -> Result<Vec<T>, ScatletError> {
        let product = self.backend.complex_multiply(spectrum, filter.data())?;
        let spatial = self.backend.ifft2(&product, rows, cols)?;
        let modulus = self.backend.modulus(&spatial)?;
        self.backend.subsample(&modulus, rows, cols, stride)
    }

    /// Low-pass window of a signal living at `resolution`, decimated down to `2^J` and cropped.
    fn window(
        &self,
        spectrum: &[Complex<T>],
        (rows, cols): (usize, usize),
        resolution: usize,
    ) -> Result<Vec<T>, ScatletError> {
        let j = self.filter_bank.scale();
        let filter = level_of(self.filter_bank.phi().levels(), resolution)?;
        let product = self.backend.complex_multiply(spectrum, filter.data())?;
        let spatial = self.backend.ifft2(&product, rows, cols)?;
        let mut real = try_vec![T::zero(); spatial.len()];
        for (dst, src) in real.iter_mut().zip(spatial.iter()) {
            *dst = src.re;
        }
        let remaining = j - resolution;
        let decimated = self.backend.subsample(&real, rows, cols, 1 << remaining)?;
        self.padding
            .unpad(&decimated, rows >> remaining, cols >> remaining)
    }

    /// Runs the cascade and returns the cropped coefficients in output order.
    ///
    /// # Parameters
    /// - `padded`: Row-major `(M_padded, N_padded)` plane.
    pub(crate) fn scatter(&self, padded: &[T]) -> Result<Vec<Vec<T>>, ScatletError> {
        let (rows, cols) = self.padding.padded_size();
        if padded.len() != rows * cols {
            return Err(ScatletError::InOutSizesMismatch(padded.len(), rows * cols));
        }
        let psi = self.filter_bank.psi();

        let signal_hat = self.backend.fft2(&to_complex(padded)?, rows, cols)?;

        let order0 = self.window(&signal_hat, (rows, cols), 0)?;

        let mut order1 = Vec::with_capacity(psi.len());
        let mut order2 = Vec::new();

        for psi1 in psi {
            let j1 = psi1.j();
            let u1 = self.wavelet_modulus(
                &signal_hat,
                (rows, cols),
                level_of(psi1.levels(), 0)?,
                1 << j1,
            )?;
            let size1 = (rows >> j1, cols >> j1);
            let u1_hat = self.backend.fft2(&to_complex(&u1)?, size1.0, size1.1)?;

            order1.push(self.window(&u1_hat, size1, j1)?);

            if self.max_order < 2 {
                continue;
            }

            for psi2 in psi.iter().filter(|p| p.j() > j1) {
                let j2 = psi2.j();
                let u2 = self.wavelet_modulus(
                    &u1_hat,
                    size1,
                    level_of(psi2.levels(), j1)?,
                    1 << (j2 - j1),
                )?;
                let size2 = (rows >> j2, cols >> j2);
                let u2_hat = self.backend.fft2(&to_complex(&u2)?, size2.0, size2.1)?;

                order2.push(self.window(&u2_hat, size2, j2)?);
            }
        }

        let mut coefficients = Vec::with_capacity(1 + order1.len() + order2.len());
        coefficients.push(order0);
        coefficients.extend(order1);
        coefficients.extend(order2);
        Ok(coefficients)
    }
}
