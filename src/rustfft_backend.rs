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
use crate::util::transpose;
use num_complex::Complex;
use num_traits::{AsPrimitive, Zero};
use rustfft::{Fft, FftDirection, FftPlanner};
use std::sync::{Arc, Mutex, PoisonError};

/// CPU backend computing 2-D transforms as separable row/column `rustfft` passes.
///
/// Plans are created lazily and cached by the planner; the lock is held only while a
/// plan is fetched, never while a transform runs.
pub struct RustFftBackend<T: ScatteringSample> {
    planner: Mutex<FftPlanner<T>>,
}

impl<T: ScatteringSample> Default for RustFftBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ScatteringSample> RustFftBackend<T> {
    pub fn new() -> Self {
        Self {
            planner: Mutex::new(FftPlanner::new()),
        }
    }

    fn plan(&self, length: usize, direction: FftDirection) -> Arc<dyn Fft<T>> {
        let mut planner = self.planner.lock().unwrap_or_else(PoisonError::into_inner);
        planner.plan_fft(length, direction)
    }

    fn transform(
        &self,
        input: &[Complex<T>],
        rows: usize,
        cols: usize,
        direction: FftDirection,
    ) -> Result<Vec<Complex<T>>, ScatletError> {
        if input.len() != rows * cols || input.is_empty() {
            return Err(ScatletError::InOutSizesMismatch(input.len(), rows * cols));
        }
        let row_plan = self.plan(cols, direction);
        let col_plan = self.plan(rows, direction);

        let scratch_length = row_plan
            .get_inplace_scratch_len()
            .max(col_plan.get_inplace_scratch_len());
        let mut scratch = try_vec![Complex::<T>::zero(); scratch_length];

        let mut buffer = try_vec![Complex::<T>::zero(); input.len()];
        buffer.copy_from_slice(input);
        row_plan.process_with_scratch(&mut buffer, &mut scratch);

        let mut transposed = try_vec![Complex::<T>::zero(); input.len()];
        transpose(&buffer, &mut transposed, rows, cols)?;
        col_plan.process_with_scratch(&mut transposed, &mut scratch);
        transpose(&transposed, &mut buffer, cols, rows)?;

        Ok(buffer)
    }
}

impl<T: ScatteringSample> ScatteringBackend<T> for RustFftBackend<T>
where
    f64: AsPrimitive<T>,
{
    fn name(&self) -> &'static str {
        "rustfft"
    }

    fn fft2(
        &self,
        input: &[Complex<T>],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Complex<T>>, ScatletError> {
        self.transform(input, rows, cols, FftDirection::Forward)
    }

    fn ifft2(
        &self,
        input: &[Complex<T>],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Complex<T>>, ScatletError> {
        let mut output = self.transform(input, rows, cols, FftDirection::Inverse)?;
        let norm: T = (1. / (rows * cols) as f64).as_();
        for v in output.iter_mut() {
            *v = *v * norm;
        }
        Ok(output)
    }

    fn complex_multiply(
        &self,
        a: &[Complex<T>],
        b: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, ScatletError> {
        if a.len() != b.len() {
            return Err(ScatletError::InOutSizesMismatch(a.len(), b.len()));
        }
        let mut product = try_vec![Complex::<T>::zero(); a.len()];
        for ((dst, &x), &y) in product.iter_mut().zip(a.iter()).zip(b.iter()) {
            *dst = x * y;
        }
        Ok(product)
    }

    fn modulus(&self, input: &[Complex<T>]) -> Result<Vec<T>, ScatletError> {
        let mut magnitude = try_vec![T::zero(); input.len()];
        for (dst, src) in magnitude.iter_mut().zip(input.iter()) {
            *dst = src.norm();
        }
        Ok(magnitude)
    }

    fn subsample(
        &self,
        input: &[T],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Vec<T>, ScatletError> {
        if stride == 0 || !rows.is_multiple_of(stride) || !cols.is_multiple_of(stride) {
            return Err(ScatletError::SubsampleStride(rows, cols, stride));
        }
        if input.len() != rows * cols {
            return Err(ScatletError::InOutSizesMismatch(input.len(), rows * cols));
        }
        let (out_rows, out_cols) = (rows / stride, cols / stride);
        let mut decimated = try_vec![T::zero(); out_rows * out_cols];
        for (dst, src) in decimated
            .chunks_exact_mut(out_cols)
            .zip(input.chunks_exact(cols).step_by(stride))
        {
            for (d, &s) in dst.iter_mut().zip(src.iter().step_by(stride)) {
                *d = s;
            }
        }
        Ok(decimated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dft2(input: &[Complex<f64>], rows: usize, cols: usize) -> Vec<Complex<f64>> {
        let mut out = vec![Complex::zero(); rows * cols];
        for u in 0..rows {
            for v in 0..cols {
                let mut acc = Complex::zero();
                for y in 0..rows {
                    for x in 0..cols {
                        let phase = -2. * std::f64::consts::PI
                            * ((u * y) as f64 / rows as f64 + (v * x) as f64 / cols as f64);
                        acc += input[y * cols + x] * Complex::new(phase.cos(), phase.sin());
                    }
                }
                out[u * cols + v] = acc;
            }
        }
        out
    }

    #[test]
    fn test_fft2_matches_dft() {
        let (rows, cols) = (6, 4);
        let input: Vec<Complex<f64>> = (0..rows * cols)
            .map(|i| Complex::new((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
            .collect();
        let backend = RustFftBackend::<f64>::new();
        let fast = backend.fft2(&input, rows, cols).unwrap();
        let reference = naive_dft2(&input, rows, cols);
        for (i, (f, r)) in fast.iter().zip(reference.iter()).enumerate() {
            assert!(
                (f - r).norm() < 1e-9,
                "fft difference expected to be < 1e-9 at {i}, but values were ref {r}, derived {f}"
            );
        }
        let restored = backend.ifft2(&fast, rows, cols).unwrap();
        for (a, b) in restored.iter().zip(input.iter()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_subsample() {
        let backend = RustFftBackend::<f32>::new();
        let plane: Vec<f32> = (0..16).map(|x| x as f32).collect();
        let decimated = backend.subsample(&plane, 4, 4, 2).unwrap();
        assert_eq!(decimated, vec![0., 2., 8., 10.]);
        assert_eq!(backend.subsample(&plane, 4, 4, 1).unwrap(), plane);
        assert!(matches!(
            backend.subsample(&plane, 4, 4, 3),
            Err(ScatletError::SubsampleStride(4, 4, 3))
        ));
    }

    #[test]
    fn test_modulus_and_multiply() {
        let backend = RustFftBackend::<f64>::new();
        let a = [Complex::new(3., 4.), Complex::new(0., -2.)];
        let b = [Complex::new(0., 1.), Complex::new(2., 0.)];
        assert_eq!(backend.modulus(&a).unwrap(), vec![5., 2.]);
        assert_eq!(
            backend.complex_multiply(&a, &b).unwrap(),
            vec![Complex::new(-4., 3.), Complex::new(0., -4.)]
        );
        assert!(backend.complex_multiply(&a, &b[..1]).is_err());
    }
}
