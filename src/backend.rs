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

use crate::err::ScatletError;
use num_complex::Complex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Primitive numeric operations the scattering cascade is expressed in.
///
/// Every plane is a row-major `rows × cols` slice. Implementations must reproduce
/// these semantics exactly; the cascade does not depend on anything else.
///
/// # Type Parameters
/// - `T`: Real sample type (`f32` or `f64`).
pub trait ScatteringBackend<T>: Send + Sync {
    /// Name the backend was resolved from.
    fn name(&self) -> &'static str;

    /// Unnormalized forward 2-D discrete Fourier transform.
    fn fft2(
        &self,
        input: &[Complex<T>],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Complex<T>>, ScatletError>;

    /// Inverse 2-D discrete Fourier transform, normalized by `1 / (rows · cols)`.
    fn ifft2(
        &self,
        input: &[Complex<T>],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Complex<T>>, ScatletError>;

    /// Elementwise complex product `a ⊙ b`.
    fn complex_multiply(
        &self,
        a: &[Complex<T>],
        b: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, ScatletError>;

    /// Elementwise complex magnitude.
    fn modulus(&self, input: &[Complex<T>]) -> Result<Vec<T>, ScatletError>;

    /// Periodic decimation keeping every `stride`-th sample along both axes,
    /// starting at index 0. Both sides must be divisible by `stride`.
    fn subsample(
        &self,
        input: &[T],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Vec<T>, ScatletError>;
}

/// Names a numeric backend. Resolved once when an executor is constructed.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum BackendKind {
    /// CPU backend on top of `rustfft` plans.
    #[default]
    RustFft,
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::RustFft => f.write_str("rustfft"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ScatletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rustfft" | "cpu" => Ok(BackendKind::RustFft),
            _ => Err(ScatletError::UnsupportedBackend(s.to_string())),
        }
    }
}
