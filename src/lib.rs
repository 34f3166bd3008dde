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
#![allow(clippy::excessive_precision)]

mod backend;
mod border_mode;
mod cascade;
mod err;
mod filter_bank;
mod morlet;
mod padding;
mod path;
mod rustfft_backend;
mod scattering2d;
mod util;

use crate::scattering2d::Scattering2d;
pub use backend::{BackendKind, ScatteringBackend};
pub use border_mode::BorderMode;
pub use err::ScatletError;
pub use filter_bank::{BandPassFilter, Filter, FilterBank, LowPassFilter, periodize_filter_fft};
pub use morlet::{GaborParams, gabor_2d, morlet_2d};
pub use padding::{PaddingPlan, compute_padding};
pub use path::{ScatteringPath, interleaved_to_grouped, scattering_paths};
pub use rustfft_backend::RustFftBackend;
pub use scattering2d::{Scattering2dExecutor, ScatteringCoefficient, ScatteringTensor};
pub use util::{coefficient_count, scattered_size};

use num_traits::AsPrimitive;
use std::sync::Arc;

/// Real sample type the scattering transform runs in.
pub trait ScatteringSample:
    rustfft::FftNum + num_traits::Float + Default + AsPrimitive<f64>
{
}

impl ScatteringSample for f32 {}
impl ScatteringSample for f64 {}

/// Options of a scattering executor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScatteringOptions {
    /// Number of orientations `L`.
    pub orientations: usize,
    /// Cascade depth, `1` or `2`.
    pub max_order: usize,
    /// Inputs arrive already padded to [`Scattering2dExecutor::padded_size`].
    pub pre_pad: bool,
    /// Signal extension used when padding internally.
    pub border_mode: BorderMode,
    /// Numeric backend, resolved once at construction.
    pub backend: BackendKind,
}

impl Default for ScatteringOptions {
    fn default() -> Self {
        Self {
            orientations: 8,
            max_order: 2,
            pre_pad: false,
            border_mode: BorderMode::Reflect101,
            backend: BackendKind::RustFft,
        }
    }
}

/// Factory for 2-D scattering executors in single and double precision.
pub struct Scatlet {}

impl Scatlet {
    fn resolve_backend<T: ScatteringSample>(
        kind: BackendKind,
    ) -> Arc<dyn ScatteringBackend<T> + Send + Sync>
    where
        f64: AsPrimitive<T>,
    {
        match kind {
            BackendKind::RustFft => Arc::new(RustFftBackend::<T>::new()),
        }
    }

    /// Internal implementation shared by every constructor.
    fn make_scattering2d_impl<T: ScatteringSample>(
        j: usize,
        shape: (usize, usize),
        options: ScatteringOptions,
        backend: Arc<dyn ScatteringBackend<T> + Send + Sync>,
    ) -> Result<Arc<dyn Scattering2dExecutor<T> + Send + Sync>, ScatletError>
    where
        f64: AsPrimitive<T>,
    {
        if j == 0 {
            return Err(ScatletError::ZeroScale);
        }
        if options.orientations == 0 {
            return Err(ScatletError::ZeroOrientations);
        }
        if options.max_order != 1 && options.max_order != 2 {
            return Err(ScatletError::InvalidMaxOrder(options.max_order));
        }
        let padding = PaddingPlan::new(
            shape.0,
            shape.1,
            j,
            options.border_mode,
            options.pre_pad,
        )?;
        let (padded_rows, padded_cols) = padding.padded_size();
        let filter_bank = FilterBank::build(padded_rows, padded_cols, j, options.orientations)?;
        let paths = scattering_paths(j, options.orientations, options.max_order);
        log::debug!(
            "scattering executor for {}x{} padded to {}x{}, {} channels, {} backend",
            shape.0,
            shape.1,
            padded_rows,
            padded_cols,
            paths.len(),
            backend.name()
        );
        Ok(Arc::new(Scattering2d {
            filter_bank: Arc::new(filter_bank),
            padding,
            backend,
            max_order: options.max_order,
            paths,
        }))
    }

    /// Creates a 2-D scattering executor for `f32` images.
    ///
    /// # Parameters
    /// - `j`: Number of octaves `J`, the window spans `2^J` samples.
    /// - `shape`: Unpadded spatial size `(M, N)`, `2^J` must not exceed either side.
    /// - `options`: Orientations, depth, padding and backend.
    ///
    /// # Returns
    /// A shareable executor, or a [`ScatletError`] for an invalid configuration.
    pub fn make_scattering2d_f32(
        j: usize,
        shape: (usize, usize),
        options: ScatteringOptions,
    ) -> Result<Arc<dyn Scattering2dExecutor<f32> + Send + Sync>, ScatletError> {
        Self::make_scattering2d_impl(j, shape, options, Self::resolve_backend(options.backend))
    }

    /// Creates a 2-D scattering executor for `f64` images.
    ///
    /// Same as `make_scattering2d_f32`, but for double-precision images.
    pub fn make_scattering2d_f64(
        j: usize,
        shape: (usize, usize),
        options: ScatteringOptions,
    ) -> Result<Arc<dyn Scattering2dExecutor<f64> + Send + Sync>, ScatletError> {
        Self::make_scattering2d_impl(j, shape, options, Self::resolve_backend(options.backend))
    }

    /// Creates a 2-D scattering executor running on a caller-provided backend.
    ///
    /// `options.backend` is ignored.
    pub fn make_scattering2d_with_backend<T: ScatteringSample>(
        j: usize,
        shape: (usize, usize),
        options: ScatteringOptions,
        backend: Arc<dyn ScatteringBackend<T> + Send + Sync>,
    ) -> Result<Arc<dyn Scattering2dExecutor<T> + Send + Sync>, ScatletError>
    where
        f64: AsPrimitive<T>,
    {
        Self::make_scattering2d_impl(j, shape, options, backend)
    }
}
