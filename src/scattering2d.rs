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
use crate::cascade::ScatteringCascade;
use crate::err::{ScatletError, try_vec};
use crate::filter_bank::FilterBank;
use crate::padding::PaddingPlan;
use crate::path::ScatteringPath;
use num_traits::AsPrimitive;
use std::sync::Arc;

/// Dense scattering output.
///
/// `shape` is the batch shape of the input followed by `[K, M // 2^J, N // 2^J]`,
/// `data` is row-major over that shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringTensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

/// One scattering channel for every sample of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringCoefficient<T> {
    /// Path that produced this channel.
    pub path: ScatteringPath,
    /// Batch shape followed by `[M // 2^J, N // 2^J]`.
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

/// Trait for computing the **2-D windowed scattering transform**.
///
/// Implementations are immutable after construction and may be called from
/// several threads at once.
pub trait Scattering2dExecutor<T>: Send + Sync {
    /// Computes the scattering coefficients of a batch of images.
    ///
    /// # Parameters
    /// - `input`: Row-major samples, contiguous for `shape`.
    /// - `shape`: Any number of leading batch dimensions followed by the spatial
    ///   size `(M, N)`, or `(M_padded, N_padded)` when the executor is pre-padded.
    ///
    /// # Returns
    /// A [`ScatteringTensor`] of shape `batch ++ [K, M // 2^J, N // 2^J]`, or a
    /// [`ScatletError`] when the shape or the layout is rejected.
    fn scattering(&self, input: &[T], shape: &[usize]) -> Result<ScatteringTensor<T>, ScatletError>;

    /// Computes the scattering coefficients as one entry per path.
    ///
    /// Same validation as [`Self::scattering`]. Entries follow the channel order
    /// of the dense output.
    fn scattering_paths(
        &self,
        input: &[T],
        shape: &[usize],
    ) -> Result<Vec<ScatteringCoefficient<T>>, ScatletError>;

    /// Output shape for an input of `shape`.
    fn output_shape(&self, shape: &[usize]) -> Result<Vec<usize>, ScatletError>;

    /// Padded support the filters are defined on.
    fn padded_size(&self) -> (usize, usize);

    /// Spatial size of one output channel.
    fn output_size(&self) -> (usize, usize);

    /// Number of channels `K`.
    fn coefficient_count(&self) -> usize;

    /// Channel metadata in output order.
    fn paths(&self) -> &[ScatteringPath];

    fn filter_bank(&self) -> &FilterBank<T>;

    fn padding(&self) -> &PaddingPlan;

    fn max_order(&self) -> usize;

    fn scale(&self) -> usize;

    fn orientations(&self) -> usize;
}

pub(crate) struct Scattering2d<T> {
    pub(crate) filter_bank: Arc<FilterBank<T>>,
    pub(crate) padding: PaddingPlan,
    pub(crate) backend: Arc<dyn ScatteringBackend<T> + Send + Sync>,
    pub(crate) max_order: usize,
    pub(crate) paths: Vec<ScatteringPath>,
}

/// Validated view of an input shape.
struct BatchLayout {
    batch_shape: Vec<usize>,
    batch: usize,
    rows: usize,
    cols: usize,
}

impl<T: ScatteringSample> Scattering2d<T>
where
    f64: AsPrimitive<T>,
{
    fn layout(&self, input_len: usize, shape: &[usize]) -> Result<BatchLayout, ScatletError> {
        if shape.len() < 2 {
            return Err(ScatletError::InputRank(shape.len()));
        }
        let (batch_shape, spatial) = shape.split_at(shape.len() - 2);
        let (rows, cols) = (spatial[0], spatial[1]);
        self.padding.validate_input_size(rows, cols)?;
        let batch = batch_shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or(ScatletError::InputLayout(usize::MAX, input_len))?;
        let expected = batch
            .checked_mul(rows * cols)
            .ok_or(ScatletError::InputLayout(usize::MAX, input_len))?;
        if expected != input_len {
            return Err(ScatletError::InputLayout(expected, input_len));
        }
        Ok(BatchLayout {
            batch_shape: batch_shape.to_vec(),
            batch,
            rows,
            cols,
        })
    }

    /// Coefficients of every sample, each as a list of channels.
    fn scatter_batch(
        &self,
        input: &[T],
        layout: &BatchLayout,
    ) -> Result<Vec<Vec<Vec<T>>>, ScatletError> {
        let cascade = ScatteringCascade {
            backend: self.backend.as_ref(),
            filter_bank: self.filter_bank.as_ref(),
            padding: &self.padding,
            max_order: self.max_order,
        };
        log::trace!(
            "scattering {} samples of {}x{} with {} backend",
            layout.batch,
            layout.rows,
            layout.cols,
            self.backend.name()
        );
        let plane = layout.rows * layout.cols;
        let mut samples = Vec::with_capacity(layout.batch);
        for sample in input.chunks_exact(plane) {
            let padded = self.padding.pad(sample, layout.rows, layout.cols)?;
            samples.push(cascade.scatter(&padded)?);
        }
        Ok(samples)
    }
}

impl<T: ScatteringSample> Scattering2dExecutor<T> for Scattering2d<T>
where
    f64: AsPrimitive<T>,
{
    fn scattering(&self, input: &[T], shape: &[usize]) -> Result<ScatteringTensor<T>, ScatletError> {
        let layout = self.layout(input.len(), shape)?;
        let samples = self.scatter_batch(input, &layout)?;
        let (out_rows, out_cols) = self.padding.output_size();
        let channel = out_rows * out_cols;
        let count = self.paths.len();

        let length = layout
            .batch
            .checked_mul(count * channel)
            .ok_or(ScatletError::OutOfMemory(usize::MAX))?;
        let mut data = try_vec![T::zero(); length];
        for (dst, sample) in data.chunks_exact_mut(count * channel).zip(samples.iter()) {
            for (dst_channel, coefficient) in dst.chunks_exact_mut(channel).zip(sample.iter()) {
                dst_channel.copy_from_slice(coefficient);
            }
        }

        let mut out_shape = layout.batch_shape;
        out_shape.extend_from_slice(&[count, out_rows, out_cols]);
        Ok(ScatteringTensor {
            shape: out_shape,
            data,
        })
    }

    fn scattering_paths(
        &self,
        input: &[T],
        shape: &[usize],
    ) -> Result<Vec<ScatteringCoefficient<T>>, ScatletError> {
        let layout = self.layout(input.len(), shape)?;
        let samples = self.scatter_batch(input, &layout)?;
        let (out_rows, out_cols) = self.padding.output_size();
        let channel = out_rows * out_cols;

        let mut coefficient_shape = layout.batch_shape.clone();
        coefficient_shape.extend_from_slice(&[out_rows, out_cols]);

        let mut coefficients = Vec::with_capacity(self.paths.len());
        for (k, path) in self.paths.iter().enumerate() {
            let mut data = try_vec![T::zero(); layout.batch * channel];
            for (dst, sample) in data.chunks_exact_mut(channel).zip(samples.iter()) {
                dst.copy_from_slice(&sample[k]);
            }
            coefficients.push(ScatteringCoefficient {
                path: path.clone(),
                shape: coefficient_shape.clone(),
                data,
            });
        }
        Ok(coefficients)
    }

    fn output_shape(&self, shape: &[usize]) -> Result<Vec<usize>, ScatletError> {
        if shape.len() < 2 {
            return Err(ScatletError::InputRank(shape.len()));
        }
        let (batch_shape, spatial) = shape.split_at(shape.len() - 2);
        self.padding.validate_input_size(spatial[0], spatial[1])?;
        let (out_rows, out_cols) = self.padding.output_size();
        let mut out_shape = batch_shape.to_vec();
        out_shape.extend_from_slice(&[self.paths.len(), out_rows, out_cols]);
        Ok(out_shape)
    }

    fn padded_size(&self) -> (usize, usize) {
        self.padding.padded_size()
    }

    fn output_size(&self) -> (usize, usize) {
        self.padding.output_size()
    }

    fn coefficient_count(&self) -> usize {
        self.paths.len()
    }

    fn paths(&self) -> &[ScatteringPath] {
        &self.paths
    }

    fn filter_bank(&self) -> &FilterBank<T> {
        &self.filter_bank
    }

    fn padding(&self) -> &PaddingPlan {
        &self.padding
    }

    fn max_order(&self) -> usize {
        self.max_order
    }

    fn scale(&self) -> usize {
        self.filter_bank.scale()
    }

    fn orientations(&self) -> usize {
        self.filter_bank.orientations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::interleaved_to_grouped;
    use crate::util::coefficient_count;
    use crate::{Scatlet, ScatteringOptions};

    fn noise(length: usize, seed: usize) -> Vec<f64> {
        (0..length)
            .map(|i| (((i + seed) * 7919 + 13) % 1021) as f64 / 1021.)
            .collect()
    }

    #[test]
    fn test_reference_configuration() {
        let _ = env_logger::builder().is_test(true).try_init();
        let executor =
            Scatlet::make_scattering2d_f64(3, (32, 32), ScatteringOptions::default()).unwrap();
        assert_eq!(executor.coefficient_count(), 217);
        assert_eq!(executor.padded_size(), (48, 48));
        assert_eq!(executor.output_size(), (4, 4));
        let input = noise(32 * 32, 0);
        let output = executor.scattering(&input, &[32, 32]).unwrap();
        assert_eq!(output.shape, vec![217, 4, 4]);
        assert_eq!(output.data.len(), 217 * 16);
        assert!(output.data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_configuration_errors() {
        let err = Scatlet::make_scattering2d_f64(10, (10, 10), ScatteringOptions::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("smallest dimension"));

        let executor = Scatlet::make_scattering2d_f64(
            3,
            (32, 32),
            ScatteringOptions {
                pre_pad: true,
                ..Default::default()
            },
        )
        .unwrap();
        let err_pre = executor.scattering(&[0.; 32 * 32], &[32, 32]).unwrap_err();
        assert!(err_pre.to_string().contains("Padded input must be of spatial size"));

        let executor =
            Scatlet::make_scattering2d_f64(3, (32, 32), ScatteringOptions::default()).unwrap();
        let err = executor.scattering(&[0.; 48 * 48], &[48, 48]).unwrap_err();
        assert!(err.to_string().contains("Input must be of spatial size"));
        assert_ne!(err, err_pre);
    }

    #[test]
    fn test_input_rank_and_layout() {
        let executor =
            Scatlet::make_scattering2d_f64(2, (16, 16), ScatteringOptions::default()).unwrap();
        let err = executor.scattering(&[], &[]).unwrap_err();
        assert_eq!(err, ScatletError::InputRank(0));
        assert!(err.to_string().contains("at least two dimensions"));
        assert_eq!(
            executor.scattering(&[0.; 32], &[32]).unwrap_err(),
            ScatletError::InputRank(1)
        );
        assert_eq!(
            executor.scattering(&[0.; 255], &[16, 16]).unwrap_err(),
            ScatletError::InputLayout(256, 255)
        );
        assert_eq!(
            executor.scattering(&[0.; 256], &[2, 16, 16]).unwrap_err(),
            ScatletError::InputLayout(512, 256)
        );
        // batch dimensions whose product overflows are a layout error
        assert_eq!(
            executor
                .scattering(&[0.; 256], &[usize::MAX / 2 + 1, 2, 16, 16])
                .unwrap_err(),
            ScatletError::InputLayout(usize::MAX, 256)
        );
        assert_eq!(
            executor
                .scattering(&[0.; 256], &[usize::MAX / 256 + 1, 16, 16])
                .unwrap_err(),
            ScatletError::InputLayout(usize::MAX, 256)
        );
    }

    #[test]
    fn test_batch_shape_agnostic() {
        let executor =
            Scatlet::make_scattering2d_f64(2, (16, 16), ScatteringOptions::default()).unwrap();
        let k = executor.coefficient_count();
        let single = noise(256, 0);
        let reference = executor.scattering(&single, &[16, 16]).unwrap();
        assert_eq!(reference.shape, vec![k, 4, 4]);

        let unit = executor.scattering(&single, &[1, 16, 16]).unwrap();
        assert_eq!(unit.shape, vec![1, k, 4, 4]);
        assert_eq!(unit.data, reference.data);

        let mut pair = single.clone();
        pair.extend(noise(256, 11));
        let batched = executor.scattering(&pair, &[2, 16, 16]).unwrap();
        assert_eq!(batched.shape, vec![2, k, 4, 4]);
        assert_eq!(&batched.data[..k * 16], &reference.data[..]);

        let second = executor.scattering(&pair[256..], &[16, 16]).unwrap();
        assert_eq!(&batched.data[k * 16..], &second.data[..]);

        let mut quad = pair.clone();
        quad.extend_from_slice(&pair);
        let nested = executor.scattering(&quad, &[2, 2, 16, 16]).unwrap();
        assert_eq!(nested.shape, vec![2, 2, k, 4, 4]);
        assert_eq!(&nested.data[2 * k * 16..], &batched.data[..]);
        assert_eq!(
            executor.output_shape(&[2, 2, 16, 16]).unwrap(),
            nested.shape
        );

        let empty = executor.scattering(&[], &[0, 16, 16]).unwrap();
        assert_eq!(empty.shape, vec![0, k, 4, 4]);
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_input_size_agnostic() {
        for &n in &[31usize, 32, 33] {
            for &j in &[1usize, 2, 4] {
                let executor =
                    Scatlet::make_scattering2d_f32(j, (n, n), ScatteringOptions::default())
                        .unwrap();
                let input = vec![0.5f32; n * n];
                let output = executor.scattering(&input, &[n, n]).unwrap();
                assert_eq!(output.shape, vec![coefficient_count(j, 8, 2), n >> j, n >> j]);
            }
        }
        let executor =
            Scatlet::make_scattering2d_f32(5, (37, 32), ScatteringOptions::default()).unwrap();
        let output = executor
            .scattering(&vec![1f32; 37 * 32], &[37, 32])
            .unwrap();
        assert_eq!(&output.shape[1..], &[1, 1]);
    }

    #[test]
    fn test_zero_input() {
        let executor =
            Scatlet::make_scattering2d_f64(2, (16, 16), ScatteringOptions::default()).unwrap();
        let output = executor.scattering(&[0.; 256], &[16, 16]).unwrap();
        assert!(output.data.iter().all(|&v| v == 0.));
    }

    #[test]
    fn test_constant_input() {
        let executor =
            Scatlet::make_scattering2d_f64(2, (24, 24), ScatteringOptions::default()).unwrap();
        let output = executor.scattering(&vec![2.; 24 * 24], &[24, 24]).unwrap();
        let channel = 36;
        let dc = 2. * std::f64::consts::PI / 3.1415;
        for &v in &output.data[..channel] {
            assert!(
                (v - dc).abs() < 1e-6,
                "difference expected to be < 1e-6, but values were ref {}, derived {}",
                dc,
                v
            );
        }
        for &v in &output.data[channel..] {
            assert!(v.abs() < 1e-6, "band-pass channel expected to vanish, but it was {v}");
        }
    }

    #[test]
    fn test_first_order_is_prefix() {
        let first = Scatlet::make_scattering2d_f64(
            2,
            (16, 16),
            ScatteringOptions {
                max_order: 1,
                ..Default::default()
            },
        )
        .unwrap();
        let second =
            Scatlet::make_scattering2d_f64(2, (16, 16), ScatteringOptions::default()).unwrap();
        assert_eq!(first.coefficient_count(), 17);
        assert_eq!(second.coefficient_count(), 81);
        let input = noise(256, 5);
        let a = first.scattering(&input, &[16, 16]).unwrap();
        let b = second.scattering(&input, &[16, 16]).unwrap();
        for (x, y) in a.data.iter().zip(b.data[..17 * 16].iter()) {
            assert!(
                (x - y).abs() < 1e-12,
                "difference expected to be < 1e-12, but values were ref {}, derived {}",
                y,
                x
            );
        }
    }

    #[test]
    fn test_paths_follow_dense_order() {
        let executor =
            Scatlet::make_scattering2d_f64(3, (16, 16), ScatteringOptions::default()).unwrap();
        let input = noise(2 * 256, 3);
        let dense = executor.scattering(&input, &[2, 16, 16]).unwrap();
        let list = executor.scattering_paths(&input, &[2, 16, 16]).unwrap();
        let k = executor.coefficient_count();
        assert_eq!(list.len(), k);
        for (n, coefficient) in list.iter().enumerate() {
            assert_eq!(&coefficient.path, &executor.paths()[n]);
            assert_eq!(coefficient.shape, vec![2, 2, 2]);
            for b in 0..2 {
                let from_dense = &dense.data[(b * k + n) * 4..(b * k + n + 1) * 4];
                assert_eq!(&coefficient.data[b * 4..(b + 1) * 4], from_dense);
            }
        }

        // reordering the interleaved list reproduces the grouped stack
        let mut interleaved = vec![list[0].clone()];
        for (n1, first) in list.iter().enumerate().filter(|(_, c)| c.path.order == 1) {
            interleaved.push(first.clone());
            interleaved.extend(
                list.iter()
                    .filter(|c| c.path.order == 2 && c.path.n[0] == n1 - 1)
                    .cloned(),
            );
        }
        let positions = interleaved_to_grouped(3, 8);
        for (k, &p) in positions.iter().enumerate() {
            assert_eq!(interleaved[p].path, list[k].path);
        }
    }

    #[test]
    fn test_concurrent_calls() {
        let executor =
            Scatlet::make_scattering2d_f64(2, (16, 16), ScatteringOptions::default()).unwrap();
        let input = noise(256, 7);
        let reference = executor.scattering(&input, &[16, 16]).unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| executor.scattering(&input, &[16, 16]).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), reference);
            }
        });
    }

    #[test]
    fn test_single_precision_matches_double() {
        let options = ScatteringOptions::default();
        let single = Scatlet::make_scattering2d_f32(2, (16, 16), options).unwrap();
        let double = Scatlet::make_scattering2d_f64(2, (16, 16), options).unwrap();
        let input = noise(256, 1);
        let input_f32: Vec<f32> = input.iter().map(|&v| v as f32).collect();
        let a = single.scattering(&input_f32, &[16, 16]).unwrap();
        let b = double.scattering(&input, &[16, 16]).unwrap();
        for (&x, &y) in a.data.iter().zip(b.data.iter()) {
            assert!(
                (x as f64 - y).abs() < 1e-4,
                "difference expected to be < 1e-4, but values were ref {}, derived {}",
                y,
                x
            );
        }
    }

    #[test]
    fn test_accessors() {
        let executor = Scatlet::make_scattering2d_f32(
            2,
            (20, 24),
            ScatteringOptions {
                orientations: 4,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(executor.scale(), 2);
        assert_eq!(executor.orientations(), 4);
        assert_eq!(executor.max_order(), 2);
        assert_eq!(executor.padded_size(), (28, 32));
        assert_eq!(executor.filter_bank().size(), (28, 32));
        assert_eq!(executor.padding().output_size(), (5, 6));
        assert_eq!(executor.paths().len(), coefficient_count(2, 4, 2));
    }
}
