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

use crate::border_mode::BorderMode;
use crate::err::{ScatletError, try_vec};
use crate::util::{checked_scale, scattered_size};

/// Computes the padded support `(M_padded, N_padded)` for an input of `rows × cols`
/// analysed at scale `2^j`.
///
/// Each side is rounded up to a multiple of `2^j` with one extra `2^j` block of margin,
/// so after the final `2^j` decimation exactly one border sample remains on each side.
///
/// # Returns
/// The padded size, or a [`ScatletError`] if `2^j` overflows.
pub fn compute_padding(rows: usize, cols: usize, j: usize) -> Result<(usize, usize), ScatletError> {
    let scale = checked_scale(j).ok_or(ScatletError::ScaleExceedsSupport {
        scale: j,
        rows,
        cols,
    })?;
    let padded = |n: usize| ((n + scale) / scale + 1) * scale;
    Ok((padded(rows), padded(cols)))
}

/// Forward pad / inverse crop plan for one scattering configuration.
///
/// Built once at construction and immutable afterwards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PaddingPlan {
    rows: usize,
    cols: usize,
    padded_rows: usize,
    padded_cols: usize,
    scale: usize,
    pad_top: usize,
    pad_bottom: usize,
    pad_left: usize,
    pad_right: usize,
    border_mode: BorderMode,
    pre_pad: bool,
}

impl PaddingPlan {
    /// Creates a padding plan for `rows × cols` inputs at scale `2^j`.
    ///
    /// # Parameters
    /// - `rows`, `cols`: Unpadded spatial support `(M, N)`.
    /// - `j`: Number of octaves `J`.
    /// - `border_mode`: Signal extension used when padding internally.
    /// - `pre_pad`: If `true`, inputs are expected to arrive already padded.
    ///
    /// # Returns
    /// The plan, or a configuration error when the support is empty or
    /// `2^j` exceeds one of the dimensions.
    pub fn new(
        rows: usize,
        cols: usize,
        j: usize,
        border_mode: BorderMode,
        pre_pad: bool,
    ) -> Result<Self, ScatletError> {
        if rows == 0 || cols == 0 {
            return Err(ScatletError::ZeroSizedShape(rows, cols));
        }
        match checked_scale(j) {
            Some(scale) if scale <= rows && scale <= cols => {}
            _ => {
                return Err(ScatletError::ScaleExceedsSupport {
                    scale: j,
                    rows,
                    cols,
                });
            }
        }
        let (padded_rows, padded_cols) = compute_padding(rows, cols, j)?;
        Ok(Self {
            rows,
            cols,
            padded_rows,
            padded_cols,
            scale: j,
            pad_top: (padded_rows - rows) / 2,
            pad_bottom: (padded_rows - rows + 1) / 2,
            pad_left: (padded_cols - cols) / 2,
            pad_right: (padded_cols - cols + 1) / 2,
            border_mode,
            pre_pad,
        })
    }

    /// Unpadded spatial support `(M, N)`.
    pub fn unpadded_size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Padded spatial support `(M_padded, N_padded)`.
    pub fn padded_size(&self) -> (usize, usize) {
        (self.padded_rows, self.padded_cols)
    }

    /// Spatial size of a coefficient after the final decimation and crop.
    pub fn output_size(&self) -> (usize, usize) {
        scattered_size(self.rows, self.cols, self.scale)
    }

    /// Margins as `(top, bottom, left, right)`.
    pub fn margins(&self) -> (usize, usize, usize, usize) {
        (self.pad_top, self.pad_bottom, self.pad_left, self.pad_right)
    }

    pub fn border_mode(&self) -> BorderMode {
        self.border_mode
    }

    pub fn is_pre_padded(&self) -> bool {
        self.pre_pad
    }

    /// Spatial size the forward call expects for the current padding mode.
    pub fn expected_input_size(&self) -> (usize, usize) {
        if self.pre_pad {
            self.padded_size()
        } else {
            self.unpadded_size()
        }
    }

    /// Checks that a spatial size matches what [`Self::pad`] accepts.
    pub fn validate_input_size(&self, rows: usize, cols: usize) -> Result<(), ScatletError> {
        let expected = self.expected_input_size();
        if (rows, cols) == expected {
            return Ok(());
        }
        if self.pre_pad {
            Err(ScatletError::PaddedSpatialSizeMismatch {
                expected,
                actual: (rows, cols),
            })
        } else {
            Err(ScatletError::SpatialSizeMismatch {
                expected,
                actual: (rows, cols),
            })
        }
    }

    /// Produces the padded signal of size `(M_padded, N_padded)`.
    ///
    /// When the plan is pre-padded the signal is only validated and copied.
    ///
    /// # Parameters
    /// - `signal`: Row-major plane of `rows × cols` samples.
    pub fn pad<T: Copy + Default>(
        &self,
        signal: &[T],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<T>, ScatletError> {
        self.validate_input_size(rows, cols)?;
        if signal.len() != rows * cols {
            return Err(ScatletError::InputLayout(rows * cols, signal.len()));
        }
        if self.pre_pad {
            return Ok(signal.to_vec());
        }
        let mut padded = try_vec![T::default(); self.padded_rows * self.padded_cols];
        write_arena_2d(
            signal,
            &mut padded,
            (rows, cols),
            (self.pad_top, self.pad_left),
            self.padded_cols,
            self.border_mode,
        );
        Ok(padded)
    }

    /// Crops the one-sample border off a coefficient computed on the padded grid and
    /// decimated by `2^J`, yielding a `(M // 2^J, N // 2^J)` plane.
    pub fn unpad<T: Copy + Default>(
        &self,
        coefficient: &[T],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<T>, ScatletError> {
        let expected = (self.padded_rows >> self.scale, self.padded_cols >> self.scale);
        if (rows, cols) != expected || coefficient.len() != rows * cols {
            return Err(ScatletError::InOutSizesMismatch(
                coefficient.len(),
                expected.0 * expected.1,
            ));
        }
        let (out_rows, out_cols) = (rows - 2, cols - 2);
        let mut cropped = try_vec![T::default(); out_rows * out_cols];
        for (dst, src) in cropped
            .chunks_exact_mut(out_cols)
            .zip(coefficient.chunks_exact(cols).skip(1))
        {
            dst.copy_from_slice(&src[1..1 + out_cols]);
        }
        Ok(cropped)
    }
}

fn write_arena_2d<T: Copy + Default>(
    data: &[T],
    padded: &mut [T],
    (rows, cols): (usize, usize),
    (pad_top, pad_left): (usize, usize),
    padded_cols: usize,
    border_mode: BorderMode,
) {
    for (y, dst_row) in padded.chunks_exact_mut(padded_cols).enumerate() {
        let Some(src_y) = border_mode.source_index(y as isize - pad_top as isize, rows) else {
            dst_row.fill(T::default());
            continue;
        };
        let src_row = &data[src_y * cols..(src_y + 1) * cols];
        for (x, dst) in dst_row.iter_mut().enumerate() {
            *dst = border_mode
                .source_index(x as isize - pad_left as isize, cols)
                .map(|src_x| src_row[src_x])
                .unwrap_or_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_padding() {
        assert_eq!(compute_padding(32, 32, 3).unwrap(), (48, 48));
        assert_eq!(compute_padding(31, 33, 1).unwrap(), (34, 36));
        assert_eq!(compute_padding(32, 32, 5).unwrap(), (96, 96));
        assert_eq!(compute_padding(37, 32, 5).unwrap(), (96, 96));
    }

    #[test]
    fn test_margins_split() {
        let plan = PaddingPlan::new(31, 32, 2, BorderMode::Reflect101, false).unwrap();
        assert_eq!(plan.padded_size(), (36, 40));
        // odd amount puts the extra sample on the trailing side
        assert_eq!(plan.margins(), (2, 3, 4, 4));
    }

    #[test]
    fn test_scale_exceeds_support() {
        let err = PaddingPlan::new(10, 10, 10, BorderMode::Reflect101, false).unwrap_err();
        assert!(matches!(err, ScatletError::ScaleExceedsSupport { .. }));
        assert!(err.to_string().contains("smallest dimension"));
        assert!(PaddingPlan::new(0, 10, 1, BorderMode::Reflect101, false).is_err());
        assert!(PaddingPlan::new(8, 8, 3, BorderMode::Reflect101, false).is_ok());
    }

    #[test]
    fn test_pad_reflects() {
        let plan = PaddingPlan::new(4, 4, 1, BorderMode::Reflect101, false).unwrap();
        assert_eq!(plan.padded_size(), (8, 8));
        let signal: Vec<f64> = (0..16).map(|x| x as f64).collect();
        let padded = plan.pad(&signal, 4, 4).unwrap();
        assert_eq!(padded.len(), 64);
        // top-left margin of 2 mirrors rows/cols 2 and 1
        assert_eq!(padded[0], signal[2 * 4 + 2]);
        assert_eq!(padded[8 + 1], signal[4 + 1]);
        assert_eq!(padded[2 * 8 + 2], signal[0]);
        assert_eq!(padded[5 * 8 + 5], signal[15]);
        assert_eq!(padded[7 * 8 + 7], signal[4 + 1]);
    }

    #[test]
    fn test_pad_wider_than_signal() {
        let plan = PaddingPlan::new(2, 2, 1, BorderMode::Reflect101, false).unwrap();
        assert_eq!(plan.padded_size(), (6, 6));
        let padded = plan.pad(&[1., 2., 3., 4.], 2, 2).unwrap();
        let first_row = &padded[..6];
        assert_eq!(first_row, &[1., 2., 1., 2., 1., 2.]);
    }

    #[test]
    fn test_pad_rejects_sizes() {
        let plan = PaddingPlan::new(32, 32, 3, BorderMode::Reflect101, false).unwrap();
        let signal = vec![0f32; 31 * 31];
        let err = plan.pad(&signal, 31, 31).unwrap_err();
        assert!(matches!(err, ScatletError::SpatialSizeMismatch { .. }));

        let pre = PaddingPlan::new(32, 32, 3, BorderMode::Reflect101, true).unwrap();
        let err_pre = pre.pad(&signal, 31, 31).unwrap_err();
        assert!(matches!(err_pre, ScatletError::PaddedSpatialSizeMismatch { .. }));
        assert_ne!(err.to_string(), err_pre.to_string());
        assert!(err_pre.to_string().contains("Padded input must be of spatial size"));

        let err_layout = plan.pad(&signal, 32, 32).unwrap_err();
        assert!(matches!(err_layout, ScatletError::InputLayout(1024, 961)));
    }

    #[test]
    fn test_pre_pad_passthrough() {
        let plan = PaddingPlan::new(8, 8, 2, BorderMode::Reflect101, true).unwrap();
        let (pr, pc) = plan.padded_size();
        assert!(plan.is_pre_padded());
        assert_eq!(plan.expected_input_size(), (pr, pc));
        let signal: Vec<f64> = (0..pr * pc).map(|x| x as f64).collect();
        assert_eq!(plan.pad(&signal, pr, pc).unwrap(), signal);

        let plan = PaddingPlan::new(8, 8, 2, BorderMode::Reflect101, false).unwrap();
        assert!(!plan.is_pre_padded());
        assert_eq!(plan.expected_input_size(), (8, 8));
    }

    #[test]
    fn test_unpad_restores_extent() {
        for &(rows, cols, j) in &[(32, 32, 3), (31, 33, 1), (37, 32, 5), (8, 8, 2)] {
            let plan = PaddingPlan::new(rows, cols, j, BorderMode::Reflect101, false).unwrap();
            let signal = vec![1f64; rows * cols];
            let padded = plan.pad(&signal, rows, cols).unwrap();
            let (pr, pc) = plan.padded_size();
            assert_eq!(padded.len(), pr * pc);
            let stride = 1 << j;
            let decimated: Vec<f64> = padded
                .chunks_exact(pc)
                .step_by(stride)
                .flat_map(|row| row.iter().step_by(stride).copied())
                .collect();
            let cropped = plan.unpad(&decimated, pr >> j, pc >> j).unwrap();
            let (or, oc) = plan.output_size();
            assert_eq!(cropped.len(), or * oc);
            assert_eq!((or, oc), (rows >> j, cols >> j));
        }
    }

    #[test]
    fn test_unpad_crops_border() {
        let plan = PaddingPlan::new(8, 8, 2, BorderMode::Reflect101, false).unwrap();
        assert_eq!(plan.padded_size(), (16, 16));
        let coefficient: Vec<i32> = (0..16).collect();
        let cropped = plan.unpad(&coefficient, 4, 4).unwrap();
        assert_eq!(cropped, vec![5, 6, 9, 10]);
        assert!(plan.unpad(&coefficient, 2, 8).is_err());
    }

    #[test]
    fn test_zero_border() {
        let plan = PaddingPlan::new(2, 2, 1, BorderMode::Zeros, false).unwrap();
        assert_eq!(plan.border_mode(), BorderMode::Zeros);
        assert_eq!(plan.border_mode().to_string(), "Zeros");
        let padded = plan.pad(&[1., 2., 3., 4.], 2, 2).unwrap();
        assert_eq!(padded.iter().sum::<f64>(), 10.);
        assert_eq!(padded[0], 0.);
        assert_eq!(padded[2 * 6 + 2], 1.);
    }
}
