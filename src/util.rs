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

/// Computes the number of scattering coefficients (channels) produced for a given
/// scale count, orientation count and maximum order.
///
/// # Parameters
/// - `j`: Number of octaves `J`.
/// - `l`: Number of orientations `L`.
/// - `max_order`: Cascade depth, `1` or `2`.
///
/// # Returns
/// `1 + J·L` for the first order, plus `L²·J·(J - 1) / 2` when the second order is included.
#[inline]
pub fn coefficient_count(j: usize, l: usize, max_order: usize) -> usize {
    let first = 1 + j * l;
    if max_order >= 2 {
        first + l * l * j * j.saturating_sub(1) / 2
    } else {
        first
    }
}

/// Computes the spatial size of every scattering coefficient for an unpadded
/// input of `rows × cols` at scale `2^j`.
#[inline]
pub fn scattered_size(rows: usize, cols: usize, j: usize) -> (usize, usize) {
    (rows >> j, cols >> j)
}

/// Returns `2^j`, or `None` if it does not fit in `usize`.
#[inline]
pub(crate) fn checked_scale(j: usize) -> Option<usize> {
    u32::try_from(j).ok().and_then(|j| 1usize.checked_shl(j))
}

/// Row-major transpose of a `rows × cols` plane into `dst` (`cols × rows`).
pub(crate) fn transpose<V: Copy>(
    src: &[V],
    dst: &mut [V],
    rows: usize,
    cols: usize,
) -> Result<(), ScatletError> {
    if src.len() != rows * cols || dst.len() != src.len() {
        return Err(ScatletError::InOutSizesMismatch(src.len(), dst.len()));
    }
    for (y, row) in src.chunks_exact(cols).enumerate() {
        for (x, &v) in row.iter().enumerate() {
            dst[x * rows + y] = v;
        }
    }
    Ok(())
}
