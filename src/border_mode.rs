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

use std::fmt::{Display, Formatter};

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
/// Declares how a signal is extended when it is padded up to the filter bank support
pub enum BorderMode {
    /// Edge sample replicated across the margin `aaaaaa|abcdefgh|hhhhhhh`
    Clamp,
    /// Signal is tiled periodically `cdefgh|abcdefgh|abcdefg`
    Wrap,
    /// Mirror including the edge sample `fedcba|abcdefgh|hgfedcb`
    Reflect,
    /// Mirror excluding the edge sample `gfedcb|abcdefgh|gfedcba`.
    ///
    /// This is the extension the scattering coefficients are calibrated against.
    #[default]
    Reflect101,
    /// Margin is filled with zeros `000000|abcdefgh|000000`
    Zeros,
}

impl Display for BorderMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BorderMode::Clamp => f.write_str("Clamp"),
            BorderMode::Wrap => f.write_str("Wrap"),
            BorderMode::Reflect => f.write_str("Reflect"),
            BorderMode::Reflect101 => f.write_str("Reflect101"),
            BorderMode::Zeros => f.write_str("Zeros"),
        }
    }
}

impl BorderMode {
    /// Maps a position of the extended signal onto the source index it replicates.
    ///
    /// Works for margins of any width, so a pad wider than the signal keeps mirroring
    /// back and forth. Returns `None` when the position reads an implicit zero.
    #[inline]
    pub(crate) fn source_index(self, position: isize, length: usize) -> Option<usize> {
        let n = length as isize;
        if (0..n).contains(&position) {
            return Some(position as usize);
        }
        match self {
            BorderMode::Clamp => Some(position.clamp(0, n - 1) as usize),
            BorderMode::Wrap => Some(position.rem_euclid(n) as usize),
            BorderMode::Reflect => {
                let period = 2 * n;
                let folded = position.rem_euclid(period);
                Some(if folded >= n {
                    (period - 1 - folded) as usize
                } else {
                    folded as usize
                })
            }
            BorderMode::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n - 1);
                let folded = position.rem_euclid(period);
                Some(if folded >= n {
                    (period - folded) as usize
                } else {
                    folded as usize
                })
            }
            BorderMode::Zeros => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extend(mode: BorderMode, length: usize, from: isize, to: isize) -> Vec<Option<usize>> {
        (from..to).map(|x| mode.source_index(x, length)).collect()
    }

    #[test]
    fn test_reflect101_matches_numpy_reflect() {
        // np.pad([0, 1, 2, 3], 5, mode="reflect")
        let extended = extend(BorderMode::Reflect101, 4, -5, 9);
        let expected = [1, 2, 3, 2, 1, 0, 1, 2, 3, 2, 1, 0, 1, 2];
        for (i, (&got, &want)) in extended.iter().zip(expected.iter()).enumerate() {
            assert_eq!(got, Some(want), "position {} mismatched", i as isize - 5);
        }
    }

    #[test]
    fn test_reflect_repeats_edge() {
        let extended = extend(BorderMode::Reflect, 3, -4, 7);
        let expected = [2, 2, 1, 0, 0, 1, 2, 2, 1, 0, 0];
        for (&got, &want) in extended.iter().zip(expected.iter()) {
            assert_eq!(got, Some(want));
        }
    }

    #[test]
    fn test_other_modes() {
        assert_eq!(BorderMode::Clamp.source_index(-3, 5), Some(0));
        assert_eq!(BorderMode::Clamp.source_index(9, 5), Some(4));
        assert_eq!(BorderMode::Wrap.source_index(-1, 5), Some(4));
        assert_eq!(BorderMode::Wrap.source_index(5, 5), Some(0));
        assert_eq!(BorderMode::Zeros.source_index(-1, 5), None);
        assert_eq!(BorderMode::Zeros.source_index(2, 5), Some(2));
        assert_eq!(BorderMode::Reflect101.source_index(-7, 1), Some(0));
    }
}
