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

/// Labels one channel of the scattering output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScatteringPath {
    /// Cascade depth, `0`, `1` or `2`.
    pub order: usize,
    /// Scale index of every wavelet along the path, increasing.
    pub j: Vec<usize>,
    /// Orientation index of every wavelet along the path.
    pub theta: Vec<usize>,
    /// Position of every wavelet in the band-pass filter list.
    pub n: Vec<usize>,
}

/// Enumerates the scattering paths in output order.
///
/// Order 0 comes first, followed by every order-1 path by increasing `j1` then `θ1`,
/// followed by every order-2 path by increasing `j1`, `θ1`, `j2 > j1`, `θ2`.
pub fn scattering_paths(j: usize, l: usize, max_order: usize) -> Vec<ScatteringPath> {
    let mut paths = vec![ScatteringPath {
        order: 0,
        j: vec![],
        theta: vec![],
        n: vec![],
    }];
    let mut second = Vec::new();
    for j1 in 0..j {
        for theta1 in 0..l {
            let n1 = j1 * l + theta1;
            paths.push(ScatteringPath {
                order: 1,
                j: vec![j1],
                theta: vec![theta1],
                n: vec![n1],
            });
            if max_order < 2 {
                continue;
            }
            for j2 in j1 + 1..j {
                for theta2 in 0..l {
                    second.push(ScatteringPath {
                        order: 2,
                        j: vec![j1, j2],
                        theta: vec![theta1, theta2],
                        n: vec![n1, j2 * l + theta2],
                    });
                }
            }
        }
    }
    paths.extend(second);
    paths
}

/// Positions that turn an interleaved second-order layout into the output layout.
///
/// In the interleaved layout every order-1 channel is immediately followed by its
/// order-2 children. Picking `interleaved[positions[k]]` for every `k` yields the
/// grouped `order 0 | order 1 | order 2` stack.
pub fn interleaved_to_grouped(j: usize, l: usize) -> Vec<usize> {
    let mut first = Vec::with_capacity(j * l);
    let mut second = Vec::with_capacity(l * l * j * j.saturating_sub(1) / 2);
    let mut n = 0usize;
    for j1 in 0..j {
        for _ in 0..l {
            n += 1;
            first.push(n);
            for _ in j1 + 1..j {
                for _ in 0..l {
                    n += 1;
                    second.push(n);
                }
            }
        }
    }
    let mut positions = Vec::with_capacity(1 + first.len() + second.len());
    positions.push(0);
    positions.extend(first);
    positions.extend(second);
    positions
}
