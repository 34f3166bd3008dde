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

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScatletError {
    OutOfMemory(usize),
    ZeroScale,
    ZeroOrientations,
    InvalidMaxOrder(usize),
    ZeroSizedShape(usize, usize),
    ScaleExceedsSupport {
        scale: usize,
        rows: usize,
        cols: usize,
    },
    NonDivisibleSize(usize, usize),
    UnsupportedBackend(String),
    InputRank(usize),
    SpatialSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    PaddedSpatialSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    InputLayout(usize, usize),
    InOutSizesMismatch(usize, usize),
    SubsampleStride(usize, usize, usize),
    MissingResolution(usize),
}

impl Error for ScatletError {}

impl std::fmt::Display for ScatletError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScatletError::OutOfMemory(length) => {
                f.write_fmt(format_args!("Cannot allocate {length} elements to vector"))
            }
            ScatletError::ZeroScale => f.write_str("Scale J must be at least 1"),
            ScatletError::ZeroOrientations => {
                f.write_str("Number of orientations L must be at least 1")
            }
            ScatletError::InvalidMaxOrder(order) => {
                f.write_fmt(format_args!("Max order must be 1 or 2, but it was {order}"))
            }
            ScatletError::ZeroSizedShape(rows, cols) => {
                f.write_fmt(format_args!("Spatial shape must be positive, but it was ({rows},{cols})"))
            }
            ScatletError::ScaleExceedsSupport { scale, rows, cols } => {
                f.write_fmt(format_args!("The smallest dimension should be larger than 2^J, but 2^{scale} exceeds ({rows},{cols})"))
            }
            ScatletError::NonDivisibleSize(size, divisor) => {
                f.write_fmt(format_args!("Size {size} must be divisible by {divisor}"))
            }
            ScatletError::UnsupportedBackend(name) => {
                f.write_fmt(format_args!("Backend '{name}' is not supported"))
            }
            ScatletError::InputRank(rank) => {
                f.write_fmt(format_args!("Input must have at least two dimensions, but it had {rank}"))
            }
            ScatletError::SpatialSizeMismatch { expected, actual } => {
                f.write_fmt(format_args!("Input must be of spatial size ({},{}), but it was ({},{})", expected.0, expected.1, actual.0, actual.1))
            }
            ScatletError::PaddedSpatialSizeMismatch { expected, actual } => {
                f.write_fmt(format_args!("Padded input must be of spatial size ({},{}), but it was ({},{})", expected.0, expected.1, actual.0, actual.1))
            }
            ScatletError::InputLayout(expected, actual) => {
                f.write_fmt(format_args!("Input must be contiguous with {expected} elements for its shape, but it had {actual}"))
            }
            ScatletError::InOutSizesMismatch(input_size, output_size) => {
                f.write_fmt(format_args!("Input size {input_size} does not match output size {output_size}"))
            }
            ScatletError::SubsampleStride(rows, cols, stride) => {
                f.write_fmt(format_args!("Plane ({rows},{cols}) can't be subsampled with stride {stride}"))
            }
            ScatletError::MissingResolution(resolution) => {
                f.write_fmt(format_args!("Filter is not materialized at resolution {resolution}"))
            }
        }
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::err::ScatletError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

use std::error::Error;
use std::fmt::Formatter;
pub(crate) use try_vec;
