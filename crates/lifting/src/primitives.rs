//! In-place lifting primitives on a strided buffer.
//!
//! At resolution `level` the buffer is split into blocks of `2^(level+1)`
//! samples. The first sample of each block is *even* (smooth), the sample
//! `2^level` further along is *odd* (detail). Every primitive touches only
//! one of the two classes, which is what makes each of them invertible for
//! any mask:
//!
//! | Forward | Inverse | Effect |
//! |---------|---------|--------|
//! | [`predict`] | [`ipredict`] | odd -= / += stencil(even) |
//! | [`update`] | [`iupdate`] | even += / -= stencil(odd) |
//! | [`scale_even`] | [`iscale_even`] | even *= / /= factor |
//! | [`scale_odd`] | [`iscale_odd`] | odd *= / /= factor |
//!
//! # Panics
//!
//! Every primitive panics if the layout length is not a multiple of
//! `2^(level+1)` or the backing slice is too short for the stride.

use crate::layout::Layout;

/// Tap offset of a stencil: `1 - len/2`, so symmetric masks are centered.
#[inline]
pub fn stencil_offset(mask_len: usize) -> i64 {
    1 - (mask_len / 2) as i64
}

#[inline]
fn even_position(block: usize, level: u32) -> usize {
    block << (level + 1)
}

#[inline]
fn odd_position(block: usize, level: u32) -> usize {
    ((block << 1) + 1) << level
}

/// Stencil applied to the even neighbours of odd block `i`.
fn prediction(samples: &[f64], layout: Layout, mask: &[f64], level: u32, i: usize) -> f64 {
    let blocks = layout.blocks(level);
    let offset = stencil_offset(mask.len());
    let mut sum = 0.0;
    for (j, &m) in mask.iter().enumerate() {
        let block = layout.resolve(i as i64 + j as i64 + offset, blocks);
        sum += m * samples[layout.at(even_position(block, level))];
    }
    sum
}

/// Stencil applied to the odd neighbours of even block `i`.
fn correction(samples: &[f64], layout: Layout, mask: &[f64], level: u32, i: usize) -> f64 {
    let blocks = layout.blocks(level);
    let offset = stencil_offset(mask.len());
    let mut sum = 0.0;
    for (j, &m) in mask.iter().enumerate() {
        // The odd sample left of even block k belongs to odd block k - 1.
        let block = layout.resolve(i as i64 + j as i64 + offset - 1, blocks);
        sum += m * samples[layout.at(odd_position(block, level))];
    }
    sum
}

/// Even blocks an update writes to. The first even sample of a clamped
/// buffer has no left neighbour and is left alone.
fn updated_blocks(layout: Layout, level: u32) -> std::ops::Range<usize> {
    let first = if layout.is_cyclic() { 0 } else { 1 };
    first.min(layout.blocks(level))..layout.blocks(level)
}

fn scaled_positions(
    layout: Layout,
    level: u32,
    first: usize,
    avoid_border: bool,
) -> std::iter::StepBy<std::ops::Range<usize>> {
    let step = 1usize << (level + 1);
    let margin = if avoid_border && !layout.is_cyclic() {
        step
    } else {
        0
    };
    let end = layout.len().saturating_sub(margin);
    (first + margin..end).step_by(step)
}

/// Subtracts the stencil prediction from every odd sample.
pub fn predict(samples: &mut [f64], layout: Layout, mask: &[f64], level: u32) {
    layout.check(samples, level);
    for i in 0..layout.blocks(level) {
        let p = prediction(samples, layout, mask, level, i);
        samples[layout.at(odd_position(i, level))] -= p;
    }
}

/// Adds the stencil prediction back to every odd sample.
pub fn ipredict(samples: &mut [f64], layout: Layout, mask: &[f64], level: u32) {
    layout.check(samples, level);
    for i in 0..layout.blocks(level) {
        let p = prediction(samples, layout, mask, level, i);
        samples[layout.at(odd_position(i, level))] += p;
    }
}

/// Adds the stencil correction of the odd neighbours to every even sample.
pub fn update(samples: &mut [f64], layout: Layout, mask: &[f64], level: u32) {
    layout.check(samples, level);
    for i in updated_blocks(layout, level) {
        let c = correction(samples, layout, mask, level, i);
        samples[layout.at(even_position(i, level))] += c;
    }
}

/// Removes the stencil correction from every even sample.
pub fn iupdate(samples: &mut [f64], layout: Layout, mask: &[f64], level: u32) {
    layout.check(samples, level);
    for i in updated_blocks(layout, level) {
        let c = correction(samples, layout, mask, level, i);
        samples[layout.at(even_position(i, level))] -= c;
    }
}

/// Multiplies the even samples by `factor`.
///
/// With `avoid_border` on a clamped layout the first and last even sample
/// keep their value.
pub fn scale_even(
    samples: &mut [f64],
    layout: Layout,
    factor: f64,
    level: u32,
    avoid_border: bool,
) {
    layout.check(samples, level);
    for i in scaled_positions(layout, level, 0, avoid_border) {
        samples[layout.at(i)] *= factor;
    }
}

/// Divides the even samples by `factor`.
pub fn iscale_even(
    samples: &mut [f64],
    layout: Layout,
    factor: f64,
    level: u32,
    avoid_border: bool,
) {
    layout.check(samples, level);
    for i in scaled_positions(layout, level, 0, avoid_border) {
        samples[layout.at(i)] /= factor;
    }
}

/// Multiplies the odd samples by `factor`.
///
/// With `avoid_border` on a clamped layout the first and last odd sample
/// keep their value.
pub fn scale_odd(samples: &mut [f64], layout: Layout, factor: f64, level: u32, avoid_border: bool) {
    layout.check(samples, level);
    for i in scaled_positions(layout, level, 1 << level, avoid_border) {
        samples[layout.at(i)] *= factor;
    }
}

/// Divides the odd samples by `factor`.
pub fn iscale_odd(
    samples: &mut [f64],
    layout: Layout,
    factor: f64,
    level: u32,
    avoid_border: bool,
) {
    layout.check(samples, level);
    for i in scaled_positions(layout, level, 1 << level, avoid_border) {
        samples[layout.at(i)] /= factor;
    }
}
