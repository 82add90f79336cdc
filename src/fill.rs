//! Flood fill over a [`RasterBuffer`].
//!
//! The fill walks an explicit work stack instead of recursing, so a
//! 2000x2000 single-color canvas cannot overflow the call stack. Cost is
//! O(width * height) in the worst case and runs on the caller's thread.

use crate::color::Color;
use crate::error::PaintResult;
use crate::raster::RasterBuffer;

/// Replace the 4-connected region of the seed pixel's color with `fill_color`.
///
/// Returns the number of pixels changed; `0` means the seed already had
/// `fill_color` and nothing was touched. Fails with `OutOfBounds` only when
/// the seed itself is off the canvas.
pub fn flood_fill(
    buffer: &mut RasterBuffer,
    seed_x: i32,
    seed_y: i32,
    fill_color: Color,
) -> PaintResult<usize> {
    let target = buffer.get_pixel(seed_x, seed_y)?;
    if target == fill_color {
        return Ok(0);
    }

    let mut filled = 0;
    let mut stack = vec![(seed_x, seed_y)];

    while let Some((x, y)) = stack.pop() {
        match buffer.get_pixel(x, y) {
            Ok(color) if color == target => {}
            _ => continue,
        }

        buffer.set_pixel(x, y, fill_color)?;
        filled += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    log::debug!(
        "Flood fill at ({}, {}) replaced {} pixels of {} with {}",
        seed_x,
        seed_y,
        filled,
        target,
        fill_color
    );
    Ok(filled)
}
