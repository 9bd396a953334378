//! Whole-buffer pixel passes.
//!
//! With the `parallel` feature rows are distributed over the rayon pool;
//! every pixel is independent, so the result matches the serial pass.
//!
//! ```rust
//! use retouch_core::{PixelBuffer, PixelLayout, Rgba};
//! use retouch_ops::apply::map_pixels;
//!
//! let mut buf = PixelBuffer::filled(4, 4, PixelLayout::Rgb, Rgba::opaque(10, 20, 30));
//! map_pixels(&mut buf, |px| Rgba::new(px.b, px.g, px.r, px.a));
//! assert_eq!(buf.pixel(0, 0), Rgba::opaque(30, 20, 10));
//! ```

use retouch_core::{PixelBuffer, PixelLayout, Rgba};
use tracing::debug;

use crate::op::PixelOp;
use crate::OpsResult;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[inline]
fn map_row<F>(row: &mut [u8], layout: PixelLayout, f: &F)
where
    F: Fn(Rgba) -> Rgba,
{
    for chunk in row.chunks_exact_mut(layout.channels()) {
        let px = layout.read(chunk);
        layout.write(chunk, f(px));
    }
}

/// Replaces every pixel with `f(pixel)` on the calling thread.
pub fn map_pixels_serial<F>(buffer: &mut PixelBuffer, f: F)
where
    F: Fn(Rgba) -> Rgba,
{
    if buffer.is_empty() {
        return;
    }
    let layout = buffer.layout();
    let row_bytes = buffer.row_bytes();
    for row in buffer.data_mut().chunks_exact_mut(row_bytes) {
        map_row(row, layout, &f);
    }
}

/// Replaces every pixel with `f(pixel)`.
///
/// Pixels are visited in no particular order. On an [`PixelLayout::Rgb`]
/// buffer `f` sees alpha 255 and the alpha it returns is dropped.
#[cfg(feature = "parallel")]
pub fn map_pixels<F>(buffer: &mut PixelBuffer, f: F)
where
    F: Fn(Rgba) -> Rgba + Sync + Send,
{
    if buffer.is_empty() {
        return;
    }
    let layout = buffer.layout();
    let row_bytes = buffer.row_bytes();
    buffer
        .data_mut()
        .par_chunks_mut(row_bytes)
        .for_each(|row| map_row(row, layout, &f));
}

/// Replaces every pixel with `f(pixel)`.
///
/// Pixels are visited in no particular order. On an [`PixelLayout::Rgb`]
/// buffer `f` sees alpha 255 and the alpha it returns is dropped.
#[cfg(not(feature = "parallel"))]
pub fn map_pixels<F>(buffer: &mut PixelBuffer, f: F)
where
    F: Fn(Rgba) -> Rgba + Sync + Send,
{
    map_pixels_serial(buffer, f);
}

/// Validates `op` and applies it to every pixel of `buffer`.
///
/// On error the buffer is left untouched.
pub fn apply_op(buffer: &mut PixelBuffer, op: &PixelOp) -> OpsResult<()> {
    let kernel = op.compile()?;
    debug!(
        op = %op,
        width = buffer.width(),
        height = buffer.height(),
        "applying pixel op"
    );
    map_pixels(buffer, |px| kernel.apply(px));
    Ok(())
}
