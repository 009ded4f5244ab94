//! Pure dimension math for placing a source image on an icon canvas.
//!
//! No I/O, no image data: everything here is unit tested against plain
//! numbers and shared by the real backend and the planning code.

use crate::types::Dimensions;

/// Size of `source` after shrinking it to fit inside `bounds`.
///
/// Follows the usual thumbnail rule:
/// - a source that already fits is returned unchanged (never upscaled)
/// - otherwise the constraining axis becomes the bound and the other axis is
///   the floor or ceiling of the exact value, whichever keeps the aspect
///   ratio closer (ties go to the floor), and at least 1
pub fn fit_within(source: Dimensions, bounds: Dimensions) -> Dimensions {
    if source.fits_within(bounds) || source.width == 0 || source.height == 0 {
        return source;
    }

    let aspect = source.width as f64 / source.height as f64;
    let (bound_w, bound_h) = (bounds.width as f64, bounds.height as f64);

    if bound_w / bound_h >= aspect {
        let width = round_aspect(bound_h * aspect, |n| (aspect - n / bound_h).abs());
        Dimensions::new(width, bounds.height)
    } else {
        let height = round_aspect(bound_w / aspect, |n| (aspect - bound_w / n).abs());
        Dimensions::new(bounds.width, height)
    }
}

/// Pick floor or ceil of `value` by the smaller `error`, clamped to at least 1.
fn round_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (value.floor(), value.ceil());
    let best = if error(floor) <= error(ceil) { floor } else { ceil };
    best.max(1.0) as u32
}

/// Top-left offset that centers `placed` on `canvas`.
///
/// Each axis is `floor(canvas / 2 - placed / 2)`, so odd leftovers go to the
/// right and bottom edges. Negative when `placed` overflows the canvas.
pub fn center_offset(canvas: Dimensions, placed: Dimensions) -> (i64, i64) {
    let axis = |c: u32, p: u32| (i64::from(c) - i64::from(p)).div_euclid(2);
    (
        axis(canvas.width, placed.width),
        axis(canvas.height, placed.height),
    )
}

/// Uniform scale factor that brings `longest_edge` up to at least `min_edge`.
///
/// Returns 1.0 when the drawing is already large enough.
pub fn upscale_factor(longest_edge: f32, min_edge: u32) -> f32 {
    if longest_edge <= 0.0 || longest_edge >= min_edge as f32 {
        1.0
    } else {
        min_edge as f32 / longest_edge
    }
}
