//! Clipping arithmetic shared by the blit routines.
//!
//! All intermediate math is done in `i64`: an `i32` origin plus a `u32`
//! image size times a scale factor cannot overflow it.

/// The clipped region of an unscaled copy.
///
/// ```text
/// src_x = max(0, -x)          dst_x = max(0, x)
/// src_y = max(0, -y)          dst_y = max(0, y)
/// copy_w = min(src_w - src_x, dst_w - dst_x)
/// copy_h = min(src_h - src_y, dst_h - dst_y)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRegion {
    pub src_x: usize,
    pub src_y: usize,
    pub dst_x: usize,
    pub dst_y: usize,
    pub copy_w: usize,
    pub copy_h: usize,
}

impl CopyRegion {
    pub fn pixel_count(&self) -> usize {
        self.copy_w * self.copy_h
    }
}

/// Clip an unscaled `src_w × src_h` image placed at `(x, y)`.
///
/// `None` when nothing is visible.
pub fn direct(
    src_w: usize,
    src_h: usize,
    dst_w: i32,
    dst_h: i32,
    x: i32,
    y: i32,
) -> Option<CopyRegion> {
    let (x, y) = (i64::from(x), i64::from(y));

    let src_x = (-x).max(0);
    let src_y = (-y).max(0);
    let dst_x = x.max(0);
    let dst_y = y.max(0);

    let copy_w = (src_w as i64 - src_x).min(i64::from(dst_w) - dst_x);
    let copy_h = (src_h as i64 - src_y).min(i64::from(dst_h) - dst_y);

    if copy_w <= 0 || copy_h <= 0 {
        return None;
    }

    Some(CopyRegion {
        src_x: src_x as usize,
        src_y: src_y as usize,
        dst_x: dst_x as usize,
        dst_y: dst_y as usize,
        copy_w: copy_w as usize,
        copy_h: copy_h as usize,
    })
}

/// The clipped destination window of a scaled blit, `[x0, x1) × [y0, y1)`.
///
/// Keeps the unclipped origin and the scale so that every destination pixel
/// can be mapped straight back to its source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledWindow {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
    origin_x: i64,
    origin_y: i64,
    scale: i64,
}

impl ScaledWindow {
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Effective scale factor (always at least 1).
    pub fn scale(&self) -> u32 {
        self.scale as u32
    }

    /// Source column for destination column `dx`: `(dx - x) / scale`.
    #[inline]
    pub fn source_x(&self, dx: usize) -> usize {
        ((dx as i64 - self.origin_x) / self.scale) as usize
    }

    /// Source row for destination row `dy`: `(dy - y) / scale`.
    #[inline]
    pub fn source_y(&self, dy: usize) -> usize {
        ((dy as i64 - self.origin_y) / self.scale) as usize
    }
}

/// Clip a `src_w × src_h` image scaled by `scale` and placed at `(x, y)`.
///
/// A `scale` of 0 or 1 means unscaled. `None` when nothing is visible.
pub fn scaled(
    src_w: usize,
    src_h: usize,
    scale: u32,
    dst_w: i32,
    dst_h: i32,
    x: i32,
    y: i32,
) -> Option<ScaledWindow> {
    let scale = i64::from(scale.max(1));
    let (x, y) = (i64::from(x), i64::from(y));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + src_w as i64 * scale).min(i64::from(dst_w));
    let y1 = (y + src_h as i64 * scale).min(i64::from(dst_h));

    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    Some(ScaledWindow {
        x0: x0 as usize,
        y0: y0 as usize,
        x1: x1 as usize,
        y1: y1 as usize,
        origin_x: x,
        origin_y: y,
        scale,
    })
}
