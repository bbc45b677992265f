//! Nearest-neighbor integer upscaling.
//!
//! Each source pixel becomes a `scale × scale` block:
//!
//! ```text
//! scale = 2
//!
//!   source       destination
//!   ┌───┬───┐    ┌───┬───┬───┬───┐
//!   │ A │ B │ →  │ A │ A │ B │ B │
//!   └───┴───┘    ├───┼───┼───┼───┤
//!                │ A │ A │ B │ B │
//!                └───┴───┴───┴───┘
//! ```
//!
//! A destination row is not a contiguous run of source bytes, so the copy is
//! per pixel: `src = ((dx - x) / scale, (dy - y) / scale)`.

use super::clip::{self, ScaledWindow};
use super::{Destination, PixelSource};
use crate::pixel::BYTES_PER_PIXEL;

/// Copy `src` into `dst` scaled up by `scale`, top-left at `(x, y)`.
///
/// `scale <= 1` copies unscaled. Returns the number of pixels written.
pub fn blit_copy_scaled<S>(src: &S, dst: &mut Destination<'_>, x: i32, y: i32, scale: u32) -> usize
where
    S: PixelSource + ?Sized,
{
    let Some(window) =
        clip::scaled(src.width(), src.height(), scale, dst.width(), dst.height(), x, y)
    else {
        return 0;
    };

    for_each_mapped(src, dst, &window, |px, out| out.copy_from_slice(px))
}

/// Visit every destination pixel of `window` with its mapped source pixel.
///
/// `f` receives `(source_px, destination_px)`, both 3 bytes long.
pub(crate) fn for_each_mapped<S, F>(
    src: &S,
    dst: &mut Destination<'_>,
    window: &ScaledWindow,
    mut f: F,
) -> usize
where
    S: PixelSource + ?Sized,
    F: FnMut(&[u8], &mut [u8]),
{
    let src_stride = src.width() * BYTES_PER_PIXEL;
    let bytes = src.bytes();
    let mut written = 0;

    for dy in window.y0..window.y1 {
        let sy = window.source_y(dy);
        let Some(src_row) = bytes.get(sy * src_stride..(sy + 1) * src_stride) else {
            break;
        };
        let Some(dst_row) = dst.span_mut(dy, window.x0, window.width()) else {
            break;
        };

        for (dx, out) in (window.x0..window.x1).zip(dst_row.chunks_exact_mut(BYTES_PER_PIXEL)) {
            let sx = window.source_x(dx) * BYTES_PER_PIXEL;
            f(&src_row[sx..sx + BYTES_PER_PIXEL], out);
        }
        written += window.width();
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blit::blit_copy;
    use crate::pixel::{ChannelOrder, Image};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_pixels_scaled_by_two() {
        let img = Image::from_raw(2, 1, ChannelOrder::Bgr, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mut buf = vec![0u8; 4 * 3];
        let written = blit_copy_scaled(&img, &mut Destination::packed(&mut buf, 4, 1), 0, 0, 2);
        assert_eq!(written, 4);
        assert_eq!(buf, vec![1, 2, 3, 1, 2, 3, 4, 5, 6, 4, 5, 6]);
    }

    #[test]
    fn test_blocks_cover_rows_too() {
        let img = Image::from_fn(2, 2, ChannelOrder::Rgb, |x, y| [x as u8, y as u8, 0]).unwrap();
        let mut buf = vec![0u8; 6 * 6 * 3];
        let mut dst = Destination::packed(&mut buf, 6, 6);
        assert_eq!(blit_copy_scaled(&img, &mut dst, 0, 0, 3), 36);

        for dy in 0..6 {
            for dx in 0..6 {
                let i = (dy * 6 + dx) * 3;
                assert_eq!(&buf[i..i + 2], &[(dx / 3) as u8, (dy / 3) as u8]);
            }
        }
    }

    #[test]
    fn test_scale_one_matches_direct_copy() {
        let img = Image::from_fn(5, 3, ChannelOrder::Rgb, |x, y| [x as u8, y as u8, 42]).unwrap();
        for (x, y) in [(0, 0), (-2, 1), (3, -1), (6, 2)] {
            let mut a = vec![0u8; 7 * 4 * 3];
            let mut b = a.clone();
            let na = blit_copy(&img, &mut Destination::packed(&mut a, 7, 4), x, y);
            let nb = blit_copy_scaled(&img, &mut Destination::packed(&mut b, 7, 4), x, y, 1);
            assert_eq!(na, nb);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_scale_zero_treated_as_one() {
        let img = Image::from_raw(1, 1, ChannelOrder::Rgb, vec![9, 9, 9]).unwrap();
        let mut buf = vec![0u8; 2 * 3];
        let written = blit_copy_scaled(&img, &mut Destination::packed(&mut buf, 2, 1), 0, 0, 0);
        assert_eq!(written, 1);
        assert_eq!(buf, vec![9, 9, 9, 0, 0, 0]);
    }

    #[test]
    fn test_partially_clipped_block() {
        // Scale 4 at x = -3: the first source pixel only shows 1 column
        let img = Image::from_raw(2, 1, ChannelOrder::Rgb, vec![1, 1, 1, 2, 2, 2]).unwrap();
        let mut buf = vec![0u8; 8 * 3];
        let written = blit_copy_scaled(&img, &mut Destination::packed(&mut buf, 8, 1), -3, 0, 4);
        assert_eq!(written, 5);
        let firsts: Vec<u8> = buf.chunks(3).map(|p| p[0]).collect();
        assert_eq!(firsts, vec![1, 2, 2, 2, 2, 0, 0, 0]);
    }

    #[test]
    fn test_fully_off_screen() {
        let img = Image::from_raw(2, 1, ChannelOrder::Rgb, vec![1, 1, 1, 2, 2, 2]).unwrap();
        let mut buf = vec![0u8; 4 * 3];
        let mut dst = Destination::packed(&mut buf, 4, 1);
        assert_eq!(blit_copy_scaled(&img, &mut dst, -8, 0, 4), 0);
        assert_eq!(blit_copy_scaled(&img, &mut dst, 0, 1, 4), 0);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
