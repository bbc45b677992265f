//! Direct clipped copy.
//!
//! No color transform is needed, so each visible row is one contiguous
//! slice copy from the table into the destination.

use super::clip;
use super::{Destination, PixelSource};
use crate::pixel::BYTES_PER_PIXEL;

/// Copy `src` into `dst` with its top-left corner at `(x, y)`.
///
/// Only the part overlapping the destination is written, one row slice at a
/// time. Returns the number of pixels written.
///
/// ## Example
///
/// ```
/// use pixelbake::blit::{Destination, blit_copy};
/// use pixelbake::pixel::{ChannelOrder, Image};
///
/// let logo = Image::from_raw(2, 1, ChannelOrder::Rgb, vec![1, 2, 3, 4, 5, 6])?;
/// let mut fb = vec![0u8; 3 * 3];
///
/// // Half off the left edge: only the second pixel lands, at column 0
/// let written = blit_copy(&logo, &mut Destination::packed(&mut fb, 3, 1), -1, 0);
/// assert_eq!(written, 1);
/// assert_eq!(fb, [4, 5, 6, 0, 0, 0, 0, 0, 0]);
/// # Ok::<(), pixelbake::PixelbakeError>(())
/// ```
pub fn blit_copy<S>(src: &S, dst: &mut Destination<'_>, x: i32, y: i32) -> usize
where
    S: PixelSource + ?Sized,
{
    let Some(region) = clip::direct(src.width(), src.height(), dst.width(), dst.height(), x, y)
    else {
        return 0;
    };

    let src_stride = src.width() * BYTES_PER_PIXEL;
    let row_bytes = region.copy_w * BYTES_PER_PIXEL;
    let bytes = src.bytes();
    let mut written = 0;

    for j in 0..region.copy_h {
        let start = (region.src_y + j) * src_stride + region.src_x * BYTES_PER_PIXEL;
        let Some(src_row) = bytes.get(start..start + row_bytes) else {
            break;
        };
        let Some(dst_row) = dst.span_mut(region.dst_y + j, region.dst_x, region.copy_w) else {
            break;
        };
        dst_row.copy_from_slice(src_row);
        written += region.copy_w;
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{ChannelOrder, Image};
    use pretty_assertions::assert_eq;

    fn numbered(w: u32, h: u32) -> Image {
        Image::from_fn(w, h, ChannelOrder::Rgb, |x, y| {
            let n = (y * w + x) as u8;
            [n, n.wrapping_add(100), n.wrapping_add(200)]
        })
        .unwrap()
    }

    #[test]
    fn test_exact_fit_copies_everything() {
        let img = numbered(5, 4);
        let mut buf = vec![0u8; 5 * 4 * 3];
        let written = blit_copy(&img, &mut Destination::packed(&mut buf, 5, 4), 0, 0);
        assert_eq!(written, 20);
        assert_eq!(buf, img.as_bytes());
    }

    #[test]
    fn test_origin_at_destination_width_writes_nothing() {
        let img = numbered(2, 2);
        let mut buf = vec![0xEEu8; 4 * 4 * 3];
        let written = blit_copy(&img, &mut Destination::packed(&mut buf, 4, 4), 4, 0);
        assert_eq!(written, 0);
        assert!(buf.iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn test_uses_destination_stride() {
        let img = numbered(2, 2);
        // 3 pixels wide, 4 bytes of row padding
        let stride = 3 * 3 + 4;
        let mut buf = vec![0xEEu8; stride * 3];
        let written = blit_copy(&img, &mut Destination::new(&mut buf, 3, 3, stride), 1, 1);
        assert_eq!(written, 4);

        let row1 = &buf[stride..2 * stride];
        assert_eq!(&row1[0..3], &[0xEE; 3]);
        assert_eq!(&row1[3..9], img.row(0));
        assert_eq!(&row1[9..], &[0xEE; 4]);
        let row2 = &buf[2 * stride..3 * stride];
        assert_eq!(&row2[3..9], img.row(1));
    }

    #[test]
    fn test_clips_all_four_edges() {
        let img = numbered(4, 4);
        let mut buf = vec![0u8; 2 * 2 * 3];
        let written = blit_copy(&img, &mut Destination::packed(&mut buf, 2, 2), -1, -1);
        assert_eq!(written, 4);
        // Destination (0,0) is source (1,1)
        assert_eq!(&buf[0..3], &img.pixel(1, 1).unwrap());
        assert_eq!(&buf[9..12], &img.pixel(2, 2).unwrap());
    }

    #[test]
    fn test_short_buffer_skips_rows_instead_of_panicking() {
        let img = numbered(2, 2);
        // Claims 2 rows but only holds one
        let mut buf = vec![0u8; 2 * 3];
        let written = blit_copy(&img, &mut Destination::packed(&mut buf, 2, 2), 0, 0);
        assert_eq!(written, 2);
        assert_eq!(buf, img.row(0));
    }
}
