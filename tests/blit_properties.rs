//! # Blit Properties
//!
//! Geometric guarantees of the reference blits, checked over random origins,
//! sizes and strides. Every destination is embedded in a guard band so a
//! write outside `[0, dst_w) x [0, dst_h)` or into row padding shows up as
//! a changed guard byte.

use pixelbake::blit::{self, BlendParams, Destination, clip};
use pixelbake::{ChannelOrder, Image};
use proptest::prelude::*;

const GUARD: u8 = 0xA5;
const PIXEL: usize = 3;

/// Destination geometry plus a guard-filled buffer with row padding.
struct Canvas {
    w: i32,
    h: i32,
    stride: usize,
    buf: Vec<u8>,
}

impl Canvas {
    fn new(w: i32, h: i32, pad: usize) -> Self {
        let stride = w as usize * PIXEL + pad;
        Self {
            w,
            h,
            stride,
            buf: vec![GUARD; stride * h as usize],
        }
    }

    fn dst(&mut self) -> Destination<'_> {
        Destination::new(&mut self.buf, self.w, self.h, self.stride)
    }

    /// Bytes inside the visible area that differ from the guard value,
    /// and whether any padding byte changed.
    fn scan(&self) -> (usize, bool) {
        let mut changed = 0;
        let mut padding_touched = false;
        if self.stride == 0 {
            return (0, false);
        }
        for row in self.buf.chunks_exact(self.stride) {
            let (visible, padding) = row.split_at(self.w as usize * PIXEL);
            changed += visible.chunks_exact(PIXEL).filter(|px| px.iter().any(|&b| b != GUARD)).count();
            padding_touched |= padding.iter().any(|&b| b != GUARD);
        }
        (changed, padding_touched)
    }
}

/// Source whose every pixel differs from the guard byte.
fn source(w: u32, h: u32) -> Image {
    Image::from_fn(w, h, ChannelOrder::Bgr, |x, y| [x as u8 & 0x7F, y as u8 & 0x7F, 1]).unwrap()
}

proptest! {
    #[test]
    fn copy_writes_exactly_the_clipped_region(
        sw in 1u32..12, sh in 1u32..12,
        dw in 0i32..16, dh in 0i32..16,
        pad in 0usize..7,
        x in -20i32..24, y in -20i32..24,
    ) {
        let img = source(sw, sh);
        let mut canvas = Canvas::new(dw, dh, pad);
        let written = blit::blit_copy(&img, &mut canvas.dst(), x, y);

        let expected = clip::direct(sw as usize, sh as usize, dw, dh, x, y)
            .map(|r| r.pixel_count())
            .unwrap_or(0);
        prop_assert_eq!(written, expected);

        let (changed, padding_touched) = canvas.scan();
        prop_assert_eq!(changed, expected);
        prop_assert!(!padding_touched);
    }

    #[test]
    fn scaled_stays_inside_destination(
        sw in 1u32..6, sh in 1u32..6,
        dw in 0i32..20, dh in 0i32..20,
        pad in 0usize..7,
        x in -30i32..24, y in -30i32..24,
        scale in 1u32..5,
    ) {
        let img = source(sw, sh);
        let mut canvas = Canvas::new(dw, dh, pad);
        let written = blit::blit_copy_scaled(&img, &mut canvas.dst(), x, y, scale);

        let (changed, padding_touched) = canvas.scan();
        prop_assert_eq!(changed, written);
        prop_assert!(!padding_touched);
    }

    #[test]
    fn opaque_blend_equals_copy(
        sw in 1u32..8, sh in 1u32..8,
        dw in 1i32..14, dh in 1i32..14,
        x in -10i32..14, y in -10i32..14,
        scale in 0u32..4,
    ) {
        let img = source(sw, sh);
        let mut copied = Canvas::new(dw, dh, 0);
        let mut blended = Canvas::new(dw, dh, 0);

        let params = BlendParams::new(255, [9, 9, 9]).with_scale(scale);
        let wb = blit::blit_blend(&img, &mut blended.dst(), x, y, params);
        let wc = if scale <= 1 {
            blit::blit_copy(&img, &mut copied.dst(), x, y)
        } else {
            blit::blit_copy_scaled(&img, &mut copied.dst(), x, y, scale)
        };

        prop_assert_eq!(wb, wc);
        prop_assert_eq!(copied.buf, blended.buf);
    }

    #[test]
    fn transparent_blend_writes_only_background(
        sw in 1u32..8, sh in 1u32..8,
        dw in 1i32..14, dh in 1i32..14,
        x in -10i32..14, y in -10i32..14,
        bg in any::<[u8; 3]>(),
    ) {
        prop_assume!(bg != [GUARD; 3]);
        let img = source(sw, sh);
        let mut canvas = Canvas::new(dw, dh, 2);
        let written = blit::blit_blend(&img, &mut canvas.dst(), x, y, BlendParams::new(0, bg));

        let mut background = 0;
        for row in canvas.buf.chunks_exact(canvas.stride) {
            for px in row[..dw as usize * PIXEL].chunks_exact(PIXEL) {
                if px != [GUARD; 3] {
                    prop_assert_eq!(px, &bg[..]);
                    background += 1;
                }
            }
        }
        prop_assert_eq!(background, written);
    }
}

#[test]
fn test_copy_at_right_edge_writes_nothing() {
    let img = source(4, 4);
    let mut canvas = Canvas::new(8, 8, 0);
    assert_eq!(blit::blit_copy(&img, &mut canvas.dst(), 8, 0), 0);
    assert_eq!(canvas.scan(), (0, false));
}

#[test]
fn test_half_alpha_reference_values() {
    let img = Image::from_raw(1, 1, ChannelOrder::Rgb, vec![200, 100, 50]).unwrap();
    let mut buf = vec![0u8; 3];
    let written = blit::blit_blend(&img, &mut Destination::packed(&mut buf, 1, 1), 0, 0, BlendParams::new(128, [0, 0, 0]));
    assert_eq!(written, 1);
    assert_eq!(buf, vec![100, 50, 25]);
}
