/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Packing of 16x16 monochrome pictures for the SC-55's front panel.
//!
//! The display memory is organised as four 16-byte groups. Each group covers
//! five columns, one byte per row, with the leftmost of the five columns in
//! bit 4. Only the low five bits of each byte are used, which keeps every
//! byte under 80h as SysEx data must be. The last group only has one real
//! column.

use crate::error::{Error, Result};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Primitive, Rgba};
use std::ops::Deref;

pub const WIDTH: u32 = 16;
pub const HEIGHT: u32 = 16;
pub const PACKED_LEN: usize = 64;

/// What `is_bright` works in. `image` has no name for this one.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Something that can be asked which of its pixels are lit.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);
    fn is_set(&self, x: u32, y: u32) -> bool;
}

/// Rows of pixels, i.e. indexed `[y][x]`.
impl PixelSource for [[bool; 16]; 16] {
    fn dimensions(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }
    fn is_set(&self, x: u32, y: u32) -> bool {
        self[y as usize][x as usize]
    }
}

/// A pixel is lit if the mean of its alpha-premultiplied red, green and blue
/// is more than half intensity.
fn is_bright([r, g, b, a]: [u16; 4]) -> bool {
    let premultiply = |c: u16| u32::from(c) * u32::from(a) / 0xFFFF;
    (premultiply(r) + premultiply(g) + premultiply(b)) / 3 > 0x8000
}

/// Any colour type and channel depth. Channels are rescaled to 16 bits
/// first, so e.g. 8-bit FFh and float 1.0 both become FFFFh.
impl<P, C> PixelSource for ImageBuffer<P, C>
where
    P: Pixel,
    P::Subpixel: Into<f64>,
    C: Deref<Target = [P::Subpixel]>,
{
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
    fn is_set(&self, x: u32, y: u32) -> bool {
        let max: f64 = <P::Subpixel as Primitive>::DEFAULT_MAX_VALUE.into();
        let rgba = self.get_pixel(x, y).to_rgba();
        is_bright(rgba.0.map(|c| {
            let scaled = Into::<f64>::into(c) / max * 65535.0;
            scaled.round().clamp(0.0, 65535.0) as u16
        }))
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }
    fn is_set(&self, x: u32, y: u32) -> bool {
        // 8-bit to 16-bit, so that FFh becomes FFFFh
        is_bright(self.get_pixel(x, y).0.map(|c| u16::from(c) * 0x101))
    }
}

/// Packs a 16x16 picture into the display's memory layout.
pub fn pack(source: &impl PixelSource) -> Result<[u8; PACKED_LEN]> {
    let (width, height) = source.dimensions();
    if (width, height) != (WIDTH, HEIGHT) {
        return Err(Error::ImageSize { width, height });
    }

    let mut buf = [0u8; PACKED_LEN];
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if source.is_set(x, y) {
                let byte = (x / 5) * 16 + y;
                let bit = 4 - (x % 5);
                buf[byte as usize] |= 1 << bit;
            }
        }
    }
    Ok(buf)
}
