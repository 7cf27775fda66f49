/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Whole messages that aren't just "set a register".

use crate::bitmap::{pack, PixelSource};
use crate::error::Result;
use crate::sysex::roland::{data_set, ADDR_DISPLAY_IMAGE, ADDR_DISPLAY_MESSAGE, ADDR_MODE_SET};
use crate::sysex::{DeviceId, MF_ID_ROLAND, SYSEX_END, SYSEX_START};

/// The manual says the display takes 32 characters, but 32 corrupts the
/// screen as if a buffer were overflowing.
pub const MAX_MESSAGE_LEN: usize = 31;

/// Puts the SC-55 into General MIDI mode. This one is not a DT1 and has no
/// checksum.
pub fn reset_gm(device: DeviceId) -> Vec<u8> {
    vec![SYSEX_START, MF_ID_ROLAND, device, 0x09, 0x01, SYSEX_END]
}

/// Puts the SC-55 into GS mode ("MODE SET" = 00h).
pub fn reset_gs(device: DeviceId) -> Vec<u8> {
    data_set(device, ADDR_MODE_SET, &[0x00])
}

/// Shows `text` on the front panel, cut down to [MAX_MESSAGE_LEN] bytes.
pub fn display_message(device: DeviceId, text: &str) -> Vec<u8> {
    let mut end = text.len().min(MAX_MESSAGE_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    data_set(device, ADDR_DISPLAY_MESSAGE, &text.as_bytes()[..end])
}

/// Shows a 16x16 picture on the front panel.
pub fn display_image(device: DeviceId, source: &impl PixelSource) -> Result<Vec<u8>> {
    let packed = pack(source)?;
    Ok(data_set(device, ADDR_DISPLAY_IMAGE, &packed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sysex::roland::unmarshal_set;
    use crate::bitmap::Rgba16Image;

    #[test]
    fn test_reset_gm() {
        assert_eq!(reset_gm(0x10), [0xF0, 0x41, 0x10, 0x09, 0x01, 0xF7]);
    }

    #[test]
    fn test_reset_gs() {
        assert_eq!(
            reset_gs(0x10),
            [0xF0, 0x41, 0x10, 0x42, 0x12, 0x40, 0x00, 0x7F, 0x00, 0x41, 0xF7]
        );
    }

    #[test]
    fn test_display_message() {
        let frame = display_message(0x10, "Hi");
        assert_eq!(
            frame,
            [0xF0, 0x41, 0x10, 0x45, 0x12, 0x10, 0x00, 0x00, b'H', b'i', 0x3F, 0xF7]
        );

        let long = "0123456789012345678901234567890123456789";
        let decoded = unmarshal_set(&display_message(0x10, long)).map(|d| d.payload.to_vec());
        assert_eq!(decoded, Ok(long.as_bytes()[..31].to_vec()));
    }

    #[test]
    fn test_display_message_utf8() {
        // 30 ASCII bytes and then a two-byte character straddling the limit
        let text = format!("{}é", "a".repeat(30));
        let frame = display_message(0x10, &text);
        assert_eq!(unmarshal_set(&frame).unwrap().payload, "a".repeat(30).as_bytes());
    }

    #[test]
    fn test_display_image() {
        let mut pixels = [[false; 16]; 16];
        pixels[0][0] = true;
        let frame = display_image(0x10, &pixels).unwrap();
        assert_eq!(frame.len(), 10 + 64);
        let decoded = unmarshal_set(&frame).unwrap();
        assert_eq!(decoded.address, ADDR_DISPLAY_IMAGE);
        assert_eq!(decoded.model, 0x45);
        assert_eq!(decoded.payload[0], 0x10);

        assert_eq!(
            display_image(0x10, &Rgba16Image::new(8, 8)),
            Err(Error::ImageSize {
                width: 8,
                height: 8,
            })
        );
    }
}
