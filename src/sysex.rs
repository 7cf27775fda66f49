/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! MIDI System Exclusive message (SysEx) plumbing.
//!
//! SysExes are an extensibility feature of the MIDI standard and almost always
//! vendor-specific. Only the framing (`F0h` ... `F7h`) and the manufacturer ID
//! are shared by everyone, so that is all that lives here. Roland's "Type IV"
//! format, which is what the SC-55 speaks, is in [roland].
//!
//! The main reference here was the _MIDI 1.0 Detailed Specification_.

pub mod roland;

use std::fmt::{Display, Formatter, Result as FmtResult};

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;

pub type ManufacturerId = u8;
pub const MF_ID_ROLAND: ManufacturerId = 0x41;

pub type DeviceId = u8;
/// The SC-55 ships configured to respond to this, and so does nearly every
/// other Sound Canvas.
pub const DEFAULT_DEVICE_ID: DeviceId = 0x10;

/// Displays bytes as space-separated hex, e.g. `F0 41 10 42`.
pub struct FormatBytes<'a>(pub &'a [u8]);
impl Display for FormatBytes<'_> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, byte) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

pub fn format_bytes(bytes: &[u8]) -> FormatBytes {
    FormatBytes(bytes)
}

/// Parses hex written the way [format_bytes] writes it. Whitespace between
/// bytes is optional, and an `h` suffix on each byte is tolerated since that's
/// how Roland's manuals print them.
pub fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = text
        .split_whitespace()
        .flat_map(|word| word.trim_end_matches(|c| c == 'h' || c == 'H').bytes())
        .collect();
    if digits.is_empty() || digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}

/// Some MIDI interfaces hand back received SysExes in fixed-size buffers with
/// zero padding after the `F7h`. Strips that padding off.
pub fn trim_padding(mut frame: &[u8]) -> &[u8] {
    while let [rest @ .., 0x00] = frame {
        frame = rest;
    }
    frame
}

/// Builds a message in a buffer whose final length is known before the first
/// byte is written, so nothing gets reallocated along the way.
pub struct FrameWriter {
    buf: Vec<u8>,
    len: usize,
}
impl FrameWriter {
    pub fn with_len(len: usize) -> FrameWriter {
        FrameWriter {
            buf: Vec::with_capacity(len),
            len,
        }
    }

    pub fn byte(&mut self, byte: u8) -> &mut Self {
        debug_assert!(self.buf.len() < self.len);
        self.buf.push(byte);
        self
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        debug_assert!(self.buf.len() + bytes.len() <= self.len);
        self.buf.extend_from_slice(bytes);
        self
    }

    /// The bytes written so far, starting at `from`.
    pub fn written_since(&self, from: usize) -> &[u8] {
        &self.buf[from..]
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn finish(self) -> Vec<u8> {
        assert_eq!(self.buf.len(), self.len, "frame length mismatch");
        self.buf
    }
}
