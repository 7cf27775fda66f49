/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Everything that can go wrong while building or taking apart a message.

use crate::sysex::roland::Address;
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Fewer bytes than the smallest possible DT1 message.
    #[error("frame too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    #[error("frame does not start with F0h (got {0:02X}h)")]
    BadStart(u8),

    #[error("frame does not end with F7h (got {0:02X}h)")]
    BadEnd(u8),

    #[error("not a Roland message (manufacturer {0:02X}h)")]
    BadManufacturer(u8),

    #[error("unrecognised model {0:02X}h")]
    BadModel(u8),

    #[error("unexpected command {0:02X}h")]
    BadCommand(u8),

    #[error("checksum mismatch: computed {expected:02X}h, frame has {actual:02X}h")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("address mismatch: expected {expected:06X}h, got {actual:06X}h")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("value {raw:#X} outside {min:#X}..={max:#X}")]
    OutOfRange { raw: u32, min: u32, max: u32 },

    #[error("unknown register {0:?}")]
    UnknownRegister(String),

    #[error("no register at address {0:06X}h")]
    UnknownAddress(Address),

    /// Only 16x16 images fit on the front panel.
    #[error("image must be 16x16, got {width}x{height}")]
    ImageSize { width: u32, height: u32 },
}

impl Error {
    /// True for the errors that mean "this isn't a DT1 frame at all", as
    /// opposed to a valid frame with unexpected contents.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::TooShort { .. }
                | Error::BadStart(_)
                | Error::BadEnd(_)
                | Error::BadManufacturer(_)
                | Error::BadModel(_)
                | Error::BadCommand(_)
        )
    }
}
