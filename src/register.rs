/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! One cell of the SC-55's parameter memory, and how to read and write it.
//!
//! Roland's manuals give each parameter a raw range (e.g. `28h`-`58h` for
//! MASTER KEY-SHIFT) and a centre value that means "zero" (`40h`). Users
//! would rather type `-12` than `34h`, so a [Register] works in *logical*
//! values, where `raw = logical + zero`.

use crate::error::{Error, Result};
use crate::sysex::roland::{data_get, data_set, unmarshal_set, Address};
use crate::sysex::DeviceId;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub address: Address,
    /// Number of data bytes, 1 to 4.
    pub size: u8,
    /// Smallest raw value the device accepts.
    pub min: u32,
    /// Largest raw value the device accepts.
    pub max: u32,
    /// Raw value that corresponds to a logical zero.
    pub zero: u32,
}

pub fn clamp(x: i64, min: i64, max: i64) -> i64 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

impl Register {
    pub const fn new(address: Address, size: u8, min: u32, max: u32, zero: u32) -> Register {
        debug_assert!(size >= 1 && size <= 4);
        Register {
            address,
            size,
            min,
            max,
            zero,
        }
    }

    /// The logical values [Register::set] can produce without clamping.
    pub fn logical_range(&self) -> RangeInclusive<i32> {
        let min = i64::from(self.min) - i64::from(self.zero);
        let max = i64::from(self.max) - i64::from(self.zero);
        (min as i32)..=(max as i32)
    }

    /// Raw value as it appears in a DT1: little-endian, `size` bytes (at
    /// most four).
    pub fn encode_raw(&self, raw: u32) -> Vec<u8> {
        let bytes = raw.to_le_bytes();
        bytes[..usize::from(self.size).min(bytes.len())].to_vec()
    }

    /// RQ1 message asking the device for this register's current value.
    pub fn get(&self, device: DeviceId) -> Vec<u8> {
        data_get(device, self.address, u32::from(self.size))
    }

    /// DT1 message that sets this register. Out-of-range values are clamped
    /// rather than rejected.
    pub fn set(&self, device: DeviceId, value: i32) -> Vec<u8> {
        let zero = i64::from(self.zero);
        let logical = clamp(
            i64::from(value),
            i64::from(self.min) - zero,
            i64::from(self.max) - zero,
        );
        let raw = (logical + zero) as u32;
        data_set(device, self.address, &self.encode_raw(raw))
    }

    /// Decodes a DT1 message for this register (e.g. the device's reply to
    /// [Register::get]), returning the sender's device ID and the logical
    /// value.
    pub fn unmarshal(&self, frame: &[u8]) -> Result<(DeviceId, i32)> {
        let decoded = unmarshal_set(frame)?;
        if decoded.address != self.address {
            return Err(Error::AddressMismatch {
                expected: self.address,
                actual: decoded.address,
            });
        }
        Ok((decoded.device, self.decode(decoded.payload)?))
    }

    /// Logical value from the data bytes of a DT1 for this register.
    pub fn decode(&self, payload: &[u8]) -> Result<i32> {
        if payload.len() != usize::from(self.size) {
            return Err(Error::SizeMismatch {
                expected: usize::from(self.size),
                actual: payload.len(),
            });
        }

        let raw = payload
            .iter()
            .rev()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));
        if raw < self.min || raw > self.max {
            return Err(Error::OutOfRange {
                raw,
                min: self.min,
                max: self.max,
            });
        }

        Ok((i64::from(raw) - i64::from(self.zero)) as i32)
    }
}
