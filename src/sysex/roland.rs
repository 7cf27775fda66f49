/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Roland SysEx building and parsing.
//!
//! References are the Roland SC-55 and SC-55mkII owner's manuals. Roland's
//! manuals say "Roland's MIDI implementation uses the following data format
//! for all Exclusive messages" and call it "Type IV":
//!
//! ```text
//! F0h 41h <device> <model> <command> <body...> <checksum> F7h
//! ```
//!
//! The SC-55 uses two model IDs: its own for the display, and the GS one for
//! everything from the GS "System Parameters" block upwards. Addresses and
//! sizes in the body are always three bytes, most significant first.

use super::{DeviceId, FrameWriter, MF_ID_ROLAND, SYSEX_END, SYSEX_START};
use crate::error::{Error, Result};
use tracing::trace;

/// 24-bit address in the device's parameter memory.
pub type Address = u32;

pub type ModelId = u8;
pub const MD_ID_SC_55: ModelId = 0x45;
pub const MD_ID_GS: ModelId = 0x42;

pub type CommandId = u8;
/// "Request data 1" aka "RQ1".
pub const CM_ID_RQ1: CommandId = 0x11;
/// "Data set 1" aka "DT1".
pub const CM_ID_DT1: CommandId = 0x12;

pub const ADDR_DISPLAY_MESSAGE: Address = 0x10_0000;
pub const ADDR_DISPLAY_IMAGE: Address = 0x10_0100;
/// Start of the GS "System Parameters" block. Everything from here on is
/// addressed using the GS model ID.
pub const ADDR_MASTER_TUNE: Address = 0x40_0000;
/// "MODE SET": writing 00h here is a GS reset.
pub const ADDR_MODE_SET: Address = 0x40_007F;

/// Header is `F0h 41h <device> <model> <command>`.
const HEADER_LEN: usize = 5;
const ADDRESS_LEN: usize = 3;
/// Checksum byte and `F7h`.
const TRAILER_LEN: usize = 2;
/// A DT1 with no data at all. Not useful, but not malformed either.
pub const MIN_DT1_LEN: usize = HEADER_LEN + ADDRESS_LEN + TRAILER_LEN;

/// Model-specific information, for presenting messages to humans.
pub struct ModelInfo {
    pub model_id: ModelId,
    pub name: &'static str,
}

pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        model_id: MD_ID_SC_55,
        name: "Roland SC-55/SC-155",
    },
    ModelInfo {
        model_id: MD_ID_GS,
        name: "Roland GS",
    },
];

pub fn model_info(model_id: ModelId) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|model| model.model_id == model_id)
}

/// A different model ID is used for different address ranges.
pub fn model_for_address(addr: Address) -> ModelId {
    if addr < ADDR_MASTER_TUNE {
        MD_ID_SC_55
    } else {
        MD_ID_GS
    }
}

/// Roland checksum: whatever needs to be added to the body to make its sum a
/// multiple of 128.
pub fn checksum(body: &[u8]) -> u8 {
    let sum: u32 = body.iter().map(|&byte| u32::from(byte)).sum();
    ((128 - sum % 128) % 128) as u8
}

fn address_bytes(addr: Address) -> [u8; 3] {
    debug_assert!(addr < 1 << 24);
    let [_, high, mid, low] = addr.to_be_bytes();
    [high, mid, low]
}

fn frame(device: DeviceId, command: CommandId, addr: Address, data: &[u8]) -> Vec<u8> {
    let mut writer = FrameWriter::with_len(MIN_DT1_LEN + data.len());
    writer
        .byte(SYSEX_START)
        .byte(MF_ID_ROLAND)
        .byte(device)
        .byte(model_for_address(addr))
        .byte(command);
    let body_start = writer.position();
    writer.bytes(&address_bytes(addr)).bytes(data);
    let sum = checksum(writer.written_since(body_start));
    writer.byte(sum).byte(SYSEX_END);
    let frame = writer.finish();
    trace!(command, addr, len = frame.len(), "built Roland SysEx");
    frame
}

/// Builds a DT1 message that writes `data` to memory starting at `addr`.
pub fn data_set(device: DeviceId, addr: Address, data: &[u8]) -> Vec<u8> {
    frame(device, CM_ID_DT1, addr, data)
}

/// Builds an RQ1 message asking for `size` bytes of memory at `addr`. The
/// device answers with a DT1.
pub fn data_get(device: DeviceId, addr: Address, size: u32) -> Vec<u8> {
    frame(device, CM_ID_RQ1, addr, &address_bytes(size))
}

/// The interesting parts of a DT1 message that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSet<'a> {
    pub device: DeviceId,
    pub model: ModelId,
    pub address: Address,
    pub payload: &'a [u8],
}

/// Validates a DT1 message and takes it apart.
pub fn unmarshal_set(frame: &[u8]) -> Result<DecodedSet> {
    if frame.len() < MIN_DT1_LEN {
        return Err(Error::TooShort {
            len: frame.len(),
            min: MIN_DT1_LEN,
        });
    }
    let &[start, manufacturer, device, model, command, ref rest @ ..] = frame else {
        unreachable!();
    };
    let &[ref body @ .., sum, end] = rest else {
        unreachable!();
    };

    if start != SYSEX_START {
        return Err(Error::BadStart(start));
    }
    if end != SYSEX_END {
        return Err(Error::BadEnd(end));
    }
    if manufacturer != MF_ID_ROLAND {
        return Err(Error::BadManufacturer(manufacturer));
    }
    if model_info(model).is_none() {
        return Err(Error::BadModel(model));
    }
    if command != CM_ID_DT1 {
        return Err(Error::BadCommand(command));
    }
    let expected = checksum(body);
    if expected != sum {
        return Err(Error::ChecksumMismatch {
            expected,
            actual: sum,
        });
    }

    let (address, payload) = body.split_at(ADDRESS_LEN);
    let address = address
        .iter()
        .fold(0, |acc, &byte| (acc << 8) | Address::from(byte));

    Ok(DecodedSet {
        device,
        model,
        address,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        // GS reset, as printed in the SC-55 manual
        assert_eq!(checksum(&[0x40, 0x00, 0x7F, 0x00]), 0x41);
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x40, 0x40]), 0);
        assert_eq!(checksum(&[0x7F, 0x7F, 0x7F]), 0x03);
    }

    #[test]
    fn test_data_set() {
        assert_eq!(
            data_set(0x10, ADDR_MODE_SET, &[0x00]),
            [0xF0, 0x41, 0x10, 0x42, 0x12, 0x40, 0x00, 0x7F, 0x00, 0x41, 0xF7]
        );
        assert_eq!(
            data_set(0x10, 0x40_1022, &[0x01]),
            [0xF0, 0x41, 0x10, 0x42, 0x12, 0x40, 0x10, 0x22, 0x01, 0x0D, 0xF7]
        );
    }

    #[test]
    fn test_model_selection() {
        assert_eq!(data_set(0x10, ADDR_DISPLAY_MESSAGE, &[0x41])[3], MD_ID_SC_55);
        assert_eq!(data_set(0x10, ADDR_MASTER_TUNE, &[0x00])[3], MD_ID_GS);
        assert_eq!(model_for_address(ADDR_MASTER_TUNE - 1), MD_ID_SC_55);
    }

    #[test]
    fn test_data_get() {
        assert_eq!(
            data_get(0x11, 0x40_0004, 1),
            [0xF0, 0x41, 0x11, 0x42, 0x11, 0x40, 0x00, 0x04, 0x00, 0x00, 0x01, 0x3B, 0xF7]
        );
    }

    #[test]
    fn test_unmarshal_set() {
        let frame = data_set(0x17, 0x40_1019, &[0x64]);
        let decoded = unmarshal_set(&frame).unwrap();
        assert_eq!(
            decoded,
            DecodedSet {
                device: 0x17,
                model: MD_ID_GS,
                address: 0x40_1019,
                payload: &[0x64],
            }
        );

        let frame = data_set(0x10, ADDR_DISPLAY_MESSAGE, b"");
        assert_eq!(unmarshal_set(&frame).unwrap().payload, b"");
    }

    #[test]
    fn test_unmarshal_set_rejects() {
        let good = data_set(0x10, 0x40_0004, &[0x7F]);

        let mut bad = good.clone();
        bad[9] ^= 0x01;
        assert_eq!(
            unmarshal_set(&bad),
            Err(Error::ChecksumMismatch {
                expected: good[9],
                actual: good[9] ^ 0x01,
            })
        );

        let mut bad = good.clone();
        bad[0] = 0xF1;
        assert_eq!(unmarshal_set(&bad), Err(Error::BadStart(0xF1)));

        let mut bad = good.clone();
        bad[10] = 0x00;
        assert_eq!(unmarshal_set(&bad), Err(Error::BadEnd(0x00)));

        let mut bad = good.clone();
        bad[1] = 0x43;
        assert_eq!(unmarshal_set(&bad), Err(Error::BadManufacturer(0x43)));

        let mut bad = good.clone();
        bad[3] = 0x56;
        assert_eq!(unmarshal_set(&bad), Err(Error::BadModel(0x56)));

        let request = data_get(0x10, 0x40_0004, 1);
        assert_eq!(unmarshal_set(&request), Err(Error::BadCommand(CM_ID_RQ1)));

        assert_eq!(
            unmarshal_set(&good[..9]),
            Err(Error::TooShort { len: 9, min: 10 })
        );
        assert!(unmarshal_set(&[]).unwrap_err().is_malformed());
    }
}
