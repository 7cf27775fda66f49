//! Property-based tests for the codec and register catalog.
//! These check invariants over whole input ranges rather than fixed examples.

use proptest::prelude::*;
use sc55::bitmap::pack;
use sc55::sysex::roland::{checksum, data_set, unmarshal_set};
use sc55::{Catalog, Error, Register};
use std::sync::OnceLock;

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::build)
}

/// Every register, paired with a logical value somewhere in its range.
fn register_and_value() -> impl Strategy<Value = (Register, i32)> {
    let registers = catalog().all_registers();
    (0..registers.len(), any::<u32>()).prop_map(move |(i, seed)| {
        let register = registers[i];
        let range = register.logical_range();
        let span = (i64::from(*range.end()) - i64::from(*range.start()) + 1) as u64;
        let value = i64::from(*range.start()) + (u64::from(seed) % span) as i64;
        (register, value as i32)
    })
}

proptest! {
    /// The checksum is always a valid 7-bit data byte, and makes the body
    /// sum to a multiple of 128, whatever bytes the body holds.
    #[test]
    fn checksum_is_seven_bit(body in proptest::collection::vec(any::<u8>(), 0..80)) {
        let sum = checksum(&body);
        prop_assert!(sum < 0x80);
        let total: u32 = body.iter().map(|&b| u32::from(b)).sum::<u32>() + u32::from(sum);
        prop_assert_eq!(total % 128, 0);
    }

    /// Any DT1 we build passes validation and gives back what went in.
    #[test]
    fn data_set_unmarshals(
        device in 0u8..0x80,
        addr in 0u32..0x100_0000,
        data in proptest::collection::vec(0u8..0x80, 0..32),
    ) {
        let frame = data_set(device, addr, &data);
        let decoded = unmarshal_set(&frame).unwrap();
        prop_assert_eq!(decoded.device, device);
        prop_assert_eq!(decoded.address, addr);
        prop_assert_eq!(decoded.payload, &data[..]);
        prop_assert_eq!(frame[frame.len() - 2], checksum(&frame[5..frame.len() - 2]));
    }

    /// Corrupting the checksum byte is always caught.
    #[test]
    fn flipped_checksum_is_rejected(data in proptest::collection::vec(0u8..0x80, 1..8), flip in 1u8..0x80) {
        let mut frame = data_set(0x10, 0x40_0004, &data);
        let at = frame.len() - 2;
        frame[at] ^= flip;
        let is_mismatch = matches!(unmarshal_set(&frame), Err(Error::ChecksumMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn register_round_trip((register, value) in register_and_value(), device in 0u8..0x80) {
        prop_assert_eq!(register.unmarshal(&register.set(device, value)), Ok((device, value)));
    }

    /// Out-of-range values give the same bytes as the nearest bound.
    #[test]
    fn set_saturates((register, _) in register_and_value(), excess in 1i32..1_000_000) {
        let range = register.logical_range();
        prop_assert_eq!(
            register.set(0x10, range.start().saturating_sub(excess)),
            register.set(0x10, *range.start())
        );
        prop_assert_eq!(
            register.set(0x10, range.end().saturating_add(excess)),
            register.set(0x10, *range.end())
        );
    }

    /// Each lit pixel lights exactly one bit, and no two pixels share one.
    #[test]
    fn packing_is_injective(x in 0usize..16, y in 0usize..16) {
        let mut pixels = [[false; 16]; 16];
        pixels[y][x] = true;
        let packed = pack(&pixels).unwrap();
        let bits: u32 = packed.iter().map(|byte| byte.count_ones()).sum();
        prop_assert_eq!(bits, 1);
        prop_assert_eq!(packed[(x / 5) * 16 + y], 1 << (4 - x % 5));
    }
}

#[test]
fn every_register_round_trips_at_its_bounds() {
    for register in catalog().all_registers() {
        let range = register.logical_range();
        for value in [*range.start(), 0.clamp(*range.start(), *range.end()), *range.end()] {
            assert_eq!(register.unmarshal(&register.set(0x10, value)), Ok((0x10, value)));
        }
    }
}
