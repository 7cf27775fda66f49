/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The set of [Register]s the SC-55 has, indexed by name and by address.
//!
//! Master parameters have fixed addresses. The sixteen parts all share one
//! layout ([tables::PART]) at different base addresses, and those bases are
//! not in front-panel order: part 10 (the rhythm part) lives in block 0.

use crate::error::{Error, Result};
use crate::register::Register;
use crate::sysex::roland::Address;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

// All the tables are in their own module to keep this one small.
pub mod tables;

use tables::Field;

pub const PART_COUNT: u8 = 16;
const PART_BLOCK_BASE: Address = 0x40_1000;
const PART_BLOCK_SIZE: Address = 0x100;

/// Which of the sixteen part blocks holds part `number` (1-16, as shown on
/// the front panel). Parts 1-9 are in blocks 1-9, part 10 is in block 0 and
/// parts 11-16 are in blocks Ah-Fh.
pub fn part_block(number: u8) -> Option<u8> {
    match number {
        1..=9 => Some(number),
        10 => Some(0),
        11..=16 => Some(number - 1),
        _ => None,
    }
}

/// Base address of part `number`'s parameters.
pub fn part_base(number: u8) -> Option<Address> {
    part_block(number).map(|block| PART_BLOCK_BASE + Address::from(block) * PART_BLOCK_SIZE)
}

fn field_register(field: &Field, base: Address) -> Register {
    Register::new(base + field.offset, field.size, field.min, field.max, field.zero)
}

/// One part's worth of registers, in [tables::PART] order.
#[derive(Debug, Clone)]
pub struct Part {
    pub number: u8,
    pub base: Address,
    pub registers: Vec<(&'static Field, Register)>,
}

impl Part {
    pub fn new(number: u8) -> Option<Part> {
        let base = part_base(number)?;
        Some(Part {
            number,
            base,
            registers: tables::PART
                .iter()
                .map(|field| (field, field_register(field, base)))
                .collect(),
        })
    }

    pub fn register_name(&self, key: &str) -> String {
        format!("part-{}.{}", self.number, key)
    }
}

/// Every register, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    by_address: BTreeMap<Address, Register>,
    by_name: HashMap<String, Address>,
    names: BTreeMap<Address, String>,
    important: BTreeSet<Address>,
}

impl Catalog {
    pub fn build() -> Catalog {
        let mut catalog = Catalog {
            by_address: BTreeMap::new(),
            by_name: HashMap::new(),
            names: BTreeMap::new(),
            important: BTreeSet::new(),
        };

        for field in tables::MASTER {
            catalog.insert(field.key.to_owned(), field_register(field, 0), field.important);
        }
        for part in (1..=PART_COUNT).filter_map(Part::new) {
            for &(field, register) in &part.registers {
                catalog.insert(part.register_name(field.key), register, field.important);
            }
        }

        debug!(
            registers = catalog.by_address.len(),
            important = catalog.important.len(),
            "built register catalog"
        );
        catalog
    }

    fn insert(&mut self, name: String, register: Register, important: bool) {
        let address = register.address;
        assert!(
            self.by_address.insert(address, register).is_none(),
            "two registers at {:06X}h",
            address
        );
        assert!(
            self.by_name.insert(name.clone(), address).is_none(),
            "two registers named {:?}",
            name
        );
        self.names.insert(address, name);
        if important {
            self.important.insert(address);
        }
    }

    pub fn register_by_name(&self, name: &str) -> Option<Register> {
        self.by_name
            .get(name)
            .and_then(|address| self.by_address.get(address))
            .copied()
    }

    pub fn register_by_address(&self, address: Address) -> Option<Register> {
        self.by_address.get(&address).copied()
    }

    /// Like [Catalog::register_by_name], but with an error for the caller to
    /// pass on.
    pub fn lookup(&self, name: &str) -> Result<Register> {
        self.register_by_name(name)
            .ok_or_else(|| Error::UnknownRegister(name.to_owned()))
    }

    pub fn lookup_address(&self, address: Address) -> Result<Register> {
        self.register_by_address(address)
            .ok_or(Error::UnknownAddress(address))
    }

    /// Dotted name of a register from this catalog.
    pub fn name_of(&self, register: &Register) -> Option<&str> {
        self.names.get(&register.address).map(String::as_str)
    }

    pub fn is_important(&self, register: &Register) -> bool {
        self.important.contains(&register.address)
    }

    /// All registers, lowest address first.
    pub fn all_registers(&self) -> Vec<Register> {
        let mut registers: Vec<Register> = self.by_address.values().copied().collect();
        registers.sort_by_key(|register| register.address);
        registers
    }

    /// The front-panel subset of [Catalog::all_registers].
    pub fn important_registers(&self) -> Vec<Register> {
        self.all_registers()
            .into_iter()
            .filter(|register| self.is_important(register))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}
