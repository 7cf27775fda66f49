/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Presenting registers and messages to humans.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::register::Register;
use crate::sysex::format_bytes;
use crate::sysex::roland::{model_info, unmarshal_set, DecodedSet};
use std::fmt::{Arguments, Display, Formatter, Result as FmtResult, Write};

// Utilities

/// Generic way to present a table of data (e.g. the register list) to the
/// user.
pub trait TableStream {
    /// Output a cell for a table heading to the current row.
    fn th(&mut self, c: Arguments);
    /// Output a normal cell to the current row.
    fn td(&mut self, c: Arguments);
    /// End the current row. New cells will go in the next row. This must
    /// always be called after pushing the cells for the current row.
    fn end_tr(&mut self);
}

/// Tab-separated rows, one per line, appended to a [String].
pub struct TextTableStream<'a> {
    string: &'a mut String,
    first_cell: bool,
}
impl TextTableStream<'_> {
    pub fn new(string: &mut String) -> TextTableStream {
        TextTableStream {
            string,
            first_cell: true,
        }
    }
}
impl TableStream for TextTableStream<'_> {
    fn th(&mut self, c: Arguments) {
        self.td(c)
    }
    fn td(&mut self, c: Arguments) {
        if self.first_cell {
            self.first_cell = false;
        } else {
            self.string.push('\t');
        }
        write!(self.string, "{}", c).unwrap();
    }
    fn end_tr(&mut self) {
        self.string.push('\n');
        self.first_cell = true;
    }
}

// UI entry-points

pub fn list_registers(table_stream: &mut impl TableStream, catalog: &Catalog, important_only: bool) {
    table_stream.th(format_args!("Address"));
    table_stream.th(format_args!("Name"));
    table_stream.th(format_args!("Size"));
    table_stream.th(format_args!("Range"));
    table_stream.end_tr();

    let registers = if important_only {
        catalog.important_registers()
    } else {
        catalog.all_registers()
    };
    for register in registers {
        let range = register.logical_range();
        table_stream.td(format_args!("{:06X}", register.address));
        table_stream.td(format_args!("{}", catalog.name_of(&register).unwrap_or("?")));
        table_stream.td(format_args!("{}", register.size));
        table_stream.td(format_args!("{}..={}", range.start(), range.end()));
        table_stream.end_tr();
    }
}

/// A validated DT1 message, with whatever the catalog knows about where it
/// writes to.
pub struct DescribedSet<'a> {
    pub decoded: DecodedSet<'a>,
    pub register: Option<(&'a str, Register)>,
}
impl Display for DescribedSet<'_> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let DecodedSet {
            device,
            model,
            address,
            payload,
        } = self.decoded;

        write!(f, "Device {:02X}h, ", device)?;
        match model_info(model) {
            Some(info) => write!(f, "{}", info.name)?,
            None => write!(f, "Model {:02X}h", model)?,
        }
        write!(f, ": Data set 1: ")?;

        let Some((name, register)) = self.register else {
            return write!(f, "(unknown) {:06X}h => {}", address, format_bytes(payload));
        };
        write!(f, "{} => {}", name, format_bytes(payload))?;
        if payload.len() != usize::from(register.size) {
            return write!(f, " (WRONG SIZE)");
        }
        match register.decode(payload) {
            Ok(value) => write!(f, " ({})", value),
            Err(_) => write!(f, " (OUT OF RANGE)"),
        }
    }
}

/// Validates a DT1 message and looks up the register it writes to.
pub fn describe_sysex<'a>(catalog: &'a Catalog, frame: &'a [u8]) -> Result<DescribedSet<'a>> {
    let decoded = unmarshal_set(frame)?;
    let register = catalog
        .register_by_address(decoded.address)
        .and_then(|register| Some((catalog.name_of(&register)?, register)));
    Ok(DescribedSet { decoded, register })
}
