/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Building and parsing Roland SC-55 SysEx messages.
//!
//! Nothing in here talks to a MIDI port: everything takes or returns bytes.
//! Start with [Catalog::build], look up a [Register] and call
//! [Register::set], [Register::get] or [Register::unmarshal] on it.

pub mod bitmap;
pub mod catalog;
pub mod commands;
pub mod error;
pub mod register;
pub mod sysex;
pub mod ui;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use register::Register;
pub use sysex::{DeviceId, DEFAULT_DEVICE_ID};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
