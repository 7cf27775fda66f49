/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Parameter address maps for the SC-55, in the style of the "Parameter
//! Address Map" tables in the back of the owner's manual.
//!
//! References:
//! - Roland SC-55 Owner's Manual.
//! - Roland SC-55mkII Owner's Manual.

use crate::sysex::roland::Address;

/// One row of a parameter address map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Lower-case, hyphenated name used on the command line.
    pub key: &'static str,
    /// Absolute for [MASTER], relative to the part's base for [PART].
    pub offset: Address,
    pub size: u8,
    pub min: u32,
    pub max: u32,
    pub zero: u32,
    /// Shown on the front panel.
    pub important: bool,
}

impl Field {
    const fn new(key: &'static str, offset: Address, min: u32, max: u32) -> Field {
        Field {
            key,
            offset,
            size: 1,
            min,
            max,
            zero: 0,
            important: false,
        }
    }

    const fn size(self, size: u8) -> Field {
        Field { size, ..self }
    }

    const fn zero(self, zero: u32) -> Field {
        Field { zero, ..self }
    }

    const fn important(self) -> Field {
        Field {
            important: true,
            ..self
        }
    }
}

const fn switch(key: &'static str, offset: Address) -> Field {
    Field::new(key, offset, 0x00, 0x01)
}

const fn level(key: &'static str, offset: Address) -> Field {
    Field::new(key, offset, 0x00, 0x7F)
}

/// -64 to +63 around `40h`.
const fn centred(key: &'static str, offset: Address) -> Field {
    Field::new(key, offset, 0x00, 0x7F).zero(0x40)
}

/// GS "System Parameters" and "Patch Common" (reverb/chorus).
pub const MASTER: &[Field] = &[
    // The manual calls this "nibblized data", but the SC-55 also accepts
    // the value in plain bytes. -100.0 to +100.0 cents in tenths.
    Field::new("master-tune", 0x40_0000, 0x18, 0x7E8)
        .size(4)
        .zero(0x400),
    level("master-volume", 0x40_0004).important(),
    Field::new("master-key-shift", 0x40_0005, 0x28, 0x58)
        .zero(0x40)
        .important(),
    // 00h would be "random", which the SC-55 doesn't do at this level
    Field::new("master-pan", 0x40_0006, 0x01, 0x7F)
        .zero(0x40)
        .important(),
    Field::new("reverb-macro", 0x40_0130, 0x00, 0x07),
    Field::new("reverb-character", 0x40_0131, 0x00, 0x07),
    Field::new("reverb-pre-lpf", 0x40_0132, 0x00, 0x07),
    level("reverb-level", 0x40_0133).important(),
    level("reverb-time", 0x40_0134),
    level("reverb-delay-feedback", 0x40_0135),
    level("reverb-send-to-chorus", 0x40_0137),
    Field::new("chorus-macro", 0x40_0138, 0x00, 0x07),
    Field::new("chorus-pre-lpf", 0x40_0139, 0x00, 0x07),
    level("chorus-level", 0x40_013A).important(),
    level("chorus-feedback", 0x40_013B),
    level("chorus-delay", 0x40_013C),
    level("chorus-rate", 0x40_013D),
    level("chorus-depth", 0x40_013E),
    level("chorus-send-to-reverb", 0x40_013F),
];

/// GS "Patch Part" parameters, relative to `40h 1xh 00h`.
pub const PART: &[Field] = &[
    // TONE NUMBER is two data bytes, CC#00 then the program number. Each is
    // its own register so that neither can go over 7Fh.
    level("tone-number-variation", 0x00).important(),
    level("tone-number-program", 0x01).important(),
    // 10h is OFF
    Field::new("rx-channel", 0x02, 0x00, 0x10),
    switch("rx-pitch-bend", 0x03),
    switch("rx-channel-pressure", 0x04),
    switch("rx-program-change", 0x05),
    switch("rx-control-change", 0x06),
    switch("rx-poly-pressure", 0x07),
    switch("rx-note-message", 0x08),
    switch("rx-rpn", 0x09),
    switch("rx-nrpn", 0x0A),
    switch("rx-modulation", 0x0B),
    switch("rx-volume", 0x0C),
    switch("rx-panpot", 0x0D),
    switch("rx-expression", 0x0E),
    switch("rx-hold1", 0x0F),
    switch("rx-portamento", 0x10),
    switch("rx-sostenuto", 0x11),
    switch("rx-soft", 0x12),
    // 00h MONO, 01h POLY
    switch("mono-poly-mode", 0x13),
    // 00h SINGLE, 01h LIMITED-MULTI, 02h FULL-MULTI
    Field::new("assign-mode", 0x14, 0x00, 0x02),
    // 00h OFF, 01h MAP1, 02h MAP2
    Field::new("use-for-rhythm-part", 0x15, 0x00, 0x02),
    Field::new("pitch-key-shift", 0x16, 0x28, 0x58)
        .zero(0x40)
        .important(),
    level("part-level", 0x19).important(),
    level("velocity-sense-depth", 0x1A),
    level("velocity-sense-offset", 0x1B),
    // 00h is "random", so the logical range goes one further left than right
    centred("part-pan", 0x1C).important(),
    level("key-range-low", 0x1D),
    level("key-range-high", 0x1E),
    Field::new("cc1-controller-number", 0x1F, 0x00, 0x5F),
    Field::new("cc2-controller-number", 0x20, 0x00, 0x5F),
    level("chorus-send", 0x21).important(),
    level("reverb-send", 0x22).important(),
    Field::new("vibrato-rate", 0x30, 0x0E, 0x72).zero(0x40),
    Field::new("vibrato-depth", 0x31, 0x0E, 0x72).zero(0x40),
    Field::new("tvf-cutoff-freq", 0x32, 0x0E, 0x72).zero(0x40),
    Field::new("tvf-resonance", 0x33, 0x0E, 0x72).zero(0x40),
    Field::new("env-attack-time", 0x34, 0x0E, 0x72).zero(0x40),
    Field::new("env-decay-time", 0x35, 0x0E, 0x72).zero(0x40),
    Field::new("env-release-time", 0x36, 0x0E, 0x72).zero(0x40),
    Field::new("vibrato-delay", 0x37, 0x0E, 0x72).zero(0x40),
    // -64 to +63 cents per note
    centred("scale-tuning-c", 0x40),
    centred("scale-tuning-c-sharp", 0x41),
    centred("scale-tuning-d", 0x42),
    centred("scale-tuning-d-sharp", 0x43),
    centred("scale-tuning-e", 0x44),
    centred("scale-tuning-f", 0x45),
    centred("scale-tuning-f-sharp", 0x46),
    centred("scale-tuning-g", 0x47),
    centred("scale-tuning-g-sharp", 0x48),
    centred("scale-tuning-a", 0x49),
    centred("scale-tuning-a-sharp", 0x4A),
    centred("scale-tuning-b", 0x4B),
];
