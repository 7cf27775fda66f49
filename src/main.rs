/*
 * Part of sc55ctl.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Command-line front end. It produces SysEx bytes and either prints them as
//! hex or writes them raw to a path, which can be a `.syx` file or a raw MIDI
//! device node. Replies from the device are taken back the same way.

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use sc55::commands::{display_image, display_message, reset_gm, reset_gs};
use sc55::sysex::{format_bytes, parse_hex, trim_padding};
use sc55::ui::{describe_sysex, list_registers, TextTableStream};
use sc55::{Catalog, DeviceId, DEFAULT_DEVICE_ID};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Controls a Roland SC-55 over SysEx.
#[derive(Parser)]
#[command(name = "sc55ctl")]
#[command(version = sc55::VERSION)]
struct Cli {
    /// Device ID of the SC-55 to talk to (decimal, or hex with 0x)
    #[arg(long, global = true, env = "SC55_DEVICE_ID", default_value_t = DEFAULT_DEVICE_ID, value_parser = parse_device_id)]
    device_id: DeviceId,

    /// Write the message to this path instead of printing it as hex
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log what's going on (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reset the Sound Canvas into General MIDI mode
    ResetGm,
    /// Reset the Sound Canvas into GS mode
    ResetGs,
    /// Show a message on the front panel
    DisplayMessage {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show a 16x16 picture on the front panel
    DisplayImage { path: PathBuf },
    /// Set the master volume (0 to 127)
    MasterVolume {
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Set the master pan (-63 to 63)
    MasterPan {
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Set the master tune (-1000 to 1000)
    MasterTune {
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Set the master key shift (-24 to 24 semitones)
    MasterKeyShift {
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// List all registers on the Sound Canvas
    RegisterList {
        /// Only the ones on the front panel
        #[arg(long)]
        important: bool,
    },
    /// Set the value of a register
    RegisterSet {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Ask for the value of a register (decode the reply with `decode`)
    RegisterGet { name: String },
    /// Decode the device's reply to `register-get`
    Decode {
        name: String,
        /// Hex bytes, or a path to read raw bytes from
        frame: String,
    },
    /// Explain what a DT1 message does
    Describe {
        /// Hex bytes, or a path to read raw bytes from
        frame: String,
    },
}

fn parse_device_id(text: &str) -> Result<DeviceId, String> {
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => DeviceId::from_str_radix(hex, 16),
        None => text.parse(),
    };
    match parsed {
        Ok(id) if id < 0x80 => Ok(id),
        _ => Err(format!("{:?} is not a device ID (0 to 127)", text)),
    }
}

fn read_frame(arg: &str) -> anyhow::Result<Vec<u8>> {
    let bytes = match parse_hex(arg) {
        Some(bytes) => bytes,
        None => std::fs::read(arg).with_context(|| format!("reading {:?}", arg))?,
    };
    Ok(trim_padding(&bytes).to_vec())
}

fn emit(output: Option<&PathBuf>, message: &[u8]) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, message).with_context(|| format!("writing {:?}", path))?;
            info!(len = message.len(), path = %path.display(), "wrote message");
        }
        None => println!("{}", format_bytes(message)),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::build();
    let device = cli.device_id;
    debug!(device, "using device ID");

    let set_by_name = |name: &str, value: i32| -> anyhow::Result<Vec<u8>> {
        Ok(catalog.lookup(name)?.set(device, value))
    };

    let message = match cli.command {
        Command::ResetGm => reset_gm(device),
        Command::ResetGs => reset_gs(device),
        Command::DisplayMessage { words } => display_message(device, &words.join(" ")),
        Command::DisplayImage { path } => {
            let img = image::open(&path).with_context(|| format!("loading {:?}", path))?;
            display_image(device, &img)?
        }
        Command::MasterVolume { value } => set_by_name("master-volume", value)?,
        Command::MasterPan { value } => set_by_name("master-pan", value)?,
        Command::MasterTune { value } => set_by_name("master-tune", value)?,
        Command::MasterKeyShift { value } => set_by_name("master-key-shift", value)?,
        Command::RegisterSet { name, value } => set_by_name(&name, value)?,
        Command::RegisterGet { name } => catalog.lookup(&name)?.get(device),
        Command::RegisterList { important } => {
            let mut table = String::new();
            list_registers(&mut TextTableStream::new(&mut table), &catalog, important);
            print!("{}", table);
            return Ok(());
        }
        Command::Decode { name, frame } => {
            let register = catalog.lookup(&name)?;
            let frame = read_frame(&frame)?;
            let (from, value) = register
                .unmarshal(&frame)
                .with_context(|| format!("decoding reply for {}", name))?;
            if from != device {
                bail!("reply is from device {:02X}h, expected {:02X}h", from, device);
            }
            println!("{}", value);
            return Ok(());
        }
        Command::Describe { frame } => {
            let frame = read_frame(&frame)?;
            let described = describe_sysex(&catalog, &frame).map_err(|err| {
                if err.is_malformed() {
                    anyhow!(err).context("not a Roland DT1 message")
                } else {
                    anyhow!(err)
                }
            })?;
            println!("{}", described);
            return Ok(());
        }
    };

    emit(cli.output.as_ref(), &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_device_id() {
        assert_eq!(parse_device_id("16"), Ok(0x10));
        assert_eq!(parse_device_id("0x1F"), Ok(0x1F));
        assert!(parse_device_id("128").is_err());
        assert!(parse_device_id("ten").is_err());
    }

    #[test]
    fn test_negative_values() {
        let cli = Cli::try_parse_from(["sc55ctl", "master-pan", "-20"]).unwrap();
        assert!(matches!(cli.command, Command::MasterPan { value: -20 }));
        assert_eq!(cli.device_id, DEFAULT_DEVICE_ID);
    }

    #[test]
    fn test_device_id_after_subcommand() {
        let cli = Cli::try_parse_from(["sc55ctl", "reset-gs", "--device-id", "17"]).unwrap();
        assert!(matches!(cli.command, Command::ResetGs));
        assert_eq!(cli.device_id, 17);

        let cli = Cli::try_parse_from(["sc55ctl", "--device-id", "0x11", "register-get", "master-pan"])
            .unwrap();
        assert_eq!(cli.device_id, 0x11);
    }

    #[test]
    fn test_read_frame_hex() {
        assert_eq!(read_frame("F0 41 F7 00 00").unwrap(), [0xF0, 0x41, 0xF7]);
    }
}
