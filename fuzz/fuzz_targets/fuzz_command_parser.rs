//! Fuzz target: `SecurityCommand::from_str` (console input path)
//!
//! Feeds arbitrary UTF-8 lines to the parser.
//!
//! Invariants checked:
//! - No panics under any input
//! - A line that parses to a sensor command always yields a non-empty name
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use catpoint::app::commands::SecurityCommand;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(cmd) = line.parse::<SecurityCommand>() {
        match cmd {
            SecurityCommand::AddSensor(s)
            | SecurityCommand::RemoveSensor(s)
            | SecurityCommand::Activate(s)
            | SecurityCommand::Deactivate(s) => assert!(!s.name().is_empty()),
            _ => {}
        }
    }
});
