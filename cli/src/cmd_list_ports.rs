use portmidi::{PortMidi};

use midipad::control_surface;

use crate::app_error::*;

pub fn run_list_ports() -> Result<(), AppError> {
    println!("Available MIDI input ports:");
    let midi_context = PortMidi::new()?;
    for dev in midi_context.devices()? {
        if dev.is_input() {
            println!(" • {}", dev);
        }
    }

    println!();
    println!("Control surfaces:");
    for name in control_surface::SURFACE_NAMES.iter() {
        let surface = control_surface::by_name(name)?;
        let tables: Vec<String> = surface.mappings().iter().enumerate()
            .map(|(index, table)| format!("{}: {}", index + 1, table.name))
            .collect();
        println!(" • {} ({})", name, tables.join(", "));
    }

    return Ok(())
}
