use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::thread::sleep;
use std::time::Duration;

use log::*;
use portmidi::{PortMidi};

use midipad::midi;
use midipad::{Clock, Engine, SharedNoteState};

use crate::app_config::AppConfig;
use crate::app_error::AppError;
use crate::frame_log::FrameLog;

const MIDI_BUFFER_SIZE: usize = 1024;

fn open_midi_in<'a>(midi_context: &'a portmidi::PortMidi, midi_in_port: i32) -> Result<portmidi::InputPort<'a>, portmidi::Error> {
    let midi_info = midi_context.device(midi_in_port)?;
    info!("Opening MIDI input {}", midi_info);
    midi_context.input_port(midi_info, MIDI_BUFFER_SIZE)
}

/// Evaluate the pipeline every tick until `running` is cleared.
fn evaluation_loop(mut engine: Engine, notes: SharedNoteState, clock: Clock,
                   tick: Duration, running: Arc<AtomicBool>) {
    let mut log = FrameLog::new(engine.surface().name());
    while running.load(Ordering::Relaxed) {
        let now = clock.now();
        if let Some(frame) = engine.evaluate(&notes, now) {
            println!("{}", log.line(now, &frame));
        }
        sleep(tick);
    }
    debug!("evaluation loop stopped");
}

pub fn run_live(app_config: &AppConfig, midi_in_port: i32) -> Result<(), AppError> {
    let engine = app_config.build_engine()?;

    let midi_context = match PortMidi::new() {
        Ok(value) => value,
        Err(error) => return Err(AppError { message: format!("Cannot open PortMIDI: {}", error) }),
    };
    let midi_in = match open_midi_in(&midi_context, midi_in_port) {
        Ok(value) => value,
        Err(error) => return Err(AppError { message: format!("Cannot open MIDI input: {}", error) }),
    };

    let notes = SharedNoteState::default();
    let clock = Clock::new();
    let running = Arc::new(AtomicBool::new(true));

    let evaluator = {
        let notes = notes.clone();
        let running = running.clone();
        let tick = Duration::from_millis(app_config.tick_ms);
        thread::spawn(move || evaluation_loop(engine, notes, clock, tick, running))
    };

    while let Ok(_) = midi_in.poll() {
        if let Ok(Some(events)) = midi_in.read_n(MIDI_BUFFER_SIZE) {
            let now = clock.now();
            for event in events {
                let message = event.message;
                match midi::decode(message.status, message.data1, message.data2) {
                    Some(event) => {
                        debug!("{}: {}", now, event);
                        notes.apply(event, now);
                    },
                    None => trace!("skipped {:02x} {:02x} {:02x}", message.status, message.data1, message.data2),
                }
            }
        }

        // there is no blocking receive method in PortMidi
        sleep(Duration::from_millis(1));
    }

    warn!("MIDI input closed");
    running.store(false, Ordering::Relaxed);
    if evaluator.join().is_err() {
        return Err(AppError::new("evaluation thread panicked"));
    }
    return Ok(())
}
