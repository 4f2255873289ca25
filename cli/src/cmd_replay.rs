use std::fs::File;
use std::io::Read;

use log::*;

use midipad::{Frame, MidiEvent, MidiParser, SharedNoteState, Timestamp};

use crate::app_config::AppConfig;
use crate::app_error::AppError;
use crate::frame_log::FrameLog;

/// Keep evaluating this long after the last scripted event, so that
/// re-press mutes run out.
const TAIL_MS: Timestamp = 100;

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptAction {
    Event(MidiEvent),
    Raw(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScriptEntry {
    pub time: Timestamp,
    pub action: ScriptAction,
}

fn parse_error(line_number: usize, line: &str, reason: &str) -> AppError {
    AppError::new(format!("line {}: {} ({})", line_number, reason, line.trim()))
}

/// Parse one script line. Blank lines and comments give `None`.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<ScriptEntry>, AppError> {
    let content = match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    };
    let words: Vec<&str> = content.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    if words.len() < 3 {
        return Err(parse_error(line_number, line, "expected `<ms> <command> <argument>`"));
    }

    let time = words[0].parse::<Timestamp>()
        .map_err(|_| parse_error(line_number, line, "bad time"))?;
    let pitch = || -> Result<u8, AppError> {
        match words[2].parse::<u8>() {
            Ok(pitch) if pitch < 128 && words.len() == 3 => Ok(pitch),
            _ => Err(parse_error(line_number, line, "expected one pitch 0-127")),
        }
    };

    let action = match words[1] {
        "note-on" => ScriptAction::Event(MidiEvent::NoteOn { pitch: pitch()? }),
        "note-off" => ScriptAction::Event(MidiEvent::NoteOff { pitch: pitch()? }),
        "sustain" => match (words[2], words.len()) {
            ("down", 3) => ScriptAction::Event(MidiEvent::SustainPedal { down: true }),
            ("up", 3) => ScriptAction::Event(MidiEvent::SustainPedal { down: false }),
            _ => return Err(parse_error(line_number, line, "expected `down` or `up`")),
        },
        "raw" => {
            let mut bytes = Vec::new();
            for word in &words[2..] {
                let byte = u8::from_str_radix(word, 16)
                    .map_err(|_| parse_error(line_number, line, "bad hex byte"))?;
                bytes.push(byte);
            }
            ScriptAction::Raw(bytes)
        },
        _ => return Err(parse_error(line_number, line, "unknown command")),
    };

    let time = time.checked_add(1)
        .ok_or_else(|| parse_error(line_number, line, "time out of range"))?;
    Ok(Some(ScriptEntry { time, action }))
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptEntry>, AppError> {
    let mut entries: Vec<ScriptEntry> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(entry) = parse_line(index + 1, line)? {
            if let Some(last) = entries.last() {
                if entry.time < last.time {
                    return Err(parse_error(index + 1, line, "time goes backwards"));
                }
            }
            entries.push(entry);
        }
    }
    return Ok(entries);
}

pub fn read_script(file_name: &str) -> Result<Vec<ScriptEntry>, AppError> {
    let mut text = String::new();
    let mut file = File::open(file_name)?;
    file.read_to_string(&mut text)?;
    parse_script(&text)
}

/// Drive the pipeline through `entries` on a simulated clock that advances
/// one tick at a time, handing every emitted frame to `output`.
pub fn replay(app_config: &AppConfig, entries: &[ScriptEntry],
              output: &mut dyn FnMut(Timestamp, &Frame)) -> Result<(), AppError> {
    let mut engine = app_config.build_engine()?;
    let notes = SharedNoteState::default();
    let mut parser = MidiParser::new();

    let end = entries.last().map(|entry| entry.time).unwrap_or(1).saturating_add(TAIL_MS);
    let mut pending = entries.iter().peekable();
    let mut now: Timestamp = 1;

    while now <= end {
        while let Some(entry) = pending.peek() {
            if entry.time > now {
                break;
            }
            match &entry.action {
                ScriptAction::Event(event) => {
                    debug!("{}: {}", entry.time, event);
                    notes.apply(*event, entry.time);
                },
                ScriptAction::Raw(bytes) => {
                    let time = entry.time;
                    parser.push_bytes(bytes, &mut |event| {
                        debug!("{}: {}", time, event);
                        notes.apply(event, time);
                    });
                },
            }
            pending.next();
        }

        if let Some(frame) = engine.evaluate(&notes, now) {
            output(now, &frame);
        }
        now = match now.checked_add(app_config.tick_ms) {
            Some(next) => next,
            None => break,
        };
    }

    return Ok(());
}

pub fn run_replay(app_config: &AppConfig, script_file: &str) -> Result<(), AppError> {
    let entries = read_script(script_file)?;
    info!("Read {} events from {}", entries.len(), script_file);

    let mut log = FrameLog::new(&app_config.surface);
    replay(app_config, &entries, &mut |time, frame| {
        println!("{}", log.line(time, frame));
    })
}
