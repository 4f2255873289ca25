#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use midipad::control_surface::{ButtonSet, DPad};
    use midipad::control_surface::xbox::button;
    use midipad::{Baseline, Config, Frame, MidiEvent, Timestamp};

    use crate::app;
    use crate::app_config::AppConfig;
    use crate::cmd_replay::{parse_line, parse_script, read_script, replay, ScriptAction};
    use crate::frame_log::FrameLog;

    fn get_test_data_path(filename: &str) -> String {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("test_data");
        path.push(filename);
        return path
            .to_str().unwrap()
            .to_string();
    }

    fn replay_file(app_config: &AppConfig, filename: &str) -> Vec<(Timestamp, Frame)> {
        let entries = read_script(&get_test_data_path(filename)).unwrap();
        let mut frames = Vec::new();
        replay(app_config, &entries, &mut |time, frame| frames.push((time, *frame))).unwrap();
        return frames;
    }

    /// The frame in effect at `time`.
    fn frame_at(frames: &[(Timestamp, Frame)], time: Timestamp) -> &Frame {
        &frames.iter().rev().find(|(t, _)| *t <= time).unwrap().1
    }

    fn keys(keys: &[u8]) -> ButtonSet {
        let mut set = ButtonSet::new();
        for &key in keys {
            set.insert(key);
        }
        set
    }

    #[test]
    fn script_lines() {
        assert_eq!(parse_line(1, "  # just a comment").unwrap(), None);
        assert_eq!(parse_line(1, "").unwrap(), None);

        let entry = parse_line(1, "10 note-on 60 # middle C").unwrap().unwrap();
        assert_eq!(entry.time, 11);
        assert_eq!(entry.action, ScriptAction::Event(MidiEvent::NoteOn { pitch: 60 }));

        let entry = parse_line(1, "0 sustain up").unwrap().unwrap();
        assert_eq!(entry.action, ScriptAction::Event(MidiEvent::SustainPedal { down: false }));

        let entry = parse_line(1, "5 raw 90 3c 7f").unwrap().unwrap();
        assert_eq!(entry.action, ScriptAction::Raw(vec!(0x90, 0x3c, 0x7f)));
    }

    #[test]
    fn bad_script_lines() {
        assert!(parse_line(3, "10 note-on 128").is_err());
        assert!(parse_line(3, "10 note-on 60 61").is_err());
        assert!(parse_line(3, "soon note-on 60").is_err());
        assert!(parse_line(3, "10 sustain sideways").is_err());
        assert!(parse_line(3, "10 raw 9g").is_err());
        assert!(parse_line(3, "10 pitch-bend 12").is_err());
        assert!(parse_line(3, "10 note-on").is_err());
        assert!(parse_line(3, "18446744073709551615 note-on 60").is_err());
        assert!(parse_line(3, "18446744073709551614 note-on 60").is_ok());

        let error = parse_script("10 note-on 60\n5 note-off 60\n").unwrap_err();
        assert!(error.message.starts_with("line 2:"), "{}", error);
    }

    #[test]
    fn frame_lines() {
        let app_config = AppConfig::new("xbox-ble", Config::default());
        let entries = parse_script("0 note-on 48\n").unwrap();
        let mut frames = Vec::new();
        replay(&app_config, &entries, &mut |time, frame| frames.push((time, *frame))).unwrap();

        let mut log = FrameLog::new("xbox-ble");
        let line = log.line(frames[0].0, &frames[0].1);
        assert!(line.starts_with("       1 #.... ..... ..... buttons {}"), "{}", line);
    }

    #[test]
    fn command_line_config() {
        let matches = app().get_matches_from(vec!(
            "midipad", "replay", "--surface", "switch", "--mapping", "2",
            "--transpose", "-5", "--sustain", "--tick-ms", "4", "script.txt"));
        let sub_m = matches.subcommand_matches("replay").unwrap();
        let app_config = AppConfig::from_matches(sub_m).unwrap();

        assert_eq!(app_config.surface, "switch");
        assert_eq!(app_config.tick_ms, 4);
        assert_eq!(app_config.config, Config {
            mapping: 2,
            baseline: Baseline::Transpose(-5),
            sustain: true,
            extend: false,
        });
        assert_eq!(sub_m.value_of("SCRIPT"), Some("script.txt"));
    }

    #[test]
    fn command_line_defaults() {
        let matches = app().get_matches_from(vec!("midipad", "live"));
        let app_config = AppConfig::from_matches(matches.subcommand_matches("live").unwrap()).unwrap();
        assert_eq!(app_config, AppConfig::new("xbox-ble", Config::default()));
    }

    #[test]
    fn base_note_and_transpose_conflict() {
        let result = app().get_matches_from_safe(vec!(
            "midipad", "live", "--base-note", "50", "--transpose", "2"));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_config_is_reported() {
        let app_config = AppConfig::new("xbox-ble", Config { mapping: 5, ..Config::default() });
        assert!(replay(&app_config, &[], &mut |_, _| {}).is_err());

        let app_config = AppConfig::new("keytar", Config::default());
        let error = replay(&app_config, &[], &mut |_, _| {}).unwrap_err();
        assert_eq!(error.message, "unknown control surface 'keytar'");
    }

    #[test]
    fn replay_scale_on_gamepad() {
        let config = Config { sustain: true, ..Config::default() };
        let frames = replay_file(&AppConfig::new("xbox-ble", config), "scale.txt");

        assert_eq!(frame_at(&frames, 1).report.left_trigger, 1023);

        let frame = frame_at(&frames, 41);
        assert_eq!(frame.report.left_trigger, 0);
        assert_eq!(frame.report.right_trigger, 1023);

        let frame = frame_at(&frames, 81);
        assert_eq!(frame.report.right_trigger, 0);
        assert_eq!(frame.report.dpad, DPad::Down);

        assert_eq!(frame_at(&frames, 121).report.dpad, DPad::Centered);

        // C4 and E4 stay down on the pedal after the keys are let go.
        let frame = frame_at(&frames, 260);
        assert!(frame.report.buttons.contains(button::Y));
        assert!(frame.report.buttons.contains(button::B));

        let frame = frame_at(&frames, 301);
        assert!(frame.pressed.is_empty());
        assert!(frame.report.buttons.is_empty());
    }

    #[test]
    fn replay_keys_on_keyboard() {
        let app_config = AppConfig::new("usb-keyboard", Config::default());
        let frames = replay_file(&app_config, "keys.txt");

        for (_, frame) in &frames {
            assert!(frame.report.buttons.len() <= 5);
        }
        assert_eq!(frame_at(&frames, 61).report.buttons, keys(b"iophj"));

        // Y and U were pushed out and stay out while still held.
        assert_eq!(frame_at(&frames, 101).report.buttons, keys(b"ioph"));
        assert!(frame_at(&frames, 161).report.buttons.is_empty());

        let mut log = FrameLog::new("usb-keyboard");
        let lines: Vec<String> = frames.iter().map(|(time, frame)| log.line(*time, frame)).collect();
        assert!(lines.iter().any(|line| line.ends_with(" +h -y")), "{:?}", lines);
        assert!(lines.iter().any(|line| line.ends_with(" +j -u")), "{:?}", lines);
    }
}
