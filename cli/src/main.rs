mod app_config;
mod app_error;
mod cmd_list_ports;
mod cmd_live;
mod cmd_replay;
mod frame_log;
mod tests;

use clap::{Arg, App, ArgGroup};
use log::*;

use crate::app_config::AppConfig;
use crate::app_error::AppError;

fn pipeline_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(Arg::with_name("surface")
            .long("surface")
            .short("d")
            .help("Control surface to drive (see `list-ports`)")
            .takes_value(true)
            .value_name("NAME"))
        .arg(Arg::with_name("mapping")
            .long("mapping")
            .short("m")
            .help("Action table, counting from 1")
            .takes_value(true)
            .value_name("N"))
        .arg(Arg::with_name("base-note")
            .long("base-note")
            .short("b")
            .help("MIDI note of the lowest slot (24-84, default 48)")
            .takes_value(true)
            .value_name("NOTE"))
        .arg(Arg::with_name("transpose")
            .long("transpose")
            .short("t")
            .help("Semitones added to incoming notes (-24 to 24)")
            .takes_value(true)
            .allow_hyphen_values(true)
            .value_name("SEMITONES"))
        .group(ArgGroup::with_name("baseline")
            .args(&["base-note", "transpose"]))
        .arg(Arg::with_name("sustain")
            .long("sustain")
            .help("Honour the sustain pedal"))
        .arg(Arg::with_name("extend")
            .long("extend")
            .short("e")
            .help("Fold notes outside the window in by octaves"))
        .arg(Arg::with_name("tick-ms")
            .long("tick-ms")
            .help("Evaluation period in milliseconds")
            .takes_value(true)
            .value_name("MS"))
}

fn app() -> App<'static, 'static> {
    App::new("midipad")
        .version("0.1")
        .about("Play a game controller from a MIDI keyboard")
        .subcommand(pipeline_args(App::new("live"))
            .arg(Arg::with_name("midi-port")
                 .long("midi-port")
                 .short("p")
                 .help("MIDI port to read from")
                 .takes_value(true)
                 .value_name("PORT")))
        .subcommand(pipeline_args(App::new("replay"))
            .arg(Arg::with_name("SCRIPT")
                 .help("Event script to play back")
                 .required(true)
                 .index(1)))
        .subcommand(App::new("list-ports"))
}

fn run() -> Result<(), AppError> {
    let app_m = app().get_matches();

    match app_m.subcommand() {
        ("live", Some(sub_m)) => {
            let app_config = AppConfig::from_matches(sub_m)?;
            let midi_port: i32 = sub_m.value_of("midi-port").unwrap_or("0")
                                    .parse::<i32>()?;
            cmd_live::run_live(&app_config, midi_port)
        },
        ("replay", Some(sub_m)) => {
            let app_config = AppConfig::from_matches(sub_m)?;
            let script = sub_m.value_of("SCRIPT").unwrap_or_default();
            cmd_replay::run_replay(&app_config, script)
        },
        ("list-ports", Some(_)) => {
            cmd_list_ports::run_list_ports()
        },
        _ => Err(AppError::new("expected a subcommand: live, replay or list-ports")),
    }
}

fn main() {
    env_logger::init();

    if let Err(error) = run() {
        error!("{}", error);
        eprintln!("midipad: {}", error);
        std::process::exit(1);
    }
}
