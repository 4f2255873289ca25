use std::fmt;
use std::io;
use std::num::ParseIntError;

#[derive(Debug)]
pub struct AppError {
    pub message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        AppError { message: message.into() }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<portmidi::Error> for AppError {
    fn from(error: portmidi::Error) -> Self {
        AppError {
            message: error.to_string(),
        }
    }
}

impl From<midipad::Error> for AppError {
    fn from(error: midipad::Error) -> Self {
        AppError {
            message: error.to_string(),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError {
            message: error.to_string(),
        }
    }
}

impl From<ParseIntError> for AppError {
    fn from(error: ParseIntError) -> Self {
        AppError {
            message: error.to_string(),
        }
    }
}
