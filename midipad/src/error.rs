use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("mapping {index} does not exist for {surface} (expected 1..={count})")]
    UnknownMapping {
        surface: &'static str,
        index: usize,
        count: usize,
    },

    #[error("base note {value} is outside {min}..={max}")]
    BaseNoteOutOfRange { value: i32, min: i32, max: i32 },

    #[error("transpose {value} is outside {min}..={max}")]
    TransposeOutOfRange { value: i32, min: i32, max: i32 },

    #[error("unknown control surface '{0}'")]
    UnknownSurface(String),
}

pub type Result<T> = std::result::Result<T, Error>;
