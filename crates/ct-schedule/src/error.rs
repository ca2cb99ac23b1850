use thiserror::Error;

use ct_core::{ContainerNumber, CtError};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("container {0} is scheduled more than once")]
    DuplicateContainer(ContainerNumber),

    #[error(transparent)]
    Core(#[from] CtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
