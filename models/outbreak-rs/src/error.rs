use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutbreakError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid day count {0}: the first simulated day is 1")]
    InvalidDayCount(i64),

    #[error("patient count overflowed on day {day}")]
    Overflow { day: u64 },

    #[error(transparent)]
    Mrp(#[from] mrp::MrpError),
}

pub type OutbreakResult<T> = Result<T, OutbreakError>;
