/// Errors raised when sampling the wall clock
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("clock reading {hour:02}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },

    #[error("time source unavailable: {0}")]
    Unavailable(String),
}
