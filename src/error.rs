use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a failed catalog or encoding operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Malformed input: bad event index, bad attribute index, wrong code count
    /// for a composite encoding, or a zero default privilege level.
    #[error("invalid argument: {0}")]
    Inval(String),

    /// The PMU has not been initialized, or has been terminated.
    #[error("PMU not initialized")]
    NoInit,

    /// Unknown event type, missing host support, or an encoding the
    /// architecture cannot express.
    #[error("not supported: {0}")]
    NotSupp(String),

    /// Two unit masks selected from one group, or a group left without any
    /// selection and without a default.
    #[error("event {event}: unit mask group {group}: {reason}")]
    Umask {
        event: String,
        group: u32,
        reason: &'static str,
    },

    /// Attribute not recognized by the event type.
    #[error("event {event}: attribute not supported by this event type")]
    Attr { event: String },

    /// Attribute recognized but its value is out of range.
    #[error("attribute {name}={value} out of range")]
    AttrSet { name: &'static str, value: i64 },

    /// Attributes that cannot be combined.
    #[error("event {event}: {reason}")]
    FeatComb { event: String, reason: &'static str },

    /// Backing store could not grow.
    #[error("out of memory")]
    NoMem,
}

impl Error {
    /// Stable integer outcome code, numbered like libpfm's `PFM_ERR_*`.
    pub fn code(&self) -> i32 {
        match self {
            Self::NotSupp(_) => -1,
            Self::Inval(_) => -2,
            Self::NoInit => -3,
            Self::FeatComb { .. } => -5,
            Self::Umask { .. } => -6,
            Self::NoMem => -7,
            Self::Attr { .. } => -8,
            Self::AttrSet { .. } => -10,
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::NoMem
    }
}
