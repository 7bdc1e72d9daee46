//! Error types for stage-jog.
//!
//! Provides unified error handling across unit conversion, the serial transport,
//! response parsing, configuration, and the device session.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stage-jog operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Serial transport could not be opened or failed during I/O
    Transport(TransportError),
    /// Operator-supplied distance is unusable
    Input(InputError),
    /// Controller response could not be interpreted
    Parse(ParseError),
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Session refused the action
    Session(SessionError),
}

/// Transport errors. Always fatal to the action in progress; never retried.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Port unavailable
    Open(heapless::String<128>),
    /// Write to the port failed
    Write(heapless::String<128>),
    /// Read from the port failed
    Read(heapless::String<128>),
    /// I/O attempted on a transport that was already closed
    Closed,
}

/// Operator input errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Distance is NaN or infinite
    NonFinite(f64),
    /// Distance text is not a number
    Unparseable(heapless::String<32>),
    /// Distance converts to a step count outside the representable range
    StepOverflow(f64),
}

/// Response parsing errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Controller returned no payload
    Empty,
    /// Response bytes are not valid UTF-8
    NotUtf8,
    /// Response is not a signed integer
    NotAnInteger(heapless::String<32>),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Serial port path is empty
    EmptyPort,
    /// Baud rate must be > 0
    InvalidBaudRate(u32),
    /// Data bits must be 5-8
    InvalidDataBits(u8),
    /// Stop bits must be 1 or 2
    InvalidStopBits(u8),
    /// Read timeout, when given, must be > 0 ms
    InvalidReadTimeout(u64),
    /// Response read length must be 1..=RESPONSE_BUFFER_LEN
    InvalidResponseLength(usize),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Session-level refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// Action requires the controller to be online
    NotOnline,
}

impl Error {
    /// True for transport open/write/read failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// True for rejected operator input.
    pub fn is_input(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    /// True for malformed controller responses.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Copy a message into a bounded string, truncating on a char boundary.
pub(crate) fn bounded<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "Transport error: {}", e),
            Error::Input(e) => write!(f, "Invalid input: {}", e),
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Session(e) => write!(f, "Session error: {}", e),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Open(msg) => write!(f, "Unable to open port: {}", msg),
            TransportError::Write(msg) => write!(f, "Write failed: {}", msg),
            TransportError::Read(msg) => write!(f, "Read failed: {}", msg),
            TransportError::Closed => write!(f, "Transport is closed"),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonFinite(v) => write!(f, "Distance {} is not a finite number", v),
            InputError::Unparseable(text) => write!(f, "Distance '{}' is not a number", text),
            InputError::StepOverflow(v) => {
                write!(f, "Distance {} mm is outside the controller's step range", v)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Empty response"),
            ParseError::NotUtf8 => write!(f, "Response is not valid UTF-8"),
            ParseError::NotAnInteger(raw) => write!(f, "Expected an integer, got '{}'", raw),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::EmptyPort => write!(f, "Serial port path must not be empty"),
            ConfigError::InvalidBaudRate(v) => write!(f, "Invalid baud rate: {}. Must be > 0", v),
            ConfigError::InvalidDataBits(v) => write!(f, "Invalid data bits: {}. Must be 5-8", v),
            ConfigError::InvalidStopBits(v) => write!(f, "Invalid stop bits: {}. Must be 1 or 2", v),
            ConfigError::InvalidReadTimeout(v) => {
                write!(f, "Invalid read timeout: {} ms. Omit it to block, otherwise > 0", v)
            }
            ConfigError::InvalidResponseLength(v) => write!(
                f,
                "Invalid response length: {}. Must be 1-{}",
                v,
                crate::protocol::RESPONSE_BUFFER_LEN
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotOnline => write!(f, "Controller is offline; send Online first"),
        }
    }
}

// Conversion impls
impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Error::Input(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Error::Session(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
