//! # Error Types
//!
//! Errors only arise at the edges of the crate: parsing pitch and duration
//! names, reading configuration, and validating a custom library. Melody
//! generation and notation layout never fail; malformed input degrades
//! instead (see `layout` for how short or overlong melodies are absorbed).
//!
//! ## Usage
//! ```rust
//! use piano_drill::{DrillError, Pitch};
//!
//! match "H4".parse::<Pitch>() {
//!     Ok(pitch) => println!("{}", pitch),
//!     Err(DrillError::InvalidPitch(text)) => eprintln!("bad pitch: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    /// A pitch name that is not `<letter>[#|b]<octave>`.
    ///
    /// # Example
    /// ```
    /// # use piano_drill::DrillError;
    /// let err = DrillError::InvalidPitch("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid pitch: H4");
    /// ```
    #[error("Invalid pitch: {0}")]
    InvalidPitch(String),

    /// A duration that is not one of `1n`, `2n`, `4n`, `8n`, `16n`.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Only two- and four-measure drills exist.
    #[error("Invalid measure count: {0} (expected 2 or 4)")]
    InvalidMeasureCount(String),

    /// A key root that is not in the key table.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// A configuration or library defect, such as a rhythm pattern whose
    /// beats do not add up to its budget.
    ///
    /// # Example
    /// ```
    /// # use piano_drill::DrillError;
    /// let err = DrillError::Config("rhythm 2 of four measures has 15 beats, expected 16".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid configuration: rhythm 2 of four measures has 15 beats, expected 16"
    /// );
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
