//! Operating modes and serial command decoding.
//!
//! The latch accepts single-character commands over the control port:
//!
//! | Byte | Mode |
//! |------|------|
//! | `a` | [`Automatic`](OperatingMode::Automatic) |
//! | `b` | [`ForcedLocked`](OperatingMode::ForcedLocked) |
//! | `c` | [`ForcedUnlocked`](OperatingMode::ForcedUnlocked) |
//!
//! Any other byte is silently ignored and leaves the mode unchanged.
//! Decoding a command only selects the mode; the servo motion itself is
//! delegated to the lock state machine in [`crate::latch`], which acts on
//! mode *changes* (edge-triggered), never on the mode level.
//!
//! # Example
//!
//! ```rust
//! use servo_latch::OperatingMode;
//!
//! assert_eq!(OperatingMode::from_command(b'b'), Some(OperatingMode::ForcedLocked));
//! assert_eq!(OperatingMode::from_command(b'x'), None);
//! ```

/// Operating mode of the latch controller.
///
/// Set only by command decoding; read by the lock state machine. Repeating
/// the command for the mode already in effect is a no-op (the state machine
/// is edge-triggered on mode changes).
///
/// # Default
///
/// Defaults to [`Automatic`](Self::Automatic): the latch follows the
/// activity/inactivity timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OperatingMode {
    /// Activity-driven: lock on inactivity, unlock when movement resumes.
    #[default]
    Automatic,
    /// Manual override: hold the latch at the lock-target angle.
    ForcedLocked,
    /// Manual override: hold the latch at the rest angle.
    ForcedUnlocked,
}

impl OperatingMode {
    /// Returns the mode label used on the status line.
    ///
    /// # Examples
    ///
    /// ```
    /// use servo_latch::OperatingMode;
    ///
    /// assert_eq!(OperatingMode::Automatic.as_str(), "automatic");
    /// assert_eq!(OperatingMode::ForcedLocked.as_str(), "locked");
    /// assert_eq!(OperatingMode::ForcedUnlocked.as_str(), "unlocked");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Automatic => "automatic",
            OperatingMode::ForcedLocked => "locked",
            OperatingMode::ForcedUnlocked => "unlocked",
        }
    }

    /// Decode a single command byte into a mode selection.
    ///
    /// Accepts `a`/`b`/`c` in either case. Every other byte returns `None`,
    /// which callers treat as "leave the mode unchanged" - an unrecognized
    /// byte is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use servo_latch::OperatingMode;
    ///
    /// assert_eq!(OperatingMode::from_command(b'a'), Some(OperatingMode::Automatic));
    /// assert_eq!(OperatingMode::from_command(b'B'), Some(OperatingMode::ForcedLocked));
    /// assert_eq!(OperatingMode::from_command(b'c'), Some(OperatingMode::ForcedUnlocked));
    /// assert_eq!(OperatingMode::from_command(b'\n'), None);
    /// assert_eq!(OperatingMode::from_command(0xFF), None);
    /// ```
    pub fn from_command(byte: u8) -> Option<Self> {
        match byte.to_ascii_lowercase() {
            b'a' => Some(OperatingMode::Automatic),
            b'b' => Some(OperatingMode::ForcedLocked),
            b'c' => Some(OperatingMode::ForcedUnlocked),
            _ => None,
        }
    }
}
