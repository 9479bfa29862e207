//! Serial control channel trait for command input and status output.
//!
//! The latch controller talks to the outside world over a single
//! serial-like byte stream: single-character mode commands come in, and
//! one semicolon-delimited status line per tick goes out. There is no
//! framing and no acknowledgment protocol.

/// Bidirectional serial-like control channel.
///
/// # Implementation Notes
///
/// - `try_read()` must not block; return `None` when no byte is pending
/// - At most one command byte is consumed per tick, so implementations
///   may buffer freely
/// - A failing or absent channel is not fatal to the control loop; the
///   caller drops status lines and keeps running on automatic behavior
pub trait ControlPort {
    /// Error type for write operations.
    type Error;

    /// Non-blocking read of at most one pending byte.
    fn try_read(&mut self) -> Option<u8>;

    /// Write one status line (newline handling is up to the implementation).
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullPort;

    impl ControlPort for NullPort {
        type Error = ();

        fn try_read(&mut self) -> Option<u8> {
            None
        }

        fn write_line(&mut self, _line: &str) -> Result<(), ()> {
            Err(())
        }
    }

    #[test]
    fn absent_channel_reads_nothing() {
        let mut port = NullPort;
        assert_eq!(port.try_read(), None);
        // Writes may fail; callers are expected to tolerate it
        assert!(port.write_line("0;0;automatic").is_err());
    }
}
