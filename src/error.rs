//! Error types for widget construction.

/// All errors produced while building a countdown widget.
///
/// Validation failures are immediate and final: no widget is produced and
/// there is no partial result to recover. Everything that is not covered by
/// a variant here (free-form CSS color strings, arbitrary class names) is
/// accepted permissively, matching the markup/styling domain the widget
/// targets.
#[derive(thiserror::Error, Debug)]
pub enum CountdownError {
    /// The normalized duration does not fit the two-digit minute display.
    ///
    /// Minutes and seconds are the *normalized* pair, i.e. after folding
    /// overflowing seconds into minutes.
    #[error("countdown duration must stay under 100 minutes, got {minutes}m {seconds}s")]
    DurationOutOfRange {
        /// Normalized minute count (>= 100 when this error is raised).
        minutes: u64,
        /// Normalized second count in `0..60`.
        seconds: u64,
    },

    /// A caller-supplied identifier violates the identifier rules.
    #[error("invalid countdown identifier `{id}`: {reason}")]
    InvalidIdentifier {
        /// The identifier as supplied by the caller.
        id: String,
        /// Human-readable description of the violation, naming the
        /// offending characters where applicable.
        reason: String,
    },

    /// Writing the per-widget asset directory failed.
    #[error("failed to write widget assets: {0}")]
    Io(#[from] std::io::Error),
}
