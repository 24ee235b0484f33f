//! Error types for BVH loading and document access.

/// Out-of-range access into a document container.
///
/// Returned by every indexed accessor; panicking `Index` impls use the same message.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutOfRange {
    #[error("frame {index} is out of range (document has {count} frames)")]
    Frame { index: usize, count: usize },

    #[error("channel {index} is out of range (joint has {count} channels)")]
    Channel { index: usize, count: usize },

    #[error("column {index} is out of range (frame has {count} values)")]
    Column { index: usize, count: usize },

    #[error("joint {index} is out of range (document has {count} joints)")]
    Joint { index: usize, count: usize },
}

/// Error produced while constructing a [`Document`](crate::Document).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BvhError {
    /// A token other than the one the grammar requires
    #[error("line {line}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Input ended in the middle of a construct
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    /// A numeric literal that does not parse
    #[error("line {line}: invalid number `{text}`")]
    InvalidNumber { line: usize, text: String },

    /// A channel keyword outside the six supported ones
    #[error("line {line}: unknown channel `{name}`")]
    UnknownChannel { line: usize, name: String },

    /// `CHANNELS n` followed by a different number of names
    #[error("line {line}: joint `{joint}` declares {declared} channels but lists {found}")]
    ChannelCountMismatch {
        line: usize,
        joint: String,
        declared: usize,
        found: usize,
    },

    /// Joint nesting deeper than the configured limit
    #[error("line {line}: joint nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { line: usize, max_depth: usize },

    /// A joint carrying an `End Site` as well as child joints
    #[error("line {line}: joint `{joint}` has both an end site and child joints")]
    EndSiteWithChildren { line: usize, joint: String },

    /// A second `ROOT` in the hierarchy
    #[error("line {line}: only one ROOT joint is supported")]
    MultipleRoots { line: usize },

    /// `Frames:` count above the configured limit
    #[error("line {line}: {frames} frames exceed the limit of {max_frames}")]
    FrameLimitExceeded {
        line: usize,
        frames: usize,
        max_frames: usize,
    },

    /// Negative, NaN or infinite frame time
    #[error("invalid frame time {seconds}")]
    InvalidFrameTime { seconds: f64 },

    /// Motion buffer length disagrees with `frames * channels`
    #[error(
        "motion section holds {found} values, expected {expected} ({frames} frames x {channels} channels)"
    )]
    MotionLengthMismatch {
        expected: usize,
        found: usize,
        frames: usize,
        channels: usize,
    },

    /// `frames * channels` does not fit in memory
    #[error("{frames} frames x {channels} channels overflows the motion buffer")]
    MotionTooLarge { frames: usize, channels: usize },

    /// Joint name that is empty or holds whitespace or braces
    #[error("joint name `{name}` must be one word without whitespace or braces")]
    InvalidJointName { name: String },

    /// Joint arena that does not describe a valid pre-order tree
    #[error("malformed joint hierarchy: {reason}")]
    MalformedHierarchy { reason: String },

    /// Out-of-range access
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    /// IO error while reading a stream
    #[error("IO error: {reason}")]
    Io { reason: String },
}

impl BvhError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. }
            | Self::UnexpectedEof { .. }
            | Self::InvalidNumber { .. }
            | Self::UnknownChannel { .. }
            | Self::ChannelCountMismatch { .. }
            | Self::DepthLimitExceeded { .. }
            | Self::EndSiteWithChildren { .. }
            | Self::MultipleRoots { .. }
            | Self::FrameLimitExceeded { .. } => "parse",
            Self::InvalidFrameTime { .. }
            | Self::MotionLengthMismatch { .. }
            | Self::MotionTooLarge { .. }
            | Self::InvalidJointName { .. }
            | Self::MalformedHierarchy { .. } => "validation",
            Self::OutOfRange(_) => "access",
            Self::Io { .. } => "io",
        }
    }

    /// Line number the error points at, when it comes from the parser.
    pub fn line(&self) -> Option<usize> {
        match *self {
            Self::UnexpectedToken { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnknownChannel { line, .. }
            | Self::ChannelCountMismatch { line, .. }
            | Self::DepthLimitExceeded { line, .. }
            | Self::EndSiteWithChildren { line, .. }
            | Self::MultipleRoots { line }
            | Self::FrameLimitExceeded { line, .. } => Some(line),
            _ => None,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedHierarchy {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for BvhError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BvhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let parse = BvhError::UnknownChannel {
            line: 3,
            name: "Wrotation".to_string(),
        };
        assert_eq!(parse.category(), "parse");
        assert_eq!(parse.line(), Some(3));

        let access: BvhError = OutOfRange::Frame { index: 4, count: 2 }.into();
        assert_eq!(access.category(), "access");
        assert_eq!(access.line(), None);

        let io: BvhError = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof").into();
        assert_eq!(io.category(), "io");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = OutOfRange::Column { index: 6, count: 6 };
        assert_eq!(
            err.to_string(),
            "column 6 is out of range (frame has 6 values)"
        );
        let wrapped = BvhError::from(err);
        assert_eq!(wrapped.to_string(), err.to_string());
    }
}
