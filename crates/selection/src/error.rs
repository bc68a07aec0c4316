//! Selection errors.

use fate_core::ParticipantId;

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors raised when a draw cannot be made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// Nothing to choose from
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Participants and weights are not aligned
    #[error("{participants} participants but {weights} weights")]
    LengthMismatch {
        /// Number of participants
        participants: usize,
        /// Number of weights
        weights: usize,
    },

    /// A weight is zero, negative, NaN or infinite
    #[error("Weight #{index} must be positive and finite, got {weight}")]
    NonPositiveWeight {
        /// Position of the offending weight
        index: usize,
        /// The offending weight
        weight: f64,
    },

    /// Floor weight is not a positive finite number
    #[error("Floor weight must be positive and finite, got {0}")]
    InvalidFloor(f64),

    /// Fewer full turns than the wheel always makes
    #[error("At least {required} full spins are required, got {min}")]
    TooFewFullSpins {
        /// Requested minimum
        min: u32,
        /// Lowest allowed minimum
        required: u32,
    },

    /// The same participant appears twice on one wheel
    #[error("Participant {0} is on the wheel more than once")]
    DuplicateParticipant(ParticipantId),

    /// Minimum full spins exceeds the maximum, or the range is too wide to draw from
    #[error("Invalid spin range: {min}..={max}")]
    InvalidSpinRange {
        /// Minimum full spins
        min: u32,
        /// Maximum full spins
        max: u32,
    },
}

impl SelectionError {
    /// Error for an empty participant list.
    pub fn no_participants() -> Self {
        Self::InvalidInput("no participants to select from".to_string())
    }
}
