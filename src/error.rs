use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsError {
    /// A vector or momentum was divided by exactly zero.
    DivisionByZero,
    /// A particle or generation parameter failed opt-in validation.
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::DivisionByZero => write!(f, "division by zero"),
            PhysicsError::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
