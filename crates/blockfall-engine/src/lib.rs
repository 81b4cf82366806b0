pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board or its walls")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display(
        "board width {_0} is out of range ({}..={})",
        SessionConfig::MIN_DIMENSION,
        SessionConfig::MAX_DIMENSION
    )]
    WidthOutOfRange(#[error(not(source))] u16),
    #[display(
        "board height {_0} is out of range ({}..={})",
        SessionConfig::MIN_DIMENSION,
        SessionConfig::MAX_DIMENSION
    )]
    HeightOutOfRange(#[error(not(source))] u16),
}
