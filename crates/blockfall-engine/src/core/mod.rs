pub use self::{active_piece::*, board::*, piece::*};

pub(crate) mod active_piece;
pub(crate) mod board;
pub(crate) mod piece;
