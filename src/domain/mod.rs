pub mod board;
pub mod card;

pub use board::{Board, BoardConfig, Column, ColumnSpec, Placement};
pub use card::{Card, CardRef, ColumnId};
