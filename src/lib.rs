//! # Taskboard Core
//!
//! Board model, persistence and interaction logic for a kanban-style task board.
//!
//! The board is an owned structure of fixed columns holding ordered cards. All
//! user flows (create, edit, delete, drag-and-drop, search) go through
//! [`TaskBoard`], which mutates the model, saves the snapshot to a
//! [`Storage`] slot and exposes a [`BoardView`] for whatever renders it.

pub mod controller;
pub mod domain;
pub mod drag;
pub mod error;
pub mod modal;
pub mod persistence;
pub mod search;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use controller::TaskBoard;
pub use domain::{
    board::{Board, BoardConfig, Column, ColumnSpec, Placement},
    card::{Card, CardRef, ColumnId},
};
pub use error::{BoardError, Result};
pub use persistence::{LoadOutcome, Persistence, Snapshot};
pub use storage::Storage;
pub use view::BoardView;
