//! Goban-Rules: the rules engine for a Go-like stone-placement game.
//!
//! The engine decides whether a placement is legal, removes opponent groups
//! left without liberties, refuses suicide, and keeps per-player capture
//! tallies and the terminal state. Rendering and input handling belong to
//! the caller.
//!
//! ## Modules
//!
//! - [`constants`] - Board-size defaults, glyphs, and driver parameters
//! - [`board`] - Stones, intersections, and the NxN grid
//! - [`group`] - Connected groups and their liberties
//! - [`resolver`] - Placement, capture, and suicide resolution
//! - [`session`] - Turn order, tallies, pass/resign/reset, game end
//! - [`protocol`] - Line-oriented text front end
//! - [`playout`] - Seeded random self-play
//!
//! ## Example
//!
//! ```
//! use goban_rules::board::Stone;
//! use goban_rules::session::Session;
//!
//! let mut session = Session::new(19);
//! let view = session.place(3, 3);
//! assert!(view.rejection.is_none());
//! assert_eq!(view.to_move, Stone::White);
//! ```

pub mod board;
pub mod constants;
pub mod group;
pub mod playout;
pub mod protocol;
pub mod resolver;
pub mod session;

pub use board::{Board, Intersection, Stone};
pub use group::{Group, find_group};
pub use resolver::{Rejection, Resolution, resolve};
pub use session::{Outcome, Session, SessionView, Status};
