//! Core types for stone-placing board games.
//!
//! This crate provides the fundamental types used across the rule engine:
//! - [`Color`] for the two players
//! - [`Point`] and [`Direction`] for board coordinates
//! - [`Move`] for move representation
//! - Board notation parsing and serialization

mod color;
mod mov;
mod notation;
mod point;

pub use color::Color;
pub use mov::Move;
pub use notation::{BoardNotation, NotationError};
pub use point::{Direction, ParsePointError, Point};
