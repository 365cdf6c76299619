//! Core types and algorithms for running a Swiss-system tournament.
//!
//! This crate is deliberately free of database and CLI dependencies. It owns
//! the roster and match-log types, the [`store::MatchStore`] abstraction, and
//! the two pure computations everything else is built on: ranking players
//! ([`standings`]) and pairing them for the next round ([`pairing`]).

pub mod config;
pub mod error;
pub mod pairing;
pub mod player;
pub mod round;
pub mod standings;
pub mod store;

pub use error::{Error, Result};
