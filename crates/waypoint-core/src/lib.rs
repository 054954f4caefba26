#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and the terminal session guard.
//!
//! # Role in Waypoint
//! `waypoint-core` is the input layer. It owns terminal setup/teardown and the
//! normalized event types that the runtime feeds into application models.
//! The render kernel (`waypoint-render`) only depends on the geometry types
//! defined here.

pub mod event;
pub mod geometry;
#[cfg(feature = "crossterm")]
pub mod terminal_session;
