#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, and ANSI presentation.
//!
//! # Role in Waypoint
//! `waypoint-runtime` calls a model's `view()` to render into a [`frame::Frame`].
//! The frame's [`buffer::Buffer`] is diffed against the previous one and the
//! [`presenter::Presenter`] emits only the changed cells.
//!
//! Colors carry alpha so the walkthrough backdrop can be blended over
//! whatever the screen drew underneath.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
