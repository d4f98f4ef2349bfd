//! Core engine — the rotate → pause → update loop.

pub mod pacer;
pub mod picker;
pub mod runner;
