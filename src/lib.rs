//! Ascend - combat simulation engine for an incremental RPG.
//!
//! Two modes share one character: the staged arena, where player and
//! guardian trade blows on independent timers, and survival, a frame-stepped
//! arena shooter. Hosts drive both through [`session::GameSession`] and
//! render the events it returns.

pub mod arena;
pub mod build_info;
pub mod character;
pub mod core;
pub mod identity;
pub mod items;
pub mod rewards;
pub mod session;
pub mod simulator;
pub mod survival;
