//! Zentrix economy core: a deterministic, embeddable game engine for
//! a chat-platform currency game.
//!
//! The crate is front-end agnostic. A delivery layer (a chat bot, the
//! bundled runner, a test) constructs an [`engine::EconEngine`] over a
//! SQLite [`store::EconStore`], feeds it [`command::Command`]s with an
//! explicit `now`, and renders the structured [`command::Outcome`]s it
//! gets back. Background world cycles (profit, market shift, surge)
//! are plain engine methods driven by the [`scheduler`].

pub mod account;
pub mod actions;
pub mod buffs;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod progression;
pub mod quests;
pub mod rng;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod world;
