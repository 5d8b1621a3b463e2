//! Top-level application state machine.
//!
//! Defines [`AppState`], a Bevy [`States`] enum that governs top-level game
//! flow: main menu, playing, and paused.  Gameplay systems should only run
//! when the state is [`AppState::Playing`].
//!
//! The state is defined here (in the `simulation` crate) rather than in `app`
//! so that all crates can gate systems on it without circular dependencies.

use bevy::prelude::*;

/// Top-level game state governing application flow.
///
/// Player-input driven systems are gated behind `in_state(AppState::Playing)`,
/// so the world does not react to interaction in `MainMenu` or `Paused`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// The main menu screen — no world loaded.
    #[default]
    MainMenu,
    /// Active gameplay — the world is interactive.
    Playing,
    /// Gameplay is paused — world is visible but frozen.
    Paused,
}
