//! Application state machine for taskdeck.
//!
//! Elm-style reducer: [`update::update`] takes the current [`state::AppState`]
//! and an [`events::AppEvent`], mutates state, and returns
//! [`effects::AppEffect`]s for the runtime to execute. The reducer performs
//! no I/O; [`runtime::Runtime`] executes effects against `taskdeck-core` and
//! feeds result events back.

pub mod effects;
pub mod events;
pub mod form;
pub mod guard;
pub mod runtime;
pub mod state;
pub mod update;
