//! Commands applied to the game state.

use crate::{Column, Marker, PlayNote, Tail};

/// Game actions that can be applied to the game state
///
/// This is the closed set of transitions the engine understands. Clock ticks
/// and note spawns come from the schedule driver; presses, holds and restarts
/// come from the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameAction {
    /// Advance every falling body by one fixed interval
    Tick { elapsed: u64 },
    /// Spawn a player marker
    AddMarker(Marker),
    /// Spawn an invisible background note
    AddBackgroundNote(PlayNote),
    /// Spawn the sustain tail of a long marker
    AddTail(Tail),
    /// Key press in a column; `random` is a unit value from the column's sequence
    PressNote { column: Column, random: f64 },
    /// Key release in a column, ending a sustain
    HoldTail { column: Column },
    /// Discard everything in flight and reset the score
    Restart,
    /// Mark the song as finished
    EndGame,
}

impl GameAction {
    /// Short camelCase name, used in logs
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_rhythm_types::{Column, GameAction};
    ///
    /// assert_eq!(GameAction::Tick { elapsed: 3 }.name(), "tick");
    /// assert_eq!(GameAction::HoldTail { column: Column::H }.name(), "holdTail");
    /// assert_eq!(GameAction::Restart.name(), "restart");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Tick { .. } => "tick",
            GameAction::AddMarker(_) => "addMarker",
            GameAction::AddBackgroundNote(_) => "addBackgroundNote",
            GameAction::AddTail(_) => "addTail",
            GameAction::PressNote { .. } => "pressNote",
            GameAction::HoldTail { .. } => "holdTail",
            GameAction::Restart => "restart",
            GameAction::EndGame => "endGame",
        }
    }

    /// Whether the action comes from the player rather than the clock or schedule
    pub fn is_player_input(&self) -> bool {
        matches!(
            self,
            GameAction::PressNote { .. } | GameAction::HoldTail { .. } | GameAction::Restart
        )
    }
}
