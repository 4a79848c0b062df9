//! Players seated in a room.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerNumber::One => 0,
            PlayerNumber::Two => 1,
        }
    }
}

/// The one notice a player is currently shown. Setting a new status replaces
/// the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    Idle,
    RematchSent,
    RematchReceived,
    TakebackSent,
    TakebackReceived,
    DrawSent,
    DrawReceived,
    RequestDeclined,
    OpponentDisconnected,
    OpponentResigned,
    Won,
    Lost,
    Drawn,
    OpponentTimedOut,
    TimedOut,
}

impl PlayerStatus {
    /// Statuses that describe how a finished game ended for this player.
    pub const fn is_game_over(self) -> bool {
        matches!(
            self,
            PlayerStatus::OpponentDisconnected
                | PlayerStatus::OpponentResigned
                | PlayerStatus::Won
                | PlayerStatus::Lost
                | PlayerStatus::Drawn
                | PlayerStatus::OpponentTimedOut
                | PlayerStatus::TimedOut
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub number: PlayerNumber,
    pub color: Color,
    /// Games won, plus one for every drawn game.
    pub score: u32,
    pub status: PlayerStatus,
    pub opponent_joined: bool,
}

impl Player {
    pub fn new(number: PlayerNumber, color: Color) -> Self {
        Self {
            number,
            color,
            score: 0,
            status: PlayerStatus::Idle,
            opponent_joined: false,
        }
    }

    #[inline]
    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }
}
