//! Room lookup by join code.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::errors::{SessionError, SessionResult};
use crate::session::config::SessionConfig;
use crate::session::player::PlayerNumber;
use crate::session::room::Room;

pub const CODE_LENGTH: usize = 5;

#[derive(Debug)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
    quick_match: Option<String>,
    rng: StdRng,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic codes and colors, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rooms: HashMap::new(),
            quick_match: None,
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Open a room with the caller seated as player one. Returns its code.
    pub fn create_room(&mut self, config: SessionConfig) -> String {
        let code = self.unused_code();
        let room = Room::new(code.clone(), config, &mut self.rng);
        self.rooms.insert(code.clone(), room);
        code
    }

    pub fn join_room(&mut self, code: &str, now: DateTime<Utc>) -> SessionResult<PlayerNumber> {
        let number = self.get_mut(code)?.join(now)?;
        if self.quick_match.as_deref() == Some(code) {
            self.quick_match = None;
        }
        Ok(number)
    }

    /// Join the pending quick-match room, or open one and wait in it.
    pub fn quick_match(&mut self, now: DateTime<Utc>) -> SessionResult<(String, PlayerNumber)> {
        if let Some(code) = self.quick_match.take() {
            if self.rooms.get(&code).is_some_and(Room::is_joinable) {
                let number = self.join_room(&code, now)?;
                return Ok((code, number));
            }
        }

        let code = self.create_room(SessionConfig::quick_match());
        self.quick_match = Some(code.clone());
        Ok((code, PlayerNumber::One))
    }

    pub fn get(&self, code: &str) -> SessionResult<&Room> {
        self.rooms.get(code).ok_or_else(|| SessionError::UnknownRoom {
            code: code.to_owned(),
        })
    }

    pub fn get_mut(&mut self, code: &str) -> SessionResult<&mut Room> {
        self.rooms
            .get_mut(code)
            .ok_or_else(|| SessionError::UnknownRoom {
                code: code.to_owned(),
            })
    }

    /// Disconnect a player, dropping the room once both have left.
    pub fn leave(&mut self, code: &str, number: PlayerNumber, now: DateTime<Utc>) -> SessionResult<()> {
        let empty = self.get_mut(code)?.disconnect(number, now);
        if empty {
            self.rooms.remove(code);
            if self.quick_match.as_deref() == Some(code) {
                self.quick_match = None;
            }
            info!(%code, "room closed");
        }
        Ok(())
    }

    /// Check every running game for flag fall.
    pub fn sweep_timeouts(&mut self, now: DateTime<Utc>) -> Vec<String> {
        self.rooms
            .iter_mut()
            .filter_map(|(code, room)| room.check_timeout(now).map(|_| code.clone()))
            .collect()
    }

    fn unused_code(&mut self) -> String {
        loop {
            let code: String = (0..CODE_LENGTH)
                .map(|_| self.rng.random_range(b'A'..=b'Z') as char)
                .collect();
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}
