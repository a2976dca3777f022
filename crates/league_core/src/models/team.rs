use std::cmp::Reverse;

use super::player::Player;
use super::roster::{Identified, Roster};
use super::sport::Sport;
use crate::ranking::{sort_by_key_in, SortOrder};

#[derive(Debug, Clone)]
pub struct Team {
    pub id: u32,
    pub sport: Sport,
    players: Roster<Player>,
}

impl Team {
    pub fn new(id: u32, sport: Sport) -> Self {
        Self {
            id,
            sport,
            players: Roster::new(),
        }
    }

    /// Add a player, replacing any member with the same identifier
    pub fn add_player(&mut self, player: Player) -> Option<Player> {
        self.players.insert(player)
    }

    pub fn players(&self) -> &[Player] {
        self.players.as_slice()
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Mean member performance, 0.0 for a team without players
    pub fn average_performance(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: i128 = self.players.iter().map(|p| i128::from(p.performance)).sum();
        total as f64 / self.players.len() as f64
    }

    /// Members ordered by performance, older players first on ties
    pub fn ranked_players(&self, order: SortOrder) -> Vec<&Player> {
        let members: Vec<&Player> = self.players.iter().collect();
        sort_by_key_in(&members, order, |p| (p.performance, Reverse(p.age)))
    }
}

impl Identified for Team {
    fn id(&self) -> u32 {
        self.id
    }
}
