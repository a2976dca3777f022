use std::cmp::Reverse;

use super::player::Player;
use super::roster::Roster;
use super::team::Team;
use super::venue::{AveragePolicy, Venue};
use crate::ranking::{merge_sort_by_key, sort_by_key_in, Metric, SortOrder};

/// Root of the tree: every venue, and through them every team and player.
#[derive(Debug, Clone, Default)]
pub struct Association {
    venues: Roster<Venue>,
}

impl Association {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_venue(&mut self, venue: Venue) -> Option<Venue> {
        self.venues.insert(venue)
    }

    pub fn venues(&self) -> &[Venue] {
        self.venues.as_slice()
    }

    pub fn venue(&self, id: u32) -> Option<&Venue> {
        self.venues.get(id)
    }

    /// Every team paired with its venue, venue by venue in insertion order
    pub fn teams(&self) -> impl Iterator<Item = (&Venue, &Team)> + '_ {
        self.venues
            .iter()
            .flat_map(|venue| venue.teams().iter().map(move |team| (venue, team)))
    }

    /// Every player, in venue then team then member insertion order
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.teams().flat_map(|(_, team)| team.players().iter())
    }

    pub fn player_count(&self) -> usize {
        self.venues.iter().map(Venue::player_count).sum()
    }

    /// All players by performance, lowest first; ties keep traversal order
    pub fn player_ranking(&self) -> Vec<&Player> {
        let players: Vec<&Player> = self.players().collect();
        merge_sort_by_key(&players, |p| p.performance)
    }

    /// Venues by average performance, busier venues first on ties
    pub fn ranked_venues(&self, policy: AveragePolicy, order: SortOrder) -> Vec<&Venue> {
        let venues: Vec<&Venue> = self.venues.iter().collect();
        sort_by_key_in(&venues, order, |v| {
            (Metric(v.average_performance(policy)), Reverse(v.player_count()))
        })
    }
}
