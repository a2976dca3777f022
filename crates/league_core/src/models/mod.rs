pub mod association;
pub mod player;
pub mod roster;
pub mod sport;
pub mod team;
pub mod venue;

pub use association::Association;
pub use player::Player;
pub use roster::{Identified, Roster};
pub use sport::Sport;
pub use team::Team;
pub use venue::{AveragePolicy, Venue};
