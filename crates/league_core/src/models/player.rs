use serde::Serialize;

use super::roster::Identified;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub performance: i64,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, age: u32, performance: i64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            performance,
        }
    }
}

impl Identified for Player {
    fn id(&self) -> u32 {
        self.id
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), age: {}, performance: {}",
            self.name, self.id, self.age, self.performance
        )
    }
}
