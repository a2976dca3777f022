use std::fmt;

use serde::{Serialize, Serializer};

/// Sport category of a team.
///
/// Description files use Spanish labels ("Futbol", "Volleyball"); English
/// spellings are accepted too. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sport {
    Football,
    Volleyball,
    Other(String),
}

impl Sport {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "futbol" | "fútbol" | "football" | "soccer" => Sport::Football,
            "volleyball" | "voleibol" | "voleyball" | "volley" => Sport::Volleyball,
            _ => Sport::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Sport::Football => "Football",
            Sport::Volleyball => "Volleyball",
            Sport::Other(label) => label,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Sport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_and_english_labels() {
        assert_eq!(Sport::from_label("Futbol"), Sport::Football);
        assert_eq!(Sport::from_label("Fútbol"), Sport::Football);
        assert_eq!(Sport::from_label("football"), Sport::Football);
        assert_eq!(Sport::from_label("Voleibol"), Sport::Volleyball);
        assert_eq!(Sport::from_label("Volleyball"), Sport::Volleyball);
    }

    #[test]
    fn test_unknown_label_kept() {
        let sport = Sport::from_label(" Handball ");
        assert_eq!(sport, Sport::Other("Handball".to_string()));
        assert_eq!(sport.to_string(), "Handball");
    }
}
