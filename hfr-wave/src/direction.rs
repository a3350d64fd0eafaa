use serde::{Deserialize, Serialize};

/// Which bearing a polar chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Wave,
    Wind,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Wave, Direction::Wind];

    /// Chart title.
    pub fn title(&self) -> &'static str {
        match self {
            Direction::Wave => "Wave from Direction",
            Direction::Wind => "Wind from Direction",
        }
    }

    /// Source column in `hfrWaveData`.
    pub fn column(&self) -> &'static str {
        match self {
            Direction::Wave => "WAVB",
            Direction::Wind => "WNDB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn test_titles_and_columns() {
        assert_eq!(Direction::Wave.title(), "Wave from Direction");
        assert_eq!(Direction::Wind.title(), "Wind from Direction");
        assert_eq!(Direction::Wave.column(), "WAVB");
        assert_eq!(Direction::Wind.column(), "WNDB");
    }
}
