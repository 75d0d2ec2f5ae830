/// Tower configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Smallest life count drawn for a roster entering the tower.
    pub min_lives: u32,
    /// Largest life count drawn for a roster entering the tower (inclusive).
    pub max_lives: u32,
    /// Rounds after which a contest is abandoned as a draw.
    /// Guards against stat formulas that never let a monster faint.
    pub max_rounds: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of monsters on a roster.
    pub const TEAM_LIMIT: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MIN_LIVES: u32 = 2;
    pub const DEFAULT_MAX_LIVES: u32 = 10;
    pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            min_lives: Self::DEFAULT_MIN_LIVES,
            max_lives: Self::DEFAULT_MAX_LIVES,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_lives(min_lives: u32, max_lives: u32) -> Self {
        Self {
            min_lives,
            max_lives,
            ..Self::new()
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
