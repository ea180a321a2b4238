use thiserror::Error;

use crate::game::body::{MAX_GASES, MAX_PLANETS};
use crate::game::budget::Stage;
use crate::game::config::{
    MAX_RADIUS, MAX_SPECIES, MAX_STARS, MIN_RADIUS, MIN_SPECIES, MIN_STARS,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "galaxy must have a radius between {min} and {max} parsecs, got {radius}",
        min = MIN_RADIUS,
        max = MAX_RADIUS
    )]
    RadiusOutOfRange { radius: i32 },

    #[error(
        "galaxy must have between {min} and {max} star systems, got {stars}",
        min = MIN_STARS,
        max = MAX_STARS
    )]
    StarsOutOfRange { stars: i32 },

    #[error(
        "galaxy must have between {min} and {max} species, got {species}",
        min = MIN_SPECIES,
        max = MAX_SPECIES
    )]
    SpeciesOutOfRange { species: i32 },

    #[error("galactic radius is too small for {stars} stars")]
    RadiusTooSmall { stars: i32 },

    #[error("galactic radius is too large for {stars} stars")]
    RadiusTooLarge { stars: i32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("home system templates need 3 to 9 planets, got {planets}")]
    TemplatePlanets { planets: usize },

    #[error(
        "a star system has between 1 and {max} planets, got {planets}",
        max = MAX_PLANETS
    )]
    PlanetCount { planets: usize },

    #[error(
        "an atmosphere holds at most {max} gases, got {gases}",
        max = MAX_GASES
    )]
    TooManyGases { gases: usize },

    #[error("generation stalled in {stage} after {attempts} attempts")]
    Stalled { stage: Stage, attempts: usize },

    #[error("generation cancelled during {stage}")]
    Cancelled { stage: Stage },
}

impl GenerationError {
    /// Stalls and cancellations can be retried with another seed or looser
    /// parameters; bad parameters cannot.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GenerationError::Stalled { .. } | GenerationError::Cancelled { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
