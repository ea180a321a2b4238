use serde::{Deserialize, Serialize};

use crate::game::error::ConfigError;
use crate::game::prng::HISTORICAL_SEED;

pub const MIN_RADIUS: i32 = 6;
pub const MAX_RADIUS: i32 = 50;
pub const MIN_STARS: i32 = 12;
pub const MAX_STARS: i32 = 1_000;
pub const MIN_SPECIES: i32 = 1;
pub const MAX_SPECIES: i32 = 100;

/// Bounds on cubic parsecs per star. Outside this band the cluster is either
/// too crowded to place stars or too sparse to play in.
pub const MIN_CHANCE_OF_STAR: i32 = 50;
pub const MAX_CHANCE_OF_STAR: i32 = 3_200;

pub const STANDARD_SPECIES: i32 = 15;
pub const STANDARD_STAR_SYSTEMS: i32 = 90;
pub const STANDARD_RADIUS: i32 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub radius: i32,
    pub stars: i32,
    pub species: i32,
    /// 0 selects the historical seed.
    pub seed: u64,
    pub easier_mining: bool,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            radius: MIN_RADIUS,
            stars: MIN_STARS,
            species: MIN_SPECIES,
            seed: 0,
            easier_mining: false,
        }
    }
}

impl GalaxyConfig {
    pub fn new(radius: i32, stars: i32, species: i32, seed: u64) -> Self {
        Self {
            radius,
            stars,
            species,
            seed,
            easier_mining: false,
        }
    }

    pub fn effective_seed(&self) -> u64 {
        if self.seed == 0 {
            HISTORICAL_SEED
        } else {
            self.seed
        }
    }

    /// Integer approximation of the sphere volume, `4·π·r³/3` with π ≈ 3.14.
    pub fn volume(&self) -> i32 {
        (4 * 314 * self.radius * self.radius * self.radius) / 300
    }

    pub fn chance_of_star(&self) -> i32 {
        self.volume() / self.stars
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&self.radius) {
            return Err(ConfigError::RadiusOutOfRange {
                radius: self.radius,
            });
        }
        if !(MIN_STARS..=MAX_STARS).contains(&self.stars) {
            return Err(ConfigError::StarsOutOfRange { stars: self.stars });
        }
        if !(MIN_SPECIES..=MAX_SPECIES).contains(&self.species) {
            return Err(ConfigError::SpeciesOutOfRange {
                species: self.species,
            });
        }

        let chance = self.chance_of_star();
        if chance < MIN_CHANCE_OF_STAR {
            return Err(ConfigError::RadiusTooSmall { stars: self.stars });
        }
        if chance > MAX_CHANCE_OF_STAR {
            return Err(ConfigError::RadiusTooLarge { stars: self.stars });
        }
        Ok(())
    }

    /// Derives star count and radius from the number of species, scaling the
    /// standard game. `less_crowded` adds half again as many stars.
    pub fn suggested(species: i32, less_crowded: bool) -> Result<Self, ConfigError> {
        if !(MIN_SPECIES..=MAX_SPECIES).contains(&species) {
            return Err(ConfigError::SpeciesOutOfRange { species });
        }

        let mut stars = species * STANDARD_STAR_SYSTEMS / STANDARD_SPECIES;
        if less_crowded {
            stars = 3 * stars / 2;
        }
        let stars = stars.max(MIN_STARS);
        if stars > MAX_STARS {
            return Err(ConfigError::StarsOutOfRange { stars });
        }

        let standard_cube = STANDARD_RADIUS * STANDARD_RADIUS * STANDARD_RADIUS;
        let min_volume = stars * standard_cube / STANDARD_STAR_SYSTEMS;
        let mut radius = MIN_RADIUS;
        while radius * radius * radius < min_volume {
            radius += 1;
        }
        if radius > MAX_RADIUS {
            return Err(ConfigError::RadiusOutOfRange { radius });
        }

        let config = Self::new(radius, stars, species, 0);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GalaxyConfig::default();
        assert_eq!(config.volume(), 904);
        assert_eq!(config.chance_of_star(), 75);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.effective_seed(), HISTORICAL_SEED);
    }

    #[test]
    fn range_checks_run_in_order() {
        let bad = GalaxyConfig::new(5, 5, 0, 1);
        assert_eq!(
            bad.validate(),
            Err(ConfigError::RadiusOutOfRange { radius: 5 })
        );
        assert_eq!(
            GalaxyConfig::new(51, 12, 1, 1).validate(),
            Err(ConfigError::RadiusOutOfRange { radius: 51 })
        );
        assert_eq!(
            GalaxyConfig::new(10, 1_001, 1, 1).validate(),
            Err(ConfigError::StarsOutOfRange { stars: 1_001 })
        );
        assert_eq!(
            GalaxyConfig::new(10, 12, 101, 1).validate(),
            Err(ConfigError::SpeciesOutOfRange { species: 101 })
        );
    }

    #[test]
    fn density_band_is_enforced() {
        // 904 / 20 = 45
        assert_eq!(
            GalaxyConfig::new(6, 20, 1, 1).validate(),
            Err(ConfigError::RadiusTooSmall { stars: 20 })
        );
        // 43611 / 12
        assert_eq!(
            GalaxyConfig::new(50, 12, 1, 1).validate(),
            Err(ConfigError::RadiusTooLarge { stars: 12 })
        );
        // 904 / 18 = 50 sits on the edge of the band
        assert_eq!(GalaxyConfig::new(6, 18, 1, 1).validate(), Ok(()));
    }

    #[test]
    fn error_messages_name_the_bounds() {
        let err = GalaxyConfig::new(3, 12, 1, 1).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "galaxy must have a radius between 6 and 50 parsecs, got 3"
        );
    }

    #[test]
    fn suggested_sizes_scale_the_standard_game() {
        let standard = GalaxyConfig::suggested(STANDARD_SPECIES, false).unwrap();
        assert_eq!((standard.stars, standard.radius), (90, 20));

        let roomy = GalaxyConfig::suggested(15, true).unwrap();
        assert_eq!((roomy.stars, roomy.radius), (135, 23));

        let small = GalaxyConfig::suggested(1, false).unwrap();
        assert_eq!((small.stars, small.radius), (12, 11));

        let large = GalaxyConfig::suggested(100, true).unwrap();
        assert_eq!((large.stars, large.radius), (900, 44));

        assert!(GalaxyConfig::suggested(0, false).is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: GalaxyConfig = serde_json::from_str(r#"{"radius": 20, "stars": 90}"#).unwrap();
        assert_eq!(config.radius, 20);
        assert_eq!(config.stars, 90);
        assert_eq!(config.species, MIN_SPECIES);
        assert!(!config.easier_mining);
    }
}
