use std::ops::RangeInclusive;

use crate::game::body::{Gas, Planet, StarId};
use crate::game::budget::{Attempts, CancelFlag, Stage, TEMPLATE_CAP};
use crate::game::error::{GenerationError, Result};
use crate::game::planet::PlanetGenerator;
use crate::game::prng::Prng;

/// Scores strictly between these bounds are viable. The values are
/// empirically tuned; 54, 55 and 56 pass.
pub const VIABLE_ABOVE: i32 = 53;
pub const VIABLE_BELOW: i32 = 57;

const SCORE_NUMERATOR: i32 = 20_000;
const LSN_OFFSET: i32 = 3;
const MINING_OFFSET: i32 = 50;

pub const TEMPLATE_PLANETS: RangeInclusive<usize> = 3..=9;

pub fn is_viable(score: i32) -> bool {
    VIABLE_ABOVE < score && score < VIABLE_BELOW
}

/// Approximate life support needed to live on `planet` for a species native
/// to `home`. Ignores species-specific poison gases.
pub fn life_support_needed(planet: &Planet, home: &Planet, required: &[Gas]) -> i32 {
    let delta_temperature = (planet.temperature_class - home.temperature_class).abs();
    let delta_pressure = (planet.pressure_class - home.pressure_class).abs();
    let foreign_gases = planet
        .atmosphere
        .gases()
        .filter(|gas| !required.contains(gas))
        .count() as i32;
    2 * delta_temperature + 2 * delta_pressure + 2 * foreign_gases
}

/// Sums `20000 / ((3 + LSN) * (50 + mining difficulty))` over every planet in
/// the system, each term rounded down.
pub fn viability_score(planets: &[Planet], home: &Planet) -> i32 {
    let mut required: Vec<Gas> = home.atmosphere.gases().collect();
    required.push(Gas::O2);

    planets
        .iter()
        .map(|planet| {
            let lsn = life_support_needed(planet, home, &required);
            SCORE_NUMERATOR / ((LSN_OFFSET + lsn) * (MINING_OFFSET + planet.mining_difficulty))
        })
        .sum()
}

/// A system under evaluation. Only the star's home-system flag outlives it.
#[derive(Clone, Copy, Debug)]
pub struct HomeSystemCandidate<'a> {
    pub star: StarId,
    pub home: &'a Planet,
    pub score: i32,
}

impl HomeSystemCandidate<'_> {
    pub fn is_viable(&self) -> bool {
        is_viable(self.score)
    }
}

pub fn evaluate(star: StarId, planets: &[Planet]) -> Option<HomeSystemCandidate<'_>> {
    let home = planets.iter().find(|p| p.is_earth_like())?;
    Some(HomeSystemCandidate {
        star,
        home,
        score: viability_score(planets, home),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeSystemTemplate {
    pub planets: Vec<Planet>,
    pub score: i32,
    /// Systems rolled, counting the one that passed.
    pub attempts: usize,
}

pub fn home_system_template(
    prng: &mut Prng,
    cancel: &CancelFlag,
    planet_count: usize,
    easier_mining: bool,
) -> Result<HomeSystemTemplate> {
    if !TEMPLATE_PLANETS.contains(&planet_count) {
        return Err(GenerationError::TemplatePlanets {
            planets: planet_count,
        });
    }

    let mut attempts = Attempts::new(Stage::HomeTemplate, TEMPLATE_CAP, cancel);
    let mut generator = PlanetGenerator::new(prng, cancel, easier_mining);
    loop {
        attempts.tick()?;
        let planets = generator.generate(StarId(0), 0, planet_count, true)?;
        let score = match evaluate(StarId(0), &planets) {
            Some(candidate) if candidate.is_viable() => candidate.score,
            _ => continue,
        };
        log::debug!(
            "home system template with {} planets after {} systems, score {}",
            planet_count,
            attempts.used(),
            score
        );
        return Ok(HomeSystemTemplate {
            planets,
            score,
            attempts: attempts.used(),
        });
    }
}
