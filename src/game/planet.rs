use std::ops::RangeInclusive;

use crate::game::body::{
    Atmosphere, Gas, GasShare, Planet, PlanetId, PlanetSpecial, StarId, GAS_GIANT_DIAMETER,
    MAX_GASES, MAX_PLANETS,
};
use crate::game::budget::{Attempts, CancelFlag, Stage, MINING_CAP, NUDGE_CAP};
use crate::game::error::{GenerationError, Result};
use crate::game::prng::Prng;

/// Starting (diameter, temperature class) for each template slot, taken from
/// our own solar system without Pluto. Slot 5 is an imagined planet where the
/// asteroid belt sits. Slot 0 is never selected.
const BASELINE: [(i32, i32); MAX_PLANETS + 1] = [
    (0, 0),
    (5, 29),
    (12, 27),
    (13, 11),
    (7, 9),
    (20, 8),
    (143, 6),
    (121, 5),
    (51, 5),
    (49, 3),
];

const MIN_DIAMETER: i32 = 3;
const DIAMETER_ROUNDS: i32 = 4;

/// Makes `density * diameter / 72` land on 100 for Earth.
pub const GRAVITY_DIVISOR: i32 = 72;

pub const GAS_GIANT_TEMPERATURE: RangeInclusive<i32> = 3..=7;
pub const TEMPERATURE: RangeInclusive<i32> = 1..=30;
/// Inner planets of systems with fewer than four planets are warmed to this.
const SMALL_SYSTEM_WARMTH: i32 = 12;
const EARTH_LIKE_MAX_TEMPERATURE: i32 = 11;

pub const GAS_GIANT_PRESSURE: RangeInclusive<i32> = 11..=29;
pub const ROCKY_PRESSURE: RangeInclusive<i32> = 0..=12;
const MIN_GRAVITY_FOR_ATMOSPHERE: i32 = 10;
const ATMOSPHERE_TEMPERATURE: RangeInclusive<i32> = 2..=27;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MiningBand {
    pub min: i32,
    pub max: i32,
    pub surprise: i32,
    /// Apply the ×11/5 multiplier after acceptance.
    pub hardened: bool,
}

pub const NORMAL_MINING: MiningBand = MiningBand {
    min: 40,
    max: 500,
    surprise: 30,
    hardened: true,
};

pub const EASIER_MINING: MiningBand = MiningBand {
    min: 30,
    max: 1_000,
    surprise: 20,
    hardened: false,
};

impl MiningBand {
    pub fn final_range(&self) -> RangeInclusive<i32> {
        if self.hardened {
            harden(self.min)..=harden(self.max)
        } else {
            self.min..=self.max
        }
    }
}

fn harden(value: i32) -> i32 {
    value * 11 / 5
}

pub fn gravity(density: i32, diameter: i32) -> i32 {
    density * diameter / GRAVITY_DIVISOR
}

// Smallest density for which `gravity(density, diameter)` gives back `gravity`.
fn density_for(gravity: i32, diameter: i32) -> i32 {
    (gravity * GRAVITY_DIVISOR + diameter - 1) / diameter
}

pub struct PlanetGenerator<'a> {
    prng: &'a mut Prng,
    cancel: &'a CancelFlag,
    mining: MiningBand,
}

impl<'a> PlanetGenerator<'a> {
    pub fn new(prng: &'a mut Prng, cancel: &'a CancelFlag, easier_mining: bool) -> Self {
        let mining = if easier_mining {
            EASIER_MINING
        } else {
            NORMAL_MINING
        };
        Self {
            prng,
            cancel,
            mining,
        }
    }

    fn d(&mut self, sides: i32) -> i32 {
        self.prng.roll(sides as u32) as i32
    }

    fn d3x3(&mut self) -> i32 {
        self.d(3) + self.d(3) + self.d(3)
    }

    fn jitter(&mut self, value: i32, rounds: i32) -> i32 {
        let die = (value / 4).max(2);
        let mut value = value;
        for _ in 0..rounds {
            let roll = self.d(die);
            if self.d(100) > 50 {
                value += roll;
            } else {
                value -= roll;
            }
        }
        value
    }

    fn raise_to(&mut self, value: i32, floor: i32, die: i32, stage: Stage) -> Result<i32> {
        let mut attempts = Attempts::new(stage, NUDGE_CAP, self.cancel);
        let mut value = value;
        while value < floor {
            attempts.tick()?;
            value += self.d(die);
        }
        Ok(value)
    }

    fn lower_to(&mut self, value: i32, ceiling: i32, die: i32, stage: Stage) -> Result<i32> {
        let mut attempts = Attempts::new(stage, NUDGE_CAP, self.cancel);
        let mut value = value;
        while value > ceiling {
            attempts.tick()?;
            value -= self.d(die);
        }
        Ok(value)
    }

    fn squeeze(
        &mut self,
        value: i32,
        range: RangeInclusive<i32>,
        die: i32,
        stage: Stage,
    ) -> Result<i32> {
        let value = self.raise_to(value, *range.start(), die, stage)?;
        self.lower_to(value, *range.end(), die, stage)
    }

    /// Generates `count` planets for `star`, numbering them from `first_id`.
    /// With `earth_like` set, the first planet cool enough is replaced by an
    /// Earth analog; at most one per system.
    pub fn generate(
        &mut self,
        star: StarId,
        first_id: u32,
        count: usize,
        earth_like: bool,
    ) -> Result<Vec<Planet>> {
        if !(1..=MAX_PLANETS).contains(&count) {
            return Err(GenerationError::PlanetCount { planets: count });
        }
        let n = count as i32;
        let mut planets: Vec<Planet> = Vec::with_capacity(count);
        let mut need_earth = earth_like;

        for orbit in 1..=n {
            // Nudge the template towards the Earth-like zone in small systems.
            let template = if n > 3 { 9 * orbit / n } else { 2 * orbit + 1 };
            let (base_diameter, base_temperature) = BASELINE[template as usize];

            let diameter = self.jitter(base_diameter, DIAMETER_ROUNDS);
            let diameter = self.raise_to(diameter, MIN_DIAMETER, 4, Stage::Diameter)?;
            let gas_giant = diameter > GAS_GIANT_DIAMETER;

            let density = if gas_giant {
                58 + self.d(56) + self.d(56)
            } else {
                368 + self.d(101) + self.d(101)
            };
            let gravity = gravity(density, diameter);

            let rounds = self.d3x3();
            let temperature = self.jitter(base_temperature, rounds);
            let mut temperature = if gas_giant {
                self.squeeze(temperature, GAS_GIANT_TEMPERATURE, 2, Stage::Temperature)?
            } else {
                self.squeeze(temperature, TEMPERATURE, 3, Stage::Temperature)?
            };
            if n < 4 && orbit < 3 {
                temperature = self.raise_to(temperature, SMALL_SYSTEM_WARMTH, 4, Stage::Temperature)?;
            }
            // Outer planets are never warmer than the one inside them.
            if let Some(previous) = planets.last() {
                temperature = temperature.min(previous.temperature_class);
            }

            let mut planet = Planet {
                id: PlanetId(first_id + orbit as u32 - 1),
                star,
                orbit: orbit as u32,
                diameter,
                density,
                gravity,
                temperature_class: temperature,
                pressure_class: 0,
                atmosphere: Atmosphere::new(),
                mining_difficulty: 0,
                special: PlanetSpecial::None,
            };

            if need_earth && temperature <= EARTH_LIKE_MAX_TEMPERATURE {
                need_earth = false;
                self.make_earth_like(&mut planet)?;
            } else {
                planet.pressure_class = self.pressure(gravity, temperature, gas_giant)?;
                if planet.pressure_class != 0 {
                    planet.atmosphere = self.atmosphere(temperature)?;
                    if planet.atmosphere.is_empty() {
                        planet.pressure_class = 0;
                    }
                }
                planet.mining_difficulty = self.mining_difficulty(diameter)?;
            }

            planets.push(planet);
        }

        Ok(planets)
    }

    fn make_earth_like(&mut self, planet: &mut Planet) -> Result<()> {
        planet.diameter = 11 + self.d(3);
        planet.gravity = 93 + self.d(11) + self.d(11) + self.d(5);
        planet.density = density_for(planet.gravity, planet.diameter);
        planet.temperature_class = 9 + self.d(3);
        planet.pressure_class = 8 + self.d(3);
        planet.mining_difficulty = 208 + self.d(11) + self.d(11);
        planet.special = PlanetSpecial::IdealHomePlanet;

        let mut shares = Vec::with_capacity(MAX_GASES);
        if self.d(3) == 1 {
            shares.push(GasShare {
                gas: Gas::NH3,
                percent: self.d(30),
            });
        }
        let nitrogen = shares.len();
        shares.push(GasShare {
            gas: Gas::N2,
            percent: 10,
        });
        if self.d(3) == 1 {
            shares.push(GasShare {
                gas: Gas::CO2,
                percent: self.d(30),
            });
        }
        shares.push(GasShare {
            gas: Gas::O2,
            percent: self.d(20) + 10,
        });
        // nitrogen takes whatever is left
        let total: i32 = shares.iter().map(|s| s.percent).sum();
        shares[nitrogen].percent += 100 - total;

        planet.atmosphere = seal(shares)?;
        Ok(())
    }

    fn pressure(&mut self, gravity: i32, temperature: i32, gas_giant: bool) -> Result<i32> {
        let rounds = self.d3x3();
        let pressure = self.jitter(gravity / 10, rounds);
        let pressure = if gas_giant {
            self.squeeze(pressure, GAS_GIANT_PRESSURE, 3, Stage::Pressure)?
        } else {
            self.squeeze(pressure, ROCKY_PRESSURE, 3, Stage::Pressure)?
        };

        if gravity < MIN_GRAVITY_FOR_ATMOSPHERE || !ATMOSPHERE_TEMPERATURE.contains(&temperature) {
            return Ok(0);
        }
        Ok(pressure)
    }

    /// Picks up to four gases from a window of the gas table that slides with
    /// temperature, then scales the draws to percentages summing to 100.
    fn atmosphere(&mut self, temperature: i32) -> Result<Atmosphere> {
        let start = (100 * temperature / 225).clamp(1, 9) as usize;
        let window = &Gas::ALL[start - 1..start + 3];

        let mut remaining = (self.d(4) + self.d(4)) / 2;
        let mut shares = Vec::with_capacity(window.len());
        let mut total = 0;
        for &gas in window {
            if remaining == 0 {
                break;
            }
            let percent = if gas == Gas::He {
                // only a third of the coldest planets keep helium
                if temperature > 5 || self.d(3) != 1 {
                    continue;
                }
                self.d(20)
            } else {
                if self.d(3) == 3 {
                    continue;
                }
                let raw = self.d(100);
                if gas == Gas::O2 {
                    (raw + 1) / 2
                } else {
                    raw
                }
            };
            remaining -= 1;
            shares.push(GasShare { gas, percent });
            total += percent;
        }

        if total > 0 {
            let mut assigned = 0;
            for share in shares.iter_mut() {
                share.percent = 100 * share.percent / total;
                assigned += share.percent;
            }
            if let Some(first) = shares.first_mut() {
                first.percent += 100 - assigned;
            }
        }
        seal(shares)
    }

    fn mining_difficulty(&mut self, diameter: i32) -> Result<i32> {
        let band = self.mining;
        let mut attempts = Attempts::new(Stage::MiningDifficulty, MINING_CAP, self.cancel);
        let mut value = 0;
        while value < band.min || value > band.max {
            attempts.tick()?;
            let dice = self.d3x3() - self.d(4);
            let scale = self.d(diameter);
            let surprise = self.d(band.surprise) + self.d(band.surprise);
            value = dice * scale + surprise;
        }
        if band.hardened {
            value = harden(value);
        }
        Ok(value)
    }
}

fn seal(shares: Vec<GasShare>) -> Result<Atmosphere> {
    Atmosphere::try_from(shares).map_err(|gases| GenerationError::TooManyGases { gases })
}
