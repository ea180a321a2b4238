use crate::game::body::{Coordinate, Planet, PlanetId, Star, StarId};
use crate::game::budget::{Attempts, CancelFlag, Stage, PLACEMENT_FACTOR};
use crate::game::config::GalaxyConfig;
use crate::game::error::Result;
use crate::game::home;
use crate::game::planet::PlanetGenerator;
use crate::game::prng::Prng;
use crate::game::star::roll_star;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalaxyMeta {
    pub radius: i32,
    pub species: i32,
    pub turn: u32,
    /// Generator state the run started from. For a fresh run this is the seed
    /// with 0 mapped to the historical seed.
    pub seed: u64,
}

/// Stars and planets live in flat arenas; stars list their planets by id and
/// planets point back at their star by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Galaxy {
    pub meta: GalaxyMeta,
    pub stars: Vec<Star>,
    pub planets: Vec<Planet>,
}

impl Galaxy {
    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id.0 as usize)
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id.0 as usize)
    }

    pub fn planets_of<'a>(&'a self, star: &'a Star) -> impl Iterator<Item = &'a Planet> + 'a {
        star.planets.iter().filter_map(move |id| self.planet(*id))
    }

    pub fn home_systems(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(|s| s.home_system)
    }
}

/// Scatters `count` stars through a sphere of `radius` parsecs by rejection
/// sampling. Only one star may occupy each (x, y) column. The result is
/// sorted nearest the core first.
pub fn place_stars(
    prng: &mut Prng,
    radius: i32,
    count: usize,
    cancel: &CancelFlag,
) -> Result<Vec<Coordinate>> {
    let diameter = 2 * radius;
    let side = diameter as usize;
    let mut occupied = vec![false; side * side];
    let mut coords = Vec::with_capacity(count);
    let mut attempts = Attempts::new(Stage::StarPlacement, PLACEMENT_FACTOR * count, cancel);

    while coords.len() < count {
        attempts.tick()?;
        let x = prng.roll(diameter as u32) as i32 - 1 - radius;
        let y = prng.roll(diameter as u32) as i32 - 1 - radius;
        let z = prng.roll(diameter as u32) as i32 - 1 - radius;

        let column = (x + radius) as usize * side + (y + radius) as usize;
        if occupied[column] {
            continue;
        }
        let candidate = Coordinate::new(x, y, z);
        if !candidate.is_inside(radius) {
            continue;
        }
        occupied[column] = true;
        coords.push(candidate);
    }
    log::debug!(
        "placed {} stars in {} attempts",
        coords.len(),
        attempts.used()
    );

    coords.sort_by_key(|c| (c.distance_squared(), c.x, c.y, c.z));
    Ok(coords)
}

pub struct GalaxyGenerator {
    prng: Prng,
    config: GalaxyConfig,
    cancel: CancelFlag,
}

impl GalaxyGenerator {
    pub fn new(config: GalaxyConfig) -> Self {
        let prng = Prng::new(config.effective_seed());
        Self::with_prng(prng, config)
    }

    /// Uses a caller-supplied generator, e.g. one restored from a checkpoint.
    pub fn with_prng(prng: Prng, config: GalaxyConfig) -> Self {
        Self {
            prng,
            config,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn prng(&self) -> &Prng {
        &self.prng
    }

    pub fn generate(&mut self) -> Result<Galaxy> {
        let config = &self.config;
        config.validate()?;
        let seed = self.prng.state();
        log::info!(
            "creating galaxy: radius {}, stars {}, species {}",
            config.radius,
            config.stars,
            config.species
        );
        log::info!(
            "galactic volume {} cubic parsecs, chance of star {}",
            config.volume(),
            config.chance_of_star()
        );

        let coords = place_stars(
            &mut self.prng,
            config.radius,
            config.stars as usize,
            &self.cancel,
        )?;

        let mut galaxy = Galaxy {
            meta: GalaxyMeta {
                radius: config.radius,
                species: config.species,
                turn: 0,
                seed,
            },
            stars: Vec::with_capacity(coords.len()),
            planets: Vec::new(),
        };

        let mut homes = 0;
        for (index, coords) in coords.into_iter().enumerate() {
            let id = StarId(index as u32);
            let attributes = roll_star(&mut self.prng);
            let want_home = homes < config.species;

            let mut generator =
                PlanetGenerator::new(&mut self.prng, &self.cancel, config.easier_mining);
            let planets = generator.generate(
                id,
                galaxy.planets.len() as u32,
                attributes.planet_count,
                want_home,
            )?;

            let home_system = match home::evaluate(id, &planets) {
                Some(candidate) => {
                    log::debug!(
                        "star {} {} scored {} as a home system",
                        index + 1,
                        coords,
                        candidate.score
                    );
                    candidate.is_viable()
                }
                None => false,
            };
            if home_system {
                homes += 1;
            }

            galaxy.stars.push(Star {
                id,
                coords,
                kind: attributes.kind,
                color: attributes.color,
                size: attributes.size,
                planets: planets.iter().map(|p| p.id).collect(),
                home_system,
            });
            galaxy.planets.extend(planets);
        }

        if homes < config.species {
            log::warn!(
                "only {} of {} species have a home system",
                homes,
                config.species
            );
        }
        log::info!(
            "created {} stars, {} planets, {} home systems",
            galaxy.stars.len(),
            galaxy.planets.len(),
            homes
        );
        Ok(galaxy)
    }
}

pub fn generate_galaxy(config: GalaxyConfig) -> Result<Galaxy> {
    GalaxyGenerator::new(config).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::body::MAX_PLANETS;
    use crate::game::error::{ConfigError, GenerationError};
    use crate::game::prng::HISTORICAL_SEED;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn placement_respects_columns_and_sphere() {
        for (radius, count, seed) in [(6, 12, 0), (6, 18, 3), (20, 90, 9), (38, 600, 17)] {
            let cancel = CancelFlag::new();
            let coords = place_stars(&mut Prng::new(seed), radius, count, &cancel).unwrap();
            assert_eq!(coords.len(), count);

            let mut columns = HashSet::new();
            for c in &coords {
                assert!(columns.insert((c.x, c.y)), "column {:?} reused", (c.x, c.y));
                assert!(c.distance_squared() < radius * radius);
                assert!((-radius..radius).contains(&c.x));
                assert!((-radius..radius).contains(&c.y));
                assert!((-radius..radius).contains(&c.z));
            }
            for pair in coords.windows(2) {
                assert!(pair[0].distance_squared() <= pair[1].distance_squared());
            }
        }
    }

    #[test]
    fn overcrowded_sphere_stalls() {
        // a radius 6 sphere has fewer than 200 free columns
        let cancel = CancelFlag::new();
        let err = place_stars(&mut Prng::new(1), 6, 200, &cancel).unwrap_err();
        assert_eq!(
            err,
            GenerationError::Stalled {
                stage: Stage::StarPlacement,
                attempts: 20_000
            }
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut gen = GalaxyGenerator::new(GalaxyConfig::default()).with_cancel(cancel);
        assert_eq!(
            gen.generate().unwrap_err(),
            GenerationError::Cancelled {
                stage: Stage::StarPlacement
            }
        );
    }

    #[test]
    fn invalid_config_is_not_recoverable() {
        let err = generate_galaxy(GalaxyConfig::new(6, 40, 1, 0)).unwrap_err();
        assert_eq!(
            err,
            GenerationError::Config(ConfigError::RadiusTooSmall { stars: 40 })
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn arena_links_are_consistent() {
        let galaxy = generate_galaxy(GalaxyConfig::new(20, 90, 15, 7)).unwrap();
        assert_eq!(galaxy.stars.len(), 90);
        assert_eq!(galaxy.meta.turn, 0);
        assert_eq!(galaxy.meta.species, 15);

        let mut seen = 0;
        for (i, star) in galaxy.stars.iter().enumerate() {
            assert_eq!(star.id, StarId(i as u32));
            assert!((1..=MAX_PLANETS).contains(&star.planet_count()));
            let planets: Vec<_> = galaxy.planets_of(star).collect();
            assert_eq!(planets.len(), star.planet_count());
            for (orbit, planet) in planets.iter().enumerate() {
                assert_eq!(planet.star, star.id);
                assert_eq!(planet.orbit as usize, orbit + 1);
                assert_eq!(galaxy.planet(planet.id), Some(*planet));
            }
            let earths = planets.iter().filter(|p| p.is_earth_like()).count();
            assert!(earths <= 1);
            if star.home_system {
                assert_eq!(earths, 1);
            }
            seen += planets.len();
        }
        assert_eq!(seen, galaxy.planets.len());
    }

    #[test]
    fn home_systems_do_not_exceed_species() {
        let galaxy = generate_galaxy(GalaxyConfig::new(50, 1_000, 100, 99)).unwrap();
        let homes = galaxy.home_systems().count();
        assert!(homes <= 100);
        assert!(homes > 0);
        for star in galaxy.home_systems() {
            let planets: Vec<Planet> = galaxy.planets_of(star).cloned().collect();
            let candidate = home::evaluate(star.id, &planets).unwrap();
            assert!(candidate.is_viable());
        }
    }

    #[test]
    fn same_seed_same_galaxy() {
        let config = GalaxyConfig::new(12, 100, 4, 31337);
        let first = generate_galaxy(config.clone()).unwrap();
        let second = generate_galaxy(config).unwrap();
        assert_eq!(first, second);

        let other = generate_galaxy(GalaxyConfig::new(12, 100, 4, 31338)).unwrap();
        assert_ne!(first.stars, other.stars);
    }

    #[test]
    fn independent_runs_in_parallel_match_serial() {
        let config = GalaxyConfig::new(15, 120, 3, 4242);
        let serial = generate_galaxy(config.clone()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let config = config.clone();
                thread::spawn(move || generate_galaxy(config).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), serial);
        }
    }

    #[test]
    fn checkpoint_resumes_the_stream() {
        let config = GalaxyConfig::default();
        let mut gen = GalaxyGenerator::new(config.clone());
        gen.generate().unwrap();
        let checkpoint = gen.prng().to_string();

        let restored: Prng = checkpoint.parse().unwrap();
        let mut resumed = GalaxyGenerator::with_prng(restored, config.clone());
        let mut continued = GalaxyGenerator::with_prng(gen.prng().clone(), config);
        let galaxy = resumed.generate().unwrap();
        assert_eq!(galaxy, continued.generate().unwrap());
        // the resumed run reports the state it started from, not the config seed
        assert_eq!(format!("{:x}", galaxy.meta.seed), checkpoint);
        assert_ne!(galaxy.meta.seed, HISTORICAL_SEED);
    }
}
