use serde::Serialize;
use std::fmt::Write;

use crate::game::body::{GasShare, Planet, Star};
use crate::game::galaxy::Galaxy;
use crate::game::home::HomeSystemTemplate;

pub fn galaxy_report(galaxy: &Galaxy) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "galaxy radius={} species={} turn={} stars={}",
        galaxy.meta.radius,
        galaxy.meta.species,
        galaxy.meta.turn,
        galaxy.stars.len()
    );

    for star in &galaxy.stars {
        let home = if star.home_system { " home" } else { "" };
        let _ = writeln!(
            output,
            "star {:>3} {} type={} color={} size={} planets={}{}",
            star.id.0 + 1,
            star.coords,
            star.kind.label(),
            star.color.label(),
            star.size,
            star.planet_count(),
            home
        );
        for planet in galaxy.planets_of(star) {
            write_planet(&mut output, planet);
        }
    }

    output
}

fn write_planet(buf: &mut String, planet: &Planet) {
    let _ = writeln!(
        buf,
        "  orbit {} diameter={} density={} gravity={} temp={} pressure={} mining={} special={} atmosphere={}",
        planet.orbit,
        planet.diameter,
        planet.density,
        planet.gravity,
        planet.temperature_class,
        planet.pressure_class,
        planet.mining_difficulty,
        planet.special.label(),
        planet.atmosphere
    );
}

pub fn galaxy_json(galaxy: &Galaxy) -> String {
    let view = GalaxyView::from(galaxy);
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}

pub fn template_json(template: &HomeSystemTemplate) -> String {
    let view = TemplateView {
        score: template.score,
        attempts: template.attempts,
        planets: template.planets.iter().map(PlanetView::from).collect(),
    };
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct GasView {
    gas: &'static str,
    percent: i32,
}

#[derive(Serialize)]
struct PlanetView {
    id: u32,
    orbit: u32,
    diameter: i32,
    density: i32,
    gravity: i32,
    temperature_class: i32,
    pressure_class: i32,
    mining_difficulty: i32,
    special: &'static str,
    gas_giant: bool,
    atmosphere: Vec<GasView>,
}

#[derive(Serialize)]
struct StarView {
    id: u32,
    x: i32,
    y: i32,
    z: i32,
    kind: &'static str,
    color: &'static str,
    size: i32,
    home_system: bool,
    planets: Vec<PlanetView>,
}

#[derive(Serialize)]
struct GalaxyView {
    radius: i32,
    species: i32,
    turn: u32,
    // hex keeps the full 64 bits intact in JavaScript
    seed: String,
    stars: Vec<StarView>,
}

#[derive(Serialize)]
struct TemplateView {
    score: i32,
    attempts: usize,
    planets: Vec<PlanetView>,
}

impl From<&GasShare> for GasView {
    fn from(share: &GasShare) -> Self {
        Self {
            gas: share.gas.symbol(),
            percent: share.percent,
        }
    }
}

impl From<&Planet> for PlanetView {
    fn from(planet: &Planet) -> Self {
        Self {
            id: planet.id.0,
            orbit: planet.orbit,
            diameter: planet.diameter,
            density: planet.density,
            gravity: planet.gravity,
            temperature_class: planet.temperature_class,
            pressure_class: planet.pressure_class,
            mining_difficulty: planet.mining_difficulty,
            special: planet.special.label(),
            gas_giant: planet.is_gas_giant(),
            atmosphere: planet.atmosphere.shares().iter().map(GasView::from).collect(),
        }
    }
}

impl StarView {
    fn new(galaxy: &Galaxy, star: &Star) -> Self {
        Self {
            id: star.id.0,
            x: star.coords.x,
            y: star.coords.y,
            z: star.coords.z,
            kind: star.kind.label(),
            color: star.color.label(),
            size: star.size,
            home_system: star.home_system,
            planets: galaxy.planets_of(star).map(PlanetView::from).collect(),
        }
    }
}

impl From<&Galaxy> for GalaxyView {
    fn from(galaxy: &Galaxy) -> Self {
        Self {
            radius: galaxy.meta.radius,
            species: galaxy.meta.species,
            turn: galaxy.meta.turn,
            seed: format!("{:x}", galaxy.meta.seed),
            stars: galaxy
                .stars
                .iter()
                .map(|star| StarView::new(galaxy, star))
                .collect(),
        }
    }
}
