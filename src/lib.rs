use wasm_bindgen::prelude::*;

pub mod game;
pub mod logging;

use game::home::home_system_template;
use game::report::{galaxy_json, galaxy_report as render_report, template_json};
use game::{CancelFlag, GalaxyConfig, Prng};

fn error_json(message: impl ToString) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn init_logging() {
    logging::init(log::LevelFilter::Info);
}

/// Generates a galaxy and returns it as JSON, or `{"error": ...}`.
#[wasm_bindgen]
pub fn generate_galaxy(radius: i32, stars: i32, species: i32, seed: u64) -> String {
    match game::generate_galaxy(GalaxyConfig::new(radius, stars, species, seed)) {
        Ok(galaxy) => galaxy_json(&galaxy),
        Err(e) => error_json(e),
    }
}

/// Same as `generate_galaxy`, taking a JSON `GalaxyConfig`. Missing fields
/// fall back to the defaults.
#[wasm_bindgen]
pub fn generate_galaxy_from_config(config: &str) -> String {
    let config: GalaxyConfig = match serde_json::from_str(config) {
        Ok(config) => config,
        Err(e) => return error_json(e),
    };
    match game::generate_galaxy(config) {
        Ok(galaxy) => galaxy_json(&galaxy),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn galaxy_report(radius: i32, stars: i32, species: i32, seed: u64) -> String {
    match game::generate_galaxy(GalaxyConfig::new(radius, stars, species, seed)) {
        Ok(galaxy) => render_report(&galaxy),
        Err(e) => e.to_string(),
    }
}

#[wasm_bindgen]
pub fn suggest_config(species: i32, less_crowded: bool) -> String {
    match GalaxyConfig::suggested(species, less_crowded) {
        Ok(config) => serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string()),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn home_template(planets: usize, seed: u64, easier_mining: bool) -> String {
    let mut prng = Prng::new(seed);
    let cancel = CancelFlag::new();
    match home_system_template(&mut prng, &cancel, planets, easier_mining) {
        Ok(template) => template_json(&template),
        Err(e) => error_json(e),
    }
}
