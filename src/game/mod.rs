pub mod body;
pub mod budget;
pub mod config;
pub mod error;
pub mod galaxy;
pub mod home;
pub mod planet;
pub mod prng;
pub mod report;
pub mod star;

pub use body::{Planet, Star};
pub use budget::CancelFlag;
pub use config::GalaxyConfig;
pub use error::{ConfigError, GenerationError};
pub use galaxy::{generate_galaxy, Galaxy, GalaxyGenerator};
pub use prng::Prng;
