use std::fmt;

pub const MAX_PLANETS: usize = 9;
pub const MAX_GASES: usize = 4;
/// Anything wider than 40,000 km is a gas giant.
pub const GAS_GIANT_DIAMETER: i32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self) -> i32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn is_inside(&self, radius: i32) -> bool {
        self.distance_squared() < radius * radius
    }

    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        let dz = f64::from(self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:>3},{:>3},{:>3})", self.x, self.y, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarType {
    Dwarf,
    Degenerate,
    MainSequence,
    Giant,
}

impl StarType {
    pub fn code(&self) -> char {
        match self {
            StarType::Dwarf => 'd',
            StarType::Degenerate => 'D',
            StarType::MainSequence => ' ',
            StarType::Giant => 'g',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StarType::Dwarf => "Dwarf",
            StarType::Degenerate => "Degenerate",
            StarType::MainSequence => "MainSequence",
            StarType::Giant => "Giant",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarColor {
    Blue = 1,
    BlueWhite,
    White,
    YellowWhite,
    Yellow,
    Orange,
    Red,
}

impl StarColor {
    pub const ALL: [StarColor; 7] = [
        StarColor::Blue,
        StarColor::BlueWhite,
        StarColor::White,
        StarColor::YellowWhite,
        StarColor::Yellow,
        StarColor::Orange,
        StarColor::Red,
    ];

    pub fn rank(&self) -> u32 {
        *self as u32
    }

    pub fn from_rank(rank: u32) -> Option<Self> {
        let idx = usize::try_from(rank.checked_sub(1)?).ok()?;
        Self::ALL.get(idx).copied()
    }

    /// Hotter stars roll bigger planet dice: blue 8 down to red 2.
    pub fn planet_die(&self) -> u32 {
        9 - self.rank()
    }

    pub fn label(&self) -> &'static str {
        match self {
            StarColor::Blue => "Blue",
            StarColor::BlueWhite => "BlueWhite",
            StarColor::White => "White",
            StarColor::YellowWhite => "YellowWhite",
            StarColor::Yellow => "Yellow",
            StarColor::Orange => "Orange",
            StarColor::Red => "Red",
        }
    }
}

/// Atmospheric gases, ordered from the coldest-retained to the hottest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gas {
    H2,
    CH4,
    He,
    NH3,
    N2,
    CO2,
    O2,
    HCl,
    Cl2,
    F2,
    H2O,
    SO2,
    H2S,
}

impl Gas {
    pub const ALL: [Gas; 13] = [
        Gas::H2,
        Gas::CH4,
        Gas::He,
        Gas::NH3,
        Gas::N2,
        Gas::CO2,
        Gas::O2,
        Gas::HCl,
        Gas::Cl2,
        Gas::F2,
        Gas::H2O,
        Gas::SO2,
        Gas::H2S,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Gas::H2 => "H2",
            Gas::CH4 => "CH4",
            Gas::He => "He",
            Gas::NH3 => "NH3",
            Gas::N2 => "N2",
            Gas::CO2 => "CO2",
            Gas::O2 => "O2",
            Gas::HCl => "HCl",
            Gas::Cl2 => "Cl2",
            Gas::F2 => "F2",
            Gas::H2O => "H2O",
            Gas::SO2 => "SO2",
            Gas::H2S => "H2S",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasShare {
    pub gas: Gas,
    pub percent: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Atmosphere {
    shares: Vec<GasShare>,
}

impl Atmosphere {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shares(&self) -> &[GasShare] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn total_percent(&self) -> i32 {
        self.shares.iter().map(|s| s.percent).sum()
    }

    pub fn contains(&self, gas: Gas) -> bool {
        self.shares.iter().any(|s| s.gas == gas)
    }

    pub fn gases(&self) -> impl Iterator<Item = Gas> + '_ {
        self.shares.iter().map(|s| s.gas)
    }
}

impl TryFrom<Vec<GasShare>> for Atmosphere {
    type Error = usize;

    fn try_from(shares: Vec<GasShare>) -> Result<Self, Self::Error> {
        if shares.len() > MAX_GASES {
            return Err(shares.len());
        }
        Ok(Self { shares })
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shares.is_empty() {
            return f.write_str("none");
        }
        for (i, share) in self.shares.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", share.gas.symbol(), share.percent)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlanetSpecial {
    #[default]
    None,
    IdealHomePlanet,
    IdealColonyPlanet,
    RadioactiveHellhole,
}

impl PlanetSpecial {
    pub fn label(&self) -> &'static str {
        match self {
            PlanetSpecial::None => "None",
            PlanetSpecial::IdealHomePlanet => "IdealHomePlanet",
            PlanetSpecial::IdealColonyPlanet => "IdealColonyPlanet",
            PlanetSpecial::RadioactiveHellhole => "RadioactiveHellhole",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Planet {
    pub id: PlanetId,
    pub star: StarId,
    pub orbit: u32,
    /// Thousands of kilometres.
    pub diameter: i32,
    /// Times 100.
    pub density: i32,
    /// Times 100; Earth is 100.
    pub gravity: i32,
    pub temperature_class: i32,
    /// 0 through 29; 0 means no atmosphere.
    pub pressure_class: i32,
    pub atmosphere: Atmosphere,
    /// Times 100.
    pub mining_difficulty: i32,
    pub special: PlanetSpecial,
}

impl Planet {
    pub fn is_gas_giant(&self) -> bool {
        self.diameter > GAS_GIANT_DIAMETER
    }

    pub fn is_earth_like(&self) -> bool {
        self.special == PlanetSpecial::IdealHomePlanet
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Star {
    pub id: StarId,
    pub coords: Coordinate,
    pub kind: StarType,
    pub color: StarColor,
    pub size: i32,
    pub planets: Vec<PlanetId>,
    pub home_system: bool,
}

impl Star {
    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ranks_drive_planet_dice() {
        assert_eq!(StarColor::Blue.planet_die(), 8);
        assert_eq!(StarColor::Yellow.planet_die(), 4);
        assert_eq!(StarColor::Red.planet_die(), 2);
        for color in StarColor::ALL {
            assert_eq!(StarColor::from_rank(color.rank()), Some(color));
        }
        assert_eq!(StarColor::from_rank(0), None);
        assert_eq!(StarColor::from_rank(8), None);
    }

    #[test]
    fn coordinate_containment_is_strict() {
        assert!(Coordinate::new(3, 4, 0).is_inside(6));
        assert!(!Coordinate::new(6, 0, 0).is_inside(6));
        assert!(!Coordinate::new(-3, -4, -5).is_inside(7));
        assert_eq!(Coordinate::new(0, 3, 4).distance_to(&Coordinate::new(0, 0, 0)), 5.0);
    }

    #[test]
    fn atmosphere_rejects_a_fifth_slot() {
        let share = |gas| GasShare { gas, percent: 20 };
        let five = vec![
            share(Gas::H2),
            share(Gas::He),
            share(Gas::N2),
            share(Gas::O2),
            share(Gas::F2),
        ];
        assert_eq!(Atmosphere::try_from(five), Err(5));

        let atmosphere = Atmosphere::try_from(vec![
            GasShare {
                gas: Gas::N2,
                percent: 78,
            },
            GasShare {
                gas: Gas::O2,
                percent: 22,
            },
        ])
        .unwrap();
        assert_eq!(atmosphere.total_percent(), 100);
        assert!(atmosphere.contains(Gas::O2));
        assert!(!atmosphere.contains(Gas::He));
        assert_eq!(atmosphere.to_string(), "N2:78,O2:22");
        assert_eq!(Atmosphere::new().to_string(), "none");
    }
}
