use crate::game::body::{StarColor, StarType, MAX_PLANETS};
use crate::game::prng::Prng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarAttributes {
    pub kind: StarType,
    pub color: StarColor,
    pub size: i32,
    pub planet_count: usize,
}

pub fn roll_star(prng: &mut Prng) -> StarAttributes {
    let (kind, dice) = match prng.roll(10) {
        1 => (StarType::Dwarf, 1),
        2 => (StarType::Degenerate, 2),
        3 => (StarType::Giant, 3),
        _ => (StarType::MainSequence, 2),
    };

    let color = match prng.roll(7) {
        1 => StarColor::Blue,
        2 => StarColor::BlueWhite,
        3 => StarColor::White,
        4 => StarColor::YellowWhite,
        5 => StarColor::Yellow,
        6 => StarColor::Orange,
        _ => StarColor::Red,
    };

    let size = prng.roll(10) as i32 - 1;

    let die = color.planet_die();
    let mut count = -2;
    for _ in 0..dice {
        count += prng.roll(die) as i32;
    }
    let max = MAX_PLANETS as i32;
    while count > max {
        count -= prng.roll(3) as i32;
    }
    let planet_count = count.max(1) as usize;

    StarAttributes {
        kind,
        color,
        size,
        planet_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn attributes_stay_in_range() {
        let mut prng = Prng::new(2024);
        let mut kinds = HashSet::new();
        let mut colors = HashSet::new();
        for _ in 0..5_000 {
            let star = roll_star(&mut prng);
            assert!((0..=9).contains(&star.size));
            assert!((1..=MAX_PLANETS).contains(&star.planet_count));
            kinds.insert(star.kind);
            colors.insert(star.color);
        }
        assert_eq!(kinds.len(), 4);
        assert_eq!(colors.len(), 7);
    }

    #[test]
    fn historical_seed_star_sequence() {
        let mut prng = Prng::new(0);
        let stars: Vec<_> = (0..4).map(|_| roll_star(&mut prng)).collect();
        let summary: Vec<_> = stars
            .iter()
            .map(|s| (s.kind, s.color, s.size, s.planet_count))
            .collect();
        assert_eq!(
            summary,
            vec![
                (StarType::MainSequence, StarColor::Yellow, 2, 4),
                (StarType::MainSequence, StarColor::YellowWhite, 5, 2),
                (StarType::MainSequence, StarColor::Red, 4, 1),
                (StarType::Giant, StarColor::YellowWhite, 1, 7),
            ]
        );
    }
}
