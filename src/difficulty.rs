/// Named maze configuration picked on the home screen. `density` is a
/// wall-density knob carried by the profile; the carver does not
/// consult it yet.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Difficulty {
    pub name: &'static str,
    pub size: usize,
    pub density: f32,
}

pub const DIFFICULTIES: [Difficulty; 3] = [
    Difficulty {
        name: "EASY",
        size: 15,
        density: 0.20,
    },
    Difficulty {
        name: "MEDIUM",
        size: 25,
        density: 0.30,
    },
    Difficulty {
        name: "HARD",
        size: 35,
        density: 0.40,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_builtin_profile_generates() {
        let mut rng = StdRng::seed_from_u64(1);
        for profile in DIFFICULTIES {
            assert!(profile.size >= 5 && profile.size % 2 == 1);
            let maze = maze::generate(&mut rng, profile.size).unwrap();
            assert_eq!(maze.size(), profile.size);
        }
    }
}
