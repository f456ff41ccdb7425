use glam::Vec3;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Built-in point-lattice generators, keyed by prompt name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    House,
    Tower,
    Wall,
    Bridge,
    Room,
    City,
    Maze,
}

/// The prompt does not name a built-in template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no template named {0:?}")]
pub struct UnknownTemplate(pub String);

impl Template {
    pub const ALL: [Template; 7] = [
        Template::House,
        Template::Tower,
        Template::Wall,
        Template::Bridge,
        Template::Room,
        Template::City,
        Template::Maze,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::House => "house",
            Template::Tower => "tower",
            Template::Wall => "wall",
            Template::Bridge => "bridge",
            Template::Room => "room",
            Template::City => "city",
            Template::Maze => "maze",
        }
    }

    /// Cube centres for this template. Only `City` draws from `rng`.
    pub fn points<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Vec3> {
        match self {
            Template::House => shell(8, 6, 4),
            Template::Tower => tower(3, 10),
            Template::Wall => wall(20, 3),
            Template::Bridge => bridge(15, 3),
            Template::Room => shell(6, 6, 4),
            Template::City => city(rng),
            Template::Maze => MAZE.iter().map(|&[x, y, z]| Vec3::new(x, y, z)).collect(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTemplate(s.to_owned()))
    }
}

/// Positions for `prompt`, or nothing if it names no template.
pub fn generate<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> Vec<Vec3> {
    match prompt.parse::<Template>() {
        Ok(template) => {
            let points = template.points(rng);
            tracing::debug!(%template, count = points.len(), "template generated");
            points
        }
        Err(e) => {
            tracing::warn!("{e}; scene left empty");
            Vec::new()
        }
    }
}

const MAZE: [[f32; 3]; 5] = [
    [-2.0, 0.5, -2.0],
    [-1.0, 0.5, -2.0],
    [0.0, 0.5, -2.0],
    [-2.0, 1.5, -2.0],
    [0.0, 1.5, -2.0],
];

/// Centre of the cube sitting in layer `y` (layer 0 rests on the ground).
fn layer(y: i32) -> f32 {
    y as f32 + 0.5
}

/// Four perimeter walls of `layers` height around x∈[-hx,hx], z∈[-hz,hz],
/// capped with a full ceiling one layer above. Corners appear twice.
fn shell(hx: i32, hz: i32, layers: i32) -> Vec<Vec3> {
    let mut p = Vec::new();
    for y in 0..layers {
        let ly = layer(y);
        for x in -hx..=hx {
            p.push(Vec3::new(x as f32, ly, -hz as f32));
            p.push(Vec3::new(x as f32, ly, hz as f32));
        }
        for z in -hz..=hz {
            p.push(Vec3::new(-hx as f32, ly, z as f32));
            p.push(Vec3::new(hx as f32, ly, z as f32));
        }
    }
    let ceiling = layer(layers);
    for x in -hx..=hx {
        for z in -hz..=hz {
            p.push(Vec3::new(x as f32, ceiling, z as f32));
        }
    }
    p
}

/// Lattice disc `x² + z² ≤ r²` stacked `height` layers.
fn tower(radius: i32, height: i32) -> Vec<Vec3> {
    let mut p = Vec::new();
    for y in 0..height {
        for x in -radius..=radius {
            for z in -radius..=radius {
                if x * x + z * z <= radius * radius {
                    p.push(Vec3::new(x as f32, layer(y), z as f32));
                }
            }
        }
    }
    p
}

/// One cube thick along x at z = 0, centred on the origin.
fn wall(length: i32, height: i32) -> Vec<Vec3> {
    let half = length / 2;
    let mut p = Vec::new();
    for x in -half..=half {
        for y in 0..height {
            p.push(Vec3::new(x as f32, layer(y), 0.0));
        }
    }
    p
}

/// Deck at ground level plus a rail on each side one layer up.
///
/// Columns start at `-length / 2` (a half-integer for odd lengths) and step
/// by one while they stay within `length / 2`.
fn bridge(length: i32, half_width: i32) -> Vec<Vec3> {
    let start = -(length as f32) / 2.0;
    let columns: Vec<f32> = (0..=length).map(|i| start + i as f32).collect();
    let mut p = Vec::new();
    for &x in &columns {
        for z in -half_width..=half_width {
            p.push(Vec3::new(x, layer(0), z as f32));
        }
    }
    let rail = (half_width + 1) as f32;
    for &x in &columns {
        p.push(Vec3::new(x, layer(1), -rail));
        p.push(Vec3::new(x, layer(1), rail));
    }
    p
}

/// Six solid 5×5 blocks on a 3×2 grid, each 3..=8 layers tall.
fn city<R: Rng + ?Sized>(rng: &mut R) -> Vec<Vec3> {
    let mut p = Vec::new();
    for i in 0..6 {
        let bx = (i % 3) * 10 - 10;
        let bz = (i / 3) * 10 - 5;
        let height: i32 = rng.gen_range(3..=8);
        for y in 0..height {
            for x in -2..=2 {
                for z in -2..=2 {
                    p.push(Vec3::new((bx + x) as f32, layer(y), (bz + z) as f32));
                }
            }
        }
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn bounds(points: &[Vec3]) -> (Vec3, Vec3) {
        points.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        )
    }

    #[test]
    fn prompt_names_round_trip() {
        for t in Template::ALL {
            assert_eq!(t.name().parse::<Template>(), Ok(t));
        }
        assert_eq!(
            "castle".parse::<Template>(),
            Err(UnknownTemplate("castle".into()))
        );
    }

    #[test]
    fn unknown_prompt_is_empty() {
        assert!(generate("unknown_prompt", &mut rng()).is_empty());
        assert!(generate("", &mut rng()).is_empty());
        assert!(generate("House", &mut rng()).is_empty());
    }

    #[test]
    fn house_count_and_bounds() {
        let p = generate("house", &mut rng());
        assert_eq!(p.len(), 4 * (2 * 17 + 2 * 13) + 17 * 13);
        let (lo, hi) = bounds(&p);
        assert_eq!(lo, Vec3::new(-8.0, 0.5, -6.0));
        assert_eq!(hi, Vec3::new(8.0, 4.5, 6.0));
        let ceiling = p.iter().filter(|v| v.y == 4.5).count();
        assert_eq!(ceiling, 17 * 13);
    }

    #[test]
    fn house_walls_are_hollow() {
        let p = Template::House.points(&mut rng());
        assert!(
            p.iter()
                .filter(|v| v.y < 4.5)
                .all(|v| v.x.abs() == 8.0 || v.z.abs() == 6.0)
        );
    }

    #[test]
    fn tower_is_a_stacked_disc() {
        let p = Template::Tower.points(&mut rng());
        assert_eq!(p.len(), 29 * 10);
        assert!(p.iter().all(|v| v.x * v.x + v.z * v.z <= 9.0));
        let (lo, hi) = bounds(&p);
        assert_eq!(lo.y, 0.5);
        assert_eq!(hi.y, 9.5);
    }

    #[test]
    fn wall_is_one_deep() {
        let p = Template::Wall.points(&mut rng());
        assert_eq!(p.len(), 21 * 3);
        assert!(p.iter().all(|v| v.z == 0.0));
        let (lo, hi) = bounds(&p);
        assert_eq!((lo.x, hi.x), (-10.0, 10.0));
        assert_eq!((lo.y, hi.y), (0.5, 2.5));
    }

    #[test]
    fn bridge_deck_and_rails() {
        let p = Template::Bridge.points(&mut rng());
        let deck: Vec<_> = p.iter().filter(|v| v.y == 0.5).collect();
        let rails: Vec<_> = p.iter().filter(|v| v.y == 1.5).collect();
        assert_eq!(deck.len(), 16 * 7);
        assert_eq!(rails.len(), 16 * 2);
        assert!(rails.iter().all(|v| v.z.abs() == 4.0));
        let (lo, hi) = bounds(&p);
        assert_eq!((lo.x, hi.x), (-7.5, 7.5));
    }

    #[test]
    fn room_is_a_closed_square_shell() {
        let p = Template::Room.points(&mut rng());
        assert_eq!(p.len(), 4 * (2 * 13 + 2 * 13) + 13 * 13);
        let (lo, hi) = bounds(&p);
        assert_eq!(lo, Vec3::new(-6.0, 0.5, -6.0));
        assert_eq!(hi, Vec3::new(6.0, 4.5, 6.0));
    }

    #[test]
    fn city_heights_within_range() {
        for seed in 0..20 {
            let p = Template::City.points(&mut StdRng::seed_from_u64(seed));
            assert!(p.len() >= 6 * 25 * 3 && p.len() <= 6 * 25 * 8);
            assert_eq!(p.len() % 25, 0);
            let (lo, hi) = bounds(&p);
            assert_eq!((lo.x, hi.x), (-12.0, 12.0));
            assert_eq!((lo.z, hi.z), (-7.0, 7.0));
            assert!(hi.y <= 7.5);
        }
    }

    #[test]
    fn city_is_reproducible_with_same_seed() {
        let a = Template::City.points(&mut StdRng::seed_from_u64(99));
        let b = Template::City.points(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn maze_is_the_fixed_list() {
        let p = Template::Maze.points(&mut rng());
        assert_eq!(p.len(), 5);
        assert_eq!(p[0], Vec3::new(-2.0, 0.5, -2.0));
        assert_eq!(p[4], Vec3::new(0.0, 1.5, -2.0));
    }
}
