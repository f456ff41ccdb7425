use crate::template;
use cubescape_common::{Color, SceneObject};
use cubescape_kernel::SceneObjectStore;
use glam::Vec3;
use rand::Rng;

/// Half-width of the square in which `random_cube` drops cubes.
const SCATTER_HALF_EXTENT: f32 = 5.0;

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::from_bits(u64::from(rng.gen_range(0..=Color::MAX)))
}

/// A randomly tinted cube resting on the ground somewhere in `[-5, 5)²`.
pub fn random_cube<R: Rng + ?Sized>(rng: &mut R) -> SceneObject {
    let x = rng.gen_range(-SCATTER_HALF_EXTENT..SCATTER_HALF_EXTENT);
    let z = rng.gen_range(-SCATTER_HALF_EXTENT..SCATTER_HALF_EXTENT);
    SceneObject::cube(random_color(rng), Vec3::new(x, 0.5, z))
}

/// One freshly colored cube per template point.
pub fn cubes_from_prompt<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> Vec<SceneObject> {
    template::generate(prompt, rng)
        .into_iter()
        .map(|position| SceneObject::cube(random_color(rng), position))
        .collect()
}

/// Append the cubes for `prompt` to `store`. Returns how many were added.
pub fn populate<R: Rng + ?Sized>(
    store: &mut SceneObjectStore,
    prompt: &str,
    rng: &mut R,
) -> usize {
    store.extend(cubes_from_prompt(prompt, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescape_common::ObjectKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn populate_appends_cubes() {
        let mut store = SceneObjectStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let added = populate(&mut store, "maze", &mut rng);
        assert_eq!(added, 5);
        assert!(store.iter().all(|o| o.kind == ObjectKind::Cube));
        assert_eq!(store.get(0).unwrap().position, Vec3::new(-2.0, 0.5, -2.0));

        populate(&mut store, "wall", &mut rng);
        assert_eq!(store.len(), 5 + 63);
    }

    #[test]
    fn unknown_prompt_adds_nothing() {
        let mut store = SceneObjectStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(populate(&mut store, "spaceship", &mut rng), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn positions_repeat_but_colors_need_not() {
        let a = cubes_from_prompt("tower", &mut StdRng::seed_from_u64(1));
        let b = cubes_from_prompt("tower", &mut StdRng::seed_from_u64(2));
        let pa: Vec<Vec3> = a.iter().map(|o| o.position).collect();
        let pb: Vec<Vec3> = b.iter().map(|o| o.position).collect();
        assert_eq!(pa, pb);
        assert!(a.iter().zip(&b).any(|(x, y)| x.color != y.color));
    }

    #[test]
    fn random_cube_lands_in_scatter_square() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let cube = random_cube(&mut rng);
            assert_eq!(cube.position.y, 0.5);
            assert!((-5.0..5.0).contains(&cube.position.x));
            assert!((-5.0..5.0).contains(&cube.position.z));
            assert!(cube.color.bits() <= Color::MAX);
        }
    }
}
