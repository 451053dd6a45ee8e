use super::effects::Effect;
use super::grid::{Cell, Grid, GridFull};
use enum_map::Enum;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// The kinds of food that can appear on the grid
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum FoodKind {
    Apple,
    Cherry,
    Grape,
    Banana,
}

impl FoodKind {
    /// Base points awarded for eating this food, before multipliers
    pub(crate) fn points(self) -> u32 {
        match self {
            FoodKind::Apple => 1,
            FoodKind::Cherry => 2,
            FoodKind::Grape => 3,
            FoodKind::Banana => 5,
        }
    }

    /// The power-up granted by eating this food
    pub(crate) fn effect(self) -> Effect {
        match self {
            FoodKind::Apple => Effect::SpeedBoost,
            FoodKind::Cherry => Effect::GhostMode,
            FoodKind::Grape => Effect::DoublePoints,
            FoodKind::Banana => Effect::Invincible,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Cherry => "cherry",
            FoodKind::Grape => "grape",
            FoodKind::Banana => "banana",
        }
    }

    pub(crate) fn random<R: Rng>(rng: &mut R) -> FoodKind {
        FoodKind::from_usize(rng.random_range(0..FoodKind::LENGTH))
    }
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Food {
    pub(crate) kind: FoodKind,
    pub(crate) cell: Cell,
}

/// Place a new food item of a random kind on a cell occupied by neither the
/// snake nor an obstacle.
pub(crate) fn spawn_food<R: Rng>(
    grid: Grid,
    rng: &mut R,
    snake: &VecDeque<Cell>,
    obstacles: &HashSet<Cell>,
) -> Result<Food, GridFull> {
    let mut occupied = obstacles.clone();
    occupied.extend(snake.iter().copied());
    let cell = grid.random_valid_cell(rng, &occupied)?;
    let kind = FoodKind::random(rng);
    Ok(Food { kind, cell })
}

/// Pick a cell for a new obstacle that is occupied by neither the snake, an
/// existing obstacle, nor the current food.
pub(crate) fn spawn_obstacle<R: Rng>(
    grid: Grid,
    rng: &mut R,
    snake: &VecDeque<Cell>,
    obstacles: &HashSet<Cell>,
    food: Option<Food>,
) -> Result<Cell, GridFull> {
    let mut occupied = obstacles.clone();
    occupied.extend(snake.iter().copied());
    occupied.extend(food.map(|f| f.cell));
    grid.random_valid_cell(rng, &occupied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[rstest]
    #[case(FoodKind::Apple, 1, Effect::SpeedBoost)]
    #[case(FoodKind::Cherry, 2, Effect::GhostMode)]
    #[case(FoodKind::Grape, 3, Effect::DoublePoints)]
    #[case(FoodKind::Banana, 5, Effect::Invincible)]
    fn food_table(#[case] kind: FoodKind, #[case] points: u32, #[case] effect: Effect) {
        assert_eq!(kind.points(), points);
        assert_eq!(kind.effect(), effect);
    }

    #[test]
    fn every_kind_is_spawned() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let kinds = (0..200)
            .map(|_| FoodKind::random(&mut rng))
            .collect::<HashSet<_>>();
        assert_eq!(kinds, FoodKind::iter().collect::<HashSet<_>>());
    }

    #[test]
    fn food_avoids_snake_and_obstacles() {
        let grid = Grid::new(3);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = VecDeque::from([Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
        let obstacles = HashSet::from([
            Cell::new(0, 1),
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(0, 2),
            Cell::new(1, 2),
        ]);
        for _ in 0..20 {
            let food = spawn_food(grid, &mut rng, &snake, &obstacles).unwrap();
            assert_eq!(food.cell, Cell::new(2, 2));
        }
    }

    #[test]
    fn obstacle_avoids_food() {
        let grid = Grid::new(2);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = VecDeque::from([Cell::new(0, 0)]);
        let obstacles = HashSet::from([Cell::new(1, 0)]);
        let food = Food {
            kind: FoodKind::Grape,
            cell: Cell::new(0, 1),
        };
        assert_eq!(
            spawn_obstacle(grid, &mut rng, &snake, &obstacles, Some(food)),
            Ok(Cell::new(1, 1))
        );
        let obstacles = HashSet::from([Cell::new(1, 0), Cell::new(1, 1)]);
        assert_eq!(
            spawn_obstacle(grid, &mut rng, &snake, &obstacles, Some(food)),
            Err(GridFull)
        );
    }

    #[test]
    fn food_on_full_grid() {
        let grid = Grid::new(2);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = grid.cells().collect::<VecDeque<_>>();
        assert_eq!(
            spawn_food(grid, &mut rng, &snake, &HashSet::new()),
            Err(GridFull)
        );
    }
}
