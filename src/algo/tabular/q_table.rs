use std::ops::{Index, IndexMut};

use strum::VariantArray;

use crate::{
    env::Environment,
    error::{Error, Result},
    gym::{Action, GridMap, Pos},
    util::argmax_all,
};

/// Dense action-value table indexed `[action][y][x]`
///
/// The table does not decide its own initial values: build it with [`QTable::zeros`],
/// [`QTable::filled`] or [`QTable::from_values`].
#[derive(Clone, Debug, PartialEq)]
pub struct QTable {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl QTable {
    /// A table for `grid` with every estimate set to `value`
    pub fn filled(grid: &GridMap, value: f32) -> Self {
        let (width, height) = (grid.width(), grid.height());
        Self {
            width,
            height,
            values: vec![value; Action::COUNT * width * height],
        }
    }

    pub fn zeros(grid: &GridMap) -> Self {
        Self::filled(grid, 0.0)
    }

    /// A table for `grid` from values laid out `[action][y][x]`
    ///
    /// **Panics** if `values` does not hold exactly one estimate per action and cell
    pub fn from_values(grid: &GridMap, values: Vec<f32>) -> Self {
        let (width, height) = (grid.width(), grid.height());
        assert_eq!(
            values.len(),
            Action::COUNT * width * height,
            "Expected {} values for a {width}x{height} grid.",
            Action::COUNT * width * height,
        );
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw estimates laid out `[action][y][x]`
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Fail with [`Error::OutOfBounds`] unless `pos` has entries in this table
    pub fn check(&self, pos: Pos) -> Result<()> {
        if pos.x < self.width && pos.y < self.height {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn offset(&self, action: Action, pos: Pos) -> usize {
        assert!(
            pos.x < self.width && pos.y < self.height,
            "State {pos} is outside the {}x{} table.",
            self.width,
            self.height,
        );
        (action.index() * self.height + pos.y) * self.width + pos.x
    }

    /// Estimates of every action at `pos`, in action order
    pub fn values_at(&self, pos: Pos) -> [f32; Action::COUNT] {
        std::array::from_fn(|i| self[(Action::VARIANTS[i], pos)])
    }

    /// The largest estimate at `pos`
    pub fn max_at(&self, pos: Pos) -> f32 {
        self.values_at(pos)
            .into_iter()
            .max_by(f32::total_cmp)
            .unwrap_or_default()
    }

    /// Every action whose estimate at `pos` equals the maximum
    pub fn greedy_actions(&self, pos: Pos) -> Vec<Action> {
        argmax_all(&self.values_at(pos))
            .into_iter()
            .filter_map(Action::from_repr)
            .collect()
    }

    /// Follow the greedy policy from the start cell for at most `limit` moves
    ///
    /// Ties go to the first maximizing action so the route is deterministic. The returned
    /// route starts at the start cell and ends at the goal unless the limit was reached,
    /// or the route walked onto a cell this table holds no estimates for.
    pub fn greedy_path<E>(&self, env: &E, limit: usize) -> Vec<Pos>
    where
        E: Environment<State = Pos, Action = Action>,
    {
        let mut pos = env.start();
        let mut path = vec![pos];
        for _ in 0..limit {
            if env.is_terminal(&pos) || self.check(pos).is_err() {
                break;
            }
            let Some(&action) = self.greedy_actions(pos).first() else {
                break;
            };
            pos = env.step(pos, action).0;
            path.push(pos);
        }
        path
    }
}

impl Index<(Action, Pos)> for QTable {
    type Output = f32;

    fn index(&self, (action, pos): (Action, Pos)) -> &Self::Output {
        &self.values[self.offset(action, pos)]
    }
}

impl IndexMut<(Action, Pos)> for QTable {
    fn index_mut(&mut self, (action, pos): (Action, Pos)) -> &mut Self::Output {
        let i = self.offset(action, pos);
        &mut self.values[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gym::CliffWalking;

    #[test]
    fn layout_is_action_row_column() {
        let grid = GridMap::new(3, 2);
        let values = (0..24).map(|v| v as f32).collect();
        let q = QTable::from_values(&grid, values);

        assert_eq!(q[(Action::Up, Pos::new(0, 0))], 0.0);
        assert_eq!(q[(Action::Up, Pos::new(2, 0))], 2.0, "x is the fastest axis");
        assert_eq!(q[(Action::Up, Pos::new(0, 1))], 3.0, "then y");
        assert_eq!(q[(Action::Right, Pos::new(0, 0))], 6.0, "then action");
        assert_eq!(q[(Action::Left, Pos::new(2, 1))], 23.0);
    }

    #[test]
    fn greedy_queries() {
        let grid = GridMap::new(3, 2);
        let mut q = QTable::zeros(&grid);
        let pos = Pos::new(1, 1);
        assert_eq!(q.greedy_actions(pos).len(), 4, "Fresh table ties everywhere");

        q[(Action::Down, pos)] = 2.0;
        q[(Action::Left, pos)] = 2.0;
        q[(Action::Up, pos)] = -1.0;
        assert_eq!(q.values_at(pos), [-1.0, 0.0, 2.0, 2.0]);
        assert_eq!(q.max_at(pos), 2.0);
        assert_eq!(q.greedy_actions(pos), vec![Action::Down, Action::Left]);
    }

    #[test]
    fn greedy_path_follows_best_actions() {
        let env = CliffWalking::new(GridMap::new(3, 2));
        let mut q = QTable::filled(env.grid(), -5.0);
        q[(Action::Down, Pos::new(0, 0))] = -1.0;
        q[(Action::Right, Pos::new(0, 1))] = -1.0;
        q[(Action::Right, Pos::new(1, 1))] = -1.0;
        q[(Action::Up, Pos::new(2, 1))] = -1.0;

        let path = q.greedy_path(&env, 10);
        assert_eq!(
            path,
            vec![
                Pos::new(0, 0),
                Pos::new(0, 1),
                Pos::new(1, 1),
                Pos::new(2, 1),
                Pos::new(2, 0)
            ]
        );
    }

    #[test]
    fn greedy_path_respects_limit() {
        let env = CliffWalking::new(GridMap::new(3, 2));
        // all ties resolve to Up, which never leaves the start cell
        let q = QTable::zeros(env.grid());
        assert_eq!(q.greedy_path(&env, 3).len(), 4, "Start plus three moves");
    }

    #[test]
    fn greedy_path_stops_where_the_table_ends() {
        let small = GridMap::new(2, 2);
        let env = CliffWalking::new(GridMap::new(4, 3));
        let mut q = QTable::filled(&small, -1.0);
        q[(Action::Down, Pos::new(0, 0))] = 0.0;
        q[(Action::Right, Pos::new(0, 1))] = 0.0;
        q[(Action::Right, Pos::new(1, 1))] = 0.0;

        let path = q.greedy_path(&env, 10);
        assert_eq!(
            path,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1), Pos::new(2, 1)],
            "Last cell is the first one off the table"
        );
    }

    #[test]
    fn check_bounds() {
        let q = QTable::zeros(&GridMap::new(3, 2));
        assert!(q.check(Pos::new(2, 1)).is_ok());
        assert!(q.check(Pos::new(3, 0)).is_err());
    }

    #[test]
    #[should_panic(expected = "Expected 24 values")]
    fn from_values_checks_length() {
        QTable::from_values(&GridMap::new(3, 2), vec![0.0; 10]);
    }
}
