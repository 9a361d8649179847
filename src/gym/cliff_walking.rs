use std::fmt;

use strum::{EnumIter, FromRepr, VariantArray};

use crate::{
    env::Environment,
    error::{Error, Result},
};

/// A cell on the grid, `x` counts columns from the left and `y` counts rows from the cliff edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four moves available in every cell
///
/// The discriminant is the action's index into the value table.
#[derive(EnumIter, VariantArray, FromRepr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Action {
    /// Number of actions, and the size of the action axis of a value table
    pub const COUNT: usize = Self::VARIANTS.len();

    /// Position of the action in the fixed action ordering
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Action::index`]
    pub fn from_index(index: usize) -> Result<Self> {
        Self::from_repr(index).ok_or(Error::UnknownAction(index))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
        };
        f.write_str(name)
    }
}

/// Dimensions and rewards of a cliff-walking grid
///
/// The agent starts in the corner `(0, 0)` and has to reach the opposite corner of the
/// same row, `(width - 1, 0)`. Every cell between them is a cliff cell.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cliff_reward: f32,
    step_reward: f32,
}

impl GridMap {
    pub const DEFAULT_CLIFF_REWARD: f32 = -100.0;
    pub const DEFAULT_STEP_REWARD: f32 = -1.0;

    /// A grid with the default rewards
    ///
    /// On a grid one cell wide the start is also the goal and there is no cliff.
    ///
    /// **Panics** if the grid has no cells
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 1 && height >= 1,
            "Grid must have at least one cell, got {width}x{height}."
        );
        Self {
            width,
            height,
            cliff_reward: Self::DEFAULT_CLIFF_REWARD,
            step_reward: Self::DEFAULT_STEP_REWARD,
        }
    }

    /// Replace the cliff and step rewards
    pub fn with_rewards(mut self, cliff_reward: f32, step_reward: f32) -> Self {
        self.cliff_reward = cliff_reward;
        self.step_reward = step_reward;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cliff_reward(&self) -> f32 {
        self.cliff_reward
    }

    pub fn step_reward(&self) -> f32 {
        self.step_reward
    }

    pub fn start(&self) -> Pos {
        Pos::new(0, 0)
    }

    pub fn goal(&self) -> Pos {
        Pos::new(self.width - 1, 0)
    }

    pub fn is_cliff(&self, pos: Pos) -> bool {
        pos.y == 0 && pos.x >= 1 && pos.x + 1 < self.width
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Fail with [`Error::OutOfBounds`] unless `pos` lies on the grid
    pub fn check(&self, pos: Pos) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Reward for landing on `pos`
    ///
    /// `pos` must lie on the grid.
    pub fn reward(&self, pos: Pos) -> f32 {
        if self.is_cliff(pos) {
            self.cliff_reward
        } else {
            self.step_reward
        }
    }

    /// The reward surface as `height` rows of `width` cells, rebuilt on every call
    pub fn rewards(&self) -> Vec<Vec<f32>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.reward(Pos::new(x, y)))
                    .collect()
            })
            .collect()
    }

    /// Draw the grid with the agent at `agent` marked as `@`
    pub fn render_agent(&self, agent: Pos) -> String {
        self.render_path(&[agent])
    }

    /// Draw the grid with the cells of `path` marked as `*` and its last cell as `@`
    pub fn render_path(&self, path: &[Pos]) -> String {
        let mut out = String::with_capacity((2 * self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos::new(x, y);
                let cell = if path.last() == Some(&pos) {
                    '@'
                } else if path.contains(&pos) {
                    '*'
                } else {
                    self.symbol(pos)
                };
                if x > 0 {
                    out.push(' ');
                }
                out.push(cell);
            }
            out.push('\n');
        }
        out
    }

    fn symbol(&self, pos: Pos) -> char {
        if pos == self.start() {
            'S'
        } else if pos == self.goal() {
            'G'
        } else if self.is_cliff(pos) {
            'C'
        } else {
            '.'
        }
    }
}

impl Default for GridMap {
    /// The classic 12x4 cliff walk
    fn default() -> Self {
        Self::new(12, 4)
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row = (0..self.width)
                .map(|x| self.symbol(Pos::new(x, y)).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Per-cell upward displacement applied after a move lands on a cell
#[derive(Clone, Debug, PartialEq)]
pub struct WindField {
    strength: Vec<Vec<u32>>,
}

impl WindField {
    /// Build a wind field from `height` rows of `width` strengths
    pub fn new(grid: &GridMap, strength: Vec<Vec<u32>>) -> Result<Self> {
        let cols = strength.first().map_or(0, Vec::len);
        if strength.len() != grid.height() || strength.iter().any(|row| row.len() != grid.width())
        {
            return Err(Error::WindShape {
                rows: strength.len(),
                cols,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(Self { strength })
    }

    /// A wind field that blows with the same strength down each column
    pub fn columns(grid: &GridMap, currents: &[u32]) -> Result<Self> {
        Self::new(grid, vec![currents.to_vec(); grid.height()])
    }

    /// Wind strength at `pos`, which must lie on the grid
    pub fn at(&self, pos: Pos) -> u32 {
        self.strength[pos.y][pos.x]
    }
}

/// Next cell after taking `action` from `state`
///
/// Moves are clamped to the grid. If a wind field is given and the wind at the landed
/// cell is positive, the agent is pushed that many rows towards `y = 0`, once.
pub fn move_agent(state: Pos, action: Action, grid: &GridMap, wind: Option<&WindField>) -> Pos {
    let mut next = state;
    match action {
        Action::Up => next.y = state.y.saturating_sub(1),
        Action::Right => next.x = (state.x + 1).min(grid.width() - 1),
        Action::Down => next.y = (state.y + 1).min(grid.height() - 1),
        Action::Left => next.x = state.x.saturating_sub(1),
    }

    if let Some(wind) = wind {
        let strength = wind.at(next);
        if strength > 0 {
            next.y = next.y.saturating_sub(strength as usize);
        }
    }

    next
}

/// The cliff-walking environment: a grid and an optional wind field
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliffWalking {
    grid: GridMap,
    wind: Option<WindField>,
}

impl CliffWalking {
    pub fn new(grid: GridMap) -> Self {
        Self { grid, wind: None }
    }

    /// Blow the agent around with `wind`, which must match the grid's shape
    pub fn with_wind(mut self, wind: WindField) -> Result<Self> {
        let expected = (self.grid.height(), self.grid.width());
        let actual = (wind.strength.len(), wind.strength.first().map_or(0, Vec::len));
        if expected != actual {
            return Err(Error::WindShape {
                rows: actual.0,
                cols: actual.1,
                width: expected.1,
                height: expected.0,
            });
        }
        self.wind = Some(wind);
        Ok(self)
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn wind(&self) -> Option<&WindField> {
        self.wind.as_ref()
    }

    /// Where `action` takes the agent from `state`, wind included
    ///
    /// Unlike [`Environment::step`] this moves the agent off the goal like any other cell.
    pub fn transition(&self, state: Pos, action: Action) -> Pos {
        move_agent(state, action, &self.grid, self.wind.as_ref())
    }
}

impl Environment for CliffWalking {
    type State = Pos;
    type Action = Action;

    fn actions(&self) -> &[Action] {
        Action::VARIANTS
    }

    fn start(&self) -> Pos {
        self.grid.start()
    }

    fn check(&self, state: &Pos) -> Result<()> {
        self.grid.check(*state)
    }

    fn is_terminal(&self, state: &Pos) -> bool {
        *state == self.grid.goal()
    }

    fn step(&self, state: Pos, action: Action) -> (Pos, f32) {
        if self.is_terminal(&state) {
            return (state, 0.0);
        }
        let next = self.transition(state, action);
        (next, self.grid.reward(next))
    }
}
