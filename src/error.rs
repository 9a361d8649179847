use crate::gym::cliff_walking::Pos;

/// Errors surfaced by the gridworld and the tabular learners
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An update mode name that is neither Sarsa nor Q-learning
    #[error("the algorithm must be one of 'Qlearning' or 'Sarsa', got '{0}'")]
    InvalidMode(String),

    /// A state that does not lie on the grid
    #[error("state {pos:?} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: usize, height: usize },

    /// An action index outside the fixed action ordering
    #[error("no action at index {0}")]
    UnknownAction(usize),

    /// A wind field whose shape differs from the grid it is applied to
    #[error("wind field is {rows}x{cols} but the grid is {height}x{width}")]
    WindShape {
        rows: usize,
        cols: usize,
        width: usize,
        height: usize,
    },

    /// Invalid parameters for a decay schedule
    #[error("invalid decay parameters: {0}")]
    Decay(String),
}

pub type Result<T> = std::result::Result<T, Error>;
