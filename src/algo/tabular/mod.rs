pub mod agent;
pub mod q_table;
pub mod td;

pub use agent::{Episode, Frame, TdAgent, TdAgentConfig};
pub use q_table::QTable;
pub use td::{step, update, Transition, UpdateMode};
