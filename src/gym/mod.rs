pub mod cliff_walking;

pub use cliff_walking::{move_agent, Action, CliffWalking, GridMap, Pos, WindField};
