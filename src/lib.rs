//! Tabular Sarsa and Q-learning on the cliff-walking gridworld
//!
//! The agent starts in one corner of the cliff row and has to reach the other corner.
//! Every cell in between is a cliff with a large penalty. Sarsa learns the safe route
//! away from the edge; Q-learning learns the short route along it.
//!
//! ```
//! use cliffwalk::{
//!     algo::tabular::{QTable, TdAgent, TdAgentConfig, UpdateMode},
//!     gym::CliffWalking,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let env = CliffWalking::default();
//! let config = TdAgentConfig {
//!     mode: UpdateMode::QLearning,
//!     ..Default::default()
//! };
//! let mut agent = TdAgent::new(config, QTable::zeros(env.grid()), StdRng::seed_from_u64(0));
//! let episode = agent.go(&env)?;
//! assert!(episode.steps() > 0);
//! # Ok::<(), cliffwalk::Error>(())
//! ```

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// The environment abstraction agents learn from
pub mod env;

/// Exploration policies
pub mod exploration;

/// The cliff-walking environment
pub mod gym;

/// Per-episode metrics
pub mod report;

/// Episode selection for rendering
pub mod schedule;

/// Terminal visualization
#[cfg(feature = "viz")]
pub mod viz;

mod error;
mod util;

pub use error::{Error, Result};
