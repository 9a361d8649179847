use crate::error::Result;

/// A finite, episodic Markov decision process
///
/// States are plain values owned by the caller: the environment holds only the dynamics,
/// so the same environment can be shared by any number of agents.
pub trait Environment {
    /// A representation of a position of the agent in the environment
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// The actions available in every state
    ///
    /// The returned slice should never be empty.
    fn actions(&self) -> &[Self::Action];

    /// The state every episode begins in
    fn start(&self) -> Self::State;

    /// Fail unless `state` belongs to this environment
    fn check(&self, state: &Self::State) -> Result<()>;

    /// Determine if the state ends an episode
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Take `action` from `state`
    ///
    /// A terminal state loops back onto itself with a reward of 0.
    ///
    /// **Returns** `(next_state, reward)`
    fn step(&self, state: Self::State, action: Self::Action) -> (Self::State, f32);
}
