use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{
    env::Environment,
    error::{Error, Result},
    exploration::select_action,
    gym::{Action, Pos},
};

use super::q_table::QTable;

/// Which temporal-difference target an update bootstraps from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpdateMode {
    /// On-policy: the value of the action actually taken next
    #[default]
    Sarsa,
    /// Off-policy: the best value available in the next state
    QLearning,
}

impl FromStr for UpdateMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sarsa" => Ok(Self::Sarsa),
            "qlearning" | "q-learning" | "q_learning" => Ok(Self::QLearning),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sarsa => f.write_str("Sarsa"),
            Self::QLearning => f.write_str("Qlearning"),
        }
    }
}

/// Outcome of a single environment step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// The action chosen by the behavior policy
    pub action: Action,
    pub next_state: Pos,
    pub reward: f32,
    /// Position of `action` in the value table's action axis
    pub action_index: usize,
}

/// Choose an action at `state` and apply it to the environment
///
/// The action is always drawn first, so randomness is consumed even at the goal. The
/// goal loops back onto itself with a reward of exactly 0.
pub fn step<E, R>(q: &QTable, epsilon: f32, state: Pos, env: &E, rng: &mut R) -> Result<Transition>
where
    E: Environment<State = Pos, Action = Action>,
    R: Rng + ?Sized,
{
    env.check(&state)?;
    q.check(state)?;

    let action = select_action(q, env.actions(), state, epsilon, rng);
    let (next_state, reward) = env.step(state, action);

    log::trace!("{state} --{action}--> {next_state} ({reward})");

    Ok(Transition {
        action,
        next_state,
        reward,
        action_index: action.index(),
    })
}

/// Back up the estimate of taking `action` in `state`
///
/// - Sarsa: `Q[a,s] <- (1-α)Q[a,s] + α(r + Q[a',s'])`
/// - Q-learning: `Q[a,s] <- (1-α)Q[a,s] + α(r + max_b Q[b,s'])`
///
/// Both states are checked before anything is written, so the table is untouched
/// whenever an error is returned.
#[allow(clippy::too_many_arguments)]
pub fn update(
    q: &mut QTable,
    action: Action,
    state: Pos,
    alpha: f32,
    reward: f32,
    next_action: Action,
    next_state: Pos,
    mode: UpdateMode,
) -> Result<()> {
    q.check(state)?;
    q.check(next_state)?;

    let target = match mode {
        UpdateMode::Sarsa => reward + q[(next_action, next_state)],
        UpdateMode::QLearning => reward + q.max_at(next_state),
    };
    let entry = &mut q[(action, state)];
    *entry = (1.0 - alpha) * *entry + alpha * target;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use strum::IntoEnumIterator;

    use super::*;
    use crate::gym::{CliffWalking, GridMap};

    fn backup(q: &mut QTable, s: Pos, s2: Pos, mode: UpdateMode) -> Result<()> {
        update(q, Action::Right, s, 0.5, 3.0, Action::Down, s2, mode)
    }

    fn table() -> (QTable, Pos, Pos) {
        let grid = GridMap::new(4, 3);
        let mut q = QTable::zeros(&grid);
        let (s, s2) = (Pos::new(1, 1), Pos::new(2, 1));
        q[(Action::Right, s)] = 2.0;
        q[(Action::Down, s2)] = 4.0;
        q[(Action::Up, s2)] = 5.0;
        (q, s, s2)
    }

    #[test]
    fn sarsa_bootstraps_from_next_action() {
        let (mut q, s, s2) = table();
        backup(&mut q, s, s2, UpdateMode::Sarsa).unwrap();
        assert_eq!(q[(Action::Right, s)], 4.5);
    }

    #[test]
    fn q_learning_bootstraps_from_max() {
        let (mut q, s, s2) = table();
        backup(&mut q, s, s2, UpdateMode::QLearning).unwrap();
        assert_eq!(q[(Action::Right, s)], 5.0);
    }

    #[test]
    fn update_touches_one_entry() {
        let (mut q, s, s2) = table();
        let before = q.clone();
        backup(&mut q, s, s2, UpdateMode::Sarsa).unwrap();
        let changed = before
            .as_slice()
            .iter()
            .zip(q.as_slice())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let (mut q, s, s2) = table();
        let before = q.clone();
        let res = "bogus"
            .parse::<UpdateMode>()
            .and_then(|mode| backup(&mut q, s, s2, mode));
        assert_eq!(res, Err(Error::InvalidMode("bogus".into())));
        assert_eq!(q, before, "Table unmodified");

        let res = "q-learning"
            .parse::<UpdateMode>()
            .and_then(|mode| backup(&mut q, s, s2, mode));
        assert_eq!(res, Ok(()));
        assert_eq!(q[(Action::Right, s)], 5.0, "A known name does reach the table");
    }

    #[test]
    fn mode_names() {
        assert_eq!("Sarsa".parse(), Ok(UpdateMode::Sarsa));
        assert_eq!("Qlearning".parse(), Ok(UpdateMode::QLearning));
        assert_eq!("q-learning".parse(), Ok(UpdateMode::QLearning));
        assert_eq!(UpdateMode::QLearning.to_string().parse(), Ok(UpdateMode::QLearning));
    }

    #[test]
    fn update_rejects_outside_states() {
        let (mut q, s, _) = table();
        let before = q.clone();
        let outside = Pos::new(9, 9);
        let res = backup(&mut q, s, outside, UpdateMode::Sarsa);
        assert!(matches!(res, Err(Error::OutOfBounds { .. })));
        assert_eq!(q, before, "Table unmodified");
    }

    #[test]
    fn goal_loops_with_zero_reward() {
        let env = CliffWalking::new(GridMap::new(5, 3));
        let q = QTable::filled(env.grid(), -3.0);
        let goal = env.grid().goal();
        let mut rng = StdRng::seed_from_u64(42);
        for epsilon in [0.0, 0.3, 1.0] {
            for _ in 0..50 {
                let t = step(&q, epsilon, goal, &env, &mut rng).unwrap();
                assert_eq!(t.next_state, goal, "Goal self-loop");
                assert_eq!(t.reward, 0.0, "Zero reward at goal");
            }
        }
    }

    #[test]
    fn leaving_the_cliff_costs_one_step() {
        let env = CliffWalking::new(GridMap::new(4, 3));
        let mut q = QTable::zeros(env.grid());
        let state = Pos::new(1, 0);
        q[(Action::Down, state)] = 1.0;
        let mut rng = StdRng::seed_from_u64(1);

        let t = step(&q, 0.0, state, &env, &mut rng).unwrap();
        assert_eq!(t.action, Action::Down);
        assert_eq!(t.action_index, 2);
        assert_eq!(t.next_state, Pos::new(1, 1));
        assert_eq!(t.reward, -1.0);
    }

    #[test]
    fn stepping_into_the_cliff() {
        let env = CliffWalking::new(GridMap::new(4, 3));
        let mut q = QTable::zeros(env.grid());
        q[(Action::Right, Pos::new(0, 0))] = 1.0;
        let mut rng = StdRng::seed_from_u64(5);

        let t = step(&q, 0.0, Pos::new(0, 0), &env, &mut rng).unwrap();
        assert_eq!(t.next_state, Pos::new(1, 0));
        assert_eq!(t.reward, -100.0);
    }

    #[test]
    fn step_index_matches_action() {
        let env = CliffWalking::new(GridMap::default());
        let q = QTable::zeros(env.grid());
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let t = step(&q, 1.0, Pos::new(3, 2), &env, &mut rng).unwrap();
            assert_eq!(Action::from_index(t.action_index), Ok(t.action));
            assert!(Action::iter().any(|a| a == t.action));
        }
    }

    #[test]
    fn step_rejects_outside_state() {
        let env = CliffWalking::new(GridMap::new(4, 3));
        let q = QTable::zeros(env.grid());
        let mut rng = StdRng::seed_from_u64(0);
        let res = step(&q, 0.1, Pos::new(4, 0), &env, &mut rng);
        assert!(matches!(res, Err(Error::OutOfBounds { .. })));
    }
}
