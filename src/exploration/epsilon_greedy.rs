use rand::{seq::SliceRandom, Rng};
use crate::{
    algo::tabular::q_table::QTable,
    assert_interval,
    decay::Decay,
    gym::{Action, Pos},
    util::argmax_all,
};

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Epsilon for episode `t`
    ///
    /// **Panics** if the schedule leaves the interval `[0,1]`
    pub fn epsilon(&self, t: u32) -> f32 {
        let epsilon = self.epsilon.evaluate(t as f32);
        assert_interval!(epsilon, 0.0, 1.0);
        epsilon
    }

    /// Invoke epsilon greedy policy for episode `t`
    pub fn choose<R: Rng + ?Sized>(&self, t: u32, rng: &mut R) -> Choice {
        choose(self.epsilon(t), rng)
    }
}

fn choose<R: Rng + ?Sized>(epsilon: f32, rng: &mut R) -> Choice {
    if rng.gen::<f32>() > epsilon {
        Choice::Exploit
    } else {
        Choice::Explore
    }
}

/// Pick one of `actions` at `state` with probability `epsilon` of acting at random
///
/// Greedy picks are drawn uniformly from every action sharing the maximum estimate,
/// so a fresh table full of zeros does not bias the agent towards the first action.
///
/// **Panics** if `actions` is empty
pub fn select_action<R: Rng + ?Sized>(
    q: &QTable,
    actions: &[Action],
    state: Pos,
    epsilon: f32,
    rng: &mut R,
) -> Action {
    let candidates: Vec<Action> = match choose(epsilon, rng) {
        Choice::Exploit => {
            let values = q.values_at(state);
            let estimates = actions.iter().map(|a| values[a.index()]).collect::<Vec<_>>();
            argmax_all(&estimates)
                .into_iter()
                .map(|i| actions[i])
                .collect()
        }
        Choice::Explore => actions.to_vec(),
    };
    *candidates
        .choose(rng)
        .expect("There is always at least one action available")
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::distribution::{ChiSquared, ContinuousCDF};

    use strum::VariantArray;

    use super::*;
    use crate::{decay, gym::GridMap};

    fn counts(q: &QTable, state: Pos, epsilon: f32, trials: usize, seed: u64) -> [usize; 4] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = [0; 4];
        for _ in 0..trials {
            let action = select_action(q, Action::VARIANTS, state, epsilon, &mut rng);
            counts[action.index()] += 1;
        }
        counts
    }

    fn chi_square_uniform(counts: &[usize]) -> f64 {
        let total = counts.iter().sum::<usize>() as f64;
        let expected = total / counts.len() as f64;
        counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum()
    }

    #[test]
    fn greedy_picks_unique_maximum() {
        let grid = GridMap::new(4, 3);
        let mut q = QTable::zeros(&grid);
        let state = Pos::new(2, 1);
        q[(Action::Down, state)] = 1.0;

        let counts = counts(&q, state, 0.0, 1000, 7);
        assert_eq!(counts[Action::Down.index()], 1000, "Always the maximizer");
    }

    #[test]
    fn epsilon_one_is_uniform() {
        let grid = GridMap::new(4, 3);
        let mut q = QTable::zeros(&grid);
        let state = Pos::new(1, 1);
        q[(Action::Right, state)] = 10.0;

        let counts = counts(&q, state, 1.0, 8000, 11);
        let critical = ChiSquared::new(3.0).unwrap().inverse_cdf(0.999);
        let stat = chi_square_uniform(&counts);
        assert!(
            stat < critical,
            "Chi-square {stat} over {critical} for counts {counts:?}"
        );
    }

    #[test]
    fn greedy_ties_are_broken_uniformly() {
        let grid = GridMap::new(4, 3);
        let mut q = QTable::filled(&grid, -1.0);
        let state = Pos::new(0, 2);
        q[(Action::Up, state)] = 3.0;
        q[(Action::Left, state)] = 3.0;

        let counts = counts(&q, state, 0.0, 4000, 3);
        assert_eq!(
            counts[Action::Right.index()] + counts[Action::Down.index()],
            0,
            "Only maximizers are picked"
        );
        let tied = [counts[Action::Up.index()], counts[Action::Left.index()]];
        let critical = ChiSquared::new(1.0).unwrap().inverse_cdf(0.999);
        assert!(
            chi_square_uniform(&tied) < critical,
            "Tied actions picked evenly: {tied:?}"
        );
    }

    #[test]
    fn only_offered_actions_are_picked() {
        let grid = GridMap::new(4, 3);
        let mut q = QTable::zeros(&grid);
        let state = Pos::new(1, 1);
        q[(Action::Up, state)] = 5.0;
        q[(Action::Left, state)] = 1.0;
        let offered = [Action::Down, Action::Left];

        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            let greedy = select_action(&q, &offered, state, 0.0, &mut rng);
            assert_eq!(greedy, Action::Left, "Best of the offered actions");
            let any = select_action(&q, &offered, state, 1.0, &mut rng);
            assert!(offered.contains(&any), "Explores within the offer, got {any}");
        }
    }

    #[test]
    fn choose_follows_schedule() {
        let mut rng = StdRng::seed_from_u64(0);
        let always = EpsilonGreedy::new(1.0_f32);
        let never = EpsilonGreedy::new(0.0_f32);
        for t in 0..100 {
            assert_eq!(always.choose(t, &mut rng), Choice::Explore);
        }
        let exploits = (0..100)
            .filter(|&t| never.choose(t, &mut rng) == Choice::Exploit)
            .count();
        assert_eq!(exploits, 100);
    }

    #[test]
    fn epsilon_decays_with_episode() {
        let policy = EpsilonGreedy::new(decay::Linear::new(0.1, 1.0, 0.1).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert_eq!(policy.epsilon(100), 0.1);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `epsilon`")]
    fn epsilon_out_of_range_panics() {
        EpsilonGreedy::new(1.5_f32).epsilon(0);
    }
}
