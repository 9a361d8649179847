use rand::Rng;

use crate::{
    assert_interval,
    decay::Decay,
    env::Environment,
    error::Result,
    exploration::EpsilonGreedy,
    gym::{Action, Pos},
    report::Report,
};

use super::{
    q_table::QTable,
    td::{self, UpdateMode},
};

/// Configuration for the [`TdAgent`]
///
/// Plain `f32` values are constant schedules.
pub struct TdAgentConfig<D: Decay = f32, L: Decay = f32> {
    pub mode: UpdateMode,
    pub exploration: EpsilonGreedy<D>,
    /// Learning rate schedule over episodes, must stay in `[0,1]`
    pub alpha: L,
    /// Cut an episode short after this many steps
    pub max_steps: Option<usize>,
}

impl Default for TdAgentConfig {
    fn default() -> Self {
        Self {
            mode: UpdateMode::Sarsa,
            exploration: EpsilonGreedy::new(0.1),
            alpha: 0.5,
            max_steps: Some(1000),
        }
    }
}

/// One step of an episode, enough to draw a frame of the agent's walk
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub state: Pos,
    pub action: Action,
    pub reward: f32,
    pub next_state: Pos,
}

/// Trajectory and summary of a single episode
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Episode {
    pub frames: Vec<Frame>,
    pub total_reward: f32,
    /// The step limit was hit before reaching the goal
    pub truncated: bool,
}

impl Episode {
    pub fn steps(&self) -> usize {
        self.frames.len()
    }
}

/// A tabular Sarsa / Q-learning agent for gridworlds such as
/// [`CliffWalking`](crate::gym::CliffWalking)
///
/// ### Generics
/// - `D` - The [`Decay`] schedule of epsilon over episodes
/// - `L` - The [`Decay`] schedule of the learning rate over episodes
/// - `R` - The random source behind every exploration decision; seed it for
///   reproducible runs
pub struct TdAgent<D: Decay, L: Decay, R: Rng> {
    q_table: QTable,
    exploration: EpsilonGreedy<D>,
    mode: UpdateMode,
    alpha: L,
    max_steps: Option<usize>,
    episode: u32,
    rng: R,
    pub report: Report,
}

impl<D: Decay, L: Decay, R: Rng> TdAgent<D, L, R> {
    /// Initialize an agent that learns into `q_table`
    ///
    /// **Panics** if the first `alpha` is not in the interval `[0,1]`
    pub fn new(config: TdAgentConfig<D, L>, q_table: QTable, rng: R) -> Self {
        let alpha = config.alpha.evaluate(0.0);
        assert_interval!(alpha, 0.0, 1.0);
        Self {
            q_table,
            exploration: config.exploration,
            mode: config.mode,
            alpha: config.alpha,
            max_steps: config.max_steps,
            episode: 0,
            rng,
            report: Report::new(vec!["reward", "steps"]),
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Number of episodes played so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Learning rate for episode `t`
    ///
    /// **Panics** if the schedule leaves the interval `[0,1]`
    pub fn alpha(&self, t: u32) -> f32 {
        let alpha = self.alpha.evaluate(t as f32);
        assert_interval!(alpha, 0.0, 1.0);
        alpha
    }

    /// Play one episode from the start cell, learning after every step
    pub fn go<E>(&mut self, env: &E) -> Result<Episode>
    where
        E: Environment<State = Pos, Action = Action>,
    {
        let epsilon = self.exploration.epsilon(self.episode);
        let alpha = self.alpha(self.episode);
        let mut state = env.start();
        let mut current = td::step(&self.q_table, epsilon, state, env, &mut self.rng)?;
        let mut episode = Episode::default();

        episode.truncated = loop {
            episode.frames.push(Frame {
                state,
                action: current.action,
                reward: current.reward,
                next_state: current.next_state,
            });
            episode.total_reward += current.reward;
            self.report.entry("steps").and_modify(|x| *x += 1.0);
            self.report
                .entry("reward")
                .and_modify(|x| *x += current.reward as f64);

            // the next action is chosen before the backup, so Sarsa learns from the move it makes
            let next = td::step(&self.q_table, epsilon, current.next_state, env, &mut self.rng)?;
            td::update(
                &mut self.q_table,
                current.action,
                state,
                alpha,
                current.reward,
                next.action,
                current.next_state,
                self.mode,
            )?;

            if env.is_terminal(&current.next_state) {
                break false;
            }
            if self.max_steps.is_some_and(|max| episode.steps() >= max) {
                break true;
            }

            state = current.next_state;
            current = next;
        };

        if episode.truncated {
            log::warn!(
                "{} episode {} truncated after {} steps",
                self.mode,
                self.episode,
                episode.steps()
            );
        } else {
            log::debug!(
                "{} episode {}: {} steps, return {} (epsilon {epsilon}, alpha {alpha})",
                self.mode,
                self.episode,
                episode.steps(),
                episode.total_reward
            );
        }

        self.episode += 1;
        Ok(episode)
    }
}
