use std::error::Error;

use cliffwalk::{
    algo::tabular::{Episode, QTable, TdAgent, TdAgentConfig, UpdateMode},
    gym::CliffWalking,
    schedule::{EpisodeSchedule, RenderSelect},
    viz,
};
use rand::{rngs::StdRng, SeedableRng};

const NUM_EPISODES: u32 = 500;
const PLOT_INTERVAL: u32 = 100;

fn frames<'a>(
    label: &'static str,
    i: u32,
    episode: &'a Episode,
) -> impl Iterator<Item = viz::Update> + 'a {
    let start = episode.frames.first().map(|f| viz::Update::Frame {
        label,
        episode: i,
        pos: f.state,
        action: None,
        reward: 0.0,
    });
    start.into_iter().chain(episode.frames.iter().map(move |f| viz::Update::Frame {
        label,
        episode: i,
        pos: f.next_state,
        action: Some(f.action),
        reward: f.reward,
    }))
}

fn main() -> Result<(), Box<dyn Error>> {
    let env = CliffWalking::default();
    let agents = [UpdateMode::Sarsa, UpdateMode::QLearning].map(|mode| {
        let config = TdAgentConfig {
            mode,
            ..Default::default()
        };
        TdAgent::new(config, QTable::zeros(env.grid()), StdRng::from_entropy())
    });
    let [mut sarsa, mut q_learning] = agents;
    let schedule = EpisodeSchedule::demo(PLOT_INTERVAL, true);

    let (handle, tx) = viz::init(
        env.grid().clone(),
        &["Sarsa", "Q-learning"],
        NUM_EPISODES,
        viz::DEFAULT_FRAME_DELAY,
    );

    for i in 0..NUM_EPISODES {
        let sarsa_episode = sarsa.go(&env)?;
        let q_episode = q_learning.go(&env)?;

        if schedule.select(i) {
            log::info!("Replaying episode {i}");
            let replay = frames("Sarsa", i, &sarsa_episode);
            for update in replay.chain(frames("Q-learning", i, &q_episode)) {
                tx.send(update)?;
            }
        }

        tx.send(viz::Update::Metrics {
            episode: i,
            data: vec![
                sarsa_episode.total_reward as f64,
                q_episode.total_reward as f64,
            ],
        })?;
    }

    drop(tx);
    let _ = handle.join();

    Ok(())
}
