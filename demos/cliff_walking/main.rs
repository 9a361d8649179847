use std::{
    error::Error,
    fs::{self, File},
    path::Path,
};

use cliffwalk::{
    algo::tabular::{Episode, QTable, TdAgent, TdAgentConfig, UpdateMode},
    decay::{self, Decay},
    exploration::EpsilonGreedy,
    gym::{CliffWalking, GridMap},
    schedule::{EpisodeSchedule, RenderSelect},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const NUM_EPISODES: u32 = 500;
const EPSILON: f32 = 0.1;
const ALPHA: f32 = 0.5;
const PLOT_INTERVAL: u32 = 100;

fn show(env: &CliffWalking, label: &str, i: u32, episode: &Episode) {
    let mut path = vec![env.grid().start()];
    path.extend(episode.frames.iter().map(|f| f.next_state));
    println!(
        "{label} episode {i}: {} steps, return {}{}",
        episode.steps(),
        episode.total_reward,
        if episode.truncated { " (truncated)" } else { "" }
    );
    println!("{}", env.grid().render_path(&path));
}

/// Train `agent` for every episode, logging each one to the CSV and printing the
/// scheduled ones
fn run<D: Decay, L: Decay, R: Rng>(
    label: &str,
    mut agent: TdAgent<D, L, R>,
    env: &CliffWalking,
    wtr: &mut csv::Writer<File>,
) -> Result<QTable, Box<dyn Error>> {
    let schedule = EpisodeSchedule::demo(PLOT_INTERVAL, true);
    for i in 0..NUM_EPISODES {
        let episode = agent.go(env)?;
        let report = agent.report.take();
        wtr.write_record([
            i.to_string(),
            label.to_string(),
            report["steps"].to_string(),
            report["reward"].to_string(),
        ])?;

        if schedule.select(i) {
            show(env, label, i, &episode);
        }
    }
    Ok(agent.into_q_table())
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/cliff_walking");

    let env = CliffWalking::new(GridMap::default());
    fs::create_dir_all(path.join("out"))?;
    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    wtr.write_record(["episode", "agent", "steps", "reward"])?;

    let mut routes = Vec::new();
    for (mode, seed) in [(UpdateMode::Sarsa, 1), (UpdateMode::QLearning, 2)] {
        let config = TdAgentConfig {
            mode,
            exploration: EpsilonGreedy::new(EPSILON),
            alpha: ALPHA,
            ..Default::default()
        };
        let agent = TdAgent::new(config, QTable::zeros(env.grid()), StdRng::seed_from_u64(seed));
        let label = mode.to_string();
        routes.push((run(&label, agent, &env, &mut wtr)?, label));
    }

    // with exploration fading out, Sarsa's behavior policy turns greedy and its
    // route drifts back towards the edge
    let config = TdAgentConfig {
        mode: UpdateMode::Sarsa,
        exploration: EpsilonGreedy::new(decay::Exponential::new(0.01, 0.5, 0.01)?),
        alpha: decay::InverseTime::new(0.01, ALPHA, 0.1)?,
        max_steps: Some(1000),
    };
    let agent = TdAgent::new(config, QTable::zeros(env.grid()), StdRng::seed_from_u64(3));
    let label = "Sarsa (decaying)".to_string();
    routes.push((run(&label, agent, &env, &mut wtr)?, label));

    wtr.flush()?;

    for (q, label) in &routes {
        let route = q.greedy_path(&env, 100);
        println!("{label} greedy route ({} moves):", route.len() - 1);
        println!("{}", env.grid().render_path(&route));
    }

    Ok(())
}
