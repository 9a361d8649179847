//! Terminal animation of the agent walking the grid, with reward plots and a log view
//!
//! Training stays on the caller's thread. [`init`] spawns the [`App`] on its own thread
//! and hands back the sending half of the channel that feeds it.

use std::{
    io,
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::gym::GridMap;

mod app;
mod components;
mod tui;
mod util;

pub use app::{App, Update};

/// Delay between two animation frames when the caller has no preference
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Install the log collector and start the app on a new thread
///
/// ### Parameters
/// - `grid` - The grid the agent walks on
/// - `series` - Names of the values sent with each [`Update::Metrics`], one plot line
///   per name
/// - `episodes` - Total number of episodes, for the progress bar and the plot's x axis
/// - `frame_delay` - Pause after each drawn frame of the agent
pub fn init(
    grid: GridMap,
    series: &[&'static str],
    episodes: u32,
    frame_delay: Duration,
) -> (JoinHandle<io::Result<()>>, Sender<Update>) {
    // a second call keeps the logger that is already installed
    if tui_logger::init_logger(log::LevelFilter::Trace).is_ok() {
        tui_logger::set_default_level(log::LevelFilter::Debug);
    }

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(grid, series, episodes, frame_delay);
    let handle = thread::spawn(move || app.run(rx));

    (handle, tx)
}
