pub mod grid;
pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::Event;
use ratatui::widgets::WidgetRef;

pub use grid::{AgentFrame, GridView};
pub use log::Logs;
pub use plot::RewardPlot;

pub trait Component: WidgetRef {
    /// React to a terminal event, returning whether it was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
