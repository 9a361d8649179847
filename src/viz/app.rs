use std::{
    collections::VecDeque,
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::gym::{Action, GridMap, Pos};

use super::{
    components::{help::render_help, AgentFrame, Component, GridView, Logs, RewardPlot},
    tui,
    util::event_keycode,
};

const TABS: [&str; 3] = ["Grid", "Plots", "Logs"];

#[derive(Default)]
enum State {
    #[default]
    Train,
    Quit,
}

/// Messages from the training loop to the app
pub enum Update {
    /// The agent moved; frames are drawn one at a time, `frame_delay` apart
    Frame {
        label: &'static str,
        episode: u32,
        pos: Pos,
        action: Option<Action>,
        reward: f32,
    },
    /// Per-episode values, one for each plotted series
    Metrics { episode: u32, data: Vec<f64> },
}

/// The root TUI component which holds the app state and runs the render loop
pub struct App {
    state: State,
    episode: u32,
    total_episodes: u32,
    frame_delay: Duration,
    selected_tab: usize,
    show_help: bool,
    pending: VecDeque<AgentFrame>,
    grid: GridView,
    plot: RewardPlot,
    logs: Logs,
}

impl App {
    pub fn new(
        grid: GridMap,
        series: &[&'static str],
        episodes: u32,
        frame_delay: Duration,
    ) -> Self {
        Self {
            state: State::default(),
            episode: 0,
            total_episodes: episodes,
            frame_delay,
            selected_tab: 0,
            show_help: false,
            pending: VecDeque::new(),
            grid: GridView::new(grid),
            plot: RewardPlot::new(series.to_vec(), episodes),
            logs: Logs::new(),
        }
    }

    /// Pull everything the training loop has sent so far
    ///
    /// Returns `false` once the sender is gone and no frames are left to draw.
    fn receive(&mut self, rx: &Receiver<Update>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(Update::Frame {
                    label,
                    episode,
                    pos,
                    action,
                    reward,
                }) => self.pending.push_back(AgentFrame {
                    label,
                    episode,
                    pos,
                    action,
                    reward,
                }),
                Ok(Update::Metrics { episode, data }) => {
                    self.episode = episode + 1;
                    self.plot.update(episode, &data);
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return !self.pending.is_empty(),
            }
        }
    }

    /// Initialize the terminal and run the main loop
    ///
    /// Restores the terminal on exit. The app keeps running after training is done
    /// until the user quits.
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut terminal = tui::init()?;
        let mut connected = true;

        while let State::Train = self.state {
            if connected && !self.receive(&rx) {
                connected = false;
                log::info!("Training finished, press q to quit");
            }

            let drew_frame = match self.pending.pop_front() {
                Some(frame) => {
                    self.grid.show(frame);
                    true
                }
                None => false,
            };

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            let timeout = if drew_frame {
                self.frame_delay
            } else {
                Duration::from_millis(16)
            };
            if event::poll(timeout)? {
                self.handle_event(&event::read()?);
            }
        }

        tui::restore()
    }

    fn handle_event(&mut self, event: &event::Event) {
        let handled = match self.selected_tab {
            1 => self.plot.handle_ui_event(event),
            2 => self.logs.handle_ui_event(event),
            _ => false,
        };
        if handled {
            return;
        }

        match event_keycode(event) {
            Some(KeyCode::Char('q')) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {}
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.grid.render_ref(main_area, buf),
            1 => self.plot.render_ref(main_area, buf),
            2 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        let ratio = if self.total_episodes == 0 {
            1.0
        } else {
            (self.episode as f64 / self.total_episodes as f64).min(1.0)
        };
        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Progress"),
            )
            .gauge_style(Color::Cyan)
            .ratio(ratio)
            .render(progress_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
