use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::viz::util::event_keycode;

use super::Component;

const COLORS: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Magenta, Color::Green];

/// Return per episode for each series, drawn as lines on one chart
pub struct RewardPlot {
    names: Vec<&'static str>,
    data: Vec<Vec<(f64, f64)>>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    /// Clip the y axis at this value so early cliff falls do not flatten the curves
    floor: Option<f64>,
}

impl RewardPlot {
    pub fn new(names: Vec<&'static str>, episodes: u32) -> Self {
        let data = vec![Vec::new(); names.len()];
        Self {
            names,
            data,
            x_bounds: [0.0, episodes.max(1) as f64],
            y_bounds: [f64::MAX, f64::MIN],
            floor: Some(-100.0),
        }
    }

    pub fn update(&mut self, episode: u32, values: &[f64]) {
        for (series, &value) in self.data.iter_mut().zip(values) {
            series.push((episode as f64, value));
            self.y_bounds[0] = self.y_bounds[0].min(value);
            self.y_bounds[1] = self.y_bounds[1].max(value);
        }
        self.x_bounds[1] = self.x_bounds[1].max(episode as f64);
    }

    fn visible_y_bounds(&self) -> [f64; 2] {
        let [mut lo, hi] = self.y_bounds;
        if lo > hi {
            return [-1.0, 0.0];
        }
        if let Some(floor) = self.floor {
            lo = lo.max(floor.min(hi - 1.0));
        }
        [lo, hi]
    }
}

fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::from(format!("{v:.0}")).bold())
        .collect()
}

impl WidgetRef for RewardPlot {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let y_bounds = self.visible_y_bounds();
        let datasets = self
            .names
            .iter()
            .zip(&self.data)
            .zip(COLORS.iter().cycle())
            .map(|((name, points), &color)| {
                Dataset::default()
                    .name(*name)
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color))
                    .data(points)
            })
            .collect();

        let title = match self.floor {
            Some(floor) => format!("Return per episode (clipped at {floor:.0}, c to toggle)"),
            None => String::from("Return per episode (c to clip)"),
        };

        Chart::new(datasets)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .padding(Padding::uniform(1)),
            )
            .x_axis(
                Axis::default()
                    .title("Episode")
                    .dark_gray()
                    .labels(labels(self.x_bounds))
                    .bounds(self.x_bounds),
            )
            .y_axis(
                Axis::default()
                    .title("Return")
                    .dark_gray()
                    .labels(labels(y_bounds))
                    .bounds(y_bounds),
            )
            .legend_position(Some(LegendPosition::BottomRight))
            .render(area, buf);
    }
}

impl Component for RewardPlot {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match event_keycode(event) {
            Some(KeyCode::Char('c')) => {
                self.floor = match self.floor {
                    Some(_) => None,
                    None => Some(-100.0),
                };
                true
            }
            _ => false,
        }
    }
}
