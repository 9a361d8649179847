use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::{
    gym::{Action, GridMap, Pos},
    viz::util::centered,
};

const CLIFF: Color = Color::LightRed;
const GROUND: Color = Color::Gray;
const MARKER: &str = "●";

/// Where the agent is, and how it got there
#[derive(Clone, Copy, Debug)]
pub struct AgentFrame {
    pub label: &'static str,
    pub episode: u32,
    pub pos: Pos,
    pub action: Option<Action>,
    pub reward: f32,
}

/// The grid with its cliff cells, start and end labels, and the agent marker
pub struct GridView {
    grid: GridMap,
    frame: Option<AgentFrame>,
}

impl GridView {
    pub fn new(grid: GridMap) -> Self {
        Self { grid, frame: None }
    }

    pub fn show(&mut self, frame: AgentFrame) {
        self.frame = Some(frame);
    }

    fn status(&self) -> Line<'static> {
        let Some(frame) = self.frame else {
            return Line::from("Waiting for the first rendered episode").dark_gray();
        };
        let moved = match frame.action {
            Some(action) => format!(" after {action}"),
            None => String::new(),
        };
        Line::from(vec![
            Span::from(frame.label).light_green().bold(),
            Span::raw(format!(
                "  episode {}  {}{moved}  reward {}",
                frame.episode, frame.pos, frame.reward
            )),
        ])
    }

    fn render_cells(&self, area: Rect, buf: &mut Buffer) {
        let (w, h) = (self.grid.width() as u16, self.grid.height() as u16);
        let (cell_w, cell_h) = (area.width / w.max(1), area.height / h.max(1));

        if cell_w < 2 || cell_h < 1 {
            let text = match self.frame {
                Some(frame) => self.grid.render_agent(frame.pos),
                None => self.grid.to_string(),
            };
            Paragraph::new(text).render(area, buf);
            return;
        }

        // one column and row of each cell are left blank as gridlines
        let inner_w = cell_w - 1;
        let inner_h = if cell_h > 1 { cell_h - 1 } else { cell_h };

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let pos = Pos::new(x, y);
                let cell = Rect::new(
                    area.x + x as u16 * cell_w,
                    area.y + y as u16 * cell_h,
                    inner_w,
                    inner_h,
                );
                let bg = if self.grid.is_cliff(pos) { CLIFF } else { GROUND };
                buf.set_style(cell, Style::default().bg(bg));

                let label = if pos == self.grid.start() {
                    Some(("START", "S"))
                } else if pos == self.grid.goal() {
                    Some(("END", "E"))
                } else {
                    None
                };
                if let Some((long, short)) = label {
                    let text = if long.width() as u16 <= inner_w { long } else { short };
                    let at = centered(cell, text.width() as u16, 1);
                    buf.set_string(at.x, at.y, text, Style::default().fg(Color::Black).bg(bg));
                }

                if self.frame.is_some_and(|f| f.pos == pos) {
                    let at = centered(cell, MARKER.width() as u16, 1);
                    buf.set_string(
                        at.x,
                        at.y,
                        MARKER,
                        Style::default().fg(Color::Black).bg(bg).bold(),
                    );
                }
            }
        }
    }
}

impl WidgetRef for GridView {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Cliff walk")
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let [cells_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        self.render_cells(cells_area, buf);
        Paragraph::new(self.status()).render(status_area, buf);
    }
}
