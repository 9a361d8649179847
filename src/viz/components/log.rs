use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::viz::util::event_keycode;

use super::Component;

/// Log records collected by `tui-logger`, with per-target filtering
pub struct Logs {
    state: TuiWidgetState,
}

impl Logs {
    pub fn new() -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(log::LevelFilter::Debug),
        }
    }
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        TuiLoggerSmartWidget::default()
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().dark_gray())
            .output_separator(' ')
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        let widget_event = match event_keycode(event) {
            Some(KeyCode::Char(' ')) => TuiWidgetEvent::SpaceKey,
            Some(KeyCode::Esc) => TuiWidgetEvent::EscapeKey,
            Some(KeyCode::PageUp) => TuiWidgetEvent::PrevPageKey,
            Some(KeyCode::PageDown) => TuiWidgetEvent::NextPageKey,
            Some(KeyCode::Up) => TuiWidgetEvent::UpKey,
            Some(KeyCode::Down) => TuiWidgetEvent::DownKey,
            Some(KeyCode::Left) => TuiWidgetEvent::LeftKey,
            Some(KeyCode::Right) => TuiWidgetEvent::RightKey,
            Some(KeyCode::Char('+')) => TuiWidgetEvent::PlusKey,
            Some(KeyCode::Char('-')) => TuiWidgetEvent::MinusKey,
            Some(KeyCode::Char('s')) => TuiWidgetEvent::HideKey,
            Some(KeyCode::Char('f')) => TuiWidgetEvent::FocusKey,
            _ => return false,
        };

        self.state.transition(widget_event);
        true
    }
}
