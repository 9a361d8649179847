use ratatui::{prelude::*, widgets::*};

use crate::viz::util::centered;

fn key(key: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(format!("{key:^7}")).light_cyan().bold(),
        Span::raw(format!(" : {what}")),
    ])
}

/// Popup listing the keys of the app and of the selected tab
pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let mut lines = vec![
        key("q", "Quit"),
        key("h", "Toggle this help"),
        key("Tab", "Switch tabs"),
    ];

    match selected_tab {
        0 => lines.push(key("", "Episodes picked by the schedule are replayed step by step")),
        1 => lines.push(key("c", "Toggle clipping of the return axis")),
        2 => lines.extend([
            key("s", "Show/hide the target selector"),
            key("f", "Focus on the selected target"),
            key("⬆ / ⬇", "Select log target"),
            key("⬅ / ➡", "Show fewer/more levels"),
            key("- / +", "Capture fewer/more levels"),
            key("PgUp", "Page mode, scroll up"),
            key("PgDn", "Page mode, scroll down"),
            key("Esc", "Leave page mode"),
            key("Space", "Hide targets that are switched off"),
        ]),
        _ => {}
    }

    let popup = centered(area, 72, lines.len() as u16 + 4);
    Clear.render(popup, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}
