use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Palette;

/// Fixed header listing the page's navigation links
pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let mut spans = vec![Span::styled(" ", Style::default().bg(Palette::BG2))];
        let mut used = 1usize;

        for (idx, link) in app.page.nav.iter().enumerate() {
            let text = format!(" {} {} ", idx + 1, link.label);
            let width = text.width();
            if used + width > area.width as usize {
                spans.push(Span::styled("…", Style::default().fg(Palette::GREY0).bg(Palette::BG2)));
                break;
            }
            used += width;

            let style = if idx == app.selected_link {
                Style::default()
                    .fg(Palette::BG0)
                    .bg(Palette::YELLOW)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Palette::FG0).bg(Palette::BG2)
            };
            spans.push(Span::styled(text, style));
        }

        let padding = (area.width as usize).saturating_sub(used);
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(Palette::BG2)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
