use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::models::category;
use crate::report::select::CategoryFilter;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let active_code = match &app.category_filter {
        CategoryFilter::All => None,
        CategoryFilter::Code(code) => Some(code.as_str()),
    };

    let items: Vec<ListItem> = category::all()
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let is_active = active_code == Some(cat.code);
            let marker = if is_active { "● " } else { "  " };
            let style = if i == app.category_index {
                theme::selected_style()
            } else if is_active {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(Span::styled(
                format!("{marker}{:<16} {}", cat.code, cat.label),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Categories ({}) ", category::all().len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}
