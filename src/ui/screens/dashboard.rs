use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::report::week_start;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEK_LABELS: [&str; 5] = ["W1", "W2", "W3", "W4", "W5"];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Weekly chart
            Constraint::Min(8),    // Monthly chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_weekly_chart(f, chunks[1], app);
    render_monthly_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Today",
        app.daily.income,
        app.daily.expense,
    );
    render_card(
        f,
        cards[1],
        "This Week",
        app.weekly.income_sum(),
        app.weekly.expense_sum(),
    );
    render_card(
        f,
        cards[2],
        "This Month",
        app.monthly.income_sum(),
        app.monthly.expense_sum(),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, income: Decimal, expense: Decimal) {
    let balance = income - expense;
    let balance_style = if balance >= Decimal::ZERO {
        theme::income_style()
    } else {
        theme::expense_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Income  ", theme::dim_style()),
            Span::styled(format_amount(income), theme::income_style()),
        ]),
        Line::from(vec![
            Span::styled("Expense ", theme::dim_style()),
            Span::styled(format_amount(expense), theme::expense_style()),
        ]),
        Line::from(vec![
            Span::styled("Balance ", theme::dim_style()),
            Span::styled(
                format!(
                    "{}{}",
                    if balance < Decimal::ZERO { "-" } else { "" },
                    format_amount(balance)
                ),
                balance_style.add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn bucket_bars<'a>(income: Decimal, expense: Decimal) -> Vec<Bar<'a>> {
    vec![
        Bar::default()
            .value(income.to_u64().unwrap_or(0))
            .style(theme::income_style()),
        Bar::default()
            .value(expense.to_u64().unwrap_or(0))
            .style(theme::expense_style()),
    ]
}

fn render_weekly_chart(f: &mut Frame, area: Rect, app: &App) {
    let start = week_start(app.selected_date);
    let title = format!(" Week of {} (income / expense) ", start.format("%Y-%m-%d"));

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .bar_width(4)
        .bar_gap(0)
        .group_gap(2);

    for (i, label) in DAY_LABELS.iter().enumerate() {
        let bars = bucket_bars(app.weekly.income[i], app.weekly.expense[i]);
        chart = chart.data(BarGroup::default().label(Line::from(*label)).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Month {} by week (income / expense) ",
        app.selected_date.format("%Y-%m")
    );

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .bar_width(6)
        .bar_gap(0)
        .group_gap(3);

    for (i, label) in WEEK_LABELS.iter().enumerate() {
        let bars = bucket_bars(app.monthly.income[i], app.monthly.expense[i]);
        chart = chart.data(BarGroup::default().label(Line::from(*label)).bars(&bars));
    }

    f.render_widget(chart, area);
}
