use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use classy_weather::DayCard;

use crate::tui::app::App;

/// Color palette
pub mod colors {
    use ratatui::style::Color;

    pub const PRIMARY: Color = Color::Rgb(78, 205, 196); // #4ECDC4
    pub const WARNING: Color = Color::Rgb(255, 217, 61); // #FFD93D
    pub const DIMMED: Color = Color::Rgb(136, 136, 136); // #888
    pub const TEXT: Color = Color::Rgb(204, 204, 204); // #CCC
    pub const BORDER: Color = Color::Rgb(68, 68, 68); // #444
}

const SPINNER_FRAMES: &[char] = &['✻', '✼', '✽', '✾', '✿', '❀', '❁'];

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Loading indicator
            Constraint::Min(0),    // Forecast
            Constraint::Length(1), // Hints
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            app.title.to_uppercase(),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(ratatui::layout::Alignment::Center),
        chunks[0],
    );

    render_input(f, app, chunks[1]);

    if app.model.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", spinner), Style::default().fg(colors::WARNING)),
                Span::styled("Loading...", Style::default().fg(colors::DIMMED)),
            ])),
            chunks[2],
        );
    }

    if let Some((header, cards)) = app.model.visible_forecast() {
        render_forecast(f, header, &cards, chunks[3]);
    }

    render_hints(f, app, chunks[4]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.input_focused {
        colors::PRIMARY
    } else {
        colors::BORDER
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(" Search from location... ");

    let query = app.model.query();
    f.render_widget(
        Paragraph::new(Span::styled(query, Style::default().fg(colors::TEXT))).block(block),
        area,
    );

    if app.input_focused {
        let offset = query.chars().count() as u16;
        let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_forecast(f: &mut Frame, header: &str, cards: &[DayCard], area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            header.to_string(),
            Style::default()
                .fg(colors::TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    lines.extend(cards.iter().map(card_line));

    f.render_widget(Paragraph::new(lines), area);
}

fn card_line(card: &DayCard) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {}  ", card.icon)),
        Span::styled(
            format!("{:<6}", card.label),
            Style::default().fg(colors::TEXT),
        ),
        Span::styled(card.min_label(), Style::default().fg(colors::DIMMED)),
        Span::styled(" — ", Style::default().fg(colors::DIMMED)),
        Span::styled(
            card.max_label(),
            Style::default()
                .fg(colors::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let hint = if app.input_focused {
        "Enter clear · Esc unfocus · Ctrl+C quit"
    } else {
        "Enter clear · Tab focus search · Ctrl+C quit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(colors::DIMMED))),
        area,
    );
}
