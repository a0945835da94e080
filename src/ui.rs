//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a three-row split: the search box, the result list and a
//!   one-line status bar.
//! * While a fetch is outstanding the list area shows a loading line; after a
//!   failed fetch it shows the error line instead of the (kept) items.

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Mode};
use crate::source::Article;

const BROWSE_HELP: &str =
    "q: quit  /: search  d: dismiss  a/t/c/p: sort author/topic/comments/points  r: retry";
const EDIT_HELP: &str = "Enter: search  Esc: cancel  Ctrl-U: clear";

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [search_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_search_box(app, frame, search_area);
    draw_results(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_search_box(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.mode == Mode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let term = app.session().term();
    let input = Paragraph::new(term).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);

    if editing {
        let offset = u16::try_from(term.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(offset);
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_results(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.session().source().name()))
        .borders(Borders::ALL);

    let state = app.state();
    if state.is_loading {
        let loading = Paragraph::new("Loading ...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }
    if state.shows_error() {
        let error = Paragraph::new("Something went wrong ... press r to retry")
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(error, area);
        return;
    }

    let list_items: Vec<ListItem> = state.items.iter().map(article_row).collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Rows own their text so the list does not borrow the state while the
/// selection is updated.
fn article_row(article: &Article) -> ListItem<'static> {
    let date_str = article
        .created_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".into());

    let title = if article.title.is_empty() {
        "(untitled)".to_string()
    } else {
        article.title.clone()
    };

    let line = Line::from(vec![
        Span::styled(date_str, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(title, Style::default().fg(Color::White)),
        Span::styled(
            article
                .host()
                .map(|host| format!(" ({host})"))
                .unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("by {}", article.author),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} comments", article.num_comments),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} points", article.points),
            Style::default().fg(Color::Green),
        ),
    ]);

    ListItem::new(line)
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let next_sort = if app.state().sort_reversed { "desc" } else { "asc" };
    let help = match app.mode {
        Mode::Browse => BROWSE_HELP,
        Mode::Editing => EDIT_HELP,
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} items", app.items().len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(format!("  next sort: {next_sort}  ")),
        Span::raw(help),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
