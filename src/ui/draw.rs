use super::{popup::window_from_dimensions, set_cursor};
use crate::{
    app::App,
    chat::ChatMessage,
    config::{OPTIONS, THEME},
    help::Help,
    input::Mode,
    search::Search,
    status::Kind as StatusKind,
    viewport::VirtualList,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let main_layout = if app.footer_input.is_some() || !app.status.is_empty() {
        let [main, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());
        draw_footer(f, app, footer);
        main
    } else {
        f.area()
    };

    draw_messages(f, app, main_layout);

    if app.help.visible {
        draw_help(f, &mut app.help);
    }
}

fn message_text<'a>(message: &'a ChatMessage, matched: bool, rows: u16) -> Text<'a> {
    let author_style = if message.author == OPTIONS.author {
        THEME.own_author
    } else {
        THEME.author
    };
    let body_style = if matched {
        THEME.search_match
    } else {
        THEME.body
    };

    if rows <= 1 {
        return Text::from(Line::from(vec![
            Span::styled(message.author.as_str(), author_style),
            Span::raw(": "),
            Span::styled(message.body.as_str(), body_style),
        ]));
    }

    let mut header = vec![Span::styled(message.author.as_str(), author_style)];
    if let Some(sent_at) = &message.sent_at {
        header.push(Span::raw("  "));
        header.push(Span::styled(sent_at.as_str(), THEME.timestamp));
    }

    let mut lines = vec![Line::from(header)];
    lines.extend(
        message
            .body
            .lines()
            .map(|line| Line::styled(line, body_style)),
    );

    Text::from(lines)
}

fn position_indicator(app: &App) -> Line<'static> {
    if app.viewport.is_at_bottom() {
        return Line::styled(" live ", THEME.following);
    }

    Line::raw(format!(" {} below ", app.below_count()))
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let rows = OPTIONS.item_height;
    let search: &Search = &app.search;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(
            "{} [{}]",
            app.transcript.name(),
            app.transcript.len()
        ))
        .title_style(THEME.title)
        .title_bottom(position_indicator(app).right_aligned());

    let list = VirtualList::new(&app.transcript.messages, |message, idx| {
        message_text(message, search.is_match(idx), rows)
    })
    .block(block)
    .scrollbar(app.scrollbar);

    f.render_stateful_widget(list, area, &mut app.viewport);
}

fn draw_help(f: &mut Frame, help: &mut Help) {
    let window = window_from_dimensions(30, 72, f.area());
    f.render_widget(Clear, window);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled("Help", THEME.title));

    let list = VirtualList::new(&help.bindings.lines, |line, _| {
        Text::from(Line::styled(line.as_str(), THEME.help))
    })
    .block(block)
    .scrollbar(true);

    f.render_stateful_widget(list, window, &mut help.viewport);
}

fn draw_footer(f: &mut Frame, app: &mut App, area: Rect) {
    let line = if let Some(input) = &mut app.footer_input {
        input.update_width(area.width);
        set_cursor(f, input, area);

        let no_match = matches!(app.mode, Mode::Search(_))
            && !input.text.trim().is_empty()
            && app.search.matches.is_empty();

        if no_match {
            Line::styled(input.to_string(), THEME.error)
        } else {
            Line::raw(input.to_string())
        }
    } else {
        Line::styled(
            app.status.as_str(),
            match app.status.kind {
                StatusKind::Info => Style::default(),
                StatusKind::Error => THEME.error,
                StatusKind::Warning => THEME.warning,
            },
        )
    };

    f.render_widget(line, area);
}
