//! Rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap,
    },
};
use chrono::{Local, NaiveDateTime, TimeDelta};
use unicode_width::UnicodeWidthStr;

use jsonboard_types::ui::DraftInput;
use jsonboard_types::{
    BODY_MAX_CHARS, DateStyle, FormField, Post, PostId, TITLE_MAX_CHARS, User, first_line,
    format_board, format_date_range, format_relative, truncate_with_ellipsis,
};

use crate::app::{App, PostDetail, Screen, StatusKind};
use crate::theme::{Palette, styles};

pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        frame.area(),
    );

    let [tabs, body, hints, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(frame, tabs, app.screen(), &palette);
    match app.screen() {
        Screen::Posts => draw_posts(frame, body, app, &palette),
        Screen::Users => draw_users(frame, body, app, &palette),
        Screen::NewPost => draw_form(frame, body, app, &palette),
        Screen::Counter => draw_counter(frame, body, app, &palette),
        Screen::Dates => draw_dates(frame, body, Local::now().naive_local(), &palette),
    }
    draw_hints(frame, hints, app, &palette);
    draw_status(frame, status, app, &palette);

    if let Some(detail) = app.post_detail() {
        draw_post_detail(frame, detail, &palette);
    }
    if let Some(id) = app.confirm_delete() {
        draw_confirm_delete(frame, id, &palette);
    }
    if let Some(user) = app.user_detail() {
        draw_user_detail(frame, user, &palette);
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, current: Screen, palette: &Palette) {
    let mut spans = Vec::new();
    for (i, screen) in Screen::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, screen.title());
        let style = if *screen == current {
            styles::tab_active(palette)
        } else {
            styles::key_hint(palette)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn panel(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.text_muted))
        .title(Span::styled(format!(" {title} "), styles::title(palette)))
}

fn placeholder(frame: &mut Frame, area: Rect, block: Block<'_>, text: &str, palette: &Palette) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(palette.text_muted),
    )))
    .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_posts(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let listing = app.posts();
    let block = panel("Posts", palette);
    if listing.items().is_empty() {
        let text = if listing.is_loading() {
            "Loading posts..."
        } else {
            "No posts"
        };
        placeholder(frame, area, block, text, palette);
        return;
    }

    let max_title = area.width.saturating_sub(14) as usize;
    let items: Vec<ListItem> = listing
        .items()
        .iter()
        .map(|post| {
            let id = post
                .id
                .map_or_else(|| "new".to_string(), |id| format!("#{id}"));
            ListItem::new(Line::from(vec![
                Span::styled(format!("{id:>5}  "), Style::default().fg(palette.text_muted)),
                Span::styled(
                    truncate_with_ellipsis(first_line(&post.title), max_title),
                    Style::default().fg(palette.text_primary),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_row(palette))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(listing.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_users(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let listing = app.users();
    let block = panel("Users", palette);
    if listing.items().is_empty() {
        let text = if listing.is_loading() {
            "Loading users..."
        } else {
            "No users"
        };
        placeholder(frame, area, block, text, palette);
        return;
    }

    let items: Vec<ListItem> = listing
        .items()
        .iter()
        .map(|user| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<16}", user.username),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(user.name.clone(), Style::default().fg(palette.text_primary)),
                Span::styled(
                    format!("  <{}>", user.email),
                    Style::default().fg(palette.text_muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_row(palette))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(listing.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let form = app.form();
    let outer = panel("New post", palette);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [title_area, title_err, body_area, body_err, user_area, user_err] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let error_for = |field| {
        form.errors()
            .and_then(|errors| errors.for_field(field))
            .map(ToString::to_string)
    };

    let title_label = format!(
        "{} {}/{TITLE_MAX_CHARS}",
        FormField::Title.label(),
        form.title().text().trim().chars().count()
    );
    draw_text_field(
        frame,
        title_area,
        &title_label,
        form.title(),
        form.focus() == FormField::Title,
        palette,
    );
    draw_field_error(frame, title_err, error_for(FormField::Title), palette);

    let body_label = format!(
        "{} {}/{BODY_MAX_CHARS}",
        FormField::Body.label(),
        form.body().text().trim().chars().count()
    );
    draw_text_field(
        frame,
        body_area,
        &body_label,
        form.body(),
        form.focus() == FormField::Body,
        palette,
    );
    draw_field_error(frame, body_err, error_for(FormField::Body), palette);

    draw_text_field(
        frame,
        user_area,
        FormField::UserId.label(),
        form.user_id().draft(),
        form.focus() == FormField::UserId,
        palette,
    );
    draw_field_error(frame, user_err, error_for(FormField::UserId), palette);
}

/// Single-line input with horizontal scroll that keeps the caret visible.
fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    draft: &DraftInput,
    focused: bool,
    palette: &Palette,
) {
    let border = if focused {
        palette.primary
    } else {
        palette.text_muted
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(format!(" {label} "), styles::key_hint(palette)));
    let inner = block.inner(area);

    let caret_col = draft.text()[..draft.byte_index()].width() as u16;
    let scroll = caret_col.saturating_sub(inner.width.saturating_sub(1));

    let paragraph = Paragraph::new(draft.text().to_string())
        .style(Style::default().fg(palette.text_primary))
        .scroll((0, scroll))
        .block(block);
    frame.render_widget(paragraph, area);

    if focused && inner.width > 0 {
        frame.set_cursor_position((inner.x + caret_col - scroll, inner.y));
    }
}

fn draw_field_error(frame: &mut Frame, area: Rect, error: Option<String>, palette: &Palette) {
    let Some(error) = error else {
        return;
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("  {error}"),
            Style::default().fg(palette.error),
        )),
        area,
    );
}

fn draw_counter(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = panel("Counter", palette);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Count: {}", app.counter().count()),
            styles::title(palette),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Fixed formats, relative times and board dates, all derived from `now`.
fn draw_dates(frame: &mut Frame, area: Rect, now: NaiveDateTime, palette: &Palette) {
    let block = panel("Dates", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [formats_area, right] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(inner);

    let heading = |text: &'static str| Line::from(Span::styled(text, styles::title(palette)));
    let row = |value: String, note: String| {
        Line::from(vec![
            Span::styled(value, Style::default().fg(palette.text_primary)),
            Span::styled(format!("  {note}"), Style::default().fg(palette.text_muted)),
        ])
    };

    let mut formats = vec![heading("Formats")];
    formats.extend(
        DateStyle::ALL
            .iter()
            .map(|style| row(style.format(now), style.pattern().to_string())),
    );
    frame.render_widget(Paragraph::new(formats), formats_area);

    let ago = |delta: TimeDelta| now - delta;
    let mut lines = vec![heading("Relative")];
    for (delta, note) in [
        (TimeDelta::seconds(30), "30s ago"),
        (TimeDelta::minutes(5), "5m ago"),
        (TimeDelta::hours(3), "3h ago"),
        (TimeDelta::days(1), "1d ago"),
        (TimeDelta::days(3), "3d ago"),
        (TimeDelta::days(10), "10d ago"),
    ] {
        lines.push(row(format_relative(ago(delta), now), note.to_string()));
    }
    lines.push(Line::from(""));
    lines.push(heading("Board"));
    for (delta, note) in [
        (TimeDelta::zero(), "today"),
        (TimeDelta::days(1), "yesterday"),
        (TimeDelta::days(3), "weekday"),
        (TimeDelta::days(10), "month/day"),
    ] {
        lines.push(row(format_board(ago(delta), now), note.to_string()));
    }
    lines.push(Line::from(""));
    lines.push(heading("Range"));
    lines.push(row(
        format_date_range(ago(TimeDelta::days(7)), now),
        "last week".to_string(),
    ));
    frame.render_widget(Paragraph::new(lines), right);
}

fn draw_hints(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let pairs: &[(&str, &str)] = if app.confirm_delete().is_some() {
        &[("y", "delete"), ("n/Esc", "cancel")]
    } else if app.post_detail().and_then(PostDetail::post).is_some() {
        &[("d", "delete"), ("Esc", "close")]
    } else if app.post_detail().is_some() {
        &[("Esc", "close")]
    } else if app.user_detail().is_some() {
        &[("Esc", "close")]
    } else {
        match app.screen() {
            Screen::Posts => &[
                ("↑↓", "select"),
                ("Enter", "open"),
                ("n", "new"),
                ("r", "reload"),
                ("Tab/1-5", "screen"),
                ("q", "quit"),
            ],
            Screen::Users => &[
                ("↑↓", "select"),
                ("Enter", "open"),
                ("r", "reload"),
                ("Tab/1-5", "screen"),
                ("q", "quit"),
            ],
            Screen::NewPost => &[
                ("Tab", "next field"),
                ("Enter", "submit"),
                ("Esc", "back"),
            ],
            Screen::Counter => &[
                ("+", "increment"),
                ("-", "decrement"),
                ("r", "reset"),
                ("Tab/1-5", "screen"),
                ("q", "quit"),
            ],
            Screen::Dates => &[("Tab/1-5", "screen"), ("q", "quit")],
        }
    };

    let mut spans = Vec::new();
    for (key, action) in pairs {
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}  "), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let line = match app.status() {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => palette.success,
                StatusKind::Error => palette.error,
            };
            Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            format!(
                "{} posts, {} users",
                app.posts().items().len(),
                app.users().items().len()
            ),
            Style::default().fg(palette.text_muted),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width) / 2),
        y: area.y + (area.height.saturating_sub(height) / 2),
        width,
        height,
    }
}

fn dialog_block(title: String, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel))
        .title(Span::styled(title, styles::title(palette)))
        .padding(Padding::horizontal(1))
}

fn draw_post_detail(frame: &mut Frame, detail: &PostDetail, palette: &Palette) {
    let title = detail
        .id()
        .map_or_else(|| " Post ".to_string(), |id| format!(" Post #{id} "));
    let lines = match detail {
        PostDetail::Loading(_) => vec![Line::from(Span::styled(
            "Loading post...",
            Style::default().fg(palette.text_muted),
        ))],
        PostDetail::Failed { error, .. } => vec![
            Line::from(Span::styled(
                "Could not load this post.",
                Style::default().fg(palette.error),
            )),
            Line::from(""),
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(palette.text_muted),
            )),
        ],
        PostDetail::Loaded(post) => post_lines(post, palette),
    };

    let area = frame.area();
    let rect = centered(area, area.width.saturating_sub(8).min(72), 14);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(dialog_block(title, palette)),
        rect,
    );
}

fn post_lines(post: &Post, palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            post.body.clone(),
            Style::default().fg(palette.text_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("by user #{}", post.user_id),
            Style::default().fg(palette.text_muted),
        )),
    ]
}

fn draw_confirm_delete(frame: &mut Frame, id: PostId, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Delete post #{id}?"),
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", styles::key_highlight(palette)),
            Span::styled(" delete  ", styles::key_hint(palette)),
            Span::styled("n/Esc", styles::key_highlight(palette)),
            Span::styled(" cancel", styles::key_hint(palette)),
        ]),
    ];
    let rect = centered(frame.area(), 34, 5);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(dialog_block(" Confirm ".to_string(), palette)),
        rect,
    );
}

fn draw_user_detail(frame: &mut Frame, user: &User, palette: &Palette) {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<9}"), Style::default().fg(palette.text_muted)),
            Span::styled(value, Style::default().fg(palette.text_primary)),
        ])
    };

    let mut lines = vec![
        field("Username", user.username.clone()),
        field("Email", user.email.clone()),
    ];
    if let Some(phone) = &user.phone {
        lines.push(field("Phone", phone.clone()));
    }
    if let Some(website) = &user.website {
        lines.push(field("Website", website.clone()));
    }
    if let Some(address) = &user.address {
        lines.push(field("Address", address.one_line()));
    }
    if let Some(company) = &user.company {
        lines.push(field("Company", company.name.clone()));
        lines.push(field("", format!("\"{}\"", company.catch_phrase)));
    }

    let area = frame.area();
    let height = lines.len() as u16 + 2;
    let rect = centered(area, area.width.saturating_sub(8).min(72), height);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(dialog_block(format!(" {} ", user.name), palette)),
        rect,
    );
}
