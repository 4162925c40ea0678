// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Panel, title, footer, help, and style helpers used by TUI rendering.
fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn scope_label(scope: LogScope) -> &'static str {
    match scope {
        LogScope::AllTime => "all time",
        LogScope::Session => "this session",
    }
}

fn visible_row(area: Rect, y: u16, scroll: u16) -> Option<u16> {
    let offset = y.checked_sub(scroll)?;
    (offset < area.height).then(|| area.y + offset)
}

fn item_style(theme: &TuiTheme, item: &SurfaceItem, focused: bool) -> Style {
    if focused {
        return theme.focus_style();
    }
    if !item.available {
        return theme.unavailable_style();
    }
    match (&item.key, item.active) {
        (ItemKey::Outcome(outcome), true) => theme
            .outcome_style(*outcome)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        (ItemKey::Outcome(outcome), false) => theme.outcome_style(*outcome),
        (_, true) => theme.active_style(),
        (_, false) => theme.base_style(),
    }
}

fn render_form(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let title = format!(
        "─ Record match ─ session since {} ",
        local_time(app.state.session.start())
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(app.theme.base_style())
        .border_style(app.theme.panel_border_style(app.state.focus.zone.is_some()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.form_area = inner;
    app.renderer.resize(inner.width.max(1));

    let layout_height = app.renderer.layout().height();
    let focused_rect = app
        .renderer
        .focused()
        .and_then(|(zone, index)| app.renderer.layout().rect(zone, index));
    if let Some(rect) = focused_rect {
        if rect.y < app.form_scroll {
            app.form_scroll = rect.y;
        } else if rect.y >= app.form_scroll.saturating_add(inner.height) {
            app.form_scroll = rect.y.saturating_add(1).saturating_sub(inner.height);
        }
    }
    app.form_scroll = app
        .form_scroll
        .min(layout_height.saturating_sub(inner.height));

    let scroll = app.form_scroll;
    let layout = app.renderer.layout();
    let surface = app.renderer.surface();
    let focused = app.renderer.focused();
    let buf = frame.buffer_mut();

    for &(y, caption) in layout.captions() {
        if let Some(row) = visible_row(inner, y, scroll) {
            buf.set_stringn(
                inner.x,
                row,
                caption,
                usize::from(inner.width),
                app.theme.muted_style(),
            );
        }
    }

    for zone in Zone::ORDER {
        let rects = layout.rects(zone);
        for (index, (item, rect)) in surface.items(zone).iter().zip(rects).enumerate() {
            let Some(row) = visible_row(inner, rect.y, scroll) else {
                continue;
            };
            let style = item_style(&app.theme, item, focused == Some((zone, index)));
            buf.set_stringn(
                inner.x + rect.x,
                row,
                button_text(&item.label),
                usize::from(rect.width),
                style,
            );
        }
    }
}

fn stat_line(label: &str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::styled(value, style),
    ])
}

fn render_stats(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let stats = stats_for(&app.state.log, app.state.ui.stats_view, &app.state.session);
    let mut lines = vec![
        stat_line("Matches", stats.total.to_string(), theme.base_style()),
        stat_line(
            "Wins",
            stats.wins.to_string(),
            theme.outcome_style(Outcome::Win),
        ),
        stat_line(
            "Losses",
            stats.losses.to_string(),
            theme.outcome_style(Outcome::Loss),
        ),
    ];
    if app.state.settings.show_draw || stats.draws > 0 {
        lines.push(stat_line(
            "Draws",
            stats.draws.to_string(),
            theme.outcome_style(Outcome::Draw),
        ));
    }
    lines.push(stat_line(
        "Win rate",
        stats.win_rate_label(),
        theme.base_style().add_modifier(Modifier::BOLD),
    ));

    let title = view_title("Stats", 'v', Some(scope_label(app.state.ui.stats_view)));
    let stats = Paragraph::new(lines).style(theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.panel_border_style(false)),
    );
    frame.render_widget(stats, area);
}

fn history_line(app: &App, record: &MatchRecord, width: u16) -> Line<'static> {
    let theme = &app.theme;
    let time = format!("{}  ", local_time(record.timestamp));
    let result = format!(
        "{:<8}",
        record.result.label(app.state.settings.outcome_style_text)
    );
    let mut detail = app.state.catalog.match_type_label(
        record.parent.as_str(),
        record.child.as_ref().map(|child| child.as_str()),
    );
    let names: Vec<&str> = record
        .characters
        .iter()
        .map(|id| {
            app.state
                .catalog
                .character(id.as_str())
                .map_or(id.as_str(), |character| character.display_name())
        })
        .collect();
    if !names.is_empty() {
        detail.push_str(" · ");
        detail.push_str(&names.join(", "));
    }

    let used = time.chars().count() + result.chars().count() + DELETE_MARKER.chars().count();
    let room = usize::from(width).saturating_sub(used);
    let detail: String = detail.chars().take(room).collect();
    let padding = " ".repeat(room.saturating_sub(detail.chars().count()));

    Line::from(vec![
        Span::styled(time, theme.muted_style()),
        Span::styled(result, theme.outcome_style(record.result)),
        Span::styled(detail, theme.base_style()),
        Span::raw(padding),
        Span::styled(DELETE_MARKER, theme.muted_style()),
    ])
}

fn render_history(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block_title;
    let mut lines = Vec::<Line<'static>>::new();
    let mut rows = Vec::new();
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    {
        let page = app.history();
        let tail = format!(
            "{} · {}/{} [ ]",
            scope_label(app.state.ui.history_view),
            page.page + 1,
            page.page_count
        );
        block_title = view_title("History", 'h', Some(&tail));
        if page.records.is_empty() {
            lines.push(Line::from(Span::styled(
                "No matches yet",
                app.theme.muted_style(),
            )));
        }
        for (offset, record) in page.records.iter().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            if offset >= inner.height {
                break;
            }
            rows.push((inner.y + offset, record.id));
            lines.push(history_line(app, record, inner.width));
        }
    }
    app.history_rows = rows;
    app.history_area = inner;

    let history = Paragraph::new(lines).style(app.theme.base_style()).block(
        block
            .title(block_title)
            .border_style(app.theme.panel_border_style(false)),
    );
    frame.render_widget(history, area);
}

fn footer_line(app: &App, toast: Option<&str>) -> Line<'static> {
    if let Some(pending) = app.pending {
        return Line::from(vec![
            Span::styled(
                pending.prompt().to_owned(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("y".to_owned(), help_key_style()),
            Span::styled(
                " confirms, any other key cancels".to_owned(),
                Style::default().fg(FOOTER_LABEL_COLOR),
            ),
        ]);
    }

    let settings = &app.state.settings;
    let keys_off = !settings.keyboard_shortcuts_enabled;
    let hotkeys_off = keys_off || !settings.hotkeys_enabled;
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry_maybe_disabled(
        &mut spans,
        "MOVE",
        "wasd",
        keys_off || !settings.navigation_keys_enabled,
    );
    push_footer_entry_maybe_disabled(&mut spans, "PICK", "space", hotkeys_off);
    push_footer_entry_maybe_disabled(
        &mut spans,
        "TYPE",
        "1-4",
        keys_off || !settings.number_keys_enabled,
    );
    push_footer_entry_maybe_disabled(&mut spans, "CHARACTERS", "e", hotkeys_off);
    push_footer_entry_maybe_disabled(&mut spans, "UNDO", "^z", hotkeys_off);
    push_footer_entry(&mut spans, "SESSION", "n");
    push_footer_entry(&mut spans, "HELP", "?");
    push_footer_entry(&mut spans, "QUIT", "q");
    if let Some(message) = toast {
        spans.push(Span::styled(
            format!(" | {message}"),
            app.theme.toast_style(),
        ));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = ["w/s, ↑/↓", "space/enter", "ctrl-z"]
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Form ---", header_style)));
    for (key, desc) in [
        ("w/s, ↑/↓", "Previous/next section"),
        ("a/d, ←/→", "Previous/next item (grid: left/right)"),
        ("space/enter", "Select focused item"),
        ("esc", "Drop focus"),
        ("1-4", "Pick match type"),
        ("t", "Show/hide match types"),
        ("e", "Show/hide characters"),
        ("c", "Clear characters"),
        ("ctrl-z", "Undo last match"),
    ] {
        lines.push(help_kv(key, desc, key_col_width, key_style));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("--- Panels ---", header_style)));
    for (key, desc) in [
        ("v", "Stats: all time/this session"),
        ("h", "History: all time/this session"),
        ("[/]", "Previous/next history page"),
        ("p", "Matches per page"),
        ("n", "Start a new session"),
        ("X", "Clear all matches"),
        ("click ✕", "Delete a match"),
    ] {
        lines.push(help_kv(key, desc, key_col_width, key_style));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("--- Global ---", header_style)));
    lines.push(help_kv("?", "Help (toggle)", key_col_width, key_style));
    lines.push(help_kv("q", "Quit", key_col_width, key_style));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(70, 84, main_area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(app.theme.base_style())
        .border_style(app.theme.panel_border_style(true));
    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    vec![Span::styled(
        value.to_owned(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )]
}
