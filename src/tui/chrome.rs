// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
fn stack_main_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Items,
    Relations,
    Diagram,
    Script,
}

impl Focus {
    fn initial(mode: ExportMode) -> Self {
        match mode {
            ExportMode::Labels => Self::Items,
            ExportMode::Script => Self::Script,
        }
    }

    fn cycle(self) -> Self {
        match self {
            Self::Items => Self::Relations,
            Self::Relations => Self::Diagram,
            Self::Diagram => Self::Items,
            Self::Script => Self::Script,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Items => Self::Diagram,
            Self::Relations => Self::Items,
            Self::Diagram => Self::Relations,
            Self::Script => Self::Script,
        }
    }
}

fn panel_border_style_for_focus(active: Focus, panel: Focus) -> Style {
    if active != panel {
        return Style::default();
    }

    Style::default().fg(FOCUS_COLOR)
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        title.push(' ');
        title.push_str(tail);
    }
    title
}

fn selection_marker(selection: Selection, item_id: ItemId) -> &'static str {
    match selection {
        Selection::SourceSelected { source } if source == item_id => "◆",
        Selection::TargetSelected { source, .. } if source == item_id => "◆",
        Selection::TargetSelected { target, .. } if target == item_id => "◇",
        _ => " ",
    }
}

fn selection_summary(document: &Document, selection: Selection) -> Option<String> {
    let label = |item_id| document.items().label_of(item_id).unwrap_or("?");
    match selection {
        Selection::Idle => None,
        Selection::SourceSelected { source } => Some(format!("— {} → …", label(source))),
        Selection::TargetSelected { source, target } => {
            Some(format!("— {} → {}", label(source), label(target)))
        }
    }
}

fn item_line(label: &str, marker: &'static str) -> Line<'static> {
    let marker_style = Style::default().fg(SELECTION_COLOR).add_modifier(Modifier::BOLD);
    let label_span = if label.is_empty() {
        Span::styled("(empty)", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(label.to_owned())
    };
    Line::from(vec![Span::styled(marker, marker_style), Span::raw(" "), label_span])
}

fn relation_line(document: &Document, relation: &Relation) -> Line<'static> {
    let label = |item_id| document.items().label_of(item_id).unwrap_or("?").to_owned();
    Line::from(vec![
        Span::raw(label(relation.source())),
        Span::styled(" → ", Style::default().fg(FOOTER_KEY_COLOR)),
        Span::raw(label(relation.target())),
        Span::styled(": ", Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::raw(relation.text().to_owned()),
    ])
}

fn prompt_label(input: InputMode) -> &'static str {
    match input {
        InputMode::Normal => "",
        InputMode::AddItem => "New item",
        InputMode::RenameItem { .. } => "Rename",
        InputMode::RelationText => "Relation text",
        InputMode::ImportPath => "Import file",
    }
}

fn prompt_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(FOOTER_KEY_COLOR)),
        Span::raw(value.to_owned()),
    ])
}

fn footer_help_line(
    app: &App,
    toast_suffix: &str,
    toast_is_error: bool,
    compact: bool,
) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match app.focus {
        Focus::Script => {
            push_footer_entry(&mut spans, "EXPORT", "^s");
            push_footer_entry(&mut spans, "IMPORT", "^o");
            push_footer_entry(&mut spans, "QUIT", "^q");
        }
        focus => {
            if !compact {
                push_footer_entry(&mut spans, "HELP", "?");
                push_footer_entry(&mut spans, "QUIT", "q");
            }
            match focus {
                Focus::Items => {
                    push_footer_entry(&mut spans, "ADD", "a");
                    push_footer_entry(&mut spans, "DEL", "x");
                    push_footer_entry(&mut spans, "MOVE", "J/K");
                    push_footer_entry(&mut spans, "FROM", "s");
                    push_footer_entry(&mut spans, "TO", "t");
                }
                Focus::Relations | Focus::Diagram => {
                    push_footer_entry(&mut spans, "SCROLL", "j/k");
                }
                Focus::Script => {}
            }
            push_footer_entry(&mut spans, "EXPORT", "e");
            push_footer_entry(&mut spans, "IMPORT", "i");
        }
    }

    if !toast_suffix.is_empty() {
        let color = if toast_is_error { ERROR_COLOR } else { Color::White };
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(color)));
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
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
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
    const KEY_WIDTH: usize = 9;
    let key_style = help_key_style();
    let mut lines = vec![Line::from(Span::styled("Global", help_header_style()))];
    for (key, desc) in [
        ("q", "quit"),
        ("?", "toggle this help"),
        ("Tab", "next panel"),
        ("e  ^s", "export to the export directory"),
        ("i  ^o", "import a file (replaces the items)"),
    ] {
        lines.push(help_kv(key, desc, KEY_WIDTH, key_style));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Items", help_header_style())));
    for (key, desc) in [
        ("j/k", "move the cursor"),
        ("a", "add an item"),
        ("r", "rename the item"),
        ("x  Del", "remove the item and its relations"),
        ("J/K", "move the item down/up"),
        ("s", "pick as relation source"),
        ("t", "pick as relation target, then type the text"),
        ("c  Esc", "clear the relation pick"),
    ] {
        lines.push(help_kv(key, desc, KEY_WIDTH, key_style));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Prompt", help_header_style())));
    for (key, desc) in [("Enter", "submit"), ("Esc", "cancel")] {
        lines.push(help_kv(key, desc, KEY_WIDTH, key_style));
    }
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    let paragraph = Paragraph::new(Text::from(help_lines()))
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
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

/// First line to show so that `cursor_line` stays inside a viewport of `height` lines.
fn scroll_to_keep_visible(scroll: u16, cursor_line: usize, height: usize) -> u16 {
    let cursor_line = u16::try_from(cursor_line).unwrap_or(u16::MAX);
    let height = u16::try_from(height.max(1)).unwrap_or(u16::MAX);
    if cursor_line < scroll {
        cursor_line
    } else if cursor_line >= scroll.saturating_add(height) {
        cursor_line.saturating_sub(height - 1)
    } else {
        scroll
    }
}
