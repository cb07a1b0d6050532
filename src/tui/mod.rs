// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive editor shell (ratatui + crossterm). In labels mode the screen shows
//! the item list, the relation list, and the derived sequence diagram; in script mode it is a
//! single free-text pane.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::debug;

use crate::editor::{EditorController, NoticeLevel, Selection};
use crate::format::ExportMode;
use crate::model::{Document, EditError, ItemId, Relation, ValidationError};
use crate::store::DirectorySink;

const FOCUS_COLOR: Color = Color::LightGreen;
const SELECTION_COLOR: Color = Color::Yellow;
const ERROR_COLOR: Color = Color::LightRed;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "seqnotes";
const TOAST_TTL: Duration = Duration::from_secs(3);
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SCRIPT_TAB: &str = "    ";

/// Runs the interactive terminal UI until the user quits.
pub fn run(editor: EditorController, sink: DirectorySink) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(editor, sink);

    while !app.should_quit {
        app.poll_imports();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];
    let compact_footer = stack_main_panes_vertically(main_area);

    match app.editor.mode() {
        ExportMode::Labels => draw_list_editor(frame, app, main_area),
        ExportMode::Script => draw_script_editor(frame, app, main_area),
    }

    if app.input != InputMode::Normal {
        let value = app.prompt_value().to_owned();
        let label = prompt_label(app.input);
        frame.render_widget(Paragraph::new(prompt_line(label, &value)), status_area);
        let prompt_width = label.chars().count() + 2 + value.chars().count();
        let cursor_x = status_area
            .x
            .saturating_add(u16::try_from(prompt_width).unwrap_or(u16::MAX))
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor(cursor_x, status_area.y);
        return;
    }

    let toast_snapshot = app
        .toast
        .as_ref()
        .map(|toast| (toast.message.clone(), toast.is_error, toast.expires_at));
    let (toast_suffix, toast_is_error) = match toast_snapshot {
        Some((message, is_error, expires_at)) if expires_at > Instant::now() => {
            (format!(" | {message}"), is_error)
        }
        Some(_) => {
            app.toast = None;
            (String::new(), false)
        }
        None => (String::new(), false),
    };

    let status =
        Paragraph::new(footer_help_line(app, &toast_suffix, toast_is_error, compact_footer));
    frame.render_widget(status, status_area);
    if !compact_footer {
        let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
        frame.render_widget(brand, status_area);
    }

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn draw_list_editor(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let direction = if stack_main_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_area);
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(panes[0]);
    let (items_area, relations_area, diagram_area) = (sidebar[0], sidebar[1], panes[1]);

    let document = app.editor.document();
    let selection = app.editor.selection();

    let items = document
        .items()
        .items()
        .iter()
        .map(|item| {
            let marker = selection_marker(selection, item.item_id());
            ListItem::new(item_line(item.label(), marker))
        })
        .collect::<Vec<_>>();
    let items_title = view_title(
        &format!("Items ({})", document.items().len()),
        '1',
        selection_summary(document, selection).as_deref(),
    );
    let items_list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(items_title)
                .border_style(panel_border_style_for_focus(app.focus, Focus::Items)),
        )
        .highlight_style(cursor_style(app.focus == Focus::Items));

    let relations = document
        .relations()
        .snapshot()
        .iter()
        .map(|relation| ListItem::new(relation_line(document, relation)))
        .collect::<Vec<_>>();
    let relations_title = view_title(&format!("Relations ({})", relations.len()), '2', None);
    let relations_list = List::new(relations)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(relations_title)
                .border_style(panel_border_style_for_focus(app.focus, Focus::Relations)),
        )
        .highlight_style(cursor_style(app.focus == Focus::Relations));

    let diagram = Paragraph::new(app.editor.diagram_script().into_owned())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Diagram", '3', None))
                .border_style(panel_border_style_for_focus(app.focus, Focus::Diagram)),
        )
        .scroll((app.diagram_scroll, 0));

    frame.render_stateful_widget(items_list, items_area, &mut app.items_state);
    frame.render_stateful_widget(relations_list, relations_area, &mut app.relations_state);
    frame.render_widget(diagram, diagram_area);
}

fn draw_script_editor(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let viewport_height = main_area.height.saturating_sub(2) as usize;
    let (line, col) = app.editor.script().cursor_line_col();
    app.diagram_scroll = scroll_to_keep_visible(app.diagram_scroll, line, viewport_height);

    let title = view_title("Script", '1', Some(&format!("— {}:{}", line + 1, col + 1)));
    let script = Paragraph::new(app.editor.script().text().to_owned())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(panel_border_style_for_focus(app.focus, Focus::Script)),
        )
        .scroll((app.diagram_scroll, 0));
    frame.render_widget(script, main_area);

    if app.input == InputMode::Normal && !app.show_help {
        let row = u16::try_from(line).unwrap_or(u16::MAX).saturating_sub(app.diagram_scroll);
        let x = main_area
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(col).unwrap_or(u16::MAX))
            .min(main_area.right().saturating_sub(2));
        let y = main_area.y.saturating_add(1).saturating_add(row);
        frame.set_cursor(x, y);
    }
}

fn cursor_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }
}

// Extracted panel/footer/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    AddItem,
    RenameItem { position: usize },
    RelationText,
    ImportPath,
}

struct App {
    editor: EditorController,
    sink: DirectorySink,
    focus: Focus,
    input: InputMode,
    prompt: String,
    items_state: ListState,
    relations_state: ListState,
    diagram_scroll: u16,
    show_help: bool,
    help_scroll: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(editor: EditorController, sink: DirectorySink) -> Self {
        let focus = Focus::initial(editor.mode());
        let mut app = Self {
            editor,
            sink,
            focus,
            input: InputMode::Normal,
            prompt: String::new(),
            items_state: ListState::default(),
            relations_state: ListState::default(),
            diagram_scroll: 0,
            show_help: false,
            help_scroll: 0,
            toast: None,
            should_quit: false,
        };
        app.clamp_cursors();
        app
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_event(key) {
            self.should_quit = true;
        }
        self.drain_notice();
        self.clamp_cursors();
    }

    /// Control chords work in every mode, including while typing into the script.
    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => return true,
                KeyCode::Char('s') => self.export(),
                KeyCode::Char('o') => self.open_prompt(InputMode::ImportPath),
                _ => {}
            }
            return false;
        }
        self.handle_key_code(key.code)
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => {
                    self.help_scroll = self.help_scroll.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.help_scroll = self.help_scroll.saturating_sub(1);
                }
                _ => {}
            }
            return false;
        }

        if self.input != InputMode::Normal {
            self.handle_prompt_key(code);
            return false;
        }

        if self.focus == Focus::Script {
            self.handle_script_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            KeyCode::Char('1') => self.focus = Focus::Items,
            KeyCode::Char('2') => self.focus = Focus::Relations,
            KeyCode::Char('3') => self.focus = Focus::Diagram,
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('i') => self.open_prompt(InputMode::ImportPath),

            _ => match self.focus {
                Focus::Items => self.handle_items_key(code),
                Focus::Relations => self.handle_relations_key(code),
                Focus::Diagram => self.handle_diagram_key(code),
                Focus::Script => {}
            },
        }

        false
    }

    fn handle_items_key(&mut self, code: KeyCode) {
        let len = self.item_count();
        match code {
            KeyCode::Up | KeyCode::Char('k') => step_list(&mut self.items_state, len, -1),
            KeyCode::Down | KeyCode::Char('j') => step_list(&mut self.items_state, len, 1),
            KeyCode::Home | KeyCode::Char('g') => self.items_state.select(Some(0)),
            KeyCode::End | KeyCode::Char('G') => {
                self.items_state.select(Some(len.saturating_sub(1)));
            }
            KeyCode::Char('a') => self.open_prompt(InputMode::AddItem),
            KeyCode::Char('r') => {
                if let Some(position) = self.items_state.selected() {
                    self.open_prompt(InputMode::RenameItem { position });
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => self.remove_selected_item(),
            KeyCode::Char('K') => self.move_selected_item(-1),
            KeyCode::Char('J') => self.move_selected_item(1),
            KeyCode::Char('s') => {
                if let Some(position) = self.items_state.selected() {
                    accepted(self.editor.select_source(position));
                }
            }
            KeyCode::Char('t') => {
                if let Some(position) = self.items_state.selected() {
                    match self.editor.select_target(position) {
                        Ok(()) => self.open_prompt(InputMode::RelationText),
                        Err(EditError::Validation(ValidationError::EmptyEndpoint)) => {
                            self.set_toast("Items without a label cannot be linked", false);
                        }
                        Err(_) => self.set_toast("Pick a source first (s)", false),
                    }
                }
            }
            KeyCode::Char('c') | KeyCode::Esc => self.editor.clear_selection(),

            _ => {}
        }
    }

    fn handle_relations_key(&mut self, code: KeyCode) {
        let len = self.editor.document().relations().len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => step_list(&mut self.relations_state, len, -1),
            KeyCode::Down | KeyCode::Char('j') => step_list(&mut self.relations_state, len, 1),
            _ => {}
        }
    }

    fn handle_diagram_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.diagram_scroll = self.diagram_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.diagram_scroll = self.diagram_scroll.saturating_add(1);
            }
            KeyCode::Home | KeyCode::Char('g') => self.diagram_scroll = 0,
            _ => {}
        }
    }

    fn handle_script_key(&mut self, code: KeyCode) {
        let script = self.editor.script_mut();
        match code {
            KeyCode::Char(ch) => script.insert_char(ch),
            KeyCode::Enter => script.insert_newline(),
            KeyCode::Tab => script.insert_str(SCRIPT_TAB),
            KeyCode::Backspace => script.backspace(),
            KeyCode::Delete => script.delete(),
            KeyCode::Left => script.move_left(),
            KeyCode::Right => script.move_right(),
            KeyCode::Up => script.move_up(),
            KeyCode::Down => script.move_down(),
            KeyCode::Home => script.move_home(),
            KeyCode::End => script.move_end(),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                if self.input == InputMode::RelationText {
                    self.editor.clear_selection();
                }
                self.input = InputMode::Normal;
            }
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => {
                self.prompt_value_mut().pop();
            }
            KeyCode::Char(ch) => self.prompt_value_mut().push(ch),
            _ => {}
        }
    }

    fn open_prompt(&mut self, input: InputMode) {
        self.prompt.clear();
        if let InputMode::RenameItem { position } = input {
            if let Some(item) = self.editor.document().items().get(position) {
                self.prompt.push_str(item.label());
            }
        }
        self.input = input;
    }

    fn prompt_value(&self) -> &str {
        match self.input {
            InputMode::AddItem => self.editor.draft_item(),
            InputMode::RelationText => self.editor.draft_relation(),
            InputMode::Normal | InputMode::RenameItem { .. } | InputMode::ImportPath => {
                &self.prompt
            }
        }
    }

    fn prompt_value_mut(&mut self) -> &mut String {
        match self.input {
            InputMode::AddItem => self.editor.draft_item_mut(),
            InputMode::RelationText => self.editor.draft_relation_mut(),
            InputMode::Normal | InputMode::RenameItem { .. } | InputMode::ImportPath => {
                &mut self.prompt
            }
        }
    }

    /// Rejected input keeps the prompt open so it can be corrected.
    fn submit_prompt(&mut self) {
        let done = match self.input {
            InputMode::Normal => true,
            InputMode::AddItem => {
                let added = self.editor.submit_item_draft();
                if added.is_ok() {
                    let last = self.item_count().saturating_sub(1);
                    self.items_state.select(Some(last));
                }
                accepted(added)
            }
            InputMode::RenameItem { position } => {
                let label = self.prompt.clone();
                accepted(self.editor.rename_item(position, &label))
            }
            InputMode::RelationText => accepted(self.editor.submit_relation_draft()),
            InputMode::ImportPath => {
                let path = self.prompt.trim().to_owned();
                if path.is_empty() {
                    false
                } else {
                    match self.editor.begin_import(&path) {
                        Ok(()) => self.set_toast(format!("Importing {path}…"), false),
                        Err(err) => self.set_toast(format!("Import failed: {err}"), true),
                    }
                    true
                }
            }
        };
        if done {
            self.input = InputMode::Normal;
            self.prompt.clear();
        }
    }

    fn remove_selected_item(&mut self) {
        if let Some(position) = self.items_state.selected() {
            accepted(self.editor.remove_item(position));
        }
    }

    fn move_selected_item(&mut self, delta: isize) {
        let Some(source) = self.items_state.selected() else {
            return;
        };
        let destination =
            source.checked_add_signed(delta).filter(|destination| *destination < self.item_count());
        if accepted(self.editor.reorder(source, destination)) {
            if let Some(destination) = destination {
                self.items_state.select(Some(destination));
            }
        }
    }

    fn export(&mut self) {
        // The outcome is reported through the editor notice.
        let _ = self.editor.export(&mut self.sink);
    }

    fn poll_imports(&mut self) {
        if self.editor.poll_imports() > 0 {
            self.drain_notice();
            self.clamp_cursors();
        }
    }

    fn drain_notice(&mut self) {
        if let Some(notice) = self.editor.take_notice() {
            self.set_toast(notice.message, notice.level == NoticeLevel::Error);
        }
    }

    fn item_count(&self) -> usize {
        self.editor.document().items().len()
    }

    fn clamp_cursors(&mut self) {
        clamp_list(&mut self.items_state, self.editor.document().items().len());
        clamp_list(&mut self.relations_state, self.editor.document().relations().len());
    }

    fn set_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

/// Rejected edits leave no trace in the UI beyond the log.
fn accepted<T>(result: Result<T, EditError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            debug!(error = %err, "edit rejected");
            false
        }
    }
}

fn step_list(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

fn clamp_list(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(idx), len) if idx >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
