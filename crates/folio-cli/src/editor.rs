use std::io::{Stdout, stdout};
use std::ops::Range;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_engine::content::{BlockKind, Document};
use folio_engine::editing::EditSession;
use folio_engine::inline::InlineStyle;
use folio_engine::io;
use folio_engine::render::{RenderOptions, render_with};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Block kinds offered by the kind picker. Headings are offered per level.
const KIND_CHOICES: [(BlockKind, Option<u8>); 10] = [
    (BlockKind::Paragraph, None),
    (BlockKind::Heading, Some(1)),
    (BlockKind::Heading, Some(2)),
    (BlockKind::Heading, Some(3)),
    (BlockKind::Quote, None),
    (BlockKind::Code, None),
    (BlockKind::List, None),
    (BlockKind::OrderedList, None),
    (BlockKind::Link, None),
    (BlockKind::Image, None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Blocks,
    Text,
    Target,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Blocks => Focus::Text,
            Focus::Text => Focus::Target,
            Focus::Target => Focus::Blocks,
        }
    }
}

struct App {
    path: PathBuf,
    session: EditSession,
    options: RenderOptions,
    kind_choice: usize,
    focus: Focus,
    block_list_state: ListState,
    /// Byte offset into the focused buffer
    cursor: usize,
    /// Other end of the text selection, if one is being made
    anchor: Option<usize>,
    status: String,
    dirty: bool,
}

impl App {
    fn new(path: PathBuf, document: Document, options: RenderOptions) -> Self {
        let mut block_list_state = ListState::default();
        if !document.is_empty() {
            block_list_state.select(Some(0));
        }
        Self {
            path,
            session: EditSession::from_document(document),
            options,
            kind_choice: 0,
            focus: Focus::Text,
            block_list_state,
            cursor: 0,
            anchor: None,
            status: String::new(),
            dirty: false,
        }
    }

    fn kind(&self) -> (BlockKind, Option<u8>) {
        KIND_CHOICES[self.kind_choice]
    }

    fn kind_label(&self) -> String {
        match self.kind() {
            (BlockKind::Heading, Some(level)) => format!("Heading {level}"),
            (kind, _) => kind.label().to_string(),
        }
    }

    fn focused_buffer(&self) -> &str {
        match self.focus {
            Focus::Target => self.session.target(),
            _ => self.session.buffer(),
        }
    }

    fn focused_buffer_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::Target => self.session.target_mut(),
            _ => self.session.buffer_mut(),
        }
    }

    fn selection(&self) -> Option<Range<usize>> {
        match self.focus {
            Focus::Text => selection_range(self.anchor, self.cursor),
            _ => None,
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
        self.anchor = None;
        self.cursor = self.focused_buffer().len();
    }

    fn cycle_kind(&mut self) {
        self.kind_choice = (self.kind_choice + 1) % KIND_CHOICES.len();
        self.status = format!("Block kind: {}", self.kind_label());
    }

    fn append(&mut self) {
        let (kind, level) = self.kind();
        match self.session.append(kind, level) {
            Ok(()) => {
                self.cursor = 0;
                self.anchor = None;
                self.dirty = true;
                self.block_list_state
                    .select(Some(self.session.document().len() - 1));
                self.status = format!("Added {}", self.kind_label());
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn remove_selected(&mut self) {
        let Some(index) = self.block_list_state.selected() else {
            return;
        };
        match self.session.remove(index) {
            Ok(()) => {
                self.dirty = true;
                let len = self.session.document().len();
                self.block_list_state
                    .select(if len == 0 { None } else { Some(index.min(len - 1)) });
                self.status = format!("Removed block {index}");
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn save(&mut self) {
        match io::write_document(&self.path, self.session.document()) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", self.path.display());
            }
            Err(err) => self.status = format!("Save failed: {err}"),
        }
    }

    fn style_selection(&mut self, style: InlineStyle) {
        let Some(range) = self.selection() else {
            self.status = "Select text with Shift+Left/Right first".to_string();
            return;
        };
        let (open, close) = style.delimiters();
        match self.session.style_selection(range.clone(), style) {
            Ok(()) => {
                self.anchor = None;
                self.cursor = range.end + open.len() + close.len();
                self.status = format!("Applied {style}");
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn next_block(&mut self) {
        let len = self.session.document().len();
        if len == 0 {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.block_list_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        let len = self.session.document().len();
        if len == 0 {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.block_list_state.select(Some(i));
    }

    fn move_cursor(&mut self, forward: bool, extend: bool) {
        if extend && self.focus == Focus::Text {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        let cursor = if forward {
            next_boundary(self.focused_buffer(), self.cursor)
        } else {
            prev_boundary(self.focused_buffer(), self.cursor)
        };
        self.cursor = cursor;
    }

    fn insert(&mut self, c: char) {
        self.delete_selection();
        let cursor = self.cursor;
        self.focused_buffer_mut().insert(cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let start = prev_boundary(self.focused_buffer(), self.cursor);
        let end = self.cursor;
        self.focused_buffer_mut().replace_range(start..end, "");
        self.cursor = start;
    }

    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.cursor = range.start;
        self.focused_buffer_mut().replace_range(range, "");
        self.anchor = None;
        true
    }

    /// Returns `false` when the app should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Char('k') if ctrl => self.cycle_kind(),
            KeyCode::Char('d') if ctrl => self.append(),
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char(c) if alt => {
                if let Some(style) = style_for_key(c) {
                    self.style_selection(style);
                }
            }
            _ if self.focus == Focus::Blocks => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.next_block(),
                KeyCode::Up | KeyCode::Char('k') => self.previous_block(),
                KeyCode::Delete | KeyCode::Char('d') => self.remove_selected(),
                _ => {}
            },
            KeyCode::Left => self.move_cursor(false, shift),
            KeyCode::Right => self.move_cursor(true, shift),
            KeyCode::Home => {
                self.anchor = None;
                self.cursor = 0;
            }
            KeyCode::End => {
                self.anchor = None;
                self.cursor = self.focused_buffer().len();
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Enter if self.focus == Focus::Text => self.insert('\n'),
            KeyCode::Char(c) if !ctrl => self.insert(c),
            _ => {}
        }
        true
    }
}

fn style_for_key(c: char) -> Option<InlineStyle> {
    match c {
        'b' => Some(InlineStyle::Bold),
        'i' => Some(InlineStyle::Italic),
        'u' => Some(InlineStyle::Underline),
        's' => Some(InlineStyle::Strikethrough),
        'h' => Some(InlineStyle::Highlight),
        'c' => Some(InlineStyle::Code),
        _ => None,
    }
}

fn selection_range(anchor: Option<usize>, cursor: usize) -> Option<Range<usize>> {
    let anchor = anchor?;
    (anchor != cursor).then(|| anchor.min(cursor)..anchor.max(cursor))
}

fn prev_boundary(s: &str, i: usize) -> usize {
    s[..i.min(s.len())]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_boundary(s: &str, i: usize) -> usize {
    s[i.min(s.len())..]
        .chars()
        .next()
        .map(|c| i + c.len_utf8())
        .unwrap_or(s.len())
}

/// Line and column (in chars) of byte offset `cursor`
fn cursor_position(s: &str, cursor: usize) -> (usize, usize) {
    let before = &s[..cursor.min(s.len())];
    let line = before.matches('\n').count();
    let col = before
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0);
    (line, col)
}

/// Buffer text as lines, with the selected bytes reversed
fn styled_lines(s: &str, selection: Option<Range<usize>>) -> Vec<Line<'_>> {
    let selected = Style::default().add_modifier(Modifier::REVERSED);
    let mut lines = Vec::new();
    let mut offset = 0;

    for line in s.split('\n') {
        let start = offset;
        let end = start + line.len();
        let spans = match &selection {
            Some(sel) if sel.start < end && sel.end > start => {
                let a = sel.start.max(start) - start;
                let b = sel.end.min(end) - start;
                vec![
                    Span::raw(&line[..a]),
                    Span::styled(&line[a..b], selected),
                    Span::raw(&line[b..]),
                ]
            }
            _ => vec![Span::raw(line)],
        };
        lines.push(Line::from(spans));
        offset = end + 1;
    }

    lines
}

pub fn run(path: PathBuf, options: RenderOptions) -> Result<()> {
    let document = io::read_document_or_default(&path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path, document, options);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.dirty {
        log::warn!("Exited with unsaved changes to {}", app.path.display());
    }
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    // Block list panel
    let block_items: Vec<ListItem> = app
        .session
        .document()
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let first_line = block.text().lines().next().unwrap_or("");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{i:>2} {} ", block.label()), Style::default().fg(Color::Cyan)),
                Span::raw(first_line.to_string()),
            ]))
        })
        .collect();

    let blocks = List::new(block_items)
        .block(panel("Blocks", app.focus == Focus::Blocks))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(blocks, top[0], &mut app.block_list_state);

    // Preview panel shows exactly what the public page will get
    let html = render_with(app.session.document(), &app.options);
    let preview = Paragraph::new(html)
        .block(panel("Preview (HTML)", false))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, top[1]);

    // Text buffer
    let text_title = format!("Text [{}]", app.kind_label());
    let text = Paragraph::new(styled_lines(app.session.buffer(), app.selection()))
        .block(panel(&text_title, app.focus == Focus::Text));
    f.render_widget(text, rows[1]);

    let target = Paragraph::new(app.session.target())
        .block(panel("Target URL (links and images)", app.focus == Focus::Target));
    f.render_widget(target, rows[2]);

    match app.focus {
        Focus::Text => place_cursor(f, rows[1], app.session.buffer(), app.cursor),
        Focus::Target => place_cursor(f, rows[2], app.session.target(), app.cursor),
        Focus::Blocks => {}
    }

    let dirty = if app.dirty { " [modified]" } else { "" };
    let status = Paragraph::new(format!("{}{dirty}", app.status))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(status, rows[3]);

    let help_text = Line::from(vec![
        Span::raw("Esc: Quit | Tab: Focus | Ctrl+K: Kind | Ctrl+D: Add | Ctrl+S: Save | "),
        Span::raw("Alt+b/i/u/s/h/c: Style | d: Delete block"),
    ]);
    f.render_widget(Paragraph::new(help_text), rows[4]);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn place_cursor(f: &mut Frame, area: Rect, buffer: &str, cursor: usize) {
    let (line, col) = cursor_position(buffer, cursor);
    let x = area.x + 1 + u16::try_from(col).unwrap_or(u16::MAX);
    let y = area.y + 1 + u16::try_from(line).unwrap_or(u16::MAX);
    if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
        f.set_cursor_position(Position { x, y });
    }
}
