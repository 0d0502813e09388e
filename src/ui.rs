use crate::client::{AppSnapshot, EntryRow, Tab};
use color_eyre::eyre::{Result, eyre};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use ratatui::widgets::*;
use spin_decide::coin::Side;
use std::io::stdout;
use tokio::sync::mpsc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BAR_WIDTH: usize = 20;
const NAME_WIDTH: usize = 16;

pub enum UserEvent {
    Quit,
    Redraw,
    TextChanged(String),
    AddSingleEntry(String),
    DeleteEntry(usize),
    ToggleSingleMode,
    ToggleRatioMode,
    ToggleConfirm,
    Shuffle,
    Sort,
    Spin,
    DismissResult,
    ResetHistory,
    Flip,
    Predict(Side),
    ToggleFastMode,
    ToggleAutoflip,
}

pub type InputEventReceiver = mpsc::UnboundedReceiver<std::io::Result<Event>>;

pub struct UiState {
    tab: Tab,
    mode: Mode,
    editor: EditorState,
    single_input: String,
    selected: usize,
    row_count: usize,
    single_entry_mode: bool,
    result_open: bool,
    prediction: Side,
    terminal: Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
}

impl UiState {
    pub fn new(tab: Tab) -> Self {
        UiState {
            tab,
            mode: Mode::Normal,
            editor: EditorState::default(),
            single_input: String::new(),
            selected: 0,
            row_count: 0,
            single_entry_mode: false,
            result_open: false,
            prediction: Side::Heads,
            terminal: None,
        }
    }

    pub fn clear_single_input(&mut self) {
        self.single_input.clear();
    }
}

#[derive(Clone, Debug, Default)]
enum Mode {
    #[default]
    Normal,
    QuitModal,
}

/// Multi-line text buffer with a character cursor.
#[derive(Clone, Debug)]
struct EditorState {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        EditorState { lines: vec![String::new()], row: 0, col: 0 }
    }
}

impl EditorState {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Adopts `text` when the registry rewrote it (sort, shuffle, rejected edit).
    fn sync(&mut self, text: &str) {
        if self.text() == text {
            return;
        }
        self.lines = text.split('\n').map(String::from).collect();
        self.row = self.row.min(self.lines.len() - 1);
        self.col = self.col.min(self.current().chars().count());
    }

    fn current(&self) -> &str {
        &self.lines[self.row]
    }

    fn byte_col(&self) -> usize {
        let line = self.current();
        line.char_indices().nth(self.col).map(|(i, _)| i).unwrap_or(line.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_col();
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    fn newline(&mut self) {
        let at = self.byte_col();
        let rest = self.lines[self.row].split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Returns false when there was nothing to delete.
    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_col();
            self.lines[self.row].remove(at);
            true
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current().chars().count();
            self.lines[self.row].push_str(&line);
            true
        } else {
            false
        }
    }

    fn up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.current().chars().count());
        }
    }

    fn down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.current().chars().count());
        }
    }

    fn left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    fn right(&mut self) {
        self.col = (self.col + 1).min(self.current().chars().count());
    }
}

pub fn terminal_enter(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    // Create a single persistent Terminal to preserve buffers across draws
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    state.terminal = Some(terminal);
    Ok(())
}

pub fn terminal_exit() -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Reads terminal events on a dedicated thread so the async loop keeps ticking.
pub fn input_event_stream() -> InputEventReceiver {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        let ev = event::read();
        let failed = ev.is_err();
        if tx.send(ev).is_err() || failed {
            break;
        }
    });
    rx
}

pub async fn next_raw_event(rx: &mut InputEventReceiver) -> Result<Event> {
    let ev = rx.recv().await.ok_or_else(|| eyre!("input event stream closed"))?;
    Ok(ev?)
}

pub fn draw(state: &mut UiState, snap: &AppSnapshot) -> Result<()> {
    state.editor.sync(&snap.text);
    state.single_entry_mode = snap.single_entry_mode;
    state.result_open = snap.revealed.is_some();
    state.prediction = snap.coin.prediction;
    state.row_count = snap.rows.len();
    state.selected = state.selected.min(state.row_count.saturating_sub(1));
    if let Some(mut term) = state.terminal.take() {
        term.draw(|f| ui(f, state, snap))?;
        state.terminal = Some(term);
    }
    Ok(())
}

pub fn interpret_event(state: &mut UiState, event: Event) -> Option<UserEvent> {
    let k = match event {
        Event::Key(k) => k,
        Event::Resize(_, _) => return Some(UserEvent::Redraw),
        _ => return None,
    };
    if k.kind != KeyEventKind::Press {
        return None;
    }
    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return Some(UserEvent::Quit);
    }
    if let Mode::QuitModal = state.mode {
        return match k.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserEvent::Quit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => { state.mode = Mode::Normal; Some(UserEvent::Redraw) }
            _ => None,
        };
    }
    if state.result_open {
        return match k.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(UserEvent::DismissResult),
            _ => None,
        };
    }
    match k.code {
        KeyCode::Esc => { state.mode = Mode::QuitModal; return Some(UserEvent::Redraw); }
        KeyCode::Tab => {
            state.tab = match state.tab { Tab::Wheel => Tab::Coin, Tab::Coin => Tab::Wheel };
            return Some(UserEvent::Redraw);
        }
        _ => {}
    }
    match state.tab {
        Tab::Wheel => wheel_key(state, k),
        Tab::Coin => coin_key(state, k),
    }
}

fn wheel_key(state: &mut UiState, k: KeyEvent) -> Option<UserEvent> {
    match k.code {
        KeyCode::F(1) => return Some(UserEvent::ToggleSingleMode),
        KeyCode::F(2) => return Some(UserEvent::ToggleRatioMode),
        KeyCode::F(3) => return Some(UserEvent::ToggleConfirm),
        KeyCode::F(4) => return Some(UserEvent::Shuffle),
        KeyCode::F(5) => return Some(UserEvent::Sort),
        KeyCode::F(6) => return Some(UserEvent::Spin),
        KeyCode::F(7) => return Some(UserEvent::ResetHistory),
        _ => {}
    }
    if state.single_entry_mode {
        return match k.code {
            KeyCode::Char(c) => { state.single_input.push(c); Some(UserEvent::Redraw) }
            KeyCode::Backspace => { state.single_input.pop(); Some(UserEvent::Redraw) }
            KeyCode::Enter => Some(UserEvent::AddSingleEntry(state.single_input.clone())),
            KeyCode::Up => { state.selected = state.selected.saturating_sub(1); Some(UserEvent::Redraw) }
            KeyCode::Down => { state.selected = (state.selected + 1).min(state.row_count.saturating_sub(1)); Some(UserEvent::Redraw) }
            KeyCode::Delete if state.row_count > 0 => Some(UserEvent::DeleteEntry(state.selected)),
            _ => None,
        };
    }
    let ed = &mut state.editor;
    match k.code {
        KeyCode::Char(c) => { ed.insert(c); Some(UserEvent::TextChanged(ed.text())) }
        KeyCode::Enter => { ed.newline(); Some(UserEvent::TextChanged(ed.text())) }
        KeyCode::Backspace => if ed.backspace() { Some(UserEvent::TextChanged(ed.text())) } else { None },
        KeyCode::Up => { ed.up(); Some(UserEvent::Redraw) }
        KeyCode::Down => { ed.down(); Some(UserEvent::Redraw) }
        KeyCode::Left => { ed.left(); Some(UserEvent::Redraw) }
        KeyCode::Right => { ed.right(); Some(UserEvent::Redraw) }
        _ => None,
    }
}

fn coin_key(state: &mut UiState, k: KeyEvent) -> Option<UserEvent> {
    match k.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('f') => Some(UserEvent::Flip),
        KeyCode::Char('h') => Some(UserEvent::Predict(Side::Heads)),
        KeyCode::Char('t') => Some(UserEvent::Predict(Side::Tails)),
        KeyCode::Char('p') => Some(UserEvent::Predict(state.prediction.other())),
        KeyCode::Char('m') => Some(UserEvent::ToggleFastMode),
        KeyCode::Char('a') => Some(UserEvent::ToggleAutoflip),
        _ => None,
    }
}

fn ui(f: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    // Clear the whole frame to avoid leftover fragments
    f.render_widget(Clear, f.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs + status
            Constraint::Min(12),   // active tab
            Constraint::Length(8), // history / errors + help
        ])
        .split(f.area());

    draw_top(f, state, chunks[0], snap);
    match state.tab {
        Tab::Wheel => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(chunks[1]);
            draw_editor(f, state, body[0], snap);
            draw_wheel(f, body[1], snap);
        }
        Tab::Coin => draw_coin(f, chunks[1], snap),
    }
    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    match state.tab {
        Tab::Wheel => draw_history(f, lower[0], snap),
        Tab::Coin => draw_recent(f, lower[0], snap),
    }
    draw_bottom(f, state, lower[1], snap);
    draw_modals(f, state, snap);
}

fn draw_top(f: &mut Frame, state: &UiState, area: Rect, snap: &AppSnapshot) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(10)])
        .split(area);
    let selected = match state.tab { Tab::Wheel => 0, Tab::Coin => 1 };
    let tabs = Tabs::new(vec!["Wheel", "Coin"])
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("spin-decide"));
    f.render_widget(tabs, cols[0]);
    let status = Paragraph::new(snap.status.clone())
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, cols[1]);
}

fn toggle_span(label: &str, on: bool) -> Span<'static> {
    let style = if on { Style::default().fg(Color::Green).add_modifier(Modifier::BOLD) } else { Style::default().fg(Color::DarkGray) };
    Span::styled(format!("[{}] {} ", if on { "x" } else { " " }, label), style)
}

fn draw_editor(f: &mut Frame, state: &UiState, area: Rect, snap: &AppSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);
    let modes = Line::from(vec![
        toggle_span("Single", snap.single_entry_mode),
        toggle_span("Ratio", snap.ratio_mode),
        toggle_span("Confirmed", snap.confirmed),
    ]);
    f.render_widget(Paragraph::new(modes).block(Block::default().borders(Borders::ALL).title("Modes")), rows[0]);

    if snap.single_entry_mode {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(2)])
            .split(rows[1]);
        let input_block = Block::default().borders(Borders::ALL).title("Add entry (Enter)");
        let inner = input_block.inner(parts[0]);
        f.render_widget(Paragraph::new(state.single_input.as_str()).block(input_block), parts[0]);
        if !snap.confirmed && state.mode_is_normal() {
            let x = inner.x + (state.single_input.width() as u16).min(inner.width.saturating_sub(1));
            f.set_cursor_position((x, inner.y));
        }
        let items: Vec<ListItem> = snap.rows.iter().enumerate().map(|(i, row)| {
            let style = if i == state.selected { Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD) } else { Style::default() };
            ListItem::new(Span::styled(row.name.clone(), style))
        }).collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Entries (Del removes)"));
        f.render_widget(list, parts[1]);
        return;
    }

    let title = if snap.ratio_mode { "Entries (Name:Percentage per line)" } else { "Entries (one per line)" };
    let style = if snap.confirmed { Style::default().fg(Color::DarkGray) } else { Style::default() };
    let lines: Vec<Line> = state.editor.lines.iter().map(|l| Line::styled(l.clone(), style)).collect();
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(rows[1]);
    let scroll = (state.editor.row as u16).saturating_sub(inner.height.saturating_sub(1));
    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), rows[1]);
    if !snap.confirmed && state.mode_is_normal() {
        let before: String = state.editor.current().chars().take(state.editor.col).collect();
        let x = inner.x + (before.width() as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + (state.editor.row as u16 - scroll).min(inner.height.saturating_sub(1));
        f.set_cursor_position((x, y));
    }
}

impl UiState {
    fn mode_is_normal(&self) -> bool {
        matches!(self.mode, Mode::Normal) && !self.result_open
    }
}

fn truncate_to_width(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            out.push('…');
            return out;
        }
        used += w;
        out.push(c);
    }
    out.push_str(&" ".repeat(max - used));
    out
}

fn bar(share: f64) -> String {
    let filled = ((share * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn entry_line(row: &EntryRow, valid_index: usize, snap: &AppSnapshot) -> Line<'static> {
    let under_pointer = snap.pointer_index == Some(valid_index);
    let marker = if under_pointer { "▶ " } else { "  " };
    let style = if under_pointer && snap.spinning {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else if under_pointer {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let range = row.segment.map(|s| format!("{:>5.1}°–{:>5.1}°", s.start, s.end)).unwrap_or_default();
    Line::from(vec![
        Span::styled(format!("{marker}{}", truncate_to_width(&row.name, NAME_WIDTH)), style),
        Span::raw(format!(" {} {:>5.1}% ", bar(row.share), row.share * 100.0)),
        Span::styled(range, Style::default().fg(Color::DarkGray)),
    ])
}

fn draw_wheel(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let mut lines: Vec<Line> = Vec::new();
    let valid_rows: Vec<&EntryRow> = snap.rows.iter().filter(|r| r.valid).collect();
    if valid_rows.is_empty() {
        lines.push(Line::styled("No entries yet", Style::default().fg(Color::DarkGray)));
    }
    for (i, row) in valid_rows.iter().enumerate() {
        lines.push(entry_line(row, i, snap));
    }
    lines.push(Line::from(""));
    let count_ok = snap.valid_count >= snap.min_entries && snap.valid_count <= snap.max_entries;
    let count_style = if count_ok { Style::default().fg(Color::Green) } else { Style::default().fg(Color::Red) };
    let mut footer = vec![Span::styled(format!("{} Entries", snap.valid_count), count_style)];
    if snap.ratio_mode && !snap.single_entry_mode {
        let total_style = if snap.total_weight == snap.ratio_total { Style::default().fg(Color::Green) } else { Style::default().fg(Color::Red) };
        footer.push(Span::raw("  "));
        footer.push(Span::styled(format!("Total: {}%", snap.total_weight), total_style));
    }
    lines.push(Line::from(footer));
    if let Some(problem) = &snap.problem {
        lines.push(Line::styled(problem.clone(), Style::default().fg(Color::Red)));
    } else if !snap.confirmed {
        lines.push(Line::styled("Ready to confirm (F3)", Style::default().fg(Color::DarkGray)));
    }
    let title = format!("Wheel {:>6.1}°{}", snap.rotation.rem_euclid(360.0), if snap.spinning { " spinning" } else { "" });
    let para = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn draw_history(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let mut lines = vec![Line::from(format!("Spins: {}", snap.history.total))];
    if snap.history.total == 0 {
        lines.push(Line::styled("No spins for these entries", Style::default().fg(Color::DarkGray)));
    }
    for (name, wins) in &snap.history.results {
        lines.push(Line::from(format!(
            "{} {:>4} ({:>5.1}%)",
            truncate_to_width(name, NAME_WIDTH),
            wins,
            snap.history.win_percentage(name)
        )));
    }
    let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("History (F7 resets)"));
    f.render_widget(para, area);
}

fn draw_coin(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let coin = &snap.coin;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let result = if coin.flipping {
        Line::styled("Flipping...", Style::default().fg(Color::Yellow))
    } else if let Some(last) = coin.last {
        let (label, color) = if last.correct { ("WINNER", Color::Green) } else { ("LOSER", Color::Red) };
        Line::from(vec![
            Span::styled(format!("{}! ", last.side), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::styled("Press space to flip", Style::default().fg(Color::DarkGray))
    };
    let lines = vec![
        result,
        Line::from(""),
        Line::from(vec![toggle_span("Heads", coin.prediction == Side::Heads), toggle_span("Tails", coin.prediction == Side::Tails)]),
        Line::from(vec![toggle_span("Fast mode", coin.fast_mode), toggle_span("Autoflip", coin.autoflip)]),
    ];
    f.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Coin")), cols[0]);

    let stats = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(3)])
        .split(cols[1]);
    let heads = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!("Heads ({:.0}%)", coin.heads_pct)))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio((coin.heads_pct / 100.0).clamp(0.0, 1.0));
    f.render_widget(heads, stats[0]);
    let tails = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!("Tails ({:.0}%)", coin.tails_pct)))
        .gauge_style(Style::default().fg(Color::LightYellow))
        .ratio((coin.tails_pct / 100.0).clamp(0.0, 1.0));
    f.render_widget(tails, stats[1]);
    let streak = match coin.streak {
        Some(s) => format!("{} {}", s.length, s.side),
        None => String::from("N/A"),
    };
    let summary = vec![
        Line::from(format!("Total flips: {} ({} heads / {} tails)", coin.total, coin.heads, coin.tails)),
        Line::from(format!("Current streak: {streak}")),
        Line::from(format!("Luck score: {}/100", coin.luck_score)),
    ];
    f.render_widget(Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title("Stats")), stats[2]);
}

fn draw_recent(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let mut lines = vec![];
    if snap.coin.recent.is_empty() {
        lines.push(Line::styled("None", Style::default().fg(Color::DarkGray)));
    }
    for (side, ago) in &snap.coin.recent {
        lines.push(Line::from(format!("{side:<6} {ago}")));
    }
    let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Recent results"));
    f.render_widget(para, area);
}

fn draw_bottom(f: &mut Frame, state: &UiState, area: Rect, snap: &AppSnapshot) {
    let mut lines = vec![];
    if snap.errors.is_empty() {
        lines.push(Line::styled("No errors", Style::default().fg(Color::DarkGray)));
    } else {
        for e in &snap.errors {
            lines.push(Line::styled(e.clone(), Style::default().fg(Color::Red)));
        }
    }
    let help = match state.tab {
        Tab::Wheel => "F1 single  F2 ratio  F3 confirm  F4 shuffle  F5 sort  F6 spin  F7 reset  Tab coin  Esc quit",
        Tab::Coin => "Space flip  h/t/p predict  m fast mode  a autoflip  Tab wheel  Esc quit",
    };
    lines.push(Line::from(""));
    lines.push(Line::from(help));
    let para = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Errors / Help"))
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn draw_modals(f: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    if let Some(winner) = &snap.revealed {
        let area = centered_rect(40, 20, f.area());
        f.render_widget(Clear, area);
        let lines = vec![
            Line::from(""),
            Line::styled(winner.clone(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)).centered(),
            Line::from(""),
            Line::styled("Enter to close", Style::default().fg(Color::DarkGray)).centered(),
        ];
        let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Result"));
        f.render_widget(para, area);
    }
    if let Mode::QuitModal = state.mode {
        let area = centered_rect(30, 15, f.area());
        f.render_widget(Clear, area);
        let para = Paragraph::new("Quit? (y/n)")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Confirm"));
        f.render_widget(para, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
