//! Task board interface.
//!
//! This module implements the board view: the parent task in a header, its
//! subtasks as cards in To Do, In Progress and Completed lanes, and a full
//! width Backlog lane underneath. Cards are dragged between lanes with the
//! mouse or picked up and dropped with the keyboard.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{trace, warn};

use crate::controller::{BoardController, FetchRequest, FetchResponse};
use crate::db::{format_assignees, format_deadline_relative, truncate};
use crate::fields::Status;
use crate::partition::Lanes;
use crate::reassign::StatusChange;
use crate::source::TaskSource;
use crate::task::Task;
use crate::tui::theme::Theme;
use crate::tui::utils::{card_slots, centered_rect, scroll_to_show, wrap_title};

const CARD_HEIGHT: u16 = 6;
const BACKLOG_CARD_WIDTH: u16 = 32;

/// Main board application state
pub struct BoardApp {
    controller: BoardController,
    source: Arc<dyn TaskSource>,
    fetch_tx: Sender<FetchResponse>,
    fetch_rx: Receiver<FetchResponse>,
    theme: Theme,
    selected_lane: Status,
    selected_card: usize,
    lane_scroll_rows: [usize; 4],
    // Hit areas from the last frame, for the mouse.
    lane_areas: [Rect; 4],
    card_areas: Vec<(Rect, String)>,
    pressed_card: Option<String>,
    status_message: String,
    show_task_detail: bool,
    session_changes: Vec<StatusChange>,
}

impl BoardApp {
    /// Create the board and start fetching `task_id`.
    pub fn new(source: Arc<dyn TaskSource>, task_id: &str, theme: Theme) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel();
        let mut app = BoardApp {
            controller: BoardController::new(),
            source,
            fetch_tx,
            fetch_rx,
            theme,
            selected_lane: Status::Todo,
            selected_card: 0,
            lane_scroll_rows: [0; 4],
            lane_areas: [Rect::default(); 4],
            card_areas: Vec::new(),
            pressed_card: None,
            status_message: String::new(),
            show_task_detail: false,
            session_changes: Vec::new(),
        };
        let requests = app.controller.mount(task_id);
        app.dispatch(requests);
        app
    }

    /// Run fetches on background threads; results come back over the channel.
    fn dispatch(&self, requests: Vec<FetchRequest>) {
        for request in requests {
            let source = Arc::clone(&self.source);
            let tx = self.fetch_tx.clone();
            thread::spawn(move || {
                // The receiver is gone once the board has closed.
                tx.send(request.run(source.as_ref())).ok();
            });
        }
    }

    /// Apply whatever fetch results have arrived.
    fn drain_fetches(&mut self) {
        let mut applied = false;
        while let Ok(response) = self.fetch_rx.try_recv() {
            applied |= self.controller.apply(response);
        }
        if applied {
            self.clamp_selection();
        }
    }

    /// Switch the board to another task.
    fn navigate_to(&mut self, task_id: &str) {
        self.collect_changes();
        let requests = self.controller.navigate(task_id);
        self.dispatch(requests);
        self.reset_selection();
        self.set_status_message(format!("Opened task {task_id}"));
    }

    fn navigate_back(&mut self) {
        self.collect_changes();
        match self.controller.back() {
            Some(requests) => {
                self.dispatch(requests);
                self.reset_selection();
                self.set_status_message("Returned to previous task".to_string());
            }
            None => self.set_status_message("No previous task to return to".to_string()),
        }
    }

    fn collect_changes(&mut self) {
        self.session_changes.extend(self.controller.take_changes());
    }

    fn reset_selection(&mut self) {
        self.selected_lane = Status::Todo;
        self.selected_card = 0;
        self.lane_scroll_rows = [0; 4];
        self.show_task_detail = false;
    }

    /// Ensure the selected card index is valid for its lane
    fn clamp_selection(&mut self) {
        let lane = self.selected_lane;
        let lane_len = self.controller.lanes().map_or(0, |lanes| lanes.get(lane).len());
        if lane_len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= lane_len {
            self.selected_card = lane_len - 1;
        }
    }

    fn selected_task(&mut self) -> Option<Task> {
        let (lane, card) = (self.selected_lane, self.selected_card);
        self.controller.lanes()?.get(lane).get(card).cloned()
    }

    /// Point the selection at a task wherever it now sits.
    fn select_task(&mut self, task_id: &str) {
        if let Some((lane, pos)) = self.controller.lanes().and_then(|lanes| lanes.lane_of(task_id)) {
            self.selected_lane = lane;
            self.selected_card = pos;
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn lane_at(&self, column: u16, row: u16) -> Option<Status> {
        let pos = Position::new(column, row);
        Status::ALL
            .into_iter()
            .find(|s| self.lane_areas[s.index()].contains(pos))
    }

    fn card_at(&self, column: u16, row: u16) -> Option<String> {
        let pos = Position::new(column, row);
        self.card_areas
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, id)| id.clone())
    }

    /// Pick up the selected card, or drop the one being carried.
    fn toggle_drag(&mut self) {
        if self.controller.drag().is_dragging() {
            self.finish_drop();
            return;
        }
        let Some(task) = self.selected_task() else {
            self.set_status_message("No task selected".to_string());
            return;
        };
        match self.controller.begin_drag(&task.id) {
            Ok(()) => self.set_status_message(format!(
                "Moving #{}: ←/→ choose lane, Space drop, Esc cancel",
                task.id
            )),
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    fn finish_drop(&mut self) {
        let dragged = self.controller.drag().task().map(|t| t.id.clone());
        let hovered = self.controller.drag().hovered();
        match (self.controller.drop_on_hovered(), hovered) {
            (Some(change), _) => {
                let label = self.theme.style(change.to).title.clone();
                self.set_status_message(format!("Moved #{} to {label}", change.task_id));
            }
            (None, Some(_)) => self.set_status_message("Task left in place".to_string()),
            (None, None) => self.set_status_message("Move cancelled".to_string()),
        }
        if let Some(id) = dragged {
            self.select_task(&id);
        }
        self.clamp_selection();
    }

    fn move_hover(&mut self, forward: bool) {
        let current = self.controller.drag().hovered().unwrap_or(self.selected_lane);
        let next = if forward { current.next() } else { current.prev() };
        if let Some(lane) = next {
            self.controller.hover(Some(lane));
        }
    }

    fn move_lane_selection(&mut self, forward: bool) {
        let next = if forward { self.selected_lane.next() } else { self.selected_lane.prev() };
        if let Some(lane) = next {
            self.selected_lane = lane;
            self.clamp_selection();
        }
    }

    fn open_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_message("No task selected to open".to_string());
            return;
        };
        if let Some(request) = self.controller.open_task(&task.id) {
            self.navigate_to(&request.task_id);
        }
    }

    /// Handle a key press. Returns true when the board should close.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return true;
        }

        if self.controller.drag().is_dragging() {
            match key.code {
                KeyCode::Esc => {
                    self.controller.cancel_drag();
                    self.set_status_message("Move cancelled".to_string());
                }
                KeyCode::Left => self.move_hover(false),
                KeyCode::Right => self.move_hover(true),
                KeyCode::Char(' ') | KeyCode::Enter => self.finish_drop(),
                _ => {}
            }
            return false;
        }

        self.clear_status_message();

        match key.code {
            KeyCode::Esc if self.show_task_detail => self.show_task_detail = false,
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Enter => self.show_task_detail = !self.show_task_detail,
            KeyCode::Char(' ') => self.toggle_drag(),
            KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('b') | KeyCode::Backspace => self.navigate_back(),
            KeyCode::Left => self.move_lane_selection(false),
            KeyCode::Right => self.move_lane_selection(true),
            KeyCode::Up => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyCode::Down => {
                self.selected_card += 1;
                self.clamp_selection();
            }
            KeyCode::Char('h') => {
                self.set_status_message("Help: Space: pick up/drop | ←/→: lane | ↑/↓: card | Enter: details | o: open | b: back | q: quit".to_string());
            }
            _ => {}
        }
        false
    }

    /// Mouse drag-and-drop: press on a card, drag over a lane, release to drop.
    /// A press and release without dragging opens the card's own board.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_card = self.card_at(mouse.column, mouse.row);
                if let Some(id) = self.pressed_card.clone() {
                    self.select_task(&id);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.controller.drag().is_dragging() {
                    if let Some(id) = self.pressed_card.clone() {
                        if let Err(e) = self.controller.begin_drag(&id) {
                            warn!(error = %e, "could not start drag");
                        }
                    }
                }
                let lane = self.lane_at(mouse.column, mouse.row);
                self.controller.hover(lane);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed_card.take();
                if self.controller.drag().is_dragging() {
                    let lane = self.lane_at(mouse.column, mouse.row);
                    self.controller.hover(lane);
                    self.finish_drop();
                } else if let Some(id) = pressed {
                    if self.card_at(mouse.column, mouse.row).as_deref() == Some(id.as_str()) {
                        if let Some(request) = self.controller.open_task(&id) {
                            self.navigate_to(&request.task_id);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Poll for input. Returns true when the board should close.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => return Ok(self.handle_key(key)),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(false)
    }

    /// Render the board
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.card_areas.clear();
        self.lane_areas = [Rect::default(); 4];

        if let Some(msg) = self.controller.parent_state().error().map(str::to_string) {
            let area = f.area();
            self.render_error(f, area, "Task", &msg);
            return;
        }

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
    }

    fn render_error(&self, f: &mut Frame, area: Rect, scope: &str, msg: &str) {
        let text = vec![
            Line::from(Span::styled(
                format!("{scope} unavailable"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(msg.to_string()),
            Line::from(""),
            Line::from("b: back | q: quit"),
        ];
        let block = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(block, area);
    }

    /// Render the parent task header
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header_text = match self.controller.parent_state().ready() {
            Some(parent) => vec![
                Line::from(vec![
                    Span::styled(
                        format!("#{} {}", parent.id, parent.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        self.theme.style(parent.status).title.clone(),
                        Style::default()
                            .bg(self.theme.style(parent.status).accent)
                            .fg(self.theme.text_on(parent.status)),
                    ),
                ]),
                Line::from(Span::styled(
                    truncate(&parent.description, area.width.saturating_sub(4) as usize),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
                )),
            ],
            None => vec![Line::from("Loading task…")],
        };

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL).title("TASK BOARD"))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    /// Render the lanes, or the board-scoped loading/error state
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        if let Some(msg) = self.controller.board_state().error().map(str::to_string) {
            self.render_error(f, area, "Subtasks", &msg);
            return;
        }
        let Some(lanes) = self.controller.shared_lanes() else {
            let loading = Paragraph::new("Loading subtasks…")
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            f.render_widget(loading, area);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let top_lanes: Vec<Status> = Status::ALL.into_iter().filter(|s| !s.is_full_width()).collect();
        let constraints: Vec<Constraint> = top_lanes
            .iter()
            .map(|_| Constraint::Ratio(1, top_lanes.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[0]);

        for (status, &lane_area) in top_lanes.iter().zip(columns.iter()) {
            self.render_lane(f, lane_area, *status, lanes.get(*status));
        }
        for status in Status::ALL.into_iter().filter(|s| s.is_full_width()) {
            self.render_lane(f, rows[1], status, lanes.get(status));
        }
    }

    /// Render a single lane
    fn render_lane(&mut self, f: &mut Frame, area: Rect, status: Status, cards: &[Task]) {
        self.lane_areas[status.index()] = area;
        let style = self.theme.style(status).clone();
        let is_selected = status == self.selected_lane;
        let is_over = self.controller.drag().is_over(status);

        let mut border_style = Style::default().fg(style.accent);
        if is_selected || is_over {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_over { BorderType::Double } else { BorderType::Plain })
            .title(format!(" {} ({}) ", style.title, cards.len()))
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        if cards.is_empty() {
            return;
        }

        let columns = if status.is_full_width() {
            (inner.width / BACKLOG_CARD_WIDTH).max(1)
        } else {
            1
        };
        let slots = card_slots(inner, columns, CARD_HEIGHT);
        let per_row = usize::from(columns);
        let visible_rows = slots.len() / per_row;

        let scroll_row = if is_selected {
            let row = scroll_to_show(
                self.lane_scroll_rows[status.index()],
                self.selected_card / per_row,
                visible_rows,
            );
            self.lane_scroll_rows[status.index()] = row;
            row
        } else {
            self.lane_scroll_rows[status.index()]
        };
        let skipped = (scroll_row * per_row).min(cards.len());

        let dragged_id = self.controller.drag().task().map(|t| t.id.clone());
        let mut rendered = 0;
        for ((card_index, task), slot) in cards.iter().enumerate().skip(skipped).zip(slots.iter()) {
            let is_this_card_selected = is_selected && card_index == self.selected_card;
            let is_dragged = dragged_id.as_deref() == Some(task.id.as_str());
            self.render_card(f, *slot, task, status, is_this_card_selected, is_dragged);
            self.card_areas.push((*slot, task.id.clone()));
            rendered += 1;
        }

        if skipped > 0 {
            let indicator = Paragraph::new(format!("▲ +{skipped} above"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = cards.len() - skipped - rendered;
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{remaining} below"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
        trace!(lane = %status, rendered, remaining, "lane rendered");
    }

    /// Render a single task card
    fn render_card(&self, f: &mut Frame, area: Rect, task: &Task, lane: Status, is_selected: bool, is_dragged: bool) {
        let accent = self.theme.style(lane).accent;
        let style = if is_dragged {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM | Modifier::ITALIC)
        } else if is_selected {
            Style::default().bg(accent).fg(self.theme.text_on(lane)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray)
        };

        let now = Utc::now();
        let mut card_text = vec![Line::from(format!(
            "#{}  {}",
            task.id,
            format_deadline_relative(task.deadline, now)
        ))];

        let available_width = area.width.saturating_sub(2) as usize;
        for line in wrap_title(&task.title, available_width, 2) {
            card_text.push(Line::from(line));
        }

        let mut footer = format_assignees(&task.assignees);
        if task.sub_task_count() > 0 {
            footer = format!("{footer} | {} sub", task.sub_task_count());
        }
        card_text.push(Line::from(truncate(&footer, available_width)));

        let card_block = Paragraph::new(card_text)
            .block(Block::default().borders(Borders::ALL))
            .style(style);

        f.render_widget(card_block, area);
    }

    /// Render the status bar
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            self.collect_changes();
            let total = self.controller.lanes().map_or(0, Lanes::len);
            let moved = self.session_changes.len();
            let moved_indicator = if moved > 0 { format!(" [{moved} unsaved moves]") } else { String::new() };
            format!("Tasks: {total}{moved_indicator} | Space: Move | Enter: Details | o: Open | b: Back | h: Help | q: Quit")
        };

        let lane = self.selected_lane;
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(self.theme.style(lane).accent).fg(self.theme.text_on(lane)))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Render the task detail popup
    fn render_task_detail_popup(&mut self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };

        let popup_area = centered_rect(80, 80, f.area());
        f.render_widget(Clear, popup_area);

        let now = Utc::now();
        let mut detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Status:    {}", self.theme.style(task.status).title)),
            Line::from(format!(
                "Deadline:  {} ({})",
                task.deadline.format("%Y-%m-%d %H:%M UTC"),
                format_deadline_relative(task.deadline, now)
            )),
            Line::from(format!("Assignees: {}", format_assignees(&task.assignees))),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-".to_string() } else { task.description.clone() }),
        ];

        if let Some(subs) = task.sub_tasks.as_ref().filter(|s| !s.is_empty()) {
            detail_lines.push(Line::from(""));
            detail_lines.push(Line::from("Subtasks:"));
            detail_lines.extend(subs.iter().map(|s| Line::from(format!("  • {}", s.title))));
        }

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Enter to close, o to open)")
            .title_alignment(Alignment::Center)
            .border_style(
                Style::default()
                    .fg(self.theme.style(task.status).accent)
                    .add_modifier(Modifier::BOLD),
            );

        let popup_paragraph = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));

        f.render_widget(popup_paragraph, popup_area);
    }

    /// Status changes made while the board was open. None of them were saved.
    pub fn into_changes(mut self) -> Vec<StatusChange> {
        self.collect_changes();
        self.session_changes
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.drain_fetches();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        self.controller.unmount();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::TimeZone;
    use ratatui::backend::TestBackend;

    /// Open the demo board on `task_id` and wait until both fetches have landed.
    fn app_for(task_id: &str) -> BoardApp {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let source: Arc<dyn TaskSource> = Arc::new(Database::demo(now));
        let mut app = BoardApp::new(source, task_id, Theme::default());
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while (app.controller.parent_state().is_loading() || app.controller.board_state().is_loading())
            && std::time::Instant::now() < deadline
        {
            app.drain_fetches();
            thread::sleep(Duration::from_millis(5));
        }
        app
    }

    fn app() -> BoardApp {
        app_for("launch")
    }

    fn screen(app: &mut BoardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn loads_lanes_from_source() {
        let mut app = app();
        let lanes = app.controller.lanes().unwrap();
        assert_eq!(lanes.get(Status::Todo).len(), 1);
        assert_eq!(lanes.get(Status::Backlog).len(), 2);
    }

    #[test]
    fn keyboard_pick_up_and_drop_moves_card() {
        let mut app = app();
        assert!(!app.handle_key(key(KeyCode::Char(' '))));
        assert!(app.controller.drag().is_over(Status::Todo));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char(' ')));

        let lanes = app.controller.lanes().unwrap();
        assert!(lanes.get(Status::Todo).is_empty());
        assert_eq!(lanes.get(Status::Completed).len(), 2);
        assert_eq!(app.selected_lane, Status::Completed);
        assert_eq!(app.into_changes().len(), 1);
    }

    #[test]
    fn escape_cancels_drag_without_quitting() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(!app.controller.drag().is_dragging());
        assert!(app.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn renders_every_lane_title() {
        let mut app = app();
        let text = screen(&mut app);
        for status in Status::ALL {
            assert!(text.contains(status.label()), "missing lane {status}");
        }
        assert!(text.contains("Launch public beta"));
    }

    #[test]
    fn missing_parent_renders_only_the_error() {
        let mut app = app_for("nope");
        assert!(app.controller.parent_state().error().is_some());
        let text = screen(&mut app);
        assert!(text.contains("Task unavailable"));
        assert!(text.contains("task not found: nope"));
        for status in Status::ALL {
            assert!(!text.contains(status.label()), "lane {status} rendered");
        }
        assert!(!text.contains("TASK BOARD"));
        assert!(app.card_areas.is_empty());
    }

    #[test]
    fn mouse_drag_drops_on_lane_under_pointer() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let (card, _) = app
            .card_areas
            .iter()
            .find(|(_, id)| id == "docs")
            .cloned()
            .unwrap();
        let backlog = app.lane_areas[Status::Backlog.index()];
        let mouse = |kind, column, row| MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE };

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card.x + 1, card.y + 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), backlog.x + 1, backlog.y + 1));
        assert!(app.controller.drag().is_over(Status::Backlog));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), backlog.x + 1, backlog.y + 1));

        let lanes = app.controller.lanes().unwrap();
        assert_eq!(lanes.lane_of("docs").map(|(s, _)| s), Some(Status::Backlog));
    }
}
