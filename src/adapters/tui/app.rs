use chrono::{Datelike, Utc};
use color_eyre::Result;
use ratatui::{
    prelude::*,
    widgets::{self, Borders, Clear, Paragraph, Wrap},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::{
    chrome,
    document::{Block, Document, Focus, LinkTarget},
    event::{AppEvent, EventHandler},
    pages::{self, contact::FormView},
};
use crate::adapters::viewport::TerminalViewport;
use crate::application::pages::{ContactController, HomeContent, ProjectDetail, ProjectList};
use crate::application::SiteService;
use crate::domain::{FormField, Route, SiteProfile};

/// Poll interval while something is moving on screen
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const IDLE_INTERVAL: Duration = Duration::from_millis(100);
const HISTORY_LIMIT: usize = 50;
const CONTENT_MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Browse,
    Help,
}

enum Page {
    Home(HomeContent),
    Projects(ProjectList),
    ProjectDetail(ProjectDetail),
    Contact(ContactController),
}

pub struct App {
    service: Arc<SiteService>,
    profile: SiteProfile,
    viewport: Arc<TerminalViewport>,

    // UI State
    mode: AppMode,
    route: Route,
    history: Vec<Route>,
    page: Page,
    document: Document,
    /// Block index of the focused link, field or button
    focused: Option<usize>,
    page_rows: u16,
    animating: bool,

    // Messages
    notice: Option<String>,
    status_message: Option<String>,

    // Store calls report back here; each carries the mount it was issued for
    generation: u64,
    results_tx: mpsc::UnboundedSender<AppEvent>,
    results_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(
        service: Arc<SiteService>,
        profile: SiteProfile,
        viewport: Arc<TerminalViewport>,
        route: Route,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let document = Document::new(viewport.clone());

        let mut app = Self {
            service,
            profile,
            viewport,
            mode: AppMode::Browse,
            route: Route::Home,
            history: Vec::new(),
            page: Page::Home(HomeContent::for_profile(&SiteProfile::default())),
            document,
            focused: None,
            page_rows: 0,
            animating: false,
            notice: None,
            status_message: None,
            generation: 0,
            results_tx,
            results_rx,
        };
        app.mount(route);
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, route.clone());
        self.history.push(previous);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.mount(route);
    }

    pub fn back(&mut self) {
        if let Some(route) = self.history.pop() {
            self.mount(route);
        }
    }

    /// Unmount the current page and mount `route` in its place.
    fn mount(&mut self, route: Route) {
        self.generation += 1;
        // Dropping the old document releases every watch its page held
        self.document = Document::new(self.viewport.clone());
        self.viewport.clear_layout();
        self.focused = None;
        self.notice = None;
        self.status_message = None;

        self.page = match &route {
            Route::Home => Page::Home(HomeContent::for_profile(&self.profile)),
            Route::Projects => Page::Projects(ProjectList::new()),
            Route::ProjectDetail(id) => Page::ProjectDetail(ProjectDetail::new(Some(id.clone()))),
            Route::Contact => Page::Contact(ContactController::new()),
        };
        tracing::info!("Mounted {} (generation {})", route, self.generation);
        self.route = route;
        self.start_fetch();
    }

    fn start_fetch(&self) {
        let service = self.service.clone();
        let tx = self.results_tx.clone();
        let generation = self.generation;

        match &self.page {
            Page::Projects(_) => {
                tokio::spawn(async move {
                    let result = service.list_projects().await;
                    send(&tx, AppEvent::ProjectsLoaded { generation, result });
                });
            }
            Page::ProjectDetail(detail) => {
                if let Some(id) = detail.pending_fetch().cloned() {
                    tokio::spawn(async move {
                        let result = service.get_project(&id).await;
                        send(&tx, AppEvent::ProjectLoaded { generation, result });
                    });
                }
            }
            Page::Home(_) | Page::Contact(_) => {}
        }
    }

    /// Apply every store result that arrived since the last call.
    pub fn drain_results(&mut self) {
        while let Ok(event) = self.results_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn focused_field(&self) -> Option<FormField> {
        match self.focused.and_then(|index| self.document.focus_at(index)) {
            Some(Focus::Field(field)) => Some(*field),
            _ => None,
        }
    }

    /// Returns true when the application should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        if self.mode == AppMode::Help {
            match event {
                AppEvent::Quit => return true,
                AppEvent::Character(_) | AppEvent::CloseModal | AppEvent::Activate => {
                    self.mode = AppMode::Browse;
                    return false;
                }
                _ => {}
            }
        }

        match event {
            AppEvent::Quit => return true,

            AppEvent::CloseModal => {
                if self.focused_field().is_some() {
                    self.focused = None;
                }
            }

            AppEvent::Reload => self.mount(self.route.clone()),

            AppEvent::ScrollDown => self.document.scroll_by_rows(1),
            AppEvent::ScrollUp => self.document.scroll_by_rows(-1),
            AppEvent::PageDown => self
                .document
                .scroll_by_rows(i32::from(self.page_rows.saturating_sub(2).max(1))),
            AppEvent::PageUp => self
                .document
                .scroll_by_rows(-i32::from(self.page_rows.saturating_sub(2).max(1))),
            AppEvent::ScrollTop => self.document.scroll_to_row(0),
            AppEvent::ScrollBottom => self.document.scroll_to_row(u16::MAX),

            AppEvent::NextFocus => self.move_focus(1),
            AppEvent::PreviousFocus => self.move_focus(-1),
            AppEvent::Activate => self.activate(),

            AppEvent::Character(c) => {
                if let Some(field) = self.focused_field() {
                    if let Page::Contact(controller) = &mut self.page {
                        controller.push_char(field, c);
                        self.notice = None;
                    }
                    return false;
                }
                return self.handle_command(c);
            }

            AppEvent::Backspace => {
                if let Some(field) = self.focused_field() {
                    if let Page::Contact(controller) = &mut self.page {
                        controller.pop_char(field);
                    }
                } else {
                    self.back();
                }
            }

            AppEvent::ProjectsLoaded { generation, result } => match &mut self.page {
                Page::Projects(list) if generation == self.generation => list.apply(result),
                _ => tracing::debug!("Dropping stale project list (generation {})", generation),
            },

            AppEvent::ProjectLoaded { generation, result } => match &mut self.page {
                Page::ProjectDetail(detail) if generation == self.generation => detail.apply(result),
                _ => tracing::debug!("Dropping stale project (generation {})", generation),
            },

            AppEvent::ContactSubmitted { generation, result } => match &mut self.page {
                Page::Contact(controller) if generation == self.generation => {
                    controller.complete_submit(result)
                }
                _ => tracing::debug!("Dropping stale submission result (generation {})", generation),
            },

            AppEvent::Tick => {}
        }

        false
    }

    fn handle_command(&mut self, c: char) -> bool {
        match c {
            'q' => return true,
            'j' => self.document.scroll_by_rows(1),
            'k' => self.document.scroll_by_rows(-1),
            'g' => self.document.scroll_to_row(0),
            'G' => self.document.scroll_to_row(u16::MAX),
            'h' => self.navigate(Route::Home),
            'p' => self.navigate(Route::Projects),
            'c' => self.navigate(Route::Contact),
            'b' => self.back(),
            'r' => self.mount(self.route.clone()),
            '?' => self.mode = AppMode::Help,
            _ => {}
        }
        false
    }

    fn move_focus(&mut self, step: i32) {
        let focusables = self.document.focusables();
        if focusables.is_empty() {
            self.focused = None;
            return;
        }

        let len = focusables.len() as i32;
        let current = self
            .focused
            .and_then(|index| focusables.iter().position(|f| *f == index));
        let next = match current {
            Some(position) => (position as i32 + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };

        let index = focusables[next as usize];
        self.focused = Some(index);
        self.document.ensure_visible(index);
    }

    fn activate(&mut self) {
        let Some(focus) = self
            .focused
            .and_then(|index| self.document.focus_at(index))
            .cloned()
        else {
            return;
        };

        match focus {
            Focus::Link(LinkTarget::Route(route)) => self.navigate(route),
            Focus::Link(LinkTarget::External(url)) => {
                tracing::info!("External link selected: {}", url);
                self.status_message = Some(format!("Open {url} in your browser"));
            }
            Focus::Field(_) => self.move_focus(1),
            Focus::Submit => self.submit_contact(),
        }
    }

    fn submit_contact(&mut self) {
        let Page::Contact(controller) = &mut self.page else {
            return;
        };

        match controller.begin_submit(Utc::now()) {
            Ok(Some(submission)) => {
                self.notice = None;
                let service = self.service.clone();
                let tx = self.results_tx.clone();
                let generation = self.generation;
                tokio::spawn(async move {
                    let result = service.submit_contact(&submission).await;
                    send(&tx, AppEvent::ContactSubmitted { generation, result });
                });
            }
            Ok(None) => {}
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn page_blocks(&self, width: u16) -> Vec<Block> {
        let mut blocks = match &self.page {
            Page::Home(content) => pages::home::blocks(content),
            Page::Projects(list) => pages::projects::blocks(list),
            Page::ProjectDetail(detail) => pages::project_detail::blocks(detail),
            Page::Contact(controller) => pages::contact::blocks(
                controller,
                &self.profile,
                FormView {
                    focused_field: self.focused_field(),
                    notice: self.notice.as_deref(),
                },
                width,
            ),
        };
        blocks.extend(chrome::footer_blocks(&self.profile, Utc::now().year()));
        blocks
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Page
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        let page_area = chunks[1];
        let content = Rect::new(
            page_area.x + CONTENT_MARGIN.min(page_area.width / 2),
            page_area.y,
            page_area.width.saturating_sub(CONTENT_MARGIN * 2),
            page_area.height,
        );

        let blocks = self.page_blocks(content.width);
        self.document.set_blocks(blocks);
        self.document.layout(content.width, content.height);
        self.page_rows = content.height;

        let now = Instant::now();
        let events = self.viewport.poll();
        self.document.dispatch(&events, now);
        self.animating = self.document.tick(now);

        if let Some(index) = self.focused {
            if self.document.focus_at(index).is_none() {
                self.focused = None;
            }
        }

        chrome::render_header(frame, chunks[0], &self.profile, &self.route);
        self.document
            .render(frame.buffer_mut(), content, now, self.focused);
        self.render_status_bar(frame, chunks[2]);

        if self.mode == AppMode::Help {
            self.render_help(frame);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let text = if let Some(message) = &self.status_message {
            format!("{} | {}", self.route, message)
        } else {
            let help = match self.focused.and_then(|index| self.document.focus_at(index)) {
                Some(Focus::Field(_)) => "Type to edit | Tab: next field | Esc: stop editing",
                Some(Focus::Submit) => "Enter: send message | Tab: next | Esc: unfocus",
                Some(Focus::Link(_)) => "Enter: open link | Tab: next link | j/k: scroll | b: back",
                None => "j/k: scroll | Tab: links | h/p/c: pages | b: back | r: reload | q: quit | ?: help",
            };
            format!("{} | {}", self.route, help)
        };

        let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let popup_area = Self::centered_rect(60, 70, frame.area());

        frame.render_widget(Clear, popup_area);

        let help_text = [
            "Navigation:",
            "  j/k or ↑/↓     - Scroll the page",
            "  g/G            - Top/bottom of the page",
            "  Page Up/Down   - Fast scroll",
            "  Tab/Shift+Tab  - Move between links and form fields",
            "  Enter          - Open the focused link",
            "  b or Backspace - Back to the previous page",
            "",
            "Pages:",
            "  h              - Home",
            "  p              - Projects",
            "  c              - Contact",
            "  r              - Reload the current page",
            "",
            "Contact form:",
            "  Type to edit the focused field",
            "  Enter on Send Message submits",
            "  Esc            - Stop editing",
            "",
            "General:",
            "  ?              - Show this help",
            "  q              - Quit",
            "  Ctrl+C         - Force quit application",
            "",
            "Press any key to close this help",
        ]
        .join("\n");

        let paragraph = Paragraph::new(help_text)
            .block(widgets::Block::default().title("Help").borders(Borders::ALL))
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
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
}

fn send(tx: &mpsc::UnboundedSender<AppEvent>, event: AppEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("UI loop gone, dropping store result");
    }
}

pub async fn run_tui(mut app: App) -> Result<()> {
    // color-eyre is already initialized in main.rs
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Cleanup, also when the loop failed
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut event_handler = EventHandler::new();

    loop {
        app.drain_results();
        terminal.draw(|frame| app.render(frame))?;

        let timeout = if app.is_animating() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        let event = event_handler.next_event(timeout)?;
        if app.handle_event(event) || event_handler.should_quit() {
            break;
        }
    }

    Ok(())
}
