use std::io::{self, IsTerminal};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::board::{GroupBy, SortBy};
use crate::domain::ticket::{Priority, Ticket};
use crate::domain::user::User;
use crate::error::AppResult;
use crate::prefs::{PreferenceStore, ViewPreferences};
use crate::services::BoardSnapshot;
use crate::workflow::board::{Column, build_columns};

#[derive(Debug, Clone, Default)]
pub struct BoardCommandArgs {
    pub group_by: Option<GroupBy>,
    pub sort_by: Option<SortBy>,
    pub plain: bool,
}

pub async fn run(ctx: &AppContext, args: BoardCommandArgs) -> AppResult<()> {
    debug!(api_url = %ctx.config.api_url, "starting board session");

    let store = PreferenceStore::open()?;
    let mut app = BoardApp::new(store.load());

    // Flags are explicit selections, same code path as the in-board keys.
    if let Some(group_by) = args.group_by {
        app.set_group_by(group_by, &store);
    }
    if let Some(sort_by) = args.sort_by {
        app.set_sort_by(sort_by, &store);
    }

    if args.plain || !io::stdout().is_terminal() {
        app.apply_fetch(ctx.board_data.fetch_board().await);
        print!("{}", render_plain(&app));
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let board_data = ctx.board_data.clone();
    tokio::spawn(async move {
        // The receiver is gone once the board has quit; the result is then
        // simply dropped.
        let _ = tx.send(board_data.fetch_board().await);
    });

    tokio::task::block_in_place(|| run_event_loop(&mut app, &store, &mut rx))
}

/// In-memory state of one board session: the last fetched data, the active
/// view preferences, and the lifecycle flags the event loop reads.
#[derive(Debug, Default)]
struct BoardApp {
    tickets: Vec<Ticket>,
    users: Vec<User>,
    prefs: ViewPreferences,
    loading: bool,
    quit: bool,
}

impl BoardApp {
    fn new(prefs: ViewPreferences) -> Self {
        Self {
            prefs,
            loading: true,
            ..Self::default()
        }
    }

    /// A successful fetch replaces both lists wholesale; a failed one keeps
    /// whatever the board already had.
    fn apply_fetch(&mut self, result: AppResult<BoardSnapshot>) {
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.tickets = snapshot.tickets;
                self.users = snapshot.users;
            }
            Err(error) => warn!(%error, "board fetch failed; keeping current data"),
        }
    }

    fn set_group_by(&mut self, mode: GroupBy, store: &PreferenceStore) {
        if self.prefs.group_by != mode {
            self.prefs.group_by = mode;
            store.save(self.prefs);
        }
    }

    fn set_sort_by(&mut self, mode: SortBy, store: &PreferenceStore) {
        if self.prefs.sort_by != mode {
            self.prefs.sort_by = mode;
            store.save(self.prefs);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, store: &PreferenceStore) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('g') => self.set_group_by(self.prefs.group_by.next(), store),
            KeyCode::Char('s') => self.set_sort_by(self.prefs.sort_by.next(), store),
            _ => {}
        }
    }

    fn columns(&self) -> Vec<Column> {
        build_columns(&self.tickets, &self.users, &self.prefs)
    }
}

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn run_event_loop(
    app: &mut BoardApp,
    store: &PreferenceStore,
    rx: &mut mpsc::UnboundedReceiver<AppResult<BoardSnapshot>>,
) -> AppResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    while !app.quit {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(200))?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key, store);
        }
        while let Ok(result) = rx.try_recv() {
            app.apply_fetch(result);
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &BoardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(frame.area());

    draw_controls(frame, chunks[0], app);
    draw_columns(frame, chunks[1], app);
}

fn draw_controls(frame: &mut ratatui::Frame, area: Rect, app: &BoardApp) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Grouping ", dim),
        Span::styled(app.prefs.group_by.to_string(), bold),
        Span::raw("    "),
        Span::styled("Ordering ", dim),
        Span::styled(app.prefs.sort_by.to_string(), bold),
    ];
    if app.loading {
        spans.push(Span::raw("    "));
        spans.push(Span::styled("fetching…", Style::default().fg(Color::Yellow)));
    }

    let controls = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" trellis — g: grouping  s: ordering  q: quit "),
    );
    frame.render_widget(controls, area);
}

fn draw_columns(frame: &mut ratatui::Frame, area: Rect, app: &BoardApp) {
    let columns = app.columns();
    if columns.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (column, slot) in columns.iter().zip(slots.iter()) {
        let items: Vec<ListItem> = column
            .tickets
            .iter()
            .map(|ticket| ticket_card(ticket, app.prefs.group_by))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(column_title(column)),
        );
        frame.render_widget(list, *slot);
    }
}

fn column_title(column: &Column) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(glyph) = column.label.glyph {
        spans.push(Span::raw(format!("{glyph} ")));
    }
    if let Some(avatar) = &column.label.avatar {
        let (r, g, b) = avatar.color;
        spans.push(Span::styled(
            format!(" {} ", avatar.initials),
            Style::default().bg(Color::Rgb(r, g, b)).fg(Color::White),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(column.label.text.clone()));
    spans.push(Span::styled(
        format!(" {}", column.tickets.len()),
        Style::default().add_modifier(Modifier::DIM),
    ));
    Line::from(spans)
}

fn ticket_card(ticket: &Ticket, group_by: GroupBy) -> ListItem<'static> {
    let mut title_spans = Vec::new();
    if group_by != GroupBy::Priority
        && let Some(priority) = Priority::from_code(ticket.priority)
    {
        title_spans.push(Span::styled(
            format!("{} ", priority.glyph()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    title_spans.push(Span::raw(ticket.title.clone()));

    let mut lines = vec![
        Line::from(Span::styled(
            ticket.id.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(title_spans),
    ];
    if !ticket.tag.is_empty() {
        lines.push(Line::from(Span::styled(
            ticket.tag.join(", "),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::raw(""));
    ListItem::new(lines)
}

/// One-shot text rendering for `--plain` and piped output.
fn render_plain(app: &BoardApp) -> String {
    let mut out = String::new();
    for column in app.columns() {
        let label = &column.label;
        let header = match (label.glyph, &label.avatar) {
            (Some(glyph), _) => format!("{glyph} {}", label.text),
            (None, Some(avatar)) => format!("[{}] {}", avatar.initials, label.text),
            (None, None) => label.text.clone(),
        };
        out.push_str(&format!("{header} ({})\n", column.tickets.len()));
        for ticket in &column.tickets {
            out.push_str(&format!("  {}  {}\n", ticket.id, ticket.title));
        }
        out.push('\n');
    }
    out
}
