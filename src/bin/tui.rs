use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use puan_tablosu::config::Config;
use puan_tablosu::excel_export::{ExportRequest, export_workbook};
use puan_tablosu::provider::spawn_standings_provider;
use puan_tablosu::state::{self, AppState, apply_delta};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<state::ProviderCommand>>,
    refresh: Duration,
    last_refresh: Instant,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<state::ProviderCommand>>, config: &Config) -> Self {
        Self {
            state: AppState::new(config.season.clone()),
            should_quit: false,
            cmd_tx,
            refresh: config.refresh_interval,
            last_refresh: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                self.state.cycle_league(true);
                self.request_standings(true);
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.state.cycle_league(false);
                self.request_standings(true);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_standings(true),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn request_standings(&mut self, announce: bool) {
        let Some(tx) = &self.cmd_tx else {
            if announce {
                self.state.push_log("[INFO] Standings fetch unavailable");
            }
            return;
        };
        let cmd = self.state.begin_fetch();
        if tx.send(cmd).is_err() {
            self.state.loading = false;
            if announce {
                self.state.push_log("[WARN] Standings request failed");
            }
        } else {
            if announce {
                self.state.push_log(format!(
                    "[INFO] Fetching {}",
                    self.state.league.display_name
                ));
            }
            self.last_refresh = Instant::now();
        }
    }

    fn maybe_refresh(&mut self) {
        if self.last_refresh.elapsed() >= self.refresh {
            self.request_standings(false);
        }
    }

    fn export(&mut self) {
        let request = ExportRequest {
            standings: self.state.rows.clone(),
            matches: Vec::new(),
            league_name: self.state.league.display_name.to_string(),
            season: self.state.season.clone(),
        };
        let result = export_workbook(&request, Utc::now().date_naive()).and_then(|workbook| {
            std::fs::write(&workbook.filename, &workbook.bytes)?;
            Ok(workbook.filename)
        });
        match result {
            Ok(filename) => self.state.push_log(format!("[INFO] Exported {filename}")),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            Config::default()
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_standings_provider(tx, cmd_rx, config.espn_base_url.clone());

    let mut app = App::new(Some(cmd_tx), &config);
    app.request_standings(true);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_refresh();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_table(frame, chunks[1], &app.state);
    render_logs(frame, chunks[2], &app.state);

    let footer = Paragraph::new("h/l League | j/k Scroll | r Refresh | e Excel | ? Help | q Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let source = state.source.map(|s| s.label()).unwrap_or("-");
    let updated = state.updated.as_deref().unwrap_or("-");
    let loading = if state.loading { " | Yükleniyor..." } else { "" };
    format!(
        "PUAN TABLOSU | {} {} | Kaynak: {source} | {updated}{loading}",
        state.league.display_name, state.season
    )
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.rows.is_empty() {
        let text = if state.loading {
            "Yükleniyor..."
        } else {
            "Veri yok"
        };
        let empty = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let total = state.rows.len();
    let header = Row::new(["#", "Takım", "O", "G", "B", "M", "AG", "YG", "AV", "P"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let visible = area.height.saturating_sub(1) as usize;
    let start = state.scroll.min(total.saturating_sub(visible.max(1)));

    let rows = state
        .rows
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(idx, row)| {
            let rank_style = if idx < 4 {
                Style::default().fg(Color::Green)
            } else if idx + 3 >= total {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let av_style = match row.goal_difference {
                d if d > 0 => Style::default().fg(Color::Green),
                d if d < 0 => Style::default().fg(Color::Red),
                _ => Style::default().fg(Color::DarkGray),
            };
            Row::new(vec![
                Cell::from(row.rank.to_string()).style(rank_style),
                Cell::from(row.team.clone()),
                Cell::from(row.played.to_string()),
                Cell::from(row.won.to_string()),
                Cell::from(row.drawn.to_string()),
                Cell::from(row.lost.to_string()),
                Cell::from(row.goals_for.to_string()),
                Cell::from(row.goals_against.to_string()),
                Cell::from(format!("{:+}", row.goal_difference)).style(av_style),
                Cell::from(row.points.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            ])
        });

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(4),
    ];
    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, area);
}

fn render_logs(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(1) as usize;
    let skip = state.logs.len().saturating_sub(visible);
    let text = state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    let logs = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP).title("Log"));
    frame.render_widget(logs, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 50, area);
    let text = [
        "h / l     previous / next league",
        "j / k     scroll table",
        "r         refresh now",
        "e         export table to .xlsx",
        "?         toggle help",
        "q         quit",
    ]
    .join("\n");
    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}
