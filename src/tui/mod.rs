//! Ratatui-based terminal dashboard.
//!
//! The TUI provides a state selector, a KPI summary header, a wage chart with
//! a district table (Overview), and a per-1000-household rates view (Rates).
//! Dataset fetches run on background workers so the UI never blocks on the
//! network; stale responses are discarded via request tokens.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::FALLBACK_SOURCE;
use crate::cli::TuiArgs;
use crate::data::api::PerfClient;
use crate::domain::{
    ALL_STATES, CanonicalMetrics, ChartEntry, NormalizedRecord, RawRecord, SummaryStatistics,
};
use crate::engine;
use crate::error::AppError;
use crate::{report, speech};

mod plotters_chart;
mod worker;

use plotters_chart::{RatesLineChart, WageBarChart};
use worker::{StaleGuard, WorkerEvent};

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::network(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::network(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::network(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Overview,
    Rates,
}

impl View {
    fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Rates => "Rates (per 1000 HH)",
        }
    }
}

struct App {
    client: PerfClient,
    top_n: usize,

    view: View,
    selection: String,
    states: Vec<String>,
    state_idx: usize,

    source: String,
    fetch_error: Option<String>,
    records: Vec<RawRecord>,
    rows: Vec<CanonicalMetrics>,
    summary: SummaryStatistics,
    chart: Vec<ChartEntry>,
    normalized: Vec<NormalizedRecord>,

    districts: Vec<String>,
    /// 0 = all districts; i > 0 selects `districts[i - 1]`.
    district_idx: usize,
    detected_place: Option<String>,

    status: String,
    location_status: String,
    loading: bool,

    guard: StaleGuard,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
}

impl App {
    fn new(args: TuiArgs) -> Result<Self, AppError> {
        let client = PerfClient::from_env()?;
        let (tx, rx) = mpsc::channel();

        let mut app = Self {
            client,
            top_n: args.top.max(1),
            view: View::Overview,
            selection: args.state,
            states: vec![ALL_STATES.to_string()],
            state_idx: 0,
            source: String::from("-"),
            fetch_error: None,
            records: Vec::new(),
            rows: Vec::new(),
            summary: SummaryStatistics::default(),
            chart: Vec::new(),
            normalized: Vec::new(),
            districts: Vec::new(),
            district_idx: 0,
            detected_place: None,
            status: String::new(),
            location_status: "Detecting your location...".to_string(),
            loading: false,
            guard: StaleGuard::default(),
            tx,
            rx,
        };

        app.request_fetch();
        worker::spawn_locate(app.tx.clone());
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            while let Ok(event) = self.rx.try_recv() {
                self.apply_event(event);
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::network(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::network(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::network(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Tab | KeyCode::Char('v') => {
                self.view = match self.view {
                    View::Overview => View::Rates,
                    View::Rates => View::Overview,
                };
            }
            KeyCode::Left => self.adjust_selection(-1),
            KeyCode::Right => self.adjust_selection(1),
            KeyCode::Char('r') => {
                self.request_fetch();
            }
            KeyCode::Char('s') => self.speak_top(),
            KeyCode::Char('d') => {
                let bundle = crate::app::pipeline::RunOutput {
                    source: self.source.clone(),
                    fetch_error: self.fetch_error.clone(),
                    records: self.records.clone(),
                    states: self.states.clone(),
                    rows: self.rows.clone(),
                    summary: self.summary.clone(),
                    chart: self.chart.clone(),
                };
                match crate::debug::write_debug_bundle(&bundle, &self.selection) {
                    Ok(path) => self.status = format!("Wrote debug bundle: {}", path.display()),
                    Err(err) => self.status = format!("Debug write failed: {err}"),
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Cycle the state selection (Overview) or district focus (Rates).
    fn adjust_selection(&mut self, delta: i32) {
        match self.view {
            View::Overview => {
                if self.states.is_empty() {
                    return;
                }
                let last = self.states.len() - 1;
                let next = if delta >= 0 {
                    (self.state_idx + 1).min(last)
                } else {
                    self.state_idx.saturating_sub(1)
                };
                if next == self.state_idx {
                    return;
                }
                self.state_idx = next;
                self.selection = self.states[next].clone();
                // Each selection change is a fresh request; a late response
                // for the previous one will carry a stale token.
                self.request_fetch();
            }
            View::Rates => {
                let last = self.districts.len();
                let next = if delta >= 0 {
                    (self.district_idx + 1).min(last)
                } else {
                    self.district_idx.saturating_sub(1)
                };
                self.district_idx = next;
                self.status = format!("District focus: {}", self.district_focus_label());
            }
        }
    }

    fn request_fetch(&mut self) {
        let token = self.guard.issue();
        self.loading = true;
        self.status = format!("Fetching performance data ({})...", self.selection);
        let state = crate::app::pipeline::state_query_param(&self.selection).map(str::to_string);
        worker::spawn_fetch(self.tx.clone(), self.client.clone(), token, state);
    }

    fn apply_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Dataset { token, outcome } => {
                if !self.guard.is_current(token) {
                    // A newer selection is already in flight; drop this one.
                    return;
                }
                self.loading = false;
                match outcome {
                    Ok(payload) => {
                        self.source = payload.source;
                        self.records = payload.records;
                        self.fetch_error = None;
                        self.status = format!("Loaded {} records.", self.records.len());
                    }
                    Err(err) => {
                        self.source = FALLBACK_SOURCE.to_string();
                        self.records = Vec::new();
                        self.fetch_error = Some(err.to_string());
                        self.status = format!("Fetch failed: {err}");
                    }
                }
                self.reshape();
            }
            WorkerEvent::Location(update) => {
                self.location_status = update.status;
                self.detected_place = update.place;
                self.try_match_location();
            }
        }
    }

    /// Recompute every projection from the current records.
    fn reshape(&mut self) {
        // Server-side state filtering narrows the records, so keep the union
        // of every state name seen this session for the selector.
        let mut names: Vec<String> = self
            .states
            .iter()
            .filter(|s| !s.eq_ignore_ascii_case(ALL_STATES))
            .cloned()
            .collect();
        names.extend(
            engine::list_states(&self.records)
                .into_iter()
                .filter(|s| !s.eq_ignore_ascii_case(ALL_STATES)),
        );
        names.sort();
        names.dedup();
        let mut states = Vec::with_capacity(names.len() + 1);
        states.push(ALL_STATES.to_string());
        states.extend(names);
        self.states = states;
        self.state_idx = self
            .states
            .iter()
            .position(|s| s.eq_ignore_ascii_case(&self.selection))
            .unwrap_or(0);

        let filtered = engine::filter_by_state(&self.records, &self.selection);
        self.rows = filtered.iter().map(engine::canonicalize).collect();
        self.summary = engine::summarize(&filtered);
        self.chart = engine::top_by_wage(&filtered, self.top_n);

        // The rates view covers the full dataset regardless of the state
        // selection; it has its own district focus.
        self.normalized = engine::normalize_all(&self.records);
        let mut districts = Vec::new();
        for row in &self.normalized {
            if !districts.contains(&row.metrics.district_name) {
                districts.push(row.metrics.district_name.clone());
            }
        }
        self.districts = districts;
        self.district_idx = self.district_idx.min(self.districts.len());

        self.try_match_location();
    }

    /// Reconcile the detected place with the loaded districts.
    fn try_match_location(&mut self) {
        let Some(place) = self.detected_place.clone() else {
            return;
        };
        if self.districts.is_empty() {
            return;
        }
        match engine::match_district(&place, &self.districts) {
            Some(matched) => {
                let matched = matched.to_string();
                self.district_idx = self
                    .districts
                    .iter()
                    .position(|d| *d == matched)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.location_status = format!("Auto-selected district: {matched}");
            }
            None => {
                self.location_status = format!("District \"{place}\" not found in data.");
            }
        }
    }

    fn speak_top(&mut self) {
        let Some(top) = self.chart.first().cloned() else {
            self.status = "No data available to speak.".to_string();
            return;
        };
        let text = speech::wage_announcement(&top.label, top.value);
        self.status = format!("Speaking: {text}");
        std::thread::spawn(move || {
            let _ = speech::speak(&text, speech::SPEECH_LANG);
        });
    }

    fn district_focus_label(&self) -> String {
        if self.district_idx == 0 {
            "All districts".to_string()
        } else {
            self.districts[self.district_idx - 1].clone()
        }
    }

    /// Rates rows for the current district focus.
    fn focused_rates(&self) -> Vec<&NormalizedRecord> {
        if self.district_idx == 0 {
            self.normalized.iter().collect()
        } else {
            let wanted = &self.districts[self.district_idx - 1];
            self.normalized
                .iter()
                .filter(|row| row.metrics.district_name == *wanted)
                .collect()
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("nrega", Style::default().fg(Color::Cyan)),
            Span::raw(" — MGNREGA district performance"),
            Span::raw(" | "),
            Span::styled(self.view.title(), Style::default().add_modifier(Modifier::BOLD)),
        ]));

        let loading = if self.loading { " | loading..." } else { "" };
        lines.push(Line::from(Span::styled(
            format!(
                "state: {} | source: {} | districts: {}{loading}",
                self.selection,
                self.source,
                self.rows.len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        lines.push(Line::from(Span::styled(
            format!(
                "workers: {} | households: {} | completed works: {}",
                report::fmt_count(self.summary.total_workers),
                report::fmt_count(self.summary.total_households),
                report::fmt_count(self.summary.completed_works),
            ),
            Style::default().fg(Color::Gray),
        )));

        lines.push(Line::from(Span::styled(
            format!(
                "expenditure: {} | avg daily wage: {}",
                report::fmt_rupees(self.summary.total_expenditure),
                report::fmt_rupees(self.summary.average_wage),
            ),
            Style::default().fg(Color::Gray),
        )));

        lines.push(Line::from(Span::styled(
            self.location_status.clone(),
            Style::default().fg(Color::Yellow),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(12)])
            .split(area);

        match self.view {
            View::Overview => {
                self.draw_wage_chart(frame, chunks[0]);
                self.draw_district_table(frame, chunks[1]);
            }
            View::Rates => {
                self.draw_rates_chart(frame, chunks[0]);
                self.draw_rates_table(frame, chunks[1]);
            }
        }
    }

    fn draw_wage_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Top {} districts by avg daily wage (₹)", self.top_n))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.loading && self.chart.is_empty() {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let y_max = self
            .chart
            .iter()
            .map(|e| e.value)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);

        frame.render_widget(
            WageBarChart {
                entries: &self.chart,
                y_max,
            },
            inner,
        );
    }

    fn draw_rates_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!(
                "Ongoing (blue) vs completed (green) works per 1000 HH — {}",
                self.district_focus_label()
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let rows = self.focused_rates();
        let labels: Vec<String> = rows
            .iter()
            .map(|row| row.metrics.district_name.clone())
            .collect();
        let ongoing: Vec<(f64, f64)> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, row.ongoing_per_1000hh))
            .collect();
        let completed: Vec<(f64, f64)> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, row.completed_per_1000hh))
            .collect();
        let y_max = ongoing
            .iter()
            .chain(completed.iter())
            .map(|&(_, y)| y)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);

        frame.render_widget(
            RatesLineChart {
                ongoing: &ongoing,
                completed: &completed,
                labels: &labels,
                y_max,
            },
            inner,
        );
    }

    fn draw_district_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items: Vec<ListItem> = Vec::new();
        items.push(
            ListItem::new(format!(
                "{:<22} {:<18} {:>9} {:>12} {:>12} {:>10}",
                "District", "State", "Wage(₹)", "Workers", "Households", "Completed"
            ))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        if self.rows.is_empty() {
            items.push(ListItem::new("No data found for selected state."));
        }
        for row in &self.rows {
            items.push(ListItem::new(format!(
                "{:<22} {:<18} {:>9} {:>12} {:>12} {:>10}",
                clip(&row.district_name, 22),
                clip(&row.state_name, 18),
                report::fmt_count(row.average_wage_rate),
                report::fmt_count(row.total_workers),
                report::fmt_count(row.total_households),
                report::fmt_count(row.completed_works),
            )));
        }

        let list = List::new(items)
            .block(Block::default().title("Districts").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_rates_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items: Vec<ListItem> = Vec::new();
        items.push(
            ListItem::new(format!(
                "{:<22} {:<18} {:>14} {:>14} {:>16}",
                "District", "State", "Active/1000HH", "Ongoing/1000HH", "Completed/1000HH"
            ))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        let rows = self.focused_rates();
        if rows.is_empty() {
            items.push(ListItem::new("No data found for selected district."));
        }
        for row in rows {
            items.push(ListItem::new(format!(
                "{:<22} {:<18} {:>14} {:>14} {:>16}",
                clip(&row.metrics.district_name, 22),
                clip(&row.metrics.state_name, 18),
                report::fmt_rate(row.active_per_1000hh),
                report::fmt_rate(row.ongoing_per_1000hh),
                report::fmt_rate(row.completed_per_1000hh),
            )));
        }

        let list = List::new(items).block(
            Block::default()
                .title(format!("Rates — {}", self.district_focus_label()))
                .borders(Borders::ALL),
        );
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ select  Tab view  r refresh  s speak  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(max.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
