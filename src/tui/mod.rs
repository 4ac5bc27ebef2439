//! Ratatui-based terminal UI.
//!
//! The TUI shows the three headline metrics, a filter panel (date range,
//! region toggles, top-N), and four tabs of charts. Every filter change
//! recomputes the views from the session's enriched dataset.

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Tabs},
};

use crate::app::pipeline::{self, RunOutput, Session};
use crate::domain::{DashConfig, TopN};
use crate::error::AppError;
use crate::report::{MapEntry, fmt_count, fmt_pct, format_metrics, truncate};

mod plotters_chart;

use plotters_chart::{ChartSeries, DashPlottersChart, SeriesKind, padded_bounds};

/// Load the dataset, then start the TUI.
///
/// Loading happens before the terminal switches to the alternate screen so a
/// data failure is reported like any other CLI error.
pub fn run(config: DashConfig) -> Result<(), AppError> {
    let session = Session::load(&config.sources)?;
    let mut app = App::new(session, &config)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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
enum Tab {
    Maps,
    Distribution,
    Timeline,
    Compare,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Maps, Tab::Distribution, Tab::Timeline, Tab::Compare];

    fn title(self) -> &'static str {
        match self {
            Tab::Maps => "Maps",
            Tab::Distribution => "Distribution",
            Tab::Timeline => "Timeline",
            Tab::Compare => "Compare",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn cycle(self, delta: isize) -> Self {
        let n = Self::ALL.len() as isize;
        Self::ALL[(self.index() as isize + delta).rem_euclid(n) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    From,
    To,
    TopN,
    Regions,
}

impl Field {
    const ALL: [Field; 4] = [Field::From, Field::To, Field::TopN, Field::Regions];
}

struct App {
    session: Session,
    output: RunOutput,
    top_n: TopN,
    from_input: String,
    to_input: String,
    /// Toggle list entries (every region in the dataset, sorted).
    regions: Vec<String>,
    /// Empty means all regions.
    selected: BTreeSet<String>,
    region_cursor: usize,
    field: usize,
    /// Buffer for the date field being edited.
    editing: Option<String>,
    tab: Tab,
    race_frame: usize,
    playing: bool,
    status: String,
}

impl App {
    fn new(session: Session, config: &DashConfig) -> Result<Self, AppError> {
        let criteria = session.criteria(config.date_from, config.date_to, &config.regions)?;
        let from_input = criteria.date_from().to_string();
        let to_input = criteria.date_to().to_string();
        let output = pipeline::run(&session, criteria, config.top_n);

        let mut regions = session.dataset.regions();
        regions.sort();
        let race_frame = output.views.race.frames.len().saturating_sub(1);
        let status = startup_status(&session);

        Ok(Self {
            session,
            output,
            top_n: config.top_n,
            from_input,
            to_input,
            regions,
            selected: config.regions.iter().cloned().collect(),
            region_cursor: 0,
            field: 0,
            editing: None,
            tab: Tab::Maps,
            race_frame,
            playing: false,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100)).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                if self.playing {
                    self.advance_race(1);
                    needs_redraw = true;
                }
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    fn current_field(&self) -> Field {
        Field::ALL[self.field.min(Field::ALL.len() - 1)]
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.tab = self.tab.cycle(1),
            KeyCode::BackTab => self.tab = self.tab.cycle(-1),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.tab = Tab::ALL[idx];
            }
            KeyCode::Up => self.field = self.field.saturating_sub(1),
            KeyCode::Down => self.field = (self.field + 1).min(Field::ALL.len() - 1),
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter | KeyCode::Char(' ') => match self.current_field() {
                Field::From => self.editing = Some(self.from_input.clone()),
                Field::To => self.editing = Some(self.to_input.clone()),
                Field::Regions => self.toggle_region(),
                Field::TopN => {}
            },
            KeyCode::Char('a') => {
                self.selected.clear();
                self.apply_filters();
            }
            KeyCode::Char('[') => self.advance_race(-1),
            KeyCode::Char(']') => self.advance_race(1),
            KeyCode::Char('p') => {
                self.playing = !self.playing;
                if self.playing && self.race_frame + 1 >= self.output.views.race.frames.len() {
                    self.race_frame = 0;
                }
            }
            _ => {}
        }
        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let value = buffer.trim().to_string();
                self.editing = None;
                match self.current_field() {
                    Field::From => self.from_input = value,
                    Field::To => self.to_input = value,
                    _ => {}
                }
                self.apply_filters();
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '/' => buffer.push(c),
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.current_field() {
            Field::TopN => {
                let next = self.top_n.step(delta);
                if next != self.top_n {
                    self.top_n = next;
                    self.apply_filters();
                }
            }
            Field::Regions if !self.regions.is_empty() => {
                let last = self.regions.len() - 1;
                self.region_cursor = if delta < 0 {
                    self.region_cursor.saturating_sub(1)
                } else {
                    (self.region_cursor + 1).min(last)
                };
            }
            _ => {}
        }
    }

    fn toggle_region(&mut self) {
        let Some(region) = self.regions.get(self.region_cursor).cloned() else {
            return;
        };
        if !self.selected.remove(&region) {
            self.selected.insert(region);
        }
        self.apply_filters();
    }

    /// Rebuild criteria from the panel and recompute. An invalid range keeps
    /// the previous views.
    fn apply_filters(&mut self) {
        let from = match parse_input(&self.from_input) {
            Ok(d) => d,
            Err(e) => {
                self.status = format!("Invalid from date '{}': {e}", self.from_input);
                return;
            }
        };
        let to = match parse_input(&self.to_input) {
            Ok(d) => d,
            Err(e) => {
                self.status = format!("Invalid to date '{}': {e}", self.to_input);
                return;
            }
        };

        let regions: Vec<String> = self.selected.iter().cloned().collect();
        match self.session.criteria(from, to, &regions) {
            Ok(criteria) => {
                self.output = pipeline::run(&self.session, criteria, self.top_n);
                self.status = format!("{} rows match", fmt_count(self.output.filtered.len() as u64));
            }
            Err(e) => {
                self.status = format!("{e}; keeping previous filter");
            }
        }
    }

    fn advance_race(&mut self, delta: isize) {
        let frames = self.output.views.race.frames.len();
        if frames == 0 {
            return;
        }
        let next = (self.race_frame as isize + delta).clamp(0, frames as isize - 1) as usize;
        if self.playing && next == self.race_frame {
            self.playing = false;
        }
        self.race_frame = next;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let views = &self.output.views;
        let mut lines: Vec<Line> = vec![Line::from(vec![
            Span::styled("odash", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " | {} .. {} | source: {}",
                views.date_from, views.date_to, self.session.load.origin
            )),
        ])];
        lines.extend(
            format_metrics(views)
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray)))),
        );
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);
        self.draw_filters(frame, chunks[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(chunks[1]);

        let tabs = Tabs::new(Tab::ALL.iter().enumerate().map(|(i, t)| format!("{} {}", i + 1, t.title())))
            .select(self.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, right[0]);

        match self.tab {
            Tab::Maps => self.draw_maps(frame, right[1]),
            Tab::Distribution => self.draw_distribution(frame, right[1]),
            Tab::Timeline => self.draw_timeline(frame, right[1]),
            Tab::Compare => self.draw_compare(frame, right[1]),
        }
    }

    fn draw_filters(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let date_value = |field: Field, input: &str| match (&self.editing, self.current_field() == field) {
            (Some(buffer), true) => format!("{buffer}_"),
            _ => input.to_string(),
        };
        let items = vec![
            ListItem::new(format!("From: {}", date_value(Field::From, &self.from_input))),
            ListItem::new(format!("To:   {}", date_value(Field::To, &self.to_input))),
            ListItem::new(format!("Top N: {}", self.top_n.get())),
        ];
        let mut state = ListState::default();
        if self.field < 3 {
            state.select(Some(self.field));
        }
        let list = List::new(items)
            .block(Block::default().title("Filters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let title = if self.selected.is_empty() {
            "Regions (all)".to_string()
        } else {
            format!("Regions ({})", self.selected.len())
        };
        let items: Vec<ListItem> = self
            .regions
            .iter()
            .map(|r| {
                let mark = if self.selected.contains(r) { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {}", truncate(r, 20)))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.region_cursor));
        let focused = self.current_field() == Field::Regions;
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(if focused {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            });
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_maps(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let views = &self.output.views;
        frame.render_widget(map_table("Cases by region", &views.cases_map), chunks[0]);
        frame.render_widget(map_table("Deaths by region", &views.deaths_map), chunks[1]);
    }

    fn draw_distribution(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let views = &self.output.views;

        // Shares of the top-N total; bar length stands in for the donut slice.
        let bar_width = chunks[0].width.saturating_sub(36).max(4) as f64;
        let rows: Vec<Row> = views
            .top_cases_share
            .iter()
            .map(|s| {
                Row::new(vec![
                    Cell::from(truncate(&s.region, 16)),
                    Cell::from(fmt_pct(s.share)),
                    Cell::from(Span::styled(
                        "█".repeat((s.share * bar_width).round() as usize),
                        Style::default().fg(Color::Cyan),
                    )),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Length(16), Constraint::Length(8), Constraint::Min(4)])
            .header(Row::new(vec!["region", "share", ""]).style(Style::default().add_modifier(Modifier::BOLD)))
            .block(
                Block::default()
                    .title(format!("Top {} by cases (total {})", views.top_n, fmt_count(views.top_cases_total)))
                    .borders(Borders::ALL),
            );
        frame.render_widget(table, chunks[0]);

        // Stacked bars: deaths segment (red) on top of cases (cyan).
        let block = Block::default().title("Cases + deaths by region").borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let span_width = inner.width.saturating_sub(18).max(4) as f64;
        let max_total = views
            .stacked
            .iter()
            .map(|t| t.cases.saturating_add(t.deaths))
            .max()
            .unwrap_or(0)
            .max(1) as f64;
        let lines: Vec<Line> = views
            .stacked
            .iter()
            .map(|t| {
                let cases = (t.cases as f64 / max_total * span_width).round() as usize;
                let deaths = (t.deaths as f64 / max_total * span_width).round() as usize;
                Line::from(vec![
                    Span::raw(format!("{:<17} ", truncate(&t.region, 16))),
                    Span::styled("█".repeat(cases), Style::default().fg(Color::Cyan)),
                    Span::styled("█".repeat(deaths), Style::default().fg(Color::Red)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_timeline(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let views = &self.output.views;

        let block = Block::default().title("Daily cases and deaths").borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        if let Some(first) = views.timeline.first().map(|d| d.date) {
            let offset = |d: NaiveDate| (d - first).num_days() as f64;
            let cases: Vec<(f64, f64)> = views.timeline.iter().map(|d| (offset(d.date), d.cases as f64)).collect();
            let deaths: Vec<(f64, f64)> = views.timeline.iter().map(|d| (offset(d.date), d.deaths as f64)).collect();
            let (x_bounds, y_bounds) = padded_bounds(cases.iter().chain(&deaths), 0.5);
            let fmt_x = |v: f64| {
                first
                    .checked_add_signed(chrono::Duration::days(v.round() as i64))
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            };
            let fmt_y = |v: f64| fmt_count(v.max(0.0).round() as u64);
            frame.render_widget(
                DashPlottersChart {
                    series: vec![
                        ChartSeries {
                            points: &cases,
                            color: RGBColor(0, 255, 255),
                            kind: SeriesKind::Line,
                        },
                        ChartSeries {
                            points: &deaths,
                            color: RGBColor(255, 0, 0),
                            kind: SeriesKind::Line,
                        },
                    ],
                    x_bounds,
                    y_bounds,
                    x_label: "date",
                    y_label: "count",
                    fmt_x: &fmt_x,
                    fmt_y: &fmt_y,
                },
                inner,
            );
        } else {
            frame.render_widget(Paragraph::new("No rows match the filter."), inner);
        }

        let race = &views.race;
        let Some(current) = race.frames.get(self.race_frame) else {
            frame.render_widget(
                Paragraph::new("No race data.").block(Block::default().title("Deaths race").borders(Borders::ALL)),
                chunks[1],
            );
            return;
        };
        let mut standings: Vec<(&String, u64)> = race.regions.iter().zip(current.values.iter().copied()).collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        let bars: Vec<Bar> = standings
            .iter()
            .map(|(region, value)| {
                Bar::default()
                    .value(*value)
                    .label(Line::from(truncate(region, 14)))
                    .text_value(fmt_count(*value))
                    .style(Style::default().fg(Color::Red))
            })
            .collect();
        let play = if self.playing { "playing" } else { "paused" };
        let chart = BarChart::default()
            .block(
                Block::default()
                    .title(format!(
                        "Cumulative deaths race {} ({}/{}, {play})",
                        current.date,
                        self.race_frame + 1,
                        race.frames.len()
                    ))
                    .borders(Borders::ALL),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .max(race.max_value.max(1))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, chunks[1]);
    }

    fn draw_compare(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let views = &self.output.views;

        // Bars are in basis points so BarChart's integer values keep precision.
        let bars: Vec<Bar> = views
            .mortality_top
            .iter()
            .map(|r| {
                Bar::default()
                    .value((r.mortality * 10_000.0).round() as u64)
                    .label(Line::from(truncate(&r.region, 14)))
                    .text_value(fmt_pct(r.mortality))
                    .style(Style::default().fg(Color::Magenta))
            })
            .collect();
        let mut title = format!("Top {} by mortality", views.top_n);
        if !views.mortality_undefined.is_empty() {
            title.push_str(&format!(" ({} without cases)", views.mortality_undefined.len()));
        }
        let chart = BarChart::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, chunks[0]);

        let block = Block::default().title("Deaths vs cases (log-log)").borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let points: Vec<(f64, f64)> = views
            .scatter
            .iter()
            .map(|p| (log10_floor_one(p.cases), log10_floor_one(p.deaths)))
            .collect();
        if points.is_empty() {
            frame.render_widget(Paragraph::new("No rows match the filter."), inner);
            return;
        }
        let (x_bounds, y_bounds) = padded_bounds(&points, 0.1);
        let fmt_log = |v: f64| fmt_count(10f64.powf(v).round().max(0.0) as u64);
        frame.render_widget(
            DashPlottersChart {
                series: vec![ChartSeries {
                    points: &points,
                    color: RGBColor(255, 255, 0),
                    kind: SeriesKind::Points,
                }],
                x_bounds,
                y_bounds,
                x_label: "cases",
                y_label: "deaths",
                fmt_x: &fmt_log,
                fmt_y: &fmt_log,
            },
            inner,
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.editing {
            Some(_) => "type date  Enter apply  Esc cancel",
            None => "Tab/1-4 tabs  ↑/↓ field  ←/→ adjust  Enter edit/toggle  a all  [/] race  p play  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn map_table<'a>(title: &'a str, entries: &'a [MapEntry]) -> Table<'a> {
    let rows: Vec<Row> = entries
        .iter()
        .map(|e| Row::new(vec![e.code.to_string(), e.region.clone(), fmt_count(e.value)]))
        .collect();
    Table::new(rows, [Constraint::Length(4), Constraint::Min(12), Constraint::Length(14)])
        .header(Row::new(vec!["code", "region", "value"]).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().title(title).borders(Borders::ALL))
}

/// Zero counts sit on the axis floor (10^0) instead of vanishing.
fn log10_floor_one(v: u64) -> f64 {
    (v.max(1) as f64).log10()
}

fn parse_input(s: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    crate::io::ingest::parse_date(trimmed).map(Some)
}

fn startup_status(session: &Session) -> String {
    let mut parts = Vec::new();
    let rejected = session.load.row_errors.len();
    if rejected > 0 {
        parts.push(format!("{rejected} rows rejected"));
    }
    if !session.dataset.unrecognized_regions.is_empty() {
        let names: Vec<&str> = session.dataset.unrecognized_regions.iter().map(String::as_str).collect();
        parts.push(format!("unrecognized regions: {}", names.join(", ")));
    }
    if parts.is_empty() {
        format!("Loaded {} rows from {}", fmt_count(session.load.rows_used as u64), session.load.origin)
    } else {
        parts.join("; ")
    }
}
