//! Interactive terminal viewer.
//!
//! The chart is rasterized into a [`Canvas`] with one pixel per column and two
//! per row, then shown with upper-half-block cells. Labels are written as
//! plain text cells on top.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::chart::{ChartGeometry, Padding};
use crate::color::{Rgb, Theme};
use crate::config::Config;
use crate::renderer::canvas::{Canvas, CanvasLabel, CanvasRenderer};

/// Canvas pixels per terminal cell.
const CELL_PIXELS: (f32, f32) = (1.0, 2.0);
/// Rows reserved for the status line.
const STATUS_ROWS: u16 = 1;
/// Axis tick step for the `+`/`-` keys, as a fraction of the current tick.
const TICK_STEP: f32 = 0.25;

pub fn run(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let chart = config.build_chart()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut view = ViewState::new(chart, config.chart.theme, config_path);
    let result = run_app(&mut terminal, &mut view);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

struct ViewState {
    chart: ChartGeometry,
    theme: Option<Theme>,
    config_path: Option<PathBuf>,
    canvas: Canvas,
    labels: Vec<CanvasLabel>,
    area: (u16, u16),
    message: Option<String>,
}

impl ViewState {
    fn new(chart: ChartGeometry, theme: Option<Theme>, config_path: Option<PathBuf>) -> Self {
        Self {
            chart,
            theme,
            config_path,
            canvas: Canvas::new(0, 0),
            labels: Vec::new(),
            area: (0, 0),
            message: None,
        }
    }

    /// Feed a new terminal size to the chart layout.
    fn resize(&mut self, area: Rect) {
        let size = (area.width, area.height);
        if size == self.area {
            return;
        }
        self.area = size;
        let width = area.width as f32 * CELL_PIXELS.0;
        let height = area.height.saturating_sub(STATUS_ROWS) as f32 * CELL_PIXELS.1;
        // Leave room for the longest label on either side and one text row above and below.
        let label_cols = self
            .chart
            .axes()
            .names()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0) as f32
            + 1.0;
        let padding = Padding {
            top: CELL_PIXELS.1,
            right: label_cols * CELL_PIXELS.0,
            bottom: CELL_PIXELS.1,
            left: label_cols * CELL_PIXELS.0,
        };
        self.chart.layout(width, height, padding);
        self.canvas.resize(width as usize, height as usize);
    }

    fn rasterize(&mut self) {
        self.canvas.clear();
        let mut renderer = CanvasRenderer::new(&mut self.canvas, CELL_PIXELS);
        self.chart.draw(&mut renderer);
        self.labels = renderer.into_labels();
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // A status message lasts until the next key.
        self.message = None;
        match key {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => return false,
            KeyEvent {
                code: KeyCode::Char('c'),
                ..
            } => {
                let circles = !self.chart.is_circles_only();
                self.chart.set_circles_only(circles);
            }
            KeyEvent {
                code: KeyCode::Char('g'),
                ..
            } => {
                let style = self.chart.graph_style().next();
                self.chart.set_graph_style(style);
            }
            KeyEvent {
                code: KeyCode::Char('t'),
                ..
            } => {
                let theme = self.theme.unwrap_or_default().next();
                self.theme = Some(theme);
                self.chart.set_theme(theme);
            }
            KeyEvent {
                code: KeyCode::Char('a'),
                ..
            } => {
                let auto = !self.chart.is_auto_size();
                self.chart.set_auto_size(auto);
            }
            KeyEvent {
                code: KeyCode::Char('s'),
                ..
            } => {
                let smooth = !self.chart.is_smooth_gradient();
                self.chart.set_smooth_gradient(smooth);
            }
            KeyEvent {
                code: KeyCode::Char('+') | KeyCode::Char('='),
                ..
            } => self.step_tick(1.0 + TICK_STEP),
            KeyEvent {
                code: KeyCode::Char('-'),
                ..
            } => self.step_tick(1.0 - TICK_STEP),
            KeyEvent {
                code: KeyCode::Char('w'),
                ..
            } => self.save(),
            _ => {}
        }
        true
    }

    fn step_tick(&mut self, factor: f32) {
        let tick = self.chart.axis_tick() * factor;
        if let Err(e) = self.chart.set_axis_tick(tick) {
            self.message = Some(e.to_string());
        }
    }

    fn save(&mut self) {
        let Some(path) = self.config_path.clone().or_else(Config::default_path) else {
            self.message = Some("no config directory".to_string());
            return;
        };
        match Config::save_view_state(&path, &self.chart, self.theme) {
            Ok(()) => self.message = Some(format!("saved to {}", path.display())),
            Err(e) => {
                warn!("Failed to save view state: {:#}", e);
                self.message = Some(format!("save failed: {}", e));
            }
        }
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, view: &mut ViewState) -> Result<()> {
    let poll_interval = Duration::from_millis(100);
    info!("Viewing {} axes", view.chart.axes().len());

    loop {
        let size = terminal.size()?;
        view.resize(Rect::new(0, 0, size.width, size.height));

        if view.chart.take_redraw() {
            view.rasterize();
        }

        terminal.draw(|frame| {
            let area = frame.area();
            let chart_area = Rect::new(
                area.x,
                area.y + STATUS_ROWS,
                area.width,
                area.height.saturating_sub(STATUS_ROWS),
            );
            render_canvas(frame, chart_area, &view.canvas);
            render_labels(frame, chart_area, &view.labels);
            render_status(frame, area, view);
        })?;

        // Handle input
        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !view.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(..) => terminal.clear()?,
                _ => {}
            }
        }
    }

    Ok(())
}

fn to_color(px: (u8, u8, u8, u8)) -> Color {
    let (r, g, b, a) = px;
    if a == 0 {
        Color::Reset
    } else {
        Color::Rgb(r, g, b)
    }
}

/// Two vertically stacked canvas pixels per cell.
fn render_canvas(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    let rows = (canvas.height / 2).min(area.height as usize);
    let cols = canvas.width.min(area.width as usize);
    let buf = frame.buffer_mut();
    for row in 0..rows {
        for col in 0..cols {
            let top = canvas.get_pixel(col, row * 2);
            let bottom = canvas.get_pixel(col, row * 2 + 1);
            if let Some(cell) = buf.cell_mut((area.x + col as u16, area.y + row as u16)) {
                if top.3 == 0 && bottom.3 == 0 {
                    cell.set_char(' ');
                    cell.set_bg(Color::Reset);
                } else {
                    cell.set_char('▀');
                    cell.set_fg(to_color(top));
                    cell.set_bg(to_color(bottom));
                }
            }
        }
    }
}

fn render_labels(frame: &mut Frame, area: Rect, labels: &[CanvasLabel]) {
    let buf = frame.buffer_mut();
    for label in labels {
        // The label's baseline sits at its bottom edge, one cell tall.
        let row = (label.y / CELL_PIXELS.1).round() as i32 - 1;
        let col = (label.x / CELL_PIXELS.0).round() as i32;
        if row < 0 || row >= area.height as i32 {
            continue;
        }
        for (i, ch) in label.text.chars().enumerate() {
            let x = col + i as i32;
            if x < 0 || x >= area.width as i32 {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + row as u16)) {
                cell.set_char(ch);
                cell.set_fg(rgb_color(label.color));
                cell.set_bg(Color::Reset);
            }
        }
    }
}

fn rgb_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn render_status(frame: &mut Frame, area: Rect, view: &ViewState) {
    let chart = &view.chart;
    let status = match &view.message {
        Some(message) => format!(" {} ", message),
        None => format!(
            " [c]ircles: {} | [g]raph: {} | [t]heme: {} | [a]uto: {} | [s]mooth: {} | tick [+/-]: {} | [w]rite | [q]uit ",
            chart.is_circles_only(),
            chart.graph_style(),
            view.theme.map(|t| t.name()).unwrap_or("custom"),
            chart.is_auto_size(),
            chart.is_smooth_gradient(),
            chart.axis_tick(),
        ),
    };

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
