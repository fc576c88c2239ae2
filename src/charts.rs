use crate::document::format_number;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path, Text};
use tracing::debug;

pub mod palette {
    pub const EASY: &str = "#2ecc71";
    pub const MEDIUM: &str = "#f1c40f";
    pub const HARD: &str = "#e74c3c";
    pub const LEETCODE: &str = "#FFA116";
    pub const CODECHEF: &str = "#5B4638";
    pub const CODEFORCES: &str = "#1F8ACB";
}

const EMPTY_RING: &str = "#e4e0da";
const GRID: &str = "rgba(47, 72, 88, 0.12)";
const LABEL: &str = "#7a746d";

/// Canvas slots on the page; each holds at most one live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Canvas {
    Difficulty,
    Rating,
}

impl Canvas {
    pub fn element_id(self) -> &'static str {
        match self {
            Canvas::Difficulty => "dsaChart",
            Canvas::Rating => "ratingChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Line,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_colors: Vec<String>,
    pub border_color: Option<String>,
    /// Per-point outline colors; points without one use the border color.
    pub point_colors: Vec<String>,
    pub tension: f64,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub legend_display: bool,
    /// Share of the radius cut out of a doughnut, in percent.
    pub cutout_percent: Option<f64>,
    pub begin_at_zero: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            legend_display: true,
            cutout_percent: None,
            begin_at_zero: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Values of the first dataset; charts here are single-series.
    pub fn values(&self) -> &[f64] {
        self.datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Construct/destroy contract of a charting backend.
pub trait ChartEngine {
    fn construct(&mut self, canvas: Canvas, config: ChartConfig) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
    fn config(&self, handle: ChartHandle) -> Option<&ChartConfig>;
    fn render(&self, handle: ChartHandle) -> Option<String>;
}

/// Draws charts as standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgEngine {
    next_id: u64,
    live: HashMap<ChartHandle, ChartConfig>,
}

impl SvgEngine {
    pub fn live_instances(&self) -> usize {
        self.live.len()
    }
}

impl ChartEngine for SvgEngine {
    fn construct(&mut self, canvas: Canvas, config: ChartConfig) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        debug!(canvas = canvas.element_id(), id = self.next_id, "chart constructed");
        self.live.insert(handle, config);
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_some() {
            debug!(id = handle.0, "chart destroyed");
        }
    }

    fn config(&self, handle: ChartHandle) -> Option<&ChartConfig> {
        self.live.get(&handle)
    }

    fn render(&self, handle: ChartHandle) -> Option<String> {
        let config = self.live.get(&handle)?;
        Some(match config.kind {
            ChartKind::Doughnut => draw_doughnut(config),
            ChartKind::Line => draw_line(config),
        })
    }
}

/// Owns the current chart of every canvas.
#[derive(Debug, Default)]
pub struct ChartRegistry<E: ChartEngine = SvgEngine> {
    engine: E,
    slots: BTreeMap<Canvas, ChartHandle>,
}

impl<E: ChartEngine> ChartRegistry<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            slots: BTreeMap::new(),
        }
    }

    /// Destroys the chart currently bound to `canvas`, then binds a new one.
    pub fn replace(&mut self, canvas: Canvas, config: ChartConfig) -> ChartHandle {
        if let Some(previous) = self.slots.remove(&canvas) {
            self.engine.destroy(previous);
        }
        let handle = self.engine.construct(canvas, config);
        self.slots.insert(canvas, handle);
        handle
    }

    pub fn get(&self, canvas: Canvas) -> Option<&ChartConfig> {
        let handle = self.slots.get(&canvas)?;
        self.engine.config(*handle)
    }

    pub fn render(&self, canvas: Canvas) -> Option<String> {
        let handle = self.slots.get(&canvas)?;
        self.engine.render(*handle)
    }

    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    pub fn kinds(&self) -> BTreeMap<Canvas, ChartKind> {
        self.slots
            .keys()
            .filter_map(|canvas| self.get(*canvas).map(|config| (*canvas, config.kind)))
            .collect()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

fn draw_doughnut(config: &ChartConfig) -> String {
    const SIZE: f64 = 200.0;
    const OUTER: f64 = 90.0;

    let center = SIZE / 2.0;
    let cutout = config.options.cutout_percent.unwrap_or(50.0).clamp(0.0, 99.0) / 100.0;
    let inner = OUTER * cutout;
    let radius = (OUTER + inner) / 2.0;
    let thickness = OUTER - inner;
    let circumference = 2.0 * PI * radius;

    let values = config.values();
    let total: f64 = values.iter().copied().filter(|v| *v > 0.0).sum();
    let colors = config
        .datasets
        .first()
        .map(|dataset| dataset.background_colors.as_slice())
        .unwrap_or(&[]);

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, SIZE, SIZE))
        .set("role", "img");

    if total <= 0.0 {
        document = document.add(ring(center, radius, thickness, EMPTY_RING));
    } else {
        let mut offset = 0.0;
        for (index, value) in values.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let length = circumference * value / total;
            let color = colors.get(index).map(String::as_str).unwrap_or(EMPTY_RING);
            let segment = ring(center, radius, thickness, color)
                .set(
                    "stroke-dasharray",
                    format!("{:.3} {:.3}", length, circumference - length),
                )
                .set("stroke-dashoffset", format!("{:.3}", -offset))
                .set("transform", format!("rotate(-90 {center} {center})"));
            document = document.add(segment);
            offset += length;
        }
    }

    if config.options.legend_display {
        for (index, label) in config.labels.iter().enumerate() {
            let color = colors.get(index).map(String::as_str).unwrap_or(LABEL);
            let text = Text::new(label.clone())
                .set("x", center)
                .set("y", center - 12.0 + index as f64 * 14.0)
                .set("text-anchor", "middle")
                .set("font-size", 11)
                .set("fill", color);
            document = document.add(text);
        }
    }

    document.to_string()
}

fn ring(center: f64, radius: f64, thickness: f64, color: &str) -> Circle {
    Circle::new()
        .set("cx", center)
        .set("cy", center)
        .set("r", radius)
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", thickness)
}

fn draw_line(config: &ChartConfig) -> String {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 260.0;
    const PADDING_X: f64 = 44.0;
    const PADDING_Y: f64 = 34.0;
    const TOP: f64 = 24.0;
    const TICKS: usize = 4;

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("role", "img");

    let values = config.values();
    if values.is_empty() {
        let text = Text::new("No data yet".to_string())
            .set("x", WIDTH / 2.0)
            .set("y", HEIGHT / 2.0)
            .set("text-anchor", "middle")
            .set("fill", LABEL);
        return document.add(text).to_string();
    }

    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if config.options.begin_at_zero {
        min = min.min(0.0);
    }
    if min == max {
        max += 1.0;
        if !config.options.begin_at_zero {
            min -= 1.0;
        }
    }

    let range = max - min;
    let x_step = if values.len() > 1 {
        (WIDTH - PADDING_X * 2.0) / (values.len() - 1) as f64
    } else {
        0.0
    };
    let scale_y = (HEIGHT - TOP - PADDING_Y) / range;
    let x = |index: usize| PADDING_X + index as f64 * x_step;
    let y = |value: f64| HEIGHT - PADDING_Y - (value - min) * scale_y;

    for tick in 0..=TICKS {
        let value = min + range * tick as f64 / TICKS as f64;
        let y_pos = y(value);
        document = document
            .add(
                Line::new()
                    .set("x1", PADDING_X)
                    .set("y1", y_pos)
                    .set("x2", WIDTH - PADDING_X)
                    .set("y2", y_pos)
                    .set("stroke", GRID),
            )
            .add(
                Text::new(format_number((value * 10.0).round() / 10.0))
                    .set("x", PADDING_X - 10.0)
                    .set("y", y_pos + 4.0)
                    .set("text-anchor", "end")
                    .set("font-size", 11)
                    .set("fill", LABEL),
            );
    }

    let dataset = &config.datasets[0];
    let color = dataset.border_color.as_deref().unwrap_or(palette::LEETCODE);
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(index, value)| (x(index), y(*value)))
        .collect();
    let curve = smooth_path(&points, dataset.tension);

    if dataset.fill {
        let baseline = y(min);
        let area = curve
            .clone()
            .line_to((points[points.len() - 1].0, baseline))
            .line_to((points[0].0, baseline))
            .close();
        document = document.add(
            Path::new()
                .set("d", area)
                .set("fill", color)
                .set("fill-opacity", 0.15)
                .set("stroke", "none"),
        );
    }

    document = document.add(
        Path::new()
            .set("d", curve)
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 3),
    );

    for (index, (px, py)) in points.iter().enumerate() {
        let point_color = dataset
            .point_colors
            .get(index)
            .map(String::as_str)
            .unwrap_or(color);
        document = document.add(
            Circle::new()
                .set("cx", *px)
                .set("cy", *py)
                .set("r", 4)
                .set("fill", "white")
                .set("stroke", point_color)
                .set("stroke-width", 2),
        );
        if let Some(label) = config.labels.get(index) {
            document = document.add(
                Text::new(label.clone())
                    .set("x", *px)
                    .set("y", HEIGHT - PADDING_Y + 18.0)
                    .set("text-anchor", "middle")
                    .set("font-size", 11)
                    .set("fill", LABEL),
            );
        }
    }

    if config.options.legend_display {
        if let Some(label) = &dataset.label {
            document = document.add(
                Text::new(label.clone())
                    .set("x", WIDTH / 2.0)
                    .set("y", TOP / 2.0 + 4.0)
                    .set("text-anchor", "middle")
                    .set("font-size", 12)
                    .set("fill", color),
            );
        }
    }

    document.to_string()
}

/// Cubic path through `points`; a tension of zero yields straight segments.
fn smooth_path(points: &[(f64, f64)], tension: f64) -> Data {
    let mut data = Data::new().move_to(points[0]);
    for i in 0..points.len().saturating_sub(1) {
        let prev = if i == 0 { points[i] } else { points[i - 1] };
        let start = points[i];
        let end = points[i + 1];
        let next = points.get(i + 2).copied().unwrap_or(end);
        let c1 = (
            start.0 + (end.0 - prev.0) * tension / 2.0,
            start.1 + (end.1 - prev.1) * tension / 2.0,
        );
        let c2 = (
            end.0 - (next.0 - start.0) * tension / 2.0,
            end.1 - (next.1 - start.1) * tension / 2.0,
        );
        data = data.cubic_curve_to((c1.0, c1.1, c2.0, c2.1, end.0, end.1));
    }
    data
}
