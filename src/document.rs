use crate::charts::{Canvas, ChartEngine, ChartKind, ChartRegistry, SvgEngine};
use crate::models::{Difficulty, Platform};
use serde::Serialize;
use std::collections::BTreeMap;

/// Named insertion points of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    TotalSolved,
    PlatformCount(Platform),
    Contests(Platform),
    Categories(Platform),
    Rating(Platform),
    MaxRating(Platform),
    Rank(Platform),
    DifficultyCount(Difficulty),
}

impl Target {
    pub fn selector(self) -> String {
        match self {
            Target::TotalSolved => ".total-questions".to_string(),
            Target::PlatformCount(platform) => format!(".{} .platform-count", platform.key()),
            Target::Contests(platform) => format!(".{} .contests", platform.key()),
            Target::Categories(platform) => format!(".{} .categories", platform.key()),
            Target::Rating(platform) => format!(".{} .rating", platform.key()),
            Target::MaxRating(platform) => format!(".{} .max-rating", platform.key()),
            Target::Rank(platform) => format!(".{} .rank", platform.key()),
            Target::DifficultyCount(difficulty) => format!(".{} .count", difficulty.key()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicBar {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

/// In-memory presentation layer written by the renderers.
#[derive(Debug, Default)]
pub struct Document<E: ChartEngine = SvgEngine> {
    texts: BTreeMap<Target, String>,
    topic_bars: Vec<TopicBar>,
    charts: ChartRegistry<E>,
}

impl<E: ChartEngine> Document<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            texts: BTreeMap::new(),
            topic_bars: Vec::new(),
            charts: ChartRegistry::with_engine(engine),
        }
    }

    pub fn set_text(&mut self, target: Target, text: impl Into<String>) {
        self.texts.insert(target, text.into());
    }

    pub fn text(&self, target: Target) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    pub fn clear_topic_bars(&mut self) {
        self.topic_bars.clear();
    }

    pub fn append_topic_bar(&mut self, bar: TopicBar) {
        self.topic_bars.push(bar);
    }

    pub fn topic_bars(&self) -> &[TopicBar] {
        &self.topic_bars
    }

    pub fn charts(&self) -> &ChartRegistry<E> {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut ChartRegistry<E> {
        &mut self.charts
    }

    /// True until some renderer has written to the page.
    pub fn is_blank(&self) -> bool {
        self.texts.is_empty() && self.topic_bars.is_empty() && self.charts.live_count() == 0
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        let texts = self
            .texts
            .iter()
            .map(|(target, text)| (target.selector(), text.clone()))
            .collect();

        let charts = self
            .charts
            .kinds()
            .into_iter()
            .filter_map(|(canvas, kind)| {
                let config = self.charts.get(canvas)?;
                Some((
                    canvas,
                    ChartSnapshot {
                        kind,
                        labels: config.labels.clone(),
                        values: config.values().to_vec(),
                    },
                ))
            })
            .collect();

        DocumentSnapshot {
            texts,
            topic_bars: self.topic_bars.clone(),
            charts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Serializable view of everything the page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub texts: BTreeMap<String, String>,
    pub topic_bars: Vec<TopicBar>,
    pub charts: BTreeMap<Canvas, ChartSnapshot>,
}

/// Prints a number the way a browser would: `1500`, `1523.5`, `60`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integral_and_fractional_numbers() {
        assert_eq!(format_number(1500.0), "1500");
        assert_eq!(format_number(1523.5), "1523.5");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(60.0), "60");
    }

    #[test]
    fn selectors_follow_page_markup() {
        assert_eq!(Target::TotalSolved.selector(), ".total-questions");
        assert_eq!(
            Target::PlatformCount(Platform::CodeChef).selector(),
            ".codechef .platform-count"
        );
        assert_eq!(Target::Rank(Platform::CodeForces).selector(), ".codeforces .rank");
        assert_eq!(
            Target::Categories(Platform::CodeChef).selector(),
            ".codechef .categories"
        );
        assert_eq!(Target::DifficultyCount(Difficulty::Hard).selector(), ".hard .count");
    }

    #[test]
    fn new_document_is_blank() {
        let mut doc = Document::<SvgEngine>::default();
        assert!(doc.is_blank());
        doc.set_text(Target::TotalSolved, "3");
        assert!(!doc.is_blank());
        assert_eq!(doc.text(Target::TotalSolved), Some("3"));
        assert_eq!(doc.snapshot().texts[".total-questions"], "3");
    }
}
