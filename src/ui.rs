use crate::charts::{Canvas, ChartEngine};
use crate::document::{format_number, Document, Target, TopicBar};
use crate::models::{Difficulty, Platform};

const PLACEHOLDER: &str = "-";

pub fn render_index<E: ChartEngine>(doc: &Document<E>) -> String {
    INDEX_HTML
        .replace("{{TOTAL}}", &text_of(doc, Target::TotalSolved))
        .replace("{{PLATFORMS}}", &render_platform_cards(doc))
        .replace("{{DIFFICULTY_CHART}}", &render_canvas(doc, Canvas::Difficulty))
        .replace("{{DIFFICULTY_COUNTS}}", &render_difficulty_counts(doc))
        .replace("{{RATING_CHART}}", &render_canvas(doc, Canvas::Rating))
        .replace("{{RANKINGS}}", &render_rankings(doc))
        .replace("{{TOPIC_BARS}}", &render_topic_bars(doc.topic_bars()))
}

fn text_of<E: ChartEngine>(doc: &Document<E>, target: Target) -> String {
    escape_html(doc.text(target).unwrap_or(PLACEHOLDER))
}

fn render_platform_cards<E: ChartEngine>(doc: &Document<E>) -> String {
    Platform::ALL
        .iter()
        .map(|platform| {
            let categories = doc
                .text(Target::Categories(*platform))
                .map(|summary| {
                    format!(
                        "\n        <span class=\"hint categories\">{}</span>",
                        escape_html(summary)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="stat {key}">
        <span class="label">{label}</span>
        <span class="value platform-count">{count}</span>
        <span class="hint"><span class="contests">{contests}</span> contests</span>{categories}
      </div>"#,
                key = platform.key(),
                label = platform.label(),
                count = text_of(doc, Target::PlatformCount(*platform)),
                contests = text_of(doc, Target::Contests(*platform)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

fn render_difficulty_counts<E: ChartEngine>(doc: &Document<E>) -> String {
    Difficulty::ALL
        .iter()
        .map(|difficulty| {
            format!(
                r#"<div class="difficulty {key}"><span class="label">{label}</span><span class="count">{count}</span></div>"#,
                key = difficulty.key(),
                label = difficulty.label(),
                count = text_of(doc, Target::DifficultyCount(*difficulty)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn render_rankings<E: ChartEngine>(doc: &Document<E>) -> String {
    Platform::ALL
        .iter()
        .map(|platform| {
            let rank = if *platform == Platform::CodeForces {
                format!(
                    r#"<span class="rank">{}</span>"#,
                    text_of(doc, Target::Rank(*platform))
                )
            } else {
                String::new()
            };
            format!(
                r#"<div class="ranking {key}">
          <span class="label">{label}</span>
          <span class="rating">{rating}</span>
          <span class="max-rating">{max}</span>
          {rank}
        </div>"#,
                key = platform.key(),
                label = platform.label(),
                rating = text_of(doc, Target::Rating(*platform)),
                max = text_of(doc, Target::MaxRating(*platform)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn render_canvas<E: ChartEngine>(doc: &Document<E>, canvas: Canvas) -> String {
    let body = doc
        .charts()
        .render(canvas)
        .unwrap_or_else(|| r#"<p class="empty">No data yet</p>"#.to_string());
    format!(
        r#"<div class="chart" id="{id}">{body}</div>"#,
        id = canvas.element_id()
    )
}

fn render_topic_bars(bars: &[TopicBar]) -> String {
    bars.iter()
        .map(|bar| {
            format!(
                r#"<div class="topic-bar">
          <div class="topic-name">{name}</div>
          <div class="bar-container"><div class="bar" style="width: {width}%"></div></div>
          <div class="topic-count">{count}</div>
        </div>"#,
                name = escape_html(&bar.name),
                width = format_number(bar.percentage),
                count = bar.count,
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Coding Profile Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat, .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .total-questions {
      color: var(--accent);
    }

    .hint {
      color: #6f6a65;
      font-size: 0.9rem;
    }

    .charts {
      display: grid;
      grid-template-columns: minmax(220px, 1fr) 2fr;
      gap: 16px;
    }

    .chart svg {
      width: 100%;
      height: auto;
      display: block;
    }

    .difficulty {
      display: flex;
      justify-content: space-between;
    }

    .difficulty.easy .count { color: #2ecc71; }
    .difficulty.medium .count { color: #f1c40f; }
    .difficulty.hard .count { color: #e74c3c; }

    .ranking {
      display: grid;
      grid-template-columns: 1fr auto auto auto;
      gap: 12px;
      align-items: baseline;
    }

    .rating {
      font-weight: 600;
      color: var(--accent-2);
    }

    .max-rating, .rank {
      color: #7a746d;
    }

    .topic-bar {
      display: grid;
      grid-template-columns: 140px 1fr 48px;
      gap: 12px;
      align-items: center;
    }

    .bar-container {
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      height: 10px;
    }

    .bar {
      background: #1F8ACB;
      border-radius: 999px;
      height: 100%;
    }

    .topic-count {
      text-align: right;
    }

    .empty {
      color: #8b857d;
      text-align: center;
    }

    @media (max-width: 700px) {
      .app {
        padding: 28px 22px;
      }
      .charts {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Coding Profile Dashboard</h1>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total solved</span>
        <span class="value total-questions">{{TOTAL}}</span>
      </div>
      {{PLATFORMS}}
    </section>

    <section class="charts">
      <div class="card">
        <h2>Difficulty</h2>
        {{DIFFICULTY_CHART}}
        {{DIFFICULTY_COUNTS}}
      </div>
      <div class="card">
        <h2>Ratings</h2>
        {{RATING_CHART}}
      </div>
    </section>

    <section class="card rankings">
      <h2>Rankings</h2>
        {{RANKINGS}}
    </section>

    <section class="card topics">
      <h2>Top topics</h2>
      <div id="topicBars">
        {{TOPIC_BARS}}
      </div>
    </section>
  </main>
</body>
</html>
"#;
