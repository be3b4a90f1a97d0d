use crate::calendar::{CalendarWindow, CellStyle, DayBucket, MonthGrid};
use crate::models::WorkoutRecord;
use std::fmt::Write;

pub fn render_index(window: &CalendarWindow, recent: &[WorkoutRecord]) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &window.today.to_string())
        .replace("{{TYPE_OPTIONS}}", &render_type_options(window))
        .replace("{{LEGEND}}", &render_legend(window))
        .replace("{{MONTHS}}", &render_months(window))
        .replace("{{RECENT}}", &render_recent(recent))
}

fn render_type_options(window: &CalendarWindow) -> String {
    let mut html = String::new();
    for entry in &window.legend {
        let name = escape(entry.workout_type);
        let _ = write!(html, r#"<option value="{name}">{name}</option>"#);
    }
    html
}

fn render_legend(window: &CalendarWindow) -> String {
    let mut html = String::new();
    for entry in &window.legend {
        let _ = write!(
            html,
            r#"<div class="legend-item"><span class="legend-color" style="background:{}"></span><span>{}</span></div>"#,
            entry.color,
            escape(entry.workout_type)
        );
    }
    html
}

fn render_months(window: &CalendarWindow) -> String {
    let labels: String = window
        .weekday_labels
        .iter()
        .map(|label| format!("<span>{label}</span>"))
        .collect();
    window
        .months
        .iter()
        .map(|month| render_month(month, &labels))
        .collect()
}

fn render_month(month: &MonthGrid, labels: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="month"><h3>{}</h3><div class="day-labels">{labels}</div><div class="grid">"#,
        escape(&month.label)
    );
    for week in &month.weeks {
        html.push_str(r#"<div class="week">"#);
        for slot in week {
            match slot {
                Some(day) => html.push_str(&render_cell(day)),
                None => html.push_str(r#"<div class="cell pad"></div>"#),
            }
        }
        html.push_str("</div>");
    }
    html.push_str("</div></div>");
    html
}

fn render_cell(day: &DayBucket) -> String {
    let today = if day.is_today { " today" } else { "" };
    let title = escape(&day.detail());
    let number = day.date.format("%-d");
    match day.cell() {
        CellStyle::Empty => format!(
            r#"<div class="cell empty{today}" title="{title}"><span>{number}</span></div>"#
        ),
        CellStyle::Solid(color) => format!(
            r#"<div class="cell{today}" style="background:{color}" title="{title}"><span>{number}</span></div>"#
        ),
        CellStyle::Split { upper, lower } => format!(
            concat!(
                r#"<div class="cell split{today}" title="{title}">"#,
                r#"<svg viewBox="0 0 100 100" preserveAspectRatio="none">"#,
                r#"<polygon points="0,0 100,0 100,100" fill="{upper}" />"#,
                r#"<polygon points="0,0 0,100 100,100" fill="{lower}" />"#,
                r#"</svg><span>{number}</span></div>"#
            ),
            today = today,
            title = title,
            upper = upper,
            lower = lower,
            number = number,
        ),
    }
}

fn render_recent(recent: &[WorkoutRecord]) -> String {
    if recent.is_empty() {
        return r#"<p class="hint">No workouts logged yet.</p>"#.to_string();
    }
    let mut html = String::from(r#"<ul class="recent">"#);
    for record in recent {
        let mut meta = escape(&record.date);
        if let Some(minutes) = record.duration_minutes {
            let _ = write!(meta, " &middot; {minutes} min");
        }
        let notes = record
            .notes
            .as_deref()
            .map(|notes| format!(r#"<p class="notes">{}</p>"#, escape(notes)))
            .unwrap_or_default();
        let _ = write!(
            html,
            concat!(
                r#"<li><div><strong>{}</strong><span class="meta">{}</span>{}</div>"#,
                r#"<form method="post" action="/workouts/{}/delete"><button class="btn-delete" type="submit">Delete</button></form></li>"#
            ),
            escape(&record.workout_type),
            meta,
            notes,
            record.id
        );
    }
    html.push_str("</ul>");
    html
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Workout Calendar</title>
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
      --empty: #ebe6df;
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
      width: min(1080px, 100%);
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
      font-size: 1.4rem;
    }

    h3 {
      margin: 0 0 8px;
      font-size: 1rem;
      text-align: center;
    }

    .subtitle,
    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.95rem;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
      margin-bottom: 18px;
    }

    .legend-item {
      display: flex;
      align-items: center;
      gap: 6px;
      font-size: 0.9rem;
    }

    .legend-color {
      width: 14px;
      height: 14px;
      border-radius: 4px;
      display: inline-block;
    }

    .months {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 24px;
    }

    .day-labels,
    .week {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .day-labels span {
      font-size: 0.7rem;
      text-align: center;
      color: #8b857d;
    }

    .grid {
      display: grid;
      gap: 4px;
      margin-top: 4px;
    }

    .cell {
      position: relative;
      aspect-ratio: 1;
      border-radius: 6px;
      overflow: hidden;
      font-size: 0.7rem;
      color: white;
    }

    .cell span {
      position: absolute;
      top: 3px;
      left: 5px;
    }

    .cell.empty {
      background: var(--empty);
      color: #8b857d;
    }

    .cell.pad {
      background: transparent;
    }

    .cell.split svg {
      position: absolute;
      inset: 0;
      width: 100%;
      height: 100%;
    }

    .cell.today {
      outline: 2px solid var(--accent);
      outline-offset: 1px;
    }

    form.log {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      color: #5f5c57;
    }

    input,
    select {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-delete {
      background: var(--accent-2);
      box-shadow: none;
      padding: 6px 12px;
      font-size: 0.8rem;
    }

    .recent {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 10px;
    }

    .recent li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: white;
      border-radius: 14px;
      padding: 12px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .meta {
      margin-left: 10px;
      color: #8b857d;
      font-size: 0.85rem;
    }

    .notes {
      margin: 4px 0 0;
      font-size: 0.85rem;
      color: #5f5c57;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Workout Calendar</h1>
      <p class="subtitle">Log a workout each day and watch the months fill in.</p>
    </header>

    <section>
      <h2>Log a workout</h2>
      <form class="log" method="post" action="/workouts">
        <label>Type
          <input name="workout_type" list="workout-types" required />
          <datalist id="workout-types">{{TYPE_OPTIONS}}</datalist>
        </label>
        <label>Date
          <input name="date" type="date" value="{{TODAY}}" required />
        </label>
        <label>Minutes
          <input name="duration_minutes" type="number" min="0" />
        </label>
        <label>Notes
          <input name="notes" />
        </label>
        <button type="submit">Save</button>
      </form>
    </section>

    <section>
      <h2>Activity</h2>
      <div class="legend">{{LEGEND}}</div>
      <div class="months">{{MONTHS}}</div>
      <p class="hint">Days with more than two workouts show the top two; hover a day to see all of them.</p>
    </section>

    <section>
      <h2>Recent workouts</h2>
      {{RECENT}}
    </section>
  </main>
</body>
</html>
"#;
