use crate::models::{ProgressResponse, TopicView};

pub fn render_index(progress: &ProgressResponse) -> String {
    let stats = &progress.stats;
    let reminder = if progress.reminder_due { REMINDER_HTML } else { "" };
    let topics: String = progress.topics.iter().map(render_topic).collect();

    INDEX_HTML
        .replace("{{REMINDER}}", reminder)
        .replace("{{QUOTE}}", &escape_html(&progress.quote))
        .replace("{{COMPLETED}}", &stats.days_completed.to_string())
        .replace("{{TOTAL}}", &stats.total_days.to_string())
        .replace("{{ELAPSED}}", &stats.days_elapsed.to_string())
        .replace("{{PERCENT}}", &stats.progress_rounded.to_string())
        .replace("{{BAR_WIDTH}}", &stats.progress_percentage.to_string())
        .replace("{{TOPICS}}", &topics)
}

fn render_topic(topic: &TopicView) -> String {
    let badge = if topic.completed {
        "✓".to_string()
    } else {
        topic.day.to_string()
    };
    let here = if topic.current && !topic.completed {
        r#"<div class="here">← You are here</div>"#
    } else {
        ""
    };

    format!(
        r#"
      <form method="post" action="/days/{day}/toggle">
        <button type="submit" class="{class}" data-day="{day}">
          <span class="topic-header">
            <span class="day-number">{badge}</span>
            <span class="topic-text">{title}</span>
          </span>
          {here}
        </button>
      </form>"#,
        day = topic.day,
        class = topic.variant.css_class(),
        badge = badge,
        title = escape_html(&topic.title),
        here = here,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const REMINDER_HTML: &str = r#"
  <div class="reminder" role="dialog" aria-modal="true">
    <div class="reminder-content">
      <h2>📚 Daily Learning Reminder!</h2>
      <p>It's time for your Python &amp; AI learning session!</p>
      <form method="post" action="/reminder/dismiss">
        <button type="submit" class="reminder-button">Let's Go! 🚀</button>
      </form>
    </div>
  </div>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>20-Day Python + AI Learning Journey</title>
  <meta name="description" content="Track your 20-day Python and AI learning progress" />
  <style>
    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      padding: 0;
    }

    .container {
      min-height: 100vh;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      padding: 20px;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    }

    header {
      text-align: center;
      color: white;
      margin-bottom: 30px;
    }

    h1 {
      font-size: 2.5rem;
      font-weight: bold;
      margin: 0 0 10px 0;
    }

    .subtitle {
      font-size: 1.2rem;
      opacity: 0.9;
      margin: 0;
    }

    .stats {
      display: flex;
      gap: 20px;
      margin-bottom: 30px;
      flex-wrap: wrap;
      justify-content: center;
    }

    .stat {
      background: white;
      border-radius: 12px;
      padding: 20px 30px;
      min-width: 150px;
      text-align: center;
      box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
    }

    .stat .value {
      font-size: 2rem;
      font-weight: bold;
      color: #667eea;
      margin-bottom: 5px;
    }

    .stat .label {
      font-size: 0.9rem;
      color: #666;
    }

    .bar-track {
      background: rgba(255, 255, 255, 0.3);
      border-radius: 20px;
      height: 20px;
      margin-bottom: 30px;
      overflow: hidden;
    }

    .bar {
      background: linear-gradient(90deg, #4caf50 0%, #8bc34a 100%);
      height: 100%;
      border-radius: 20px;
      transition: width 0.5s ease;
    }

    .topics {
      max-width: 800px;
      margin: 0 auto;
      display: flex;
      flex-direction: column;
      gap: 12px;
    }

    .topics form {
      margin: 0;
    }

    .topic {
      width: 100%;
      text-align: left;
      font: inherit;
      color: inherit;
      background: white;
      border: 3px solid transparent;
      border-radius: 10px;
      padding: 15px 20px;
      cursor: pointer;
      transition: all 0.3s ease;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    }

    .topic.completed {
      background: #4caf50;
      color: white;
    }

    .topic.current {
      border-color: #ffd700;
      box-shadow: 0 4px 12px rgba(255, 215, 0, 0.4);
    }

    .topic-header {
      display: flex;
      align-items: center;
      gap: 15px;
    }

    .day-number {
      display: inline-flex;
      align-items: center;
      justify-content: center;
      width: 40px;
      height: 40px;
      border-radius: 50%;
      background: #667eea;
      color: white;
      font-weight: bold;
      font-size: 1.1rem;
      flex-shrink: 0;
    }

    .topic-text {
      font-size: 1.1rem;
      flex: 1;
    }

    .here {
      margin-top: 10px;
      font-size: 0.9rem;
      color: #ffd700;
      font-weight: bold;
    }

    footer {
      text-align: center;
      margin-top: 40px;
      padding-bottom: 20px;
    }

    .reset {
      background: rgba(255, 255, 255, 0.2);
      color: white;
      border: 2px solid white;
      border-radius: 8px;
      padding: 12px 30px;
      font-size: 1rem;
      cursor: pointer;
      font-weight: bold;
      transition: all 0.3s ease;
    }

    .reminder {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.7);
      display: flex;
      align-items: center;
      justify-content: center;
      z-index: 1000;
    }

    .reminder-content {
      background: white;
      border-radius: 20px;
      padding: 40px;
      text-align: center;
      max-width: 400px;
      box-shadow: 0 10px 40px rgba(0, 0, 0, 0.3);
    }

    .reminder-content h2 {
      font-size: 2rem;
      margin: 0 0 15px 0;
      color: #667eea;
    }

    .reminder-content p {
      font-size: 1.2rem;
      margin: 0 0 25px 0;
      color: #666;
    }

    .reminder-button {
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
      border: none;
      border-radius: 10px;
      padding: 15px 40px;
      font-size: 1.1rem;
      cursor: pointer;
      font-weight: bold;
    }
  </style>
</head>
<body>
  <main class="container">
{{REMINDER}}
    <header>
      <h1>🐍 20-Day Python + AI Learning Journey</h1>
      <p class="subtitle" id="quote">{{QUOTE}}</p>
    </header>

    <section class="stats">
      <div class="stat">
        <div class="value" id="completed">{{COMPLETED}}/{{TOTAL}}</div>
        <div class="label">Days Completed</div>
      </div>
      <div class="stat">
        <div class="value" id="elapsed">{{ELAPSED}}</div>
        <div class="label">Days Since Start</div>
      </div>
      <div class="stat">
        <div class="value" id="percent">{{PERCENT}}%</div>
        <div class="label">Progress</div>
      </div>
    </section>

    <div class="bar-track">
      <div class="bar" style="width: {{BAR_WIDTH}}%"></div>
    </div>

    <section class="topics">{{TOPICS}}
    </section>

    <footer>
      <form method="post" action="/reset" onsubmit="return confirm('Are you sure you want to reset all progress?');">
        <input type="hidden" name="confirm" value="true" />
        <button type="submit" class="reset">Reset Progress</button>
      </form>
    </footer>
  </main>
</body>
</html>
"#;
