//! HTML for the schedule and edit pages.
//!
//! Both pages are plain server-rendered documents. The schedule page hands
//! the calendar widget its options as JSON and wires drag/resize back to
//! `POST /events/{id}/reschedule`.

use confsched_core::Event;
use confsched_core::form::ConferenceWeek;
use confsched_core::page::Page;
use confsched_core::view::{GRID_VIEW, LIST_VIEW};

const WIDGET_CSS: &str = "https://cdn.jsdelivr.net/npm/fullcalendar@6.1.8/index.global.min.css";
const WIDGET_JS: &str = "https://cdn.jsdelivr.net/npm/fullcalendar@6.1.8/index.global.min.js";

const STYLE: &str = r#"
  body { background: #f0f2f6; font-family: sans-serif; margin: 0; padding: 0 16px; }
  h1 { max-width: 1200px; margin: 24px auto 8px; }
  nav { max-width: 1200px; margin: 0 auto; }
  .banner { max-width: 1200px; margin: 12px auto; padding: 10px 14px; border-radius: 8px; }
  .banner.ok { background: #e3f6e8; color: #1d5c2e; }
  .banner.err { background: #fbe4e4; color: #7a1f1f; }
  .banner:empty { display: none; }
  .panel { max-width: 1200px; margin: 20px auto; background: white; padding: 20px;
           border-radius: 14px; box-shadow: 0 4px 20px rgba(0,0,0,0.1); }
  .fc-event { border-radius: 6px; border: none !important; padding: 2px 4px;
              font-size: 0.8rem; white-space: normal; overflow: hidden; text-overflow: ellipsis; }
  .fc-event-title { line-height: 1.1; }
  table { border-collapse: collapse; width: 100%; }
  td, th { text-align: left; padding: 6px 8px; border-bottom: 1px solid #eee; }
  .swatch { display: inline-block; width: 14px; height: 14px; border-radius: 3px; vertical-align: middle; }
"#;

/// Escape text for element content and quoted attributes.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that is safe to drop inside a `<script>` element.
fn script_json(value: &serde_json::Value) -> String {
    value
        .to_string()
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

fn document(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en-gb">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head_extra}
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn banner(page_notice: Option<String>, page_error: Option<&str>) -> String {
    let (class, text) = match (page_error, page_notice) {
        (Some(err), _) => ("err", escape(err)),
        (None, Some(notice)) => ("ok", escape(&notice)),
        (None, None) => ("ok", String::new()),
    };
    format!(r#"<div id="banner" class="banner {class}">{text}</div>"#)
}

pub fn schedule_page(page: &Page) -> String {
    let head = format!(
        r#"<link href="{WIDGET_CSS}" rel="stylesheet">
<script src="{WIDGET_JS}"></script>"#
    );

    let notice = page.notice.as_ref().map(ToString::to_string);
    let body = format!(
        r#"<h1>Conference Schedule</h1>
<nav><a href="/edit">Edit schedule</a></nav>
{banner}
<div id="calendar" class="panel"></div>
<script>
document.addEventListener('DOMContentLoaded', function () {{
  // A legacy ?updated_event=... has been applied server-side; drop it so a
  // refresh doesn't send it again.
  if (window.location.search) {{
    history.replaceState(null, '', window.location.pathname);
  }}

  var banner = document.getElementById('banner');
  function show(kind, text) {{
    banner.className = 'banner ' + kind;
    banner.textContent = text;
  }}

  var options = {options};
  var calendar;

  async function readJson(resp) {{
    try {{
      return await resp.json();
    }} catch (e) {{
      return {{}};
    }}
  }}

  async function sendUpdate(info) {{
    var event = info.event;
    try {{
      // end is null when the stored span is empty or inverted
      var end = event.end || event.start;
      var body = {{
        title: event.title,
        start: event.start.toISOString(),
        end: end.toISOString()
      }};
      var resp = await fetch('/events/' + encodeURIComponent(event.id) + '/reschedule', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify(body)
      }});
      var data = await readJson(resp);
      if (!resp.ok) {{
        info.revert();
        show('err', data.error || resp.statusText);
        return;
      }}
      show('ok', data.message);
    }} catch (e) {{
      info.revert();
      show('err', String(e));
      return;
    }}
    var fresh = await fetch('/calendar/feed');
    if (fresh.ok) {{
      var entries = await fresh.json();
      calendar.removeAllEventSources();
      calendar.addEventSource(entries);
    }}
  }}

  options.eventDrop = sendUpdate;
  options.eventResize = sendUpdate;
  options.eventDidMount = function (info) {{
    info.el.setAttribute('title', info.event.title);
  }};

  calendar = new FullCalendar.Calendar(document.getElementById('calendar'), options);
  calendar.render();

  function handleResize() {{
    calendar.changeView(window.innerWidth < {breakpoint} ? '{list_view}' : '{grid_view}');
  }}
  window.addEventListener('resize', handleResize);
  handleResize();
}});
</script>"#,
        banner = banner(notice, page.error.as_deref()),
        options = script_json(&page.feed.options),
        breakpoint = page.feed.list_breakpoint_px,
        list_view = LIST_VIEW,
        grid_view = GRID_VIEW,
    );

    document("Conference Schedule", &head, &body)
}

pub fn edit_page(events: &[Event], week: &ConferenceWeek) -> String {
    let day_options: String = week
        .days()
        .iter()
        .map(|(day, date)| {
            let name = weekday_name(*day);
            format!(
                r#"<option value="{name}">{name} ({})</option>"#,
                date.format("%d %b")
            )
        })
        .collect();

    let listing = if events.is_empty() {
        "<p>No events yet.</p>".to_string()
    } else {
        let rows: String = events
            .iter()
            .map(|ev| {
                format!(
                    r#"<tr><td><span class="swatch" style="background:{colour}"></span></td><td>{title}</td><td>{start}</td><td>{end}</td><td><button data-id="{id}" class="delete">Delete</button></td></tr>"#,
                    colour = escape(ev.colour.as_str()),
                    title = escape(&ev.title),
                    start = ev.start.format("%a %d %b %H:%M"),
                    end = ev.end.format("%H:%M"),
                    id = escape(ev.id.as_str()),
                )
            })
            .collect();
        format!("<table><tr><th></th><th>Title</th><th>Start</th><th>End</th><th></th></tr>{rows}</table>")
    };

    let body = format!(
        r##"<h1>Edit Schedule</h1>
<nav><a href="/">Back to schedule</a></nav>
<div id="banner" class="banner ok"></div>
<div class="panel">
<h2>Add New Event</h2>
<form id="add-event">
  <p><label>Title <input name="title" required></label></p>
  <p>
    <label>Day <select name="day">{day_options}</select></label>
    <label>Start <input type="time" name="start_time" value="09:00" required></label>
    <label>End <input type="time" name="end_time" value="10:00" required></label>
    <label>Colour <input type="color" name="colour" value="#4a90e2"></label>
  </p>
  <button type="submit">Add Event</button>
</form>
</div>
<div class="panel">
<h2>Existing Events</h2>
{listing}
</div>
<script>
(function () {{
  var banner = document.getElementById('banner');
  var flash = sessionStorage.getItem('confsched-notice');
  if (flash) {{
    banner.textContent = flash;
    sessionStorage.removeItem('confsched-notice');
  }}
  function fail(text) {{
    banner.className = 'banner err';
    banner.textContent = text;
  }}
  async function submit(method, url, body) {{
    var init = {{ method: method }};
    if (body) {{
      init.headers = {{ 'Content-Type': 'application/json' }};
      init.body = JSON.stringify(body);
    }}
    try {{
      var resp = await fetch(url, init);
      var data = await resp.json().catch(function () {{ return {{}}; }});
      if (!resp.ok) {{
        fail(data.error || resp.statusText);
        return;
      }}
      sessionStorage.setItem('confsched-notice', data.message);
      window.location.reload();
    }} catch (e) {{
      fail(String(e));
    }}
  }}
  document.getElementById('add-event').addEventListener('submit', function (e) {{
    e.preventDefault();
    var form = new FormData(e.target);
    submit('POST', '/events', Object.fromEntries(form.entries()));
  }});
  document.querySelectorAll('button.delete').forEach(function (btn) {{
    btn.addEventListener('click', function () {{
      submit('DELETE', '/events/' + encodeURIComponent(btn.dataset.id));
    }});
  }});
}})();
</script>"##
    );

    document("Edit Schedule", "", &body)
}

fn weekday_name(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match day {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Q&A\"</b>"), "&lt;b&gt;&quot;Q&amp;A&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_script_json_cannot_close_tag() {
        let v = serde_json::json!({"title": "</script><script>alert(1)"});
        let out = script_json(&v);
        assert!(!out.contains("</script>"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&out).unwrap(),
            v
        );
    }

    #[test]
    fn test_banner_prefers_error() {
        let html = banner(Some("Updated: x".into()), Some("Store returned 500: no"));
        assert!(html.contains("banner err"));
        assert!(html.contains("Store returned 500"));
        assert!(!html.contains("Updated"));
    }

    #[test]
    fn test_schedule_page_builds_move_body_inside_try() {
        let view = confsched_core::view::CalendarView::from_config(
            &confsched_core::config::ScheduleConfig::default(),
        );
        let page = Page {
            notice: None,
            error: None,
            events: Vec::new(),
            feed: view.feed(&[]),
        };

        let html = schedule_page(&page);
        let send = &html[html.find("async function sendUpdate").unwrap()..];
        let try_at = send.find("try {").unwrap();
        let body_at = send.find("var body = {").unwrap();
        let revert_at = send.find("info.revert()").unwrap();
        assert!(try_at < body_at && body_at < revert_at);
        assert!(send.contains("event.end || event.start"));
        assert!(send.contains("await readJson(resp)"));
    }

    #[test]
    fn test_edit_page_guards_failed_requests() {
        let week = ConferenceWeek::starting(chrono::NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        let html = edit_page(&[], &week);
        assert!(html.contains("catch (e)"));
        assert!(html.contains("fail(String(e))"));
    }
}
