//! Activity Log Panel
//!
//! Shows the rolling logger's buffer, newest first. Polls the buffer's
//! write counter once a second while mounted.

use std::time::Duration;

use leptos::prelude::*;
use tracing::Level;

const POLL_MS: u64 = 1000;

fn level_class(level: Level) -> &'static str {
    match level {
        Level::ERROR => "log-line error",
        Level::WARN => "log-line warn",
        Level::INFO => "log-line info",
        _ => "log-line debug",
    }
}

#[component]
pub fn ActivityLog() -> impl IntoView {
    let lines = RwSignal::new(rolling_logger::recent());
    let seen = StoredValue::new(rolling_logger::written());

    let poll = set_interval_with_handle(
        move || {
            let written = rolling_logger::written();
            if written != seen.get_value() {
                seen.set_value(written);
                lines.set(rolling_logger::recent());
            }
        },
        Duration::from_millis(POLL_MS),
    );
    if let Ok(handle) = poll {
        on_cleanup(move || handle.clear());
    }

    view! {
        <aside class="activity-log">
            <h3>"Activity"</h3>
            <ol class="log-lines">
                {move || {
                    lines
                        .get()
                        .into_iter()
                        .rev()
                        .map(|line| view! { <li class=level_class(line.level)>{line.to_string()}</li> })
                        .collect_view()
                }}
            </ol>
        </aside>
    }
}
