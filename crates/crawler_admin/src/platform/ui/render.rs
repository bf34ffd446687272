use std::fmt::Write;

use crawler_admin_core::{AppViewModel, ConfigField, RecordView, Tone};

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let scheduler = if view.scheduler_enabled { "running" } else { "stopped" };
    let _ = write!(out, "Scheduler: {scheduler}");
    if view.saving {
        out.push_str("  (saving...)");
    }
    out.push('\n');

    if let Some(headline) = &view.headline {
        let marker = match headline.tone {
            Tone::Success => "ok",
            Tone::Failure => "!!",
        };
        let _ = writeln!(out, "[{marker}] {}", headline.text);
    }

    for record in &view.records {
        let pending = view.pending_removal == Some(record.index);
        render_record(&mut out, record, pending);
    }
    out
}

fn render_record(out: &mut String, record: &RecordView, pending_removal: bool) {
    if pending_removal {
        let _ = writeln!(out, "#{}  (marked for deletion)", record.index);
    } else {
        let _ = writeln!(out, "#{}", record.index);
    }
    for field in ConfigField::ALL {
        let value = record.config.get(field);
        let shown = if field == ConfigField::Keywords {
            value.lines().collect::<Vec<_>>().join(" | ")
        } else {
            value.to_string()
        };
        let _ = writeln!(out, "    {:<16} {}", field.as_str(), shown);
        if let Some(message) = record.errors.get(field.as_str()) {
            let _ = writeln!(out, "    {:<16} ^ {}", "", message);
        }
    }
    // Messages for names the form does not know are still worth showing.
    for (name, message) in &record.errors {
        if name.parse::<ConfigField>().is_err() {
            let _ = writeln!(out, "    {:<16} ^ {}", name, message);
        }
    }
}
