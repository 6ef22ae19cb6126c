//! Plain-text rendering of replay reports and link tables.

use navspy_core::NavChange;
use navspy_types::{LinkView, SectionId};

use crate::trace::StepReport;

fn describe(change: &NavChange) -> String {
    match change {
        NavChange::ActiveSection { section } => format!("active_section {section}"),
        NavChange::Menu { state } => format!("menu {}", state.as_str()),
        NavChange::Location { location } => format!("location {location}"),
    }
}

#[must_use]
pub fn render_reports(reports: &[StepReport]) -> String {
    let mut lines = Vec::new();
    for report in reports {
        match report.outcome {
            Some(outcome) => lines.push(format!("[{}] {} -> {outcome}", report.index, report.step)),
            None => lines.push(format!("[{}] {}", report.index, report.step)),
        }

        let state = &report.state;
        let visible = if state.visible.is_empty() {
            "-".to_string()
        } else {
            state
                .visible
                .iter()
                .map(SectionId::as_str)
                .collect::<Vec<_>>()
                .join(",")
        };
        let mut line = format!(
            "    location={} active={} menu={} scroll={} visible={visible}",
            state.location,
            state.active,
            state.menu.as_str(),
            state.scroll_offset,
        );
        if let Some(pending) = &state.pending_scroll {
            line.push_str(&format!(" pending={pending}"));
        }
        lines.push(line);

        for change in &report.changes {
            lines.push(format!("    + {}", describe(change)));
        }
    }
    lines.join("\n")
}

#[must_use]
pub fn render_links(links: &[LinkView]) -> String {
    let width = links.iter().map(|l| l.label.len()).max().unwrap_or(0);
    links
        .iter()
        .map(|link| {
            let marker = if link.highlighted { "  (active)" } else { "" };
            format!("{:<width$}  {}{marker}", link.label, link.href)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
