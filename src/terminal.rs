//! Plain-text rendering of the listing and detail views for the CLI

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::{Event, EventCatalog, FilterContext, FilterCriteria, StatusTab};

pub fn render_listing(catalog: &EventCatalog, tab: StatusTab, criteria: &FilterCriteria, ctx: &FilterContext) -> String {
    let counts = catalog.tab_counts();
    let tabs: Vec<String> = StatusTab::ALL_TABS
        .iter()
        .map(|t| {
            let label = format!("{} ({})", t.label(), counts.get(*t));
            if *t == tab {
                format!("[{}]", label)
            } else {
                label
            }
        })
        .collect();

    let mut lines = vec![tabs.join("  ")];
    if !catalog.categories().is_empty() {
        lines.push(format!("Categories: {}", catalog.categories().join(", ")));
    }
    if !criteria.is_empty() {
        lines.push(format!("Filters: {}", describe_criteria(criteria)));
    }
    lines.push(String::new());

    let visible = catalog.filter(tab, criteria, ctx);
    if visible.is_empty() {
        lines.push("No events found".to_string());
    }
    for event in visible {
        lines.extend(card_lines(event, ctx.now, &ctx.offset));
        lines.push(String::new());
    }

    join_lines(lines)
}

fn describe_criteria(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();
    if !criteria.search.is_empty() {
        parts.push(format!("search \"{}\"", criteria.search));
    }
    if criteria.has_category() {
        parts.push(format!("category {}", criteria.category));
    }
    if let Some(date) = criteria.date {
        parts.push(format!("date {}", date.format("%Y-%m-%d")));
    }
    parts.join(", ")
}

fn card_lines(event: &Event, now: DateTime<Utc>, offset: &FixedOffset) -> Vec<String> {
    vec![
        format!("#{} {} [{}]", event.id, event.title, event.status_at(now)),
        format!("   {} | {}", event.location, event.event_type),
        format!("   {}", event.date_range_label(offset)),
        format!("   {}", event.time_display_at(now)),
    ]
}

pub fn render_detail(event: &Event, now: DateTime<Utc>, offset: &FixedOffset) -> String {
    join_lines(vec![
        format!("{} [{}]", event.title, event.status_at(now)),
        event.time_display_at(now),
        String::new(),
        "About this event".to_string(),
        event.description.clone(),
        String::new(),
        format!("Date & Time: {}", event.date_range_label(offset)),
        format!("             {}", event.time_range_label(offset)),
        format!("Location:    {}", event.location),
        format!("Type:        {}", event.event_type),
        format!("Image:       {}", event.image_src()),
    ])
}

/// Newline-terminated, matching `println!` output
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
