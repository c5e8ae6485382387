//! Plain-text rendering of a dashboard view

use std::fmt::Write;

use application::{ConditionsView, DashboardView, Theme};

/// Render a view as terminal text
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    let title = view.location_name.as_deref().unwrap_or(&view.city);
    let theme = match view.theme {
        Theme::Day => "day",
        Theme::Night => "night",
    };
    let _ = writeln!(out, "{title} | {} | {theme}", view.date);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "{error}");
        return out;
    }

    if let Some(current) = &view.current {
        let _ = writeln!(out, "Now    {}", conditions_line(current));
    }

    if let Some(hour) = &view.selected_hour {
        let position = hour
            .max_index
            .map_or_else(String::new, |max| format!(" [{}/{max}]", hour.cursor));
        let time = if hour.time.is_empty() {
            "now"
        } else {
            hour.time.as_str()
        };
        let _ = writeln!(
            out,
            "Hour   {time}{position}  {}",
            conditions_line(&hour.conditions)
        );
    }

    if !view.days.is_empty() {
        out.push_str("Next days\n");
        for day in &view.days {
            let _ = writeln!(
                out,
                "  {} {:>6}  {}  {}",
                day.weekday,
                day.temperature,
                day.asset.emoji(),
                day.condition
            );
        }
    }

    out
}

fn conditions_line(conditions: &ConditionsView) -> String {
    format!(
        "{} {:>6}  {}  ({})",
        conditions.asset.emoji(),
        conditions.temperature,
        conditions.description,
        conditions.asset_file
    )
}
