//! HTML rendering of a generated schedule.
//!
//! Rows are aligned slot indexes, columns are days. Each cell carries the
//! level class (`<prefix>-<level>`), the level label and a tooltip payload.

use crate::classifier::NO_BACKGROUND;
use crate::grid::{Schedule, TimeSlot};
use crate::levels::LevelCatalog;
use crate::storage::ScheduleConfig;
use crate::style::StyleSheet;

const MISSING_MESSAGE: &str = "No valid full info...";

/// Row class for `index`, cycling through `cycle`. Empty cycle gives "".
pub fn row_class(index: usize, cycle: &[String]) -> &str {
    if cycle.is_empty() {
        return "";
    }
    &cycle[index % cycle.len()]
}

/// Tooltip markup for one slot.
pub fn tooltip(slot: &TimeSlot) -> String {
    let message = if slot.message.is_empty() {
        MISSING_MESSAGE
    } else {
        slot.message.as_str()
    };
    format!(
        "<strong>Time interval:</strong> {} - {}<br>\
         <strong>Workload level:</strong> {}<br>\
         <strong>Load level status:</strong> {}<br>\
         <strong>More info about event:</strong> <br>{}",
        escape_html(&slot.start),
        escape_html(&slot.end),
        slot.load_level,
        escape_html(&slot.label),
        escape_html(message),
    )
}

/// Escape text for HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
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

/// The `<table>` element for a schedule.
pub fn render_table(schedule: &Schedule, config: &ScheduleConfig) -> String {
    let mut html = String::from("<table id=\"table\">\n<thead><tr><th class=\"header\">Time</th>");
    for day in schedule.days() {
        html.push_str(&format!(
            "<th class=\"header\">{} <br/> {} {}</th>",
            escape_html(&day.short_name),
            escape_html(&day.short_month),
            day.day_number
        ));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for index in 0..schedule.slot_count() {
        let row = schedule.row(index);
        let Some(first) = row.first() else {
            continue;
        };

        html.push_str(&format!(
            "<tr class=\"{}\"><th class=\"time\">{} {}</th>",
            escape_html(row_class(index, &config.row_class_cycle)),
            escape_html(&first.start),
            escape_html(&first.end)
        ));
        for slot in row {
            html.push_str(&format!(
                "<td class=\"{}-{}\" data-load-level-text=\"{}\" data-tooltip=\"{}\">{}</td>",
                escape_html(&config.cell_class_prefix),
                slot.load_level,
                escape_html(&slot.label),
                escape_html(&tooltip(slot)),
                escape_html(&slot.message)
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Legend listing every catalog level, busiest first.
fn render_legend(catalog: &LevelCatalog, config: &ScheduleConfig) -> String {
    let mut html = format!(
        "<div class=\"legend\"><span id=\"legend-title\">Availability</span> \
         <span id=\"legend-length\">{}</span><ul>",
        catalog.max_level()
    );
    let mut levels: Vec<_> = catalog.levels.iter().collect();
    levels.sort_by(|a, b| b.level.cmp(&a.level));
    for level in levels {
        html.push_str(&format!(
            "<li class=\"{}-{}\">{} - {}</li>",
            escape_html(&config.cell_class_prefix),
            level.level,
            level.level,
            escape_html(&level.label)
        ));
    }
    for special in [&catalog.lunch, &catalog.end_of_week] {
        let color = catalog.color_for(special.level).unwrap_or(NO_BACKGROUND);
        html.push_str(&format!(
            "<li class=\"special\" style=\"border-left-color: {}\">{}</li>",
            escape_html(color),
            escape_html(&special.label)
        ));
    }
    html.push_str("</ul></div>");
    html
}

/// Standalone HTML document with the stylesheet embedded.
pub fn render_page(
    schedule: &Schedule,
    config: &ScheduleConfig,
    catalog: &LevelCatalog,
    sheet: &StyleSheet,
) -> String {
    let title = escape_html(&config.title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{css}</style>\n</head>\n<body>\n\
         <h1 id=\"title\">{title}</h1>\n{legend}\n{table}\n</body>\n</html>\n",
        css = sheet.to_css(),
        legend = render_legend(catalog, config),
        table = render_table(schedule, config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGenerator;
    use crate::levels::SpecialState;
    use crate::style::StyleSynchronizer;
    use chrono::NaiveDate;

    fn slot(message: &str) -> TimeSlot {
        TimeSlot {
            start: "09:00".into(),
            end: "09:30".into(),
            load_level: 3,
            background_color: "#E67E22".into(),
            label: "Moderate load".into(),
            message: message.into(),
        }
    }

    #[test]
    fn row_class_cycles() {
        let cycle = vec!["sharp".to_string(), "half".to_string()];
        assert_eq!(row_class(0, &cycle), "sharp");
        assert_eq!(row_class(1, &cycle), "half");
        assert_eq!(row_class(2, &cycle), "sharp");
        assert_eq!(row_class(7, &cycle), "half");
        assert_eq!(row_class(3, &[]), "");
    }

    #[test]
    fn tooltip_combines_slot_fields() {
        let tip = tooltip(&slot("Can take 1/3 more"));
        assert!(tip.contains("09:00 - 09:30"));
        assert!(tip.contains("<strong>Workload level:</strong> 3"));
        assert!(tip.contains("Moderate load"));
        assert!(tip.contains("Can take 1/3 more"));
    }

    #[test]
    fn tooltip_defaults_missing_message() {
        assert!(tooltip(&slot("")).ends_with("No valid full info..."));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn page_has_header_rows_and_styles() {
        let config = ScheduleConfig::default();
        let catalog = LevelCatalog::default();
        let mut generator = GridGenerator::new(config.clone(), catalog.clone(), Some(3));
        let schedule = generator
            .generate(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
            .unwrap();
        let mut sheet = StyleSheet::new();
        StyleSynchronizer::new(&config.cell_class_prefix).apply(&catalog, &mut sheet);

        let page = render_page(&schedule, &config, &catalog, &sheet);
        assert!(page.contains("<h1 id=\"title\">Availability schedule for next week</h1>"));
        assert!(page.contains("<th class=\"header\">Mon <br/> Oct 19</th>"));
        assert!(page.contains("<th class=\"header\">Fri <br/> Oct 23</th>"));
        assert!(page.contains("<tr class=\"sharp\"><th class=\"time\">09:00 09:30</th>"));
        assert!(page.contains("<tr class=\"half\"><th class=\"time\">09:30 10:00</th>"));
        assert!(page.contains(".available-5 { background-color: var(--color5); color: #FFFFFF; }"));
        assert!(page.contains("<span id=\"legend-length\">5</span>"));
        assert_eq!(page.matches("<tr class=").count(), 16);
        assert_eq!(page.matches("<td class=\"available-").count(), 80);
    }

    #[test]
    fn legend_colors_special_states_with_level_fallback() {
        let mut catalog = LevelCatalog::default();
        catalog.lunch = SpecialState::new(3, "Lunch time", "");
        catalog.end_of_week = SpecialState::new(42, "Weekend", "");
        let legend = render_legend(&catalog, &ScheduleConfig::default());

        assert!(legend.contains(
            "<li class=\"special\" style=\"border-left-color: #E67E22\">Lunch time</li>"
        ));
        assert!(legend.contains(
            "<li class=\"special\" style=\"border-left-color: #7F8C8D\">Weekend</li>"
        ));

        catalog.levels.clear();
        let legend = render_legend(&catalog, &ScheduleConfig::default());
        assert!(legend.contains("border-left-color: none\">Weekend"));
    }
}
