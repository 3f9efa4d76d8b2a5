//! Markdown and one-line summary rendering for people reading the terminal.

use grc_cards::CountTile;
use grc_view::{DrillDown, GrcOverview, OverviewBody, TileView};

/// `violations/total` style count of a tile.
pub fn tile_count(tile: &CountTile) -> String {
    match tile {
        CountTile::Policy(tile) => format!("{}/{}", tile.violations, tile.total),
        CountTile::Finding(tile) => match (&tile.findings, &tile.severity) {
            (Some(count), _) => format!("{}/{}", count.current_findings, count.total_findings),
            (None, Some(count)) => format!("{}/{}", count.high_severity, count.total_severity),
            (None, None) => "0/0".to_string(),
        },
    }
}

/// Markdown table of the overview.
pub fn overview_markdown(overview: &GrcOverview) -> String {
    let mut out = String::new();

    let header = match (&overview.header, &overview.body) {
        (_, OverviewBody::NoResource(empty)) => {
            out.push_str(&format!("# {}\n\n{}\n\n_{}_\n", empty.title, empty.detail, empty.action));
            return out;
        }
        (Some(header), _) => header,
        (None, _) => return out,
    };

    if let Some(title) = &header.title {
        out.push_str(&format!("# {}\n\n", title));
    }
    if let Some(choices) = &header.choices {
        out.push_str(&format!(
            "Grouped by: **{}**\n\n",
            choices.selected_label(overview.choice)
        ));
    }

    let cards = overview.cards();
    if let Some(first) = cards.first() {
        let labels: Vec<&str> = first.tiles.iter().map(|t| t.label.as_str()).collect();
        out.push_str(&format!("| Name | {} |\n", labels.join(" | ")));
        out.push_str(&format!("|------|{}\n", "------|".repeat(labels.len())));
        for card in cards {
            let counts: Vec<String> = card.tiles.iter().map(tile_cell).collect();
            out.push_str(&format!("| {} | {} |\n", card.card.name(), counts.join(" | ")));
        }
        out.push('\n');
    }

    out.push_str(&format!("_{} ({})_\n", header.collapse_hint, header.collapse_button));
    out
}

fn tile_cell(tile: &TileView) -> String {
    let count = tile_count(&tile.tile);
    if tile.drill_down.is_some() {
        format!("**{}**", count)
    } else {
        count
    }
}

/// One-line summary of the overview.
pub fn overview_summary(overview: &GrcOverview, run_id: &str) -> String {
    match &overview.body {
        OverviewBody::NoResource(empty) => format!("[{}] cards: {}", run_id, empty.title),
        OverviewBody::Collapsed => format!("[{}] cards: collapsed", run_id),
        OverviewBody::Cards { cards } => {
            let ranked: Vec<String> = cards
                .iter()
                .map(|view| format!("{}={}", view.card.name(), view.card.rank()))
                .collect();
            format!(
                "[{}] cards: {} {} by {} ({})",
                run_id,
                cards.len(),
                overview.mode,
                overview.choice,
                ranked.join(", ")
            )
        }
    }
}

/// Markdown description of a drill-down.
pub fn drill_down_markdown(next: &DrillDown) -> String {
    let mut out = String::from("# Drill-down\n\n");
    out.push_str(&format!("Query: `?{}`\n\n", next.query));
    out.push_str("| Filter | Values |\n|--------|--------|\n");
    for (kind, values) in next.filters.iter() {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        out.push_str(&format!("| {} | {} |\n", kind, values.join(", ")));
    }
    out
}
