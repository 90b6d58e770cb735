//! Human-readable run summaries, rendered with `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::types::{AuthorityRunResult, NationalRunResult, ResolveRunResult};

/// How many unknown credential tokens to show before cutting off.
const UNKNOWN_TOKEN_LIMIT: usize = 20;

pub fn print_resolve_summary(result: &ResolveRunResult) {
    println!("Store: {}", result.store_dir.display());

    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Input rows"), Cell::new(report.total_rows)]);
    table.add_row(vec![
        Cell::new("Resolved rows"),
        Cell::new(report.resolved_rows),
    ]);
    table.add_row(vec![
        Cell::new("Canonical identities"),
        Cell::new(result.candidates),
    ]);
    table.add_row(vec![
        Cell::new("Skipped rows"),
        count_cell(report.skipped.len(), comfy_table::Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unresolved addresses"),
        count_cell(report.unresolved_addresses, comfy_table::Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Cross-bucket merges"),
        Cell::new(report.cross_bucket_merges),
    ]);
    table.add_row(vec![
        Cell::new("Row map faults"),
        count_cell(result.row_map_faults, comfy_table::Color::Red),
    ]);
    println!("{table}");

    print_unknown_tokens(report);
}

fn print_unknown_tokens(report: &pdr_resolve::ResolutionReport) {
    if report.unknown_tokens.is_empty() {
        return;
    }
    // Most frequent first; these are the vocabulary gaps worth chasing.
    let mut tokens: Vec<(&String, &usize)> = report.unknown_tokens.iter().collect();
    tokens.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![header_cell("Unknown token"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (token, count) in tokens.iter().take(UNKNOWN_TOKEN_LIMIT) {
        table.add_row(vec![Cell::new(token), Cell::new(count)]);
    }
    println!("{table}");
    if tokens.len() > UNKNOWN_TOKEN_LIMIT {
        println!("... and {} more", tokens.len() - UNKNOWN_TOKEN_LIMIT);
    }
}

pub fn print_authority_summary(result: &AuthorityRunResult) {
    let summary = &result.outcome.summary;

    let mut table = Table::new();
    table.set_header(vec![header_cell("Tier"), header_cell("Matches")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Exact license + profession"),
        Cell::new(summary.full_license),
    ]);
    table.add_row(vec![
        Cell::new("License + name corroboration"),
        Cell::new(summary.corroborated_license),
    ]);
    table.add_row(vec![
        Cell::new("Name + zip and degree + name"),
        Cell::new(summary.name_degree),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(comfy_table::Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.matched).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "{} records, {} unmatched, {} weak match sets, {} parse failures",
        summary.total_records,
        summary.unmatched,
        summary.weak_matches,
        result.parse_failures.len()
    );

    print_ambiguous(&result.outcome);

    if let Some(dir) = &result.artifacts {
        println!("Artifacts: {}", dir.display());
    }
}

fn print_ambiguous(outcome: &pdr_match::MatchOutcome) {
    if outcome.ambiguous_records.is_empty() && outcome.ambiguous_identities.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Subject"),
        header_cell("Conflicts"),
    ]);
    apply_table_style(&mut table);
    for (key, ids) in &outcome.ambiguous_records {
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        table.add_row(vec![
            Cell::new("record").fg(comfy_table::Color::Yellow),
            Cell::new(key),
            Cell::new(ids.join(", ")),
        ]);
    }
    for (id, keys) in &outcome.ambiguous_identities {
        table.add_row(vec![
            Cell::new("identity").fg(comfy_table::Color::Red),
            Cell::new(id),
            Cell::new(keys.join(", ")),
        ]);
    }
    println!("Ambiguous matches:");
    println!("{table}");
}

pub fn print_national_summary(result: &NationalRunResult) {
    let outcome = &result.outcome;
    println!(
        "{} records: {} matched, {} ambiguous, {} unmatched",
        outcome.total_records,
        outcome.resolution.len(),
        outcome.ambiguous.len(),
        outcome.unmatched
    );
    if let Some(dir) = &result.artifacts {
        println!("Artifacts: {}", dir.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: comfy_table::Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(comfy_table::Color::DarkGrey)
    } else {
        Cell::new(count).fg(color)
    }
}
