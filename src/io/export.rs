//! JSON, CSV and HTML exports of parts, purchase lists and instructions

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::algorithm::instructions::InstructionPlan;
use crate::algorithm::placement::Placement;
use crate::analysis::parts::{PartsEntry, SavingsReport};
use crate::analysis::purchase::{PurchaseList, UnresolvedItem};
use crate::io::error::{Result, WithPath};

/// Flat parts list row shared by the JSON and CSV exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartsRow {
    /// Part name
    pub brick_type: String,
    /// Color name
    pub color: String,
    /// Color as `#rrggbb`
    pub hex: String,
    /// Pieces
    pub quantity: usize,
}

impl From<&PartsEntry> for PartsRow {
    fn from(entry: &PartsEntry) -> Self {
        Self {
            brick_type: entry.brick_type.name.clone(),
            color: entry.color.name().to_string(),
            hex: entry.color.hex(),
            quantity: entry.count,
        }
    }
}

/// Quote a CSV field when it contains a separator, quote or line break
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Parts list as CSV with columns `brick_type,color,hex,quantity`
pub fn parts_to_csv(parts: &[PartsEntry]) -> String {
    let mut out = String::from("brick_type,color,hex,quantity\n");
    for row in parts.iter().map(PartsRow::from) {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            csv_field(&row.brick_type),
            csv_field(&row.color),
            row.hex,
            row.quantity
        );
    }
    out
}

#[derive(Serialize)]
struct PartsDocument<'a> {
    parts: Vec<PartsRow>,
    total_pieces: usize,
    savings: &'a SavingsReport,
}

/// Parts list and savings report as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn parts_to_json(parts: &[PartsEntry], savings: &SavingsReport) -> Result<String> {
    let document = PartsDocument {
        parts: parts.iter().map(PartsRow::from).collect(),
        total_pieces: crate::analysis::parts::total_pieces(parts),
        savings,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Orderable purchase lines as CSV
///
/// Only resolved lines are included; unresolved ones go to
/// [`manual_lookup_to_json`].
pub fn purchase_to_csv(list: &PurchaseList) -> String {
    let mut out = String::from("element_id,brick_type,color,quantity,unit_price,substitute_for\n");
    for item in &list.resolved {
        let _ = writeln!(
            out,
            "{},{},{},{},{:.2},{}",
            csv_field(&item.element_id),
            csv_field(&item.brick_type),
            csv_field(item.color.name()),
            item.quantity,
            item.unit_price,
            csv_field(item.substitute_for.as_deref().unwrap_or(""))
        );
    }
    out
}

#[derive(Serialize)]
struct ManualLookupRow<'a> {
    brick_type: &'a str,
    color: &'a str,
    hex: String,
    quantity: usize,
    element_id: Option<&'a str>,
    reason: String,
}

impl<'a> From<&'a UnresolvedItem> for ManualLookupRow<'a> {
    fn from(item: &'a UnresolvedItem) -> Self {
        Self {
            brick_type: &item.brick_type,
            color: item.color.name(),
            hex: item.color.hex(),
            quantity: item.quantity,
            element_id: item.element_id.as_deref(),
            reason: item.reason.to_string(),
        }
    }
}

/// Unresolved purchase lines as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn manual_lookup_to_json(list: &PurchaseList) -> Result<String> {
    let rows: Vec<ManualLookupRow<'_>> = list.unresolved.iter().map(ManualLookupRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[derive(Serialize)]
struct BrickRow<'a> {
    id: usize,
    x: usize,
    y: usize,
    brick_type: &'a str,
    width: usize,
    height: usize,
    color: &'a str,
    hex: String,
}

impl<'a> From<&'a Placement> for BrickRow<'a> {
    fn from(placement: &'a Placement) -> Self {
        Self {
            id: placement.id,
            x: placement.x,
            y: placement.y,
            brick_type: &placement.brick_type.name,
            width: placement.brick_type.width,
            height: placement.brick_type.height,
            color: placement.color.name(),
            hex: placement.color.hex(),
        }
    }
}

#[derive(Serialize)]
struct StepRow<'a> {
    step_number: usize,
    region: &'a str,
    progress: f64,
    previously_placed: usize,
    bricks: Vec<BrickRow<'a>>,
}

#[derive(Serialize)]
struct InstructionsDocument<'a> {
    total_steps: usize,
    regions: &'a [crate::spatial::Region],
    steps: Vec<StepRow<'a>>,
}

/// Instruction plan as pretty-printed JSON
///
/// Each step lists its bricks and how many bricks precede it in build
/// order; the preceding bricks are the earlier steps' bricks.
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn instructions_to_json(plan: &InstructionPlan) -> Result<String> {
    let steps = plan
        .steps()
        .iter()
        .map(|step| StepRow {
            step_number: step.step_number,
            region: &step.region_label,
            progress: plan.progress(step),
            previously_placed: plan.previously_placed(step).len(),
            bricks: plan.placements(step).iter().map(BrickRow::from).collect(),
        })
        .collect();

    let document = InstructionsDocument {
        total_steps: plan.total_steps(),
        regions: plan.regions(),
        steps,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Printable HTML instructions: parts list followed by steps per region
pub fn instructions_to_html(title: &str, plan: &InstructionPlan, parts: &[PartsEntry]) -> String {
    let title = escape_html(title);
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(
        html,
        "<style>body{{font-family:sans-serif}}.swatch{{display:inline-block;width:1em;height:1em;border:1px solid #333;vertical-align:middle}}.step{{page-break-inside:avoid}}</style>"
    );
    let _ = writeln!(html, "</head>\n<body>\n<h1>{title}</h1>");

    let _ = writeln!(html, "<h2>Parts</h2>\n<table>");
    let _ = writeln!(html, "<tr><th>Part</th><th>Color</th><th>Quantity</th></tr>");
    for row in parts.iter().map(PartsRow::from) {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td><span class=\"swatch\" style=\"background:{}\"></span> {}</td><td>{}</td></tr>",
            escape_html(&row.brick_type),
            row.hex,
            escape_html(&row.color),
            row.quantity
        );
    }
    let _ = writeln!(html, "</table>");

    let mut current_region: Option<&str> = None;
    for step in plan.steps() {
        if current_region != Some(step.region_label.as_str()) {
            let _ = writeln!(html, "<h2>Region {}</h2>", escape_html(&step.region_label));
            current_region = Some(step.region_label.as_str());
        }

        let _ = writeln!(
            html,
            "<div class=\"step\">\n<h3>Step {} of {} ({:.0}%)</h3>\n<ul>",
            step.step_number,
            plan.total_steps(),
            plan.progress(step) * 100.0
        );
        for placement in plan.placements(step) {
            let _ = writeln!(
                html,
                "<li><span class=\"swatch\" style=\"background:{}\"></span> {} {} at column {}, row {}</li>",
                placement.color.hex(),
                escape_html(placement.color.name()),
                escape_html(&placement.brick_type.name),
                placement.x + 1,
                placement.y + 1
            );
        }
        let _ = writeln!(html, "</ul>\n</div>");
    }

    let _ = writeln!(html, "</body>\n</html>");
    html
}

/// Write a text export, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    std::fs::write(path, contents).with_path(path, "write export")
}
