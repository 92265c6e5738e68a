// src/cli/render.rs — Text report of a finished session

use crossterm::style::Stylize;
use std::fmt::Write;
use std::path::Path;

use crate::core::brands::{BrandCatalog, Segment};
use crate::core::session::{Session, SessionState};
use crate::core::types::OutfitAnalysis;

/// Join segments, emphasizing brands with bold+underline (`styled`) or `**` markers.
pub fn emphasize(segments: &[Segment<'_>], styled: bool) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => text.to_string(),
            Segment::Brand(text) if styled => text.bold().underlined().to_string(),
            Segment::Brand(text) => format!("**{}**", text),
        })
        .collect()
}

pub fn highlight_line(catalog: &BrandCatalog, text: &str, styled: bool) -> String {
    emphasize(&catalog.highlight(text), styled)
}

/// Render whatever the session currently shows.
pub fn render_report(session: &Session, catalog: &BrandCatalog, styled: bool) -> String {
    match session.state() {
        SessionState::Result => match session.analysis() {
            Some(analysis) => render_analysis(analysis, catalog, styled),
            None => String::new(),
        },
        SessionState::Error => {
            let mut out = String::new();
            let _ = writeln!(out, "ANALYSIS FAILED");
            let _ = writeln!(out, "{}", session.error().unwrap_or_default());
            let _ = writeln!(out, "Run chiclens again with the photo to retry.");
            out
        }
        state => format!("Session is {}\n", state),
    }
}

/// Machine-readable outcome for `--json`. `error` carries the same fixed
/// message the text report shows.
pub fn json_report(session: &Session, saved_to: Option<&Path>) -> serde_json::Value {
    serde_json::json!({
        "state": session.state(),
        "error": session.error(),
        "analysis": session.analysis(),
        "savedTo": saved_to.map(|p| p.display().to_string()),
    })
}

fn render_analysis(analysis: &OutfitAnalysis, catalog: &BrandCatalog, styled: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} / {}",
        analysis.style_category, analysis.aesthetic_vibe
    );

    let _ = writeln!(out, "\nGARMENT BREAKDOWN");
    for (label, value) in analysis.breakdown.rows() {
        let _ = writeln!(
            out,
            "  {:<12} {}",
            label,
            highlight_line(catalog, value, styled)
        );
    }

    let _ = writeln!(out, "\nCOLOR & TEXTURE");
    let _ = writeln!(out, "  {:<12} {}", "Palette", analysis.color_palette.join(", "));
    let _ = writeln!(
        out,
        "  {:<12} {}",
        "Materials",
        analysis.material_highlights.join(", ")
    );

    let brands: Vec<&str> = {
        let mut found: Vec<&str> = Vec::new();
        for (_, value) in analysis.breakdown.rows() {
            for brand in catalog.brands_in(value) {
                if !found.contains(&brand) {
                    found.push(brand);
                }
            }
        }
        found
    };
    if !brands.is_empty() {
        let _ = writeln!(out, "  {:<12} {}", "Brands", brands.join(", "));
    }

    let _ = writeln!(out, "\nAESTHETIC ENGINE");
    let _ = writeln!(out, "  \"{}\"", analysis.recreation_prompt);
    out
}
