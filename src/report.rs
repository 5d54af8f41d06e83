use std::fmt::Write;

use crate::document::DocumentSummary;
use crate::parser::sections::Section;

/// Compact, readable table of document summaries.
pub fn render_overview(rows: &[DocumentSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3} | {:<24} | {:<24} | {:<16} | {:>8} | {:>7} | {:>7}",
        "#", "File", "Title", "Author", "Sections", "Pages", "Words"
    );
    let _ = writeln!(out, "{}", "-".repeat(106));

    for (i, r) in rows.iter().enumerate() {
        let pages = r
            .page_span
            .map(|(start, end)| format!("{}-{}", start, end))
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:>3} | {:<24} | {:<24} | {:<16} | {:>8} | {:>7} | {:>7}",
            i + 1,
            truncate(&r.filename, 24),
            truncate(r.title.as_deref().unwrap_or("-"), 24),
            truncate(r.author.as_deref().unwrap_or("-"), 16),
            r.section_count,
            pages,
            r.word_count
        );
    }
    out
}

/// One block per section: page span header, then the text.
pub fn render_sections<'a>(sections: impl IntoIterator<Item = &'a Section>) -> String {
    let mut out = String::new();
    for (i, s) in sections.into_iter().enumerate() {
        let span = match s.page_count() {
            1 => format!("p. {}", s.start_page),
            n => format!("pp. {}-{}, {} pages", s.start_page, s.end_page, n),
        };
        let _ = writeln!(out, "[{}] {} ({} words)", i + 1, span, s.word_count());
        let _ = writeln!(out, "{}\n", s.content);
    }
    out
}

/// Cut to `max` chars, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    let (hours, mins, rest) = (secs / 3600, secs / 60 % 60, secs % 60);
    match (hours, mins) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{mins}m {rest}s"),
        _ => format!("{hours}h {mins}m {rest}s"),
    }
}
