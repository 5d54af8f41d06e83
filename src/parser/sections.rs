use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::SegmenterConfig;

/// A run of lines treated as one paragraph, with the pages it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub content: String,
    pub start_page: u32,
    pub end_page: u32,
}

impl Section {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Number of pages in the inclusive span. A reversed span counts as one page.
    pub fn page_count(&self) -> u32 {
        self.end_page
            .saturating_sub(self.start_page)
            .saturating_add(1)
    }

    pub fn covers(&self, page: u32) -> bool {
        (self.start_page..=self.end_page).contains(&page)
    }
}

/// Open paragraph plus everything emitted so far. Lives for one `segment` call.
struct Accumulator<'a> {
    config: &'a SegmenterConfig,
    current_lines: Vec<String>,
    current_start_page: Option<u32>,
    sections: Vec<Section>,
    dropped: usize,
}

impl<'a> Accumulator<'a> {
    fn new(config: &'a SegmenterConfig) -> Self {
        Accumulator {
            config,
            current_lines: Vec::new(),
            current_start_page: None,
            sections: Vec::new(),
            dropped: 0,
        }
    }

    fn push(&mut self, line: &str, page: u32) {
        if self.current_start_page.is_none() {
            self.current_start_page = Some(page);
        }
        self.current_lines.push(line.to_string());
    }

    /// Close the open unit, keeping it only if it clears the word minimum.
    fn close(&mut self, end_page: u32) {
        let Some(start_page) = self.current_start_page.take() else {
            return;
        };
        // Page numbers may run backwards in the input; a span never does.
        let end_page = end_page.max(start_page);
        let content = std::mem::take(&mut self.current_lines).join(" ");
        let words = content.split_whitespace().count();

        if words > self.config.min_words {
            self.sections.push(Section {
                content,
                start_page,
                end_page,
            });
        } else {
            trace!(words, start_page, end_page, "dropping short unit");
            self.dropped += 1;
        }
    }

    fn finish(mut self, last_page: Option<u32>) -> Vec<Section> {
        if let Some(page) = last_page {
            self.close(page);
        }
        debug!(
            kept = self.sections.len(),
            dropped = self.dropped,
            "segmentation finished"
        );
        self.sections
    }
}

/// Split ordered `(page_text, page_number)` pairs into filtered sections.
///
/// Lines are scanned page by page. A blank line or a classifier break closes
/// the open unit; the last line of a page is never classified, so a paragraph
/// carries over into the next page. Whatever is still open at the end closes
/// on the last page number seen.
pub fn segment<I, S>(pages: I, config: &SegmenterConfig) -> Vec<Section>
where
    I: IntoIterator<Item = (S, u32)>,
    S: AsRef<str>,
{
    let rules = config.rules();
    let mut acc = Accumulator::new(config);
    let mut last_page = None;

    for (text, page) in pages {
        last_page = Some(page);
        let lines: Vec<&str> = text.as_ref().lines().collect();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                acc.close(page);
                continue;
            }

            acc.push(line, page);

            // Untrimmed lines: the indent rule reads the next line's leading whitespace.
            if let Some(next) = lines.get(i + 1) {
                if rules.is_paragraph_break(raw, next) {
                    acc.close(page);
                }
            }
        }
    }

    acc.finish(last_page)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pages::{split_pages, PageMarker};
    use crate::parser::process_pages;

    const PARA_A: &str = "Hello world this is more than twenty tokens of filler text to pass the threshold easily here now, with a few extra words appended.";
    const PARA_B: &str = "A different and unrelated paragraph follows the blank line with plenty of words so that it survives filtering too, even at the default threshold.";

    fn run(pages: &[(&str, u32)]) -> Vec<Section> {
        segment(pages.iter().copied(), &SegmenterConfig::default())
    }

    #[test]
    fn empty_input() {
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn empty_and_blank_pages() {
        assert!(run(&[("", 1), ("   \n\n\t", 2)]).is_empty());
    }

    #[test]
    fn blank_line_separates_paragraphs() {
        let page = format!("{}\n\n{}\n\n", PARA_A, PARA_B);
        let sections = run(&[(page.as_str(), 1), ("", 2)]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, PARA_A);
        assert_eq!(sections[1].content, PARA_B);
        for s in &sections {
            assert_eq!((s.start_page, s.end_page), (1, 1));
        }
    }

    #[test]
    fn paragraph_continues_across_pages() {
        let page1 = "The committee met on a cold morning to discuss the budget and\nthe many proposals that had been submitted over the course of";
        let page2 = "the previous year, eventually agreeing on a short list of projects.";
        let sections = run(&[(page1, 1), (page2, 2)]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].start_page, 1);
        assert_eq!(sections[0].end_page, 2);
        assert!(sections[0].content.starts_with("The committee met"));
        assert!(sections[0].content.ends_with("short list of projects."));
    }

    #[test]
    fn page_end_is_not_classified() {
        // Sentence end on page 1 followed by an indented page 2 would break
        // within a page, but not across the boundary.
        let page1 = "One two three four five six seven eight nine ten eleven twelve.";
        let page2 = "    thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone";
        let sections = run(&[(page1, 1), (page2, 2)]);
        assert_eq!(sections.len(), 1);
        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 2));
    }

    #[test]
    fn lines_are_trimmed_and_joined_with_spaces() {
        let page = "   alpha beta gamma delta epsilon zeta eta theta iota kappa   \n\t lambda mu nu xi omicron pi rho sigma tau upsilon phi  ";
        let sections = run(&[(page, 3)]);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].content,
            "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi omicron pi rho sigma tau upsilon phi"
        );
        assert_eq!((sections[0].start_page, sections[0].end_page), (3, 3));
    }

    #[test]
    fn short_units_are_dropped() {
        let page = format!("Chapter 1\n\n{}\n\n- 4 -", PARA_A);
        let sections = run(&[(page.as_str(), 4)]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, PARA_A);
    }

    #[test]
    fn filter_is_strictly_greater_than_min_words() {
        let twenty = (1..=20).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let twenty_one = (1..=21).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        assert!(run(&[(twenty.as_str(), 1)]).is_empty());
        let kept = run(&[(twenty_one.as_str(), 1)]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].word_count(), 21);
    }

    #[test]
    fn min_words_is_configurable() {
        let config = SegmenterConfig {
            min_words: 2,
            ..SegmenterConfig::default()
        };
        let sections = segment([("one two three", 1u32)], &config);
        assert_eq!(sections.len(), 1);
        let sections = segment([("one two", 1u32)], &config);
        assert!(sections.is_empty());
    }

    #[test]
    fn length_jump_splits_heading_from_body() {
        let config = SegmenterConfig {
            min_words: 0,
            ..SegmenterConfig::default()
        };
        let page = format!("Introduction\n{}", PARA_A);
        let sections = segment([(page.as_str(), 1u32)], &config);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "Introduction");
        assert_eq!(sections[1].content, PARA_A);
    }

    #[test]
    fn length_jump_at_threshold_does_not_split() {
        let config = SegmenterConfig {
            min_words: 0,
            ..SegmenterConfig::default()
        };
        let short = "abc def";
        let long = format!("{} {}", short, "z".repeat(49));
        assert_eq!(long.len() - short.len(), 50);
        let page = format!("{}\n{}", short, long);
        let sections = segment([(page.as_str(), 1u32)], &config);
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn sentence_end_then_indent_splits() {
        let config = SegmenterConfig {
            min_words: 0,
            ..SegmenterConfig::default()
        };
        let page = "First paragraph ends here.\n    Second one starts indented";
        let sections = segment([(page, 1u32)], &config);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].content, "Second one starts indented");
    }

    #[test]
    fn trailing_unit_closes_on_last_page_seen() {
        let sections = run(&[(PARA_A, 1), ("", 2), ("", 3)]);
        assert_eq!(sections.len(), 1);
        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 3));
    }

    #[test]
    fn windows_line_endings() {
        let page = format!("{}\r\n\r\n{}", PARA_A, PARA_B);
        let sections = run(&[(page.as_str(), 1)]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, PARA_A);
    }

    #[test]
    fn resegmenting_is_idempotent() {
        let md = std::fs::read_to_string("tests/fixtures/report.txt").unwrap();
        let pages = split_pages(&md, PageMarker::FormFeed);
        let first = process_pages(&pages, &SegmenterConfig::default());
        let second = process_pages(&pages, &SegmenterConfig::default());
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn fixture_page_spans_are_valid() {
        let md = std::fs::read_to_string("tests/fixtures/report.txt").unwrap();
        let pages = split_pages(&md, PageMarker::FormFeed);
        let min = pages.iter().map(|p| p.number).min().unwrap();
        let max = pages.iter().map(|p| p.number).max().unwrap();
        for s in process_pages(&pages, &SegmenterConfig::default()) {
            assert!(s.start_page <= s.end_page, "bad span: {:?}", s);
            assert!(s.start_page >= min && s.end_page <= max, "out of range: {:?}", s);
            assert!(s.word_count() > 20, "short section leaked: {:?}", s);
        }
    }

    #[test]
    fn section_helpers() {
        let s = Section {
            content: "a b c".into(),
            start_page: 2,
            end_page: 4,
        };
        assert_eq!(s.word_count(), 3);
        assert_eq!(s.page_count(), 3);
        assert!(s.covers(2) && s.covers(4));
        assert!(!s.covers(1) && !s.covers(5));
    }

    #[test]
    fn backwards_page_numbers_keep_span_ordered() {
        let page5 = "one two three four five six seven eight nine ten eleven twelve thirteen";
        let page2 = "fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone twentytwo";
        let sections = run(&[(page5, 5), (page2, 2)]);
        assert_eq!(sections.len(), 1);
        assert_eq!((sections[0].start_page, sections[0].end_page), (5, 5));
        assert_eq!(sections[0].page_count(), 1);
    }

    #[test]
    fn page_count_does_not_overflow() {
        let full = Section {
            content: String::new(),
            start_page: 0,
            end_page: u32::MAX,
        };
        assert_eq!(full.page_count(), u32::MAX);

        let reversed: Section =
            serde_json::from_str(r#"{"content":"x","start_page":5,"end_page":2}"#).unwrap();
        assert_eq!(reversed.page_count(), 1);
    }
}
