const SENTENCE_TERMINALS: &[char] = &['.', '!', '?'];

pub const DEFAULT_LENGTH_GAP: usize = 50;
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Thresholds for deciding where one paragraph ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakRules {
    /// Trimmed lines whose lengths differ by more than this are split apart.
    pub length_gap: usize,
    /// Leading spaces that count as an indented first line.
    pub indent_width: usize,
}

impl Default for BreakRules {
    fn default() -> Self {
        BreakRules {
            length_gap: DEFAULT_LENGTH_GAP,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl BreakRules {
    /// True when a paragraph boundary lies between `current` and `next`.
    ///
    /// Both lines are raw; trimming happens here. A boundary exists when either
    /// line is blank, when `current` ends a sentence and `next` is indented, or
    /// when the trimmed lengths jump by more than `length_gap` characters.
    pub fn is_paragraph_break(&self, current: &str, next: &str) -> bool {
        let cur = current.trim();
        let nxt = next.trim();

        if cur.is_empty() || nxt.is_empty() {
            return true;
        }

        if cur.ends_with(SENTENCE_TERMINALS) && self.is_indented(next) {
            return true;
        }

        cur.chars().count().abs_diff(nxt.chars().count()) > self.length_gap
    }

    fn is_indented(&self, line: &str) -> bool {
        line.starts_with('\t') || leading_spaces(line) >= self.indent_width
    }
}

/// [`BreakRules::is_paragraph_break`] with the default thresholds.
pub fn is_paragraph_break(current: &str, next: &str) -> bool {
    BreakRules::default().is_paragraph_break(current, next)
}

fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ').count()
}
