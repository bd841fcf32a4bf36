use crate::{style::Alignment, Pt};

const TABSIZE: usize = 4;

/// Shortest piece a word may be split into when hyphenating
const MIN_HYPHEN_FRAGMENT: usize = 2;

/// A single word, measured in the font it will be set in
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub width: Pt,
}

/// One line of a broken paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
    /// Width available to this line
    pub available: Pt,
    /// True for the last line of the paragraph and for lines ended by an explicit newline.
    /// These lines are never stretched when justifying.
    pub last: bool,
}

impl Line {
    fn new(available: Pt) -> Line {
        Line {
            words: Vec::new(),
            available,
            last: false,
        }
    }

    /// Sum of the widths of the words, without any spacing
    pub fn words_width(&self) -> Pt {
        self.words.iter().map(|w| w.width).sum()
    }

    /// Width of the line set with ordinary spaces between words
    pub fn natural_width(&self, space_width: Pt) -> Pt {
        let gaps = self.words.len().saturating_sub(1) as f32;
        self.words_width() + space_width * gaps
    }

    /// The line as a single string, words separated by single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// Horizontal offset of the first word and the gap to leave between words, for the
    /// given alignment
    pub fn placement(&self, alignment: Alignment, space_width: Pt) -> (Pt, Pt) {
        let slack = (self.available - self.natural_width(space_width)).max(Pt(0.0));
        match alignment {
            Alignment::Left => (Pt(0.0), space_width),
            Alignment::Right => (slack, space_width),
            Alignment::Center => (slack / 2.0_f32, space_width),
            Alignment::Justify if self.last || self.words.len() < 2 => (Pt(0.0), space_width),
            Alignment::Justify => {
                let gaps = (self.words.len() - 1) as f32;
                (Pt(0.0), (self.available - self.words_width()) / gaps)
            }
        }
    }
}

/// Breaks paragraphs into lines by whole words, the way text is normally set.
///
/// Words that are wider than a whole line are split across lines: with a trailing hyphen
/// if hyphenation is on, or at the exact character that overflows if not. With
/// hyphenation on, a word that doesn't fit at the end of a line is also split to fill
/// the line when both halves would be at least two characters long.
pub struct LineBreaker<M>
where
    M: Fn(&str) -> Pt,
{
    measure: M,
    space_width: Pt,
    hyphenate: bool,
}

impl<M> LineBreaker<M>
where
    M: Fn(&str) -> Pt,
{
    pub fn new(measure: M, hyphenate: bool) -> LineBreaker<M> {
        let space_width = measure(" ");
        LineBreaker {
            measure,
            space_width,
            hyphenate,
        }
    }

    pub fn space_width(&self) -> Pt {
        self.space_width
    }

    fn word(&self, text: &str) -> Word {
        Word {
            text: text.to_string(),
            width: (self.measure)(text),
        }
    }

    /// Break `text` into lines. The first line gets `first_width` to work with, every
    /// following line gets `width`. Text that is empty or only whitespace produces no lines.
    pub fn break_lines(&self, text: &str, first_width: Pt, width: Pt) -> Vec<Line> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let text = text
            .replace('\t', &" ".repeat(TABSIZE))
            .replace("\r\n", "\n")
            .replace('\r', "\n");

        let mut lines: Vec<Line> = Vec::new();
        let available = |lines: &Vec<Line>| if lines.is_empty() { first_width } else { width };

        for hard_line in text.split('\n') {
            let mut line = Line::new(available(&lines));
            let mut pending: Vec<String> = hard_line
                .split_whitespace()
                .rev()
                .map(str::to_string)
                .collect();

            while let Some(text) = pending.pop() {
                let word = self.word(&text);
                let used = if line.words.is_empty() {
                    word.width
                } else {
                    line.natural_width(self.space_width) + self.space_width + word.width
                };
                if used <= line.available {
                    line.words.push(word);
                    continue;
                }

                if line.words.is_empty() {
                    // doesn't fit even on its own
                    let (head, tail) = self.split_overlong(&text, line.available);
                    line.words.push(self.word(&head));
                    if !tail.is_empty() {
                        pending.push(tail);
                    }
                } else if let Some((head, tail)) = self.hyphenate_into(&line, &text) {
                    line.words.push(self.word(&head));
                    pending.push(tail);
                } else {
                    pending.push(text);
                }

                let next = Line::new(width);
                lines.push(std::mem::replace(&mut line, next));
            }

            line.last = true;
            lines.push(line);
        }

        lines
    }

    /// Split a word that can't fit on an empty line into a piece that does and the rest
    fn split_overlong(&self, word: &str, available: Pt) -> (String, String) {
        let chars: Vec<char> = word.chars().collect();
        let suffix = if self.hyphenate { "-" } else { "" };

        // always make progress, even if a single character overflows
        let mut split = 1;
        for i in 1..chars.len() {
            let head: String = chars[..i].iter().collect();
            if (self.measure)(&format!("{head}{suffix}")) > available {
                break;
            }
            split = i;
        }

        if split >= chars.len() {
            return (word.to_string(), String::new());
        }
        let head: String = chars[..split].iter().collect();
        let tail: String = chars[split..].iter().collect();
        (format!("{head}{suffix}"), tail)
    }

    /// Try to fit the start of `word`, plus a hyphen, at the end of `line`
    fn hyphenate_into(&self, line: &Line, word: &str) -> Option<(String, String)> {
        if !self.hyphenate {
            return None;
        }
        let chars: Vec<char> = word.chars().collect();
        if chars.len() < MIN_HYPHEN_FRAGMENT * 2 || !chars.iter().all(|c| c.is_alphabetic()) {
            return None;
        }

        let room = line.available - line.natural_width(self.space_width) - self.space_width;
        (MIN_HYPHEN_FRAGMENT..=chars.len() - MIN_HYPHEN_FRAGMENT)
            .rev()
            .map(|i| {
                let head: String = chars[..i].iter().collect();
                let tail: String = chars[i..].iter().collect();
                (format!("{head}-"), tail)
            })
            .find(|(head, _)| (self.measure)(head) <= room)
    }
}
