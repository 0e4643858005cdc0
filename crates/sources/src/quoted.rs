//! Lexer for quoted titles inside free-text job descriptions.
//!
//! Job texts mention literary sources in double quotes with no escaping:
//!
//! ```text
//! based on the novels "Alice's Adventures in Wonderland" and "Through the Looking-Glass"
//! ```
//!
//! Splitting on `"` alternates between text outside and inside quotes,
//! starting outside. The lexer tags each piece instead of leaving callers to
//! index by parity. A quote that is opened but never closed produces an
//! `Unterminated` segment.

/// Delimiter around titles in job texts
pub const QUOTE: char = '"';

/// One piece of a job text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside quotes (possibly empty)
    Plain(&'a str),
    /// Text between an opening and a closing quote
    Quoted(&'a str),
    /// Text after an opening quote that is never closed
    Unterminated(&'a str),
}

/// Iterator over the segments of a text
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: Option<&'a str>,
    inside: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = self.rest?;
        match rest.find(QUOTE) {
            Some(pos) => {
                let piece = &rest[..pos];
                self.rest = Some(&rest[pos + QUOTE.len_utf8()..]);
                let segment = if self.inside {
                    Segment::Quoted(piece)
                } else {
                    Segment::Plain(piece)
                };
                self.inside = !self.inside;
                Some(segment)
            }
            None => {
                self.rest = None;
                Some(if self.inside {
                    Segment::Unterminated(rest)
                } else {
                    Segment::Plain(rest)
                })
            }
        }
    }
}

/// Lex a text into plain and quoted segments
pub fn segments(text: &str) -> Segments<'_> {
    Segments {
        rest: Some(text),
        inside: false,
    }
}

/// Every properly quoted segment of a text, in order
pub fn quoted_titles(text: &str) -> impl Iterator<Item = &str> {
    segments(text).filter_map(|segment| match segment {
        Segment::Quoted(title) => Some(title),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_alternate() {
        let lexed: Vec<Segment> =
            segments("The Best \"Alice's Adventures in Wonderland\"").collect();
        assert_eq!(
            lexed,
            vec![
                Segment::Plain("The Best "),
                Segment::Quoted("Alice's Adventures in Wonderland"),
                Segment::Plain(""),
            ]
        );
    }

    #[test]
    fn test_no_quotes() {
        let lexed: Vec<Segment> = segments("screenplay").collect();
        assert_eq!(lexed, vec![Segment::Plain("screenplay")]);
        assert_eq!(quoted_titles("screenplay").count(), 0);
        assert_eq!(quoted_titles("").count(), 0);
    }

    #[test]
    fn test_multiple_titles() {
        let titles: Vec<&str> =
            quoted_titles("novels \"Emma\" and \"Persuasion\" (uncredited)").collect();
        assert_eq!(titles, vec!["Emma", "Persuasion"]);
    }

    #[test]
    fn test_unterminated_quote_is_dropped() {
        let text = "novel \"Emma\" and \"Persuasion";
        let lexed: Vec<Segment> = segments(text).collect();
        assert_eq!(lexed.last(), Some(&Segment::Unterminated("Persuasion")));

        let titles: Vec<&str> = quoted_titles(text).collect();
        assert_eq!(titles, vec!["Emma"]);
        assert_eq!(quoted_titles("\"dangling").count(), 0);
    }

    #[test]
    fn test_adjacent_quotes() {
        let titles: Vec<&str> = quoted_titles("\"A\"\"B\"").collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
