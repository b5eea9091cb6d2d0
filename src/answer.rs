/// Outcome of checking the text of the active field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The text is the expected number
    Match,
    /// Nothing typed; back to the neutral look
    Empty,
    /// Some other number; shown in the error tone
    Mismatch,
}

/// Only digits ever make it into an answer field
pub fn accepts_char(c: char) -> bool {
    c.is_ascii_digit()
}

/// Drops every rejected character and cuts the text to `max_len` characters
pub fn sanitize(text: &str, max_len: usize) -> String {
    text.chars().filter(|c| accepts_char(*c)).take(max_len).collect()
}

pub fn check(text: &str, expected: u32) -> Verdict {
    match text.parse::<u32>() {
        Ok(value) if value == expected => Verdict::Match,
        _ if text.is_empty() => Verdict::Empty,
        _ => Verdict::Mismatch,
    }
}
