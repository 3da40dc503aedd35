use std::collections::BTreeMap;

use log::{debug, trace};

use crate::channel::ChannelType;
use crate::score::{DEFAULT_BPM, DEFAULT_OFFSET_SECONDS, Grid, Score};

/// What to do with a channel token that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// Drop the token. Later tokens of the same channel string move up one
    /// subdivision slot.
    #[default]
    DropInvalid,
    /// Keep the slot with value 0 so later tokens keep their position.
    ZeroFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub token_policy: TokenPolicy,
}

/// Chart text parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartParser {
    options: ParseOptions,
}

/// One classified directive line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Directive<'a> {
    /// `#TITLE <text>`
    Title(&'a str),
    /// `#BPM <n>`
    Bpm(&'a str),
    /// `#BPMxx <n>`
    BpmDefinition { id: &'a str, value: &'a str },
    /// `#OFFSET <seconds>`
    Offset(&'a str),
    /// `#MMMCC:<data>`
    Channel { measure: u32, code: u8, data: &'a str },
}

/// Parse chart lines with the default options.
pub fn parse<I, S>(lines: I) -> Score
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ChartParser::default().parse(lines)
}

/// Parse chart lines with explicit options.
pub fn parse_with<I, S>(lines: I, options: ParseOptions) -> Score
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ChartParser::new(options).parse(lines)
}

impl ChartParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Build a `Score` from chart lines. Never fails: malformed directives
    /// are skipped and header values fall back to their defaults.
    pub fn parse<I, S>(&self, lines: I) -> Score
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut title: Option<String> = None;
        let mut bpm = DEFAULT_BPM;
        let mut offset = DEFAULT_OFFSET_SECONDS;
        let mut bpm_definitions: BTreeMap<String, u32> = BTreeMap::new();
        let mut grid = Grid::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            let line_no = index + 1;

            let Some(directive) = classify(line) else {
                if !line.is_empty() {
                    trace!("line {line_no}: ignored {line:?}");
                }
                continue;
            };

            match directive {
                Directive::Title(text) => title = Some(text.to_string()),
                Directive::Bpm(value) => match parse_bpm(value) {
                    Some(v) => bpm = v,
                    None => debug!("line {line_no}: invalid #BPM {value:?}, keeping {bpm}"),
                },
                Directive::BpmDefinition { id, value } => match parse_bpm(value) {
                    Some(v) => {
                        bpm_definitions.insert(id.to_string(), v);
                    }
                    None => debug!("line {line_no}: invalid #BPM{id} {value:?}"),
                },
                Directive::Offset(value) => match parse_offset(value) {
                    Some(v) => offset = v,
                    None => debug!("line {line_no}: invalid #OFFSET {value:?}, keeping {offset}"),
                },
                Directive::Channel {
                    measure,
                    code,
                    data,
                } => {
                    let Some(channel) = ChannelType::from_code(code) else {
                        debug!("line {line_no}: unknown channel {code:02} in measure {measure}");
                        continue;
                    };
                    let Some(tokens) = self.parse_tokens(data, line_no) else {
                        debug!("line {line_no}: no tokens in {data:?}");
                        continue;
                    };
                    grid.entry(measure).or_default().insert(channel, tokens);
                }
            }
        }

        Score::new(title, bpm, offset, grid).with_bpm_definitions(bpm_definitions)
    }

    /// Split channel data into 2-character tokens and parse each one.
    /// Returns `None` when the data holds no complete token.
    fn parse_tokens(&self, data: &str, line_no: usize) -> Option<Vec<f64>> {
        let chars: Vec<char> = data.chars().collect();
        if chars.len() < 2 {
            return None;
        }

        let mut tokens = Vec::with_capacity(chars.len() / 2);
        for pair in chars.chunks_exact(2) {
            let token: String = pair.iter().collect();
            match parse_token(&token) {
                Some(value) => tokens.push(value),
                None => match self.options.token_policy {
                    TokenPolicy::DropInvalid => {
                        debug!("line {line_no}: dropped token {token:?}");
                    }
                    TokenPolicy::ZeroFill => tokens.push(0.0),
                },
            }
        }
        Some(tokens)
    }
}

/// Classify a trimmed line. Lines that match no directive yield `None`.
fn classify(line: &str) -> Option<Directive<'_>> {
    let rest = line.strip_prefix('#')?;

    if let Some(after) = rest.strip_prefix("TITLE") {
        let text = after.trim_start();
        if starts_with_whitespace(after) && !text.is_empty() {
            return Some(Directive::Title(text));
        }
        return None;
    }
    if let Some(after) = rest.strip_prefix("BPM") {
        if starts_with_whitespace(after) {
            return Some(Directive::Bpm(after.trim()));
        }
        let id = after.get(..2)?;
        let value = &after[2..];
        if id.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
            && starts_with_whitespace(value)
        {
            return Some(Directive::BpmDefinition {
                id,
                value: value.trim(),
            });
        }
        return None;
    }
    if let Some(after) = rest.strip_prefix("OFFSET") {
        if starts_with_whitespace(after) {
            return Some(Directive::Offset(after.trim()));
        }
        return None;
    }

    parse_channel_line(rest)
}

/// Parse `MMMCC:data` (the part after `#`).
fn parse_channel_line(rest: &str) -> Option<Directive<'_>> {
    let bytes = rest.as_bytes();
    if bytes.len() < 7 || bytes[5] != b':' || !bytes[..5].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let measure: u32 = rest[..3].parse().ok()?;
    let code: u8 = rest[3..5].parse().ok()?;
    Some(Directive::Channel {
        measure,
        code,
        data: &rest[6..],
    })
}

fn starts_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_whitespace)
}

/// Tempo payload: decimal digits only, positive.
fn parse_bpm(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().filter(|&v| v > 0)
}

/// Offset payload: digits and dots only.
fn parse_offset(value: &str) -> Option<f64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_token(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
