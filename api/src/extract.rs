//! Pure extractors for values embedded in the feed's free-text fields.
//!
//! Every function is total: malformed input yields a fallback value, never an error.

use crate::{Participant, StatValue};
use regex::Regex;
use std::sync::OnceLock;

fn score_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)-(\d+)").expect("valid score pair regex"))
}

fn parenthesized_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").expect("valid parenthesized regex"))
}

fn percentage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+,\d+)%").expect("valid percentage regex"))
}

fn count_in_parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d+)\)").expect("valid count regex"))
}

fn duration_in_parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d+:\d+)\)").expect("valid duration regex"))
}

fn person_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)\s+(.*?)(?:\s+\(\d+\))?$").expect("valid person token regex")
    })
}

fn goal_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d+)\)$").expect("valid goal number regex"))
}

fn assist_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.\s+(.*)").expect("valid assist regex"))
}

/// Treat empty and whitespace-only strings as absent; the feed sends "" for unused fields.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// First "H-A" pair in the text: "2-1 (PP1)" → (2, 1).
pub fn extract_score_pair(text: &str) -> Option<(u32, u32)> {
    let caps = score_pair_re().captures(text)?;
    let home = caps[1].parse().ok()?;
    let away = caps[2].parse().ok()?;
    Some((home, away))
}

/// Content of the first parenthesized group: "2-1 (PP1)" → "PP1".
pub fn extract_parenthesized(text: &str) -> Option<&str> {
    parenthesized_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Coerce a raw stat value. Percentages and clock times stay as raw strings here;
/// the aggregate normalizer decomposes the ones it knows about.
pub fn parse_stat_value(raw: &str) -> Option<StatValue> {
    if raw.is_empty() {
        return None;
    }

    if raw.chars().all(|c| c.is_ascii_digit())
        && let Ok(n) = raw.parse::<i64>()
    {
        return Some(StatValue::Integer(n));
    }

    if raw.contains('%') || raw.contains(':') {
        return Some(StatValue::RawString(raw.to_string()));
    }

    match raw.trim().replace(',', ".").parse::<f64>() {
        Ok(f) => Some(StatValue::Float(f)),
        Err(_) => Some(StatValue::RawString(raw.to_string())),
    }
}

/// "10,81% (37)" → 10.81; 0.0 when there is no comma-decimal percentage.
pub fn extract_percentage(raw: &str) -> f64 {
    percentage_re()
        .captures(raw)
        .and_then(|caps| caps[1].replace(',', ".").parse().ok())
        .unwrap_or(0.0)
}

/// "10,81% (37)" → 37; 0 when absent.
pub fn extract_count_in_parens(raw: &str) -> u32 {
    count_in_parens_re()
        .captures(raw)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// "0,00% (03:09)" → "03:09"; empty when absent.
pub fn extract_duration_in_parens(raw: &str) -> String {
    duration_in_parens_re()
        .captures(raw)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// "28 Samuel Fakt (1)" → jersey 28, "Samuel Fakt". Anything else is a bare name.
pub fn parse_person_token(raw: &str) -> Participant {
    let raw = raw.trim();
    if let Some(caps) = person_token_re().captures(raw)
        && let Ok(jersey_no) = caps[1].parse::<u32>()
    {
        return Participant { jersey_no: Some(jersey_no), name: caps[2].to_string() };
    }
    Participant { jersey_no: None, name: raw.to_string() }
}

/// Trailing "(n)" on a scorer token: the scorer's goals so far this game.
pub fn extract_goal_number(raw: &str) -> Option<u32> {
    goal_number_re()
        .captures(raw.trim_end())
        .and_then(|caps| caps[1].parse().ok())
}

/// "2 min" → 2. None when the description has no leading integer.
pub fn parse_leading_minutes(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

/// "26. A Rejdvik" → (26, "A Rejdvik").
pub fn parse_assist_token(raw: &str) -> Option<(u32, &str)> {
    let caps = assist_token_re().captures(raw.trim())?;
    let jersey_no = caps[1].parse().ok()?;
    let name = caps.get(2)?.as_str();
    Some((jersey_no, name))
}
