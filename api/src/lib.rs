pub mod client;
pub mod convert;
pub mod events;
pub mod export;
pub mod extract;
pub mod roster;
pub mod session;
pub mod stats;
pub mod swehockey;

pub use client::{ApiError, ApiResult, DocumentKind, GameSource, RawDocument, SwehockeyClient};
pub use session::{GameSession, Refresh};

use chrono::{DateTime, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types: unified game model, independent of the GameTicker wire format
// ---------------------------------------------------------------------------

/// One game merged from the lineups, summary and actions documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnifiedGame {
    pub game: GameInfo,
    pub teams: Teams,
    pub personnel: Personnel,
    pub roster: Rosters,
    pub statistics: Statistics,
    pub events: Vec<Event>,
    pub timestamp: String,
}

impl UnifiedGame {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.teams.home,
            Side::Away => &self.teams.away,
        }
    }

    pub fn goals(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_goal())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub id: u64,
    pub date: String,
    pub tournament: TournamentInfo,
    pub venue: String,
    pub attendance: String,
    pub status: GameStatus,
    pub result: GameResult,
}

impl GameInfo {
    /// Face-off time as published. The feed omits the offset most of the time,
    /// so the value is kept as local wall-clock time.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let date = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
            return Some(dt.naive_local());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInfo {
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub is_started: bool,
    pub is_ended: bool,
    pub is_official: bool,
    pub current_situation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub score: String,          // "3-2", home first
    pub period_results: String, // "1-0, 1-2, 1-0"
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Home,
    Away,
}

impl Side {
    pub fn from_is_home(is_home: bool) -> Self {
        if is_home { Side::Home } else { Side::Away }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Teams {
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub club_id: u64,
    pub name: String,       // "Haninge Anchors HC Röd"
    pub short_name: String, // "HAN"
    pub full_name: String,
    pub color: Option<String>,
    pub has_logo: bool,
    pub goals: u32,
}

// ---------------------------------------------------------------------------
// Personnel and rosters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Personnel {
    pub coaches: Coaches,
    pub officials: Vec<Official>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coaches {
    pub home: Vec<Official>,
    pub away: Vec<Official>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Official {
    pub id: u64,
    pub name: String,
    /// "Huvudtränare" for coaches, the official-type group ("Huvuddomare") for referees.
    #[serde(rename = "type")]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rosters {
    pub home: TeamRoster,
    pub away: TeamRoster,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamRoster {
    pub goalies: Vec<Player>,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u64,
    pub jersey_no: u32,
    pub name: String,
    pub position: String,
    pub starter: bool,
    /// Line the skater is dressed on. Goalies never carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// A typed statistic recovered from the feed's free-text value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    /// Text that is not a plain number, e.g. "03:09" or "12%".
    RawString(String),
}

/// Stat name → value for one side, in the order the feed lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatLine {
    entries: Vec<(String, Option<StatValue>)>,
}

impl StatLine {
    /// Insert or overwrite in place, keeping the original position of the name.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<StatValue>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&StatValue>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StatLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub by_period: Vec<PeriodStats>,
    pub total: SideStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodStats {
    pub period: u32,
    pub home: StatLine,
    pub away: StatLine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideStats {
    pub home: StatLine,
    pub away: StatLine,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    pub period: u32,
    pub time: String, // "07:41", elapsed in period
    pub team: Side,
    #[serde(flatten)]
    pub kind: EventKind,
    pub type_id: u32,
    pub is_highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Participant>,
    /// Penalty length in minutes, from "2 min".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Assist text on non-goal events, kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<String>,
}

impl Event {
    pub fn is_goal(&self) -> bool {
        matches!(self.kind, EventKind::Goal { .. })
    }

    /// How the goal changed the game, derived from the score after it.
    pub fn goal_context(&self) -> Option<GoalContext> {
        let EventKind::Goal { score_state: Some(score), .. } = &self.kind else {
            return None;
        };
        let (home, away) = extract::extract_score_pair(score)?;
        let (team, opponent) = match self.team {
            Side::Home => (home, away),
            Side::Away => (away, home),
        };
        Some(GoalContext::classify(
            team.saturating_sub(1),
            opponent,
            team,
            opponent,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EventKind {
    #[serde(rename_all = "camelCase")]
    Goal {
        score_state: Option<String>, // "2-1", home first
        strength: Option<Strength>,
        goal_number: Option<u32>,
        assists: Vec<Assist>,
    },
    Penalty {
        /// Penalized player's name, or "bench" for a team penalty.
        penalized: String,
    },
    Timeout,
    GoalieIn {
        goalie: Option<String>,
    },
    GoalieOut {
        goalie: Option<String>,
    },
    Unknown {
        code: u32,
    },
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Goal { .. } => "goal",
            EventKind::Penalty { .. } => "penalty",
            EventKind::Timeout => "timeout",
            EventKind::GoalieIn { .. } => "goalie-in",
            EventKind::GoalieOut { .. } => "goalie-out",
            EventKind::Unknown { .. } => "unknown",
        }
    }
}

/// A participant token from the feed, "28 Samuel Fakt" or just a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_no: Option<u32>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assist {
    pub jersey_no: u32,
    /// Full roster name when the jersey resolves, otherwise the feed's abbreviation ("A Rejdvik").
    pub name: String,
}

/// Numerical situation a goal was scored in, with the code exactly as the feed wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Strength {
    code: String,
    situation: Situation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    EvenStrength,
    /// Power play; a bare "PP" counts as level 1.
    PowerPlay(u8),
    ShortHanded(u8),
    Other,
}

impl Strength {
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        let level = |rest: &str| if rest.is_empty() { Some(1) } else { rest.parse::<u8>().ok() };
        let situation = if code == "EQ" {
            Situation::EvenStrength
        } else if let Some(n) = code.strip_prefix("PP").and_then(level) {
            Situation::PowerPlay(n)
        } else if let Some(n) = code.strip_prefix("SH").and_then(level) {
            Situation::ShortHanded(n)
        } else {
            Situation::Other
        };
        Strength { code: code.to_string(), situation }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn situation(&self) -> Situation {
        self.situation
    }
}

impl From<Strength> for String {
    fn from(strength: Strength) -> Self {
        strength.code
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalContext {
    TakesLead,
    ExtendsLead,
    Equalizes,
    ReducesDeficit,
}

impl GoalContext {
    /// Classify a goal from the scoring team's point of view.
    pub fn classify(team_before: u32, opponent_before: u32, team_after: u32, opponent_after: u32) -> Self {
        use std::cmp::Ordering::*;
        match team_after.cmp(&opponent_after) {
            Greater if team_before > opponent_before => GoalContext::ExtendsLead,
            Greater => GoalContext::TakesLead,
            Equal => GoalContext::Equalizes,
            Less => GoalContext::ReducesDeficit,
        }
    }
}
