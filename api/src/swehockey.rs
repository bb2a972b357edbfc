//! GameTicker raw wire types: serde shapes for the three per-game documents.
//! These map to our unified domain types in convert.rs and the normalizers.
//! Base: https://backend-app.swehockey.se/GameTicker/{LineUps|Summary|Actions}/{game_id}
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Line-ups  (teams, officials, lines)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LineUpsResponse {
    pub game_ticker: Option<LineUpsTicker>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LineUpsTicker {
    pub id: Option<u64>,
    pub game_date: Option<String>, // ISO 8601 without offset
    pub tournament_group_short_name: Option<String>,
    pub is_started: Option<bool>,
    pub is_ended: Option<bool>,
    pub is_official: Option<bool>,
    pub current_situation: Option<String>,
    /// "3-2 (1-0, 1-2, 1-0)"
    pub period_results: Option<String>,
    pub home: Option<WireTeam>,
    pub guest: Option<WireTeam>,
    pub line_up: Option<WireLineUp>,
    pub official_types: Option<Vec<OfficialType>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WireTeam {
    pub id: Option<u64>,
    pub club_id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "Shortname")]
    pub short_name: Option<String>,
    #[serde(rename = "Fullname")]
    pub full_name: Option<String>,
    pub color: Option<String>,
    pub club_has_logo: Option<bool>,
    pub goals: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WireLineUp {
    pub team_officials: Option<Vec<TeamOfficialSlot>>,
    pub lines: Option<Vec<WireLine>>,
}

/// One row of the officials table; either side may be empty.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TeamOfficialSlot {
    pub home: Option<WireTeamOfficial>,
    pub guest: Option<WireTeamOfficial>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WireTeamOfficial {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub official_type: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WireLine {
    pub id: Option<u64>,
    pub name: Option<String>, // "Målvakter", "Kedja 1", ...
    pub players: Option<Vec<PlayerSlot>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerSlot {
    pub home: Option<WirePlayer>,
    pub guest: Option<WirePlayer>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WirePlayer {
    pub id: Option<u64>,
    pub jersey_no: Option<u32>,
    pub name: Option<String>,
    pub position: Option<String>, // "GK", "CE", "LD", ...
    pub starts: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OfficialType {
    pub name: Option<String>, // "Huvuddomare", "Linjedomare"
    pub officials: Option<Vec<WireOfficial>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WireOfficial {
    pub id: Option<u64>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Summary  (match information + statistics categories)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryResponse {
    pub game_ticker: Option<SummaryTicker>,
}

impl SummaryResponse {
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.game_ticker
            .iter()
            .flat_map(|t| t.categories.iter().flatten())
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryTicker {
    pub categories: Option<Vec<Category>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    pub name: Option<String>, // "Matchinformation", "Period 1", ..., "Totalt"
    pub items: Option<Vec<CategoryItem>>,
}

impl Category {
    pub fn items_iter(&self) -> impl Iterator<Item = &CategoryItem> {
        self.items.iter().flatten()
    }
}

/// A stat row carries `TeamItem`; a match-information row carries `InfoItem`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryItem {
    pub name: Option<String>,
    pub team_item: Option<TeamItem>,
    pub info_item: Option<InfoItem>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TeamItem {
    pub value_home: Option<String>,  // "10,81% (37)"
    pub value_guest: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InfoItem {
    pub value_str: Option<String>,
}

// ---------------------------------------------------------------------------
// Actions  (chronological event log)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ActionsResponse {
    pub game_ticker: Option<ActionsTicker>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ActionsTicker {
    pub periods: Option<Vec<WirePeriod>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WirePeriod {
    pub id: Option<u32>, // period number, 4 = overtime, 5 = shootout
    pub events: Option<Vec<WireEvent>>,
}

/// Free-text fields are empty strings rather than null when unused.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WireEvent {
    pub id: Option<u64>,
    pub is_home: Option<bool>,
    pub time: Option<String>, // "07:41"
    pub event_type_id: Option<u32>,
    pub is_highlighted: Option<bool>,
    pub player: Option<String>,      // "28 Samuel Fakt (1)"
    pub description: Option<String>, // "1-0 (EQ)" for goals, "2 min" for penalties
    pub extra_info: Option<String>,  // penalty reason
    pub assist: Option<String>,      // "26. A Rejdvik, 55. L Videll"
}
