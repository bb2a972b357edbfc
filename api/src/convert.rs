use crate::events::normalize_events;
use crate::extract::extract_parenthesized;
use crate::roster::build_rosters;
use crate::stats::normalize_statistics;
use crate::swehockey::{
    ActionsResponse, LineUpsResponse, LineUpsTicker, SummaryResponse, WireTeam, WireTeamOfficial,
};
use crate::{
    Coaches, GameInfo, GameResult, GameStatus, Official, Personnel, Team, Teams, TournamentInfo,
    UnifiedGame,
};
use log::debug;

const INFO_CATEGORY: &str = "Matchinformation";
const INFO_SERIES: &str = "Serie";
const INFO_ARENA: &str = "Arena";
const INFO_ATTENDANCE: &str = "Åskådare";

// ---------------------------------------------------------------------------
// Mapping: GameTicker wire types → unified game
// ---------------------------------------------------------------------------

/// Merge the three documents into one game. Deterministic: equal inputs give
/// equal output. The roster is built first so event assists can resolve.
pub fn build_game(
    line_ups: &LineUpsResponse,
    summary: &SummaryResponse,
    actions: &ActionsResponse,
) -> UnifiedGame {
    let default_ticker = LineUpsTicker::default();
    let ticker = line_ups.game_ticker.as_ref().unwrap_or(&default_ticker);

    let roster = build_rosters(line_ups);
    let statistics = normalize_statistics(summary);
    let events = normalize_events(actions, &roster);

    debug!(
        "built game {:?}: {} events, {} period stat blocks",
        ticker.id,
        events.len(),
        statistics.by_period.len()
    );

    UnifiedGame {
        game: map_game_info(ticker, summary),
        teams: Teams {
            home: map_team(ticker.home.as_ref()),
            away: map_team(ticker.guest.as_ref()),
        },
        personnel: map_personnel(ticker),
        roster,
        statistics,
        events,
        timestamp: actions.timestamp.clone().unwrap_or_default(),
    }
}

fn map_game_info(ticker: &LineUpsTicker, summary: &SummaryResponse) -> GameInfo {
    let goals = |team: Option<&WireTeam>| team.and_then(|t| t.goals).unwrap_or_default();

    GameInfo {
        id: ticker.id.unwrap_or_default(),
        date: ticker.game_date.clone().unwrap_or_default(),
        tournament: TournamentInfo {
            name: match_info(summary, INFO_SERIES),
            short_name: ticker.tournament_group_short_name.clone().unwrap_or_default(),
        },
        venue: match_info(summary, INFO_ARENA),
        attendance: match_info(summary, INFO_ATTENDANCE),
        status: GameStatus {
            is_started: ticker.is_started.unwrap_or(false),
            is_ended: ticker.is_ended.unwrap_or(false),
            is_official: ticker.is_official.unwrap_or(false),
            current_situation: ticker.current_situation.clone(),
        },
        result: GameResult {
            score: format!("{}-{}", goals(ticker.home.as_ref()), goals(ticker.guest.as_ref())),
            period_results: format_period_results(ticker.period_results.as_deref().unwrap_or_default()),
        },
    }
}

/// "3-2 (1-0, 1-2, 1-0)" → "1-0, 1-2, 1-0". Strings without a breakdown pass through.
fn format_period_results(raw: &str) -> String {
    extract_parenthesized(raw).unwrap_or(raw).to_string()
}

/// Look up a free-text row of the "Matchinformation" category.
fn match_info(summary: &SummaryResponse, item_name: &str) -> String {
    summary
        .categories()
        .filter(|c| c.name.as_deref() == Some(INFO_CATEGORY))
        .flat_map(|c| c.items_iter())
        .filter(|item| item.name.as_deref() == Some(item_name))
        .find_map(|item| item.info_item.as_ref().and_then(|i| i.value_str.clone()))
        .unwrap_or_default()
}

fn map_team(team: Option<&WireTeam>) -> Team {
    let Some(t) = team else {
        return Team::default();
    };
    Team {
        id: t.id.unwrap_or_default(),
        club_id: t.club_id.unwrap_or_default(),
        name: t.name.clone().unwrap_or_default(),
        short_name: t.short_name.clone().unwrap_or_default(),
        full_name: t.full_name.clone().unwrap_or_default(),
        color: t.color.clone(),
        has_logo: t.club_has_logo.unwrap_or(false),
        goals: t.goals.unwrap_or_default(),
    }
}

fn map_personnel(ticker: &LineUpsTicker) -> Personnel {
    let mut coaches = Coaches::default();
    let slots = ticker
        .line_up
        .as_ref()
        .and_then(|l| l.team_officials.as_ref());
    for slot in slots.into_iter().flatten() {
        if let Some(official) = &slot.home {
            coaches.home.push(map_team_official(official));
        }
        if let Some(official) = &slot.guest {
            coaches.away.push(map_team_official(official));
        }
    }

    let officials = ticker
        .official_types
        .iter()
        .flatten()
        .flat_map(|group| {
            let role = group.name.clone().unwrap_or_default();
            group.officials.iter().flatten().map(move |o| Official {
                id: o.id.unwrap_or_default(),
                name: o.name.clone().unwrap_or_default(),
                role: role.clone(),
            })
        })
        .collect();

    Personnel { coaches, officials }
}

fn map_team_official(official: &WireTeamOfficial) -> Official {
    Official {
        id: official.id.unwrap_or_default(),
        name: official.name.clone().unwrap_or_default(),
        role: official.official_type.clone().unwrap_or_default(),
    }
}
