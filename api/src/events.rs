use crate::extract::{
    extract_goal_number, extract_parenthesized, extract_score_pair, non_empty,
    parse_assist_token, parse_leading_minutes, parse_person_token,
};
use crate::swehockey::{ActionsResponse, WireEvent};
use crate::{Assist, Event, EventKind, Rosters, Side, Strength};
use log::debug;

const GOALIE_IN: u32 = 1;
const GOALIE_OUT: u32 = 2;
const GOAL: u32 = 3;
const PENALTY: u32 = 4;
const TIMEOUT: u32 = 7;

/// Team penalties carry no player token.
const BENCH: &str = "bench";
const DURATION_MARKER: &str = "min";

/// Normalize the action log in source order. The rosters must already be
/// built from the line-up document; goal assists are resolved against them.
pub fn normalize_events(actions: &ActionsResponse, rosters: &Rosters) -> Vec<Event> {
    let periods = actions
        .game_ticker
        .as_ref()
        .and_then(|t| t.periods.as_ref());

    periods
        .into_iter()
        .flatten()
        .flat_map(|period| {
            let number = period.id.unwrap_or_default();
            period
                .events
                .iter()
                .flatten()
                .map(move |raw| normalize_event(number, raw, rosters))
        })
        .collect()
}

fn normalize_event(period: u32, raw: &WireEvent, rosters: &Rosters) -> Event {
    let type_id = raw.event_type_id.unwrap_or_default();
    let team = Side::from_is_home(raw.is_home.unwrap_or(false));
    let player_token = non_empty(raw.player.as_deref());
    let description = non_empty(raw.description.as_deref());
    let player = player_token.map(parse_person_token);
    let player_name = player.as_ref().map(|p| p.name.clone());

    let kind = match type_id {
        GOAL => goal_kind(player_token, description, raw.assist.as_deref(), rosters, team),
        PENALTY => EventKind::Penalty {
            penalized: player_name.unwrap_or_else(|| BENCH.to_string()),
        },
        TIMEOUT => EventKind::Timeout,
        GOALIE_IN => EventKind::GoalieIn { goalie: player_name },
        GOALIE_OUT => EventKind::GoalieOut { goalie: player_name },
        code => {
            debug!("unknown event type {code} (event {:?}), kept as unknown", raw.id);
            EventKind::Unknown { code }
        }
    };

    let duration = description
        .filter(|d| d.contains(DURATION_MARKER))
        .and_then(parse_leading_minutes);

    let assist = match kind {
        EventKind::Goal { .. } => None,
        _ => non_empty(raw.assist.as_deref()).map(str::to_string),
    };

    Event {
        id: raw.id.unwrap_or_default(),
        period,
        time: raw.time.clone().unwrap_or_default(),
        team,
        kind,
        type_id,
        is_highlighted: raw.is_highlighted.unwrap_or(false),
        player,
        duration,
        reason: non_empty(raw.extra_info.as_deref()).map(str::to_string),
        assist,
    }
}

fn goal_kind(
    player_token: Option<&str>,
    description: Option<&str>,
    assist: Option<&str>,
    rosters: &Rosters,
    side: Side,
) -> EventKind {
    let description = description.unwrap_or_default();
    EventKind::Goal {
        score_state: extract_score_pair(description).map(|(h, a)| format!("{h}-{a}")),
        strength: extract_parenthesized(description).map(Strength::from_code),
        goal_number: player_token.and_then(extract_goal_number),
        assists: non_empty(assist)
            .map(|a| parse_assists(a, rosters, side))
            .unwrap_or_default(),
    }
}

/// "28. S Fakt, 55. L Videll" → assists with full names from the scoring
/// side's roster. Unresolved jerseys keep the abbreviated name; pieces that
/// are not "<n>. <name>" are dropped.
pub fn parse_assists(raw: &str, rosters: &Rosters, side: Side) -> Vec<Assist> {
    raw.split(',')
        .filter_map(parse_assist_token)
        .map(|(jersey_no, abbreviated)| {
            let name = match rosters.resolve(jersey_no, side) {
                Some(full) => full.to_string(),
                None => {
                    debug!("assist #{jersey_no} not on {side} roster, keeping {abbreviated:?}");
                    abbreviated.to_string()
                }
            };
            Assist { jersey_no, name }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swehockey::{ActionsTicker, WirePeriod};
    use crate::{Participant, Player, Situation, TeamRoster};

    fn skater(jersey_no: u32, name: &str) -> Player {
        Player {
            id: u64::from(jersey_no),
            jersey_no,
            name: name.into(),
            position: "CE".into(),
            starter: true,
            line: Some(1),
        }
    }

    fn rosters() -> Rosters {
        Rosters {
            home: TeamRoster {
                goalies: vec![Player { line: None, position: "GK".into(), ..skater(30, "Hugo Jortby") }],
                players: vec![skater(26, "Albin Rejdvik"), skater(55, "Linus Videll")],
            },
            away: TeamRoster {
                goalies: vec![],
                players: vec![skater(26, "Viktor Åberg")],
            },
        }
    }

    fn raw(id: u64, type_id: u32, is_home: bool) -> WireEvent {
        WireEvent {
            id: Some(id),
            is_home: Some(is_home),
            time: Some("07:41".into()),
            event_type_id: Some(type_id),
            is_highlighted: Some(false),
            player: Some(String::new()),
            description: Some(String::new()),
            extra_info: Some(String::new()),
            assist: Some(String::new()),
        }
    }

    #[test]
    fn assists_resolve_on_scoring_side() {
        let assists = parse_assists("26. A Rejdvik, 55. L Videll", &rosters(), Side::Home);
        assert_eq!(
            assists,
            vec![
                Assist { jersey_no: 26, name: "Albin Rejdvik".into() },
                Assist { jersey_no: 55, name: "Linus Videll".into() },
            ]
        );

        let away = parse_assists("26. V Åberg", &rosters(), Side::Away);
        assert_eq!(away[0].name, "Viktor Åberg");
    }

    #[test]
    fn unresolved_assist_keeps_abbreviation() {
        let assists = parse_assists("99. X Okänd, 30. H Jortby", &rosters(), Side::Home);
        assert_eq!(assists[0], Assist { jersey_no: 99, name: "X Okänd".into() });
        assert_eq!(assists[1].name, "Hugo Jortby");
        assert!(parse_assists("ingen", &rosters(), Side::Home).is_empty());
    }

    #[test]
    fn goal_carries_score_strength_number_and_assists() {
        let mut goal = raw(3, GOAL, true);
        goal.player = Some("26 Albin Rejdvik (2)".into());
        goal.description = Some("2-1 (PP1)".into());
        goal.assist = Some("55. L Videll".into());

        let event = normalize_event(2, &goal, &rosters());
        assert_eq!(event.period, 2);
        assert_eq!(event.team, Side::Home);
        assert_eq!(
            event.player,
            Some(Participant { jersey_no: Some(26), name: "Albin Rejdvik".into() })
        );
        assert_eq!(
            event.kind,
            EventKind::Goal {
                score_state: Some("2-1".into()),
                strength: Some(Strength::from_code("PP1")),
                goal_number: Some(2),
                assists: vec![Assist { jersey_no: 55, name: "Linus Videll".into() }],
            }
        );
        assert_eq!(event.assist, None);
        assert_eq!(event.duration, None);
    }

    #[test]
    fn goal_strength_keeps_the_feed_code() {
        let mut goal = raw(9, GOAL, false);
        goal.description = Some("1-1 (PP)".into());
        let event = normalize_event(1, &goal, &rosters());
        let EventKind::Goal { strength: Some(strength), .. } = &event.kind else {
            panic!("expected goal with strength, got {:?}", event.kind);
        };
        assert_eq!(strength.code(), "PP");
        assert_eq!(strength.situation(), Situation::PowerPlay(1));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["strength"], "PP");
    }

    #[test]
    fn penalty_with_player_and_bench_penalty() {
        let mut penalty = raw(4, PENALTY, false);
        penalty.player = Some("77 Anton Wiklund".into());
        penalty.description = Some("2 min".into());
        penalty.extra_info = Some("Slashing".into());
        let event = normalize_event(1, &penalty, &rosters());
        assert_eq!(event.kind, EventKind::Penalty { penalized: "Anton Wiklund".into() });
        assert_eq!(event.duration, Some(2));
        assert_eq!(event.reason.as_deref(), Some("Slashing"));
        assert_eq!(event.team, Side::Away);

        let mut bench = raw(5, PENALTY, false);
        bench.description = Some("2 min".into());
        let event = normalize_event(1, &bench, &rosters());
        assert_eq!(event.kind, EventKind::Penalty { penalized: "bench".into() });
        assert!(event.player.is_none());
    }

    #[test]
    fn unknown_codes_and_non_goal_assists_are_preserved() {
        let mut other = raw(9, 12, true);
        other.assist = Some("26. A Rejdvik".into());
        let event = normalize_event(3, &other, &rosters());
        assert_eq!(event.kind, EventKind::Unknown { code: 12 });
        assert_eq!(event.type_id, 12);
        assert_eq!(event.assist.as_deref(), Some("26. A Rejdvik"));
    }

    #[test]
    fn goalie_changes_and_timeouts() {
        let mut goalie_in = raw(1, GOALIE_IN, true);
        goalie_in.player = Some("30 Hugo Jortby".into());
        assert_eq!(
            normalize_event(1, &goalie_in, &rosters()).kind,
            EventKind::GoalieIn { goalie: Some("Hugo Jortby".into()) }
        );
        assert_eq!(
            normalize_event(1, &raw(2, GOALIE_OUT, false), &rosters()).kind,
            EventKind::GoalieOut { goalie: None }
        );
        assert_eq!(normalize_event(3, &raw(3, TIMEOUT, true), &rosters()).kind, EventKind::Timeout);
    }

    #[test]
    fn goal_with_malformed_description_still_normalizes() {
        let mut goal = raw(7, GOAL, false);
        goal.description = Some("okänt".into());
        let event = normalize_event(1, &goal, &rosters());
        assert_eq!(
            event.kind,
            EventKind::Goal { score_state: None, strength: None, goal_number: None, assists: vec![] }
        );
        assert_eq!(event.goal_context(), None);
    }

    #[test]
    fn events_keep_period_and_source_order() {
        let actions = ActionsResponse {
            game_ticker: Some(ActionsTicker {
                periods: Some(vec![
                    WirePeriod { id: Some(1), events: Some(vec![raw(10, TIMEOUT, true), raw(4, TIMEOUT, false)]) },
                    WirePeriod { id: Some(2), events: Some(vec![raw(2, TIMEOUT, true)]) },
                ]),
            }),
            timestamp: None,
        };
        let events = normalize_events(&actions, &rosters());
        let ids: Vec<(u32, u64)> = events.iter().map(|e| (e.period, e.id)).collect();
        assert_eq!(ids, vec![(1, 10), (1, 4), (2, 2)]);
    }
}
