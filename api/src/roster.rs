use crate::swehockey::{LineUpsResponse, WirePlayer};
use crate::{Player, Rosters, Side, TeamRoster};
use log::warn;
use std::collections::HashSet;

const GOALIE_POSITION: &str = "GK";

/// Build both rosters from the line-up table. Each slot may name a home
/// player, a guest player, or both; goalies are pulled out of their line.
pub fn build_rosters(line_ups: &LineUpsResponse) -> Rosters {
    let mut rosters = Rosters::default();

    let lines = line_ups
        .game_ticker
        .as_ref()
        .and_then(|t| t.line_up.as_ref())
        .and_then(|l| l.lines.as_ref());

    for line in lines.into_iter().flatten() {
        for slot in line.players.iter().flatten() {
            if let Some(player) = &slot.home {
                place_player(&mut rosters.home, player, line.id);
            }
            if let Some(player) = &slot.guest {
                place_player(&mut rosters.away, player, line.id);
            }
        }
    }

    warn_on_duplicate_jerseys(&rosters.home, Side::Home);
    warn_on_duplicate_jerseys(&rosters.away, Side::Away);

    rosters
}

fn place_player(roster: &mut TeamRoster, wire: &WirePlayer, line_id: Option<u64>) {
    let position = wire.position.clone().unwrap_or_default();
    let is_goalie = position == GOALIE_POSITION;
    let player = Player {
        id: wire.id.unwrap_or_default(),
        jersey_no: wire.jersey_no.unwrap_or_default(),
        name: wire.name.clone().unwrap_or_default(),
        position,
        starter: wire.starts.unwrap_or(false),
        line: if is_goalie { None } else { line_id },
    };

    if is_goalie {
        roster.goalies.push(player);
    } else {
        roster.players.push(player);
    }
}

fn warn_on_duplicate_jerseys(roster: &TeamRoster, side: Side) {
    let mut seen = HashSet::new();
    for player in roster.players.iter().chain(roster.goalies.iter()) {
        if !seen.insert(player.jersey_no) {
            warn!(
                "duplicate jersey #{} on {side} roster ({}); lookups resolve to the first entry",
                player.jersey_no, player.name
            );
        }
    }
}

impl Rosters {
    pub fn side(&self, side: Side) -> &TeamRoster {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Full name for a jersey number on one side. Skaters are searched before
    /// goalies and the first match wins.
    pub fn resolve(&self, jersey_no: u32, side: Side) -> Option<&str> {
        let roster = self.side(side);
        roster
            .players
            .iter()
            .chain(roster.goalies.iter())
            .find(|p| p.jersey_no == jersey_no)
            .map(|p| p.name.as_str())
    }
}
