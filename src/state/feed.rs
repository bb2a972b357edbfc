use chrono::{DateTime, Local};
use std::collections::HashSet;
use swehockey_api::{Event, EventKind, GoalContext, Situation, UnifiedGame};

// ---------------------------------------------------------------------------
// Event feed (which events have already been reported in watch mode)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct EventFeed {
    game_id: Option<u64>,
    updated_at: Option<DateTime<Local>>,
    seen: HashSet<(u32, u64)>,
}

impl EventFeed {
    /// Record the game's events and return the ones not seen before, in feed order.
    /// Switching to another game starts over.
    pub fn update<'a>(&mut self, game: &'a UnifiedGame) -> Vec<&'a Event> {
        if self.game_id != Some(game.game.id) {
            self.seen.clear();
            self.game_id = Some(game.game.id);
        }
        self.updated_at = Some(Local::now());

        game.events
            .iter()
            .filter(|e| self.seen.insert(event_key(e)))
            .collect()
    }

    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    /// Wall-clock time of the last update, "14:03:27".
    pub fn updated_at(&self) -> String {
        self.updated_at
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
    }
}

fn event_key(event: &Event) -> (u32, u64) {
    (event.period, event.id)
}

/// One-line description for the log, e.g. "P1 07:41 HAN goal 1-0 (EQ) Samuel Fakt [Albin Rejdvik, Linus Videll], takes lead".
pub fn describe(event: &Event, game: &UnifiedGame) -> String {
    let team = &game.team(event.team).short_name;
    let mut line = format!("P{} {} {team} {}", event.period, event.time, event.kind.label());

    match &event.kind {
        EventKind::Goal { score_state, strength, assists, .. } => {
            if let Some(score) = score_state {
                line.push_str(&format!(" {score}"));
            }
            if let Some(strength) = strength {
                match situation_text(strength.situation()) {
                    Some(text) => line.push_str(&format!(" ({strength}, {text})")),
                    None => line.push_str(&format!(" ({strength})")),
                }
            }
            if let Some(player) = &event.player {
                line.push_str(&format!(" {}", player.name));
            }
            if !assists.is_empty() {
                let names: Vec<&str> = assists.iter().map(|a| a.name.as_str()).collect();
                line.push_str(&format!(" [{}]", names.join(", ")));
            }
            if let Some(context) = event.goal_context() {
                line.push_str(&format!(", {}", context_text(context)));
            }
        }
        EventKind::Penalty { penalized } => {
            line.push_str(&format!(" {penalized}"));
            if let Some(minutes) = event.duration {
                line.push_str(&format!(" {minutes} min"));
            }
            if let Some(reason) = &event.reason {
                line.push_str(&format!(" ({reason})"));
            }
        }
        EventKind::GoalieIn { goalie: Some(name) } | EventKind::GoalieOut { goalie: Some(name) } => {
            line.push_str(&format!(" {name}"));
        }
        EventKind::Unknown { code } => line.push_str(&format!(" #{code}")),
        _ => {}
    }
    line
}

fn situation_text(situation: Situation) -> Option<&'static str> {
    match situation {
        Situation::PowerPlay(_) => Some("power play"),
        Situation::ShortHanded(_) => Some("short-handed"),
        Situation::EvenStrength | Situation::Other => None,
    }
}

fn context_text(context: GoalContext) -> &'static str {
    match context {
        GoalContext::TakesLead => "takes lead",
        GoalContext::ExtendsLead => "extends lead",
        GoalContext::Equalizes => "equalizes",
        GoalContext::ReducesDeficit => "reduces deficit",
    }
}
