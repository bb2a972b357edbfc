use crate::client::{ApiError, ApiResult};
use crate::UnifiedGame;
use log::debug;
use std::fs;
use std::path::Path;

/// Pretty-printed JSON, two-space indent. Non-ASCII text is written as-is.
pub fn to_json_string(game: &UnifiedGame) -> ApiResult<String> {
    serde_json::to_string_pretty(game).map_err(|e| ApiError::Export(e.to_string()))
}

pub fn write_json(game: &UnifiedGame, path: impl AsRef<Path>) -> ApiResult<()> {
    let path = path.as_ref();
    let mut json = to_json_string(game)?;
    json.push('\n');
    fs::write(path, json).map_err(|e| ApiError::Export(format!("{}: {e}", path.display())))?;
    debug!("wrote game {} to {}", game.game.id, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, EventKind, Side, Team, Teams};

    fn game() -> UnifiedGame {
        let mut game = UnifiedGame {
            teams: Teams {
                home: Team { name: "Haninge Anchors HC Röd".into(), ..Default::default() },
                away: Team { name: "IFK Österåker Hockey".into(), ..Default::default() },
            },
            ..Default::default()
        };
        game.game.id = 862422;
        game.events.push(Event {
            id: 8,
            period: 2,
            time: "31:10".into(),
            team: Side::Away,
            kind: EventKind::Penalty { penalized: "bench".into() },
            type_id: 4,
            is_highlighted: false,
            player: None,
            duration: Some(2),
            reason: Some("För många spelare på isen".into()),
            assist: None,
        });
        game
    }

    #[test]
    fn keeps_non_ascii_and_camel_case() {
        let json = to_json_string(&game()).unwrap();
        assert!(json.contains("Haninge Anchors HC Röd"));
        assert!(json.contains("För många spelare på isen"));
        assert!(json.contains("\"typeId\": 4"));
        assert!(json.contains("\"type\": \"penalty\""));
        assert!(json.contains("\"byPeriod\": []"));
        assert!(!json.contains("\\u00"));
    }

    #[test]
    fn output_is_deterministic_and_indented() {
        let a = to_json_string(&game()).unwrap();
        assert_eq!(a, to_json_string(&game()).unwrap());
        assert!(a.starts_with("{\n  \"game\": {"));
    }

    #[test]
    fn write_json_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("hockey-ticker-export-{}.json", std::process::id()));
        write_json(&game(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["game"]["id"], 862422);
        assert_eq!(value["events"][0]["team"], "away");
        assert_eq!(value["events"][0]["duration"], 2);
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let err = write_json(&game(), "/nonexistent-dir/game.json").unwrap_err();
        assert!(matches!(err, ApiError::Export(_)));
    }
}
