use crate::extract::{
    extract_count_in_parens, extract_duration_in_parens, extract_percentage, parse_stat_value,
};
use crate::swehockey::{Category, SummaryResponse, TeamItem};
use crate::{PeriodStats, SideStats, StatLine, StatValue, Statistics};
use log::{debug, warn};

const PERIOD_PREFIX: &str = "Period";
const TOTAL_CATEGORY: &str = "Totalt";

/// Map a Swedish stat label to its canonical name. Unknown labels are lower-cased.
pub fn normalize_stat_name(label: &str) -> String {
    let canonical = match label {
        "Mål" => "goals",
        "Skott" => "shots",
        "Räddningar" => "saves",
        "Utvisningsminuter" => "penalties",
        "PP" => "powerPlayPercentage",
        other => {
            debug!("unmapped stat label {other:?}, passing through");
            return other.to_lowercase();
        }
    };
    canonical.to_string()
}

pub fn normalize_statistics(summary: &SummaryResponse) -> Statistics {
    let by_period = summary
        .categories()
        .filter_map(|category| {
            let name = category.name.as_deref()?;
            let number = name.strip_prefix(PERIOD_PREFIX)?;
            match number.trim().parse::<u32>() {
                Ok(period) => Some(period_stats(period, category)),
                Err(_) => {
                    warn!("skipping statistics category {name:?}: no period number");
                    None
                }
            }
        })
        .collect();

    let mut total = SideStats::default();
    for category in summary
        .categories()
        .filter(|c| c.name.as_deref() == Some(TOTAL_CATEGORY))
    {
        for (name, values) in team_items(category) {
            for (key, value) in total_values(&name, values.value_home.as_deref()) {
                total.home.insert(key, value);
            }
            for (key, value) in total_values(&name, values.value_guest.as_deref()) {
                total.away.insert(key, value);
            }
        }
    }

    Statistics { by_period, total }
}

fn period_stats(period: u32, category: &Category) -> PeriodStats {
    let mut home = StatLine::default();
    let mut away = StatLine::default();
    for (name, values) in team_items(category) {
        home.insert(name.clone(), parse_stat_value(side_value(values.value_home.as_deref())));
        away.insert(name, parse_stat_value(side_value(values.value_guest.as_deref())));
    }
    PeriodStats { period, home, away }
}

fn team_items(category: &Category) -> impl Iterator<Item = (String, &TeamItem)> {
    category.items_iter().filter_map(|item| {
        let values = item.team_item.as_ref()?;
        let name = normalize_stat_name(item.name.as_deref().unwrap_or_default());
        Some((name, values))
    })
}

fn side_value(raw: Option<&str>) -> &str {
    raw.unwrap_or_default()
}

/// Totals for shots, saves and power play pack a rate and its base into one
/// string, "10,81% (37)" or "50,00% (04:00)". Those become two stats.
fn total_values(name: &str, raw: Option<&str>) -> Vec<(String, Option<StatValue>)> {
    let raw = side_value(raw);
    let rate = || Some(StatValue::Float(extract_percentage(raw)));
    let count = || Some(StatValue::Integer(i64::from(extract_count_in_parens(raw))));
    match name {
        "shots" => vec![("shotPercentage".into(), rate()), ("shots".into(), count())],
        "saves" => vec![("savePercentage".into(), rate()), ("saves".into(), count())],
        "powerPlayPercentage" => vec![
            ("powerPlayPercentage".into(), rate()),
            (
                "powerPlayTime".into(),
                Some(StatValue::RawString(extract_duration_in_parens(raw))),
            ),
        ],
        _ => vec![(name.to_string(), parse_stat_value(raw))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swehockey::{CategoryItem, SummaryTicker};

    fn item(name: &str, home: &str, guest: &str) -> CategoryItem {
        CategoryItem {
            name: Some(name.into()),
            team_item: Some(TeamItem {
                value_home: Some(home.into()),
                value_guest: Some(guest.into()),
            }),
            info_item: None,
        }
    }

    fn summary(categories: Vec<(&str, Vec<CategoryItem>)>) -> SummaryResponse {
        SummaryResponse {
            game_ticker: Some(SummaryTicker {
                categories: Some(
                    categories
                        .into_iter()
                        .map(|(name, items)| Category { name: Some(name.into()), items: Some(items) })
                        .collect(),
                ),
            }),
        }
    }

    #[test]
    fn labels_map_to_canonical_names() {
        assert_eq!(normalize_stat_name("Mål"), "goals");
        assert_eq!(normalize_stat_name("PP"), "powerPlayPercentage");
        assert_eq!(normalize_stat_name("Tekningar"), "tekningar");
    }

    #[test]
    fn period_categories_use_generic_parsing() {
        let stats = normalize_statistics(&summary(vec![
            ("Period 1", vec![item("Mål", "1", "0"), item("Skott", "12", "9")]),
            ("Period 2", vec![item("Mål", "1", "2"), item("PP", "50,00% (02:00)", "")]),
        ]));

        assert_eq!(stats.by_period.len(), 2);
        assert_eq!(stats.by_period[0].period, 1);
        assert_eq!(stats.by_period[0].home.get("shots"), Some(&StatValue::Integer(12)));
        assert_eq!(
            stats.by_period[1].home.get("powerPlayPercentage"),
            Some(&StatValue::RawString("50,00% (02:00)".into()))
        );
        assert!(stats.by_period[1].away.contains("powerPlayPercentage"));
        assert_eq!(stats.by_period[1].away.get("powerPlayPercentage"), None);
        assert!(!stats.by_period[1].home.contains("powerPlayTime"));
    }

    #[test]
    fn totals_decompose_compound_values() {
        let stats = normalize_statistics(&summary(vec![(
            "Totalt",
            vec![
                item("Skott", "10,81% (37)", "7,41% (27)"),
                item("Räddningar", "92,59% (25)", "91,43% (32)"),
                item("PP", "50,00% (04:00)", "0,00% (03:09)"),
                item("Tekningar", "52,5", "47,5"),
            ],
        )]));

        let home = &stats.total.home;
        assert_eq!(home.get("shotPercentage"), Some(&StatValue::Float(10.81)));
        assert_eq!(home.get("shots"), Some(&StatValue::Integer(37)));
        assert_eq!(home.get("savePercentage"), Some(&StatValue::Float(92.59)));
        assert_eq!(home.get("saves"), Some(&StatValue::Integer(25)));
        assert_eq!(home.get("powerPlayPercentage"), Some(&StatValue::Float(50.0)));
        assert_eq!(home.get("powerPlayTime"), Some(&StatValue::RawString("04:00".into())));

        let away = &stats.total.away;
        assert_eq!(away.get("powerPlayPercentage"), Some(&StatValue::Float(0.0)));
        assert_eq!(away.get("powerPlayTime"), Some(&StatValue::RawString("03:09".into())));
        assert!(!away.contains("powerPlay"));

        let names: Vec<&str> = home.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "shotPercentage",
                "shots",
                "savePercentage",
                "saves",
                "powerPlayPercentage",
                "powerPlayTime",
                "tekningar"
            ]
        );
        assert_eq!(home.get("tekningar"), Some(&StatValue::Float(52.5)));
        assert!(stats.by_period.is_empty());
    }

    #[test]
    fn info_items_and_foreign_categories_are_ignored() {
        let mut doc = summary(vec![
            ("Matchinformation", vec![item("Arena", "x", "y")]),
            ("Period X", vec![item("Mål", "1", "0")]),
            ("Totalt", vec![item("Mål", "3", "2")]),
        ]);
        if let Some(ticker) = doc.game_ticker.as_mut()
            && let Some(categories) = ticker.categories.as_mut()
        {
            categories[2].items.as_mut().unwrap().push(CategoryItem {
                name: Some("Serie".into()),
                team_item: None,
                info_item: None,
            });
        }

        let stats = normalize_statistics(&doc);
        assert!(stats.by_period.is_empty());
        assert_eq!(stats.total.home.len(), 1);
        assert_eq!(stats.total.away.get("goals"), Some(&StatValue::Integer(2)));
    }
}
