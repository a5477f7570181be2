//! Preference-based destination scoring
//!
//! Every destination gets an additive integer score from four independent
//! rules (budget, duration, interests, season). Ranking keeps the top K by
//! descending score; equal scores keep catalog order.

use serde::Serialize;
use tracing::debug;

use crate::models::{BudgetLevel, Destination, Preferences, ScoredDestination};

/// Ranking size used when nothing else is configured
pub const DEFAULT_TOP_K: usize = 5;

const EXACT_BUDGET_POINTS: u32 = 2;
const AFFORDABLE_BUDGET_POINTS: u32 = 1;
const DURATION_POINTS: u32 = 2;
const INTEREST_POINTS: u32 = 1;
const SEASON_POINTS: u32 = 2;

/// Points contributed by each rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub budget: u32,
    pub duration: u32,
    pub interests: u32,
    pub season: u32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.budget + self.duration + self.interests + self.season
    }
}

/// Budget points: exact match, or a traveller who can afford more than the place needs
#[must_use]
pub fn budget_points(wanted: BudgetLevel, offered: BudgetLevel) -> u32 {
    match (wanted, offered) {
        (w, o) if w == o => EXACT_BUDGET_POINTS,
        (BudgetLevel::High, BudgetLevel::Medium | BudgetLevel::Low)
        | (BudgetLevel::Medium, BudgetLevel::Low) => AFFORDABLE_BUDGET_POINTS,
        _ => 0,
    }
}

/// Per-rule points for one destination
#[must_use]
pub fn explain(prefs: &Preferences, dest: &Destination) -> ScoreBreakdown {
    let budget = prefs
        .budget
        .map_or(0, |wanted| budget_points(wanted, dest.budget_level));

    let duration = prefs
        .duration
        .filter(|days| dest.ideal_duration.contains(*days))
        .map_or(0, |_| DURATION_POINTS);

    // Uncapped: one point per matching interest
    let interests = prefs.interests.as_deref().map_or(0, |interests| {
        let matches = interests.iter().filter(|i| dest.has_tag(i)).count();
        u32::try_from(matches).unwrap_or(u32::MAX) * INTEREST_POINTS
    });

    let season = prefs
        .season
        .as_deref()
        .filter(|season| dest.suits_season(season))
        .map_or(0, |_| SEASON_POINTS);

    ScoreBreakdown {
        budget,
        duration,
        interests,
        season,
    }
}

#[must_use]
pub fn score(prefs: &Preferences, dest: &Destination) -> u32 {
    explain(prefs, dest).total()
}

/// Top `top_k` destinations by descending score, ties in catalog order
#[must_use]
pub fn rank_destinations(
    prefs: &Preferences,
    catalog: &[Destination],
    top_k: usize,
) -> Vec<ScoredDestination> {
    let mut scored: Vec<ScoredDestination> = catalog
        .iter()
        .map(|dest| ScoredDestination {
            destination: dest.clone(),
            match_score: score(prefs, dest),
        })
        .collect();

    // sort_by is stable, which gives first-seen-first tie-breaking
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(top_k);

    debug!(
        ranked = ?scored.iter().map(|s| (&s.destination.name, s.match_score)).collect::<Vec<_>>(),
        "ranked destinations"
    );
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DurationRange;
    use rstest::rstest;

    fn dest(name: &str, budget: BudgetLevel) -> Destination {
        Destination::new(
            name,
            "Testland",
            &["beaches", "relaxation"],
            budget,
            DurationRange::new(5, 14),
            &["spring", "fall"],
        )
    }

    fn catalog_of(n: usize) -> Vec<Destination> {
        (0..n)
            .map(|i| dest(&format!("D{i}"), BudgetLevel::Medium))
            .collect()
    }

    #[test]
    fn test_full_match_scores_seven() {
        let prefs = Preferences {
            budget: Some(BudgetLevel::Medium),
            duration: Some(7),
            interests: Some(vec!["beaches".to_string()]),
            season: Some("spring".to_string()),
            ..Preferences::default()
        };
        let bali = dest("Bali", BudgetLevel::Medium);
        let breakdown = explain(&prefs, &bali);
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                budget: 2,
                duration: 2,
                interests: 1,
                season: 2
            }
        );
        assert_eq!(score(&prefs, &bali), 7);
    }

    #[rstest]
    #[case(BudgetLevel::Low, BudgetLevel::Low, 2)]
    #[case(BudgetLevel::Medium, BudgetLevel::Medium, 2)]
    #[case(BudgetLevel::High, BudgetLevel::High, 2)]
    #[case(BudgetLevel::High, BudgetLevel::Medium, 1)]
    #[case(BudgetLevel::High, BudgetLevel::Low, 1)]
    #[case(BudgetLevel::Medium, BudgetLevel::Low, 1)]
    #[case(BudgetLevel::Medium, BudgetLevel::High, 0)]
    #[case(BudgetLevel::Low, BudgetLevel::Medium, 0)]
    #[case(BudgetLevel::Low, BudgetLevel::High, 0)]
    fn test_budget_points(
        #[case] wanted: BudgetLevel,
        #[case] offered: BudgetLevel,
        #[case] expected: u32,
    ) {
        assert_eq!(budget_points(wanted, offered), expected);
    }

    #[test]
    fn test_high_budget_ties_keep_catalog_order() {
        let prefs = Preferences {
            budget: Some(BudgetLevel::High),
            ..Preferences::default()
        };
        let catalog = vec![
            dest("MediumPlace", BudgetLevel::Medium),
            dest("LowPlace", BudgetLevel::Low),
        ];
        let ranked = rank_destinations(&prefs, &catalog, DEFAULT_TOP_K);
        let result: Vec<(&str, u32)> = ranked
            .iter()
            .map(|s| (s.destination.name.as_str(), s.match_score))
            .collect();
        assert_eq!(result, vec![("MediumPlace", 1), ("LowPlace", 1)]);
    }

    #[test]
    fn test_empty_preferences_keep_first_five() {
        let catalog = catalog_of(8);
        let ranked = rank_destinations(&Preferences::default(), &catalog, DEFAULT_TOP_K);
        let names: Vec<&str> = ranked.iter().map(|s| s.destination.name.as_str()).collect();
        assert_eq!(names, vec!["D0", "D1", "D2", "D3", "D4"]);
        assert!(ranked.iter().all(|s| s.match_score == 0));
    }

    #[test]
    fn test_exact_budget_beats_non_match_by_two() {
        let prefs = Preferences {
            budget: Some(BudgetLevel::Low),
            duration: Some(6),
            ..Preferences::default()
        };
        let matching = dest("A", BudgetLevel::Low);
        let other = dest("B", BudgetLevel::High);
        assert!(score(&prefs, &matching) >= score(&prefs, &other) + 2);
    }

    #[test]
    fn test_interests_are_uncapped_and_case_insensitive() {
        let prefs = Preferences {
            interests: Some(vec![
                "BEACHES".to_string(),
                "Relaxation".to_string(),
                "skiing".to_string(),
            ]),
            ..Preferences::default()
        };
        assert_eq!(score(&prefs, &dest("X", BudgetLevel::Low)), 2);
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let at = |days| Preferences {
            duration: Some(days),
            ..Preferences::default()
        };
        let d = dest("X", BudgetLevel::Low);
        assert_eq!(score(&at(5), &d), 2);
        assert_eq!(score(&at(14), &d), 2);
        assert_eq!(score(&at(15), &d), 0);
    }

    #[test]
    fn test_season_case_insensitive() {
        let prefs = Preferences {
            season: Some("Fall".to_string()),
            ..Preferences::default()
        };
        assert_eq!(score(&prefs, &dest("X", BudgetLevel::Low)), 2);
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        assert!(rank_destinations(&Preferences::default(), &[], DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn test_ranking_is_sorted_and_bounded() {
        let prefs = Preferences {
            budget: Some(BudgetLevel::Medium),
            interests: Some(vec!["culture".to_string(), "food".to_string()]),
            season: Some("summer".to_string()),
            ..Preferences::default()
        };
        let catalog = crate::catalog::DestinationCatalog::embedded();
        for k in 0..=7 {
            let ranked = rank_destinations(&prefs, catalog.destinations(), k);
            assert!(ranked.len() <= k.min(catalog.len()));
            assert!(
                ranked
                    .windows(2)
                    .all(|w| w[0].match_score >= w[1].match_score)
            );
        }
        let top = rank_destinations(&prefs, catalog.destinations(), 1);
        // Prague: medium budget, culture tag and summer season
        assert_eq!(top[0].destination.name, "Prague");
        assert_eq!(top[0].match_score, 5);
    }

    #[rstest]
    #[case(&["écotourisme"], "été", 3)]
    #[case(&["ÉCOTOURISME", "gastronomie"], "ÉTÉ", 4)]
    #[case(&["Ecotourisme"], "ete", 0)]
    fn test_non_ascii_matching_ignores_case(
        #[case] interests: &[&str],
        #[case] season: &str,
        #[case] expected: u32,
    ) {
        let dest = Destination::new(
            "Lyon",
            "France",
            &["Gastronomie", "Écotourisme"],
            BudgetLevel::Medium,
            DurationRange::new(3, 5),
            &["Été"],
        );
        let prefs = Preferences {
            interests: Some(interests.iter().map(|i| (*i).to_string()).collect()),
            season: Some(season.to_string()),
            ..Preferences::default()
        };
        assert_eq!(score(&prefs, &dest), expected);
    }
}
