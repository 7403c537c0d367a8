//! Session accounting: pure reducers that turn the final stats into the
//! `SessionResult` handed back to the caller for persistence.

use bloomguard_core::config::{CarryOver, LevelConfig, Objective};
use bloomguard_core::constants::*;
use bloomguard_core::enums::{EncounterPhase, Season};
use bloomguard_core::state::{ObjectiveStatus, SessionResult, SessionStats};

/// Research points: completed sessions earn by level and score,
/// others by score alone.
pub fn research_points(completed: bool, level: u32, score: u32) -> u32 {
    if completed {
        level * 2 + score / 50
    } else {
        score / 100
    }
}

/// Leaf bonus from the reward table. Only completed sessions are paid.
pub fn bonus_leaf(stats: &SessionStats, config: &LevelConfig) -> u32 {
    let Some(rewards) = config.rewards.filter(|_| stats.completed) else {
        return 0;
    };
    let mut bonus = rewards.base_leaf;
    if stats.plant_health >= PERFECT_HEALTH_THRESHOLD {
        bonus += rewards.perfect_bonus;
    }
    if stats.total_eliminations() as usize >= config.pests.len() {
        bonus += rewards.completion_bonus;
    }
    bonus
}

pub fn skill_points(stats: &SessionStats) -> u32 {
    if !stats.completed {
        return 0;
    }
    let mut points = 1;
    if stats.plant_health >= 90.0 {
        points += 2;
    }
    if stats.score > 1000 {
        points += 1;
    }
    if stats.total_eliminations() >= 50 {
        points += 1;
    }
    points
}

/// Advance the in-game calendar by one day.
pub fn advance_season(season: Season, day: u32) -> (Season, u32) {
    let next = day + 1;
    if next >= SEASON_LENGTH_DAYS {
        (season.next(), 0)
    } else {
        (season, next)
    }
}

pub fn objective_report(stats: &SessionStats, config: &LevelConfig) -> Vec<ObjectiveStatus> {
    config
        .objectives
        .iter()
        .map(|objective| {
            let met = match *objective {
                Objective::Survive { duration_secs } => stats.elapsed_ms >= duration_secs * 1000,
                Objective::EliminatePests { count } => stats.total_eliminations() >= count,
                Objective::MaintainHealth { threshold } => stats.plant_health >= threshold,
            };
            ObjectiveStatus {
                objective: *objective,
                met,
            }
        })
        .collect()
}

/// Settle a finished session.
pub fn settle(
    stats: &SessionStats,
    config: &LevelConfig,
    carry_over: &CarryOver,
    season: Season,
    outcome: EncounterPhase,
) -> SessionResult {
    let completed = stats.completed;
    let (season, season_day) = advance_season(season, carry_over.season_day);

    let mut pests_encountered = carry_over.pests_encountered.clone();
    pests_encountered.extend(stats.eliminations.keys().cloned());

    let next_level = if completed {
        carry_over.current_level.max(config.level + 1)
    } else {
        carry_over.current_level.max(config.level)
    };

    SessionResult {
        outcome,
        completed,
        level: config.level,
        score: stats.score,
        duration_secs: stats.elapsed_ms / 1000,
        pests_eliminated: stats.eliminations.clone(),
        plant_health_final: stats.plant_health,
        research_points: research_points(completed, config.level, stats.score),
        leaf_earned: stats.score / 10,
        bonus_leaf: bonus_leaf(stats, config),
        skill_points: skill_points(stats),
        pests_encountered,
        next_level,
        season,
        season_day,
        objectives: objective_report(stats, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomguard_core::config::RewardTable;

    fn finished(score: u32, health: f64, kills: u32) -> SessionStats {
        let mut stats = SessionStats {
            score,
            elapsed_ms: 65_400,
            plant_health: health,
            completed: true,
            ..Default::default()
        };
        if kills > 0 {
            stats.eliminations.insert("aphid".to_string(), kills);
        }
        stats
    }

    #[test]
    fn test_research_points() {
        assert_eq!(research_points(true, 4, 260), 8 + 5);
        assert_eq!(research_points(false, 4, 260), 2);
    }

    #[test]
    fn test_bonus_leaf_requires_completion() {
        let mut config = LevelConfig::for_level(2);
        config.rewards = Some(RewardTable {
            base_leaf: 70,
            completion_bonus: 35,
            perfect_bonus: 21,
        });
        assert_eq!(bonus_leaf(&finished(100, 85.0, 0), &config), 70 + 21 + 35);
        assert_eq!(bonus_leaf(&finished(100, 50.0, 0), &config), 70 + 35);

        let mut lost = finished(100, 85.0, 0);
        lost.completed = false;
        assert_eq!(bonus_leaf(&lost, &config), 0);
        assert_eq!(bonus_leaf(&finished(100, 85.0, 0), &LevelConfig::for_level(2)), 0);
    }

    #[test]
    fn test_skill_points() {
        assert_eq!(skill_points(&finished(10, 50.0, 1)), 1);
        assert_eq!(skill_points(&finished(1500, 95.0, 60)), 5);
    }

    #[test]
    fn test_season_rollover() {
        assert_eq!(advance_season(Season::Spring, 3), (Season::Spring, 4));
        assert_eq!(advance_season(Season::Winter, 29), (Season::Spring, 0));
    }

    #[test]
    fn test_settle_unions_encountered() {
        let config = LevelConfig::for_level(3);
        let mut carry = CarryOver::default();
        carry.pests_encountered.insert("thrip".to_string());
        carry.current_level = 3;
        let result = settle(
            &finished(420, 70.0, 4),
            &config,
            &carry,
            Season::Summer,
            EncounterPhase::Completed,
        );
        assert_eq!(result.leaf_earned, 42);
        assert_eq!(result.duration_secs, 65);
        assert_eq!(result.next_level, 4);
        assert_eq!(result.season_day, 1);
        assert!(result.pests_encountered.contains("thrip"));
        assert!(result.pests_encountered.contains("aphid"));
    }
}
