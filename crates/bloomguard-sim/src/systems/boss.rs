//! Boss lifecycle: spawn, sub-timers, armor gating and defeat.
//!
//! `Dormant -> Active -> Defeated`. Armor segments gate damage while any
//! remain: hits land at `ARMOR_DAMAGE_FACTOR` and at most one segment
//! breaks per hit.

use rand::Rng;
use tracing::{debug, info, warn};

use bloomguard_core::catalog::BossTypeDef;
use bloomguard_core::components::Alarm;
use bloomguard_core::constants::*;
use bloomguard_core::enums::{Behavior, BossClass, BossPhase};
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::HitOutcome;
use bloomguard_core::types::Position;

use crate::encounter::{BossInstance, EncounterRules, EncounterState, ToxicCloud};
use crate::systems::spawner::pick;
use crate::world_setup::PestSpawn;

/// Resolved boss stats for this session, before the level formula.
#[derive(Debug, Clone)]
pub struct BossPlan<'a> {
    pub def: &'a BossTypeDef,
    pub health_multiplier: f64,
    pub speed_multiplier: f64,
    pub damage_multiplier: f64,
}

/// The boss this level fields, if any: the explicit descriptor, else the
/// catalog boss debuting at this level on every third level.
pub fn boss_plan(rules: &EncounterRules) -> Option<BossPlan<'_>> {
    if let Some(desc) = &rules.level.boss {
        let def = rules.catalog.boss(&desc.boss_id)?;
        return Some(BossPlan {
            def,
            health_multiplier: desc.health_multiplier,
            speed_multiplier: desc.speed_multiplier,
            damage_multiplier: desc.damage_multiplier,
        });
    }
    if !rules.level.is_boss_level() {
        return None;
    }
    rules.catalog.boss_for_level(rules.level_number()).map(|def| BossPlan {
        def,
        health_multiplier: 1.0,
        speed_multiplier: 1.0,
        damage_multiplier: 1.0,
    })
}

/// Boss max health: descriptor-scaled base, then the level formula.
pub fn boss_max_health(plan: &BossPlan<'_>, level: u32) -> f64 {
    let base = (plan.def.base_health * plan.health_multiplier).floor();
    let levels_past = level as f64 - plan.def.level_appearance as f64;
    (base * (1.0 + levels_past * BOSS_LEVEL_HEALTH_STEP)).max(1.0)
}

/// Spawn the boss when due, then fire its sub-timers.
pub fn run(state: &mut EncounterState, rules: &EncounterRules, rng: &mut impl Rng) {
    if !state.boss_spawned && state.boss.is_none() {
        match boss_plan(rules) {
            Some(plan) => spawn_boss(state, rules, &plan, rng),
            None if rules.level.is_boss_level() && rules.level.boss.is_none() => {
                warn!(level = rules.level_number(), "boss level without a matching catalog boss");
                state.boss_spawned = true;
            }
            None => {}
        }
    }

    if !state.boss_active() {
        return;
    }
    let now = state.now_ms();
    let Some((boss_id, class, position, last_minion, last_toxic, cloud_damage)) = state.boss.as_ref().map(|b| {
        (
            b.id,
            b.class,
            b.position,
            b.last_minion_at_ms,
            b.last_toxic_at_ms,
            b.toxic_cloud_damage,
        )
    }) else {
        return;
    };

    match class {
        BossClass::Swarm if now.saturating_sub(last_minion) >= BOSS_MINION_INTERVAL_MS => {
            spawn_minion(state, rules, boss_id, &position, rng);
            if let Some(boss) = state.boss.as_mut() {
                boss.last_minion_at_ms = now;
            }
        }
        BossClass::Toxic if now.saturating_sub(last_toxic) >= BOSS_TOXIC_INTERVAL_MS => {
            let cloud_id = state.allocate_effect_id();
            state.clouds.push(ToxicCloud {
                id: cloud_id,
                position,
                damage: cloud_damage,
                created_at_ms: now,
            });
            state.events.push(EncounterEvent::ToxicCloudReleased { cloud_id });
            if let Some(boss) = state.boss.as_mut() {
                boss.last_toxic_at_ms = now;
            }
        }
        _ => {}
    }
}

fn spawn_boss(state: &mut EncounterState, rules: &EncounterRules, plan: &BossPlan<'_>, rng: &mut impl Rng) {
    let now = state.now_ms();
    let difficulty = state.difficulty.multipliers;
    let plan = BossPlan {
        health_multiplier: plan.health_multiplier * difficulty.pest_health,
        speed_multiplier: plan.speed_multiplier * difficulty.pest_speed,
        ..plan.clone()
    };
    let max_health = boss_max_health(&plan, rules.level_number());
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let mut position = Position::default().offset_on_ground(angle, BOSS_SPAWN_DISTANCE);
    position.y = BOSS_SPAWN_HEIGHT;

    state.clear_pests();
    let id = state.allocate_id();
    let def = plan.def;
    state.boss = Some(BossInstance {
        id,
        type_id: def.id.clone(),
        name: def.name.clone(),
        class: def.class,
        phase: BossPhase::Active,
        position,
        health: max_health,
        max_health,
        armor_segments: def.armor_segments,
        total_armor_segments: def.armor_segments,
        speed: def.speed * plan.speed_multiplier,
        damage_per_second: def.damage_per_second * plan.damage_multiplier,
        toxic_cloud_damage: def.toxic_cloud_damage,
        last_minion_at_ms: now,
        last_toxic_at_ms: now,
    });
    state.boss_spawned = true;
    state.events.push(EncounterEvent::BossSpawned {
        boss_id: id,
        class: def.class,
        max_health,
    });
    info!(boss = %def.id, boss_id = id, max_health, armor = def.armor_segments, "boss spawned");
}

fn spawn_minion(
    state: &mut EncounterState,
    rules: &EncounterRules,
    boss_id: u32,
    boss_position: &Position,
    rng: &mut impl Rng,
) {
    let mut pool = rules.catalog.unlocked_pests(rules.level_number());
    if pool.is_empty() {
        pool = rules.catalog.pests.iter().collect();
    }
    if pool.is_empty() {
        return;
    }
    let def = pool[pick(rng, pool.len())];
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let mut position = boss_position.offset_on_ground(angle, BOSS_MINION_DISTANCE);
    position.y = SURFACE_HEIGHT;

    let mut minion = PestSpawn::from_def(
        def,
        position,
        (def.base_health * MINION_HEALTH_FACTOR).floor(),
        def.base_speed * MINION_SPEED_FACTOR,
        def.base_damage_per_second * MINION_DAMAGE_FACTOR,
    );
    minion.behavior = Behavior::Swarm;
    minion.wander_phase = rng.gen::<f64>();
    minion.alarm = Alarm::default();
    if let Some(pest_id) = state.insert_pest(minion, rules.max_active_pests) {
        state.events.push(EncounterEvent::MinionSpawned { pest_id, boss_id });
    }
}

/// Apply a hit to the active boss.
pub fn damage_boss(state: &mut EncounterState, rules: &EncounterRules, raw_damage: f64) -> HitOutcome {
    let now = state.now_ms();
    let Some(boss) = state.boss.as_mut() else {
        return HitOutcome::default();
    };
    if boss.phase != BossPhase::Active {
        return HitOutcome::default();
    }

    let effective = if boss.armor_segments > 0 {
        raw_damage * ARMOR_DAMAGE_FACTOR
    } else {
        raw_damage
    };
    boss.health = (boss.health - effective).max(0.0);

    if boss.armor_segments > 0 && boss.total_armor_segments > 0 {
        let threshold =
            boss.max_health * (boss.armor_segments - 1) as f64 / boss.total_armor_segments as f64;
        if boss.health <= threshold {
            boss.armor_segments -= 1;
            let (boss_id, remaining) = (boss.id, boss.armor_segments);
            debug!(boss_id, remaining, "armor segment broken");
            state.events.push(EncounterEvent::ArmorSegmentBroken { boss_id, remaining });
        }
    }

    let Some(boss) = state.boss.as_mut() else {
        return HitOutcome::default();
    };
    if boss.health > 0.0 {
        return HitOutcome::default();
    }

    let boss_id = boss.id;
    state.boss = None;
    state.stats.score += BOSS_KILL_SCORE;
    state.events.push(EncounterEvent::BossDefeated {
        boss_id,
        score: BOSS_KILL_SCORE,
    });
    if rules.level.is_boss_level() {
        state.completion_due_ms = Some(now.saturating_add(BOSS_COMPLETION_DELAY_MS));
    }
    info!(boss_id, score = state.stats.score, "boss defeated");

    HitOutcome {
        eliminated: true,
        score_delta: BOSS_KILL_SCORE,
        spawned: Vec::new(),
    }
}
