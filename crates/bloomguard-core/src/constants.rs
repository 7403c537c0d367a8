//! Encounter constants and balancing parameters.

// --- Arena ---

/// Default hard cap on simultaneously active pests.
pub const DEFAULT_MAX_ACTIVE_PESTS: usize = 20;

/// Pests spawn on a ring around the plant at this minimum distance.
pub const SPAWN_RING_MIN: f64 = 8.0;

/// Extra random distance added on top of `SPAWN_RING_MIN`.
pub const SPAWN_RING_JITTER: f64 = 4.0;

/// Ground-plane distance at which pests stop approaching the plant.
pub const PEST_HOLD_RANGE: f64 = 1.5;

/// Ground-plane distance at which the boss stops approaching the plant.
pub const BOSS_HOLD_RANGE: f64 = 2.5;

/// Height at which surfaced pests travel.
pub const SURFACE_HEIGHT: f64 = 1.0;

/// Height of burrowed pests.
pub const UNDERGROUND_HEIGHT: f64 = -1.0;

// --- Movement ---

/// Lateral weave speed of zigzag pests, as a fraction of forward speed.
pub const ZIGZAG_WEAVE_FACTOR: f64 = 0.6;

/// Weave frequency (radians per second).
pub const ZIGZAG_FREQUENCY: f64 = 3.0;

/// Peak hop height of jumper pests above the surface.
pub const JUMP_HEIGHT: f64 = 1.0;

/// Hop frequency (radians per second).
pub const JUMP_FREQUENCY: f64 = 4.0;

// --- Spawn scheduling ---

/// Base spawn interval before level scaling (ms).
pub const SPAWN_INTERVAL_BASE_MS: u64 = 3000;

/// Spawn interval reduction per level (ms).
pub const SPAWN_INTERVAL_PER_LEVEL_MS: u64 = 100;

/// Spawn interval floor (ms).
pub const SPAWN_INTERVAL_MIN_MS: u64 = 2000;

/// Health scaling per level above 1.
pub const LEVEL_HEALTH_STEP: f64 = 0.15;

/// Speed scaling per level above 1.
pub const LEVEL_SPEED_STEP: f64 = 0.08;

/// Damage scaling per level above 1.
pub const LEVEL_DAMAGE_STEP: f64 = 0.10;

/// Pests per batch when the level has no explicit list: base count.
pub const CATALOG_BATCH_BASE: usize = 2;

/// Pests per batch when the level has no explicit list: cap.
pub const CATALOG_BATCH_MAX: usize = 15;

/// Probability that a spawn boost adds duplicates to a batch.
pub const SPAWN_BOOST_CHANCE: f64 = 0.5;

/// Minimum burrow time before emergence (ms).
pub const BURROW_MIN_MS: u64 = 3000;

/// Random extra burrow time (ms).
pub const BURROW_JITTER_MS: f64 = 5000.0;

/// Opacity hint reported for camouflaged pests.
pub const CAMOUFLAGE_OPACITY: f64 = 0.3;

/// Distance within which a camouflaged pest becomes obvious to the player.
pub const CAMOUFLAGE_DETECTION_RADIUS: f64 = 1.5;

// --- Combat ---

/// Radius around a hit in which neighbours become alarmed.
pub const ALARM_RADIUS: f64 = 4.0;

/// Maximum alarm level.
pub const MAX_ALARM_LEVEL: u8 = 5;

/// Speed boost per alarm level for alerted neighbours.
pub const ALARM_SPEED_STEP: f64 = 0.1;

/// Base score for eliminating a pest.
pub const PEST_KILL_SCORE: u32 = 10;

/// Spreading pests release spores at most this often (ms).
pub const SPREAD_COOLDOWN_MS: u64 = 8000;

/// Spores released per spreading event.
pub const SPORES_PER_SPREAD: usize = 2;

/// Spore stats relative to the parent.
pub const SPORE_HEALTH_FACTOR: f64 = 0.4;
pub const SPORE_SPEED_FACTOR: f64 = 0.8;
pub const SPORE_DAMAGE_FACTOR: f64 = 0.6;

/// Probability that a hit calls in a reinforcement.
pub const REINFORCEMENT_CHANCE: f64 = 0.3;

/// Reinforcement stats relative to the hit pest.
pub const REINFORCEMENT_HEALTH_FACTOR: f64 = 0.7;
pub const REINFORCEMENT_SPEED_FACTOR: f64 = 1.2;

/// Alarm level reinforcements arrive with.
pub const REINFORCEMENT_ALARM_LEVEL: u8 = 2;

/// Speed reduction per slow-effect upgrade level.
pub const SLOW_STEP: f64 = 0.08;

/// Slowest a slow effect can make a pest (fraction of its speed).
pub const SLOW_MIN_FACTOR: f64 = 0.2;

/// How long a slow effect lasts (ms).
pub const SLOW_DURATION_MS: u64 = 3000;

// --- Boss ---

/// Boss health scaling per level past its appearance level.
pub const BOSS_LEVEL_HEALTH_STEP: f64 = 0.2;

/// Fraction of raw damage that reaches an armored boss.
pub const ARMOR_DAMAGE_FACTOR: f64 = 0.3;

/// Score for defeating a boss.
pub const BOSS_KILL_SCORE: u32 = 500;

/// Every Nth level is a boss level.
pub const BOSS_LEVEL_INTERVAL: u32 = 3;

/// Delay between boss defeat and level completion on boss levels (ms).
pub const BOSS_COMPLETION_DELAY_MS: u64 = 1000;

/// Distance from the plant at which a boss appears.
pub const BOSS_SPAWN_DISTANCE: f64 = 10.0;

/// Height at which a boss appears.
pub const BOSS_SPAWN_HEIGHT: f64 = 2.0;

/// Swarm-class minion interval (ms).
pub const BOSS_MINION_INTERVAL_MS: u64 = 4000;

/// Distance from the boss at which minions appear.
pub const BOSS_MINION_DISTANCE: f64 = 2.0;

/// Minion stats relative to the catalog pest.
pub const MINION_HEALTH_FACTOR: f64 = 0.5;
pub const MINION_SPEED_FACTOR: f64 = 1.2;
pub const MINION_DAMAGE_FACTOR: f64 = 0.7;

/// Toxic-class cloud interval (ms).
pub const BOSS_TOXIC_INTERVAL_MS: u64 = 6000;

/// Toxic cloud lifetime (ms).
pub const TOXIC_CLOUD_LIFETIME_MS: u64 = 10_000;

// --- Plant ---

/// Full plant health.
pub const PLANT_MAX_HEALTH: f64 = 100.0;

/// Pests within this ground distance of the plant damage it.
pub const PEST_ATTACK_RANGE: f64 = 2.0;

/// The boss within this ground distance of the plant damages it.
pub const BOSS_ATTACK_RANGE: f64 = 3.0;

/// Fraction of a toxic cloud's damage applied to the plant per pulse.
pub const TOXIC_CLOUD_PLANT_FACTOR: f64 = 0.3;

/// Pulse length for cloud and spray damage-over-time (ms).
pub const DAMAGE_PULSE_MS: f64 = 500.0;

/// Resistance bonus cap (percent).
pub const RESISTANCE_BONUS_CAP: f64 = 75.0;

// --- Spray ---

/// Base spray effect lifetime (ms).
pub const SPRAY_BASE_LIFETIME_MS: u64 = 3000;

/// Extra spray lifetime per duration upgrade level (ms).
pub const SPRAY_LIFETIME_PER_LEVEL_MS: u64 = 500;

/// Radius in which spray effects damage pests.
pub const SPRAY_EFFECT_RADIUS: f64 = 1.5;

/// Area damage per pulse per area-damage upgrade level.
pub const SPRAY_AREA_DAMAGE_STEP: f64 = 2.0;

/// Spray ammo capacity.
pub const SPRAY_AMMO_MAX: f64 = 100.0;

/// Ammo consumed per spray.
pub const SPRAY_AMMO_COST: f64 = 5.0;

// --- Environment ---

/// Resource decay interval (ms).
pub const RESOURCE_DECAY_INTERVAL_MS: u64 = 3000;

/// Most decay steps a single tick will run; older backlog is dropped.
pub const MAX_DECAY_STEPS_PER_TICK: u64 = 200;

/// Hours of day advanced per elapsed second at cycle speed 1.
pub const HOURS_PER_SECOND: f64 = 0.1;

/// Cap on water / nutrient efficiency upgrades (percent).
pub const EFFICIENCY_BONUS_CAP: f64 = 75.0;

/// Growth level cap.
pub const MAX_GROWTH_LEVEL: f64 = 10.0;

/// Growth level gained per successful growth roll.
pub const GROWTH_STEP: f64 = 0.1;

/// Health lost per decay interval while starved of water or nutrition.
pub const STARVATION_HEALTH_DRAIN: f64 = 0.2;

/// Water / nutrition level below which the plant starves.
pub const STARVATION_THRESHOLD: f64 = 20.0;

// --- Power-ups ---

/// Power-up spawn interval at level 0 (ms).
pub const POWER_UP_INTERVAL_BASE_MS: u64 = 15_000;

/// Power-up interval reduction per level (ms).
pub const POWER_UP_INTERVAL_PER_LEVEL_MS: u64 = 500;

/// Power-up interval floor (ms).
pub const POWER_UP_INTERVAL_MIN_MS: u64 = 8000;

/// Level from which nukes join the power-up pool.
pub const NUKE_UNLOCK_LEVEL: u32 = 5;

/// Most uncollected power-ups on the field at once.
pub const MAX_FIELD_POWER_UPS: usize = 3;

/// Power-ups appear on a ring around the plant at this minimum distance.
pub const POWER_UP_RING_MIN: f64 = 3.0;

/// Extra random distance added on top of `POWER_UP_RING_MIN`.
pub const POWER_UP_RING_JITTER: f64 = 2.0;

/// Height at which power-ups float.
pub const POWER_UP_HEIGHT: f64 = 0.5;

/// Score for detonating a nuke.
pub const NUKE_SCORE: u32 = 200;

/// Plant health restored by a health power-up.
pub const HEALTH_POWER_UP_AMOUNT: f64 = 50.0;

/// Pest speed factor while frozen.
pub const FREEZE_SPEED_FACTOR: f64 = 0.1;

/// Freeze duration (ms).
pub const FREEZE_DURATION_MS: u64 = 5000;

/// Pest speed factor under slow-time.
pub const SLOW_TIME_SPEED_FACTOR: f64 = 0.3;

/// Slow-time duration (ms).
pub const SLOW_TIME_DURATION_MS: u64 = 12_000;

// --- Adaptive difficulty ---

/// How often player performance is sampled (ms).
pub const DIFFICULTY_SAMPLE_INTERVAL_MS: u64 = 15_000;

/// Performance samples averaged for each adjustment.
pub const DIFFICULTY_HISTORY_LEN: usize = 5;

/// Average performance above which the encounter gets harder.
pub const DIFFICULTY_RAISE_THRESHOLD: f64 = 70.0;

/// Average performance below which the encounter gets easier.
pub const DIFFICULTY_EASE_THRESHOLD: f64 = 30.0;

/// Fraction of the distance back to 1.0 closed per neutral sample.
pub const DIFFICULTY_RELAX_RATE: f64 = 0.05;

// --- Session ---

/// Days per season.
pub const SEASON_LENGTH_DAYS: u32 = 30;

/// Final health at or above which the perfect bonus is paid.
pub const PERFECT_HEALTH_THRESHOLD: f64 = 80.0;
