// Starting character
pub const START_LEVEL: u32 = 1;
pub const START_XP_TO_NEXT: u64 = 100;
pub const START_CURRENCY: u64 = 500;
pub const START_BASE_ATTACK: u64 = 40;
pub const START_BASE_DEFENSE: u64 = 25;
pub const START_BASE_MAX_HP: u64 = 500;

// Rank (ascension) bonuses
pub const RANK_ATTACK_BONUS: u64 = 400;
pub const RANK_DEFENSE_BONUS: u64 = 150;
pub const RANK_HP_BONUS: u64 = 2500;
pub const POWER_ATTACK_WEIGHT: u64 = 30;

// XP and leveling
// Threshold grows by 1.3x per level, floored: next * 13 / 10
pub const XP_CURVE_NUMERATOR: u64 = 13;
pub const XP_CURVE_DENOMINATOR: u64 = 10;
pub const LEVEL_UP_HP: u64 = 250;
pub const LEVEL_UP_ATTACK: u64 = 5;
pub const LEVEL_UP_DEFENSE: u64 = 2;
/// Reaching this level wraps back to level 1 and grants one rank.
pub const ASCENSION_LEVEL: u32 = 100;

// Charge gauge
pub const MAX_CHARGE: f64 = 100.0;

// Training and supply capsule
pub const TRAIN_COST: u64 = 100;
pub const TRAIN_ATTACK_GAIN: u64 = 20;
pub const TRAIN_DEFENSE_GAIN: u64 = 10;
pub const SUPPLY_COOLDOWN_MS: i64 = 60_000;
pub const SUPPLY_XP_PER_LEVEL: u64 = 50;
pub const SUPPLY_XP_VARIANCE_MIN: f64 = 0.8;
pub const SUPPLY_XP_VARIANCE_MAX: f64 = 1.2;
pub const SUPPLY_CURRENCY_FACTOR: f64 = 0.5;
pub const SUPPLY_GEAR_CHANCE: f64 = 0.3;

// Arena structure
pub const STAGES_PER_WORLD: u32 = 20;
pub const GUARDIAN_STAGE_GROWTH: f64 = 1.8;
pub const GUARDIAN_WORLD_GROWTH: f64 = 25.0;
pub const GUARDIAN_BASE_HP: f64 = 250.0;
pub const GUARDIAN_BASE_ATTACK: f64 = 30.0;

// Arena timing (seconds)
pub const PLAYER_ACTION_PERIOD_SECONDS: f64 = 0.5;
pub const ENEMY_ACTION_PERIOD_SECONDS: f64 = 0.8;
pub const READY_DELAY_SECONDS: f64 = 1.6;
pub const SPECIAL_WINDUP_SECONDS: f64 = 0.65;
pub const SPECIAL_RECOVERY_SECONDS: f64 = 0.7;
pub const VICTORY_COUNTDOWN_SECONDS: u32 = 3;
pub const DEFEAT_COUNTDOWN_SECONDS: u32 = 5;
pub const COUNTDOWN_STEP_SECONDS: f64 = 1.0;
pub const MAX_ARENA_STEP_SECONDS: f64 = 3600.0;

// Arena strikes
pub const CHARGE_PER_PLAYER_TICK: f64 = 12.0;
pub const STRIKE_FACTOR_MIN: f64 = 0.7;
pub const STRIKE_FACTOR_MAX: f64 = 1.3;
pub const AMBUSH_CHANCE: f64 = 0.3;
pub const AMBUSH_MULTIPLIER: f64 = 1.2;
pub const SPECIAL_ATTACK_MULTIPLIER: u64 = 6;

// Rewards
pub const VICTORY_XP_BASE: u64 = 100;
pub const VICTORY_CURRENCY: u64 = 250;
pub const VICTORY_MAX_DROPS: u32 = 3;
pub const MAX_GEAR_TIER: u8 = 6;
pub const KILL_CURRENCY: u64 = 100;
pub const KILL_XP: u64 = 50;
pub const ELITE_REWARD_MULTIPLIER: u64 = 5;

// Inventory
pub const MAX_STACK_SIZE: u32 = 99;

// Survival spawning
pub const SPAWN_INTERVAL_FRAMES: u32 = 72;
pub const MAX_LIVE_ENEMIES: usize = 10;
pub const ELITE_CHANCE: f64 = 0.15;
pub const SPAWN_RADIUS: f32 = 900.0;

// Survival enemies: (radius, speed, hp factor of scale power, contact damage fraction of max HP)
pub const ENEMY_PROFILE: (f32, f32, f64, f64) = (30.0, 5.0, 1.5, 0.02);
pub const ELITE_PROFILE: (f32, f32, f64, f64) = (50.0, 3.0, 8.0, 0.08);
pub const ENEMY_SCALE_POWER_FACTOR: f64 = 0.5;

// Survival player
pub const PLAYER_SPEED: f32 = 8.0;
pub const PLAYER_RADIUS: f32 = 20.0;
pub const INVINCIBILITY_FRAMES: u32 = 30;
pub const AREA_CHARGE_PER_FRAME: f64 = 1.2;
pub const CHARGE_JITTER: f32 = 6.0;
pub const CHARGING_DAMAGE_MULTIPLIER: f64 = 2.0;
pub const CHARGING_HIT_CAP_FRACTION: f64 = 0.2;
pub const DODGE_DISTANCE: f32 = 280.0;
pub const INPUT_DEADZONE: f32 = 0.1;

// Survival projectiles
pub const PROJECTILE_SPEED: f32 = 22.0;
pub const PROJECTILE_LIFE_FRAMES: u32 = 60;
pub const PROJECTILE_RADIUS: f32 = 10.0;

// Survival loot
pub const MAGNET_RADIUS: f32 = 220.0;
pub const PICKUP_RADIUS: f32 = 30.0;
pub const LOOT_DRAG: f32 = 0.9;
pub const MAGNET_ACCELERATION: f32 = 1.6;
pub const LOOT_SCATTER_SPEED: f32 = 6.0;

// Survival particles (cosmetic)
pub const HIT_PARTICLE_LIFE: u32 = 10;
pub const DODGE_PARTICLE_COUNT: usize = 6;
pub const DODGE_PARTICLE_LIFE: u32 = 15;
pub const BURST_PARTICLE_COUNT: usize = 10;
pub const BURST_PARTICLE_LIFE: u32 = 30;

// Save format
pub const SAVE_VERSION_MAGIC: u64 = 0x4153_4345_4E44_0001;
