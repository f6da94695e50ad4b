//! Integration test: character progression across modes
//!
//! Training, supply capsules, gear and arena rewards all feed the same
//! character, and the whole state survives a save round trip.

use ascend::arena::{ArenaEvent, ArenaProgress};
use ascend::character::{
    add_experience, decode_save, encode_save, rank_name, Character, TrainStat,
};
use ascend::core::config::EngineConfig;
use ascend::core::error::EngineError;
use ascend::core::rolls::FixedRolls;
use ascend::identity::Roster;
use ascend::items::{GearSlot, GearTier, Inventory, Item};
use ascend::session::GameSession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn session() -> GameSession {
    GameSession::new(EngineConfig::default(), Roster::default())
}

#[test]
fn test_training_spends_currency_until_broke() {
    let mut s = session();
    for _ in 0..5 {
        s.train(TrainStat::Attack).unwrap();
    }
    assert_eq!(s.character.currency, 0);
    assert_eq!(s.character.base_attack, 140);

    let err = s.train(TrainStat::Defense).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientFunds {
            needed: 100,
            available: 0
        }
    ));
    assert_eq!(s.character.base_defense, 25);

    s.tap_train();
    assert_eq!(s.character.currency, 1);
    assert_eq!(s.character.experience, 1);
}

#[test]
fn test_supply_capsule_cooldown() {
    let mut s = session();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let now = 1_700_000_000_000;

    let drop = s.claim_supply(now, &mut rng).unwrap();
    assert!((40..60).contains(&drop.experience));
    assert_eq!(drop.currency, 25);
    assert_eq!(s.character.currency, 525);
    assert_eq!(s.stash.total_items(), drop.item.iter().count() as u32);

    let err = s.claim_supply(now + 30_000, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        EngineError::SupplyCooldown {
            remaining_ms: 30_000
        }
    ));
    assert!(s.claim_supply(now + 60_000, &mut rng).is_ok());
}

#[test]
fn test_equipped_weapon_raises_arena_damage() {
    let mut s = session();
    s.stash.add_item(Item::of_tier(GearTier::new(1), GearSlot::Weapon));
    s.equip(0).unwrap();
    assert!(s.stash.is_empty());
    let attack = s.character.effective_attack();
    assert!(attack > 40);

    let mut rolls = FixedRolls::neutral();
    s.enter_arena();
    let mut first_strike = None;
    for _ in 0..40 {
        let events = s.tick_arena(0.1, &mut rolls).unwrap();
        first_strike = events.iter().find_map(|e| match e {
            ArenaEvent::PlayerStrike { damage, .. } => Some(*damage),
            _ => None,
        });
        if first_strike.is_some() {
            break;
        }
    }
    assert_eq!(first_strike, Some(attack as f64));

    s.unequip(GearSlot::Weapon).unwrap();
    assert_eq!(s.character.effective_attack(), 40);
    assert!(matches!(
        s.unequip(GearSlot::Weapon),
        Err(EngineError::EmptySlot(GearSlot::Weapon))
    ));
}

#[test]
fn test_ascension_wraps_level_and_names_rank() {
    let mut character = Character::new();
    character.level = 99;
    character.experience_to_next = 1_000;

    let report = add_experience(&mut character, 1_000);
    assert!(report.ascended());
    assert_eq!((character.level, character.rank), (1, 1));
    assert_eq!(rank_name(character.rank), "S");
    assert_eq!(character.current_hp, character.effective_max_hp() as f64);
}

#[test]
fn test_campaign_state_survives_save_round_trip() {
    let mut s = session();
    let mut rolls = FixedRolls {
        drops: 2,
        ..FixedRolls::neutral()
    };
    s.enter_arena();
    for _ in 0..200 {
        let events = s.tick_arena(0.1, &mut rolls).unwrap();
        if events
            .iter()
            .any(|e| matches!(e, ArenaEvent::Victory { .. }))
        {
            break;
        }
    }
    assert_eq!(s.stash.total_items(), 2);
    s.advance_stage().unwrap();

    let bytes = encode_save(&s.snapshot()).unwrap();
    let mut restored = session();
    restored.restore(decode_save(&bytes).unwrap());

    assert_eq!(restored.character, s.character);
    assert_eq!(restored.stash.total_items(), 2);
    assert_eq!(
        restored.arena_progress(),
        ArenaProgress {
            world: 1,
            stage: 2,
            max_stage: 2
        }
    );

    let mut corrupt = bytes.clone();
    let last = corrupt.len() - 1;
    corrupt[last] ^= 0xFF;
    assert!(matches!(
        decode_save(&corrupt),
        Err(EngineError::SaveCorrupt(_))
    ));
}
