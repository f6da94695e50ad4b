use super::types::Character;
use crate::arena::ArenaProgress;
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::error::{EngineError, Result};
use crate::items::Stash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

/// Everything the persistence collaborator needs to restore a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub character: Character,
    pub stash: Stash,
    pub arena: ArenaProgress,
}

/// Encodes save data with checksum verification
///
/// Layout:
/// - Version magic (8 bytes)
/// - Data length (4 bytes)
/// - Serialized save data (variable length)
/// - SHA256 checksum (32 bytes)
pub fn encode_save(save: &SaveData) -> Result<Vec<u8>> {
    let data = bincode::serialize(save).map_err(|e| EngineError::SaveEncode(e.to_string()))?;
    let data_len = u32::try_from(data.len())
        .map_err(|_| EngineError::SaveEncode(format!("payload too large: {}", data.len())))?;

    let mut bytes = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + data.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&data);

    // Checksum covers version + length + data
    let checksum = Sha256::digest(&bytes);
    bytes.extend_from_slice(&checksum);

    Ok(bytes)
}

/// Decodes save data produced by [`encode_save`].
///
/// Returns `SaveCorrupt` if:
/// - The version magic is incorrect
/// - The buffer is truncated or has trailing bytes
/// - The checksum verification fails
/// - The data cannot be deserialized
pub fn decode_save(bytes: &[u8]) -> Result<SaveData> {
    if bytes.len() < MAGIC_LEN + LENGTH_LEN + CHECKSUM_LEN {
        return Err(EngineError::SaveCorrupt(format!(
            "save is only {} bytes",
            bytes.len()
        )));
    }

    let (magic_bytes, rest) = bytes.split_at(MAGIC_LEN);
    let mut version = [0u8; MAGIC_LEN];
    version.copy_from_slice(magic_bytes);
    let version = u64::from_le_bytes(version);
    if version != SAVE_VERSION_MAGIC {
        return Err(EngineError::SaveCorrupt(format!(
            "invalid save version: expected 0x{:016X}, got 0x{:016X}",
            SAVE_VERSION_MAGIC, version
        )));
    }

    let (length_bytes, rest) = rest.split_at(LENGTH_LEN);
    let mut length = [0u8; LENGTH_LEN];
    length.copy_from_slice(length_bytes);
    let data_len = u32::from_le_bytes(length) as usize;

    if rest.len() != data_len + CHECKSUM_LEN {
        return Err(EngineError::SaveCorrupt(format!(
            "expected {} payload bytes, found {}",
            data_len,
            rest.len().saturating_sub(CHECKSUM_LEN)
        )));
    }

    let (data, stored_checksum) = rest.split_at(data_len);
    let computed = Sha256::digest(&bytes[..MAGIC_LEN + LENGTH_LEN + data_len]);
    if stored_checksum != computed.as_slice() {
        return Err(EngineError::SaveCorrupt(
            "checksum verification failed".to_string(),
        ));
    }

    bincode::deserialize(data).map_err(|e| EngineError::SaveCorrupt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{GearSlot, GearTier, Inventory, Item};

    fn sample() -> SaveData {
        let mut character = Character::new();
        character.level = 12;
        character.currency = 9_001;
        character.equip(Item::of_tier(GearTier::new(3), GearSlot::Weapon));
        let mut stash = Stash::new();
        stash.add_item(Item::of_tier(GearTier::new(2), GearSlot::Armor));
        SaveData {
            character,
            stash,
            arena: ArenaProgress {
                world: 2,
                stage: 4,
                max_stage: 7,
            },
        }
    }

    #[test]
    fn test_save_and_load() {
        let save = sample();
        let bytes = encode_save(&save).unwrap();
        assert_eq!(decode_save(&bytes).unwrap(), save);
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let mut bytes = encode_save(&sample()).unwrap();
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0xFF;
        assert!(matches!(
            decode_save(&bytes),
            Err(EngineError::SaveCorrupt(_))
        ));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut bytes = encode_save(&sample()).unwrap();
        bytes[0] ^= 0x01;
        let err = decode_save(&bytes).unwrap_err();
        assert!(err.to_string().contains("invalid save version"));
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = encode_save(&sample()).unwrap();
        assert!(decode_save(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode_save(&bytes[..10]).is_err());
        assert!(decode_save(&[]).is_err());
    }
}
