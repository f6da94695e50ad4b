/// Names for each ascension rank. Ranks past the end keep the last name.
const RANK_NAMES: [&str; 11] = [
    "BASE", "S", "SS", "SS2", "SS3", "SSG", "SSB", "UI", "MUI", "SSS", "SSS10",
];

/// Gets the display name for an ascension rank
pub fn rank_name(rank: u32) -> &'static str {
    let index = (rank as usize).min(RANK_NAMES.len() - 1);
    RANK_NAMES[index]
}
