//! Cycle tag colors.
//!
//! Each closed cycle gets a display tag drawn from a small palette. A new tag
//! avoids every tag already in use while the palette has unused entries, and
//! falls back to the whole palette once all six are taken.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleTag {
    Sky,
    Emerald,
    Amber,
    Rose,
    Violet,
    Teal,
}

impl CycleTag {
    pub const PALETTE: [CycleTag; 6] = [
        CycleTag::Sky,
        CycleTag::Emerald,
        CycleTag::Amber,
        CycleTag::Rose,
        CycleTag::Violet,
        CycleTag::Teal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CycleTag::Sky => "sky",
            CycleTag::Emerald => "emerald",
            CycleTag::Amber => "amber",
            CycleTag::Rose => "rose",
            CycleTag::Violet => "violet",
            CycleTag::Teal => "teal",
        }
    }
}

impl fmt::Display for CycleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick a tag not in `used`, uniformly at random; any palette tag once all are used.
pub fn pick_tag<R: Rng + ?Sized>(used: &[CycleTag], rng: &mut R) -> CycleTag {
    let available: Vec<CycleTag> = CycleTag::PALETTE
        .iter()
        .copied()
        .filter(|tag| !used.contains(tag))
        .collect();
    let palette: &[CycleTag] = if available.is_empty() {
        &CycleTag::PALETTE
    } else {
        &available
    };
    palette[rng.random_range(0..palette.len())]
}

/// Tag source owned by a session. Seed it for reproducible output.
#[derive(Clone)]
pub struct TagPicker {
    rng: StdRng,
}

impl TagPicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self, used: &[CycleTag]) -> CycleTag {
        pick_tag(used, &mut self.rng)
    }
}

impl Default for TagPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for TagPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagPicker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_unused_tag_is_always_chosen() {
        let used = &CycleTag::PALETTE[..5];
        for seed in 0..50 {
            let mut picker = TagPicker::seeded(seed);
            assert_eq!(picker.pick(used), CycleTag::Teal);
        }
    }

    #[test]
    fn test_never_repeats_while_palette_has_room() {
        let mut picker = TagPicker::seeded(7);
        let mut used = Vec::new();
        for _ in 0..CycleTag::PALETTE.len() {
            let tag = picker.pick(&used);
            assert!(!used.contains(&tag));
            used.push(tag);
        }
    }

    #[test]
    fn test_exhausted_palette_allows_repeats() {
        let mut picker = TagPicker::seeded(3);
        let tag = picker.pick(&CycleTag::PALETTE);
        assert!(CycleTag::PALETTE.contains(&tag));
    }

    #[test]
    fn test_seeded_pickers_agree() {
        let mut a = TagPicker::seeded(42);
        let mut b = TagPicker::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.pick(&[]), b.pick(&[]));
        }
    }
}
