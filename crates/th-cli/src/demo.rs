//! The world played when no `--world` is given.

use th_core::{Blueprint, CharacterId, World, WorldResult};

const LIGHTHOUSE: &str = include_str!("../worlds/lighthouse.json");

/// Build the built-in demo world.
pub fn world() -> WorldResult<(World, CharacterId)> {
    Blueprint::from_json(LIGHTHOUSE)?.build()
}
