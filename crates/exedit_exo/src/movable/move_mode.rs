// SPDX-License-Identifier: MIT OR Apache-2.0
//! Move mode catalog.
//!
//! Every animatable field names one of these modes in its mode token. Most
//! modes are identified by their numeric id alone; script-driven modes share
//! id 15 and are told apart by an `@<name>` suffix.

use serde::{Deserialize, Serialize};

/// Catalog entry for a move mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveModeInfo {
    /// Base numeric id
    pub id: u32,
    /// Disambiguating suffix (empty for most modes)
    pub suffix: &'static str,
    /// Whether the accelerate/decelerate flags apply
    pub can_accelerate: bool,
    /// Whether the mode takes a frame interval field
    pub has_interval: bool,
    /// Display name
    pub name: &'static str,
}

/// How a value moves from its begin to its end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveMode {
    /// Static value
    #[default]
    None,
    /// Straight line
    Linear,
    /// Curve through midpoints
    Curve,
    /// Jump at the end
    Teleport,
    /// Straight line ignoring midpoints
    LinearIgnoreMidpoint,
    /// Move by an amount
    Shift,
    /// Random value every interval
    Random,
    /// Accelerate then decelerate
    AccelDecel,
    /// Back and forth every interval
    Repeat,
    /// Interpolation script
    Interpolation,
    /// Rotation script
    Rotation,
}

/// Flag added to the id when accelerating
pub const ACCELERATE_FLAG: u32 = 64;
/// Flag added to the id when decelerating
pub const DECELERATE_FLAG: u32 = 32;

impl MoveMode {
    /// All modes in catalog order
    pub const ALL: [MoveMode; 11] = [
        MoveMode::None,
        MoveMode::Linear,
        MoveMode::Curve,
        MoveMode::Teleport,
        MoveMode::LinearIgnoreMidpoint,
        MoveMode::Shift,
        MoveMode::Random,
        MoveMode::AccelDecel,
        MoveMode::Repeat,
        MoveMode::Interpolation,
        MoveMode::Rotation,
    ];

    /// Catalog entry for this mode
    pub const fn info(self) -> MoveModeInfo {
        const fn entry(
            id: u32,
            suffix: &'static str,
            can_accelerate: bool,
            has_interval: bool,
            name: &'static str,
        ) -> MoveModeInfo {
            MoveModeInfo {
                id,
                suffix,
                can_accelerate,
                has_interval,
                name,
            }
        }

        match self {
            Self::None => entry(0, "", false, false, "移動無し"),
            Self::Linear => entry(1, "", true, false, "直線移動"),
            Self::Curve => entry(2, "", true, false, "曲線移動"),
            Self::Teleport => entry(3, "", false, false, "瞬間移動"),
            Self::LinearIgnoreMidpoint => entry(4, "", true, false, "中間点無視"),
            Self::Shift => entry(5, "", true, false, "移動量指定"),
            Self::Random => entry(6, "", false, true, "ランダム移動"),
            Self::AccelDecel => entry(7, "", false, false, "加減速移動"),
            Self::Repeat => entry(8, "", false, true, "反復移動"),
            Self::Interpolation => entry(15, "@補間移動", true, false, "補間移動"),
            Self::Rotation => entry(15, "@回転", false, true, "回転"),
        }
    }

    /// Base numeric id
    pub const fn id(self) -> u32 {
        self.info().id
    }

    /// Disambiguating suffix
    pub const fn suffix(self) -> &'static str {
        self.info().suffix
    }

    /// Whether the accelerate/decelerate flags apply
    pub const fn can_accelerate(self) -> bool {
        self.info().can_accelerate
    }

    /// Whether the mode takes a frame interval field
    pub const fn has_interval(self) -> bool {
        self.info().has_interval
    }

    /// Display name
    pub const fn display_name(self) -> &'static str {
        self.info().name
    }

    /// Look up the mode with this base id and suffix
    pub fn find(id: u32, suffix: &str) -> Option<MoveMode> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.id() == id && mode.suffix() == suffix)
    }

    /// Mode token for this mode with the given flags.
    ///
    /// Flags are ignored for modes that cannot accelerate.
    pub fn token(self, accelerating: bool, decelerating: bool) -> String {
        let mut id = self.id();
        if self.can_accelerate() {
            if accelerating {
                id += ACCELERATE_FLAG;
            }
            if decelerating {
                id += DECELERATE_FLAG;
            }
        }
        format!("{id}{}", self.suffix())
    }

    /// Split a mode token into `(mode, accelerating, decelerating)`.
    ///
    /// Returns `None` for unknown ids, unmatched suffixes and the static mode,
    /// which never appears as a token.
    pub fn parse_token(token: &str) -> Option<(MoveMode, bool, bool)> {
        let digits = token.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let (id_text, suffix) = token.split_at(digits);
        let mut id: u32 = id_text.parse().ok()?;

        let accelerating = id >= ACCELERATE_FLAG;
        if accelerating {
            id -= ACCELERATE_FLAG;
        }
        let decelerating = id >= DECELERATE_FLAG;
        if decelerating {
            id -= DECELERATE_FLAG;
        }

        let mode = Self::find(id, suffix)?;
        if mode == MoveMode::None {
            return None;
        }

        let capable = mode.can_accelerate();
        Some((mode, accelerating && capable, decelerating && capable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_unique() {
        for (i, a) in MoveMode::ALL.iter().enumerate() {
            for b in &MoveMode::ALL[i + 1..] {
                assert!(
                    (a.id(), a.suffix()) != (b.id(), b.suffix()),
                    "{a:?} and {b:?} share a key"
                );
            }
        }
    }

    #[test]
    fn test_shared_id_needs_suffix() {
        assert_eq!(MoveMode::Interpolation.id(), MoveMode::Rotation.id());
        assert_eq!(MoveMode::find(15, ""), None);
        assert_eq!(MoveMode::find(15, "@補間移動"), Some(MoveMode::Interpolation));
        assert_eq!(MoveMode::find(15, "@回転"), Some(MoveMode::Rotation));
        assert_eq!(MoveMode::Rotation.suffix(), format!("@{}", MoveMode::Rotation.display_name()));
    }

    #[test]
    fn test_token() {
        assert_eq!(MoveMode::Linear.token(true, false), "65");
        assert_eq!(MoveMode::Linear.token(true, true), "97");
        assert_eq!(MoveMode::Curve.token(false, true), "34");
        assert_eq!(MoveMode::Random.token(true, true), "6");
        assert_eq!(MoveMode::Interpolation.token(true, false), "79@補間移動");
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(MoveMode::parse_token("1"), Some((MoveMode::Linear, false, false)));
        assert_eq!(MoveMode::parse_token("97"), Some((MoveMode::Linear, true, true)));
        assert_eq!(
            MoveMode::parse_token("79@補間移動"),
            Some((MoveMode::Interpolation, true, false))
        );
        // Flags dropped for modes that cannot accelerate
        assert_eq!(MoveMode::parse_token("70"), Some((MoveMode::Random, false, false)));

        assert_eq!(MoveMode::parse_token("0"), None);
        assert_eq!(MoveMode::parse_token("15"), None);
        assert_eq!(MoveMode::parse_token("15@unknown"), None);
        assert_eq!(MoveMode::parse_token("9"), None);
        assert_eq!(MoveMode::parse_token("@回転"), None);
        assert_eq!(MoveMode::parse_token(""), None);
    }
}
