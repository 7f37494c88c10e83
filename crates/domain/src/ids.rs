use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog entities (cosmetics, quests, battle passes) carry numeric
/// identifiers assigned by the catalog store.
macro_rules! define_numeric_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_numeric_id!(CosmeticId);
define_numeric_id!(QuestId);
define_numeric_id!(BattlePassId);

/// Opaque stable player identity, issued by the (external) identity
/// provider. Never parsed or interpreted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_round_trip() {
        let id = CosmeticId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(CosmeticId::from(42), id);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn player_id_is_opaque() {
        let id = PlayerId::new("7656119");
        assert_eq!(id.as_str(), "7656119");
        assert_eq!(PlayerId::from("7656119"), id);
    }
}
