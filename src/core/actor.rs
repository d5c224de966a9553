//! Actor and cast observation types.
//!
//! The engine never acquires world data itself. The host refreshes a
//! [`World`] snapshot once per tick and the driver reads it through a
//! shared borrow.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of an observed actor.
///
/// Displayed in upper-case hex, which is how actor ids appear in game logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl fmt::UpperHex for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Opaque action identifier. Only equality matters to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActionId {
    fn from(raw: u32) -> Self {
        ActionId(raw)
    }
}

/// The cast an actor is currently performing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastInfo {
    /// Action being cast
    pub action: ActionId,
    /// Host time (seconds) at which the cast began
    pub started_at: f32,
}

impl CastInfo {
    pub fn new(action: u32, started_at: f32) -> Self {
        Self {
            action: ActionId(action),
            started_at,
        }
    }
}

/// Read-only view of the world, refreshed by the host before every tick.
///
/// # Example
///
/// ```rust
/// use phasechain::core::{ActorId, CastInfo, World};
/// use std::collections::HashMap;
///
/// let boss = ActorId(0x4A3);
/// let mut world: HashMap<ActorId, CastInfo> = HashMap::new();
/// assert!(!world.is_casting(boss));
///
/// world.insert(boss, CastInfo::new(5, 2.0));
/// assert_eq!(world.cast_info(boss).map(|c| c.action.0), Some(5));
/// ```
pub trait World {
    /// The actor's current cast, if any.
    fn cast_info(&self, actor: ActorId) -> Option<&CastInfo>;

    fn is_casting(&self, actor: ActorId) -> bool {
        self.cast_info(actor).is_some()
    }
}

impl World for HashMap<ActorId, CastInfo> {
    fn cast_info(&self, actor: ActorId) -> Option<&CastInfo> {
        self.get(&actor)
    }
}

impl<W: World + ?Sized> World for &W {
    fn cast_info(&self, actor: ActorId) -> Option<&CastInfo> {
        (**self).cast_info(actor)
    }
}

/// Typed action identifiers used by encounter scripts.
///
/// Scripts usually declare one enum per encounter with
/// [`action_enum!`](crate::action_enum). The label is what diagnostics
/// print for the expected side of a comparison.
pub trait ActionKind {
    fn action_id(&self) -> ActionId;

    fn label(&self) -> String {
        self.action_id().to_string()
    }
}

impl ActionKind for ActionId {
    fn action_id(&self) -> ActionId {
        *self
    }
}

impl ActionKind for u32 {
    fn action_id(&self) -> ActionId {
        ActionId(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_displays_as_upper_hex() {
        assert_eq!(ActorId(0x4a3f).to_string(), "4A3F");
        assert_eq!(format!("{:X}", ActorId(255)), "FF");
    }

    #[test]
    fn map_world_reports_casts() {
        let mut world: HashMap<ActorId, CastInfo> = HashMap::new();
        let actor = ActorId(1);
        assert!(world.cast_info(actor).is_none());

        world.insert(actor, CastInfo::new(7, 0.5));
        assert!(world.is_casting(actor));
        assert!(!world.is_casting(ActorId(2)));
    }

    #[test]
    fn raw_ids_are_action_kinds() {
        assert_eq!(9u32.action_id(), ActionId(9));
        assert_eq!(ActionId(3).label(), "3");
    }

    #[test]
    fn cast_info_serializes() {
        let cast = CastInfo::new(12, 1.5);
        let json = serde_json::to_string(&cast).unwrap();
        let back: CastInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(cast, back);
    }
}
