use std::fmt;

/// Opaque reference to one resource hosted by a [`HandleActor`](crate::HandleActor).
///
/// Tokens are minted from a counter starting at 1 and are never reused, so a
/// stale token is reported as [`ActorError::NotFound`](crate::ActorError::NotFound)
/// rather than silently reaching a different resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u64);

impl Token {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
