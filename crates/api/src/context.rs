use tenure_auth::Actor;

/// Authenticated-actor context for a request.
///
/// Built once by the auth middleware: validated claims plus the resolved
/// employee link. Immutable and present for all domain routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    actor: Actor,
}

impl ActorContext {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}
