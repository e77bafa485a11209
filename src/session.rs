/// Who the current actor is, injected into the client instead of being
/// read from ambient global storage so tests and multi-account hosts can
/// swap sessions freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Requester,
    Guide,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Requester => "requester",
            Role::Guide => "guide",
            Role::Admin => "admin",
        }
    }
}

pub trait SessionContext: Send + Sync {
    /// Bearer credential attached to every backend call. `None` means the
    /// actor is not signed in; callers must short-circuit locally instead
    /// of issuing an unauthenticated request.
    fn token(&self) -> Option<String>;

    fn actor_id(&self) -> Option<String>;

    fn role(&self) -> Role;
}

/// Plain owned-values session, for host applications and tests.
#[derive(Debug, Clone)]
pub struct StaticSession {
    token: Option<String>,
    actor_id: Option<String>,
    role: Role,
}

impl StaticSession {
    pub fn new(token: impl Into<String>, actor_id: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            actor_id: Some(actor_id.into()),
            role,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            token: None,
            actor_id: None,
            role: Role::Requester,
        }
    }
}

impl SessionContext for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn actor_id(&self) -> Option<String> {
        self.actor_id.clone()
    }

    fn role(&self) -> Role {
        self.role
    }
}
