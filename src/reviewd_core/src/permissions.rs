//! Role-based permission evaluation.
//!
//! One pure decision function parameterized by a named policy preset,
//! selected per resource at routing-configuration time. The evaluator has no
//! side effects and must run before any mutation; a deny is surfaced by the
//! HTTP boundary as a generic forbidden response.

use http::Method;

use crate::domain::{role::Role, username::Username};

/// Methods with no mutating side effect. Always allowed, for every policy.
pub const SAFE_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

pub fn is_safe_method(method: &Method) -> bool {
    SAFE_METHODS.contains(method)
}

/// Named permission presets, one per resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Unsafe operations require role `admin` (account management).
    AdminOnly,
    /// Unsafe collection operations require authentication; unsafe object
    /// operations require authorship or a moderating role (reviews,
    /// comments).
    AuthorOrModeratorOrReadOnly,
    /// Same decision table as [`Policy::AdminOnly`], applied to collection
    /// resources without ownership (categories, genres).
    ReadOnlyOrAdmin,
}

/// The authentication state of the caller, recovered from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    Authenticated { username: Username, role: Role },
}

impl Actor {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Authenticated { .. })
    }

    fn is_author_of(&self, author: &Username) -> bool {
        matches!(self, Actor::Authenticated { username, .. } if username == author)
    }
}

/// Content with exactly one owning account, stamped at creation time.
pub trait Authored {
    fn author(&self) -> &Username;
}

/// Decide whether `actor` may perform `method` under `policy`.
///
/// `target_author` is `Some` for object-level checks on authored content and
/// `None` for collection-level checks.
pub fn evaluate(
    policy: Policy,
    method: &Method,
    actor: &Actor,
    target_author: Option<&Username>,
) -> bool {
    if is_safe_method(method) {
        return true;
    }

    let role = match actor {
        Actor::Anonymous => return false,
        Actor::Authenticated { role, .. } => *role,
    };

    match policy {
        Policy::AdminOnly | Policy::ReadOnlyOrAdmin => role.is_admin(),
        Policy::AuthorOrModeratorOrReadOnly => match target_author {
            None => true,
            Some(author) => {
                actor.is_author_of(author) || role.is_admin() || role.is_moderator()
            }
        },
    }
}

/// Convenience wrapper for object-level checks on [`Authored`] content.
pub fn evaluate_object<T: Authored>(
    policy: Policy,
    method: &Method,
    actor: &Actor,
    target: &T,
) -> bool {
    evaluate(policy, method, actor, Some(target.author()))
}
