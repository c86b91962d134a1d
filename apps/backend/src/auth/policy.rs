//! Route access policy: an ordered, immutable rule table.
//!
//! The table replaces annotation-scattered route security with plain data
//! that can be audited top to bottom. Evaluation scans in order and the first
//! matching rule wins; a request matching no rule falls back to
//! `Authenticated` (fail-closed, never fail-open).

use actix_web::http::Method;

use crate::auth::claims::Role;

/// What a matched route demands of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// No token needed; the request proceeds without a principal.
    Public,
    /// Any structurally valid, unexpired token.
    Authenticated,
    /// A valid token whose role is in the set.
    RoleIn(Vec<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatch {
    Any,
    Is(Method),
}

impl MethodMatch {
    fn matches(&self, method: &Method) -> bool {
        match self {
            MethodMatch::Any => true,
            MethodMatch::Is(m) => m == method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one path segment.
    Wild,
    /// `**`: the remainder of the path, including nothing.
    Rest,
}

/// Slash-separated pattern with `*` (one segment) and a trailing `**` (rest).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "*" => Segment::Wild,
                "**" => Segment::Rest,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut i = 0;

        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Wild => {
                    if i >= parts.len() {
                        return false;
                    }
                    i += 1;
                }
                Segment::Literal(lit) => {
                    if i >= parts.len() || parts[i] != lit {
                        return false;
                    }
                    i += 1;
                }
            }
        }

        i == parts.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    method: MethodMatch,
    path: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn new(method: MethodMatch, pattern: &str, requirement: Requirement) -> Self {
        Self {
            method,
            path: PathPattern::new(pattern),
            requirement,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.matches(method) && self.path.matches(path)
    }
}

/// Ordered rule table, built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

static FALLBACK: Requirement = Requirement::Authenticated;

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// First matching rule wins; no match means `Authenticated`.
    pub fn evaluate(&self, method: &Method, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| &rule.requirement)
            .unwrap_or(&FALLBACK)
    }
}

/// The application's route table.
///
/// Public rules mirror the original site's anonymous surface; content
/// mutations are restricted to the editorial roles, destructive operations
/// and user administration to admins. Everything else needs a valid token.
pub fn default_policy() -> AccessPolicy {
    use MethodMatch::{Any, Is};
    use Requirement::{Public, RoleIn};

    let admin = vec![Role::Admin];
    let editorial = vec![Role::Admin, Role::Editor];

    AccessPolicy::new(vec![
        // CORS preflights carry no credentials.
        AccessRule::new(Is(Method::OPTIONS), "/**", Public),
        AccessRule::new(Any, "/health", Public),
        AccessRule::new(Any, "/api/auth/**", Public),
        // Anonymous read surface.
        AccessRule::new(Is(Method::GET), "/api/news/published", Public),
        AccessRule::new(Is(Method::GET), "/api/news/featured", Public),
        AccessRule::new(Is(Method::GET), "/api/news/*", Public),
        AccessRule::new(Is(Method::GET), "/api/teams/active", Public),
        AccessRule::new(Is(Method::GET), "/api/players/active", Public),
        AccessRule::new(Is(Method::GET), "/api/matches/upcoming", Public),
        AccessRule::new(Is(Method::GET), "/api/comments/news/*", Public),
        AccessRule::new(Any, "/api/files/**", Public),
        // User administration is admin-only.
        AccessRule::new(Any, "/api/users/**", RoleIn(admin.clone())),
        // Content management: deletes are admin-only, writes editorial.
        AccessRule::new(Is(Method::DELETE), "/api/news/**", RoleIn(admin.clone())),
        AccessRule::new(Is(Method::DELETE), "/api/teams/**", RoleIn(admin.clone())),
        AccessRule::new(Is(Method::DELETE), "/api/players/**", RoleIn(admin.clone())),
        AccessRule::new(Is(Method::DELETE), "/api/matches/**", RoleIn(admin.clone())),
        AccessRule::new(Is(Method::DELETE), "/api/competitions/**", RoleIn(admin)),
        AccessRule::new(Is(Method::POST), "/api/news/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::PUT), "/api/news/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::POST), "/api/teams/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::PUT), "/api/teams/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::POST), "/api/players/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::PUT), "/api/players/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::POST), "/api/matches/**", RoleIn(editorial.clone())),
        AccessRule::new(Is(Method::PUT), "/api/matches/**", RoleIn(editorial.clone())),
        AccessRule::new(
            Is(Method::POST),
            "/api/competitions/**",
            RoleIn(editorial.clone()),
        ),
        AccessRule::new(Is(Method::PUT), "/api/competitions/**", RoleIn(editorial)),
        // Everything else (comment posting, member reads, ...) falls through
        // to the Authenticated default.
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_matching() {
        assert!(PathPattern::new("/api/auth/**").matches("/api/auth/login"));
        assert!(PathPattern::new("/api/auth/**").matches("/api/auth"));
        assert!(PathPattern::new("/api/news/*").matches("/api/news/42"));
        assert!(!PathPattern::new("/api/news/*").matches("/api/news"));
        assert!(!PathPattern::new("/api/news/*").matches("/api/news/42/comments"));
        assert!(PathPattern::new("/health").matches("/health"));
        assert!(!PathPattern::new("/health").matches("/healthz"));
        assert!(PathPattern::new("/**").matches("/anything/at/all"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = AccessPolicy::new(vec![
            AccessRule::new(
                MethodMatch::Is(Method::GET),
                "/api/news/published",
                Requirement::Public,
            ),
            AccessRule::new(
                MethodMatch::Any,
                "/api/news/**",
                Requirement::RoleIn(vec![Role::Admin]),
            ),
        ]);

        assert_eq!(
            policy.evaluate(&Method::GET, "/api/news/published"),
            &Requirement::Public
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/api/news/drafts"),
            &Requirement::RoleIn(vec![Role::Admin])
        );
        // Method mismatch on the first rule falls through to the second.
        assert_eq!(
            policy.evaluate(&Method::POST, "/api/news/published"),
            &Requirement::RoleIn(vec![Role::Admin])
        );
    }

    #[test]
    fn unmatched_requests_fail_closed() {
        let policy = AccessPolicy::new(vec![]);
        assert_eq!(
            policy.evaluate(&Method::GET, "/api/anything"),
            &Requirement::Authenticated
        );
    }

    #[test]
    fn default_policy_surface() {
        let policy = default_policy();

        assert_eq!(
            policy.evaluate(&Method::POST, "/api/auth/login"),
            &Requirement::Public
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/api/news/published"),
            &Requirement::Public
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/api/news/7"),
            &Requirement::Public
        );
        assert_eq!(
            policy.evaluate(&Method::DELETE, "/api/news/7"),
            &Requirement::RoleIn(vec![Role::Admin])
        );
        assert_eq!(
            policy.evaluate(&Method::POST, "/api/news"),
            &Requirement::RoleIn(vec![Role::Admin, Role::Editor])
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/api/users/5"),
            &Requirement::RoleIn(vec![Role::Admin])
        );
        // Comment posting is any authenticated user.
        assert_eq!(
            policy.evaluate(&Method::POST, "/api/comments"),
            &Requirement::Authenticated
        );
        // Unknown routes fail closed.
        assert_eq!(
            policy.evaluate(&Method::GET, "/api/standings"),
            &Requirement::Authenticated
        );
        // Preflights pass.
        assert_eq!(
            policy.evaluate(&Method::OPTIONS, "/api/users/5"),
            &Requirement::Public
        );
    }
}
