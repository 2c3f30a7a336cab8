use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Dispatcher,
    Guest,
}

/// Cached user profile consumed by route-guard logic. Sync refuses to start
/// until the email is verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
}

const ADMIN_PAGES: &[&str] = &[
    "/dashboard",
    "/vehicles",
    "/drivers",
    "/trips",
    "/maintenance",
    "/expenses",
    "/analytics",
    "/carbon",
    "/route-optimization",
    "/live-tracking",
];

const MANAGER_PAGES: &[&str] = &[
    "/dashboard",
    "/vehicles",
    "/drivers",
    "/maintenance",
    "/expenses",
    "/analytics",
    "/carbon",
];

const DISPATCHER_PAGES: &[&str] = &[
    "/dashboard",
    "/trips",
    "/route-optimization",
    "/live-tracking",
];

pub fn allowed_paths(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => ADMIN_PAGES,
        Role::Manager => MANAGER_PAGES,
        Role::Dispatcher => DISPATCHER_PAGES,
        Role::Guest => &[],
    }
}

pub fn has_permission(role: Role, path: &str) -> bool {
    allowed_paths(role).contains(&path)
}

#[cfg(test)]
mod tests {
    use super::{Role, allowed_paths, has_permission};

    #[test]
    fn admin_can_open_every_page() {
        for path in allowed_paths(Role::Admin) {
            assert!(has_permission(Role::Admin, path));
        }
        assert_eq!(allowed_paths(Role::Admin).len(), 10);
    }

    #[test]
    fn dispatcher_cannot_open_expenses() {
        assert!(has_permission(Role::Dispatcher, "/trips"));
        assert!(!has_permission(Role::Dispatcher, "/expenses"));
    }

    #[test]
    fn manager_cannot_open_dispatch_pages() {
        assert!(has_permission(Role::Manager, "/analytics"));
        assert!(!has_permission(Role::Manager, "/route-optimization"));
    }

    #[test]
    fn guest_has_no_pages() {
        assert!(allowed_paths(Role::Guest).is_empty());
        assert!(!has_permission(Role::Guest, "/dashboard"));
    }
}
