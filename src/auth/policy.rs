use once_cell::sync::Lazy;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::role::Role;

const ADMIN: &[Role] = &[Role::Admin];
const EMPLOYEE: &[Role] = &[Role::Employee];
const EVERYONE: &[Role] = &[Role::Admin, Role::Employee];

#[derive(Debug, Clone, Copy)]
pub struct ViewRule {
    pub route: &'static str,
    pub title: &'static str,
    pub roles: &'static [Role],
    /// Listed in the sidebar
    pub navigable: bool,
}

const fn view(route: &'static str, title: &'static str, roles: &'static [Role]) -> ViewRule {
    ViewRule {
        route,
        title,
        roles,
        navigable: true,
    }
}

const fn shared(route: &'static str, roles: &'static [Role]) -> ViewRule {
    ViewRule {
        route,
        title: "",
        roles,
        navigable: false,
    }
}

const DEFAULT_RULES: &[ViewRule] = &[
    view("/dashboard", "Dashboard", EVERYONE),
    view("/payrolls", "Nóminas", ADMIN),
    view("/users", "Usuarios", ADMIN),
    view("/deductions", "Deducciones", ADMIN),
    view("/bonus", "Bonificaciones", ADMIN),
    view("/contract-types", "Tipos de contrato", ADMIN),
    view("/payroll-types", "Tipos de nómina", ADMIN),
    view("/payments", "Mis pagos", EMPLOYEE),
    view("/vacations", "Vacaciones", EVERYONE),
    view("/performance-evaluations", "Evaluaciones de desempeño", EVERYONE),
    view("/reports", "Reportes", ADMIN),
    shared("/session", EVERYONE),
    shared("/navigation", EVERYONE),
    shared("/notifications", EVERYONE),
    shared("/confirmations", EVERYONE),
];

pub static DEFAULT_POLICY: Lazy<AccessPolicy> = Lazy::new(|| AccessPolicy::new(DEFAULT_RULES));

/// Single source of truth for which role may open which view. Routing and
/// navigation both ask this table.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: &'static [ViewRule],
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavItem {
    #[schema(value_type = String, example = "Nóminas")]
    pub name: &'static str,
    #[schema(value_type = String, example = "/payrolls")]
    pub href: &'static str,
}

impl AccessPolicy {
    pub fn new(rules: &'static [ViewRule]) -> Self {
        Self { rules }
    }

    fn rule_for(&self, route: &str) -> Option<&ViewRule> {
        self.rules.iter().find(|rule| {
            route == rule.route
                || route
                    .strip_prefix(rule.route)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// A route is reachable when it equals a listed view or is nested under
    /// it. Unknown routes are denied.
    pub fn can_access(&self, route: &str, role: Role) -> bool {
        self.rule_for(route)
            .is_some_and(|rule| rule.roles.contains(&role))
    }

    /// Same check for a raw role id; unknown roles are denied.
    pub fn can_access_role_id(&self, route: &str, role_id: u64) -> bool {
        Role::from_id(role_id).is_some_and(|role| self.can_access(route, role))
    }

    pub fn navigation(&self, role: Role) -> Vec<NavItem> {
        self.rules
            .iter()
            .filter(|rule| rule.navigable && rule.roles.contains(&role))
            .map(|rule| NavItem {
                name: rule.title,
                href: rule.route,
            })
            .collect()
    }
}

/// Where a user lands after signing in.
pub fn landing_route(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "/payrolls",
        Some(Role::Employee) => "/payments",
        None => "/dashboard",
    }
}
