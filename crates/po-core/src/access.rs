//! Route-level access and menu visibility per role.
//!
//! Route access is a role table rather than a capability check: it decides
//! which pages a session may open at all. What a page then shows is decided
//! by the resolved [`CapabilitySet`](crate::permissions::CapabilitySet).

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// A page of the administration application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    PurchaseOrders,
    PurchaseOrderDetail,
    PurchaseOrderCreate,
    AuditLog,
    EmailLog,
    UserManagement,
    Settings,
}

impl Route {
    pub const ALL: [Self; 8] = [
        Self::Dashboard,
        Self::PurchaseOrders,
        Self::PurchaseOrderDetail,
        Self::PurchaseOrderCreate,
        Self::AuditLog,
        Self::EmailLog,
        Self::UserManagement,
        Self::Settings,
    ];

    /// Path pattern; `:id` matches any single segment.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::PurchaseOrders => "/purchase-orders",
            Self::PurchaseOrderDetail => "/purchase-orders/:id",
            Self::PurchaseOrderCreate => "/purchase-orders/new",
            Self::AuditLog => "/audit-log",
            Self::EmailLog => "/email-log",
            Self::UserManagement => "/users",
            Self::Settings => "/settings",
        }
    }

    /// Menu label, or `None` for routes reached only by navigation.
    #[must_use]
    pub const fn menu_label(self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("Dashboard"),
            Self::PurchaseOrders => Some("Purchase Orders"),
            Self::AuditLog => Some("Audit Log"),
            Self::EmailLog => Some("Email Log"),
            Self::UserManagement => Some("Users"),
            Self::Settings => Some("Settings"),
            Self::PurchaseOrderDetail | Self::PurchaseOrderCreate => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::PurchaseOrders => "purchase_orders",
            Self::PurchaseOrderDetail => "purchase_order_detail",
            Self::PurchaseOrderCreate => "purchase_order_create",
            Self::AuditLog => "audit_log",
            Self::EmailLog => "email_log",
            Self::UserManagement => "user_management",
            Self::Settings => "settings",
        }
    }

    /// Match a concrete path against the route table.
    ///
    /// Literal segments win over `:id`, so `/purchase-orders/new` is the
    /// create page rather than a detail page for an order called `new`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let matches = |route: Self| {
            let pattern: Vec<&str> = route.path().split('/').filter(|s| !s.is_empty()).collect();
            pattern.len() == segments.len()
                && pattern
                    .iter()
                    .zip(&segments)
                    .all(|(p, s)| *p == ":id" || p == s)
        };

        Self::ALL
            .into_iter()
            .filter(|route| matches(*route))
            .min_by_key(|route| route.path().matches(":id").count())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visible navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MenuItem {
    pub route: Route,
    pub label: String,
    pub path: String,
}

/// Role → route access table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAccessPolicy;

impl RoleAccessPolicy {
    /// Routes a role may open.
    #[must_use]
    pub const fn routes(role: Role) -> &'static [Route] {
        match role {
            Role::Admin => &Route::ALL,
            Role::MaterialControl => &[
                Route::Dashboard,
                Route::PurchaseOrders,
                Route::PurchaseOrderDetail,
                Route::PurchaseOrderCreate,
                Route::AuditLog,
                Route::EmailLog,
            ],
            Role::AppUser => &[
                Route::Dashboard,
                Route::PurchaseOrders,
                Route::PurchaseOrderDetail,
                Route::PurchaseOrderCreate,
            ],
            Role::Vendor => &[Route::PurchaseOrders, Route::PurchaseOrderDetail],
            Role::Unrecognized => &[],
        }
    }

    #[must_use]
    pub fn can_access(role: Role, route: Route) -> bool {
        Self::routes(role).contains(&route)
    }

    /// Access check for a concrete path. Unknown paths are denied.
    #[must_use]
    pub fn can_access_path(role: Role, path: &str) -> bool {
        Route::from_path(path).is_some_and(|route| Self::can_access(role, route))
    }

    /// Menu entries visible to a role, in menu order.
    #[must_use]
    pub fn menu(role: Role) -> Vec<MenuItem> {
        Self::routes(role)
            .iter()
            .filter_map(|route| {
                route.menu_label().map(|label| MenuItem {
                    route: *route,
                    label: label.to_string(),
                    path: route.path().to_string(),
                })
            })
            .collect()
    }

    /// Where a role lands after sign-in: its first accessible route.
    #[must_use]
    pub fn landing(role: Role) -> Option<Route> {
        Self::routes(role).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn admin_reaches_every_route() {
        for route in Route::ALL {
            assert!(RoleAccessPolicy::can_access(Role::Admin, route), "{route}");
        }
    }

    #[test]
    fn unrecognized_role_reaches_nothing() {
        assert!(RoleAccessPolicy::routes(Role::Unrecognized).is_empty());
        assert!(RoleAccessPolicy::menu(Role::Unrecognized).is_empty());
        assert_eq!(RoleAccessPolicy::landing(Role::Unrecognized), None);
    }

    #[test]
    fn vendor_menu_is_orders_only() {
        let labels: Vec<String> = RoleAccessPolicy::menu(Role::Vendor)
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(labels, vec!["Purchase Orders".to_string()]);
        assert_eq!(
            RoleAccessPolicy::landing(Role::Vendor),
            Some(Route::PurchaseOrders)
        );
    }

    #[test]
    fn material_control_cannot_manage_users() {
        assert!(!RoleAccessPolicy::can_access(
            Role::MaterialControl,
            Route::UserManagement
        ));
        assert!(RoleAccessPolicy::can_access(
            Role::MaterialControl,
            Route::AuditLog
        ));
    }

    #[test]
    fn path_matching_prefers_literal_segments() {
        assert_eq!(
            Route::from_path("/purchase-orders/new"),
            Some(Route::PurchaseOrderCreate)
        );
        assert_eq!(
            Route::from_path("/purchase-orders/po-123"),
            Some(Route::PurchaseOrderDetail)
        );
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(
            Route::from_path("/purchase-orders?status=DRAFT"),
            Some(Route::PurchaseOrders)
        );
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn vendor_cannot_open_create_page() {
        assert!(!RoleAccessPolicy::can_access_path(
            Role::Vendor,
            "/purchase-orders/new"
        ));
        assert!(RoleAccessPolicy::can_access_path(
            Role::Vendor,
            "/purchase-orders/po-1"
        ));
    }
}
