//! Capability sets and role-based permission resolution.
//!
//! [`resolve`] is the single place where a role (plus any explicit grants
//! from the auth provider) turns into a [`CapabilitySet`]. Everything else,
//! from the `can_*` accessors to the transition gates, is a plain membership
//! test against that set; no accessor carries role-specific exceptions.

use std::collections::{BTreeSet, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Permission, Role};

/// Set of capability flags held by a session. Only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Permission>);

impl CapabilitySet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Every permission the model knows about.
    #[must_use]
    pub fn all() -> Self {
        Self(Permission::ALL.into_iter().collect())
    }

    /// Parse permission names from the auth provider.
    ///
    /// Unknown names are dropped with a warning.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut set = Self::empty();
        for name in names {
            match name.as_ref().parse::<Permission>() {
                Ok(permission) => {
                    set.insert(permission);
                }
                Err(error) => {
                    tracing::warn!("dropping explicit grant: {error}");
                }
            }
        }
        set
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership test for `ViewFinancialData`.
    #[must_use]
    pub fn can_view_financial_data(&self) -> bool {
        self.contains(Permission::ViewFinancialData)
    }

    /// Membership test for `EditPo`.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.contains(Permission::EditPo)
    }

    /// Membership test for `SendPoEmail`.
    #[must_use]
    pub fn can_send_email(&self) -> bool {
        self.contains(Permission::SendPoEmail)
    }

    /// Membership test for `AcknowledgePo`.
    #[must_use]
    pub fn can_acknowledge(&self) -> bool {
        self.contains(Permission::AcknowledgePo)
    }

    /// Membership test for `DeletePo`.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.contains(Permission::DeletePo)
    }

    /// Membership test for `ApprovePo`.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        self.contains(Permission::ApprovePo)
    }
}

impl FromIterator<Permission> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Permission; N]> for CapabilitySet {
    fn from(permissions: [Permission; N]) -> Self {
        permissions.into_iter().collect()
    }
}

/// Default capabilities for a role.
#[must_use]
pub const fn role_defaults(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &Permission::ALL,
        Role::MaterialControl => &[
            Permission::ViewAllPo,
            Permission::ViewOwnPo,
            Permission::CreatePo,
            Permission::EditPo,
            Permission::SendPoEmail,
            Permission::ViewFinancialData,
        ],
        Role::AppUser => &[Permission::ViewOwnPo, Permission::CreatePo],
        Role::Vendor => &[Permission::ViewOwnPo, Permission::AcknowledgePo],
        Role::Unrecognized => &[],
    }
}

/// Capabilities a role keeps no matter what explicit grants say.
#[must_use]
pub const fn role_minimum(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin | Role::MaterialControl | Role::AppUser | Role::Vendor => {
            &[Permission::ViewOwnPo]
        }
        Role::Unrecognized => &[],
    }
}

/// Resolve the capability set for a role.
///
/// Explicit grants are unioned with the role defaults and the role minimum,
/// so they can only broaden access. An unrecognized role resolves to the
/// empty set regardless of grants.
#[must_use]
pub fn resolve(role: Role, explicit_grants: Option<&CapabilitySet>) -> CapabilitySet {
    if !role.is_recognized() {
        tracing::debug!("unrecognized role resolves to an empty capability set");
        return CapabilitySet::empty();
    }

    let mut caps: CapabilitySet = role_defaults(role)
        .iter()
        .chain(role_minimum(role))
        .copied()
        .collect();

    if let Some(grants) = explicit_grants {
        caps = caps.union(grants);
    }

    caps
}

/// Memoizing front for [`resolve`], keyed on (role, explicit grants).
#[derive(Debug, Default)]
pub struct PermissionResolver {
    memo: HashMap<(Role, CapabilitySet), CapabilitySet>,
}

impl PermissionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, role: Role, explicit_grants: Option<&CapabilitySet>) -> CapabilitySet {
        let key = (role, explicit_grants.cloned().unwrap_or_default());
        self.memo
            .entry(key)
            .or_insert_with(|| resolve(role, explicit_grants))
            .clone()
    }

    /// Number of memoized (role, grants) pairs.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.memo.len()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }
}
