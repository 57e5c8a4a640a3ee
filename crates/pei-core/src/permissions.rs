//! Role-based capability resolution.
//!
//! Every authorization decision in the application goes through
//! [`get_permissions`]: the authenticated user's role string is parsed into a
//! [`Role`] and looked up in a static capability table. The result is a
//! complete [`PermissionSet`] (all nine flags present) returned by value.
//!
//! Resolution is total. Strings outside the four recognized roles parse to
//! [`Role::Unrecognized`], which resolves to the same set as
//! [`Role::Familia`], the most restrictive profile.
//!
//! # Example
//!
//! ```
//! use pei_core::permissions::{Capability, Role, get_permissions};
//!
//! let perms = get_permissions("Profissional");
//! assert!(perms.can_edit_classes);
//! assert!(!perms.allows(Capability::DeleteStudents));
//!
//! assert_eq!(get_permissions("UnknownRole"), Role::Familia.permissions());
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The functional category of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Administrador,
    Profissional,
    Tutor,
    Familia,
    /// Any role string that is not one of the four recognized spellings.
    Unrecognized,
}

impl Role {
    /// Recognized roles, in decreasing order of privilege.
    pub const RECOGNIZED: [Role; 4] = [
        Role::Administrador,
        Role::Profissional,
        Role::Tutor,
        Role::Familia,
    ];

    /// Parses a role string. Matching is exact: casing and accents count.
    pub fn parse(role: &str) -> Self {
        match role {
            "Administrador" => Role::Administrador,
            "Profissional" => Role::Profissional,
            "Tutor" => Role::Tutor,
            "Família" => Role::Familia,
            _ => Role::Unrecognized,
        }
    }

    /// Canonical spelling of a recognized role, `None` for [`Role::Unrecognized`].
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Role::Administrador => Some("Administrador"),
            Role::Profissional => Some("Profissional"),
            Role::Tutor => Some("Tutor"),
            Role::Familia => Some("Família"),
            Role::Unrecognized => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized)
    }

    /// Looks up this role's capability set.
    pub fn permissions(self) -> PermissionSet {
        match self {
            Role::Administrador => ADMINISTRADOR,
            Role::Profissional => PROFISSIONAL,
            Role::Tutor => TUTOR,
            Role::Familia => FAMILIA,
            Role::Unrecognized => UNRECOGNIZED,
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unrecognized"))
    }
}

/// A single capability flag of a [`PermissionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageUsers,
    DeleteStudents,
    ViewAllSchools,
    EditClasses,
    EditStudents,
    ViewManagement,
    ViewStudents,
    ViewDisciplines,
    ViewReports,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::ManageUsers,
        Capability::DeleteStudents,
        Capability::ViewAllSchools,
        Capability::EditClasses,
        Capability::EditStudents,
        Capability::ViewManagement,
        Capability::ViewStudents,
        Capability::ViewDisciplines,
        Capability::ViewReports,
    ];

    /// The capability's key as it appears in serialized permission sets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageUsers => "canManageUsers",
            Capability::DeleteStudents => "canDeleteStudents",
            Capability::ViewAllSchools => "canViewAllSchools",
            Capability::EditClasses => "canEditClasses",
            Capability::EditStudents => "canEditStudents",
            Capability::ViewManagement => "canViewManagement",
            Capability::ViewStudents => "canViewStudents",
            Capability::ViewDisciplines => "canViewDisciplines",
            Capability::ViewReports => "canViewReports",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete set of capability flags derived from a [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub can_manage_users: bool,
    pub can_delete_students: bool,
    pub can_view_all_schools: bool,
    pub can_edit_classes: bool,
    pub can_edit_students: bool,
    pub can_view_management: bool,
    pub can_view_students: bool,
    pub can_view_disciplines: bool,
    pub can_view_reports: bool,
}

impl PermissionSet {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => self.can_manage_users,
            Capability::DeleteStudents => self.can_delete_students,
            Capability::ViewAllSchools => self.can_view_all_schools,
            Capability::EditClasses => self.can_edit_classes,
            Capability::EditStudents => self.can_edit_students,
            Capability::ViewManagement => self.can_view_management,
            Capability::ViewStudents => self.can_view_students,
            Capability::ViewDisciplines => self.can_view_disciplines,
            Capability::ViewReports => self.can_view_reports,
        }
    }

    /// Every capability paired with its flag, in [`Capability::ALL`] order.
    pub fn entries(&self) -> [(Capability, bool); 9] {
        Capability::ALL.map(|capability| (capability, self.allows(capability)))
    }
}

// Capability table.

const ADMINISTRADOR: PermissionSet = PermissionSet {
    can_manage_users: true,
    can_delete_students: true,
    can_view_all_schools: true,
    can_edit_classes: true,
    can_edit_students: true,
    can_view_management: true,
    can_view_students: true,
    can_view_disciplines: true,
    can_view_reports: true,
};

const PROFISSIONAL: PermissionSet = PermissionSet {
    can_manage_users: false,
    can_delete_students: false,
    can_view_all_schools: false,
    can_edit_classes: true,
    can_edit_students: true,
    can_view_management: false,
    can_view_students: true,
    can_view_disciplines: true,
    can_view_reports: true,
};

const TUTOR: PermissionSet = PermissionSet {
    can_manage_users: false,
    can_delete_students: false,
    can_view_all_schools: false,
    can_edit_classes: false,
    can_edit_students: false,
    can_view_management: false,
    can_view_students: true,
    can_view_disciplines: true,
    can_view_reports: true,
};

const FAMILIA: PermissionSet = PermissionSet {
    can_manage_users: false,
    can_delete_students: false,
    can_view_all_schools: false,
    can_edit_classes: false,
    can_edit_students: false,
    can_view_management: false,
    can_view_students: true,
    can_view_disciplines: false,
    can_view_reports: true,
};

/// Set for role strings outside the recognized four.
const UNRECOGNIZED: PermissionSet = FAMILIA;

/// Resolves the capability set for a raw role string.
///
/// Never fails: unrecognized strings (including empty or whitespace-only
/// ones) get the Família set.
pub fn get_permissions(role: &str) -> PermissionSet {
    Role::parse(role).permissions()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(flags: [bool; 9]) -> PermissionSet {
        PermissionSet {
            can_manage_users: flags[0],
            can_delete_students: flags[1],
            can_view_all_schools: flags[2],
            can_edit_classes: flags[3],
            can_edit_students: flags[4],
            can_view_management: flags[5],
            can_view_students: flags[6],
            can_view_disciplines: flags[7],
            can_view_reports: flags[8],
        }
    }

    #[test]
    fn test_administrador_has_every_capability() {
        assert_eq!(get_permissions("Administrador"), set([true; 9]));
    }

    #[test]
    fn test_profissional_table() {
        assert_eq!(
            get_permissions("Profissional"),
            set([false, false, false, true, true, false, true, true, true])
        );
    }

    #[test]
    fn test_tutor_table() {
        assert_eq!(
            get_permissions("Tutor"),
            set([false, false, false, false, false, false, true, true, true])
        );
    }

    #[test]
    fn test_familia_table() {
        assert_eq!(
            get_permissions("Família"),
            set([false, false, false, false, false, false, true, false, true])
        );
    }

    #[test]
    fn test_unrecognized_matches_familia() {
        let familia = get_permissions("Família");
        for role in [
            "UnknownRole",
            "",
            "   ",
            "administrador",
            "ADMINISTRADOR",
            "Familia",
            "Tutor ",
            "null",
            "undefined",
        ] {
            assert_eq!(get_permissions(role), familia, "role {role:?}");
        }
    }

    #[test]
    fn test_long_input_resolves() {
        let long = "x".repeat(1 << 16);
        assert_eq!(get_permissions(&long), FAMILIA);
    }

    #[test]
    fn test_parse_roles() {
        assert_eq!(Role::parse("Administrador"), Role::Administrador);
        assert_eq!(Role::parse("Profissional"), Role::Profissional);
        assert_eq!(Role::parse("Tutor"), Role::Tutor);
        assert_eq!(Role::parse("Família"), Role::Familia);
        assert_eq!(Role::parse("Professor"), Role::Unrecognized);
        assert_eq!("Tutor".parse::<Role>(), Ok(Role::Tutor));
    }

    #[test]
    fn test_role_round_trips_through_as_str() {
        for role in Role::RECOGNIZED {
            let name = role.as_str().unwrap();
            assert_eq!(Role::parse(name), role);
            assert_eq!(role.to_string(), name);
        }
        assert_eq!(Role::Unrecognized.as_str(), None);
        assert!(!Role::Unrecognized.is_recognized());
    }

    #[test]
    fn test_returned_sets_are_independent() {
        let mut first = get_permissions("Administrador");
        let second = get_permissions("Administrador");
        assert_eq!(first, second);

        first.can_manage_users = false;
        assert!(second.can_manage_users);
        assert!(get_permissions("Administrador").can_manage_users);
    }

    #[test]
    fn test_concurrent_resolution() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| get_permissions("Administrador")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), ADMINISTRADOR);
        }
    }

    #[test]
    fn test_allows_matches_fields() {
        for role in Role::RECOGNIZED {
            let perms = role.permissions();
            let entries = perms.entries();
            assert_eq!(entries.len(), Capability::ALL.len());
            for (capability, granted) in entries {
                assert_eq!(perms.allows(capability), granted);
            }
        }
        assert!(TUTOR.allows(Capability::ViewStudents));
        assert!(!TUTOR.allows(Capability::EditStudents));
    }

    #[test]
    fn test_serializes_every_key_in_camel_case() {
        let value = serde_json::to_value(get_permissions("Tutor")).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 9);
        for capability in Capability::ALL {
            assert!(object.contains_key(capability.as_str()), "{capability}");
        }
        assert_eq!(object["canViewStudents"], true);
        assert_eq!(object["canEditStudents"], false);
    }
}
