use serde::{Deserialize, Serialize};

use crate::common::normalize_text;
use crate::user::User;

/// User role ("perfil") controlling which screens and actions are available.
///
/// - `Admin`: full access, including user management and deletions.
/// - `Perito`: forensic expert; registers and edits cases, issues laudos and reports.
/// - `Assistente`: read access plus evidence intake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Perito,
    Assistente,
}

/// Every role, in display order.
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::Perito, Role::Assistente];

impl Role {
    /// Parse the `perfil` string sent by the API. Comparison ignores case
    /// and accents. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_text(s).as_str() {
            "admin" | "administrador" => Some(Role::Admin),
            "perito" => Some(Role::Perito),
            "assistente" => Some(Role::Assistente),
            _ => None,
        }
    }

    /// The wire value the API expects when registering a user.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Perito => "Perito",
            Role::Assistente => "Assistente",
        }
    }
}

/// An action or screen gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewDashboard,
    ViewCases,
    RegisterCase,
    EditCase,
    DeleteCase,
    ViewEvidence,
    RegisterEvidence,
    EditEvidence,
    DeleteEvidence,
    ViewVictims,
    ViewLaudos,
    IssueLaudo,
    ViewReports,
    GenerateReport,
    EditReport,
    SignReport,
    DeleteReport,
    ManageUsers,
    ChangePassword,
}

impl Role {
    /// Whether this role holds `capability`.
    pub fn allows(&self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::Admin => true,
            Role::Perito => !matches!(
                capability,
                ManageUsers | DeleteCase | DeleteEvidence | DeleteReport
            ),
            Role::Assistente => matches!(
                capability,
                ViewDashboard
                    | ViewCases
                    | ViewEvidence
                    | ViewVictims
                    | ViewLaudos
                    | ViewReports
                    | RegisterEvidence
                    | ChangePassword
            ),
        }
    }
}

/// The single authorization check used by every page and menu entry.
/// A user whose `perfil` is not a known role has no capabilities.
pub fn can(user: &User, capability: Capability) -> bool {
    user.role().is_some_and(|role| role.allows(capability))
}
