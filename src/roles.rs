use once_cell::sync::Lazy;
use serde::Serialize;

/// One row of the role/permission reference matrix.
///
/// Reference material for the security screen only; nothing in the
/// dashboard enforces these.
#[derive(Debug, Clone, Serialize)]
pub struct RolePermission {
    pub role: &'static str,
    pub permissions: &'static str,
    pub level: &'static str,
}

/// The access matrix shown on the security screen.
pub static ROLE_MATRIX: Lazy<Vec<RolePermission>> = Lazy::new(|| {
    vec![
        RolePermission {
            role: "Admin (IT)",
            permissions: "View / add / edit / delete / manage users",
            level: "Full",
        },
        RolePermission {
            role: "Analyst",
            permissions: "View, clean, and analyze data",
            level: "Standard",
        },
        RolePermission {
            role: "Viewer (Management)",
            permissions: "View summary reports and dashboard only",
            level: "Basic",
        },
    ]
});

/// Technical safeguards listed alongside the matrix.
pub const TECHNICAL_SAFEGUARDS: [&str; 3] = [
    "Encryption of stored data files",
    "Multi-factor authentication",
    "Audit logs for every activity",
];

/// Administrative safeguards listed alongside the matrix.
pub const ADMINISTRATIVE_SAFEGUARDS: [&str; 3] = [
    "Non-disclosure agreements",
    "Privacy policy compliance",
    "Cyber-security training",
];
