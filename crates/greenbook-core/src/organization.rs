//! Organization aggregate: metadata, members, and roles.
//!
//! Fetched wholesale per organization id; there are no partial updates.
//! Field renames follow the backend wire contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One role defined inside an organization. Roles are always embedded in
/// the organization aggregate or passed inline into workflow approver
/// groups, never persisted on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "roleID")]
    pub role_id: String,
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// One organization member, keyed by user id in the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: String,
    #[serde(rename = "roleIDs", default)]
    pub role_ids: Vec<String>,
}

/// The full organization aggregate as held client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: String,
    #[serde(rename = "memberCount", default)]
    pub member_count: u64,
    #[serde(rename = "reportCount", default)]
    pub report_count: u64,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub members: HashMap<String, Member>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
}

impl Organization {
    /// Derived role count; always recomputed from the embedded roles.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

/// Lightweight projection returned when resolving a user's organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSummary {
    #[serde(rename = "organizationID")]
    pub organization_id: String,
    #[serde(rename = "organizationName", default)]
    pub organization_name: String,
    #[serde(rename = "roleIDs", default)]
    pub role_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_decodes_from_wire_shape() {
        let json = serde_json::json!({
            "id": "org-1",
            "name": "Acme",
            "owner": "alice",
            "avatarUrl": "https://cdn/acme.png",
            "memberCount": 3,
            "reportCount": 2,
            "roles": [
                {"roleID": "r1", "roleName": "Editor", "color": "#00ff00", "createdAt": "2025-01-01"}
            ],
            "members": {
                "u1": {"userID": "u1", "name": "Alice", "roleIDs": ["r1"]}
            },
            "createdAt": "2024-12-01",
            "updatedAt": "2025-01-02"
        });
        let org: Organization = serde_json::from_value(json).unwrap();
        assert_eq!(org.member_count, 3);
        assert_eq!(org.role_count(), 1);
        assert_eq!(org.members["u1"].role_ids, vec!["r1"]);
        // Absent optional fields fall back to defaults.
        assert!(org.code.is_empty());
    }
}
