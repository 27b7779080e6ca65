//! Per-chapter approval workflow configuration.
//!
//! A chapter's workflow is an ordered list of stages, each with one or
//! more approver role groups. Stage `order` is never trusted from input;
//! it is recomputed from array position (1-based) on every normalization,
//! so after any save the order always matches the position.

use crate::organization::Role;
use serde::{Deserialize, Serialize};

/// One approval stage as stored and exchanged with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(rename = "approverGroups", default)]
    pub approver_groups: Vec<Role>,
}

/// Minimal approver reference kept in the normalized projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverRef {
    #[serde(rename = "roleId")]
    pub role_id: String,
    #[serde(rename = "roleName")]
    pub role_name: String,
}

/// One stage in the normalized projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub name: String,
    pub order: u32,
    #[serde(rename = "approverGroups")]
    pub approver_groups: Vec<ApproverRef>,
}

/// Normalized per-chapter projection used by read-mostly views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDetail {
    #[serde(rename = "chapterName")]
    pub chapter_name: String,
    pub stages: Vec<StageSummary>,
}

/// Recomputes every stage's `order` from its array position (1-based).
pub fn renumber_stages(stages: &mut [WorkflowStage]) {
    for (index, stage) in stages.iter_mut().enumerate() {
        stage.order = index as u32 + 1;
    }
}

/// Projects raw stages into the normalized detail form, renumbering and
/// keeping only role id/name per approver group.
pub fn project_detail(chapter_name: impl Into<String>, stages: &[WorkflowStage]) -> WorkflowDetail {
    let stages = stages
        .iter()
        .enumerate()
        .map(|(index, stage)| StageSummary {
            name: stage.name.clone(),
            order: index as u32 + 1,
            approver_groups: stage
                .approver_groups
                .iter()
                .map(|role| ApproverRef {
                    role_id: role.role_id.clone(),
                    role_name: role.role_name.clone(),
                })
                .collect(),
        })
        .collect();
    WorkflowDetail {
        chapter_name: chapter_name.into(),
        stages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str, name: &str) -> Role {
        Role {
            role_id: id.into(),
            role_name: name.into(),
            description: "reviewers".into(),
            color: "#112233".into(),
            created_at: "2025-01-01".into(),
        }
    }

    #[test]
    fn renumber_ignores_incoming_order() {
        let mut stages = vec![
            WorkflowStage {
                name: "Draft check".into(),
                order: 7,
                approver_groups: vec![role("r1", "Editor")],
            },
            WorkflowStage {
                name: "Final".into(),
                order: 0,
                approver_groups: vec![],
            },
        ];
        renumber_stages(&mut stages);
        assert_eq!(stages[0].order, 1);
        assert_eq!(stages[1].order, 2);
    }

    #[test]
    fn projection_trims_approver_fields() {
        let stages = vec![WorkflowStage {
            name: "Review".into(),
            order: 5,
            approver_groups: vec![role("r1", "Editor"), role("r2", "Owner")],
        }];
        let detail = project_detail("Governance", &stages);
        assert_eq!(detail.chapter_name, "Governance");
        assert_eq!(detail.stages[0].order, 1);
        assert_eq!(
            detail.stages[0].approver_groups,
            vec![
                ApproverRef {
                    role_id: "r1".into(),
                    role_name: "Editor".into()
                },
                ApproverRef {
                    role_id: "r2".into(),
                    role_name: "Owner".into()
                },
            ]
        );
    }
}
