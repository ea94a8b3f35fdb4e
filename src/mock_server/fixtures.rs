//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data. Project
//! values mirror a captured `/projects` listing; invite values mirror a
//! captured team-invites page.

use crate::{Invite, Project};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a project with the captured account and timestamps.
    pub fn project(id: u64, name: &str) -> Project {
        Project {
            id,
            account_id: 8608,
            name: name.to_string(),
            date_created: 1407933721,
            date_modified: 1457475137,
        }
    }

    // =========================================================================
    // Invite Fixtures
    // =========================================================================

    /// Create a pending invite.
    pub fn invite(id: u64, team_id: u64, to_email: &str) -> Invite {
        Invite {
            id,
            from_user_id: 8881,
            team_id,
            to_email: to_email.to_string(),
            status: "pending".to_string(),
            date_created: 1554395981,
            date_redeemed: 0,
        }
    }

    /// Create an invite that has already been accepted.
    pub fn redeemed_invite(id: u64, team_id: u64, to_email: &str) -> Invite {
        let mut invite = Self::invite(id, team_id, to_email);
        invite.status = "accepted".to_string();
        invite.date_redeemed = 1554482381;
        invite
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The default data a freshly started server carries.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            projects: vec![
                Self::project(12112, ""),
                Self::project(12116, "My"),
                Self::project(106671, "Client-Config"),
            ],
            invites: vec![
                Self::invite(125522, 666, "alpha@example.com"),
                Self::invite(125523, 666, "beta@example.com"),
                Self::redeemed_invite(125524, 666, "gamma@example.com"),
            ],
        }
    }
}

/// Data set used to seed a default mock server.
pub struct DefaultScenario {
    pub projects: Vec<Project>,
    pub invites: Vec<Invite>,
}
