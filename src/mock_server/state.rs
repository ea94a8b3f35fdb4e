//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Rollbar API server.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;

use crate::{Invite, Project};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Projects indexed by ID.
    pub projects: HashMap<u64, Project>,

    /// Invites indexed by ID.
    pub invites: HashMap<u64, Invite>,

    /// Page size used when serving invite listings.
    pub invites_per_page: usize,

    /// Optional authentication token. If set, GET and DELETE requests must
    /// carry it as the `access_token` query parameter.
    pub required_token: Option<String>,

    /// When set, invite listings fail with a 500 for this page number and
    /// every page after it.
    pub invites_failing_from_page: Option<u32>,

    /// Page numbers served by the invite listing endpoint, in request order.
    pub invite_pages_served: Vec<u32>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            projects: HashMap::new(),
            invites: HashMap::new(),
            invites_per_page: 20,
            required_token: None,
            invites_failing_from_page: None,
            invite_pages_served: Vec::new(),
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.id, project);
        self
    }

    /// Add an invite to the state.
    pub fn with_invite(mut self, invite: Invite) -> Self {
        self.invites.insert(invite.id, invite);
        self
    }

    /// Set the page size for invite listings.
    pub fn with_invites_per_page(mut self, per_page: usize) -> Self {
        self.invites_per_page = per_page;
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Make invite listings fail with a 500 from the given page onward.
    pub fn with_invites_failing_from_page(mut self, page: u32) -> Self {
        self.invites_failing_from_page = Some(page);
        self
    }

    /// Whether a request carrying `provided` as its token may proceed.
    pub fn token_accepted(&self, provided: Option<&str>) -> bool {
        match &self.required_token {
            Some(required) => provided == Some(required.as_str()),
            None => true,
        }
    }

    /// Get a project by ID.
    pub fn get_project(&self, id: u64) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Get an invite by ID.
    pub fn get_invite(&self, id: u64) -> Option<&Invite> {
        self.invites.get(&id)
    }

    /// List all projects in ID order.
    pub fn list_projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.id);
        projects
    }

    /// Serve one page of a team's invites, in ID order.
    ///
    /// `page` is 1-based; page 0 is served as page 1, matching the live
    /// service.
    pub fn list_invites_page(&self, team_id: u64, page: u32) -> Vec<Invite> {
        let page = page.max(1);
        let mut invites: Vec<Invite> = self
            .invites
            .values()
            .filter(|i| i.team_id == team_id)
            .cloned()
            .collect();
        invites.sort_by_key(|i| i.id);

        let start = (page as usize - 1) * self.invites_per_page;
        let end = (start + self.invites_per_page).min(invites.len());

        if start < invites.len() {
            invites[start..end].to_vec()
        } else {
            vec![]
        }
    }

    /// Create a project and return it.
    pub fn create_project(&mut self, name: String) -> Project {
        let id = self.projects.keys().max().copied().unwrap_or(0) + 1;
        let now = now_epoch();
        let project = Project {
            id,
            account_id: 8608,
            name,
            date_created: now,
            date_modified: now,
        };
        self.projects.insert(id, project.clone());
        project
    }

    /// Create a pending invite and return it.
    pub fn create_invite(&mut self, team_id: u64, email: String) -> Invite {
        let id = self.invites.keys().max().copied().unwrap_or(0) + 1;
        let invite = Invite {
            id,
            from_user_id: 8881,
            team_id,
            to_email: email,
            status: "pending".to_string(),
            date_created: now_epoch(),
            date_redeemed: 0,
        };
        self.invites.insert(id, invite.clone());
        invite
    }

    /// Remove a project; returns whether it existed.
    pub fn delete_project(&mut self, id: u64) -> bool {
        self.projects.remove(&id).is_some()
    }

    /// Remove an invite; returns whether it existed.
    pub fn delete_invite(&mut self, id: u64) -> bool {
        self.invites.remove(&id).is_some()
    }
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn state_add_and_get_project() {
        let state = MockState::new().with_project(Fixtures::project(12112, "Test Project"));

        let project = state.get_project(12112);
        assert!(project.is_some());
        assert_eq!(project.unwrap().name, "Test Project");
    }

    #[test]
    fn invite_pages_slice_in_id_order() {
        let state = MockState::new()
            .with_invite(Fixtures::invite(3, 666, "c@example.com"))
            .with_invite(Fixtures::invite(1, 666, "a@example.com"))
            .with_invite(Fixtures::invite(2, 666, "b@example.com"))
            .with_invite(Fixtures::invite(4, 999, "other-team@example.com"))
            .with_invites_per_page(2);

        let first = state.list_invites_page(666, 1);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].to_email, "a@example.com");
        assert_eq!(first[1].to_email, "b@example.com");

        let second = state.list_invites_page(666, 2);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].to_email, "c@example.com");

        assert!(state.list_invites_page(666, 3).is_empty());
    }

    #[test]
    fn invite_page_zero_serves_page_one() {
        let state = MockState::new()
            .with_invite(Fixtures::invite(1, 666, "a@example.com"))
            .with_invites_per_page(2);

        let zero = state.list_invites_page(666, 0);
        let one = state.list_invites_page(666, 1);
        assert_eq!(zero.len(), one.len());
        assert_eq!(zero[0].id, one[0].id);
    }

    #[test]
    fn token_check_only_applies_when_configured() {
        let open = MockState::new();
        assert!(open.token_accepted(None));
        assert!(open.token_accepted(Some("anything")));

        let locked = MockState::new().with_required_token("secret");
        assert!(locked.token_accepted(Some("secret")));
        assert!(!locked.token_accepted(Some("wrong")));
        assert!(!locked.token_accepted(None));
    }

    #[test]
    fn create_assigns_fresh_ids() {
        let mut state = MockState::new().with_invite(Fixtures::invite(10, 666, "a@example.com"));

        let created = state.create_invite(666, "b@example.com".to_string());
        assert_eq!(created.id, 11);
        assert_eq!(created.status, "pending");
        assert!(state.get_invite(11).is_some());
    }
}
