//! Jira REST v2 gateway.
//!
//! Wire shapes stay private to this module; every public surface speaks
//! `switchyard-core` types. Child stories are fetched with
//! `parent = <epic> AND issuetype = Story ORDER BY rank`, which is the
//! board order users see — that order flows through unchanged and drives
//! deterministic engine and manifest output.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use switchyard_core::{
    Epic, FixVersion, Issue, IssueKey, IssueKind, IssueStatus, ProjectKey, TrackerError,
    TrackerGateway, VersionId,
};

use crate::config::JiraConfig;

const ISSUE_FIELDS: &str = "summary,status,labels,fixVersions,issuetype";
const MAX_RESULTS: &str = "100";

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// A [`TrackerGateway`] backed by the Jira REST API.
///
/// Holds a pooled HTTP agent; create once and reuse. The request timeout is
/// fixed here — callers never configure transport policy.
pub struct JiraGateway {
    agent: ureq::Agent,
    host: String,
    auth_header: String,
}

impl JiraGateway {
    pub fn new(config: &JiraConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        JiraGateway {
            agent,
            host: config.host.trim_end_matches('/').to_string(),
            auth_header: basic_auth_header(&config.user_email, &config.api_token),
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}{}", self.host, path);
        self.agent
            .request(method, &url)
            .set("Authorization", &self.auth_header)
            .set("Accept", "application/json")
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        request: ureq::Request,
        key: &str,
    ) -> Result<T, TrackerError> {
        let response = request.call().map_err(|err| map_transport_error(err, key))?;
        response
            .into_json::<T>()
            .map_err(|err| TrackerError::unavailable(format!("malformed tracker response: {err}")))
    }

    fn search(&self, jql: &str, key: &str) -> Result<Vec<WireIssue>, TrackerError> {
        tracing::debug!(jql, "tracker search");
        let request = self
            .request("GET", "/rest/api/2/search")
            .query("jql", jql)
            .query("fields", ISSUE_FIELDS)
            .query("maxResults", MAX_RESULTS);
        let page: SearchPage = self.get_json(request, key)?;
        Ok(page.issues)
    }

    fn fetch_issue(&self, key: &IssueKey) -> Result<WireIssue, TrackerError> {
        let request = self
            .request("GET", &format!("/rest/api/2/issue/{key}"))
            .query("fields", ISSUE_FIELDS);
        self.get_json(request, &key.0)
    }

    fn fetch_stories(&self, epic_key: &IssueKey) -> Result<Vec<Issue>, TrackerError> {
        let jql = format!("parent = {epic_key} AND issuetype = Story ORDER BY rank");
        let issues = self.search(&jql, &epic_key.0)?;
        Ok(issues.into_iter().map(map_issue).collect())
    }
}

impl TrackerGateway for JiraGateway {
    fn get_epic(&self, key: &IssueKey) -> Result<Epic, TrackerError> {
        let issue = map_issue(self.fetch_issue(key)?);
        if issue.kind != IssueKind::Epic {
            return Err(TrackerError::not_found(key.0.clone()));
        }
        let stories = self.fetch_stories(key)?;
        Ok(Epic { issue, stories })
    }

    fn get_fix_version(&self, key: &IssueKey) -> Result<Option<FixVersion>, TrackerError> {
        let issue = map_issue(self.fetch_issue(key)?);
        Ok(issue.fix_version)
    }

    fn assign_fix_version(&self, key: &IssueKey, version: &VersionId) -> Result<(), TrackerError> {
        tracing::info!("assigning {version} to {key}");
        let body = serde_json::json!({
            "fields": { "fixVersions": [ { "id": version.0 } ] }
        });
        self.request("PUT", &format!("/rest/api/2/issue/{key}"))
            .send_json(body)
            .map_err(|err| match err {
                ureq::Error::Status(400, _) => TrackerError::InvalidVersion {
                    key: key.clone(),
                    version: version.clone(),
                },
                other => map_transport_error(other, &key.0),
            })?;
        Ok(())
    }

    fn list_unreleased_versions(
        &self,
        project: &ProjectKey,
    ) -> Result<Vec<FixVersion>, TrackerError> {
        let request = self.request("GET", &format!("/rest/api/2/project/{project}/versions"));
        let versions: Vec<WireVersion> = self.get_json(request, &project.0)?;
        Ok(versions
            .into_iter()
            .filter(|v| !v.released && !v.archived)
            .map(map_version)
            .collect())
    }

    fn list_epics_for_version(
        &self,
        project: &ProjectKey,
        version: &VersionId,
    ) -> Result<Vec<Epic>, TrackerError> {
        let jql =
            format!("project = {project} AND issuetype = Epic AND fixVersion = {version} ORDER BY key");
        let issues = self.search(&jql, &project.0)?;
        let mut epics = Vec::with_capacity(issues.len());
        for wire in issues {
            let issue = map_issue(wire);
            let stories = self.fetch_stories(&issue.key)?;
            epics.push(Epic { issue, stories });
        }
        Ok(epics)
    }

    fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), TrackerError> {
        self.request("POST", &format!("/rest/api/2/issue/{key}/comment"))
            .send_json(serde_json::json!({ "body": body }))
            .map_err(|err| map_transport_error(err, &key.0))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Auth and error mapping
// ---------------------------------------------------------------------------

fn basic_auth_header(user_email: &str, api_token: &str) -> String {
    use base64::Engine as _;
    const ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;
    let credentials = ENGINE.encode(format!("{user_email}:{api_token}"));
    format!("Basic {credentials}")
}

fn map_transport_error(err: ureq::Error, key: &str) -> TrackerError {
    match err {
        ureq::Error::Status(404, _) => TrackerError::not_found(key),
        ureq::Error::Status(401 | 403, response) => TrackerError::PermissionDenied {
            detail: format!("HTTP {} for '{key}'", response.status()),
        },
        ureq::Error::Status(code, _) => {
            TrackerError::unavailable(format!("HTTP {code} for '{key}'"))
        }
        ureq::Error::Transport(transport) => TrackerError::unavailable(transport.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    issues: Vec<WireIssue>,
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    key: String,
    fields: WireFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFields {
    summary: Option<String>,
    status: Option<WireStatus>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    fix_versions: Vec<WireVersion>,
    issuetype: Option<WireIssueType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireStatus {
    name: String,
    status_category: Option<WireStatusCategory>,
}

#[derive(Debug, Deserialize)]
struct WireStatusCategory {
    key: String,
}

#[derive(Debug, Deserialize)]
struct WireIssueType {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVersion {
    id: String,
    name: String,
    #[serde(default)]
    released: bool,
    #[serde(default)]
    archived: bool,
    release_date: Option<String>,
}

fn map_issue(wire: WireIssue) -> Issue {
    let kind = match wire.fields.issuetype {
        Some(ref t) if t.name.eq_ignore_ascii_case("epic") => IssueKind::Epic,
        _ => IssueKind::Story,
    };
    // Jira allows several fix versions; reconciliation treats the first as
    // the assignment, matching how release boards read the field.
    let fix_version = wire.fields.fix_versions.first().cloned().map(map_version);
    Issue {
        key: IssueKey::from(wire.key),
        kind,
        summary: wire.fields.summary.unwrap_or_default(),
        status: map_status(wire.fields.status.as_ref()),
        labels: wire.fields.labels,
        fix_version,
    }
}

fn map_status(status: Option<&WireStatus>) -> IssueStatus {
    let Some(status) = status else {
        return IssueStatus::Open;
    };
    let done_category = status
        .status_category
        .as_ref()
        .is_some_and(|c| c.key == "done");
    if done_category || status.name.eq_ignore_ascii_case("done") {
        IssueStatus::Closed
    } else {
        IssueStatus::Open
    }
}

fn map_version(wire: WireVersion) -> FixVersion {
    let release_date = wire
        .release_date
        .as_deref()
        .and_then(|raw| chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
    FixVersion {
        id: VersionId::from(wire.id),
        name: wire.name,
        released: wire.released,
        release_date,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
