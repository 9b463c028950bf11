//! HTTP client for the plan server.
//!
//! Implements the three collaborator traits from `changes-core` against the
//! plan server's JSON API:
//!
//! | Operation  | Request                                         |
//! |------------|-------------------------------------------------|
//! | snapshot   | `GET   /plans/{plan}/{branch}/current_plan`     |
//! | reject     | `PATCH /plans/{plan}/{branch}/reject_file`      |
//! | apply all  | `PATCH /plans/{plan}/{branch}/apply`            |
//!
//! Error responses carry `{"type": ..., "status": ..., "msg": ...}`; `type`
//! becomes the opaque error code on [`RejectError`].

use changes_core::{
    ApplyCoordinator, ApplyError, ApplyFlags, BackendError, FileRejector, PlanChangeSet,
    PlanProvider, PlanRef, RejectError,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Plan server client. Cheap to share by reference; one instance per process.
pub struct PlanClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentPlanResponse {
    plan_result: PlanResultBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanResultBody {
    #[serde(default)]
    sorted_paths: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectFileRequest<'a> {
    file_path: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyRequest {
    auto_confirm: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    msg: String,
}

/// Message and optional code decoded from a failed response.
#[derive(Debug, PartialEq, Eq)]
struct ApiFailure {
    status: u16,
    msg: String,
    code: Option<String>,
}

impl PlanClient {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            auth_token,
        }
    }

    fn url(&self, plan: &PlanRef, action: &str) -> String {
        format!(
            "{}/plans/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            plan.plan_id,
            plan.branch,
            action
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let req = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Reads a non-success response into an [`ApiFailure`].
async fn read_failure(resp: Response) -> ApiFailure {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    decode_failure(status, &body)
}

/// Decodes a server error body, falling back to the raw text when it is not
/// the expected JSON shape and to the status code when it is empty.
fn decode_failure(status: u16, body: &str) -> ApiFailure {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => ApiFailure {
            status,
            msg: err.msg,
            code: err.kind,
        },
        Err(_) => {
            let trimmed = body.trim();
            let msg = if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_owned()
            };
            ApiFailure {
                status,
                msg,
                code: None,
            }
        }
    }
}

impl PlanProvider for PlanClient {
    async fn current_change_set(&self, plan: &PlanRef) -> Result<PlanChangeSet, BackendError> {
        let resp = self
            .request(Method::GET, self.url(plan, "current_plan"))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let failure = read_failure(resp).await;
            return Err(BackendError::Server {
                status: failure.status,
                msg: failure.msg,
            });
        }

        let body: CurrentPlanResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        info!(
            plan_id = %plan.plan_id,
            branch = %plan.branch,
            files = body.plan_result.sorted_paths.len(),
            "loaded current plan"
        );
        Ok(PlanChangeSet::new(body.plan_result.sorted_paths))
    }
}

impl FileRejector for PlanClient {
    async fn reject_file(&self, plan: &PlanRef, path: &str) -> Result<(), RejectError> {
        let resp = self
            .request(Method::PATCH, self.url(plan, "reject_file"))
            .json(&RejectFileRequest { file_path: path })
            .send()
            .await
            .map_err(|e| RejectError::new(e.to_string()))?;

        if resp.status().is_success() {
            info!(%path, "rejected pending change");
            return Ok(());
        }

        let failure = read_failure(resp).await;
        warn!(%path, status = failure.status, msg = %failure.msg, "reject failed");
        Err(RejectError {
            msg: failure.msg,
            code: failure.code,
        })
    }
}

impl ApplyCoordinator for PlanClient {
    async fn apply_all(&self, plan: &PlanRef, flags: ApplyFlags) -> Result<(), ApplyError> {
        let resp = self
            .request(Method::PATCH, self.url(plan, "apply"))
            .json(&ApplyRequest {
                auto_confirm: flags.auto_confirm,
            })
            .send()
            .await
            .map_err(|e| ApplyError::new(e.to_string()))?;

        if resp.status().is_success() {
            info!(plan_id = %plan.plan_id, branch = %plan.branch, "applied pending changes");
            return Ok(());
        }

        let failure = read_failure(resp).await;
        Err(ApplyError::new(failure.msg))
    }
}
