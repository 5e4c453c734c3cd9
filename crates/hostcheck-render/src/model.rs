#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableHostStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableCheckStatus {
    Pass,
    Fail,
    Skip,
}

impl RenderableCheckStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl RenderableHostStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableMismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCheck {
    pub role: String,
    pub check_id: String,
    pub code: Option<String>,
    pub subject: String,
    pub status: RenderableCheckStatus,
    pub message: String,
    pub mismatches: Vec<RenderableMismatch>,
    pub disabled_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableHost {
    pub target: String,
    pub status: RenderableHostStatus,
    pub error: Option<String>,
    pub checks: Vec<RenderableCheck>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub suite: String,
    pub roles: Vec<String>,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub errored_hosts: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub hosts: Vec<RenderableHost>,
    pub data: RenderableData,
}
