//! Stable identifiers for checks and result codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_PACKAGE_INSTALLED: &str = "host.package_installed";
pub const CHECK_GROUP_EXISTS: &str = "host.group_exists";
pub const CHECK_USER_EXISTS: &str = "host.user_exists";
pub const CHECK_FILE_EXISTS: &str = "host.file_exists";
pub const CHECK_SYMLINK_TARGET: &str = "host.symlink_target";
pub const CHECK_PATH_OWNERSHIP: &str = "host.path_ownership";
pub const CHECK_SERVICE_STATE: &str = "host.service_state";
pub const CHECK_COMMAND_STATUS: &str = "host.command_status";

// Codes: host.package_installed
pub const CODE_PACKAGE_MISSING: &str = "package_missing";

// Codes: host.group_exists, host.user_exists
pub const CODE_GROUP_MISSING: &str = "group_missing";
pub const CODE_USER_MISSING: &str = "user_missing";
pub const CODE_PRIMARY_GROUP_MISMATCH: &str = "primary_group_mismatch";

// Codes: host.file_exists, host.symlink_target, host.path_ownership
pub const CODE_PATH_MISSING: &str = "path_missing";
pub const CODE_NOT_A_SYMLINK: &str = "not_a_symlink";
pub const CODE_LINK_TARGET_MISMATCH: &str = "link_target_mismatch";
pub const CODE_OWNER_MISMATCH: &str = "owner_mismatch";
pub const CODE_GROUP_MISMATCH: &str = "group_mismatch";

// Codes: host.service_state
pub const CODE_SERVICE_RUNNING_MISMATCH: &str = "service_running_mismatch";
pub const CODE_SERVICE_ENABLED_MISMATCH: &str = "service_enabled_mismatch";

// Codes: host.command_status
pub const CODE_EXIT_STATUS_MISMATCH: &str = "exit_status_mismatch";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
pub const CODE_PROVIDER_UNAVAILABLE: &str = "provider_unavailable";

// Verdict reasons
pub const REASON_CHECKS_FAILED: &str = "checks_failed";
pub const REASON_HOST_ERROR: &str = "host_error";
pub const REASON_TOOL_ERROR: &str = "tool_error";
