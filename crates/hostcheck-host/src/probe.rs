//! Shell probes issued by [`crate::CommandHost`], one per query.

/// Quote `value` for a POSIX shell, always with single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// How a probe's exit status maps to an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Expect {
    /// 0 is true, any status in the list is false, everything else is an error.
    Boolean { false_on: &'static [i32] },
    /// 0 yields trimmed stdout, everything else is an error.
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Probe {
    pub script: String,
    pub expect: Expect,
}

/// Exit status of the package probe when no known package manager exists.
pub(crate) const NO_PACKAGE_MANAGER: i32 = 3;

impl Probe {
    fn boolean(script: String, false_on: &'static [i32]) -> Self {
        Self {
            script,
            expect: Expect::Boolean { false_on },
        }
    }

    fn text(script: String) -> Self {
        Self {
            script,
            expect: Expect::Text,
        }
    }

    pub fn package_installed(name: &str) -> Self {
        let q = shell_quote(name);
        Self::boolean(
            format!(
                "if command -v rpm >/dev/null 2>&1; then rpm -q {q} >/dev/null 2>&1 || exit 1; \
                 elif command -v dpkg-query >/dev/null 2>&1; then \
                 dpkg-query -W -f='${{Status}}' {q} 2>/dev/null | grep -q 'ok installed' || exit 1; \
                 elif command -v apk >/dev/null 2>&1; then apk info -e {q} >/dev/null 2>&1 || exit 1; \
                 else exit {NO_PACKAGE_MANAGER}; fi"
            ),
            &[1],
        )
    }

    /// `getent` exits 2 when the key is not in the database.
    pub fn group_exists(name: &str) -> Self {
        Self::boolean(format!("getent group {} >/dev/null", shell_quote(name)), &[2])
    }

    pub fn user_exists(name: &str) -> Self {
        Self::boolean(format!("getent passwd {} >/dev/null", shell_quote(name)), &[2])
    }

    pub fn primary_group(user: &str) -> Self {
        Self::text(format!("id -gn -- {}", shell_quote(user)))
    }

    pub fn file_exists(path: &str) -> Self {
        Self::boolean(format!("test -e {}", shell_quote(path)), &[1])
    }

    pub fn is_symlink(path: &str) -> Self {
        Self::boolean(format!("test -L {}", shell_quote(path)), &[1])
    }

    /// Fully resolved target, following every link in the chain.
    pub fn link_target(path: &str) -> Self {
        Self::text(format!("readlink -f -- {}", shell_quote(path)))
    }

    pub fn owner(path: &str) -> Self {
        Self::text(format!("stat -c %U -- {}", shell_quote(path)))
    }

    pub fn owner_group(path: &str) -> Self {
        Self::text(format!("stat -c %G -- {}", shell_quote(path)))
    }

    /// `is-active` exits 3 for inactive units and 4 for unknown ones.
    pub fn service_running(name: &str) -> Self {
        Self::boolean(
            format!("systemctl is-active -q -- {}", shell_quote(name)),
            &[1, 3, 4],
        )
    }

    pub fn service_enabled(name: &str) -> Self {
        Self::boolean(
            format!("systemctl is-enabled -q -- {}", shell_quote(name)),
            &[1, 4],
        )
    }
}
