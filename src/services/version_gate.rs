//! Host tooling version gate.
//!
//! The addon refuses to run against host tooling older than a fixed minimum.
//! Each requirement is strict: the installed version must be *above* the
//! recorded version, mirroring how the host's version checker asserts it.

use indexmap::IndexMap;
use semver::Version;
use thiserror::Error;

/// Errors raised when host tooling does not satisfy the gate
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionGateError {
    #[error("{addon}: {message} ({tool} is not installed)")]
    MissingTool {
        addon: String,
        tool: String,
        message: String,
    },

    #[error("{addon}: cannot parse {tool} version '{version}': {reason}")]
    InvalidVersion {
        addon: String,
        tool: String,
        version: String,
        reason: String,
    },

    #[error("{addon}: {message} (found {tool} {installed})")]
    BelowMinimum {
        addon: String,
        tool: String,
        installed: String,
        message: String,
    },
}

/// A single "installed version must be above" requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement {
    pub tool: String,
    pub above: Version,
    pub message: String,
}

/// Ordered set of host tooling requirements for one addon.
#[derive(Debug, Clone)]
pub struct VersionGate {
    addon: String,
    requirements: Vec<VersionRequirement>,
}

impl VersionGate {
    /// Gate with no requirements.
    pub fn new(addon: impl Into<String>) -> Self {
        Self {
            addon: addon.into(),
            requirements: Vec::new(),
        }
    }

    /// The requirements the editor addon ships with: ember-cli and ember-source 3.20+.
    pub fn host_tooling(addon: impl Into<String>) -> Self {
        Self::new(addon)
            .require_above(
                "ember-cli",
                Version::new(3, 19, 0),
                "Minimum ember-cli version is 3.20.0",
            )
            .require_above(
                "ember-source",
                Version::new(3, 19, 0),
                "Minimum ember.js version is 3.20.0",
            )
    }

    pub fn require_above(
        mut self,
        tool: impl Into<String>,
        above: Version,
        message: impl Into<String>,
    ) -> Self {
        self.requirements.push(VersionRequirement {
            tool: tool.into(),
            above,
            message: message.into(),
        });
        self
    }

    /// Check every requirement against the installed versions, stopping at the first failure.
    pub fn check(&self, installed: &IndexMap<String, String>) -> Result<(), VersionGateError> {
        for requirement in &self.requirements {
            let Some(raw) = installed.get(&requirement.tool) else {
                return Err(VersionGateError::MissingTool {
                    addon: self.addon.clone(),
                    tool: requirement.tool.clone(),
                    message: requirement.message.clone(),
                });
            };

            let version =
                parse_installed(raw).map_err(|err| VersionGateError::InvalidVersion {
                    addon: self.addon.clone(),
                    tool: requirement.tool.clone(),
                    version: raw.clone(),
                    reason: err.to_string(),
                })?;

            if version <= requirement.above {
                return Err(VersionGateError::BelowMinimum {
                    addon: self.addon.clone(),
                    tool: requirement.tool.clone(),
                    installed: version.to_string(),
                    message: requirement.message.clone(),
                });
            }

            tracing::debug!("{} {} > {}", requirement.tool, version, requirement.above);
        }

        Ok(())
    }
}

/// Parse an installed version, accepting a leading `v` and `major.minor` shorthand.
fn parse_installed(raw: &str) -> Result<Version, semver::Error> {
    let trimmed = raw.trim().trim_start_matches('v');
    // Only the numeric core is padded; `-pre` and `+build` suffixes stay intact.
    let (core, suffix) = match trimmed.find(['-', '+']) {
        Some(at) => trimmed.split_at(at),
        None => (trimmed, ""),
    };
    let padding = match core.split('.').count() {
        1 => ".0.0",
        2 => ".0",
        _ => "",
    };
    Version::parse(&format!("{core}{padding}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(cli: &str, source: &str) -> IndexMap<String, String> {
        let mut versions = IndexMap::new();
        versions.insert("ember-cli".to_string(), cli.to_string());
        versions.insert("ember-source".to_string(), source.to_string());
        versions
    }

    #[test]
    fn test_recent_tooling_passes() {
        let gate = VersionGate::host_tooling("ember-froala-editor");
        assert!(gate.check(&installed("3.28.6", "4.12.0")).is_ok());
        assert!(gate.check(&installed("v3.20", "3.20.0-beta.1")).is_ok());
    }

    #[test]
    fn test_minimum_is_exclusive() {
        let gate = VersionGate::host_tooling("ember-froala-editor");
        let err = gate.check(&installed("3.19.0", "4.0.0")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ember-froala-editor: Minimum ember-cli version is 3.20.0 (found ember-cli 3.19.0)"
        );
    }

    #[test]
    fn test_old_ember_source_fails() {
        let gate = VersionGate::host_tooling("ember-froala-editor");
        let err = gate.check(&installed("3.28.0", "3.16.1")).unwrap_err();
        assert!(matches!(err, VersionGateError::BelowMinimum { ref tool, .. } if tool == "ember-source"));
    }

    #[test]
    fn test_missing_tool_fails() {
        let gate = VersionGate::host_tooling("ember-froala-editor");
        let mut versions = installed("3.28.0", "3.28.0");
        versions.shift_remove("ember-source");

        let err = gate.check(&versions).unwrap_err();
        assert!(matches!(err, VersionGateError::MissingTool { .. }));
    }

    #[test]
    fn test_unparseable_version_fails() {
        let gate = VersionGate::host_tooling("ember-froala-editor");
        let err = gate.check(&installed("latest", "3.28.0")).unwrap_err();
        assert!(matches!(err, VersionGateError::InvalidVersion { .. }));
    }

    #[test]
    fn test_shorthand_prerelease_is_padded_before_suffix() {
        assert_eq!(
            parse_installed("3.20-beta.1").unwrap(),
            Version::parse("3.20.0-beta.1").unwrap()
        );
        assert_eq!(
            parse_installed("v4+build.7").unwrap(),
            Version::parse("4.0.0+build.7").unwrap()
        );

        let gate = VersionGate::host_tooling("ember-froala-editor");
        assert!(gate.check(&installed("3.20-beta.1", "3.28.0")).is_ok());

        let err = gate.check(&installed("3.19-beta.1", "3.28.0")).unwrap_err();
        assert!(matches!(err, VersionGateError::BelowMinimum { .. }));
    }

    #[test]
    fn test_empty_gate_always_passes() {
        assert!(VersionGate::new("x").check(&IndexMap::new()).is_ok());
    }
}
