use crate::validation::{ValidationErrorCategory, ValidationIssue, ValidationIssues};

use super::{AppConfig, Credentials, DeploymentSettings, ServiceSettings};

impl AppConfig {
    /// Full validation for the `AppConfig`
    ///
    /// Errors make every remote command unrunnable; warnings only affect some commands.
    #[must_use]
    pub fn validate(&self) -> ValidationIssues {
        let mut issues = Vec::new();

        issues.extend(required(
            "inventory",
            &self.inventory.to_string_lossy(),
            "Ex. `inventory: inventory/hosts.ini`",
        ));
        issues.extend(required(
            "target_group",
            self.target_group.as_str(),
            "Ex. `target_group: webservers`",
        ));
        issues.extend(required("backend", &self.backend, "Ex. `backend: ansible`"));

        issues.extend(validate_credentials(&self.credentials));
        issues.extend(validate_service(&self.service));
        issues.extend(validate_deployment(&self.deployment));

        issues.into()
    }
}

fn required(field: &str, value: &str, example: &str) -> Option<ValidationIssue> {
    value.trim().is_empty().then(|| {
        ValidationIssue::error(
            ValidationErrorCategory::RequiredField,
            field,
            &format!("The `{field}` field exists, but has no value"),
            Some(&format!("Set a value for `{field}`. {example}")),
        )
    })
}

/// Unit names reach the remote shell unquoted; only plain systemd unit-name characters pass
fn unit_name(field: &str, value: &str) -> Option<ValidationIssue> {
    let is_unit_char =
        |c: char| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.' | '@');

    (!value.is_empty() && !value.chars().all(is_unit_char)).then(|| {
        ValidationIssue::error(
            ValidationErrorCategory::InvalidValue,
            field,
            &format!("`{value}` is not a valid systemd unit name"),
            Some("Use only letters, digits and `:-_.@`. Ex. `rantoo` or `rantoo@web`"),
        )
    })
}

fn validate_credentials(credentials: &Credentials) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    issues.extend(required(
        "credentials.remote_user",
        &credentials.remote_user,
        "Ex. `remote_user: deploy`",
    ));

    let private_key = credentials.private_key.to_string_lossy();
    if private_key.is_empty() {
        issues.push(ValidationIssue::warning(
            ValidationErrorCategory::RequiredField,
            "credentials.private_key",
            "No private key configured; the backend will fall back to its own defaults",
            Some("Ex. `private_key: ~/.ssh/id_rsa`"),
        ));
    } else if credentials.private_key.is_relative() && !private_key.starts_with('~') {
        issues.push(ValidationIssue::warning(
            ValidationErrorCategory::PathFormat,
            "credentials.private_key",
            "The private key path is relative to the current directory",
            Some("Provide an absolute path or one starting with `~`"),
        ));
    }

    issues
}

fn validate_service(service: &ServiceSettings) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    issues.extend(required(
        "service.name",
        &service.name,
        "Ex. `name: rantoo`",
    ));
    issues.extend(unit_name("service.name", &service.name));

    if let Some(log_source) = service.log_source.as_deref() {
        issues.extend(required(
            "service.log_source",
            log_source,
            "Ex. `log_source: rantoo`",
        ));
        issues.extend(unit_name("service.log_source", log_source));
    }

    if service.log_lines == 0 {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::InvalidValue,
            "service.log_lines",
            "The log window must contain at least one line",
            Some("Ex. `log_lines: 50`"),
        ));
    }

    if service.health_port == 0 {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::InvalidValue,
            "service.health_port",
            "Port 0 cannot be probed",
            Some("Ex. `health_port: 33081`"),
        ));
    }

    if !service.health_path.starts_with('/') {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::UrlFormat,
            "service.health_path",
            "The health path must start with `/`",
            Some("Ex. `health_path: /health`"),
        ));
    } else if service.health_url().is_err() {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::UrlFormat,
            "service.health_host",
            "The health host and port do not form a valid URL",
            Some("Ex. `health_host: localhost`"),
        ));
    }

    issues
}

fn validate_deployment(deployment: &DeploymentSettings) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if deployment.source_repo.trim().is_empty() {
        issues.push(ValidationIssue::warning(
            ValidationErrorCategory::RequiredField,
            "deployment.source_repo",
            "No source repository configured; `update` cannot sync code",
            Some("Ex. `source_repo: https://git.example.com/rantoo.git`"),
        ));
    }

    if !deployment.app_path.is_absolute() {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::PathFormat,
            "deployment.app_path",
            "The remote application path must be absolute",
            Some("Ex. `app_path: /opt/rantoo`"),
        ));
    }

    issues
}
