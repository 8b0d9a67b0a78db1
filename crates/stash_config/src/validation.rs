use std::net::IpAddr;

use http::Uri;

use crate::StashConfig;

/// Validation output for a loaded Stash configuration.
#[derive(Debug, Default)]
pub struct ConfigReport {
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl ConfigReport {
    /// Returns true when no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true when at least one error was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the collected warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the collected error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Render warnings and errors into a readable, multi-line string.
    pub fn format(&self) -> String {
        let mut out = String::new();
        if !self.errors.is_empty() {
            out.push_str("Errors:\n");
            for err in &self.errors {
                out.push_str("  - ");
                out.push_str(err);
                out.push('\n');
            }
        }
        if !self.warnings.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("Warnings:\n");
            for warn in &self.warnings {
                out.push_str("  - ");
                out.push_str(warn);
                out.push('\n');
            }
        }
        out
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Validate a Stash configuration and return a report of issues.
pub fn validate(cfg: &StashConfig) -> ConfigReport {
    let mut report = ConfigReport::default();

    validate_listen(cfg, &mut report);
    validate_origin(cfg, &mut report);
    validate_cache(cfg, &mut report);

    report
}

fn validate_listen(cfg: &StashConfig, report: &mut ConfigReport) {
    if cfg.proxy.port == 0 {
        report.error("--port is required (must be a number between 1 and 65535)");
    }

    let host = cfg.proxy.host.trim_start_matches('[').trim_end_matches(']');
    if host.parse::<IpAddr>().is_err() {
        report.warn(format!(
            "proxy.host '{}' is not an IP address; it will be resolved when binding",
            cfg.proxy.host
        ));
    }
}

fn validate_origin(cfg: &StashConfig, report: &mut ConfigReport) {
    let origin = cfg.proxy.origin.trim();
    if origin.is_empty() {
        report.error("--origin is required");
        return;
    }

    let uri = match origin.parse::<Uri>() {
        Ok(uri) => uri,
        Err(e) => {
            report.error(format!("--origin must be a valid URL ('{origin}': {e})"));
            return;
        }
    };

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => {
            report.error(format!(
                "--origin scheme '{other}' is not supported; use http or https"
            ));
        }
        None => {
            report.error(format!(
                "--origin must be an absolute URL with a scheme (got '{origin}')"
            ));
        }
    }

    if uri.authority().is_none() {
        report.error(format!("--origin '{origin}' has no host"));
    }

    if uri.query().is_some() {
        report.warn(format!(
            "--origin '{origin}' has a query string; request paths will be appended after it"
        ));
    }
}

fn validate_cache(cfg: &StashConfig, report: &mut ConfigReport) {
    if cfg.proxy.cache_ttl_secs != 60 {
        report.warn(format!(
            "proxy.cache_ttl_secs is {}; entries normally live 60 seconds",
            cfg.proxy.cache_ttl_secs
        ));
    }

    if cfg.proxy.cache_sweep_interval_secs == Some(0) {
        report.warn("proxy.cache_sweep_interval_secs is 0; background sweep is disabled");
    }

    if !cfg.proxy.stats_path.starts_with('/') {
        report.error(format!(
            "proxy.stats_path '{}' must start with '/'",
            cfg.proxy.stats_path
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::StashConfig;

    fn cfg(port: u16, origin: &str) -> StashConfig {
        StashConfig::default().with_overrides(Some(port), Some(origin.to_string()))
    }

    #[test]
    fn accepts_valid_port_and_origin() {
        let report = cfg(3000, "http://dummyjson.com").validate();
        assert!(report.is_ok(), "{}", report.format());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn missing_port_and_origin_are_errors() {
        let report = StashConfig::default().validate();
        assert!(report.has_errors());
        assert_eq!(report.errors().len(), 2);
        assert!(report.format().contains("--port is required"));
        assert!(report.format().contains("--origin is required"));
    }

    #[test]
    fn relative_or_odd_scheme_origin_is_rejected() {
        assert!(cfg(3000, "/just/a/path").validate().has_errors());
        assert!(cfg(3000, "ftp://files.example.com").validate().has_errors());
        assert!(cfg(3000, "not a url").validate().has_errors());
    }

    #[test]
    fn origin_with_query_is_a_warning() {
        let report = cfg(3000, "https://api.example.com?key=1").validate();
        assert!(report.is_ok());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn stats_path_must_be_absolute() {
        let mut c = cfg(3000, "http://localhost:4000");
        c.proxy.stats_path = "stats".into();
        assert!(c.validate().has_errors());
    }
}
