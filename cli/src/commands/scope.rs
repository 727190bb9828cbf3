use scanctx_core::api::{ContextConfig, ScopeMatcher, ScopeVerdict};

use super::cli::{OutputFormat, ScopeArgs};
use crate::error::CliError;

/// Exit status 0 when every URL is in scope, 3 otherwise.
pub fn run(cfg: &ContextConfig, args: &ScopeArgs, format: OutputFormat) -> Result<i32, CliError> {
    let matcher = ScopeMatcher::from_config(&cfg.scope)?;

    let verdicts: Vec<ScopeVerdict> = args.urls.iter().map(|u| matcher.explain(u)).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verdicts)?),
        OutputFormat::Text => {
            for v in &verdicts {
                println!("{}", format_verdict(v));
            }
        }
    }

    Ok(if verdicts.iter().all(|v| v.in_scope) { 0 } else { 3 })
}

fn format_verdict(v: &ScopeVerdict) -> String {
    match (&v.matched_include, &v.matched_exclude) {
        (_, Some(exc)) => format!("out  {} (excluded by {exc})", v.url),
        (Some(inc), None) => format!("in   {} (included by {inc})", v.url),
        (None, None) => format!("out  {} (no include pattern matches)", v.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanctx_core::api::ContextError;

    #[test]
    fn test_format_verdict() {
        let mut m = ScopeMatcher::new();
        m.add_include("http://x/api/.*").unwrap();
        m.add_exclude(".*/actuator/.*").unwrap();

        assert_eq!(
            format_verdict(&m.explain("http://x/api/a")),
            "in   http://x/api/a (included by http://x/api/.*)"
        );
        assert_eq!(
            format_verdict(&m.explain("http://x/api/actuator/env")),
            "out  http://x/api/actuator/env (excluded by .*/actuator/.*)"
        );
        assert_eq!(
            format_verdict(&m.explain("http://x/static/a")),
            "out  http://x/static/a (no include pattern matches)"
        );
    }

    #[test]
    fn test_exit_status_reflects_verdicts() {
        let cfg = ContextConfig::default();
        let all_in = ScopeArgs {
            urls: vec!["http://localhost:8080/api/customers".into()],
        };
        assert_eq!(run(&cfg, &all_in, OutputFormat::Json).unwrap(), 0);

        let mixed = ScopeArgs {
            urls: vec![
                "http://localhost:8080/api/customers".into(),
                "http://169.254.169.254/latest/meta-data/".into(),
            ],
        };
        assert_eq!(run(&cfg, &mixed, OutputFormat::Text).unwrap(), 3);
    }

    #[test]
    fn test_empty_include_list_is_an_error() {
        let mut cfg = ContextConfig::default();
        cfg.scope.include.clear();
        let args = ScopeArgs {
            urls: vec!["http://localhost:8080/api/customers".into()],
        };
        let err = run(&cfg, &args, OutputFormat::Text).unwrap_err();
        assert!(matches!(
            err,
            CliError::Context(ContextError::MissingField(ref f)) if f == "scope.include"
        ));
    }
}
