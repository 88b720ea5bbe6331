use crate::errors::CliError;
use crate::registry::builtin::{self, Entry};
use crate::services::logger::Logger;
use crate::services::resolver::Resolver;
use crate::services::validation::RawValue;
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "tunables")]
#[command(about = "Inspect internal option defaults and resolve candidate values")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the option table as JSON
    List {
        /// Only print this subsystem
        #[arg(long)]
        subsystem: Option<String>,
    },
    /// Resolve `subsystem.option[=value]` assignments
    Resolve {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Resolve a whole subsystem section given as a JSON object
    Section {
        subsystem: String,
        /// e.g. '{"sender_pool": 16}'
        #[arg(long, default_value = "{}")]
        json: String,
    },
    /// Rebuild the compiled-in table and report its size
    Check,
}

pub fn parse_assignment(input: &str) -> Result<(String, String, Option<RawValue>), CliError> {
    let (key, raw) = match input.split_once('=') {
        Some((key, raw)) => (key, Some(RawValue::from(raw))),
        None => (input, None),
    };
    let (subsystem, name) = key
        .trim()
        .split_once('.')
        .filter(|(s, n)| !s.is_empty() && !n.is_empty())
        .ok_or_else(|| {
            CliError::Usage(format!(
                "expected subsystem.option[=value], got {:?}",
                input
            ))
        })?;
    Ok((subsystem.to_string(), name.to_string(), raw))
}

pub fn execute(command: &Commands, resolver: &Resolver<'_>) -> Result<Value, CliError> {
    let registry = resolver.registry();
    match command {
        Commands::List { subsystem: None } => Ok(serde_json::to_value(registry.subsystems())?),
        Commands::List {
            subsystem: Some(name),
        } => Ok(serde_json::to_value(registry.subsystem(name)?)?),
        Commands::Resolve { assignments } => {
            let mut out = Vec::with_capacity(assignments.len());
            for assignment in assignments {
                let (subsystem, name, raw) = parse_assignment(assignment)?;
                out.push(resolver.resolve(&subsystem, &name, raw)?);
            }
            Ok(serde_json::to_value(out)?)
        }
        Commands::Section { subsystem, json } => {
            let parsed: Value = serde_json::from_str(json)?;
            let section = parsed
                .as_object()
                .ok_or_else(|| CliError::Usage("--json must be a JSON object".to_string()))?;
            Ok(serde_json::to_value(
                resolver.resolve_section(subsystem, section)?,
            )?)
        }
        Commands::Check => check_table(builtin::SUBSYSTEMS),
    }
}

// Builds a fresh registry so a defective table is reported, not panicked on.
pub fn check_table(table: &[(&str, &[Entry])]) -> Result<Value, CliError> {
    let built = builtin::build_from(table)?;
    Ok(serde_json::json!({
        "subsystems": built.subsystems().len(),
        "options": built.len(),
    }))
}

pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let output = match &cli.command {
        Commands::Check => check_table(builtin::SUBSYSTEMS)?,
        command => execute(command, &Resolver::builtin(Logger::new("tunables")))?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_table, execute, parse_assignment, Commands};
    use crate::registry::builtin::{self, Entry};
    use crate::services::logger::{LogLevel, Logger};
    use crate::services::resolver::Resolver;
    use crate::services::validation::RawValue;

    fn resolver() -> Resolver<'static> {
        Resolver::new(builtin::registry(), Logger::with_level("test", LogLevel::Error))
    }

    #[test]
    fn parses_assignments() {
        let (s, n, raw) = parse_assignment("remote.sender_pool=16").unwrap();
        assert_eq!((s.as_str(), n.as_str()), ("remote", "sender_pool"));
        assert_eq!(raw, Some(RawValue::Text("16".to_string())));

        let (_, _, raw) = parse_assignment("auth.logging").unwrap();
        assert!(raw.is_none());

        assert!(parse_assignment("sender_pool=16").is_err());
        assert!(parse_assignment(".x").is_err());
    }

    #[test]
    fn resolve_command_outputs_outcomes() {
        let out = execute(
            &Commands::Resolve {
                assignments: vec!["remote.sender_pool=1000".into(), "syscheck.logging".into()],
            },
            &resolver(),
        )
        .unwrap();
        assert_eq!(out[0]["value"], 64);
        assert_eq!(out[0]["outcome"], "clamped_to_max");
        assert_eq!(out[1]["outcome"], "used_default");
    }

    #[test]
    fn list_command_filters_by_subsystem() {
        let out = execute(
            &Commands::List {
                subsystem: Some("mail".into()),
            },
            &resolver(),
        )
        .unwrap();
        assert_eq!(out["name"], "mail");
        assert_eq!(out["options"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn check_command_counts_table() {
        let out = execute(&Commands::Check, &resolver()).unwrap();
        assert_eq!(out["subsystems"], 12);
        assert_eq!(out["options"], 76);
    }

    #[test]
    fn check_reports_defective_table_as_error() {
        const BROKEN: &[Entry] = &[("sender_pool", 100, 1, 64, "Number of sender threads.")];
        let err = check_table(&[("remote", BROKEN)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid option definition remote.sender_pool: default 100 is outside [1, 64]"
        );
    }

    #[test]
    fn section_command_rejects_non_object() {
        let err = execute(
            &Commands::Section {
                subsystem: "remote".into(),
                json: "[1]".into(),
            },
            &resolver(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }
}
