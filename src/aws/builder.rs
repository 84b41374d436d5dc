//! Builder for constructing AWS CLI command lines.
//!
//! Arguments are kept as a vector and handed to [`Command`] one by one, so
//! names and hosts from the configuration never pass through a shell.

use std::ffi::OsString;
use std::process::Command;

/// A `Name=<key>,Values=<value>` filter in AWS CLI shorthand syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Filter name, e.g. `tag:Name`.
    pub name: String,
    /// Single accepted value.
    pub value: String,
}

impl Filter {
    /// Filter on the value of a tag.
    pub fn tag(key: &str, value: &str) -> Self {
        Self {
            name: format!("tag:{}", key),
            value: value.to_string(),
        }
    }

    /// Filter on an arbitrary attribute.
    pub fn attribute(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Render as a single CLI argument.
    pub fn to_shorthand(&self) -> String {
        format!("Name={},Values={}", self.name, self.value)
    }
}

/// Builder for constructing AWS CLI command lines.
#[derive(Debug, Clone)]
pub struct AwsCommandBuilder {
    program: OsString,
    args: Vec<OsString>,
}

impl AwsCommandBuilder {
    /// Create a builder that runs `program` (normally `aws`).
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add a raw argument to the command line.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Select the credentials profile.
    pub fn profile(self, profile: &str) -> Self {
        self.arg("--profile").arg(profile)
    }

    /// Select service and operation, e.g. `ec2 describe-instances`.
    pub fn operation(self, service: &str, operation: &str) -> Self {
        self.arg(service).arg(operation)
    }

    /// Add a JMESPath projection.
    pub fn query(self, query: &str) -> Self {
        self.arg("--query").arg(query)
    }

    /// Add `--filters` followed by each filter.
    pub fn filters(mut self, filters: &[Filter]) -> Self {
        if filters.is_empty() {
            return self;
        }
        self = self.arg("--filters");
        for filter in filters {
            self = self.arg(filter.to_shorthand());
        }
        self
    }

    /// Request plain text output.
    pub fn output_text(self) -> Self {
        self.arg("--output").arg("text")
    }

    /// Add a `--name value` pair.
    pub fn option(self, name: &str, value: impl Into<OsString>) -> Self {
        self.arg(name).arg(value)
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Build the final Command.
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Get the command line as a string, quoted for copy-pasting into a shell.
    pub fn to_command_line(&self) -> String {
        let mut parts = vec![quote(&self.program.to_string_lossy())];
        for arg in &self.args {
            parts.push(quote(&arg.to_string_lossy()));
        }
        parts.join(" ")
    }
}

fn quote(s: &str) -> String {
    let needs_quoting = s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '*' | '[' | ']' | '{' | '}' | '$' | '`' | '\\' | ';' | '&' | '|'));
    if needs_quoting {
        format!("'{}'", s.replace('\'', "'\\''"))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_shorthand() {
        assert_eq!(
            Filter::tag("Name", "db-bastion").to_shorthand(),
            "Name=tag:Name,Values=db-bastion"
        );
        assert_eq!(
            Filter::attribute("instance-state-name", "running").to_shorthand(),
            "Name=instance-state-name,Values=running"
        );
    }

    #[test]
    fn test_builder_argument_order() {
        let builder = AwsCommandBuilder::new("aws")
            .profile("prod")
            .operation("ec2", "describe-instances")
            .query("Reservations[*].Instances[*].[InstanceId]")
            .filters(&[Filter::tag("Name", "db-bastion")])
            .output_text();

        let args: Vec<String> = builder
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--profile",
                "prod",
                "ec2",
                "describe-instances",
                "--query",
                "Reservations[*].Instances[*].[InstanceId]",
                "--filters",
                "Name=tag:Name,Values=db-bastion",
                "--output",
                "text",
            ]
        );
    }

    #[test]
    fn test_empty_filters_are_omitted() {
        let builder = AwsCommandBuilder::new("aws").filters(&[]);
        assert!(builder.args().is_empty());
    }

    #[test]
    fn test_command_line_quotes_special_arguments() {
        let builder = AwsCommandBuilder::new("aws")
            .query("VpcEndpoints[0].DnsEntries[0].DnsName")
            .option("--parameters", r#"{"host":["db"]}"#)
            .arg("it's");

        let line = builder.to_command_line();
        assert!(line.starts_with("aws --query 'VpcEndpoints[0].DnsEntries[0].DnsName'"));
        assert!(line.contains(r#"'{"host":["db"]}'"#));
        assert!(line.contains(r#"'it'\''s'"#));
    }

    #[test]
    fn test_build_uses_program_and_args() {
        let builder = AwsCommandBuilder::new("/usr/local/bin/aws").profile("dev");
        let cmd = builder.build();
        assert_eq!(cmd.get_program(), "/usr/local/bin/aws");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["--profile", "dev"]);
    }
}
