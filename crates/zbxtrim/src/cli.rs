use clap::{Parser, Subcommand, ValueEnum};
use zbxtrim_core::{SelectionPolicy, TOP_ITEMS_PER_TEMPLATE, TOP_TEMPLATES};

#[derive(Parser)]
#[command(name = "zbxtrim")]
#[command(version)]
#[command(about = "Inspect and shorten history/trends retention on Zabbix templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report retention settings without changing anything
    Analyze {
        /// Only inspect the items of this template ID
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Shorten over-long retention values after confirmation
    Update {
        /// Which items to select
        #[arg(long, value_enum, default_value_t = PolicyArg::Full)]
        policy: PolicyArg,

        /// Limit to the N templates with the most qualifying items
        #[arg(long)]
        max_templates: Option<usize>,

        /// Limit the number of items updated per template
        #[arg(long)]
        max_items: Option<usize>,
    },

    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Every item over the 7d history / 30d trends thresholds
    Full,
    /// The most affected templates (10 templates, 50 items each by default)
    Top,
    /// Only items still at the stock 31d history and 365d trends
    Legacy,
}

/// Resolve a policy preset plus optional limit overrides
pub fn selection_policy(
    policy: PolicyArg,
    max_templates: Option<usize>,
    max_items: Option<usize>,
) -> SelectionPolicy {
    let mut selection = match policy {
        PolicyArg::Full => SelectionPolicy::full(),
        PolicyArg::Top => SelectionPolicy::top(TOP_TEMPLATES, TOP_ITEMS_PER_TEMPLATE),
        PolicyArg::Legacy => SelectionPolicy::exact_legacy(),
    };
    if max_templates.is_some() {
        selection.max_templates = max_templates;
    }
    if max_items.is_some() {
        selection.max_items_per_template = max_items;
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbxtrim_core::MatchMode;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["zbxtrim", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_analyze_template() {
        let cli = Cli::try_parse_from(["zbxtrim", "analyze", "--template", "10001"]).unwrap();
        if let Commands::Analyze { template } = cli.command {
            assert_eq!(template, Some("10001".to_string()));
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_cli_update_defaults_to_full() {
        let cli = Cli::try_parse_from(["zbxtrim", "update"]).unwrap();
        if let Commands::Update {
            policy,
            max_templates,
            max_items,
        } = cli.command
        {
            assert_eq!(policy, PolicyArg::Full);
            assert_eq!(max_templates, None);
            assert_eq!(max_items, None);
        } else {
            panic!("Expected Update command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["zbxtrim", "update", "--policy", "all"]).is_err());
    }

    #[test]
    fn test_top_policy_with_override() {
        let policy = selection_policy(PolicyArg::Top, Some(3), None);
        assert_eq!(policy.max_templates, Some(3));
        assert_eq!(policy.max_items_per_template, Some(TOP_ITEMS_PER_TEMPLATE));
    }

    #[test]
    fn test_legacy_policy() {
        let policy = selection_policy(PolicyArg::Legacy, None, None);
        assert_eq!(policy.match_mode, MatchMode::ExactLegacy);
        assert_eq!(policy.max_templates, None);
    }
}
