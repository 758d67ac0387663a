//! Unit tests for CLI argument parsing

use clap::Parser;
use confdiff::cli::{Cli, Commands, ConfigAction};
use confdiff::loader::Delimiter;
use confdiff::output::OutputFormat;

#[test]
fn test_compare_defaults() {
    let cli = Cli::try_parse_from(["confdiff", "compare", "a.csv", "b.csv"]).unwrap();
    assert!(!cli.verbose);
    assert!(cli.workspace.is_none());

    match cli.command {
        Commands::Compare {
            header_row,
            columns,
            all_columns,
            delimiter,
            description_column,
            format,
            no_save,
            label1,
            ..
        } => {
            assert_eq!(header_row, None);
            assert_eq!(columns, None);
            assert!(!all_columns);
            assert_eq!(Delimiter::parse(&delimiter), Ok(Delimiter::Fixed(b',')));
            assert_eq!(description_column, "Description");
            assert_eq!(OutputFormat::parse(&format), Ok(OutputFormat::Pretty));
            assert!(!no_save);
            assert!(label1.is_none());
        }
        _ => panic!("expected compare command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "confdiff", "compare", "a.csv", "b.csv", "--verbose", "--workspace", "/tmp/ws",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.workspace.unwrap().to_str(), Some("/tmp/ws"));
}

#[test]
fn test_columns_conflict_with_all_columns() {
    let result = Cli::try_parse_from([
        "confdiff", "compare", "a.csv", "b.csv", "--columns", "A", "--all-columns",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_compare_requires_two_files() {
    assert!(Cli::try_parse_from(["confdiff", "compare", "a.csv"]).is_err());
}

#[test]
fn test_config_subcommands() {
    let cli = Cli::try_parse_from(["confdiff", "config", "set", "--header-row", "3"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Set { header_row, columns },
        } => {
            assert_eq!(header_row, Some(3));
            assert!(columns.is_none());
        }
        _ => panic!("expected config set"),
    }

    assert!(matches!(
        Cli::try_parse_from(["confdiff", "config", "reset"]).unwrap().command,
        Commands::Config { action: ConfigAction::Reset }
    ));
}

#[test]
fn test_negative_header_row_rejected() {
    assert!(Cli::try_parse_from(["confdiff", "compare", "a.csv", "b.csv", "--header-row", "-1"]).is_err());
}
