//! CLI argument parsing tests

use clap::Parser;

use crate::cli::{Cli, Commands};

#[test]
fn test_parse_insight() {
    let cli = Cli::parse_from(["rooflens", "insight", "123 Main St, Springfield"]);
    match cli.command {
        Commands::Insight { address, json } => {
            assert_eq!(address, "123 Main St, Springfield");
            assert!(!json);
        }
        _ => panic!("expected insight command"),
    }
}

#[test]
fn test_parse_insight_json_flag() {
    let cli = Cli::parse_from(["rooflens", "insight", "--json", "1 Elm St"]);
    match cli.command {
        Commands::Insight { json, .. } => assert!(json),
        _ => panic!("expected insight command"),
    }
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::parse_from(["rooflens", "serve"]);
    match cli.command {
        Commands::Serve { host, port } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, 8080);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_parse_serve_overrides() {
    let cli = Cli::parse_from(["rooflens", "serve", "--host", "0.0.0.0", "--port", "3000"]);
    match cli.command {
        Commands::Serve { host, port } => {
            assert_eq!(host, "0.0.0.0");
            assert_eq!(port, 3000);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_parse_global_verbose() {
    let cli = Cli::parse_from(["rooflens", "status", "--verbose"]);
    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::Status));
}
