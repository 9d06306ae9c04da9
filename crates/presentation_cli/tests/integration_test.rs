//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "komyut")]
#[command(author, version, about = "komyut commute planner CLI", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Search {
        query: String,
    },
    Locate,
    Plan {
        #[arg(short, long)]
        from: String,
        #[arg(short, long)]
        to: String,
        #[arg(short, long)]
        route: Option<usize>,
    },
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    VerifyOtp {
        email: String,
        otp: String,
    },
    Review {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        issue: String,
        #[arg(long)]
        suggestion: String,
        #[arg(long)]
        rating: u8,
    },
    Users,
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_search_command() {
    let cli = parse_args(&["komyut", "search", "manila city hall"]).unwrap();
    if let Commands::Search { query } = cli.command {
        assert_eq!(query, "manila city hall");
    } else {
        panic!("Expected Search command");
    }
}

#[test]
fn cli_parses_locate_command() {
    let cli = parse_args(&["komyut", "locate"]).unwrap();
    assert!(matches!(cli.command, Commands::Locate));
}

#[test]
fn cli_parses_plan_command() {
    let cli = parse_args(&[
        "komyut",
        "plan",
        "--from",
        "Manila City Hall",
        "--to",
        "Quezon City Hall",
    ])
    .unwrap();
    if let Commands::Plan { from, to, route } = cli.command {
        assert_eq!(from, "Manila City Hall");
        assert_eq!(to, "Quezon City Hall");
        assert!(route.is_none());
    } else {
        panic!("Expected Plan command");
    }
}

#[test]
fn cli_parses_plan_with_route_pick() {
    let cli = parse_args(&[
        "komyut", "plan", "--from", "a", "--to", "b", "--route", "1",
    ])
    .unwrap();
    if let Commands::Plan { route, .. } = cli.command {
        assert_eq!(route, Some(1));
    } else {
        panic!("Expected Plan command");
    }
}

#[test]
fn cli_plan_requires_both_endpoints() {
    let result = parse_args(&["komyut", "plan", "--from", "a"]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_register_command() {
    let cli = parse_args(&[
        "komyut",
        "register",
        "juan",
        "juan@b.ph",
        "--password",
        "secret123",
    ])
    .unwrap();
    if let Commands::Register {
        username,
        email,
        password,
    } = cli.command
    {
        assert_eq!(username, "juan");
        assert_eq!(email, "juan@b.ph");
        assert_eq!(password, "secret123");
    } else {
        panic!("Expected Register command");
    }
}

#[test]
fn cli_parses_verify_otp_command() {
    let cli = parse_args(&["komyut", "verify-otp", "juan@b.ph", "123456"]).unwrap();
    if let Commands::VerifyOtp { email, otp } = cli.command {
        assert_eq!(email, "juan@b.ph");
        assert_eq!(otp, "123456");
    } else {
        panic!("Expected VerifyOtp command");
    }
}

#[test]
fn cli_parses_review_command() {
    let cli = parse_args(&[
        "komyut",
        "review",
        "juan@b.ph",
        "--password",
        "secret123",
        "--issue",
        "Late buses",
        "--suggestion",
        "More trips",
        "--rating",
        "4",
    ])
    .unwrap();
    if let Commands::Review { rating, issue, .. } = cli.command {
        assert_eq!(rating, 4);
        assert_eq!(issue, "Late buses");
    } else {
        panic!("Expected Review command");
    }
}

#[test]
fn cli_parses_users_command() {
    let cli = parse_args(&["komyut", "users"]).unwrap();
    assert!(matches!(cli.command, Commands::Users));
}

#[test]
fn cli_parses_verbose_flags() {
    let cli = parse_args(&["komyut", "-vv", "locate"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_requires_subcommand() {
    let result = parse_args(&["komyut"]);
    assert!(result.is_err());
}

#[test]
fn cli_search_requires_query() {
    let result = parse_args(&["komyut", "search"]);
    assert!(result.is_err());
}

#[test]
fn cli_verbosity_zero_by_default() {
    let cli = parse_args(&["komyut", "locate"]).unwrap();
    assert_eq!(cli.verbose, 0);
}
