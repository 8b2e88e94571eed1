//! Tests for the `helpers` subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand, HelpersCommand};
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[test]
fn cli_parse_get_events() {
    match parse(&["cosmico", "helpers", "get-events", "30461432614"]) {
        CliCommand::Helpers(HelpersCommand::GetEvents { org_id, pagesize }) => {
            assert_eq!(org_id, "30461432614");
            assert_eq!(pagesize, 20);
        }
        _ => panic!("expected GetEvents"),
    }
}

#[test]
fn cli_parse_get_events_pagesize() {
    match parse(&["cosmico", "helpers", "get-events", "42", "--pagesize", "5"]) {
        CliCommand::Helpers(HelpersCommand::GetEvents { org_id, pagesize }) => {
            assert_eq!(org_id, "42");
            assert_eq!(pagesize, 5);
        }
        _ => panic!("expected GetEvents"),
    }
}

#[test]
fn cli_get_events_requires_org_id() {
    assert!(Cli::try_parse_from(["cosmico", "helpers", "get-events"]).is_err());
}

#[test]
fn cli_parse_get_streamyard_links() {
    match parse(&["cosmico", "helpers", "get-streamyard-links", "events.json"]) {
        CliCommand::Helpers(HelpersCommand::GetStreamyardLinks { events_file }) => {
            assert_eq!(events_file, PathBuf::from("events.json"));
        }
        _ => panic!("expected GetStreamyardLinks"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["cosmico", "helpers", "completions", "bash"]) {
        CliCommand::Helpers(HelpersCommand::Completions { shell }) => {
            assert_eq!(shell, Shell::Bash);
        }
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_shell() {
    assert!(Cli::try_parse_from(["cosmico", "helpers", "completions", "cmd"]).is_err());
}
