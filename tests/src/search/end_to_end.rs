use std::net::Ipv4Addr;

use ipmd5_common::error::{ConfigError, IoRole, SearchError};
use ipmd5_core::hasher::digest;
use ipmd5_core::search;

use crate::util::{Workspace, sorted_lines};

const DIGEST_1_2_3_4: &str = "6465ec74397c9126916786bbcd6d7601";

#[test]
fn single_target_in_slash_8_writes_one_line() {
    let ws = Workspace::with_source(&format!("{DIGEST_1_2_3_4}\n"));
    let mut cfg = ws.config();
    cfg.ranges = vec!["1.0.0.0/8".parse().unwrap()];
    cfg.workers = Some(3);
    cfg.job_prefix = 12;

    let report = search::execute(&cfg, None).unwrap();

    assert_eq!(ws.output(), format!("{DIGEST_1_2_3_4}=1.2.3.4\n"));
    assert_eq!(report.matches_written, 1);
    assert_eq!(report.jobs_completed, 16);
    assert_eq!(report.jobs_failed, 0);
    assert_eq!(report.addresses_scanned, 16_777_216);
}

#[test]
fn several_targets_across_ranges() {
    let wanted = [
        Ipv4Addr::new(192, 168, 0, 1),
        Ipv4Addr::new(192, 168, 255, 254),
        Ipv4Addr::new(172, 16, 3, 3),
    ];
    let mut source: String = wanted.iter().map(|addr| format!("  {}  \n", digest(*addr))).collect();
    source.push_str("\nnot-a-digest\n");
    source.push_str(&format!("{}\n", digest(wanted[0])));

    let ws = Workspace::with_source(&source);
    let mut cfg = ws.config();
    cfg.ranges = vec![
        "192.168.0.0/16".parse().unwrap(),
        "172.16.0.0/22".parse().unwrap(),
    ];
    cfg.workers = Some(2);
    cfg.job_prefix = 20;

    let report = search::execute(&cfg, None).unwrap();

    let expected: Vec<String> = wanted
        .iter()
        .map(|addr| format!("{}={addr}", digest(*addr)))
        .collect();
    assert_eq!(sorted_lines(&ws.output()), sorted_lines(&expected.join("\n")));
    assert_eq!(report.matches_written, 3);
}

#[test]
fn destination_is_truncated() {
    let ws = Workspace::with_source(DIGEST_1_2_3_4);
    std::fs::write(&ws.destination, "stale line from an earlier run\n".repeat(10)).unwrap();

    let mut cfg = ws.config();
    cfg.ranges = vec!["1.2.3.0/24".parse().unwrap()];

    search::execute(&cfg, None).unwrap();
    assert_eq!(ws.output(), format!("{DIGEST_1_2_3_4}=1.2.3.4\n"));
}

#[test]
fn no_matches_leaves_an_empty_file() {
    let ws = Workspace::with_source("ffffffffffffffffffffffffffffffff\n");
    let mut cfg = ws.config();
    cfg.ranges = vec!["10.10.0.0/24".parse().unwrap()];

    let report = search::execute(&cfg, None).unwrap();
    assert_eq!(report.matches_written, 0);
    assert_eq!(ws.output(), "");
}

#[test]
fn reserved_dsn_is_ignored() {
    let ws = Workspace::with_source(DIGEST_1_2_3_4);
    let mut cfg = ws.config();
    cfg.ranges = vec!["1.2.3.4/32".parse().unwrap()];
    cfg.dsn = Some("user:pass@tcp(localhost:3306)/hashes".into());

    let report = search::execute(&cfg, None).unwrap();
    assert_eq!(report.matches_written, 1);
}

#[test]
fn missing_paths_are_configuration_errors() {
    let ws = Workspace::with_source(DIGEST_1_2_3_4);

    let mut cfg = ws.config();
    cfg.source = "".into();
    assert!(matches!(
        search::execute(&cfg, None),
        Err(SearchError::Config(ConfigError::MissingSource))
    ));

    let mut cfg = ws.config();
    cfg.destination = "".into();
    assert!(matches!(
        search::execute(&cfg, None),
        Err(SearchError::Config(ConfigError::MissingDestination))
    ));
}

#[test]
fn unreadable_source_is_a_source_io_error() {
    let ws = Workspace::with_source(DIGEST_1_2_3_4);
    let mut cfg = ws.config();
    cfg.source = ws.dir.path().join("does-not-exist.txt");

    assert!(matches!(
        search::execute(&cfg, None),
        Err(SearchError::Io { role: IoRole::Source, .. })
    ));
    assert!(!ws.destination.exists(), "destination touched before the source loaded");
}

#[test]
fn uncreatable_destination_is_a_destination_io_error() {
    let ws = Workspace::with_source(DIGEST_1_2_3_4);
    let mut cfg = ws.config();
    cfg.destination = ws.dir.path().join("no-such-dir").join("found.txt");

    assert!(matches!(
        search::execute(&cfg, None),
        Err(SearchError::Io { role: IoRole::Destination, .. })
    ));
}
