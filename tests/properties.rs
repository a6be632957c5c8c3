//! Property tests for the pure deployment rules.

use std::path::Path;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use dropship::domain::policies::{
    plan_rotation, validate_settings, Field, RawSettings, MAX_BACKUP_RETENTION,
};
use dropship::domain::value_objects::{check_path_safety, BackupName, RemotePath};

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ -~]{0,24}")
}

proptest! {
    #[test]
    fn validation_accepts_or_names_every_bad_field(
        host in optional_text(),
        dir in optional_text(),
        build in optional_text(),
        dist in optional_text(),
        retention in optional_text(),
        skip_build in any::<bool>(),
    ) {
        let raw = RawSettings {
            remote_host: host.as_deref(),
            remote_dir: dir.as_deref(),
            build_command: build.as_deref(),
            dist_path: dist.as_deref(),
            backup_retention: retention.as_deref(),
        };

        match validate_settings(&raw, Path::new("/work/site"), skip_build) {
            Ok(settings) => {
                prop_assert!((1..=MAX_BACKUP_RETENTION).contains(&settings.backup_retention));
                prop_assert!(skip_build || settings.build_command.is_some());
            }
            Err(issues) => {
                prop_assert!(!issues.is_empty());
                let mut fields: Vec<Field> = issues.iter().map(|i| i.field).collect();
                let total = fields.len();
                fields.dedup();
                prop_assert_eq!(fields.len(), total, "one issue per field");
            }
        }
    }

    #[test]
    fn safe_paths_never_escape_or_inject(raw in "[ -~]{1,40}") {
        if check_path_safety(&raw).is_ok() {
            prop_assert!(!raw.contains(".."));
            prop_assert!(!raw.contains('~'));
            for meta in [";", "|", "&", "`", "$("] {
                prop_assert!(!raw.contains(meta));
            }
        }
    }

    #[test]
    fn sensitive_locations_are_rejected_however_they_are_spelled(
        prefix in prop::sample::select(vec![
            "/etc", "/root", "/var/log", "/boot", "/proc", "/sys", "/dev", "/bin", "/sbin",
        ]),
        separators in prop::collection::vec(prop::sample::select(vec!["/", "//", "/./", "/.//", "\\"]), 3),
        tail in "[a-z]{0,8}",
    ) {
        let mut raw = String::new();
        for (i, part) in prefix.trim_start_matches('/').split('/').enumerate() {
            raw.push_str(separators[i]);
            raw.push_str(part);
        }
        if !tail.is_empty() {
            raw.push_str(separators[2]);
            raw.push_str(&tail);
        }
        prop_assert!(check_path_safety(&raw).is_err(), "{} accepted", raw);
        prop_assert!(RemotePath::parse(&raw).is_err(), "{} accepted", raw);
    }

    #[test]
    fn accepted_remote_paths_need_no_quoting(raw in "[ -~]{1,40}") {
        if let Ok(path) = RemotePath::parse(&raw) {
            prop_assert!(!path.as_str().contains(char::is_whitespace));
            for c in ['\'', '"', '*', '?', '$'] {
                prop_assert!(!path.as_str().contains(c));
            }
        }
    }

    #[test]
    fn remote_paths_have_no_trailing_slash(segments in prop::collection::vec("[a-z0-9_-]{1,8}", 1..5)) {
        let raw = format!("/srv/{}/", segments.join("/"));
        let path = RemotePath::parse(&raw).unwrap();
        prop_assert!(!path.as_str().ends_with('/'));
        prop_assert!(path.as_str().starts_with("/srv/"));
    }

    #[test]
    fn rotation_keeps_the_newest_within_retention(
        offsets in prop::collection::vec(0i64..1_000_000_000, 0..30),
        retention in 1usize..=100,
    ) {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let names: Vec<BackupName> = offsets
            .iter()
            .map(|s| BackupName::from_timestamp(base + chrono::Duration::seconds(*s)))
            .collect();
        let mut distinct = names.clone();
        distinct.sort();
        distinct.dedup();

        let plan = plan_rotation(names, retention);

        prop_assert_eq!(plan.keep.len(), retention.min(distinct.len()));
        prop_assert_eq!(plan.keep.len() + plan.prune.len(), distinct.len());
        if let (Some(oldest_kept), Some(newest_pruned)) = (plan.keep.last(), plan.prune.first()) {
            prop_assert!(oldest_kept > newest_pruned);
        }
    }
}
