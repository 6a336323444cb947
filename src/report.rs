//! Human readable rendering of check results

use crate::version::checker::{CheckResult, PackageUpdate};

/// Number of entries shown before collapsing into "+N more"
const SUMMARY_LIMIT: usize = 3;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message to show the user after a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message,
        }
    }
}

/// One-line summary: `a 1.0.0→1.1.0, b 2.0.0→3.0.0 (+2 more)`
pub fn format_update_summary(updates: &[PackageUpdate]) -> String {
    let short = updates
        .iter()
        .take(SUMMARY_LIMIT)
        .map(|u| format!("{} {}→{}", u.name, u.current, u.latest))
        .collect::<Vec<_>>()
        .join(", ");

    if updates.len() > SUMMARY_LIMIT {
        format!("{short} (+{} more)", updates.len() - SUMMARY_LIMIT)
    } else {
        short
    }
}

/// One line per update, with the compare link on its own line when known
pub fn format_detailed_updates(updates: &[PackageUpdate]) -> String {
    updates
        .iter()
        .map(|u| {
            let mut line = format!("  {}: {} → {}", u.name, u.current, u.latest);
            if let Some(url) = &u.compare_url {
                line.push_str(&format!("\n    {url}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notice for a user-initiated check; always produces a message
pub fn interactive_notice(result: &CheckResult) -> Notice {
    if !result.updates.is_empty() {
        let mut message = format!(
            "{} update(s) available:\n{}",
            result.updates.len(),
            format_detailed_updates(&result.updates)
        );
        if !result.skipped_unpinned.is_empty() {
            message.push_str(&format!(
                "\n\nUnpinned (not checked): {}",
                result.skipped_unpinned.join(", ")
            ));
        }
        return Notice::warning(message);
    }

    if !result.errors.is_empty() {
        return Notice::warning(format!(
            "Some checks failed:\n  {}",
            result.errors.join("\n  ")
        ));
    }

    let mut message = "All pinned packages are up to date.".to_string();
    if !result.skipped_unpinned.is_empty() {
        message.push_str(&format!(
            "\n\nUnpinned (not checked): {}",
            result.skipped_unpinned.join(", ")
        ));
    }
    Notice::info(message)
}

/// Notice for an automatic check; silent unless updates exist
pub fn auto_notice(result: &CheckResult) -> Option<Notice> {
    if result.updates.is_empty() {
        return None;
    }

    Some(Notice::warning(format!(
        "Package updates available ({}): {}. Run `pin-updates check` for details.",
        result.updates.len(),
        format_update_summary(&result.updates)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, compare_url: Option<&str>) -> PackageUpdate {
        PackageUpdate {
            name: name.to_string(),
            current: "1.0.0".to_string(),
            latest: "2.0.0".to_string(),
            source: format!("npm:{name}@1.0.0"),
            compare_url: compare_url.map(String::from),
        }
    }

    #[test]
    fn format_update_summary_lists_up_to_three() {
        let updates = vec![update("a", None), update("b", None)];

        assert_eq!(
            format_update_summary(&updates),
            "a 1.0.0→2.0.0, b 1.0.0→2.0.0"
        );
    }

    #[test]
    fn format_update_summary_collapses_remainder() {
        let updates: Vec<_> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|name| update(name, None))
            .collect();

        assert_eq!(
            format_update_summary(&updates),
            "a 1.0.0→2.0.0, b 1.0.0→2.0.0, c 1.0.0→2.0.0 (+2 more)"
        );
    }

    #[test]
    fn format_detailed_updates_adds_compare_url_line() {
        let updates = vec![
            update("org/repo", Some("https://github.com/org/repo/compare/a...b")),
            update("left-pad", None),
        ];

        assert_eq!(
            format_detailed_updates(&updates),
            "  org/repo: 1.0.0 → 2.0.0\n    https://github.com/org/repo/compare/a...b\n  left-pad: 1.0.0 → 2.0.0"
        );
    }

    #[test]
    fn interactive_notice_warns_about_updates_and_lists_unpinned() {
        let result = CheckResult {
            updates: vec![update("a", None)],
            skipped_unpinned: vec!["loose".to_string()],
            errors: vec!["Failed to check b".to_string()],
        };

        assert_eq!(
            interactive_notice(&result),
            Notice {
                level: NoticeLevel::Warning,
                message: "1 update(s) available:\n  a: 1.0.0 → 2.0.0\n\nUnpinned (not checked): loose"
                    .to_string(),
            }
        );
    }

    #[test]
    fn interactive_notice_reports_errors_when_no_updates() {
        let result = CheckResult {
            updates: vec![],
            skipped_unpinned: vec!["loose".to_string()],
            errors: vec!["Failed to check a".to_string(), "Failed to check b".to_string()],
        };

        assert_eq!(
            interactive_notice(&result),
            Notice {
                level: NoticeLevel::Warning,
                message: "Some checks failed:\n  Failed to check a\n  Failed to check b".to_string(),
            }
        );
    }

    #[test]
    fn interactive_notice_is_info_when_up_to_date() {
        assert_eq!(
            interactive_notice(&CheckResult::default()),
            Notice {
                level: NoticeLevel::Info,
                message: "All pinned packages are up to date.".to_string(),
            }
        );

        let with_unpinned = CheckResult {
            skipped_unpinned: vec!["x".to_string(), "y".to_string()],
            ..CheckResult::default()
        };
        assert_eq!(
            interactive_notice(&with_unpinned).message,
            "All pinned packages are up to date.\n\nUnpinned (not checked): x, y"
        );
    }

    #[test]
    fn auto_notice_is_silent_without_updates() {
        let result = CheckResult {
            errors: vec!["Failed to check a".to_string()],
            ..CheckResult::default()
        };

        assert_eq!(auto_notice(&result), None);
    }

    #[test]
    fn auto_notice_summarizes_updates() {
        let result = CheckResult {
            updates: vec![update("a", None)],
            ..CheckResult::default()
        };

        assert_eq!(
            auto_notice(&result),
            Some(Notice {
                level: NoticeLevel::Warning,
                message: "Package updates available (1): a 1.0.0→2.0.0. Run `pin-updates check` for details."
                    .to_string(),
            })
        );
    }
}
