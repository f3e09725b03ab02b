//! The curated copy library: hand-written prose for the sections of a few
//! well-known topics. Sections without curated copy get a placeholder
//! sentence (see [`section_copy`]).

use regex::Regex;
use std::sync::OnceLock;

type Sections = &'static [(&'static str, &'static str)];

/// Curated prose keyed by canonical slug, then canonical heading.
const LIBRARY: &[(&str, Sections)] = &[
    (
        "inbox-zero-classifier",
        &[
            (
                "Introduction",
                "Classify by sender/subject, label important items, and auto-archive low-value mail so your inbox stays focused.",
            ),
            (
                "Why automate Inbox Zero",
                "Automation prevents distractions and keeps your attention on action-able messages instead of newsletters and alerts.",
            ),
            (
                "How the classifier works",
                "Apps Script scans recent threads, applies labels (Action, Read Later, Notifications), and archives newsletters automatically.",
            ),
            (
                "Starter rules & labels",
                "Begin with obvious patterns (alerts, newsletters). Whitelist key senders. Iterate rules weekly based on misses.",
            ),
            (
                "Scheduling & maintenance",
                "Run every 10–15 minutes on a time trigger. Review label counts and maintain a changelog of changes.",
            ),
            (
                "Results & pitfalls",
                "Expect 60–80% faster triage. Watch for over-aggressive archiving and misclassified alerts, and tune rules accordingly.",
            ),
        ],
    ),
    (
        "onboarding",
        &[
            (
                "The problem with manual onboarding",
                "Steps are spread across Admin, Groups and Gmail; it’s slow, inconsistent, and easy to miss key access.",
            ),
            (
                "Why Apps Script + Admin SDK",
                "Native to Workspace, secure via OAuth, fast to deploy, and easy to maintain with a Google Sheet as the source of truth.",
            ),
            (
                "What this automation does",
                "Creates users, assigns org units, adds mandatory groups, and applies Gmail defaults in a single, repeatable flow.",
            ),
            (
                "Script outline",
                "Use AdminDirectory.Users.insert and AdminDirectory.Members.insert. Read rows from a Sheet and validate inputs.",
            ),
            (
                "Common pitfalls",
                "Missing Admin SDK scopes, bad orgUnitPath (must start with '/'), and misspelled group addresses. Start with dry runs.",
            ),
            (
                "Results",
                "Typically a 70–80% time reduction and far fewer access mistakes; scales well for MSPs and internal IT teams.",
            ),
        ],
    ),
    (
        "offboarding",
        &[
            (
                "Risks of manual offboarding",
                "Delays leave access open; automation ensures immediate lock-down and consistent data handling.",
            ),
            (
                "Suspend & secure",
                "Suspend the user, reset sign-in cookies, and revoke tokens to cut off access right away.",
            ),
            (
                "Drive transfer",
                "Transfer ownership to a manager or service account; verify shared drives and quotas before deletion.",
            ),
            (
                "Groups & aliases cleanup",
                "Remove the account from groups, shared inboxes, and aliases; document any residual access that needs attention.",
            ),
            (
                "Archive & retention policy",
                "Apply consistent retention/legal hold policies prior to deletion to meet compliance requirements.",
            ),
        ],
    ),
];

/// Normalized heading spellings mapped to the canonical heading used as a
/// [`LIBRARY`] key. Keys are in [`normalize_heading`] form.
const HEADING_ALIASES: &[(&str, &str)] = &[
    ("the problem with manual onboarding", "The problem with manual onboarding"),
    ("why apps script admin sdk", "Why Apps Script + Admin SDK"),
    ("why apps script", "Why Apps Script + Admin SDK"),
    ("what this automation does", "What this automation does"),
    ("script outline", "Script outline"),
    ("common pitfalls", "Common pitfalls"),
    ("results", "Results"),
    ("introduction", "Introduction"),
    ("why automate inbox zero", "Why automate Inbox Zero"),
    ("how the classifier works", "How the classifier works"),
    ("starter rules labels", "Starter rules & labels"),
    ("scheduling maintenance", "Scheduling & maintenance"),
    ("results pitfalls", "Results & pitfalls"),
    ("risks of manual offboarding", "Risks of manual offboarding"),
    ("suspend secure", "Suspend & secure"),
    ("drive transfer", "Drive transfer"),
    ("groups aliases cleanup", "Groups & aliases cleanup"),
    ("archive retention policy", "Archive & retention policy"),
];

/// Lower-cases `heading` and collapses every run of non-alphanumeric ASCII
/// into a single space.
fn normalize_heading(heading: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new("[^a-z0-9]+").unwrap());
    re.replace_all(&heading.to_lowercase(), " ").trim().to_owned()
}

fn canonical_heading(heading: &str) -> &str {
    let normalized = normalize_heading(heading);
    HEADING_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(heading)
}

/// Looks up curated copy for the section `heading` of the topic with the
/// canonical slug `slug`.
pub fn curated(slug: &str, heading: &str) -> Option<&'static str> {
    let heading = canonical_heading(heading);
    LIBRARY
        .iter()
        .find(|(s, _)| *s == slug)
        .and_then(|(_, sections)| sections.iter().find(|(h, _)| *h == heading))
        .map(|(_, text)| *text)
}

/// The paragraph text for a section: curated copy if the library has any,
/// otherwise `This section explains: {heading}.`
pub fn section_copy(slug: &str, heading: &str) -> String {
    match curated(slug, heading) {
        Some(text) => text.to_owned(),
        None => format!("This section explains: {}.", heading),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_curated_exact_heading() {
        assert_eq!(
            Some("Suspend the user, reset sign-in cookies, and revoke tokens to cut off access right away."),
            curated("offboarding", "Suspend & secure")
        );
    }

    #[test]
    fn test_curated_heading_variants() {
        let wanted = curated("onboarding", "Why Apps Script + Admin SDK");
        assert!(wanted.is_some());
        assert_eq!(wanted, curated("onboarding", "why apps script"));
        assert_eq!(wanted, curated("onboarding", "WHY APPS SCRIPT -- ADMIN SDK"));
        assert_eq!(
            curated("inbox-zero-classifier", "Starter rules & labels"),
            curated("inbox-zero-classifier", "Starter Rules / Labels")
        );
        assert!(curated("inbox-zero-classifier", "starter rules and labels").is_none());
    }

    #[test]
    fn test_curated_is_per_topic() {
        assert!(curated("onboarding", "Results").is_some());
        assert!(curated("offboarding", "Results").is_none());
    }

    #[test]
    fn test_section_copy_placeholder() {
        assert_eq!("This section explains: Tips.", section_copy("foo", "Tips"));
        assert_eq!(
            "This section explains: Drive Transfer <b>now</b>.",
            section_copy("foo", "Drive Transfer <b>now</b>")
        );
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!("groups aliases cleanup", normalize_heading("  Groups & Aliases -- cleanup!"));
    }
}
