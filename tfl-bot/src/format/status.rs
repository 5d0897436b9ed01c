//! Line status formatting.
//!
//! Turns `/Line/.../Status` responses into HTML messages: the whole-network
//! summary grouped by severity, the single-line status with disruption
//! details, and the strike report.

use crate::config::BotConfig;
use crate::tfl::{Line, LineStatus};

/// TfL severity used for out-of-the-ordinary service patterns.
const SPECIAL_SERVICE: &str = "Special Service";

/// Synthetic severity bucket for strike disruption.
///
/// TfL reports strikes as "Special Service" with an explanatory reason;
/// they are worth calling out separately.
pub const STRIKE_BUCKET: &str = "Strike Action";

const STATUS_PAGE_URL: &str = "https://tfl.gov.uk/tube-dlr-overground/status";

/// Severity bucket a status is grouped under.
///
/// "Special Service" whose reason mentions a strike is regrouped under
/// [`STRIKE_BUCKET`]; everything else keeps its API severity.
fn severity_bucket(status: &LineStatus) -> &str {
    let is_strike = status.status_severity_description == SPECIAL_SERVICE
        && status
            .reason
            .as_deref()
            .is_some_and(|r| r.to_lowercase().contains("strike"));

    if is_strike {
        STRIKE_BUCKET
    } else {
        &status.status_severity_description
    }
}

/// The worst status on a line is the first entry, per API ordering.
fn worst_status(line: &Line) -> Option<&LineStatus> {
    line.line_statuses.first()
}

/// Pick a line or alias to show in the `/status <line>` hint.
///
/// Rotates at random through the configured commands so the hint doubles
/// as light discovery of what the bot answers to.
fn suggested_line(config: &BotConfig) -> String {
    let pool: Vec<&str> = config
        .command_lines()
        .chain(config.command_aliases().map(|(alias, _)| alias))
        .collect();
    if pool.is_empty() {
        return "victoria".to_string();
    }
    pool[rand::random::<usize>() % pool.len()].to_string()
}

/// Format the whole-network status summary.
///
/// Lines are grouped by the severity bucket of their worst status, in the
/// order buckets first appear in the response.
pub fn network_status_message(config: &BotConfig, lines: &[Line]) -> String {
    let mut buckets: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in lines {
        let Some(worst) = worst_status(line) else {
            continue;
        };
        let bucket = severity_bucket(worst);
        match buckets.iter_mut().find(|(b, _)| *b == bucket) {
            Some((_, names)) => names.push(&line.name),
            None => buckets.push((bucket, vec![&line.name])),
        }
    }

    let mut message = format!(
        "👋 Here's the current status across the network \
         (via <a href=\"{STATUS_PAGE_URL}\">tfl.gov.uk</a>)\n\
         💭 You can also ask me about a specific line, like <code>/status {}</code>",
        suggested_line(config)
    );
    for (bucket, names) in buckets {
        message.push_str(&format!(
            "\n\n<b>{} {}</b>\n{}",
            config.emoji(bucket),
            bucket,
            names.join(", ")
        ));
    }
    message
}

/// Format the status of a single line.
///
/// Shows the worst severity with its emoji; every status entry that carries
/// a reason is appended as its own disruption block, followed by a link to
/// the status page.
pub fn line_status_message(config: &BotConfig, line: &Line) -> String {
    let Some(worst) = worst_status(line) else {
        return format!(
            "{} No status information for <b>{}</b> right now.",
            config.emoji(""),
            line.name
        );
    };

    let severity = &worst.status_severity_description;
    let mut message = format!(
        "{} <b>{}</b> on <b>{}</b> services.",
        config.emoji(severity),
        severity,
        line.name
    );

    let reasons: Vec<&str> = line
        .line_statuses
        .iter()
        .filter_map(|s| s.reason.as_deref())
        .collect();
    if !reasons.is_empty() {
        for reason in reasons {
            message.push_str(&format!("\n\n<pre>{reason}</pre>"));
        }
        message.push_str(&format!(
            "\n\nMore info and alternative routes available on the \
             <a href=\"{STATUS_PAGE_URL}\">TfL website</a>."
        ));
    }
    message
}

/// Format the strike report: lines whose worst status is strike action.
pub fn strikes_message(config: &BotConfig, lines: &[Line]) -> String {
    let affected: Vec<&str> = lines
        .iter()
        .filter(|line| worst_status(line).is_some_and(|s| severity_bucket(s) == STRIKE_BUCKET))
        .map(|line| line.name.as_str())
        .collect();

    if affected.is_empty() {
        return "✅ No strike action reported on the network right now.".to_string();
    }

    format!(
        "{} <b>{}</b> is affecting these lines:\n{}\n\n\
         Check the <a href=\"{}\">TfL website</a> before you travel.",
        config.emoji(STRIKE_BUCKET),
        STRIKE_BUCKET,
        affected.join(", "),
        STATUS_PAGE_URL
    )
}
