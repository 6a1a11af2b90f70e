//! Label templates and rendering of a [`DisplayState`].

use serde::{Deserialize, Serialize};

use super::evaluator::{Bucket, DisplayState};
use super::feeling::FeelingTier;

/// Text shown for each display state.
///
/// Bucket templates take `{0}` and `{1}` for the two duration units and
/// `{2}` for the percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTemplates {
    #[serde(default = "default_before")]
    pub before: String,
    #[serde(default = "default_days")]
    pub days: String,
    #[serde(default = "default_hours")]
    pub hours: String,
    #[serde(default = "default_minutes")]
    pub minutes: String,
    #[serde(default = "default_deadline")]
    pub deadline: String,
    #[serde(default = "default_invalid")]
    pub invalid: String,
}

fn default_before() -> String {
    "CHILLOUT".into()
}
fn default_days() -> String {
    "{0}d {1}h ({2}%)".into()
}
fn default_hours() -> String {
    "{0}h {1}m ({2}%)".into()
}
fn default_minutes() -> String {
    "{0}m {1}s ({2}%)".into()
}
fn default_deadline() -> String {
    "DEADLINE!".into()
}
fn default_invalid() -> String {
    "Invalid dates".into()
}

impl Default for LabelTemplates {
    fn default() -> Self {
        Self {
            before: default_before(),
            days: default_days(),
            hours: default_hours(),
            minutes: default_minutes(),
            deadline: default_deadline(),
            invalid: default_invalid(),
        }
    }
}

impl LabelTemplates {
    pub fn for_bucket(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Days => &self.days,
            Bucket::Hours => &self.hours,
            Bucket::Minutes => &self.minutes,
        }
    }
}

/// Substitute `{N}` placeholders with `args[N]`.
///
/// Placeholders without a matching argument, and braces that do not wrap a
/// plain index, are copied through unchanged.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let index = &after[..close];
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let arg = index.parse::<usize>().ok().and_then(|i| args.get(i))?;
            Some((arg, close))
        });

        match replaced {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Label plus the single icon to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub text: String,
    pub tier: FeelingTier,
    pub icon: &'static str,
}

/// Map a display state to its label and icon.
pub fn render(state: &DisplayState, templates: &LabelTemplates) -> Rendered {
    let text = match state {
        DisplayState::BeforeWindow => templates.before.clone(),
        DisplayState::PastDeadline => templates.deadline.clone(),
        DisplayState::Unconfigured => templates.invalid.clone(),
        DisplayState::InProgress {
            days_left,
            hours_left,
            minutes_left,
            seconds_left,
            percent_complete,
            bucket,
        } => {
            let (major, minor) = match bucket {
                Bucket::Days => (days_left, hours_left),
                Bucket::Hours => (hours_left, minutes_left),
                Bucket::Minutes => (minutes_left, seconds_left),
            };
            let args = [
                major.to_string(),
                minor.to_string(),
                percent_complete.to_string(),
            ];
            format_template(templates.for_bucket(*bucket), &args)
        }
    };

    let tier = state.feeling();
    Rendered {
        text,
        tier,
        icon: tier.icon_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::evaluator::Percent;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn format_substitutes_positionally() {
        assert_eq!(
            format_template("{0}d {1}h ({2}%)", &args(&["5", "3", "50"])),
            "5d 3h (50%)"
        );
        assert_eq!(format_template("{1}-{0}-{1}", &args(&["a", "b"])), "b-a-b");
    }

    #[test]
    fn format_leaves_unknown_placeholders() {
        assert_eq!(format_template("{3} left", &args(&["x"])), "{3} left");
        assert_eq!(format_template("{x} {} {", &args(&["x"])), "{x} {} {");
        assert_eq!(format_template("no braces", &[]), "no braces");
    }

    #[test]
    fn renders_terminal_states() {
        let t = LabelTemplates::default();
        let before = render(&DisplayState::BeforeWindow, &t);
        assert_eq!(before.text, "CHILLOUT");
        assert_eq!(before.icon, "face-angel-symbolic");

        let past = render(&DisplayState::PastDeadline, &t);
        assert_eq!(past.text, "DEADLINE!");
        assert_eq!(past.tier, FeelingTier::Sick);

        let invalid = render(&DisplayState::Unconfigured, &t);
        assert_eq!(invalid.text, "Invalid dates");
        assert_eq!(invalid.icon, "face-sick-symbolic");
    }

    #[test]
    fn renders_each_bucket() {
        let t = LabelTemplates::default();
        let state = |bucket, percent: f64| DisplayState::InProgress {
            days_left: 4,
            hours_left: 3,
            minutes_left: 2,
            seconds_left: 1,
            percent_complete: Percent::from_raw(percent),
            bucket,
        };

        assert_eq!(render(&state(Bucket::Days, 12.4), &t).text, "4d 3h (12%)");
        assert_eq!(render(&state(Bucket::Hours, 91.0), &t).text, "3h 2m (91%)");
        let near = render(&state(Bucket::Minutes, 99.5), &t);
        assert_eq!(near.text, "2m 1s (99.50%)");
        assert_eq!(near.icon, "face-surprise-symbolic");
    }

    #[test]
    fn templates_fill_missing_fields_with_defaults() {
        let t: LabelTemplates = toml::from_str("before = \"soon\"").unwrap();
        assert_eq!(t.before, "soon");
        assert_eq!(t.days, "{0}d {1}h ({2}%)");
    }
}
