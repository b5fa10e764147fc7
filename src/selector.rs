/// Cascading platform → channel → version selection
///
/// Pure state behind the popup: options for each list are derived from the
/// stored release table, and a complete selection resolves to a release
/// notes URL.
use crate::classify::major_version;
use crate::config::{AURORA_NOTES_BEFORE_MAJOR, NOTES_BASE_URL};
use crate::error::ExtensionError;
use crate::release::{split_key, ReleaseTable};
use url::Url;

/// Value carried by the placeholder entry of every list
pub const PLACEHOLDER_VALUE: &str = "default";

pub const NO_CONNECTION_LABEL: &str = "No Internet Connection!";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Contents of one dropdown: a hidden placeholder followed by the options
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
}

impl Choices {
    fn empty(placeholder: &'static str) -> Choices {
        Choices {
            placeholder,
            options: Vec::new(),
        }
    }
}

/// Human label for a platform or channel id
///
/// Known ids use a fixed label; anything else gets its first character capitalized.
pub fn display_name(id: &str) -> String {
    match id {
        "esr" => "ESR".to_string(),
        "aurora" => "Aurora (Legacy)".to_string(),
        "ios" => "iOS".to_string(),
        _ => {
            let mut chars = id.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Build the release notes URL for a full selection
///
/// Desktop has no platform segment; desktop Aurora builds before 29 used the
/// separate "auroranotes" page.
pub fn release_notes_url(platform: &str, channel: &str, version: &str) -> Result<Url, ExtensionError> {
    let mut path = String::new();

    if platform != "desktop" {
        path.push_str(platform);
        path.push('/');
    }

    let legacy_aurora = platform == "desktop"
        && channel == "aurora"
        && major_version(version).is_some_and(|major| major < AURORA_NOTES_BEFORE_MAJOR);
    let notes = if legacy_aurora { "auroranotes" } else { "releasenotes" };

    path.push_str(&format!("{}/{}/", version, notes));

    Url::parse(NOTES_BASE_URL)
        .and_then(|base| base.join(&path))
        .map_err(|source| ExtensionError::InvalidUrl {
            url: format!("{}{}", NOTES_BASE_URL, path),
            source,
        })
}

/// Selector state for one popup session
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorContext {
    /// No stored releases; every list shows the no-connection label
    NoData,
    Ready(Selection),
}

/// What one dropdown shows and whether it reacts to changes
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub choices: Choices,
    pub selected: Option<String>,
    pub interactive: bool,
}

impl Control {
    fn inert(placeholder: &'static str) -> Control {
        Control {
            choices: Choices::empty(placeholder),
            selected: None,
            interactive: false,
        }
    }

    fn live(choices: Choices, selected: Option<&str>) -> Control {
        Control {
            choices,
            selected: selected.map(str::to_string),
            interactive: true,
        }
    }
}

/// Everything the popup renders for the current state
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorView {
    pub platform: Control,
    pub channel: Control,
    pub version: Control,
    pub submit_visible: bool,
}

impl SelectorContext {
    pub fn from_releases(releases: Option<ReleaseTable>) -> SelectorContext {
        match releases {
            Some(table) if !table.is_empty() => SelectorContext::Ready(Selection::new(table)),
            _ => SelectorContext::NoData,
        }
    }

    pub fn view(&self) -> SelectorView {
        match self {
            SelectorContext::NoData => SelectorView {
                platform: Control::inert(NO_CONNECTION_LABEL),
                channel: Control::inert(NO_CONNECTION_LABEL),
                version: Control::inert(NO_CONNECTION_LABEL),
                submit_visible: false,
            },
            SelectorContext::Ready(selection) => SelectorView {
                platform: Control::live(selection.platform_choices(), selection.platform()),
                channel: Control::live(selection.channel_choices(), selection.channel()),
                version: Control::live(selection.version_choices(), selection.version()),
                submit_visible: selection.submit_visible(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    table: ReleaseTable,
    platform: Option<String>,
    channel: Option<String>,
    version: Option<String>,
}

/// Placeholder values never count as a choice
fn real_value(value: &str) -> Option<String> {
    (!value.is_empty() && value != PLACEHOLDER_VALUE).then(|| value.to_string())
}

fn dedup_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

impl Selection {
    pub fn new(table: ReleaseTable) -> Selection {
        Selection {
            table,
            platform: None,
            channel: None,
            version: None,
        }
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn platforms(&self) -> Vec<&str> {
        dedup_in_order(self.table.keys().map(|key| split_key(key).0))
    }

    fn channels(&self, platform: &str) -> Vec<&str> {
        dedup_in_order(
            self.table
                .keys()
                .map(|key| split_key(key))
                .filter(|(prefix, _)| *prefix == platform)
                .map(|(_, channel)| channel),
        )
    }

    fn versions(&self) -> &[String] {
        match (&self.platform, &self.channel) {
            (Some(platform), Some(channel)) => self
                .table
                .get(&format!("{}_{}", platform, channel))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn platform_choices(&self) -> Choices {
        Choices {
            placeholder: "Select Platform",
            options: self
                .platforms()
                .into_iter()
                .map(|id| SelectOption {
                    label: display_name(id),
                    value: id.to_string(),
                })
                .collect(),
        }
    }

    pub fn channel_choices(&self) -> Choices {
        let channels = match &self.platform {
            Some(platform) => self.channels(platform),
            None => Vec::new(),
        };

        if channels.is_empty() {
            return Choices::empty("Select Platform First");
        }

        Choices {
            placeholder: "Select Channel",
            options: channels
                .into_iter()
                .map(|id| SelectOption {
                    label: display_name(id),
                    value: id.to_string(),
                })
                .collect(),
        }
    }

    pub fn version_choices(&self) -> Choices {
        let versions = self.versions();

        if versions.is_empty() {
            return Choices::empty("Select Channel First");
        }

        Choices {
            placeholder: "Select Version",
            options: versions
                .iter()
                .map(|version| SelectOption {
                    label: version.clone(),
                    value: version.clone(),
                })
                .collect(),
        }
    }

    /// Picking a platform resets the channel and version lists
    pub fn choose_platform(&mut self, value: &str) {
        self.platform = real_value(value);
        self.channel = None;
        self.version = None;
    }

    pub fn choose_channel(&mut self, value: &str) {
        self.channel = real_value(value);
        self.version = None;
    }

    /// Only a version offered for the current platform and channel is accepted
    pub fn choose_version(&mut self, value: &str) {
        self.version = real_value(value).filter(|v| self.versions().contains(v));
    }

    pub fn submit_visible(&self) -> bool {
        self.version.is_some()
    }

    /// Resolve the selection to its release notes URL; `None` while incomplete
    pub fn submit(&self) -> Option<Result<Url, ExtensionError>> {
        match (&self.platform, &self.channel, &self.version) {
            (Some(platform), Some(channel), Some(version)) => {
                Some(release_notes_url(platform, channel, version))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReleaseTable {
        let mut table = ReleaseTable::new();
        table.insert("android_beta".to_string(), vec!["119.0".to_string(), "120.0".to_string()]);
        table.insert("android_release".to_string(), vec!["119.1.0".to_string()]);
        table.insert("desktop_aurora".to_string(), vec!["27.0a2".to_string(), "28.0".to_string(), "35.0a2".to_string()]);
        table.insert("desktop_esr".to_string(), vec!["115.5.0".to_string()]);
        table.insert("ios_release".to_string(), vec!["121.0".to_string()]);
        table
    }

    fn values(choices: &Choices) -> Vec<&str> {
        choices.options.iter().map(|o| o.value.as_str()).collect()
    }

    fn labels(choices: &Choices) -> Vec<&str> {
        choices.options.iter().map(|o| o.label.as_str()).collect()
    }

    fn url_for(platform: &str, channel: &str, version: &str) -> String {
        let mut selection = Selection::new(table());
        selection.choose_platform(platform);
        selection.choose_channel(channel);
        selection.choose_version(version);
        selection.submit().unwrap().unwrap().to_string()
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("esr"), "ESR");
        assert_eq!(display_name("aurora"), "Aurora (Legacy)");
        assert_eq!(display_name("ios"), "iOS");
        assert_eq!(display_name("android"), "Android");
        assert_eq!(display_name("nightly"), "Nightly");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_no_data_without_releases() {
        assert_eq!(SelectorContext::from_releases(None), SelectorContext::NoData);
        assert_eq!(SelectorContext::from_releases(Some(ReleaseTable::new())), SelectorContext::NoData);
        assert!(matches!(SelectorContext::from_releases(Some(table())), SelectorContext::Ready(_)));
    }

    #[test]
    fn test_no_data_view_is_inert() {
        let view = SelectorContext::from_releases(None).view();

        for control in [&view.platform, &view.channel, &view.version] {
            assert_eq!(control.choices.placeholder, NO_CONNECTION_LABEL);
            assert!(control.choices.options.is_empty());
            assert_eq!(control.selected, None);
            assert!(!control.interactive);
        }
        assert!(!view.submit_visible);
    }

    #[test]
    fn test_ready_view_tracks_selection() {
        let mut selection = Selection::new(table());
        selection.choose_platform("android");
        selection.choose_channel("beta");
        selection.choose_version("120.0");

        let view = SelectorContext::Ready(selection).view();

        assert!(view.platform.interactive && view.channel.interactive && view.version.interactive);
        assert_eq!(view.platform.selected.as_deref(), Some("android"));
        assert_eq!(view.channel.selected.as_deref(), Some("beta"));
        assert_eq!(view.version.selected.as_deref(), Some("120.0"));
        assert_eq!(values(&view.version.choices), vec!["119.0", "120.0"]);
        assert!(view.submit_visible);
    }

    #[test]
    fn test_initial_state() {
        let selection = Selection::new(table());

        let platforms = selection.platform_choices();
        assert_eq!(values(&platforms), vec!["android", "desktop", "ios"]);
        assert_eq!(labels(&platforms), vec!["Android", "Desktop", "iOS"]);
        assert_eq!(selection.channel_choices(), Choices::empty("Select Platform First"));
        assert_eq!(selection.version_choices(), Choices::empty("Select Channel First"));
        assert!(!selection.submit_visible());
        assert!(selection.submit().is_none());
    }

    #[test]
    fn test_platform_choice_lists_its_channels() {
        let mut selection = Selection::new(table());

        selection.choose_platform("desktop");

        let channels = selection.channel_choices();
        assert_eq!(channels.placeholder, "Select Channel");
        assert_eq!(values(&channels), vec!["aurora", "esr"]);
        assert_eq!(labels(&channels), vec!["Aurora (Legacy)", "ESR"]);
        assert_eq!(selection.version_choices().placeholder, "Select Channel First");
    }

    #[test]
    fn test_unknown_platform_shows_placeholder() {
        let mut selection = Selection::new(table());

        selection.choose_platform("linux");

        assert_eq!(selection.channel_choices(), Choices::empty("Select Platform First"));
    }

    #[test]
    fn test_channel_choice_lists_sorted_versions() {
        let mut selection = Selection::new(table());
        selection.choose_platform("android");

        selection.choose_channel("beta");

        let versions = selection.version_choices();
        assert_eq!(versions.placeholder, "Select Version");
        assert_eq!(values(&versions), vec!["119.0", "120.0"]);
        assert!(!selection.submit_visible());
    }

    #[test]
    fn test_changing_platform_resets_lower_levels() {
        let mut selection = Selection::new(table());
        selection.choose_platform("android");
        selection.choose_channel("beta");
        selection.choose_version("120.0");
        assert!(selection.submit_visible());

        selection.choose_platform("ios");

        assert_eq!(selection.channel(), None);
        assert_eq!(selection.version(), None);
        assert!(!selection.submit_visible());
        assert_eq!(selection.version_choices().placeholder, "Select Channel First");
    }

    #[test]
    fn test_changing_channel_resets_version() {
        let mut selection = Selection::new(table());
        selection.choose_platform("android");
        selection.choose_channel("beta");
        selection.choose_version("119.0");

        selection.choose_channel("release");

        assert_eq!(selection.version(), None);
        assert!(!selection.submit_visible());
    }

    #[test]
    fn test_placeholder_version_keeps_submit_hidden() {
        let mut selection = Selection::new(table());
        selection.choose_platform("android");
        selection.choose_channel("beta");

        selection.choose_version(PLACEHOLDER_VALUE);
        assert!(!selection.submit_visible());

        selection.choose_version("99.0");
        assert!(!selection.submit_visible());
        assert!(selection.submit().is_none());
    }

    #[test]
    fn test_legacy_aurora_notes() {
        assert_eq!(
            url_for("desktop", "aurora", "28.0"),
            "https://www.mozilla.org/en-US/firefox/28.0/auroranotes/"
        );
        assert_eq!(
            url_for("desktop", "aurora", "27.0a2"),
            "https://www.mozilla.org/en-US/firefox/27.0a2/auroranotes/"
        );
        assert_eq!(
            url_for("desktop", "aurora", "35.0a2"),
            "https://www.mozilla.org/en-US/firefox/35.0a2/releasenotes/"
        );
    }

    #[test]
    fn test_platform_segment_in_url() {
        assert_eq!(
            url_for("android", "beta", "120.0"),
            "https://www.mozilla.org/en-US/firefox/android/120.0/releasenotes/"
        );
        assert_eq!(
            url_for("ios", "release", "121.0"),
            "https://www.mozilla.org/en-US/firefox/ios/121.0/releasenotes/"
        );
        assert_eq!(
            url_for("desktop", "esr", "115.5.0"),
            "https://www.mozilla.org/en-US/firefox/115.5.0/releasenotes/"
        );
    }

    #[test]
    fn test_release_notes_url_only_applies_aurora_rule_to_desktop() {
        let url = release_notes_url("android", "aurora", "28.0").unwrap();

        assert_eq!(url.as_str(), "https://www.mozilla.org/en-US/firefox/android/28.0/releasenotes/");
    }
}
