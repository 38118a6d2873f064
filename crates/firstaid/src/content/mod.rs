//! Localized guidance content.
//!
//! The content provider is a pure function of the language: [`get_content`]
//! builds a complete [`ContentBundle`] (UI strings, home labels, one
//! [`StepList`] per flow and the default kit) every time it is called. Step
//! lists for a given flow are positionally aligned across languages, which is
//! what lets a running session swap languages without losing its place.

mod arabic;
mod english;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::kit::KitItem;

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English, left-to-right.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Arabic, right-to-left.
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// The short language code (`en` / `ar`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
        }
    }

    /// Parse a language code strictly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLanguage`] for anything other than `en` or `ar`.
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::English),
            "ar" => Ok(Self::Arabic),
            _ => Err(Error::unknown_language(code)),
        }
    }

    /// Parse a language code, falling back to English for unknown codes.
    #[must_use]
    pub fn from_code_lossy(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to English content");
            Self::English
        })
    }

    /// Text direction the presentation layer should apply for this language.
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::English => TextDirection::LeftToRight,
            Self::Arabic => TextDirection::RightToLeft,
        }
    }

    /// The other language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::English => Self::Arabic,
            Self::Arabic => Self::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// Process-wide text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextDirection {
    /// Left to right (`ltr`).
    #[serde(rename = "ltr")]
    LeftToRight,
    /// Right to left (`rtl`).
    #[serde(rename = "rtl")]
    RightToLeft,
}

impl TextDirection {
    /// The HTML-style direction attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "ltr",
            Self::RightToLeft => "rtl",
        }
    }
}

/// What to show alongside a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepVisual {
    /// A named icon from the presentation layer's icon set.
    Icon(String),
    /// A path or URL to an illustration.
    Image(String),
    /// Nothing.
    None,
}

/// One instructional unit within a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideStep {
    /// Short heading.
    pub title: String,
    /// Instruction text; this is what gets narrated.
    pub instruction: String,
    /// Icon or illustration.
    pub visual: StepVisual,
    /// Optional caution shown under the instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Countdown length in seconds, when the step has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_seconds: Option<u32>,
}

impl GuideStep {
    /// Create a step with no visual, warning or timer.
    #[must_use]
    pub fn new(title: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            instruction: instruction.into(),
            visual: StepVisual::None,
            warning: None,
            timer_seconds: None,
        }
    }

    /// Attach an icon.
    #[must_use]
    pub fn icon(mut self, id: impl Into<String>) -> Self {
        self.visual = StepVisual::Icon(id.into());
        self
    }

    /// Attach an illustration. Replaces any icon.
    #[must_use]
    pub fn image(mut self, reference: impl Into<String>) -> Self {
        self.visual = StepVisual::Image(reference.into());
        self
    }

    /// Attach a warning.
    #[must_use]
    pub fn warning(mut self, text: impl Into<String>) -> Self {
        self.warning = Some(text.into());
        self
    }

    /// Attach a countdown.
    #[must_use]
    pub fn timer(mut self, seconds: u32) -> Self {
        self.timer_seconds = Some(seconds);
        self
    }
}

/// An ordered, non-empty list of steps.
///
/// Non-emptiness holds by construction: the only constructor takes the first
/// step separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepList {
    steps: Vec<GuideStep>,
}

impl StepList {
    /// Build a list from its first step and the remaining ones.
    #[must_use]
    pub fn new(first: GuideStep, rest: Vec<GuideStep>) -> Self {
        let mut steps = Vec::with_capacity(rest.len() + 1);
        steps.push(first);
        steps.extend(rest);
        Self { steps }
    }

    /// Number of steps (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Step at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GuideStep> {
        self.steps.get(index)
    }

    /// Iterate over the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, GuideStep> {
        self.steps.iter()
    }
}

impl std::ops::Index<usize> for StepList {
    type Output = GuideStep;

    /// # Panics
    ///
    /// Panics if `index` is out of range. Engines clamp their cursor, so this
    /// only fires on a broken invariant.
    fn index(&self, index: usize) -> &GuideStep {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a StepList {
    type Item = &'a GuideStep;
    type IntoIter = std::slice::Iter<'a, GuideStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build a [`StepList`] from one or more steps.
macro_rules! step_list {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::content::StepList::new($first, vec![$($rest),*])
    };
}
pub(crate) use step_list;

/// Every step list the content provider supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Severe bleeding.
    Bleeding,
    /// Burns and scalds.
    Burns,
    /// Cuts and grazes.
    Wounds,
    /// Fainting, person responsive.
    FaintingConscious,
    /// Fainting, person unresponsive.
    FaintingUnconscious,
    /// CPR for adults.
    CprAdult,
    /// CPR for children.
    CprChild,
    /// CPR for infants.
    CprInfant,
}

impl FlowKind {
    /// Every flow.
    pub const ALL: [FlowKind; 8] = [
        FlowKind::Bleeding,
        FlowKind::Burns,
        FlowKind::Wounds,
        FlowKind::FaintingConscious,
        FlowKind::FaintingUnconscious,
        FlowKind::CprAdult,
        FlowKind::CprChild,
        FlowKind::CprInfant,
    ];

    /// Stable identifier used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bleeding => "bleeding",
            Self::Burns => "burns",
            Self::Wounds => "wounds",
            Self::FaintingConscious => "fainting-conscious",
            Self::FaintingUnconscious => "fainting-unconscious",
            Self::CprAdult => "cpr-adult",
            Self::CprChild => "cpr-child",
            Self::CprInfant => "cpr-infant",
        }
    }

    /// Look a flow up by its [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Localized interface strings.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiStrings {
    pub back: String,
    pub next: String,
    pub finish: String,
    pub call_emergency: String,
    pub reset: String,
    pub cancel: String,
    pub save: String,
    pub edit: String,
    pub delete: String,
    pub add_item: String,
    pub manage_kit: String,
    pub item_name: String,
    pub description: String,
    pub status: String,
    pub quantity: String,
    pub available: String,
    pub low: String,
    pub expired: String,
    pub step: String,
    pub of: String,
    pub cooling_timer: String,
    pub start: String,
    pub pause: String,
    pub ensure_safety: String,
    pub continue_cpr: String,
    pub rhythm_guide: String,
    pub exit_emergency: String,
    pub safety_disclaimer: String,
    pub fainting_question: String,
    pub conscious: String,
    pub unconscious: String,
    pub item_deleted: String,
    pub changes_saved: String,
    pub confirm_delete: String,
    pub select_age: String,
    pub adult: String,
    pub child: String,
    pub infant: String,
    pub adult_years: String,
    pub child_years: String,
    pub infant_years: String,
    pub muted: String,
    pub unmuted: String,
}

/// Labels for the home screen grid.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeLabels {
    pub cpr: String,
    pub bleeding: String,
    pub burns: String,
    pub wounds: String,
    pub fainting: String,
    pub kit: String,
    pub tap_help: String,
}

/// Everything the presentation layer needs for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBundle {
    /// Language this bundle was built for.
    pub language: Language,
    /// Interface strings.
    pub ui: UiStrings,
    /// Home screen labels.
    pub home: HomeLabels,
    /// Bleeding flow.
    pub bleeding_steps: StepList,
    /// Burns flow.
    pub burns_steps: StepList,
    /// Wounds flow.
    pub wounds_steps: StepList,
    /// Fainting flow, conscious branch.
    pub fainting_conscious: StepList,
    /// Fainting flow, unconscious branch.
    pub fainting_unconscious: StepList,
    /// Adult CPR.
    pub cpr_adult_steps: StepList,
    /// Child CPR.
    pub cpr_child_steps: StepList,
    /// Infant CPR.
    pub cpr_infant_steps: StepList,
    /// Kit contents used when nothing has been saved yet.
    pub default_kit: Vec<KitItem>,
}

impl ContentBundle {
    /// The step list for a flow.
    #[must_use]
    pub fn steps(&self, kind: FlowKind) -> &StepList {
        match kind {
            FlowKind::Bleeding => &self.bleeding_steps,
            FlowKind::Burns => &self.burns_steps,
            FlowKind::Wounds => &self.wounds_steps,
            FlowKind::FaintingConscious => &self.fainting_conscious,
            FlowKind::FaintingUnconscious => &self.fainting_unconscious,
            FlowKind::CprAdult => &self.cpr_adult_steps,
            FlowKind::CprChild => &self.cpr_child_steps,
            FlowKind::CprInfant => &self.cpr_infant_steps,
        }
    }

    /// Screen title for a flow, e.g. "Fainting (Conscious)".
    #[must_use]
    pub fn flow_title(&self, kind: FlowKind) -> String {
        match kind {
            FlowKind::Bleeding => self.home.bleeding.clone(),
            FlowKind::Burns => self.home.burns.clone(),
            FlowKind::Wounds => self.home.wounds.clone(),
            FlowKind::FaintingConscious => {
                format!("{} ({})", self.home.fainting, self.ui.conscious)
            }
            FlowKind::FaintingUnconscious => {
                format!("{} ({})", self.home.fainting, self.ui.unconscious)
            }
            FlowKind::CprAdult => format!("{} | {}", self.home.cpr, self.ui.adult),
            FlowKind::CprChild => format!("{} | {}", self.home.cpr, self.ui.child),
            FlowKind::CprInfant => format!("{} | {}", self.home.cpr, self.ui.infant),
        }
    }
}

/// Build the content bundle for a language.
#[must_use]
pub fn get_content(language: Language) -> ContentBundle {
    match language {
        Language::English => english::bundle(),
        Language::Arabic => arabic::bundle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::{detect_script, Script};

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Arabic.code(), "ar");
        assert_eq!(Language::from_code("AR").unwrap(), Language::Arabic);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn test_unknown_language_is_strict_error() {
        let err = Language::from_code("fr").unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage { .. }));
    }

    #[test]
    fn test_unknown_language_lossy_falls_back() {
        assert_eq!(Language::from_code_lossy("fr"), Language::English);
        assert_eq!(Language::from_code_lossy("ar"), Language::Arabic);
    }

    #[test]
    fn test_direction_and_toggle() {
        assert_eq!(Language::English.direction(), TextDirection::LeftToRight);
        assert_eq!(Language::Arabic.direction().as_str(), "rtl");
        assert_eq!(Language::English.toggled(), Language::Arabic);
        assert_eq!(Language::Arabic.toggled().toggled(), Language::Arabic);
    }

    #[test]
    fn test_get_content_is_deterministic() {
        assert_eq!(get_content(Language::Arabic), get_content(Language::Arabic));
        assert_eq!(get_content(Language::English).language, Language::English);
    }

    #[test]
    fn test_step_lists_aligned_across_languages() {
        let en = get_content(Language::English);
        let ar = get_content(Language::Arabic);
        for kind in FlowKind::ALL {
            assert_eq!(en.steps(kind).len(), ar.steps(kind).len(), "{kind}");
            for (a, b) in en.steps(kind).iter().zip(ar.steps(kind)) {
                assert_eq!(a.timer_seconds, b.timer_seconds, "{kind}");
                assert_eq!(a.visual, b.visual, "{kind}");
            }
        }
        assert_eq!(en.default_kit.len(), ar.default_kit.len());
    }

    #[test]
    fn test_instructions_match_script() {
        for kind in FlowKind::ALL {
            for step in get_content(Language::Arabic).steps(kind) {
                assert_eq!(detect_script(&step.instruction), Script::Arabic);
            }
            for step in get_content(Language::English).steps(kind) {
                assert_eq!(detect_script(&step.instruction), Script::Latin);
            }
        }
    }

    #[test]
    fn test_cpr_lists_reach_compressions() {
        let content = get_content(Language::English);
        for kind in [FlowKind::CprAdult, FlowKind::CprChild, FlowKind::CprInfant] {
            assert!(content.steps(kind).len() > 3, "{kind}");
        }
    }

    #[test]
    fn test_burns_cooling_timer() {
        let content = get_content(Language::English);
        let timed: Vec<_> = content
            .burns_steps
            .iter()
            .filter_map(|s| s.timer_seconds)
            .collect();
        assert_eq!(timed, vec![600]);
    }

    #[test]
    fn test_step_list_bounds() {
        let list = step_list![GuideStep::new("a", "one"), GuideStep::new("b", "two")];
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert_eq!(list.last_index(), 1);
        assert!(list.get(2).is_none());

        let single = step_list![GuideStep::new("only", "one")];
        assert_eq!(single.last_index(), 0);
    }

    #[test]
    fn test_guide_step_builder() {
        let step = GuideStep::new("t", "i")
            .icon("flame")
            .warning("careful")
            .timer(30);
        assert_eq!(step.visual, StepVisual::Icon("flame".to_string()));
        assert_eq!(step.warning.as_deref(), Some("careful"));
        assert_eq!(step.timer_seconds, Some(30));

        let step = step.image("img/burn.png");
        assert_eq!(step.visual, StepVisual::Image("img/burn.png".to_string()));
    }

    #[test]
    fn test_flow_kind_names_round_trip() {
        for kind in FlowKind::ALL {
            assert_eq!(FlowKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(FlowKind::from_name("sprains"), None);
    }

    #[test]
    fn test_flow_titles() {
        let content = get_content(Language::English);
        assert_eq!(content.flow_title(FlowKind::Burns), "Burns");
        assert_eq!(
            content.flow_title(FlowKind::FaintingConscious),
            "Fainting (Conscious)"
        );
    }

    #[test]
    fn test_bundle_serializes() {
        let json = serde_json::to_string(&get_content(Language::Arabic)).unwrap();
        assert!(json.contains("\"language\":\"ar\""));
        assert!(json.contains("\"kind\":\"icon\""));
    }
}
