//! Testing utilities for the policy viewer workspace
//!
//! Shared fixtures, anchors and collaborator doubles.

#![allow(missing_docs)]

use pv_catalog::{Catalog, Subtopic, Topic};
use pv_navigation::{Anchor, Clipboard, CollaboratorError, PreferenceStore, ViewerConfig};
use pv_render::{Displayable, PresentationMode, RenderError, TextRenderer, Theme};

/// Two topics, three entries; names and bodies chosen so filters can tell
/// metadata matches from body matches.
pub fn sample_topics() -> Vec<Topic> {
    vec![
        Topic::new(
            "Conversions",
            vec![
                Subtopic::named("2A Conversion")
                    .with_description("The object type has commas in numbers")
                    .with_thought("The `GMV` column is stored as text with commas.")
                    .with_summary("Converted **GMV** to a numeric column.")
                    .with_code("df['GMV'] = df['GMV'].str.replace(',', '').astype(float)"),
                Subtopic::named("Datetime Conversion")
                    .with_description("A date-like column is stored as object")
                    .with_thought("Parse `Order Date` before grouping.")
                    .with_summary("Converted the order date.")
                    .with_code("df['Order Date'] = pd.to_datetime(df['Order Date'])"),
            ],
        ),
        Topic::new(
            "Visualization",
            vec![
                Subtopic::named("6L")
                    .with_description("Sorting by list on user request")
                    .with_thought("Keep the category order the user gave.")
                    .with_summary("Plotted bars in the requested order.")
                    .with_code("fig = px.bar(df, x='Region', y='Sales')"),
                Subtopic::named("Axis labels")
                    .with_description("Readable labels")
                    .with_code("fig.update_layout(xaxis_title='Region')"),
                Subtopic::named("Legend placement")
                    .with_description("Legend overlaps bars")
                    .with_code("fig.update_layout(legend=dict(x=1.02))"),
            ],
        ),
    ]
}

pub fn sample_catalog() -> Catalog {
    Catalog::load(sample_topics())
}

pub fn test_config() -> ViewerConfig {
    ViewerConfig::default().with_location("https://policies.example.com", "/viewer")
}

pub fn anchor(address: &str, top: f64, bottom: f64) -> Anchor {
    Anchor::new(address, top, bottom)
}

/// Anchors for the first entry of the first topic, laid out as a page with
/// the description ending at 120 and the thought running to 400.
pub fn first_entry_anchors() -> Vec<Anchor> {
    vec![
        anchor("topic-0", 0.0, 1000.0),
        anchor("subtopic-0-0", 0.0, 400.0),
        anchor("section-0-0-description", 0.0, 120.0),
        anchor("section-0-0-golden-example-thought", 120.0, 400.0),
    ]
}

/// Clipboard that records every write
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub writes: Vec<String>,
}

impl RecordingClipboard {
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl Clipboard for RecordingClipboard {
    fn write(&mut self, text: &str) -> Result<(), CollaboratorError> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Clipboard that rejects every write
#[derive(Debug, Default)]
pub struct FailingClipboard {
    pub attempts: usize,
}

impl Clipboard for FailingClipboard {
    fn write(&mut self, _text: &str) -> Result<(), CollaboratorError> {
        self.attempts += 1;
        Err(CollaboratorError::Clipboard("permission denied".to_string()))
    }
}

/// Preference store that fails every read and write
#[derive(Debug, Default)]
pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn get(&self, _key: &str) -> Result<Option<String>, CollaboratorError> {
        Err(CollaboratorError::PreferenceStore("storage disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::PreferenceStore("storage disabled".to_string()))
    }
}

/// Renderer that fails on bodies containing a marker and echoes the rest
#[derive(Debug)]
pub struct FlakyRenderer {
    pub fail_on: &'static str,
}

impl TextRenderer for FlakyRenderer {
    fn render(
        &self,
        text: &str,
        mode: PresentationMode,
        _theme: Theme,
    ) -> Result<Displayable, RenderError> {
        if text.contains(self.fail_on) {
            Err(RenderError::Markup(format!("cannot parse body containing {}", self.fail_on)))
        } else {
            Ok(Displayable::new(mode, text.to_string()))
        }
    }
}
