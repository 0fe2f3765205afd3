//! TOML scenarios: a page description plus timed user actions.
//!
//! ```toml
//! viewport = { width = 1280, height = 800 }
//!
//! [[elements]]
//! tag = "section"
//! key = "about"
//! attrs = { id = "about" }
//! layout = { top = 900, width = 1280, height = 600 }
//!
//! [[steps]]
//! at_ms = 100
//! action = "scroll"
//! to = 400
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use pageflow_core::{CoordinatorSnapshot, EnhanceConfig, Host, Millis, Viewport};

use crate::dom::{ElementSpec, SimDocument};
use crate::error::{Result, SimError};
use crate::host::{Mutation, SimHost};
use crate::page::{Dispatched, SimPage};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub prefers_dark: bool,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: Millis,
    #[serde(flatten)]
    pub action: Action,
}

/// User actions; elements are referred to by key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Scroll { to: f64 },
    Resize { width: f64, height: f64 },
    Click { element: String },
    Hover { element: String },
    Leave { element: String },
    Key { key: String },
    Input { element: String, value: String },
    Submit { element: String },
    Error { message: String },
    Reject { reason: String },
    /// Only move the clock
    Wait,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        Ok(scenario)
    }

    /// Build the simulated page. Parents must appear before their children.
    pub fn build_host(&self) -> Result<SimHost> {
        let mut doc = SimDocument::new();
        for spec in &self.elements {
            if let Some(key) = &spec.key {
                if doc.by_key(key).is_some() {
                    return Err(SimError::DuplicateKey(key.clone()));
                }
            }
            let parent = spec
                .parent
                .as_deref()
                .map(|key| doc.by_key(key).ok_or_else(|| SimError::UnknownKey(key.to_string())))
                .transpose()?;
            doc.insert(spec.clone(), parent);
        }
        Ok(SimHost::new(doc, self.viewport).with_dark_preference(self.prefers_dark))
    }
}

/// Final state of a replayed scenario
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub finished_at: Millis,
    pub scroll_offset: f64,
    pub coordinator: CoordinatorSnapshot,
    pub dispatched: Vec<Dispatched>,
    pub mutations: Vec<Mutation>,
}

/// Step-by-step scenario execution
pub struct Replay {
    page: SimPage,
}

impl Replay {
    pub fn start(scenario: &Scenario, config: EnhanceConfig) -> Result<Self> {
        let host = scenario.build_host()?;
        let page = SimPage::load(host, config)?;
        info!(
            elements = scenario.elements.len(),
            steps = scenario.steps.len(),
            "scenario loaded"
        );
        Ok(Self { page })
    }

    pub fn page(&self) -> &SimPage {
        &self.page
    }

    /// Advance to the step's time and perform its action
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        self.page.advance_to(step.at_ms)?;
        let page = &mut self.page;
        match &step.action {
            Action::Scroll { to } => {
                page.scroll_to(*to);
            }
            Action::Resize { width, height } => {
                page.resize(*width, *height);
            }
            Action::Click { element } => {
                let id = page.element(element)?;
                page.click(id);
            }
            Action::Hover { element } => {
                let id = page.element(element)?;
                page.hover(id);
            }
            Action::Leave { element } => {
                let id = page.element(element)?;
                page.leave(id);
            }
            Action::Key { key } => {
                page.key(key);
            }
            Action::Input { element, value } => {
                let id = page.element(element)?;
                page.set_value(id, value)?;
            }
            Action::Submit { element } => {
                let id = page.element(element)?;
                page.submit(id);
            }
            Action::Error { message } => {
                page.raise_error(message);
            }
            Action::Reject { reason } => {
                page.reject(reason);
            }
            Action::Wait => {}
        }
        Ok(())
    }

    /// Let pending work run out and report the final state
    pub fn finish(mut self) -> Result<ReplayReport> {
        let finished_at = self.page.run_until_idle()?;
        Ok(ReplayReport {
            finished_at,
            scroll_offset: self.page.host().scroll_offset(),
            coordinator: self.page.snapshot(),
            dispatched: self.page.dispatched().to_vec(),
            mutations: self.page.host().mutations().to_vec(),
        })
    }

    /// Run every step in order, then settle
    pub fn run(scenario: &Scenario, config: EnhanceConfig) -> Result<ReplayReport> {
        let mut replay = Self::start(scenario, config)?;
        for step in &scenario.steps {
            replay.apply(step)?;
        }
        replay.finish()
    }
}
