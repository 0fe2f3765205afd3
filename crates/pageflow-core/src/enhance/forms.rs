use tracing::{debug, info};

use crate::config::InteractionConfig;
use crate::host::{ElementId, EventKind, EventTarget, Host, StyleProp};
use crate::selector::page;
use crate::Result;

/// Outcome of validating one form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    pub form: ElementId,
    /// Required fields left blank, in document order
    pub invalid: Vec<ElementId>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Presence checks for required form fields
#[derive(Debug, Clone)]
pub struct FormValidator {
    forms: Vec<ElementId>,
    error_color: String,
    clear_after_ms: u64,
}

impl FormValidator {
    pub fn attach<H: Host>(host: &mut H, config: &InteractionConfig) -> Self {
        let forms = host.query(&page::forms());
        for &form in &forms {
            host.listen(EventTarget::Element(form), EventKind::Submit);
        }
        Self {
            forms,
            error_color: config.error_border_color.clone(),
            clear_after_ms: config.error_clear_ms,
        }
    }

    pub fn contains(&self, form: ElementId) -> bool {
        self.forms.contains(&form)
    }

    /// How long the error border stays before [`FormValidator::clear_error`]
    pub fn clear_after_ms(&self) -> u64 {
        self.clear_after_ms
    }

    /// Mark blank required fields. The caller prevents the submission
    /// regardless of the result.
    pub fn validate<H: Host>(&self, host: &mut H, form: ElementId) -> Result<FormReport> {
        let mut invalid = Vec::new();
        for field in host.query_within(form, &page::required_fields()) {
            let blank = host
                .value(field)
                .map_or(true, |value| value.trim().is_empty());
            if blank {
                host.set_style(field, StyleProp::BorderColor, &self.error_color)?;
                invalid.push(field);
            }
        }

        let report = FormReport { form, invalid };
        if report.is_valid() {
            info!(form = %form, "form valid");
        } else {
            debug!(form = %form, invalid = report.invalid.len(), "form has blank required fields");
        }
        Ok(report)
    }

    pub fn clear_error<H: Host>(&self, host: &mut H, field: ElementId) -> Result<()> {
        host.set_style(field, StyleProp::BorderColor, "")
    }
}
