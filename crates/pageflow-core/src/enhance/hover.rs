use crate::config::InteractionConfig;
use crate::host::{ElementId, EventKind, EventTarget, Host, StyleProp};
use crate::selector::page;
use crate::Result;

/// Lift-on-hover for `.btn` and `.card`, plus the button press dip
#[derive(Debug, Clone)]
pub struct HoverEffects {
    buttons: Vec<ElementId>,
    cards: Vec<ElementId>,
    config: InteractionConfig,
}

impl HoverEffects {
    pub fn attach<H: Host>(host: &mut H, config: &InteractionConfig) -> Self {
        let buttons = host.query(&page::buttons());
        let cards = host.query(&page::cards());

        for &element in buttons.iter().chain(cards.iter()) {
            host.listen(EventTarget::Element(element), EventKind::MouseEnter);
            host.listen(EventTarget::Element(element), EventKind::MouseLeave);
        }
        for &button in &buttons {
            host.listen(EventTarget::Element(button), EventKind::Click);
        }

        Self {
            buttons,
            cards,
            config: config.clone(),
        }
    }

    pub fn is_button(&self, element: ElementId) -> bool {
        self.buttons.contains(&element)
    }

    fn is_card(&self, element: ElementId) -> bool {
        self.cards.contains(&element)
    }

    fn lifted(&self) -> String {
        format!("translateY(-{}px)", self.config.lift_px)
    }

    pub fn on_enter<H: Host>(&self, host: &mut H, element: ElementId) -> Result<()> {
        if self.is_button(element) || self.is_card(element) {
            host.set_style(element, StyleProp::Transform, &self.lifted())?;
            host.set_style(element, StyleProp::BoxShadow, &self.config.hover_shadow)?;
        }
        Ok(())
    }

    pub fn on_leave<H: Host>(&self, host: &mut H, element: ElementId) -> Result<()> {
        if self.is_button(element) {
            host.set_style(element, StyleProp::Transform, "translateY(0)")?;
            host.set_style(element, StyleProp::BoxShadow, "")?;
        }
        // Cards restore their resting shadow; this runs after the button reset
        if self.is_card(element) {
            host.set_style(element, StyleProp::Transform, "translateY(0)")?;
            host.set_style(element, StyleProp::BoxShadow, &self.config.card_rest_shadow)?;
        }
        Ok(())
    }

    /// Push a clicked button down. Returns true when the caller should
    /// schedule [`HoverEffects::release`] after `press_release_ms`.
    pub fn on_press<H: Host>(&self, host: &mut H, element: ElementId) -> Result<bool> {
        if !self.is_button(element) {
            return Ok(false);
        }
        host.set_style(element, StyleProp::Transform, "translateY(0)")?;
        Ok(true)
    }

    pub fn release<H: Host>(&self, host: &mut H, element: ElementId) -> Result<()> {
        host.set_style(element, StyleProp::Transform, &self.lifted())
    }

    pub fn press_release_ms(&self) -> u64 {
        self.config.press_release_ms
    }
}
