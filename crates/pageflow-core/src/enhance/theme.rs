use tracing::debug;

use crate::host::Host;
use crate::Result;

/// Mark the body when the host prefers a dark color scheme
pub fn apply_preferred_theme<H: Host>(host: &mut H, dark_class: &str) -> Result<bool> {
    if !host.prefers_dark_scheme() {
        return Ok(false);
    }
    let Some(body) = host.body() else {
        return Ok(false);
    };
    host.add_class(body, dark_class)?;
    debug!("dark theme applied");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_dark_preference_marks_body() {
        let mut host = FakeHost::new();
        let body = host.add("body").id();
        assert!(!apply_preferred_theme(&mut host, "dark-theme").unwrap());

        host.prefers_dark = true;
        assert!(apply_preferred_theme(&mut host, "dark-theme").unwrap());
        assert!(host.has_class(body, "dark-theme"));
    }
}
