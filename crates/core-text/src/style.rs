//! Host-supplied style tokens.
//!
//! A [`StyleToken`] is an opaque render function owned by the host: the text
//! layer calls it on a plain substring and splices the result in verbatim. It
//! never inspects what the token produces.

use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct StyleToken(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl StyleToken {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(render))
    }

    /// Wrap text in `ESC[<params>m ... ESC[0m`.
    pub fn sgr(params: impl Into<String>) -> Self {
        let params = params.into();
        Self::new(move |text| format!("\x1b[{params}m{text}\x1b[0m"))
    }

    pub fn render(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StyleToken(..)")
    }
}
