use std::borrow::Cow;

/// Escape HTML metacharacters so `text` can be embedded in markup or in an
/// attribute value verbatim.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their entity forms. Returns
/// `Cow::Borrowed` when no escaping is needed, avoiding allocation.
pub fn escape(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Whether `url` is acceptable as a link target: absolute `http(s)`, an
/// absolute path, or an in-page anchor. Everything else (`javascript:`,
/// `data:`, relative paths, ...) is rejected.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with('/')
        || url.starts_with('#')
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// An HTML fragment under construction.
///
/// External text can only enter through [`Fragment::text`], which escapes it;
/// markup the caller authors itself enters through [`Fragment::markup`].
/// Rendering code therefore cannot concatenate an unescaped external string
/// into the output by accident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Append external text, escaping it.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.0.push_str(&escape(text));
        self
    }

    /// Append literal markup. The caller asserts that `markup` is
    /// well-formed HTML containing no unescaped external input.
    pub fn markup(&mut self, markup: &str) -> &mut Self {
        self.0.push_str(markup);
        self
    }

    /// Append another fragment.
    pub fn fragment(&mut self, other: &Fragment) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
