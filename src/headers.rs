//! Raw header block parsing

/// A case-insensitive, multi-valued header mapping built from the raw
/// header text of a message or MIME part.
///
/// Duplicate headers keep every value in original order. Lookups are a
/// linear scan, which is fine at typical header counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    entries: Vec<(String, String)>,
}

impl HeaderBlock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a raw header block into name/value pairs.
    ///
    /// A line starting with whitespace continues the previous retained
    /// header line and is joined with a single space. Blank lines are
    /// dropped. Each logical line splits at the first `": "` occurrence;
    /// a line without one becomes a name with an empty value.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut logical: Vec<String> = Vec::new();
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            if (line.starts_with(' ') || line.starts_with('\t'))
                && let Some(prev) = logical.last_mut()
            {
                prev.push(' ');
                prev.push_str(line.trim_start());
                continue;
            }
            logical.push(line.to_string());
        }

        let entries = logical
            .into_iter()
            .map(|line| match line.split_once(": ") {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => (line, String::new()),
            })
            .collect();

        Self { entries }
    }

    /// Build a block from already-unfolded name/value pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Case-insensitive lookup; the last occurrence wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every value recorded for `name`, in original order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Append a header entry. Existing entries are never overwritten.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Rebuild a displayable header block with title-cased names.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{}: {value}", title_case(key)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Title-case a header name for presentation ("delivered-to" -> "Delivered-To").
fn title_case(name: &str) -> String {
    name.split('-')
        .map(|token| {
            let mut chars = token.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}
