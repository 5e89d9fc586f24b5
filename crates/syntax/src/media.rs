//! Media lists.

use std::fmt;

/// A list of media type names, as written after `@media` or in a `media`
/// attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaList {
    media: Vec<String>,
}

impl MediaList {
    pub fn new<I, S>(media: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            media: media.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.media.iter().map(String::as_str)
    }

    /// Whether a rule or sheet restricted to `self` applies under the
    /// `active` media.
    ///
    /// An empty list on either side matches everything. Otherwise an `all`
    /// entry on either side, or any case-insensitive name in common, matches.
    ///
    /// ```
    /// use css_syntax::MediaList;
    ///
    /// let print = MediaList::new(["print"]);
    /// assert!(!print.matches(&MediaList::new(["screen"])));
    /// assert!(print.matches(&MediaList::new(["all"])));
    /// assert!(print.matches(&MediaList::default()));
    /// ```
    pub fn matches(&self, active: &MediaList) -> bool {
        if self.is_empty() || active.is_empty() {
            return true;
        }
        let is_all = |m: &str| m.eq_ignore_ascii_case("all");
        if self.iter().any(is_all) || active.iter().any(is_all) {
            return true;
        }
        self.iter()
            .any(|m| active.iter().any(|a| a.eq_ignore_ascii_case(m)))
    }
}

impl fmt::Display for MediaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.media.join(", "))
    }
}
