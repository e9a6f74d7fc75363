//! Server-side session state resumed by the purchase callback.

use serde_json::{Map, Value};

use crate::domain::ItemId;

/// Validation errors for [`SessionId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    #[error("session id must not be empty")]
    Empty,
}

/// Opaque identifier of a stored session.
///
/// The only constraint is non-emptiness. Whitespace and arbitrary Unicode are
/// kept verbatim because the value is minted by whichever component created
/// the session.
///
/// # Examples
/// ```
/// use purchase_recorder::domain::SessionId;
///
/// let id = SessionId::new("k1f9a0").expect("non-empty id");
/// assert_eq!(id.as_str(), "k1f9a0");
/// assert!(SessionId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SessionIdError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resumed session contents.
///
/// [`SessionState::purchased`] always yields a list, empty until the first
/// accepted item. Whether the list exists in storage is tracked separately:
/// it is created by the first non-empty append and never removed, so a
/// session that stored an empty list keeps it. Keys owned by other parts of
/// the application are carried in `attributes` untouched so a resume/save
/// cycle never drops them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    id: SessionId,
    purchased: Option<Vec<ItemId>>,
    attributes: Map<String, Value>,
}

impl SessionState {
    /// Fresh session with no purchases and no attributes.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self::from_parts(id, None, Map::new())
    }

    /// Rebuild a session from stored parts. `purchased` is `None` when the
    /// stored session has no purchased list at all.
    #[must_use]
    pub fn from_parts(
        id: SessionId,
        purchased: Option<Vec<ItemId>>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            purchased,
            attributes,
        }
    }

    /// Identifier the session was resumed under.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Purchased items in the order they were recorded.
    #[must_use]
    pub fn purchased(&self) -> &[ItemId] {
        self.purchased.as_deref().unwrap_or_default()
    }

    /// Whether the session holds a purchased list, even an empty one.
    #[must_use]
    pub fn has_purchased_list(&self) -> bool {
        self.purchased.is_some()
    }

    /// Other session keys, preserved verbatim.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Append items to the purchased list. No deduplication.
    ///
    /// The list is created on the first appended item; appending nothing
    /// leaves the session exactly as it was.
    ///
    /// # Examples
    /// ```
    /// use purchase_recorder::domain::{ItemId, SessionId, SessionState};
    ///
    /// let mut session = SessionState::new(SessionId::new("abc").expect("id"));
    /// session.append_purchases([ItemId::new(5), ItemId::new(5)]);
    /// assert!(!session.has_purchased_list());
    /// session.append_purchases([ItemId::new(5), ItemId::new(5)]);
    /// assert_eq!(session.purchased(), &[ItemId::new(5), ItemId::new(5)]);
    /// ```
    pub fn append_purchases(&mut self, items: impl IntoIterator<Item = ItemId>) {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return;
        }
        self.purchased.get_or_insert_with(Vec::new).extend(items);
    }

    /// Split into stored parts.
    #[must_use]
    pub fn into_parts(self) -> (SessionId, Option<Vec<ItemId>>, Map<String, Value>) {
        (self.id, self.purchased, self.attributes)
    }
}
