//! The captured error record.
//!
//! This module provides:
//! - [`ErrorRecord`] — One captured application error with its request context
//! - [`NameValues`] — Ordered multi-valued name/value collection
//! - [`NameValue`] — A single pair within a [`NameValues`]

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// A single name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    /// Name of the pair. Names compare ASCII case-insensitively on lookup.
    pub name: String,
    /// Value of the pair.
    pub value: String,
}

/// Ordered collection of name/value pairs where a name may repeat.
///
/// Insertion order is preserved, both across names and among the values
/// of a single name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameValues {
    pairs: Vec<NameValue>,
}

impl NameValues {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a value under `name`, keeping any existing values.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push(NameValue {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Returns the first value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
    }

    /// Returns every value stored under `name`, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Returns the distinct names in first-seen order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for pair in &self.pairs {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&pair.name)) {
                names.push(&pair.name);
            }
        }
        names
    }

    /// Iterates over all pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
    }

    /// Number of pairs (not distinct names).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the collection holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for NameValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.add(name, value);
        }
        values
    }
}

/// One captured application error.
///
/// String fields are never absent; an unknown value is the empty string.
/// `time` is stamped once when the record is created and is carried
/// unchanged through every store, so it is the one field a stored document
/// must always contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Application the error was raised in.
    #[serde(default)]
    pub application_name: String,
    /// Machine that captured the error.
    #[serde(default)]
    pub host_name: String,
    /// Type name of the captured error.
    #[serde(default, rename = "type")]
    pub type_name: String,
    /// Component that raised the error.
    #[serde(default)]
    pub source: String,
    /// Short error message.
    #[serde(default)]
    pub message: String,
    /// Full detail, typically the cause chain or a backtrace.
    #[serde(default)]
    pub detail: String,
    /// Identity of the user making the failing request.
    #[serde(default)]
    pub user: String,
    /// When the error was captured, in the capturing host's local offset.
    pub time: DateTime<FixedOffset>,
    /// HTTP status code of the failing response, 0 when unknown.
    #[serde(default)]
    pub status_code: u16,
    /// HTML error page produced by the hosting server, empty when absent.
    #[serde(default)]
    pub web_host_html_message: String,
    /// Server variables of the failing request.
    #[serde(default)]
    pub server_variables: NameValues,
    /// Query string parameters of the failing request.
    #[serde(default)]
    pub query_string: NameValues,
    /// Form fields of the failing request.
    #[serde(default)]
    pub form: NameValues,
    /// Cookies of the failing request.
    #[serde(default)]
    pub cookies: NameValues,
}

impl Default for ErrorRecord {
    fn default() -> Self {
        Self {
            application_name: String::new(),
            host_name: String::new(),
            type_name: String::new(),
            source: String::new(),
            message: String::new(),
            detail: String::new(),
            user: String::new(),
            time: Local::now().fixed_offset(),
            status_code: 0,
            web_host_html_message: String::new(),
            server_variables: NameValues::new(),
            query_string: NameValues::new(),
            form: NameValues::new(),
            cookies: NameValues::new(),
        }
    }
}

impl ErrorRecord {
    /// Creates an empty record stamped with the current local time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the user identity.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the HTTP status code.
    #[must_use]
    pub const fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Sets the capture time.
    #[must_use]
    pub const fn with_time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.time = time;
        self
    }

    /// Returns the host HTML message, if one was captured.
    #[must_use]
    pub fn web_host_html(&self) -> Option<&str> {
        if self.web_host_html_message.is_empty() {
            None
        } else {
            Some(&self.web_host_html_message)
        }
    }

    /// Serializes the record as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the record as an indented JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid record.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
