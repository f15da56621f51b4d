//! `QName` (qualified name) handling.
//!
//! A `QName` is a name of the form `prefix:localname` or just `localname` (with
//! no prefix), optionally bound to a namespace URI once the prefix has been
//! resolved. See <https://www.w3.org/TR/xml-names/#NT-QName>

use std::fmt;

/// Splits a `QName` into its prefix and local name parts.
///
/// Returns `(Some(prefix), localname)` if the name contains a colon,
/// or `(None, localname)` if it does not.
///
/// # Examples
///
/// ```
/// use wadloxide::util::qname::split_qname;
///
/// assert_eq!(split_qname("xsd:string"), (Some("xsd"), "string"));
/// assert_eq!(split_qname("p"), (None, "p"));
/// ```
#[must_use]
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.find(':') {
        Some(pos) => (Some(&qname[..pos]), &qname[pos + 1..]),
        None => (None, qname),
    }
}

/// A resolved qualified name: prefix, local part and namespace URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QName {
    /// The prefix as written in the document, if any.
    pub prefix: Option<String>,
    /// The local part of the name.
    pub local_name: String,
    /// The namespace URI the name is bound to, if any.
    pub namespace: Option<String>,
}

impl QName {
    /// Creates an unprefixed name with no namespace.
    #[must_use]
    pub fn local(local_name: &str) -> Self {
        Self {
            prefix: None,
            local_name: local_name.to_string(),
            namespace: None,
        }
    }

    /// Creates a name bound to `namespace`, written with `prefix`.
    #[must_use]
    pub fn bound(prefix: Option<&str>, local_name: &str, namespace: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local_name: local_name.to_string(),
            namespace: Some(namespace.to_string()),
        }
    }

    /// Returns the name as written: `prefix:local` or `local`.
    #[must_use]
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}:")?;
        }
        f.write_str(&self.local_name)
    }
}
