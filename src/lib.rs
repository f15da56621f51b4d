//! # wadloxide
//!
//! Reading, writing and routing of WADL (Web Application Description
//! Language) documents. A WADL document describes the resources of an HTTP
//! application: their URI templates, methods, parameters and
//! representations.
//!
//! ## Quick Start
//!
//! ```
//! use wadloxide::{parse_str, to_string, WriteOptions};
//!
//! let app = parse_str(
//!     r#"<application xmlns="http://research.sun.com/wadl/2006/10">
//!          <resources base="http://example.com/api/">
//!            <resource id="Items" path="items"><method name="GET"/></resource>
//!          </resources>
//!        </application>"#,
//! )
//! .unwrap();
//! let resources = app.resources.as_ref().unwrap();
//! assert_eq!(resources.resources[0].path.as_deref(), Some("items"));
//!
//! let xml = to_string(&app, &WriteOptions::default());
//! assert!(xml.contains("<method name=\"GET\"/>"));
//! ```

pub mod error;
pub mod model;
pub mod reader;
pub mod router;
pub mod sax;
pub mod serial;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{AttachError, ParseError, ParseErrorKind};
pub use model::{ApplicationInfo, Documented, WADL_NAMESPACE};
pub use reader::{parse_bytes, parse_str, parse_str_with_options, ReadOptions};
pub use serial::{to_string, write_document, WriteOptions};
