//! Mock registry and path lookup.
//!
//! ## Module Structure
//!
//! - `types`: Entry, body variants and the stored JSON representation
//! - `path`: Path normalization shared by registration, dispatch and queries
//! - `tree`: Segment tree with exact and subtree lookups
//! - `registry`: Locked, shared registry used by the HTTP layer
//! - `validation`: Payload validation for mock configuration calls

mod path;
mod registry;
mod tree;
mod types;
mod validation;

pub use path::normalize_path;
pub use registry::Registry;
pub use tree::{StorageNode, StorageTree, MOCK_KEY};
pub use types::{MockBody, MockData, MockEntry, MockError, OrderedHeaders, StoredMock};
pub use validation::{validate_payload, BodyEncoding, ValidationError, ValidationIssue};
