use serde_json::{Map, Value};

/// Form fields exactly as the caller sent them. The data store owns the schema.
pub type Submission = Map<String, Value>;
