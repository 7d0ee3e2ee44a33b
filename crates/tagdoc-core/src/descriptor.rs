use serde::{Deserialize, Serialize};

use crate::route::{SWAGGER_VERSION, document_url};

/// Where the viewer can fetch the document, as listed in `/services.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub url: String,
    pub location: String,
    #[serde(rename = "swaggerVersion")]
    pub swagger_version: String,
}

impl ServiceDescriptor {
    pub fn new(name: &str, prefix: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            url: document_url(prefix),
            location: location.to_string(),
            swagger_version: SWAGGER_VERSION.to_string(),
        }
    }
}
