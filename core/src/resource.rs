//! Resource targets and their path templates.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::ApiError;

/// Separator between container and path in an asset id.
pub const ASSET_ID_SEPARATOR: &str = "::";

/// Bytes escaped inside one path segment. `%` is included so names are
/// always taken literally, never as pre-encoded text.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Encode a multi-segment path, keeping its `/` separators.
fn segments(raw: &str) -> String {
    raw.split('/').map(segment).collect::<Vec<_>>().join("/")
}

/// One CMS resource a terminal call can fetch.
///
/// Every variant except the glide ones lives under the configurable
/// endpoint prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Entries { collection: String },
    Entry { collection: String, id: String },
    Navigation { name: String },
    Terms { taxonomy: String },
    Term { taxonomy: String, slug: String },
    Globals,
    Global { handle: String },
    Assets { container: String },
    Asset { container: String, path: String },
    /// Glide transform addressed by asset id, passed as the `id` query parameter.
    Glide { id: String },
    /// Glide transform addressed by container and path segments.
    GlideAsset { container: String, path: String },
}

impl Resource {
    /// Parse a `container::path` asset id into an `Asset` target.
    pub fn asset_by_id(id: &str) -> Result<Self, ApiError> {
        let parts: Vec<&str> = id.split(ASSET_ID_SEPARATOR).collect();
        match parts.as_slice() {
            [container, path] => Ok(Resource::Asset {
                container: container.to_string(),
                path: path.to_string(),
            }),
            _ => Err(ApiError::MalformedIdentifier(id.to_string())),
        }
    }

    /// Path relative to the host. `endpoint` must not carry surrounding slashes.
    ///
    /// Every interpolated name is percent-encoded as one segment, except asset
    /// paths, whose `/` separators are kept so nested folders still route.
    pub fn path(&self, endpoint: &str) -> String {
        match self {
            Resource::Entries { collection } => {
                format!("/{endpoint}/collections/{}/entries", segment(collection))
            }
            Resource::Entry { collection, id } => format!(
                "/{endpoint}/collections/{}/entries/{}",
                segment(collection),
                segment(id)
            ),
            Resource::Navigation { name } => format!("/{endpoint}/navs/{}/tree", segment(name)),
            Resource::Terms { taxonomy } => {
                format!("/{endpoint}/taxonomies/{}/terms", segment(taxonomy))
            }
            Resource::Term { taxonomy, slug } => format!(
                "/{endpoint}/taxonomies/{}/terms/{}",
                segment(taxonomy),
                segment(slug)
            ),
            Resource::Globals => format!("/{endpoint}/globals"),
            Resource::Global { handle } => format!("/{endpoint}/globals/{}", segment(handle)),
            Resource::Assets { container } => {
                format!("/{endpoint}/assets/{}", segment(container))
            }
            Resource::Asset { container, path } => {
                format!("/{endpoint}/assets/{}/{}", segment(container), segments(path))
            }
            Resource::Glide { .. } => "/assets/glide".to_string(),
            Resource::GlideAsset { container, path } => {
                format!("/assets/glide/{}/{}", segment(container), segments(path))
            }
        }
    }

    /// Query pairs the target itself contributes on top of the chain's query.
    pub(crate) fn query(&self) -> Option<(&'static str, &str)> {
        match self {
            Resource::Glide { id } => Some(("id", id.as_str())),
            _ => None,
        }
    }
}
