use serde::Deserialize;

/// A logical block-storage volume as listed by the array.
///
/// The listing endpoint returns more fields than the report needs
/// (creation time, source volume, ...); unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub name: String,
    /// Provisioned size in bytes, when the listing includes it.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub serial: Option<String>,
}
