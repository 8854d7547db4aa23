use picferry_protocol::UploadConfig;

use crate::error::ValidationError;
use crate::types::Asset;

/// Longest accepted asset name, counted in Unicode code points.
pub const MAX_NAME_LEN: usize = 255;

/// Characters never accepted in an asset name. Control characters are
/// rejected as well.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Pre-flight checks for one asset: declared type, size, name length,
/// name characters, in that order, stopping at the first failure.
///
/// Pure and synchronous; nothing here touches the network.
pub fn validate(asset: &Asset, config: &UploadConfig) -> Result<(), ValidationError> {
    if asset.mime_type.is_empty() || !config.accepts_mime_type(&asset.mime_type) {
        return Err(ValidationError::UnsupportedType {
            mime_type: asset.mime_type.clone(),
        });
    }
    if asset.size_bytes() > config.max_file_size_bytes {
        return Err(ValidationError::TooLarge {
            actual: asset.size_bytes(),
            limit: config.max_file_size_bytes,
        });
    }
    let length = asset.name.chars().count();
    if length > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { length });
    }
    if let Some(character) = asset
        .name
        .chars()
        .find(|c| c.is_control() || FORBIDDEN_NAME_CHARS.contains(c))
    {
        return Err(ValidationError::NameInvalid { character });
    }
    Ok(())
}

/// Formats a byte count with binary units, one decimal from KiB up.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else if b < KIB * KIB * KIB {
        format!("{:.1} MiB", b / (KIB * KIB))
    } else {
        format!("{:.1} GiB", b / (KIB * KIB * KIB))
    }
}
