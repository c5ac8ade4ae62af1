use std::{fs, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    domain::ticket::Attachment,
    error::{TicketError, TicketResult},
};

/// 2.5 MB, the most the sheet backend accepts comfortably.
pub const MAX_ATTACHMENT_BYTES: u64 = 2_621_440;

/// Reads an image from disk and encodes it as a data URL.
///
/// The size cap is checked against file metadata before the file is read.
pub fn encode_attachment(path: &Path, max_bytes: u64) -> TicketResult<Attachment> {
    let metadata = fs::metadata(path).map_err(|err| {
        TicketError::validation(format!("Unable to read file {}: {err}", path.display()))
    })?;
    if !metadata.is_file() {
        return Err(TicketError::validation(format!(
            "Attachment is not a file: {}",
            path.display()
        )));
    }
    check_size(metadata.len(), max_bytes)?;

    let bytes = fs::read(path).map_err(|err| {
        TicketError::validation(format!("Unable to read file {}: {err}", path.display()))
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    encode_attachment_bytes(&name, &bytes, max_bytes)
}

pub fn encode_attachment_bytes(
    name: &str,
    bytes: &[u8],
    max_bytes: u64,
) -> TicketResult<Attachment> {
    check_size(bytes.len() as u64, max_bytes)?;

    let mime = mime_guess::from_path(name).first_or_octet_stream();
    Ok(Attachment {
        name: name.to_string(),
        data_url: format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes)),
    })
}

fn check_size(len: u64, max_bytes: u64) -> TicketResult<()> {
    if len > max_bytes {
        return Err(TicketError::validation(format!(
            "Attachment too large (max ~{:.1}MB). Please compress the image.",
            max_bytes as f64 / (1024.0 * 1024.0)
        )));
    }
    Ok(())
}
