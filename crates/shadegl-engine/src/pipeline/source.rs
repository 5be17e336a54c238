use crate::error::{GlError, Result};

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Loads both stages with [`load_text`], vertex first.
    pub async fn load(vertex: &str, fragment: &str) -> Result<Self> {
        let vertex = load_text(vertex).await?;
        let fragment = load_text(fragment).await?;
        Ok(Self { vertex, fragment })
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn source_error(location: &str, reason: impl ToString) -> GlError {
    GlError::Source {
        location: location.to_owned(),
        reason: reason.to_string(),
    }
}

/// Reads the whole text behind `location`.
///
/// `http://` and `https://` locations are fetched; anything else is treated as
/// a filesystem path. The body is read in one piece and must be UTF-8.
pub async fn load_text(location: &str) -> Result<String> {
    if is_remote(location) {
        let response = ehttp::fetch_async(ehttp::Request::get(location))
            .await
            .map_err(|e| source_error(location, e))?;

        if !response.ok {
            return Err(source_error(
                location,
                format!("HTTP {} {}", response.status, response.status_text),
            ));
        }

        let text = response
            .text()
            .ok_or_else(|| source_error(location, "response body is not valid UTF-8"))?;

        log::debug!("fetched {location} ({} bytes)", text.len());
        return Ok(text.to_owned());
    }

    let text = std::fs::read_to_string(location).map_err(|e| source_error(location, e))?;
    log::debug!("read {location} ({} bytes)", text.len());
    Ok(text)
}
