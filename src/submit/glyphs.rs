//! Per-character cache of generated glyph images.

use super::types::{GenerateRequest, GenerateResponse, ServiceError};
use crate::export::data_url;
use crate::export::file::sanitize_label;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Source of generated character images.
pub trait GlyphGenerator {
    fn generate(&mut self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError>;
}

impl<F> GlyphGenerator for F
where
    F: FnMut(&GenerateRequest) -> Result<GenerateResponse, ServiceError>,
{
    fn generate(&mut self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError> {
        self(request)
    }
}

/// One position in a generated line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    /// A generated character image as a PNG data URL
    Image(String),
    /// A space; nothing is requested for it
    Gap,
}

impl Glyph {
    /// Decoded PNG bytes, or `None` for a gap.
    pub fn png_bytes(&self) -> Result<Option<Vec<u8>>, ServiceError> {
        match self {
            Glyph::Image(url) => Ok(Some(data_url::decode_png(url)?)),
            Glyph::Gap => Ok(None),
        }
    }
}

/// Caches one generated image per character for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct GlyphCache {
    entries: HashMap<char, String>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached data URL for `character`, if it has been generated before.
    pub fn get(&self, character: char) -> Option<&str> {
        self.entries.get(&character).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produces one glyph per character of `text`.
    ///
    /// Spaces become [`Glyph::Gap`]. Every other character is served from the
    /// cache or requested from `generator` exactly once. The first failure
    /// aborts the whole line; glyphs generated before it stay cached.
    pub fn render_text(
        &mut self,
        text: &str,
        generator: &mut dyn GlyphGenerator,
    ) -> Result<Vec<Glyph>, ServiceError> {
        let mut glyphs = Vec::with_capacity(text.chars().count());

        for character in text.chars() {
            if character == ' ' {
                glyphs.push(Glyph::Gap);
                continue;
            }

            if let Some(url) = self.get(character) {
                glyphs.push(Glyph::Image(url.to_string()));
                continue;
            }

            let request = GenerateRequest {
                character: character.to_string(),
            };
            let response = generator.generate(&request).map_err(|err| match err {
                ServiceError::Rejected { detail } if detail.is_empty() => ServiceError::Rejected {
                    detail: format!("Failed to generate for '{character}'"),
                },
                other => other,
            })?;
            let url = data_url::wrap_base64(&response.image);
            log::debug!("Cached generated glyph for '{}'", character);
            self.entries.insert(character, url.clone());
            glyphs.push(Glyph::Image(url));
        }

        Ok(glyphs)
    }
}

/// Serves glyphs from a local directory of `<character>.png` files.
#[derive(Debug, Clone)]
pub struct DirectoryGenerator {
    root: PathBuf,
}

impl DirectoryGenerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl GlyphGenerator for DirectoryGenerator {
    fn generate(&mut self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError> {
        if request.character.is_empty() {
            return Err(ServiceError::MissingField("character"));
        }
        let file_name = format!("{}.png", sanitize_label(&request.character));
        let path = self.root.join(file_name);
        let png = fs::read(&path).map_err(|err| ServiceError::Rejected {
            detail: format!("No glyph for '{}' ({}): {}", request.character, path.display(), err),
        })?;
        Ok(GenerateResponse {
            image: base64::Engine::encode(&base64::engine::general_purpose::STANDARD, png),
        })
    }
}
