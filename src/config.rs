// src/config.rs

//! Configuration structures for surfaces and text rendering.
//!
//! Everything here deserializes from JSON with defaults filled in for missing
//! fields, so a host can keep a partial configuration next to its firmware
//! image and only spell out what differs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::FontProperties;
use crate::error::SurfaceError;
use crate::format::PixelFormat;

// --- Top-Level Configuration Structure ---

/// Root configuration, grouping surface geometry and text defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub surface: SurfaceConfig,
    pub text: TextConfig,
}

impl Config {
    /// Parses a configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse framebuffer configuration")
    }
}

// --- Surface Configuration ---

/// Geometry and pixel encoding of a drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    /// Row stride in pixels. `None` means "same as width"; either way it is
    /// rounded up to the format's granularity.
    pub stride: Option<usize>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        // A common 128x64 monochrome OLED panel.
        SurfaceConfig {
            width: 128,
            height: 64,
            format: PixelFormat::MonoVlsb,
            stride: None,
        }
    }
}

impl SurfaceConfig {
    pub fn effective_stride(&self) -> Result<usize, SurfaceError> {
        Ok(self.layout()?.0)
    }

    /// Bytes a host buffer needs for this surface.
    pub fn buffer_len(&self) -> Result<usize, SurfaceError> {
        Ok(self.layout()?.1)
    }

    fn layout(&self) -> Result<(usize, usize), SurfaceError> {
        self.format.layout(self.width, self.height, self.stride)
    }
}

// --- Text Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Code point drawn in place of characters the font lacks.
    pub fallback_codepoint: u32,
    /// Colors used when a draw call doesn't supply its own.
    pub properties: FontProperties,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            fallback_codepoint: 0,
            properties: FontProperties::default(),
        }
    }
}
