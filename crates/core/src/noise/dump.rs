//! Debug dumps of intermediate octave levels.
//!
//! Dumps are diagnostics only. A generation produces the same texture with
//! or without a sink attached.

use tracing::{info, warn};

use crate::texture::{Dimension, Extent, Texture, TextureResource};
use crate::transform::{density_to_rgba, normalized_copy, to_byte_texture};

/// Receives labelled byte textures from a running generation.
///
/// Each dump is the level normalized to `[0, 1]`, expanded to white RGBA
/// with the value in alpha, and converted to bytes.
pub trait DumpSink {
    /// Called once per dumped level
    fn dump(&mut self, label: &str, texture: &dyn TextureResource<Texel = u8>);
}

/// One captured dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFrame {
    /// `generated-rx{width}-b{bandwidth}` or `combined-l{octave}-b{bandwidth}`
    pub label: String,
    /// Extent of the dumped level
    pub extent: Extent,
    /// Channels per texel (4)
    pub channels: usize,
    /// Texel bytes
    pub data: Vec<u8>,
}

/// Keeps every dump in memory, in the order received.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Captured dumps
    pub frames: Vec<DumpFrame>,
}

impl MemorySink {
    /// Empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of the captured dumps
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|frame| frame.label.as_str())
    }
}

impl DumpSink for MemorySink {
    fn dump(&mut self, label: &str, texture: &dyn TextureResource<Texel = u8>) {
        self.frames.push(DumpFrame {
            label: label.to_owned(),
            extent: texture.extent(),
            channels: texture.channels(),
            data: texture.data().to_vec(),
        });
    }
}

/// Logs each dump's label, extent and mean alpha instead of keeping it.
#[derive(Debug, Default, Clone)]
pub struct TracingSink {
    dumps: usize,
}

impl TracingSink {
    /// Empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dumps logged so far
    pub fn dumps(&self) -> usize {
        self.dumps
    }
}

impl DumpSink for TracingSink {
    fn dump(&mut self, label: &str, texture: &dyn TextureResource<Texel = u8>) {
        self.dumps += 1;
        let channels = texture.channels().max(1);
        let alpha = texture.data().iter().skip(channels - 1).step_by(channels);
        let texels = texture.extent().texel_count().max(1);
        let mean_alpha = alpha.map(|&a| f32::from(a)).sum::<f32>() / texels as f32;
        info!(label, extent = %texture.extent(), mean_alpha, "Octave dump");
    }
}

/// Optional sink threaded through the octave recursion.
pub(crate) struct Dumper<'a> {
    sink: Option<&'a mut dyn DumpSink>,
}

impl<'a> Dumper<'a> {
    pub(crate) fn new(sink: Option<&'a mut dyn DumpSink>) -> Self {
        Self { sink }
    }

    /// Converts and forwards `texture`; the label is only built when a
    /// sink is attached.
    pub(crate) fn dump<D: Dimension>(
        &mut self,
        label: impl FnOnce() -> String,
        texture: &Texture<f32, D>,
    ) {
        let Some(sink) = self.sink.as_deref_mut() else {
            return;
        };
        let label = label();
        let normalized = normalized_copy(texture, 0.0, 1.0);
        match density_to_rgba(&normalized) {
            Ok(rgba) => sink.dump(&label, &to_byte_texture(&rgba)),
            Err(err) => warn!(label, %err, "Skipping octave dump"),
        }
    }
}
