use crate::frame_pipeline::frame::ChannelTransform;

/// A 256-entry table applied independently to the R, G and B channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLut {
    table: [u8; 256],
}

impl ChannelLut {
    pub fn identity() -> Self {
        Self::from_fn(|i| i)
    }

    /// Builds a table from a per-intensity function.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self { table }
    }

    pub fn get(&self, intensity: u8) -> u8 {
        self.table[intensity as usize]
    }

    pub fn as_slice(&self) -> &[u8; 256] {
        &self.table
    }

    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }
}

impl ChannelTransform for ChannelLut {
    #[inline]
    fn map_rgb(&self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        [
            self.table[r as usize],
            self.table[g as usize],
            self.table[b as usize],
        ]
    }
}
