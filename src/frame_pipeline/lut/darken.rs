//! Darken table construction and its configuration
//!
//! Two darkening modes are available:
//! - relative: removes a percentage of each intensity
//! - subtractive: removes a fixed amount, optionally scaled by the intensity
//!   itself so brighter values lose more

use tracing::debug;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::lut::ChannelLut;

/// Largest accepted darken amount
pub const MAX_DARKEN_VALUE: f32 = 255.0;

/// Darkening strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DarkenMode {
    /// `i - i * value / 100`
    #[default]
    Relative,
    /// `i - value`, or `i - value * i / 255` when adaptive
    Subtractive,
}

impl TryFrom<i64> for DarkenMode {
    type Error = FilterError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(DarkenMode::Relative),
            1 => Ok(DarkenMode::Subtractive),
            other => Err(FilterError::InvalidParameter {
                name: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration for the darken stage
#[derive(Debug, Clone, PartialEq)]
pub struct DarkenConfig {
    pub mode: DarkenMode,
    /// Only meaningful in subtractive mode
    pub adaptive: bool,
    /// Darken amount in `[0, 255]`
    pub value: f32,
}

impl Default for DarkenConfig {
    fn default() -> Self {
        Self {
            mode: DarkenMode::Relative,
            adaptive: false,
            value: 0.0,
        }
    }
}

impl DarkenConfig {
    pub fn builder() -> DarkenConfigBuilder {
        DarkenConfigBuilder::default()
    }

    /// Builds a config from raw host option values (`type`, `adaptive`, `value`).
    pub fn from_options(mode: i64, adaptive: i64, value: f32) -> Result<Self> {
        let adaptive = match adaptive {
            0 => false,
            1 => true,
            other => {
                return Err(FilterError::InvalidParameter {
                    name: "adaptive",
                    value: other.to_string(),
                });
            }
        };
        let config = Self {
            mode: DarkenMode::try_from(mode)?,
            adaptive,
            value,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_DARKEN_VALUE).contains(&self.value) {
            return Err(FilterError::InvalidParameter {
                name: "value",
                value: self.value.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for DarkenConfig
#[derive(Default)]
pub struct DarkenConfigBuilder {
    mode: Option<DarkenMode>,
    adaptive: Option<bool>,
    value: Option<f32>,
}

impl DarkenConfigBuilder {
    pub fn mode(mut self, mode: DarkenMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = Some(adaptive);
        self
    }

    pub fn value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn build(self) -> DarkenConfig {
        let default = DarkenConfig::default();
        DarkenConfig {
            mode: self.mode.unwrap_or(default.mode),
            adaptive: self.adaptive.unwrap_or(default.adaptive),
            value: self.value.unwrap_or(default.value),
        }
    }
}

/// Builds the darken table for `config`.
///
/// Fractional results truncate toward zero, then clamp at zero.
pub fn build_darken_lut(config: &DarkenConfig) -> ChannelLut {
    let value = f64::from(config.value);
    let lut = ChannelLut::from_fn(|i| {
        let i = f64::from(i);
        let darkened = match (config.mode, config.adaptive) {
            (DarkenMode::Relative, _) => i - (i * value / 100.0).trunc(),
            (DarkenMode::Subtractive, false) => i - value,
            (DarkenMode::Subtractive, true) => i - value * i / 255.0,
        };
        darkened.trunc().clamp(0.0, 255.0) as u8
    });

    debug!(?config, "Built darken LUT");
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_mode(value: f32) -> Vec<DarkenConfig> {
        [
            (DarkenMode::Relative, false),
            (DarkenMode::Subtractive, false),
            (DarkenMode::Subtractive, true),
        ]
        .into_iter()
        .map(|(mode, adaptive)| DarkenConfig { mode, adaptive, value })
        .collect()
    }

    #[test]
    fn relative_zero_is_identity() {
        let lut = build_darken_lut(&DarkenConfig::default());
        assert!(lut.is_identity());
    }

    #[test]
    fn never_brightens() {
        for value in [0.0, 1.5, 37.0, 100.0, 180.25, 255.0] {
            for config in every_mode(value) {
                let lut = build_darken_lut(&config);
                for i in 0..=255u8 {
                    assert!(lut.get(i) <= i, "{config:?} brightened {i}");
                }
            }
        }
    }

    #[test]
    fn relative_half_truncates() {
        let lut = build_darken_lut(&DarkenConfig::builder().value(50.0).build());
        assert_eq!(lut.get(100), 50);
        assert_eq!(lut.get(255), 128);
        assert_eq!(lut.get(1), 1);
        assert_eq!(lut.get(0), 0);
    }

    #[test]
    fn relative_above_hundred_clamps_to_black() {
        let lut = build_darken_lut(&DarkenConfig::builder().value(200.0).build());
        assert!(lut.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn subtractive_flat() {
        let lut = build_darken_lut(
            &DarkenConfig::builder()
                .mode(DarkenMode::Subtractive)
                .value(40.5)
                .build(),
        );
        assert_eq!(lut.get(0), 0);
        assert_eq!(lut.get(40), 0);
        assert_eq!(lut.get(41), 0);
        assert_eq!(lut.get(42), 1);
        assert_eq!(lut.get(255), 214);
    }

    #[test]
    fn subtractive_adaptive_full_strength() {
        let lut = build_darken_lut(
            &DarkenConfig::builder()
                .mode(DarkenMode::Subtractive)
                .adaptive(true)
                .value(255.0)
                .build(),
        );
        assert_eq!(lut.get(255), 0);
        assert_eq!(lut.get(0), 0);
    }

    #[test]
    fn adaptive_darkens_bright_values_more() {
        let lut = build_darken_lut(
            &DarkenConfig::builder()
                .mode(DarkenMode::Subtractive)
                .adaptive(true)
                .value(51.0)
                .build(),
        );
        // 255 - 51 * 255 / 255 = 204, 50 - 51 * 50 / 255 = 40
        assert_eq!(lut.get(255), 204);
        assert_eq!(lut.get(50), 40);
    }

    #[test]
    fn from_options_checks_ranges() {
        assert!(DarkenConfig::from_options(1, 1, 12.0).is_ok());
        assert!(matches!(
            DarkenConfig::from_options(2, 0, 12.0),
            Err(FilterError::InvalidParameter { name: "type", .. })
        ));
        assert!(matches!(
            DarkenConfig::from_options(0, 3, 12.0),
            Err(FilterError::InvalidParameter { name: "adaptive", .. })
        ));
        for bad in [-0.5, 255.5, f32::NAN] {
            assert!(matches!(
                DarkenConfig::from_options(0, 0, bad),
                Err(FilterError::InvalidParameter { name: "value", .. })
            ));
        }
    }
}
