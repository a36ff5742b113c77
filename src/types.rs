// src/types.rs
use serde::{Deserialize, Serialize};

// 图表上可叠加的五条曲线
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Trace {
    Original,
    Sampled,
    Quantized,
    Reconstructed,
    Smoothed,
}

impl Trace {
    pub const ALL: [Trace; 5] = [
        Trace::Original,
        Trace::Sampled,
        Trace::Quantized,
        Trace::Reconstructed,
        Trace::Smoothed,
    ];

    /// Legend name; the quantized trace carries the bit depth.
    pub fn legend(self, bit_depth: u32) -> String {
        match self {
            Trace::Original => "Original Signal".to_owned(),
            Trace::Sampled => "Sampled Signal".to_owned(),
            Trace::Quantized => format!("Quantized ({} bits)", bit_depth),
            Trace::Reconstructed => "Reconstructed Signal (ZOH)".to_owned(),
            Trace::Smoothed => "Smoothed Reconstruction".to_owned(),
        }
    }

    // 侧边栏复选框文字
    pub fn toggle_label(self) -> &'static str {
        match self {
            Trace::Original => "Show Original Signal",
            Trace::Sampled => "Show Sampled Signal",
            Trace::Quantized => "Show Quantized Signal",
            Trace::Reconstructed => "Show Reconstructed Signal",
            Trace::Smoothed => "Show Smoothed Reconstruction",
        }
    }
}

// 显示开关 (对应五个复选框)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToggles {
    pub original: bool,
    pub sampled: bool,
    pub quantized: bool,
    pub reconstructed: bool,
    pub smoothed: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            original: true,
            sampled: true,
            quantized: true,
            reconstructed: true,
            smoothed: false,
        }
    }
}

impl DisplayToggles {
    pub fn get_mut(&mut self, trace: Trace) -> &mut bool {
        match trace {
            Trace::Original => &mut self.original,
            Trace::Sampled => &mut self.sampled,
            Trace::Quantized => &mut self.quantized,
            Trace::Reconstructed => &mut self.reconstructed,
            Trace::Smoothed => &mut self.smoothed,
        }
    }

    pub fn shows(&self, trace: Trace) -> bool {
        match trace {
            Trace::Original => self.original,
            Trace::Sampled => self.sampled,
            Trace::Quantized => self.quantized,
            Trace::Reconstructed => self.reconstructed,
            Trace::Smoothed => self.smoothed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hide_only_smoothed() {
        let toggles = DisplayToggles::default();
        let shown: Vec<Trace> = Trace::ALL.into_iter().filter(|t| toggles.shows(*t)).collect();
        assert_eq!(shown.len(), 4);
        assert!(!toggles.shows(Trace::Smoothed));
    }

    #[test]
    fn toggles_flip_through_get_mut() {
        let mut toggles = DisplayToggles::default();
        *toggles.get_mut(Trace::Smoothed) = true;
        *toggles.get_mut(Trace::Original) = false;
        assert!(toggles.shows(Trace::Smoothed));
        assert!(!toggles.original);
        assert_eq!(Trace::Quantized.legend(4), "Quantized (4 bits)");
    }
}
