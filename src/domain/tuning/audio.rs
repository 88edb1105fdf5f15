// Tuning for audio channel crossfades.

#[derive(Debug, Clone, Copy)]
pub struct AudioTuning {
    pub fade_duration_ms: u64,
    pub fade_steps: u32,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            fade_duration_ms: 1_500,
            fade_steps: 30,
        }
    }
}
