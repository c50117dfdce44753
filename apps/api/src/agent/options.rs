/// Normalized sampling options. Adapters translate these into their own wire
/// fields and drop whatever their vendor does not support.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub top_p: Option<f32>,
}

impl GenerationOptions {
    pub fn temperature(mut self, value: f32) -> Self {
        self.temperature = Some(value);
        self
    }

    pub fn max_output_tokens(mut self, value: u32) -> Self {
        self.max_output_tokens = Some(value);
        self
    }

    pub fn top_p(mut self, value: f32) -> Self {
        self.top_p = Some(value);
        self
    }
}

/// Clamps a float option into `[min, max]`. Non-finite values are dropped.
pub(crate) fn clamp_unit(value: Option<f32>, min: f32, max: f32) -> Option<f32> {
    value.filter(|v| v.is_finite()).map(|v| v.clamp(min, max))
}

/// Clamps a token ceiling into `[1, ceiling]`. Zero means "unset".
pub(crate) fn clamp_tokens(value: Option<u32>, ceiling: u32) -> Option<u32> {
    value.filter(|v| *v > 0).map(|v| v.min(ceiling))
}
