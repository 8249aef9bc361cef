use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyConfig {
    /// Hook the thread starts from.
    pub start_hook: usize,
    /// Number of chords to select.
    pub num_strings: usize,
    /// Hooks within this cyclic index distance of the current hook are never
    /// chosen as the next endpoint by the greedy rule.
    pub hook_distance: usize,
    /// Multiplier applied to the residual along every selected chord, in `(0, 1]`.
    pub discount: f32,
    /// Probability of replacing a newly accepted best candidate with a random
    /// endpoint, in `[0, 1]`.
    pub random_accept: f32,
    /// Score candidates of one iteration on the rayon pool.
    pub parallel: bool,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            start_hook: 0,
            num_strings: 5000,
            hook_distance: 15,
            discount: 0.3,
            random_accept: 0.0,
            parallel: true,
        }
    }
}

impl GreedyConfig {
    pub fn validate(&self, hook_count: usize) -> Result<(), ConfigError> {
        if hook_count < 3 {
            return Err(ConfigError::TooFewHooks { count: hook_count });
        }
        if self.hook_distance.saturating_mul(2) > hook_count {
            return Err(ConfigError::ExclusionTooWide {
                distance: self.hook_distance,
                hooks: hook_count,
            });
        }
        if self.start_hook >= hook_count {
            return Err(ConfigError::StartOutOfRange {
                start: self.start_hook,
                hooks: hook_count,
            });
        }
        if !(self.discount > 0.0 && self.discount <= 1.0) {
            return Err(ConfigError::DiscountOutOfRange(self.discount));
        }
        if !(0.0..=1.0).contains(&self.random_accept) {
            return Err(ConfigError::RandomAcceptOutOfRange(self.random_accept));
        }
        Ok(())
    }
}
