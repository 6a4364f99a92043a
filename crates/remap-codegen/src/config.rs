/// Pipeline tuning. There is exactly one knob.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Upper bound on the length of a spliced conversion chain. Exceeding
    /// it is a validation error, never silent truncation.
    pub max_conversion_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_conversion_depth: 5,
        }
    }
}
