/// Tracks a value across equivalent-linear iterations
///
/// Assigning a new value shifts the current one into `previous`, so the
/// relative change between the last two iterations can drive a convergence
/// check by an external solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterativeValue {
    /// Current value
    value: f64,

    /// Value of the preceding iteration (None before the first update)
    previous: Option<f64>,
}

impl IterativeValue {
    /// Allocates a new instance with no iteration history
    pub fn new(value: f64) -> Self {
        IterativeValue {
            value,
            previous: None,
        }
    }

    /// Returns the current value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the value of the preceding iteration
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Assigns a new value, shifting the current one into the history
    pub fn update(&mut self, value: f64) {
        self.previous = Some(self.value);
        self.value = value;
    }

    /// Returns the relative error, in percent, between the two iterations
    ///
    /// Returns 0 if no previous value exists. A zero current value makes the
    /// error unbounded and is reported as an explicit infinity rather than
    /// being suppressed.
    pub fn relative_error(&self) -> f64 {
        match self.previous {
            Some(previous) => {
                if self.value == 0.0 {
                    f64::INFINITY
                } else {
                    100.0 * (previous - self.value) / self.value
                }
            }
            None => 0.0,
        }
    }

    /// Clears the iteration history without discarding the current value
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
