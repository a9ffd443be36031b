//! Mode trait definition

/// Control mode trait
///
/// # Lifecycle
///
/// 1. `enter()` - Called once when the mode is selected
/// 2. `update(dt)` - Called every control period while the mode is active
/// 3. `exit()` - Called once when another mode is selected
pub trait Mode {
    /// Initialise the mode
    ///
    /// Returns `Err` if the mode cannot be entered, in which case the mode
    /// manager keeps the previous mode.
    fn enter(&mut self) -> Result<(), &'static str>;

    /// Run one control period
    ///
    /// # Arguments
    ///
    /// * `dt` - Time since the previous update (seconds)
    fn update(&mut self, dt: f32) -> Result<(), &'static str>;

    /// Leave the mode, putting actuators into a safe state
    fn exit(&mut self) -> Result<(), &'static str>;

    /// Mode name for logging and telemetry
    fn name(&self) -> &'static str;
}
