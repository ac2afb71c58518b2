use core::fmt;

/// A calibration sample of `(input, output)`.
pub type Breakpoint = (i32, i32);

/// Reasons a calibration table is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// The table has fewer than two breakpoints.
    TooShort,
    /// The input at `index` is not strictly greater than the one before it.
    NotAscending { index: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::TooShort => write!(f, "calibration table needs at least two breakpoints"),
            TableError::NotAscending { index } => write!(
                f,
                "breakpoint {} does not have a larger input than the one before it",
                index
            ),
        }
    }
}

/// Checks that `table` has at least two breakpoints with strictly
/// increasing inputs.
pub const fn validate(table: &[Breakpoint]) -> Result<(), TableError> {
    if table.len() < 2 {
        return Err(TableError::TooShort);
    }

    let mut index = 1;
    while index < table.len() {
        if table[index].0 <= table[index - 1].0 {
            return Err(TableError::NotAscending { index });
        }
        index += 1;
    }

    Ok(())
}

/// The input domain and output range covered by a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub min_input: i32,
    pub max_input: i32,
    pub min_output: i32,
    pub max_output: i32,
}

impl Bounds {
    /// Scans `table` once for its extremes.
    ///
    /// An empty table yields inverted bounds (`min > max`); callers are
    /// expected to [`validate`] first.
    pub const fn of(table: &[Breakpoint]) -> Self {
        let mut bounds = Bounds {
            min_input: i32::MAX,
            max_input: i32::MIN,
            min_output: i32::MAX,
            max_output: i32::MIN,
        };

        let mut index = 0;
        while index < table.len() {
            let (input, output) = table[index];

            if input < bounds.min_input {
                bounds.min_input = input;
            }
            if input > bounds.max_input {
                bounds.max_input = input;
            }
            if output < bounds.min_output {
                bounds.min_output = output;
            }
            if output > bounds.max_output {
                bounds.max_output = output;
            }

            index += 1;
        }

        bounds
    }

    /// Clamps `input` into `[min_input, max_input]`.
    pub fn clamp_input(&self, input: i32) -> i32 {
        input.clamp(self.min_input, self.max_input)
    }

    /// Clamps `output` into `[min_output, max_output]`.
    pub fn clamp_output(&self, output: i32) -> i32 {
        output.clamp(self.min_output, self.max_output)
    }
}

/// Returns the index of the first breakpoint whose input is strictly
/// greater than `value`, or `None` if `value` is at or above the last one.
pub fn first_bigger(table: &[Breakpoint], value: i32) -> Option<usize> {
    table.iter().position(|&(input, _)| input > value)
}

/// Converts a voltage and corresponding value into a [`Breakpoint`] of
/// `(adc_value, value)`.
///
/// - `max_voltage`: The voltage corresponding to the largest value possible for the ADC (mV)
/// - `precision`: The precision of the ADC in bits (eg. for 10-bit precision, use `10`)
/// - `voltage`: The voltage to convert (mV)
/// - `value`: The value to use in the pair
///
/// # Examples
///
/// ```
/// use adc_linearizer::breakpoint;
///
/// assert_eq!(breakpoint(3300, 10, 1650, 80), (512, 80));
/// ```
pub const fn breakpoint(max_voltage: u32, precision: u32, voltage: u32, value: i32) -> Breakpoint {
    assert!(precision < 32, "ADC precision must be below 32 bits");
    assert!(max_voltage > 0, "max voltage must be positive");

    let max_adc_value = 1u64 << precision;
    let adc_value = voltage as u64 * max_adc_value / max_voltage as u64;

    assert!(
        adc_value <= i32::MAX as u64,
        "voltage exceeds the ADC range"
    );

    (adc_value as i32, value)
}

/// Calibration expressed in millivolts rather than raw ADC counts.
///
/// - `max_voltage`: The voltage corresponding to the largest value possible for the ADC (mV)
/// - `precision`: The precision of the ADC in bits
/// - `voltage_to_values`: `(voltage in mV, value)` pairs, ascending by voltage
///
/// # Examples
///
/// ```
/// use adc_linearizer::Config;
///
/// const CONFIG: Config<3> = Config {
///     max_voltage: 3300, // 3.3 V
///     precision: 10,     // 10 bits of precision
///     voltage_to_values: [
///         (100, 5),   // 100 mV  -> 5
///         (500, 10),  // 500 mV  -> 10
///         (2000, 15), // 2000 mV -> 15
///     ],
/// };
///
/// assert_eq!(CONFIG.table(), [(31, 5), (155, 10), (620, 15)]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config<const LENGTH: usize> {
    pub max_voltage: u32,
    pub precision: u32,
    pub voltage_to_values: [(u32, i32); LENGTH],
}

impl<const LENGTH: usize> Config<LENGTH> {
    /// Converts every voltage into ADC counts.
    pub const fn table(&self) -> [Breakpoint; LENGTH] {
        let mut table = [(0, 0); LENGTH];

        let mut index = 0;
        while index < LENGTH {
            let (voltage, value) = self.voltage_to_values[index];
            table[index] = breakpoint(self.max_voltage, self.precision, voltage, value);
            index += 1;
        }

        table
    }
}
