use crate::interpolate::interpolate;
use crate::table::{self, Bounds, Breakpoint, TableError};

/// Linearizes a reading through a fixed table of breakpoints.
///
/// Inputs outside the table are clamped to its first and last
/// breakpoints, and results are clamped to the table's output range.
#[derive(Clone, Debug)]
pub struct PiecewiseMapper<const LENGTH: usize> {
    table: [Breakpoint; LENGTH],
    bounds: Bounds,
}

impl<const LENGTH: usize> PiecewiseMapper<LENGTH> {
    /// Returns a mapper over `table`, or the reason the table is unusable.
    ///
    /// The table needs at least two breakpoints and strictly increasing
    /// inputs.
    pub const fn try_new(table: [Breakpoint; LENGTH]) -> Result<Self, TableError> {
        if let Err(error) = table::validate(&table) {
            return Err(error);
        }

        Ok(Self {
            bounds: Bounds::of(&table),
            table,
        })
    }

    /// Returns a mapper over `table`.
    ///
    /// Panics if the table has fewer than two breakpoints or its inputs
    /// are not strictly increasing. Usable in `const` items, in which
    /// case a bad table fails the build.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::PiecewiseMapper;
    ///
    /// static POT: PiecewiseMapper<3> = PiecewiseMapper::new([(0, 0), (512, 100), (1023, 200)]);
    ///
    /// assert_eq!(POT.map(256), 50);
    /// assert_eq!(POT.map(768), 150);
    /// assert_eq!(POT.map(2000), 200);
    /// assert_eq!(POT.map(-10), 0);
    /// ```
    pub const fn new(table: [Breakpoint; LENGTH]) -> Self {
        match Self::try_new(table) {
            Ok(mapper) => mapper,
            Err(TableError::TooShort) => {
                panic!("calibration table needs at least two breakpoints")
            }
            Err(TableError::NotAscending { .. }) => {
                panic!("breakpoint inputs must be strictly increasing")
            }
        }
    }

    /// Maps `input` onto the table's output domain.
    pub fn map(&self, input: i32) -> i32 {
        let input = self.bounds.clamp_input(input);

        let upper = match table::first_bigger(&self.table, input) {
            Some(0) => return self.first_value(),
            Some(index) => index,
            None => return self.last_value(),
        };

        let (x0, y0) = self.table[upper - 1];
        let (x1, y1) = self.table[upper];

        self.bounds.clamp_output(interpolate(x0, x1, y0, y1, input))
    }

    /// Returns the breakpoints the mapper was built from.
    pub fn table(&self) -> &[Breakpoint; LENGTH] {
        &self.table
    }

    /// Returns the input domain and output range of the table.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the smallest value that can be returned by
    /// [`map`](PiecewiseMapper::map).
    pub fn min_value(&self) -> i32 {
        self.bounds.min_output
    }

    /// Returns the largest value that can be returned by
    /// [`map`](PiecewiseMapper::map).
    pub fn max_value(&self) -> i32 {
        self.bounds.max_output
    }

    fn first_value(&self) -> i32 {
        self.table[0].1
    }

    fn last_value(&self) -> i32 {
        self.table[LENGTH - 1].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_rising() -> [Breakpoint; 3] {
        [(0, 0), (512, 100), (1023, 200)]
    }

    fn table_falling() -> [Breakpoint; 3] {
        [(409, 40), (819, 30), (1228, 10)]
    }

    // Poti-style curve: steep at the ends, flat in the middle.
    fn table_poti() -> [Breakpoint; 11] {
        [
            (0, 0),
            (40, 100),
            (95, 200),
            (180, 300),
            (300, 400),
            (480, 500),
            (660, 600),
            (800, 700),
            (900, 800),
            (970, 900),
            (1023, 1000),
        ]
    }

    #[test]
    #[should_panic]
    fn panics_if_unsorted_table() {
        PiecewiseMapper::new([(300, 40), (200, 30), (100, 10)]);
    }

    #[test]
    #[should_panic]
    fn panics_if_single_breakpoint() {
        PiecewiseMapper::new([(0, 0)]);
    }

    #[test]
    fn try_new_reports_duplicate_breakpoint() {
        let result = PiecewiseMapper::try_new([(0, 0), (10, 5), (10, 7)]);
        assert_eq!(result.err(), Some(TableError::NotAscending { index: 2 }));
    }

    #[test]
    fn documented_example() {
        let mapper = PiecewiseMapper::new(table_rising());

        assert_eq!(mapper.map(0), 0);
        assert_eq!(mapper.map(256), 50);
        assert_eq!(mapper.map(512), 100);
        assert_eq!(mapper.map(768), 150);
        assert_eq!(mapper.map(1023), 200);
        assert_eq!(mapper.map(2000), 200);
        assert_eq!(mapper.map(-10), 0);
    }

    #[test]
    fn matching_exact_values() {
        for table in [table_rising(), table_falling()] {
            let mapper = PiecewiseMapper::new(table);
            for (input, output) in table {
                assert_eq!(mapper.map(input), output);
            }
        }

        let mapper = PiecewiseMapper::new(table_poti());
        for (input, output) in table_poti() {
            assert_eq!(mapper.map(input), output);
        }
    }

    #[test]
    fn interpolates() {
        let mapper = PiecewiseMapper::new(table_falling());

        assert_eq!(mapper.map(502), 38);
        assert_eq!(mapper.map(614), 35);
        assert_eq!(mapper.map(1023), 21);
    }

    #[test]
    fn clamps_below_first_breakpoint() {
        let mapper = PiecewiseMapper::new(table_falling());

        assert_eq!(mapper.map(408), 40);
        assert_eq!(mapper.map(0), 40);
        assert_eq!(mapper.map(i32::MIN), 40);
    }

    #[test]
    fn clamps_at_and_above_last_breakpoint() {
        let mapper = PiecewiseMapper::new(table_falling());

        assert_eq!(mapper.map(1228), 10);
        assert_eq!(mapper.map(1229), 10);
        assert_eq!(mapper.map(10000), 10);
        assert_eq!(mapper.map(i32::MAX), 10);
    }

    #[test]
    fn monotonic_table_gives_monotonic_output() {
        let mapper = PiecewiseMapper::new(table_poti());

        let mut previous = mapper.map(-50);
        for input in -49..1100 {
            let value = mapper.map(input);
            assert!(value >= previous, "map({}) = {} < {}", input, value, previous);
            previous = value;
        }
    }

    #[test]
    fn output_stays_in_range_for_non_monotonic_table() {
        let mapper = PiecewiseMapper::new([(0, 10), (100, 90), (200, -20), (300, 50)]);

        for input in -100..400 {
            let value = mapper.map(input);
            assert!((mapper.min_value()..=mapper.max_value()).contains(&value));
        }
        assert_eq!(mapper.map(150), 35);
    }

    #[test]
    fn map_is_repeatable() {
        let mapper = PiecewiseMapper::new(table_poti());

        for input in [-1, 0, 17, 333, 1023, 5000] {
            assert_eq!(mapper.map(input), mapper.map(input));
        }
    }

    #[test]
    fn full_i32_span_does_not_overflow() {
        let mapper = PiecewiseMapper::new([(i32::MIN, i32::MIN), (i32::MAX, i32::MAX)]);

        assert_eq!(mapper.map(i32::MAX - 1), i32::MAX - 1);
        assert_eq!(mapper.map(i32::MIN + 1), i32::MIN + 1);
        assert_eq!(mapper.map(0), 0);

        let falling = PiecewiseMapper::new([(i32::MIN, i32::MAX), (i32::MAX, i32::MIN)]);
        assert_eq!(falling.map(i32::MAX - 1), i32::MIN + 1);
    }

    #[test]
    fn two_point_table() {
        let mapper = PiecewiseMapper::new([(-100, 1000), (100, -1000)]);

        assert_eq!(mapper.map(-100), 1000);
        assert_eq!(mapper.map(0), 0);
        assert_eq!(mapper.map(50), -500);
        assert_eq!(mapper.map(100), -1000);
    }

    #[test]
    fn min_value() {
        assert_eq!(PiecewiseMapper::new(table_rising()).min_value(), 0);
        assert_eq!(PiecewiseMapper::new(table_falling()).min_value(), 10);
    }

    #[test]
    fn max_value() {
        assert_eq!(PiecewiseMapper::new(table_rising()).max_value(), 200);
        assert_eq!(PiecewiseMapper::new(table_falling()).max_value(), 40);
    }

    #[test]
    fn bounds_follow_table() {
        let mapper = PiecewiseMapper::new(table_falling());

        assert_eq!(
            mapper.bounds(),
            Bounds {
                min_input: 409,
                max_input: 1228,
                min_output: 10,
                max_output: 40,
            }
        );
        assert_eq!(mapper.table(), &table_falling());
    }
}
