use crate::mapper::PiecewiseMapper;
use crate::table::{Breakpoint, Config};
use core::marker::PhantomData;
use embedded_hal::adc::{Channel, OneShot};

/// An ADC channel whose readings are linearized through a
/// [`PiecewiseMapper`].
#[derive(Debug)]
pub struct AdcLinearizer<Pin, Word, const LENGTH: usize> {
    pin: Pin,
    mapper: PiecewiseMapper<LENGTH>,
    _word: PhantomData<Word>,
}

type Error<Adc, ADC, Word, Pin> = nb::Error<<Adc as OneShot<ADC, Word, Pin>>::Error>;

impl<Pin, Word, const LENGTH: usize> AdcLinearizer<Pin, Word, LENGTH> {
    /// Returns a linearizer reading `pin` through `mapper`.
    pub fn new<ADC>(pin: Pin, mapper: PiecewiseMapper<LENGTH>) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self {
            pin,
            mapper,
            _word: PhantomData,
        }
    }

    /// Returns a linearizer using a table of raw ADC counts.
    ///
    /// Panics if the table is not strictly ascending by ADC value.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{breakpoint, AdcLinearizer};
    /// # use embedded_hal_mock::adc::MockChan0;
    /// #
    /// # let pin = MockChan0 {};
    ///
    /// let linearizer = AdcLinearizer::from_table(
    ///     pin,
    ///     [
    ///         breakpoint(1000, 12, 100, 40),
    ///         breakpoint(1000, 12, 200, 30),
    ///         breakpoint(1000, 12, 300, 10),
    ///     ],
    /// );
    /// # let linearizer_u16: AdcLinearizer<MockChan0, u16, 3> = linearizer;
    /// ```
    pub fn from_table<ADC>(pin: Pin, table: [Breakpoint; LENGTH]) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self::new::<ADC>(pin, PiecewiseMapper::new(table))
    }

    /// Returns a linearizer using the provided `config`.
    ///
    /// The values in `config`'s `voltage_to_values` field must be in
    /// strictly ascending order by voltage or this function will panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{AdcLinearizer, Config};
    /// # use embedded_hal_mock::adc::MockChan0;
    /// #
    /// # let pin = MockChan0 {};
    ///
    /// let config = Config {
    ///     max_voltage: 1000,
    ///     precision: 12,
    ///     voltage_to_values: [
    ///         (100, 40),
    ///         (200, 30),
    ///         (300, 10),
    ///     ],
    /// };
    ///
    /// let linearizer = AdcLinearizer::from_config(pin, config);
    /// # let linearizer_u16: AdcLinearizer<MockChan0, u16, 3> = linearizer;
    /// ```
    pub fn from_config<ADC>(pin: Pin, config: Config<LENGTH>) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self::from_table::<ADC>(pin, config.table())
    }

    /// Destroys the linearizer and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// Returns the mapper applied to every reading.
    pub fn mapper(&self) -> &PiecewiseMapper<LENGTH> {
        &self.mapper
    }

    /// Samples the ADC and returns the linearized value. Readings outside
    /// the table are clamped to its first or last value, as are readings
    /// too large for an `i32` (ADC words are unsigned).
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{breakpoint, AdcLinearizer};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// #
    /// # let expectations: [Transaction<u16>; 2] = [
    /// #     Transaction::read(0, 614),
    /// #     Transaction::read(0, 4000),
    /// # ];
    /// # let mut adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let mut linearizer = AdcLinearizer::from_table(
    ///     pin,
    ///     [
    ///         breakpoint(1000, 12, 100, 40),
    ///         breakpoint(1000, 12, 200, 30),
    ///         breakpoint(1000, 12, 300, 10),
    ///     ],
    /// );
    ///
    /// // With voltage at 150 mV, the value is 35
    /// assert_eq!(linearizer.read(&mut adc), Ok(35));
    /// // Past 300 mV the last value holds
    /// assert_eq!(linearizer.read(&mut adc), Ok(10));
    /// ```
    pub fn read<Adc, ADC>(&mut self, adc: &mut Adc) -> Result<i32, Error<Adc, ADC, Word, Pin>>
    where
        Word: TryInto<i32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let adc_value = adc.read(&mut self.pin)?;

        Ok(self.mapper.map(adc_value.try_into().unwrap_or(i32::MAX)))
    }

    /// Returns the smallest value that can be returned by
    /// [`read`](AdcLinearizer::read).
    pub fn min_value(&self) -> i32 {
        self.mapper.min_value()
    }

    /// Returns the largest value that can be returned by
    /// [`read`](AdcLinearizer::read).
    pub fn max_value(&self) -> i32 {
        self.mapper.max_value()
    }
}
