//! Debounced binary sensors over analog and digital inputs.
//!
//! A [`DebouncedSensor`] owns a raw source and a [`Debouncer`]. Each
//! `update` samples the source exactly once and hands the result to the
//! debouncer; the source itself never buffers or filters.

use crate::debounce::{Debouncer, Edge, Status};
use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::digital::v2::InputPin;

/// Threshold used by [`AnalogSource::with_default_limit`], the midpoint
/// of a 10-bit ADC.
pub const DEFAULT_LIMIT: u16 = 512;

/// Which side of the threshold, or which pin level, counts as active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

/// An analog channel compared against a threshold.
#[derive(Debug)]
pub struct AnalogSource<Pin, Word> {
    pin: Pin,
    limit: Word,
    polarity: Polarity,
}

impl<Pin, Word> AnalogSource<Pin, Word> {
    /// Returns a source that compares readings of `pin` against `limit`.
    pub fn new(pin: Pin, limit: Word, polarity: Polarity) -> Self {
        Self {
            pin,
            limit,
            polarity,
        }
    }

    /// Whether `reading` is on the active side of the limit.
    ///
    /// Readings equal to the limit are inactive for both polarities.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{AnalogSource, Polarity};
    ///
    /// let source = AnalogSource::new((), 512u16, Polarity::ActiveLow);
    ///
    /// assert!(source.is_active(100));
    /// assert!(!source.is_active(512));
    /// assert!(!source.is_active(900));
    /// ```
    pub fn is_active(&self, reading: Word) -> bool
    where
        Word: PartialOrd,
    {
        match self.polarity {
            Polarity::ActiveHigh => reading > self.limit,
            Polarity::ActiveLow => reading < self.limit,
        }
    }

    /// Takes a fresh ADC sample and compares it against the limit.
    pub fn raw_state<Adc, ADC>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<bool, nb::Error<<Adc as OneShot<ADC, Word, Pin>>::Error>>
    where
        Word: PartialOrd,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let reading = adc.read(&mut self.pin)?;

        Ok(self.is_active(reading))
    }

    /// The threshold readings are compared against.
    pub fn limit(&self) -> &Word {
        &self.limit
    }

    /// Which side of the limit is active.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Destroys the source and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }
}

impl<Pin> AnalogSource<Pin, u16> {
    /// An active-high source with a threshold of [`DEFAULT_LIMIT`].
    pub fn with_default_limit(pin: Pin) -> Self {
        Self::new(pin, DEFAULT_LIMIT, Polarity::ActiveHigh)
    }
}

/// A digital input, optionally inverted.
#[derive(Debug)]
pub struct DigitalSource<Pin> {
    pin: Pin,
    polarity: Polarity,
}

impl<Pin> DigitalSource<Pin> {
    /// Returns a source reading `pin`, inverted for [`Polarity::ActiveLow`].
    pub fn new(pin: Pin, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Reads the pin, returning `true` when it is at its active level.
    pub fn raw_state(&mut self) -> Result<bool, Pin::Error>
    where
        Pin: InputPin,
    {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.is_high(),
            Polarity::ActiveLow => self.pin.is_low(),
        }
    }

    /// Which pin level is active.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Destroys the source and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }
}

/// A raw source paired with the debouncer that stabilizes it.
#[derive(Debug)]
pub struct DebouncedSensor<Source> {
    source: Source,
    debouncer: Debouncer,
}

impl<Source> DebouncedSensor<Source> {
    /// Pairs `source` with `debouncer`.
    pub fn new(source: Source, debouncer: Debouncer) -> Self {
        Self { source, debouncer }
    }

    /// The debounced state, already adjusted for polarity.
    pub fn is_active(&self) -> bool {
        self.debouncer.is_high()
    }

    /// Whether a change of the raw reading is still settling.
    pub fn status(&self) -> Status {
        self.debouncer.status()
    }

    /// Whether the last `update` changed the debounced state.
    pub fn changed(&self) -> bool {
        self.debouncer.changed()
    }

    /// Whether the last `update` made the sensor active.
    pub fn rose(&self) -> bool {
        self.debouncer.rose()
    }

    /// Whether the last `update` made the sensor inactive.
    pub fn fell(&self) -> bool {
        self.debouncer.fell()
    }

    /// Milliseconds the debounced state has been held as of `now_ms`.
    pub fn duration(&self, now_ms: u32) -> u32 {
        self.debouncer.duration(now_ms)
    }

    /// Milliseconds the previous debounced state was held before the
    /// last change.
    pub fn previous_duration(&self) -> u32 {
        self.debouncer.previous_duration()
    }

    /// The raw source being debounced.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Destroys the sensor and returns its source.
    pub fn free(self) -> Source {
        self.source
    }
}

impl<Pin, Word> DebouncedSensor<AnalogSource<Pin, Word>> {
    /// An analog threshold sensor, initially inactive.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{DebouncedSensor, Edge, Polarity};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// #
    /// # let expectations: [Transaction<u16>; 3] = [
    /// #     Transaction::read(0, 700),
    /// #     Transaction::read(0, 710),
    /// #     Transaction::read(0, 690),
    /// # ];
    /// # let mut adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let mut lever = DebouncedSensor::analog(pin, 512u16, Polarity::ActiveHigh, 20);
    ///
    /// assert_eq!(lever.update(&mut adc, 0), Ok(None));
    /// assert_eq!(lever.update(&mut adc, 10), Ok(None));
    /// assert_eq!(lever.update(&mut adc, 20), Ok(Some(Edge::Rising)));
    /// assert!(lever.is_active());
    /// ```
    pub fn analog(pin: Pin, limit: Word, polarity: Polarity, settle_ms: u32) -> Self {
        Self::new(
            AnalogSource::new(pin, limit, polarity),
            Debouncer::new(settle_ms, false),
        )
    }

    /// Samples the ADC once and feeds the result to the debouncer.
    ///
    /// A failed read leaves the debouncer untouched.
    pub fn update<Adc, ADC>(
        &mut self,
        adc: &mut Adc,
        now_ms: u32,
    ) -> Result<Option<Edge>, nb::Error<<Adc as OneShot<ADC, Word, Pin>>::Error>>
    where
        Word: PartialOrd,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let raw = self.source.raw_state(adc)?;

        Ok(self.debouncer.update(raw, now_ms))
    }
}

impl<Pin> DebouncedSensor<DigitalSource<Pin>> {
    /// A digital sensor, initially inactive.
    pub fn digital(pin: Pin, polarity: Polarity, settle_ms: u32) -> Self {
        Self::new(
            DigitalSource::new(pin, polarity),
            Debouncer::new(settle_ms, false),
        )
    }

    /// Reads the pin once and feeds the result to the debouncer.
    ///
    /// A failed read leaves the debouncer untouched.
    pub fn update(&mut self, now_ms: u32) -> Result<Option<Edge>, Pin::Error>
    where
        Pin: InputPin,
    {
        let raw = self.source.raw_state()?;

        Ok(self.debouncer.update(raw, now_ms))
    }
}
