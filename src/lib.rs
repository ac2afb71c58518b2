//! Conditioning for analog inputs on `embedded-hal` targets.
//!
//! Two independent pieces:
//!
//! - [`PiecewiseMapper`] linearizes a reading through a small calibration
//!   table of breakpoints, clamping anything outside the table.
//!   [`AdcLinearizer`] pairs one with an ADC channel.
//! - [`DebouncedSensor`] turns a noisy analog threshold or digital pin
//!   into a stable boolean using a time-based [`Debouncer`].
//!
//! # Examples
//!
//! ```
//! use adc_linearizer::{DebouncedSensor, Edge, PiecewiseMapper, Polarity};
//! # use embedded_hal_mock::pin::{Mock, State, Transaction};
//! #
//! # let expectations = [
//! #     Transaction::get(State::Low),
//! #     Transaction::get(State::Low),
//! # ];
//! # let button_pin = Mock::new(&expectations);
//!
//! // A log-taper pot linearized to 0..=100
//! static POT: PiecewiseMapper<4> =
//!     PiecewiseMapper::new([(0, 0), (100, 50), (400, 75), (1023, 100)]);
//!
//! assert_eq!(POT.map(50), 25);
//! assert_eq!(POT.map(250), 62);
//!
//! let mut button = DebouncedSensor::digital(button_pin, Polarity::ActiveLow, 5);
//! assert_eq!(button.update(0), Ok(None));
//! assert_eq!(button.update(5), Ok(Some(Edge::Rising)));
//! ```

#![cfg_attr(not(test), no_std)]

mod adc_linearizer;
mod debounce;
mod interpolate;
mod mapper;
mod sensor;
mod table;

pub use adc_linearizer::AdcLinearizer;
pub use debounce::{Debouncer, Edge, Status};
pub use mapper::PiecewiseMapper;
pub use sensor::{AnalogSource, DebouncedSensor, DigitalSource, Polarity, DEFAULT_LIMIT};
pub use table::{breakpoint, Bounds, Breakpoint, Config, TableError};
