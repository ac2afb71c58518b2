//! Time-based debouncing of a boolean signal.
//!
//! A [`Debouncer`] is fed one raw sample per poll together with a
//! millisecond timestamp. Any change of the raw value restarts the settle
//! timer; the stable state only follows the raw value once it has held
//! for the configured settle time.

/// A transition of the stable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Whether the raw signal currently agrees with the stable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// The raw signal differs from the stable state and is settling.
    Unstable,
    /// The raw signal matches the stable state.
    Stable(bool),
}

/// Stabilizes a boolean signal against a settle time.
#[derive(Clone, Debug)]
pub struct Debouncer {
    settle_ms: u32,
    stable: bool,
    raw: bool,
    raw_since: u32,
    stable_since: u32,
    previous_duration: u32,
    started: bool,
    edge: Option<Edge>,
}

impl Debouncer {
    /// Returns a debouncer that starts out stable at `initial`.
    pub const fn new(settle_ms: u32, initial: bool) -> Self {
        Self {
            settle_ms,
            stable: initial,
            raw: initial,
            raw_since: 0,
            stable_since: 0,
            previous_duration: 0,
            started: false,
            edge: None,
        }
    }

    /// Feeds one raw sample taken at `now_ms`.
    ///
    /// Returns the edge if the stable state changed on this sample.
    /// `now_ms` is a free-running counter and may wrap.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_linearizer::{Debouncer, Edge};
    ///
    /// let mut debouncer = Debouncer::new(10, false);
    ///
    /// assert_eq!(debouncer.update(true, 100), None);
    /// assert_eq!(debouncer.update(true, 105), None);
    /// assert_eq!(debouncer.update(true, 110), Some(Edge::Rising));
    /// assert!(debouncer.is_high());
    /// ```
    pub fn update(&mut self, raw: bool, now_ms: u32) -> Option<Edge> {
        self.edge = None;

        if !self.started {
            self.started = true;
            self.raw_since = now_ms;
            self.stable_since = now_ms;
        }

        if raw != self.raw {
            self.raw = raw;
            self.raw_since = now_ms;
        }

        if self.raw != self.stable && now_ms.wrapping_sub(self.raw_since) >= self.settle_ms {
            self.stable = self.raw;
            self.previous_duration = now_ms.wrapping_sub(self.stable_since);
            self.stable_since = now_ms;
            self.edge = Some(if self.stable {
                Edge::Rising
            } else {
                Edge::Falling
            });

            #[cfg(feature = "defmt")]
            defmt::trace!("debounced {} at {} ms", self.edge, now_ms);
        }

        self.edge
    }

    /// The stable state.
    pub fn is_high(&self) -> bool {
        self.stable
    }

    /// The inverse of [`is_high`](Debouncer::is_high).
    pub fn is_low(&self) -> bool {
        !self.stable
    }

    /// Whether a change of the raw signal is still settling.
    pub fn status(&self) -> Status {
        if self.raw == self.stable {
            Status::Stable(self.stable)
        } else {
            Status::Unstable
        }
    }

    /// The edge produced by the last [`update`](Debouncer::update), if any.
    pub fn edge(&self) -> Option<Edge> {
        self.edge
    }

    /// Whether the last `update` changed the stable state.
    pub fn changed(&self) -> bool {
        self.edge.is_some()
    }

    /// Whether the last `update` produced a rising edge.
    pub fn rose(&self) -> bool {
        self.edge == Some(Edge::Rising)
    }

    /// Whether the last `update` produced a falling edge.
    pub fn fell(&self) -> bool {
        self.edge == Some(Edge::Falling)
    }

    /// Milliseconds the stable state has been held as of `now_ms`.
    ///
    /// Before the first edge this counts from the first `update`.
    pub fn duration(&self, now_ms: u32) -> u32 {
        if self.started {
            now_ms.wrapping_sub(self.stable_since)
        } else {
            0
        }
    }

    /// Milliseconds the previous stable state was held before the last
    /// edge, or zero if there has been none.
    pub fn previous_duration(&self) -> u32 {
        self.previous_duration
    }

    /// The configured settle time in milliseconds.
    pub fn settle_ms(&self) -> u32 {
        self.settle_ms
    }
}
