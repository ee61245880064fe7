//! Shared fixtures for unit tests.

use crate::params::InletParams;

/// Chord-1 inlet whose ramp is described by `(a1, a2, ramp_length, ramp_height)`.
pub fn ramp_params(a1: f64, a2: f64, ramp_length: f64, ramp_height: f64) -> InletParams {
    let throat_height = 0.1;
    let cowl_height = 0.05;
    let intake_height = ramp_height + throat_height + cowl_height;
    InletParams {
        chord_length: 1.0,
        domain_length: 2.0,
        domain_height: intake_height + 0.5,
        intake_length: 1.5,
        intake_height,
        throat_height,
        ramp_length,
        ramp_height,
        cowl_height,
        ramp_angle_1: a1,
        ramp_angle_2: a2,
        cowl_angle: 30.0,
    }
}

/// Run `f` under a plain-text `fmt` subscriber and return its result with
/// everything that was logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let sink = Sink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&sink.0.lock().unwrap()).into_owned();
    (out, text)
}
