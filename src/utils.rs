/// Parse `"a,b"` into a pair, as used for grid shapes on the command line.
pub fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String>
where
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let v = s.split(',').map(str::trim).collect::<Vec<_>>();
    let &[x, y] = v.as_slice() else { return Err(format!("expected two comma-separated values, got `{s}`")) };
    let parse = |t: &str| t.parse::<T>().map_err(|e| format!("`{t}`: {e}"));
    Ok((parse(x)?, parse(y)?))
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;

    /// Reports the time taken by successive stages of a computation, as
    /// `tracing` events.
    pub struct Progress {
        previous: Instant,
        message: String,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now(), message: String::new() } }

        /// Remember message and start timer
        pub fn start(&mut self, message: &str) {
            tracing::debug!("{message} ...");
            self.message = message.to_string();
            self.start_timer();
        }

        /// Report time elapsed since last start or done
        pub fn done(&mut self) {
            let message = std::mem::take(&mut self.message);
            self.done_with_message(&message);
        }

        /// Report message followed by time elapsed since last start or done
        pub fn done_with_message(&mut self, message: &str) {
            tracing::info!("{message}: {} ms", group_digits(self.elapsed_ms()));
            self.start_timer();
        }

        pub fn elapsed_ms(&self) -> u128 { self.previous.elapsed().as_millis() }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}
