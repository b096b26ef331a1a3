use std::time::Duration;

use instant::Instant;


// Measures how long a piece was held between selection and the move.
#[derive(Clone, Debug, Default)]
pub struct Hold {
    started_at: Option<Instant>,
}

impl Hold {
    pub fn start(&mut self) { self.started_at = Some(Instant::now()); }

    pub fn cancel(&mut self) { self.started_at = None; }

    // Zero if the timer was not running.
    pub fn stop(&mut self) -> Duration {
        self.started_at.take().map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn is_running(&self) -> bool { self.started_at.is_some() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut hold = Hold::default();
        assert_eq!(hold.stop(), Duration::ZERO);
        hold.start();
        assert!(hold.is_running());
        hold.cancel();
        assert!(!hold.is_running());
        assert_eq!(hold.stop(), Duration::ZERO);
        hold.start();
        let _ = hold.stop();
        assert!(!hold.is_running());
    }
}
