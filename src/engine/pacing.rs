//! Pacing gate for all timed animation.
//!
//! Every delay in the scripted sequence goes through [`Pacing`], so the
//! full script can run instantly under test without touching the timing
//! tables.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Real-time delays via the tokio timer.
    Real,
    /// No delays at all.
    Instant,
}

impl Pacing {
    pub async fn delay(self, duration: Duration) {
        if self == Pacing::Real && !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn instant_pacing_does_not_wait() {
        let start = Instant::now();
        Pacing::Instant.delay(Duration::from_secs(60)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
