use clickwheel::collab::Confirm;
use std::time::{Duration, Instant};

const CONFIRM_WINDOW: Duration = Duration::from_secs(4);

/// Asks for the same destructive choice twice in a row. The first press arms
/// the prompt, a second press within the window goes ahead.
#[derive(Debug, Default)]
pub struct ArmedConfirm {
    armed: Option<(String, Instant)>,
}

impl ArmedConfirm {
    /// Text for the banner while a prompt is armed.
    pub fn banner(&self) -> Option<&'static str> {
        self.is_armed_at(Instant::now()).then_some("Press again to confirm")
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    fn is_armed_at(&self, now: Instant) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|(_, at)| now.duration_since(*at) <= CONFIRM_WINDOW)
    }

    fn confirm_at(&mut self, prompt: &str, now: Instant) -> bool {
        let again = self.is_armed_at(now)
            && self.armed.as_ref().is_some_and(|(armed, _)| armed == prompt);
        if again {
            self.armed = None;
            return true;
        }
        log::info!("{}", prompt);
        self.armed = Some((prompt.to_string(), now));
        false
    }
}

impl Confirm for ArmedConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirm_at(prompt, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_press_confirms() {
        let mut c = ArmedConfirm::default();
        let t = Instant::now();
        assert!(!c.confirm_at("delete?", t));
        assert!(c.is_armed_at(t));
        assert!(c.confirm_at("delete?", t + Duration::from_secs(1)));
        assert!(!c.is_armed_at(t + Duration::from_secs(1)));
    }

    #[test]
    fn test_late_or_different_press_rearms() {
        let mut c = ArmedConfirm::default();
        let t = Instant::now();
        assert!(!c.confirm_at("delete?", t));
        assert!(!c.confirm_at("delete?", t + CONFIRM_WINDOW + Duration::from_secs(1)));
        assert!(!c.confirm_at("other?", t + CONFIRM_WINDOW + Duration::from_secs(2)));
    }

    #[test]
    fn test_disarm_forgets_prompt() {
        let mut c = ArmedConfirm::default();
        let t = Instant::now();
        c.confirm_at("delete?", t);
        c.disarm();
        assert!(!c.confirm_at("delete?", t));
    }
}
