//! Countdown timer state machine and wire messages.
//!
//! The state machine owns the remaining-seconds counter; the frontend drives
//! it from an isolated task, feeding it commands from the UI and an interval
//! fire once per second, and forwards the emitted events back as messages.

use serde::{Deserialize, Serialize};

/// Command sent from the UI to the timer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TimerCommand {
    Start { duration: u32 },
    Stop,
}

/// Notification sent from the timer task back to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimerEvent {
    Tick {
        #[serde(rename = "timeLeft")]
        time_left: u32,
    },
    Expired,
}

/// One-second-resolution countdown.
///
/// `apply` handles commands, `on_interval` handles one interval fire. Both
/// return the events to deliver, in emission order.
#[derive(Debug, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn apply(&mut self, command: TimerCommand) -> Vec<TimerEvent> {
        match command {
            TimerCommand::Start { duration } => {
                // cancel-then-restart: never two concurrent intervals
                self.running = false;
                self.remaining = duration;
                if duration == 0 {
                    // a zero-duration start counts as already expired
                    return vec![TimerEvent::Expired];
                }
                self.running = true;
                Vec::new()
            }
            TimerCommand::Stop => {
                self.running = false;
                Vec::new()
            }
        }
    }

    pub fn on_interval(&mut self) -> Vec<TimerEvent> {
        if !self.running {
            return Vec::new();
        }
        self.remaining = self.remaining.saturating_sub(1);
        let mut events = vec![TimerEvent::Tick {
            time_left: self.remaining,
        }];
        if self.remaining == 0 {
            self.running = false;
            events.push(TimerEvent::Expired);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_out(countdown: &mut Countdown) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while countdown.is_running() {
            events.extend(countdown.on_interval());
        }
        events
    }

    #[test]
    fn test_start_five_ticks_down_to_expiry() {
        let mut countdown = Countdown::new();
        assert!(countdown.apply(TimerCommand::Start { duration: 5 }).is_empty());

        let events = run_out(&mut countdown);
        assert_eq!(
            events,
            vec![
                TimerEvent::Tick { time_left: 4 },
                TimerEvent::Tick { time_left: 3 },
                TimerEvent::Tick { time_left: 2 },
                TimerEvent::Tick { time_left: 1 },
                TimerEvent::Tick { time_left: 0 },
                TimerEvent::Expired,
            ]
        );
    }

    #[test]
    fn test_start_zero_expires_immediately() {
        let mut countdown = Countdown::new();
        let events = countdown.apply(TimerCommand::Start { duration: 0 });
        assert_eq!(events, vec![TimerEvent::Expired]);
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_stop_between_ticks_halts_notifications() {
        let mut countdown = Countdown::new();
        countdown.apply(TimerCommand::Start { duration: 10 });
        countdown.on_interval();
        countdown.apply(TimerCommand::Stop);

        assert!(!countdown.is_running());
        assert!(countdown.on_interval().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut countdown = Countdown::new();
        assert!(countdown.apply(TimerCommand::Stop).is_empty());
        assert!(countdown.apply(TimerCommand::Stop).is_empty());
    }

    #[test]
    fn test_restart_replaces_running_countdown() {
        let mut countdown = Countdown::new();
        countdown.apply(TimerCommand::Start { duration: 100 });
        countdown.on_interval();
        countdown.apply(TimerCommand::Start { duration: 3 });

        let events = run_out(&mut countdown);
        assert_eq!(
            events,
            vec![
                TimerEvent::Tick { time_left: 2 },
                TimerEvent::Tick { time_left: 1 },
                TimerEvent::Tick { time_left: 0 },
                TimerEvent::Expired,
            ]
        );
    }

    #[test]
    fn test_ticks_decrease_monotonically() {
        let mut countdown = Countdown::new();
        countdown.apply(TimerCommand::Start { duration: 30 });

        let mut last = u32::MAX;
        for event in run_out(&mut countdown) {
            if let TimerEvent::Tick { time_left } = event {
                assert!(time_left < last);
                last = time_left;
            }
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_command_wire_format() {
        assert_eq!(
            serde_json::to_string(&TimerCommand::Start { duration: 120 }).unwrap(),
            r#"{"action":"start","duration":120}"#
        );
        assert_eq!(
            serde_json::to_string(&TimerCommand::Stop).unwrap(),
            r#"{"action":"stop"}"#
        );
    }

    #[test]
    fn test_event_wire_format() {
        assert_eq!(
            serde_json::to_string(&TimerEvent::Tick { time_left: 42 }).unwrap(),
            r#"{"type":"tick","timeLeft":42}"#
        );
        assert_eq!(
            serde_json::to_string(&TimerEvent::Expired).unwrap(),
            r#"{"type":"expired"}"#
        );

        let parsed: TimerEvent = serde_json::from_str(r#"{"type":"tick","timeLeft":7}"#).unwrap();
        assert_eq!(parsed, TimerEvent::Tick { time_left: 7 });
    }
}
