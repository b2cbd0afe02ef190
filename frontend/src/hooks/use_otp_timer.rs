//! Countdown timer hook.
//!
//! The countdown runs in its own task so UI re-renders never affect the
//! cadence. The task owns a `Countdown` exclusively and talks to the UI
//! through two mpsc channels: commands in, tick/expiry notifications out,
//! delivered in emission order. Dropping the command sender on unmount
//! terminates the task; nothing else reaches across the boundary.

use std::time::Duration;

use futures::channel::mpsc;
use futures::{FutureExt, StreamExt};
use gloo::timers::future::sleep;
use otp_core::timer::{Countdown, TimerCommand, TimerEvent};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// State and controls returned by [`use_otp_timer`].
#[derive(Clone, PartialEq)]
pub struct OtpTimer {
    pub time_left: u32,
    pub is_expired: bool,
    pub start: Callback<u32>,
    pub stop: Callback<()>,
}

async fn run_timer(
    mut commands: mpsc::UnboundedReceiver<TimerCommand>,
    events: mpsc::UnboundedSender<TimerEvent>,
) {
    let mut countdown = Countdown::new();

    loop {
        let emitted = if countdown.is_running() {
            let mut interval = Box::pin(sleep(Duration::from_secs(1)).fuse());
            futures::select! {
                command = commands.next() => match command {
                    Some(command) => countdown.apply(command),
                    None => return,
                },
                _ = interval => countdown.on_interval(),
            }
        } else {
            match commands.next().await {
                Some(command) => countdown.apply(command),
                None => return,
            }
        };

        for event in emitted {
            if events.unbounded_send(event).is_err() {
                return;
            }
        }
    }
}

/// Runs a one-second-resolution countdown in an isolated task scoped to the
/// mounting component. Multiple widget instances never share timer state.
#[hook]
pub fn use_otp_timer() -> OtpTimer {
    let time_left = use_state(|| 0u32);
    let is_expired = use_state(|| false);

    let commands = {
        let time_left = time_left.clone();
        let is_expired = is_expired.clone();
        use_memo((), move |_| {
            let (command_tx, command_rx) = mpsc::unbounded();
            let (event_tx, mut event_rx) = mpsc::unbounded();

            spawn_local(run_timer(command_rx, event_tx));

            // notification pump on the UI side of the channel
            spawn_local(async move {
                while let Some(event) = event_rx.next().await {
                    match event {
                        TimerEvent::Tick { time_left: left } => {
                            time_left.set(left);
                            is_expired.set(false);
                        }
                        TimerEvent::Expired => {
                            time_left.set(0);
                            is_expired.set(true);
                        }
                    }
                }
            });

            command_tx
        })
    };

    let start = {
        let commands = commands.clone();
        let time_left = time_left.clone();
        let is_expired = is_expired.clone();
        Callback::from(move |duration: u32| {
            is_expired.set(false);
            time_left.set(duration);
            let _ = commands.unbounded_send(TimerCommand::Start { duration });
        })
    };

    let stop = {
        let commands = commands.clone();
        Callback::from(move |_| {
            let _ = commands.unbounded_send(TimerCommand::Stop);
        })
    };

    OtpTimer {
        time_left: *time_left,
        is_expired: *is_expired,
        start,
        stop,
    }
}
