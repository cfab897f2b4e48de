use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, Receiver, Sender, TryRecvError},
    },
    thread,
    time::Duration,
};

use anyhow::ensure;
use tracing::debug;

use crate::{State, renderer, sleeper::Sleeper};

/// Handle to a background thread that advances and redraws the boards at a fixed rate.
/// Dropping the handle stops the thread as well.
pub struct TickerHost {
    stop_sender: Sender<()>,
    rate_sender: Sender<u64>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, interval: Duration) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut sleeper = Sleeper::new(interval);

            loop {
                let frame = {
                    let mut state = state_arc.write().unwrap();

                    // Checked under the lock, so a stop sent by a lock holder is never missed.
                    if should_stop(&stop_receiver) {
                        break;
                    }

                    if state.finished() {
                        debug!(turn = state.turn, "turn limit reached");
                        state.ticker = None;
                        break;
                    }

                    state.advance();
                    renderer::draw(&state)
                };

                renderer::present(&frame);

                if let Ok(rate) = rate_receiver.try_recv() {
                    sleeper.target_delta_time = Duration::from_millis(rate);
                }

                sleeper.sleep();
            }

            debug!("ticker stopped");
        });

        Self {
            stop_sender,
            rate_sender,
        }
    }

    pub fn stop(self) {
        // The thread may already be gone after reaching its turn limit.
        let _ = self.stop_sender.send(());
    }

    pub fn set_rate(&self, rate_millis: u64) {
        let _ = self.rate_sender.send(rate_millis);
    }
}

fn should_stop(stop_receiver: &Receiver<()>) -> bool {
    !matches!(stop_receiver.try_recv(), Err(TryRecvError::Empty))
}

/// Starts ticking at `rate_millis`, or the configured rate. A running ticker only has its rate
/// changed. Fails once the turn limit has been reached.
pub fn spawn_ticker(
    state_arc: &Arc<RwLock<State>>,
    rate_millis: Option<u64>,
) -> anyhow::Result<()> {
    let mut state = state_arc.write().unwrap();

    ensure!(!state.finished(), "turn limit reached");

    if let Some(rate_millis) = rate_millis {
        state.config.tick_millis = rate_millis;
    }

    if let Some(ticker) = &state.ticker {
        ticker.set_rate(state.config.tick_millis);
        return Ok(());
    }

    let interval = state.tick_interval();
    debug!(?interval, "starting ticker");
    state.ticker = Some(TickerHost::start(state_arc.clone(), interval));

    Ok(())
}

/// Returns whether a ticker was running.
pub fn stop_ticker(state_arc: &Arc<RwLock<State>>) -> bool {
    let mut state = state_arc.write().unwrap();

    match state.ticker.take() {
        Some(ticker) => {
            ticker.stop();
            true
        }
        None => false,
    }
}
