use std::{future::Future, pin::Pin};

use anyhow::Result;
use futures_util::StreamExt;

use crate::{
    app::{
        actions::{execute_action, ActionKind, ActionOutcome},
        controller::TicketListController,
    },
    config::Config,
    domain::toast::ToastQueue,
    ports::{ClockPort, TicketApiPort},
    ui::tui::{BoardModel, TerminalUi},
};

mod execution_state;
mod outcome;
mod stream_controller;

use execution_state::ActionExecutionState;
use outcome::apply_action_outcome;
use stream_controller::{handle_stream_event, LoopControl};

type ActionFuture<'a> = Pin<Box<dyn Future<Output = ActionOutcome> + 'a>>;

/// Interactive board. One remote request runs at a time; the countdown is
/// driven by the controller's tick, and drawing never waits on the network.
pub async fn run_board<A, K>(config: &Config, api: &A, clock: &K) -> Result<()>
where
    A: TicketApiPort,
    K: ClockPort,
{
    let mut ui = TerminalUi::new()?;
    let mut controller = TicketListController::new(api, clock);
    let mut model = BoardModel::new(
        ToastQueue::new(config.toasts.limit, config.toast_ttl()),
        config.attachment_max_bytes,
    );
    model.status_line = "ready".to_string();

    let mut ticks = controller.start_ticking(config.tick_period());
    let mut reader = crossterm::event::EventStream::new();
    let mut exec = ActionExecutionState::default();
    let mut in_flight: Option<ActionFuture<'_>> = None;
    exec.request_refresh();

    loop {
        if let Some(action) = exec.start_next() {
            tracing::debug!(action = action.kind().as_str(), "starting board action");
            in_flight = Some(Box::pin(execute_action(controller.api(), action)));
        }
        sync_busy(&mut model, &exec, clock);
        ui.draw(&mut model, controller.board(), clock.now())?;

        tokio::select! {
            changed = ticks.changed(), if controller.is_ticking() => {
                if changed.is_err() {
                    tracing::warn!("tick task stopped");
                    controller.stop_ticking();
                    continue;
                }
                model.toasts.expire(clock.now());
            }
            outcome = async {
                match in_flight.as_mut() {
                    Some(fut) => Some(fut.await),
                    None => None,
                }
            }, if in_flight.is_some() => {
                in_flight = None;
                let Some(outcome) = outcome else {
                    continue;
                };

                apply_action_outcome(outcome, &mut controller, &mut model);
                if exec.finish_and_take_next_request() {
                    model.status_line = format!("{} | queued refresh", model.status_line);
                }
            }
            maybe_event = reader.next() => {
                match handle_stream_event(maybe_event, &mut model, controller.board(), clock) {
                    LoopControl::Quit => break,
                    LoopControl::Dispatch(action) => {
                        let kind = action.kind();
                        if !exec.submit(action) && kind != ActionKind::Refresh {
                            model.toasts.info(
                                "Busy",
                                "Another request is in progress",
                                clock.now(),
                            );
                        }
                    }
                    LoopControl::Redraw | LoopControl::Continue => {}
                }
            }
        }
    }

    controller.stop_ticking();
    Ok(())
}

fn sync_busy<K>(model: &mut BoardModel, exec: &ActionExecutionState, clock: &K)
where
    K: ClockPort + ?Sized,
{
    let in_flight = exec.in_flight();
    if in_flight != model.busy {
        model.busy_since = in_flight.map(|_| clock.now());
    }
    model.busy = in_flight;
    model.queued_refresh = exec.queued_refresh();
}
