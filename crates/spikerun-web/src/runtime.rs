use std::cell::RefCell;
use std::rc::Rc;

use spikerun_engine::core::StartupError;
use spikerun_engine::session::{Session, SessionBuilder};

use crate::config::WebConfig;
use crate::game::{JsGame, JsSimulation};
use crate::platform::{acquire_context, AnimationFrames, DocumentKeys};

type WebSession = Session<JsSimulation, DocumentKeys, AnimationFrames>;

thread_local! {
    /// The page's only session. Kept for the page lifetime so its key
    /// listeners stay registered.
    static SESSION: RefCell<Option<WebSession>> = const { RefCell::new(None) };
}

/// Builds and starts the page session.
///
/// Every host lookup happens before the session is wired, so a missing
/// canvas leaves no listener and no pending frame behind.
pub fn launch(game: JsGame, config: WebConfig) -> Result<(), StartupError> {
    SESSION.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(StartupError::AlreadyRunning);
        }

        let window = web_sys::window().ok_or(StartupError::HostUnavailable("window"))?;
        let document = window
            .document()
            .ok_or(StartupError::HostUnavailable("document"))?;

        let surface = acquire_context(&document, &config.canvas_id)?;
        let frames = Rc::new(AnimationFrames::new(window.clone())?);
        let keys = DocumentKeys::new(window, document);

        let session = SessionBuilder::new()
            .simulation(JsSimulation::new(game))
            .surface(surface)
            .bindings(config.bindings)
            .scheduler_config(config.scheduler)
            .start(&keys, frames)?;

        log::info!("driving canvas `{}`", config.canvas_id);
        *slot = Some(session);
        Ok(())
    })
}

/// Loop status of the page session, if one was launched.
pub fn status() -> Option<spikerun_engine::sched::LoopStatus> {
    SESSION.with(|slot| slot.borrow().as_ref().map(|s| s.status()))
}
