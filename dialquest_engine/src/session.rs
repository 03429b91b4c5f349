//! The control loop's unit of work.
//!
//! A [`Session`] owns the navigator and the wrapped text of the current room.
//! Each call to [`Session::step`] takes the mailbox's pending press and
//! position exactly once, performs at most one move, and redraws the page if
//! the room or the visible screen changed.

use log::{error, info, warn};

use dialquest_data::RoomNumber;

use crate::display::{DisplayDriver, Notice};
use crate::error::EngineError;
use crate::mailbox::InputMailbox;
use crate::navigator::{GrantPolicy, MoveOutcome, MoveReport, Navigator};
use crate::paginate::{PageLayout, Pager};
use crate::store::RoomStore;

/// What happened during one [`Session::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub moved: Option<MoveReport>,
    pub redrawn: bool,
}

#[derive(Debug)]
pub struct Session<S> {
    navigator: Navigator<S>,
    pager: Pager,
    position: u16,
    showing: Option<usize>,
}

impl<S: RoomStore> Session<S> {
    /// Enter the start room and prepare its pages.
    ///
    /// # Errors
    /// Any failure to enter `start_room`; the engine cannot run without it.
    pub fn start(
        store: S,
        start_room: RoomNumber,
        layout: PageLayout,
        grant_policy: GrantPolicy,
    ) -> Result<Self, EngineError> {
        let navigator = Navigator::start(store, start_room, grant_policy)?;
        info!(
            "session started in room {start_room}: {}x{} display, {:?} grants",
            layout.width,
            layout.height,
            navigator.grant_policy()
        );
        let pager = Pager::new(navigator.room(), layout);
        Ok(Self {
            navigator,
            pager,
            position: 0,
            showing: None,
        })
    }

    pub fn navigator(&self) -> &Navigator<S> {
        &self.navigator
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Last position taken from the mailbox.
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Screen currently on the display, if anything has been drawn.
    pub fn showing(&self) -> Option<usize> {
        self.showing
    }

    /// Run one iteration of the control loop.
    ///
    /// # Errors
    /// Only unrecoverable errors are returned; the caller must halt. Recoverable
    /// ones are logged, shown as a notice, and the previous room stays visible.
    pub fn step(
        &mut self,
        mailbox: &InputMailbox,
        display: &mut impl DisplayDriver,
    ) -> Result<StepOutcome, EngineError> {
        let mut outcome = StepOutcome::default();

        if let Some(dir) = mailbox.take_press() {
            match self.navigator.go(dir) {
                Ok(MoveOutcome::Entered(report)) => {
                    for item in &report.granted {
                        display.notice(Notice::Granted(*item));
                    }
                    for item in &report.dropped {
                        display.notice(Notice::Dropped(*item));
                    }
                    self.pager = Pager::new(self.navigator.room(), self.pager.layout());
                    outcome.moved = Some(report);
                },
                Ok(MoveOutcome::Stayed) => display.notice(Notice::NoExit(dir)),
                Err(err) if err.is_fatal() => {
                    error!("halting: {err}");
                    display.notice(Notice::Fatal(err.to_string()));
                    return Err(err);
                },
                Err(err) => {
                    warn!("move {dir} failed: {err}");
                    display.notice(Notice::Error(err.to_string()));
                },
            }
        }

        let position_changed = match mailbox.take_position() {
            Some(position) => {
                self.position = position;
                true
            },
            None => false,
        };

        if outcome.moved.is_some() || position_changed || self.showing.is_none() {
            let page = self.pager.page_at(self.position);
            if outcome.moved.is_some() || self.showing != Some(page.screen) {
                info!("showing screen {}/{}", page.screen, page.screens);
                display.draw_page(&page);
                self.showing = Some(page.screen);
                outcome.redrawn = true;
            }
        }

        Ok(outcome)
    }

    /// Draw the visible screen again regardless of changes.
    pub fn redraw(&mut self, display: &mut impl DisplayDriver) {
        let page = self.pager.page_at(self.position);
        display.draw_page(&page);
        self.showing = Some(page.screen);
    }
}
