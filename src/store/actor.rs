//! One worker thread per match.
//!
//! The worker owns the `Duel` and applies commands in arrival order, so a
//! match never sees two writers. Dropping the handle closes the channel;
//! the worker drains what is queued and exits, and the drop joins it.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{trace, warn};

use crate::core::action::Intent;
use crate::core::entity::MatchId;
use crate::core::error::{EngineResult, Rejection};
use crate::core::player::ParticipantId;
use crate::core::state::MatchState;
use crate::rules::Duel;
use crate::snapshot::{view_for, MatchView};

type Reply<T> = Sender<EngineResult<T>>;

enum Command {
    Apply {
        participant: ParticipantId,
        intent: Intent,
        reply: Reply<MatchState>,
    },
    View {
        participant: ParticipantId,
        reply: Reply<MatchView>,
    },
    State {
        reply: Reply<MatchState>,
    },
}

/// Sending side of a match worker.
#[derive(Clone)]
pub(crate) struct MatchClient {
    sender: Sender<Command>,
}

impl MatchClient {
    pub(crate) fn apply(&self, participant: ParticipantId, intent: Intent) -> EngineResult<MatchState> {
        self.call(|reply| Command::Apply {
            participant,
            intent,
            reply,
        })
    }

    pub(crate) fn view(&self, participant: ParticipantId) -> EngineResult<MatchView> {
        self.call(|reply| Command::View { participant, reply })
    }

    pub(crate) fn state(&self) -> EngineResult<MatchState> {
        self.call(|reply| Command::State { reply })
    }

    fn call<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> EngineResult<T> {
        let (reply, response) = mpsc::channel();
        self.sender
            .send(command(reply))
            .map_err(|_| Rejection::MatchClosed)?;
        response.recv().map_err(|_| Rejection::MatchClosed)?
    }
}

/// Owning handle: the worker lives as long as this does.
pub(crate) struct MatchHandle {
    client: Option<MatchClient>,
    worker: Option<JoinHandle<()>>,
    pub(crate) participants: Vec<ParticipantId>,
}

impl MatchHandle {
    pub(crate) fn spawn(duel: Duel, participants: Vec<ParticipantId>) -> Self {
        let match_id = duel.state().match_id();
        let (sender, receiver) = mpsc::channel();
        let worker = thread::spawn(move || run(match_id, duel, receiver));

        Self {
            client: Some(MatchClient { sender }),
            worker: Some(worker),
            participants,
        }
    }

    pub(crate) fn client(&self) -> EngineResult<MatchClient> {
        self.client.clone().ok_or(Rejection::MatchClosed)
    }
}

impl Drop for MatchHandle {
    fn drop(&mut self) {
        drop(self.client.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("match worker panicked");
            }
        }
    }
}

fn run(match_id: MatchId, mut duel: Duel, commands: Receiver<Command>) {
    for command in commands {
        // A requester that went away is not the worker's problem.
        match command {
            Command::Apply {
                participant,
                intent,
                reply,
            } => {
                let result = duel.submit(&participant, intent).cloned();
                let _ = reply.send(result);
            }
            Command::View { participant, reply } => {
                let result = duel
                    .state()
                    .seat_of(&participant)
                    .map(|seat| view_for(duel.state(), seat))
                    .ok_or(Rejection::NotAParticipant(participant));
                let _ = reply.send(result);
            }
            Command::State { reply } => {
                let _ = reply.send(Ok(duel.state().clone()));
            }
        }
    }
    trace!(%match_id, "match worker stopped");
}
